use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root object of a transcript fragment (Scribe-style JSON export)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TranscriptRecord {
    /// Transcript text, either one string or a list of paragraphs
    pub text: TextField,
    /// Word-level timing records
    pub words: WordsField,
    /// Any other top-level keys (language_code, etc.), preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `text` field: a bare string or a list of strings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TextField {
    Single(String),
    Many(Vec<String>),
}

/// The `words` field: a bare string or a list of word entries
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WordsField {
    Single(String),
    Many(Vec<WordEntry>),
}

/// One element of a `words` list
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WordEntry {
    Word(WordRecord),
    /// Bare string carried over from a fragment whose `words` was a string
    Raw(String),
}

/// A single timed token with speaker attribution
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WordRecord {
    /// The recognized text
    #[serde(default)]
    pub text: String,
    /// Start timestamp in seconds, may be absent on non-word entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// End timestamp in seconds, may be absent on non-word entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Speaker identifier, absent when diarization was off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
    /// Token type (word, spacing, audio_event, ...)
    #[serde(rename = "type", default, skip_serializing_if = "WordKind::is_unset")]
    pub kind: WordKind,
    /// Other per-word keys (logprob, characters, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WordRecord {
    /// Whether this record takes part in segmentation
    pub fn is_spoken(&self) -> bool {
        self.kind == WordKind::Word && !self.text.trim().is_empty()
    }
}

/// Token type. Anything other than `word` keeps its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum WordKind {
    Word,
    Other(String),
}

impl WordKind {
    /// True when the source entry had no `type` key
    pub fn is_unset(&self) -> bool {
        matches!(self, WordKind::Other(value) if value.is_empty())
    }
}

impl Default for WordKind {
    fn default() -> Self {
        WordKind::Other(String::new())
    }
}

impl From<String> for WordKind {
    fn from(value: String) -> Self {
        if value == "word" {
            WordKind::Word
        } else {
            WordKind::Other(value)
        }
    }
}

impl From<WordKind> for String {
    fn from(kind: WordKind) -> Self {
        match kind {
            WordKind::Word => "word".to_string(),
            WordKind::Other(value) => value,
        }
    }
}

impl TextField {
    /// Promote to the list form
    pub fn into_many(self) -> Vec<String> {
        match self {
            TextField::Single(text) => vec![text],
            TextField::Many(texts) => texts,
        }
    }
}

impl WordsField {
    /// Promote to the list form
    pub fn into_many(self) -> Vec<WordEntry> {
        match self {
            WordsField::Single(raw) => vec![WordEntry::Raw(raw)],
            WordsField::Many(entries) => entries,
        }
    }

    /// Word records in order, skipping bare strings
    pub fn records(&self) -> impl Iterator<Item = &WordRecord> {
        let entries: &[WordEntry] = match self {
            WordsField::Single(_) => &[],
            WordsField::Many(entries) => entries,
        };
        entries.iter().filter_map(|entry| match entry {
            WordEntry::Word(word) => Some(word),
            WordEntry::Raw(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scribe_record() {
        let json = r#"{
            "language_code": "eng",
            "text": "hi there",
            "words": [
                {"text": "hi", "start": 0.0, "end": 0.4, "type": "word", "speaker_id": "speaker_0", "logprob": -0.1},
                {"text": " ", "start": 0.4, "end": 0.5, "type": "spacing", "speaker_id": "speaker_0"},
                {"text": "there", "start": 0.5, "end": 0.9, "type": "word", "speaker_id": "speaker_0"}
            ]
        }"#;

        let record: TranscriptRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.text, TextField::Single("hi there".to_string()));
        assert_eq!(record.extra.get("language_code"), Some(&Value::from("eng")));

        let words: Vec<&WordRecord> = record.words.records().collect();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].kind, WordKind::Word);
        assert_eq!(words[1].kind, WordKind::Other("spacing".to_string()));
        assert_eq!(words[0].speaker_id.as_deref(), Some("speaker_0"));
        assert!(words[0].extra.contains_key("logprob"));
        assert!(words[0].is_spoken());
        assert!(!words[1].is_spoken());
    }

    #[test]
    fn test_string_fields_and_mixed_words() {
        let json = r#"{
            "text": ["one", "two"],
            "words": ["raw", {"text": "x", "start": 1.0, "end": 2.0, "type": "word"}]
        }"#;

        let record: TranscriptRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.text.clone().into_many(), vec!["one", "two"]);
        let entries = record.words.clone().into_many();
        assert_eq!(entries[0], WordEntry::Raw("raw".to_string()));
        assert_eq!(record.words.records().count(), 1);
        assert_eq!(record.words.records().next().unwrap().speaker_id, None);
    }

    #[test]
    fn test_missing_words_is_an_error() {
        let json = r#"{"text": "only text"}"#;
        assert!(serde_json::from_str::<TranscriptRecord>(json).is_err());
    }

    #[test]
    fn test_word_kind_keeps_original_spelling() {
        let word = WordRecord {
            text: "(laughs)".to_string(),
            start: Some(1.0),
            end: Some(1.5),
            speaker_id: None,
            kind: WordKind::Other("audio_event".to_string()),
            extra: Map::new(),
        };
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["type"], "audio_event");
        assert!(value.get("speaker_id").is_none());
    }

    #[test]
    fn test_untimed_non_word_entries_parse() {
        let json = r#"{
            "text": "hi",
            "words": [
                {"text": "hi", "start": 0, "end": 1, "type": "word", "speaker_id": "speaker_0"},
                {"text": " ", "type": "spacing"},
                {"type": "audio_event"}
            ]
        }"#;

        let record: TranscriptRecord = serde_json::from_str(json).unwrap();
        let words: Vec<&WordRecord> = record.words.records().collect();

        assert_eq!(words.len(), 3);
        assert_eq!(words[0].start, Some(0.0));
        assert_eq!(words[1].start, None);
        assert_eq!(words[2].text, "");
        assert!(!words[1].is_spoken());

        // Untimed entries stay untimed when written back
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["words"][1].get("start").is_none());
        assert!(value["words"][0].get("type").is_some());
        assert_eq!(value["words"][2]["type"], "audio_event");
    }

    #[test]
    fn test_missing_type_is_not_written_back() {
        let record: TranscriptRecord =
            serde_json::from_str(r#"{"text": "", "words": [{"text": "x", "start": 0, "end": 1}]}"#).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["words"][0].get("type").is_none());
    }
}
