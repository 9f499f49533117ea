use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::{ConvertError, Result};
use crate::io::{derived_path, discover_fragments, ensure_output_dir, load_record, write_text};
use crate::models::{Cue, TranscriptRecord, WordRecord, render_srt};

/// Words accumulated for the speaker turn in progress
#[derive(Debug)]
struct TurnBuffer {
    speaker_id: String,
    text: String,
    start: f64,
    end: f64,
}

/// A qualifying word with its speaker and timing checked
#[derive(Debug)]
struct SpokenWord<'a> {
    speaker_id: &'a str,
    text: &'a str,
    start: f64,
    end: f64,
}

impl<'a> SpokenWord<'a> {
    fn from_record(word: &'a WordRecord, source: &Path) -> Result<Self> {
        let malformed = |what: &str| ConvertError::MalformedInput {
            path: source.to_path_buf(),
            message: format!("word {:?} has no {}", word.text, what),
        };

        Ok(Self {
            speaker_id: word.speaker_id.as_deref().ok_or_else(|| malformed("speaker_id"))?,
            text: &word.text,
            start: word.start.ok_or_else(|| malformed("start time"))?,
            end: word.end.ok_or_else(|| malformed("end time"))?,
        })
    }
}

impl TurnBuffer {
    fn new(word: &SpokenWord) -> Self {
        Self {
            speaker_id: word.speaker_id.to_string(),
            text: word.text.to_string(),
            start: word.start,
            end: word.end,
        }
    }

    fn extend(&mut self, word: &SpokenWord) {
        self.text.push(' ');
        self.text.push_str(word.text);
        self.end = word.end;
    }

    fn flush(self, index: usize) -> Cue {
        Cue {
            index,
            start: self.start,
            end: self.end,
            speaker_id: self.speaker_id,
            text: self.text,
        }
    }
}

/// Group word records into cues by speaker continuity
///
/// Only `type == word` records with non-blank text count, and each of those
/// must carry a speaker and timing. Consecutive words from the same speaker
/// become one cue spanning the first word's start to the last word's end.
/// Input order is trusted; nothing is re-sorted.
pub fn segment_words<'a, I>(words: I, source: &Path) -> Result<Vec<Cue>>
where
    I: IntoIterator<Item = &'a WordRecord>,
{
    let mut cues = Vec::new();
    let mut buffer: Option<TurnBuffer> = None;

    for record in words.into_iter().filter(|w| w.is_spoken()) {
        let word = SpokenWord::from_record(record, source)?;

        buffer = Some(match buffer.take() {
            Some(mut turn) if turn.speaker_id == word.speaker_id => {
                turn.extend(&word);
                turn
            }
            Some(turn) => {
                cues.push(turn.flush(cues.len() + 1));
                TurnBuffer::new(&word)
            }
            None => TurnBuffer::new(&word),
        });
    }

    match buffer {
        Some(turn) => {
            cues.push(turn.flush(cues.len() + 1));
            Ok(cues)
        }
        None => Err(ConvertError::NoSpeechContent {
            path: source.to_path_buf(),
        }),
    }
}

/// Segment a whole transcript record
pub fn segment_record(record: &TranscriptRecord, source: &Path) -> Result<Vec<Cue>> {
    segment_words(record.words.records(), source)
}

/// Execute Stage 1: segment a record and write `<stem>.srt` into `output_dir`
///
/// Nothing is written when segmentation fails.
pub fn execute_segment(record: &TranscriptRecord, source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let cues = segment_record(record, source)?;
    debug!("{} cues from {:?}", cues.len(), source);

    let srt_path = derived_path(source, output_dir, "srt");
    write_text(&render_srt(&cues), &srt_path)?;
    info!("SRT created: {:?}", srt_path);
    Ok(srt_path)
}

/// Outcome of converting every fragment in a directory independently
#[derive(Debug, Default)]
pub struct BatchReport {
    /// SRT files written
    pub converted: Vec<PathBuf>,
    /// Fragments that failed, with a readable reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Convert each fragment in `input_dir` to its own SRT file
///
/// Directory problems abort the batch. Errors in a single fragment are logged
/// and recorded, and the remaining fragments are still processed.
pub fn execute_segment_batch(input_dir: &Path, merged_prefix: &str, srt_dir_name: &str) -> Result<BatchReport> {
    let sources = discover_fragments(input_dir, merged_prefix)?;
    if sources.is_empty() {
        return Err(ConvertError::NoInputFiles {
            path: input_dir.to_path_buf(),
        });
    }

    let output_dir = ensure_output_dir(input_dir, srt_dir_name)?;
    let mut report = BatchReport::default();

    for source in sources {
        let result = load_record(&source).and_then(|record| execute_segment(&record, &source, &output_dir));
        match result {
            Ok(srt_path) => report.converted.push(srt_path),
            Err(e) => {
                error!("Error processing {:?}: {}", source, e);
                report.failed.push((source, e.to_string()));
            }
        }
    }

    info!(
        "Batch complete: {} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );
    Ok(report)
}
