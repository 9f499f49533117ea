use std::path::Path;

use transcript_convert::{ConvertError, PipelineConfig, extract_dialogues, run_pipeline};

fn write_fragment(dir: &Path, name: &str, json: &str) {
    std::fs::write(dir.join(name), json).unwrap();
}

#[test]
fn test_full_pipeline_over_chunked_fragments() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(
        dir.path(),
        "call_part2.json",
        r#"{"text": "are you", "words": [
            {"text": "are", "start": 3.0, "end": 3.2, "type": "word", "speaker_id": "speaker_1"},
            {"text": " ", "start": 3.2, "end": 3.3, "type": "spacing", "speaker_id": "speaker_1"},
            {"text": "you", "start": 3.3, "end": 3.6, "type": "word", "speaker_id": "speaker_1"}
        ]}"#,
    );
    write_fragment(
        dir.path(),
        "call_part10.json",
        r#"{"text": "fine", "words": [
            {"text": "fine", "start": 5.0, "end": 5.5, "type": "word", "speaker_id": "speaker_0"}
        ]}"#,
    );
    write_fragment(
        dir.path(),
        "call_part1.json",
        r#"{"language_code": "eng", "text": "hello there how", "words": [
            {"text": "hello", "start": 0.0, "end": 0.5, "type": "word", "speaker_id": "speaker_0"},
            {"text": "there", "start": 0.6, "end": 1.0, "type": "word", "speaker_id": "speaker_0"},
            {"text": "how", "start": 2.5, "end": 2.9, "type": "word", "speaker_id": "speaker_1"}
        ]}"#,
    );

    let config = PipelineConfig::default();
    let report = run_pipeline(dir.path(), &config).unwrap();

    assert_eq!(report.merged_path, dir.path().join("Merged_call_part1.json"));
    assert_eq!(
        report.srt_path,
        dir.path().join("Output srt").join("Merged_call_part1.srt")
    );
    assert_eq!(
        report.docx_path,
        dir.path()
            .join("Srt to docx output")
            .join("Merged_call_part1.docx")
    );
    assert!(report.docx_path.exists());
    assert_eq!(report.dialogue_blocks, 3);

    let srt = std::fs::read_to_string(&report.srt_path).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,000\n[speaker_0] hello there\n\n\
         2\n00:00:02,500 --> 00:00:03,600\n[speaker_1] how are you\n\n\
         3\n00:00:05,000 --> 00:00:05,500\n[speaker_0] fine\n\n"
    );

    let dialogue = extract_dialogues(&srt);
    assert_eq!(dialogue[1].speaker, "speaker_1");
    assert_eq!(dialogue[1].text, "how are you");

    // A second run reads the same fragments and rewrites the same outputs
    let merged_before = std::fs::read(&report.merged_path).unwrap();
    let again = run_pipeline(dir.path(), &config).unwrap();
    assert_eq!(again.sources.len(), 3);
    assert_eq!(std::fs::read(&again.merged_path).unwrap(), merged_before);
    assert_eq!(std::fs::read_to_string(&again.srt_path).unwrap(), srt);
}

#[test]
fn test_empty_directory_creates_no_outputs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), "nothing here").unwrap();

    let err = run_pipeline(dir.path(), &PipelineConfig::default()).unwrap_err();

    assert!(matches!(err, ConvertError::NoInputFiles { .. }));
    assert!(!dir.path().join("Output srt").exists());
    assert!(!dir.path().join("Srt to docx output").exists());
}

#[test]
fn test_invalid_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = run_pipeline(&missing, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidDirectory { .. }));
}

#[test]
fn test_transcript_without_words_writes_no_srt() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(
        dir.path(),
        "silence.json",
        r#"{"text": "", "words": [
            {"text": "(music)", "start": 0.0, "end": 4.0, "type": "audio_event"}
        ]}"#,
    );

    let err = run_pipeline(dir.path(), &PipelineConfig::default()).unwrap_err();

    assert!(matches!(err, ConvertError::NoSpeechContent { .. }));
    assert!(!dir.path().join("Output srt").join("Merged_silence.srt").exists());
    assert!(!dir.path().join("Srt to docx output").exists());
}
