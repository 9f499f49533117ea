pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use error::{ConvertError, Result};
pub use io::{discover_fragments, load_record, parse_record, validate_directory};
pub use models::{Cue, DialogueBlock, TranscriptRecord, WordRecord, format_time, render_srt};
pub use pipeline::{PipelineConfig, PipelineReport, convert_subtitles, run_pipeline};
pub use stages::{
    BatchReport, MergeResult, RenderConfig, ScriptFont, execute_dialogue, execute_merge,
    execute_render, execute_segment, execute_segment_batch, extract_dialogues, merge_records,
    segment_words,
};
