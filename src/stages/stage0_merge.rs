use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::io::{discover_fragments, load_record, write_record};
use crate::models::{TextField, TranscriptRecord, WordsField};

/// Result of Stage 0 merging
#[derive(Debug)]
pub struct MergeResult {
    /// The unified record
    pub record: TranscriptRecord,
    /// Source fragments in merge order
    pub sources: Vec<PathBuf>,
    /// Where the unified record was written
    pub output_path: PathBuf,
}

impl TranscriptRecord {
    /// Promote `text` and `words` to their list forms
    pub fn normalize(&mut self) {
        let text = std::mem::replace(&mut self.text, TextField::Many(Vec::new()));
        self.text = TextField::Many(text.into_many());

        let words = std::mem::replace(&mut self.words, WordsField::Many(Vec::new()));
        self.words = WordsField::Many(words.into_many());
    }

    /// Append another fragment's `text` and `words`. Other keys of `other`
    /// are ignored.
    pub fn append(&mut self, other: TranscriptRecord) {
        self.normalize();
        if let TextField::Many(texts) = &mut self.text {
            texts.extend(other.text.into_many());
        }
        if let WordsField::Many(words) = &mut self.words {
            words.extend(other.words.into_many());
        }
    }
}

/// Merge fragments in order; the first one is the base record.
///
/// Returns `None` when there is nothing to merge.
pub fn merge_records<I>(records: I) -> Option<TranscriptRecord>
where
    I: IntoIterator<Item = TranscriptRecord>,
{
    let mut records = records.into_iter();
    let mut merged = records.next()?;
    merged.normalize();
    for record in records {
        merged.append(record);
    }
    Some(merged)
}

/// Name of the merged output for a given first fragment
pub fn merged_output_path(first: &Path, merged_prefix: &str) -> PathBuf {
    let name = first
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    first.with_file_name(format!("{}{}", merged_prefix, name))
}

/// Execute Stage 0: merge every fragment in `input_dir` into one record
///
/// Fragments are natural-sorted by name. Earlier merge outputs (names starting
/// with `merged_prefix`) are never read back in, so repeated runs produce the
/// same file instead of accumulating duplicates.
pub fn execute_merge(input_dir: &Path, merged_prefix: &str) -> Result<MergeResult> {
    let sources = discover_fragments(input_dir, merged_prefix)?;
    let Some(first) = sources.first() else {
        return Err(ConvertError::NoInputFiles {
            path: input_dir.to_path_buf(),
        });
    };
    let output_path = merged_output_path(first, merged_prefix);

    info!("Merging {} transcript fragments", sources.len());
    let mut records = Vec::with_capacity(sources.len());
    for path in &sources {
        debug!("Loading fragment {:?}", path);
        records.push(load_record(path)?);
    }

    let record = merge_records(records).ok_or_else(|| ConvertError::NoInputFiles {
        path: input_dir.to_path_buf(),
    })?;
    write_record(&record, &output_path)?;
    info!("Merged transcript written to {:?}", output_path);

    Ok(MergeResult {
        record,
        sources,
        output_path,
    })
}
