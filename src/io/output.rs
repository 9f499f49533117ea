use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::TranscriptRecord;

/// Write a transcript record as pretty-printed UTF-8 JSON
pub fn write_record(record: &TranscriptRecord, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    debug!("Wrote transcript record to {:?}", path);
    Ok(())
}

/// Write text content to a file
pub fn write_text(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write!(file, "{}", content)?;
    Ok(())
}

/// Create `parent/name` if needed and return its path
pub fn ensure_output_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    let dir = parent.join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path of `source` moved into `dir` with its extension replaced
pub fn derived_path(source: &Path, dir: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{}.{}", stem, extension))
}
