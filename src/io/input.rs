use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::models::TranscriptRecord;

/// Check that the operator-supplied path is an existing directory
pub fn validate_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConvertError::InvalidDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// List files in `dir` whose extension matches `extension` (case-insensitive),
/// natural-sorted by file name. Names starting with any of `exclude_prefixes`
/// are skipped.
pub fn discover_files(dir: &Path, extension: &str, exclude_prefixes: &[&str]) -> Result<Vec<PathBuf>> {
    validate_directory(dir)?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches_ext {
            continue;
        }
        if exclude_prefixes.iter().any(|prefix| name.starts_with(prefix)) {
            debug!("Skipping previously generated file {:?}", path);
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| natural_cmp(a, b));
    Ok(files)
}

/// Find transcript fragments (`*.json`), skipping merged outputs
pub fn discover_fragments(dir: &Path, merged_prefix: &str) -> Result<Vec<PathBuf>> {
    discover_files(dir, "json", &[merged_prefix])
}

/// Order paths by file name so that `part2` sorts before `part10`
pub fn natural_cmp(a: &Path, b: &Path) -> Ordering {
    let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    natord::compare(&name(a), &name(b))
}

/// Load one transcript fragment
pub fn load_record(path: &Path) -> Result<TranscriptRecord> {
    let content = std::fs::read_to_string(path)?;
    parse_record(&content, path)
}

/// Parse a transcript fragment; `path` is used for error reporting only
pub fn parse_record(json: &str, path: &Path) -> Result<TranscriptRecord> {
    serde_json::from_str(json).map_err(|e| ConvertError::MalformedInput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
