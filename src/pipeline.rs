use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{ConvertError, Result};
use crate::io::{derived_path, discover_files, ensure_output_dir, validate_directory};
use crate::stages::{
    RenderConfig, execute_dialogue, execute_merge, execute_render, execute_segment,
};

/// Configuration for a full conversion run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// File name prefix of the merged transcript
    pub merged_prefix: String,
    /// Subdirectory of the input directory receiving SRT files
    pub srt_dir_name: String,
    /// Subdirectory of the input directory receiving documents
    pub docx_dir_name: String,
    /// Document rendering options
    pub render: RenderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merged_prefix: "Merged_".to_string(),
            srt_dir_name: "Output srt".to_string(),
            docx_dir_name: "Srt to docx output".to_string(),
            render: RenderConfig::default(),
        }
    }
}

/// Artifacts produced by a full run
#[derive(Debug)]
pub struct PipelineReport {
    /// Fragments merged, in order
    pub sources: Vec<PathBuf>,
    /// Merged transcript
    pub merged_path: PathBuf,
    /// Subtitle file
    pub srt_path: PathBuf,
    /// Rendered document
    pub docx_path: PathBuf,
    /// Number of dialogue blocks in the document
    pub dialogue_blocks: usize,
}

/// Merge all fragments in `input_dir`, then produce the SRT and the document
///
/// Output directories are only created once a merge has succeeded, so an
/// empty or malformed input leaves the directory untouched.
pub fn run_pipeline(input_dir: &Path, config: &PipelineConfig) -> Result<PipelineReport> {
    validate_directory(input_dir)?;

    info!("Stage 0: Merging fragments in {:?}", input_dir);
    let merged = execute_merge(input_dir, &config.merged_prefix)?;

    info!("Stage 1: Segmenting speaker turns...");
    let srt_dir = ensure_output_dir(input_dir, &config.srt_dir_name)?;
    let srt_path = execute_segment(&merged.record, &merged.output_path, &srt_dir)?;

    info!("Stage 2: Extracting dialogue...");
    let blocks = execute_dialogue(&srt_path)?;

    info!("Stage 3: Rendering document...");
    let docx_dir = ensure_output_dir(input_dir, &config.docx_dir_name)?;
    let docx_path = derived_path(&srt_path, &docx_dir, "docx");
    execute_render(&blocks, &docx_path, &config.render)?;

    Ok(PipelineReport {
        sources: merged.sources,
        merged_path: merged.output_path,
        srt_path,
        docx_path,
        dialogue_blocks: blocks.len(),
    })
}

/// Render documents for one `.srt` file or every `.srt` file in a directory
///
/// Documents go into `docx_dir_name` next to the subtitle files. A file that
/// fails is logged and skipped; the returned list holds the documents written.
pub fn convert_subtitles(input: &Path, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let (srt_files, base_dir) = if input.is_file() {
        let parent = input.parent().unwrap_or(Path::new(".")).to_path_buf();
        (vec![input.to_path_buf()], parent)
    } else {
        validate_directory(input)?;
        (discover_files(input, "srt", &[])?, input.to_path_buf())
    };

    if srt_files.is_empty() {
        return Err(ConvertError::NoInputFiles {
            path: input.to_path_buf(),
        });
    }

    let docx_dir = ensure_output_dir(&base_dir, &config.docx_dir_name)?;
    let mut written = Vec::new();
    for srt_path in srt_files {
        let docx_path = derived_path(&srt_path, &docx_dir, "docx");
        let result = execute_dialogue(&srt_path)
            .and_then(|blocks| execute_render(&blocks, &docx_path, &config.render));
        match result {
            Ok(()) => written.push(docx_path),
            Err(e) => error!("Error processing {:?}: {}", srt_path, e),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.merged_prefix, "Merged_");
        assert_eq!(config.srt_dir_name, "Output srt");
        assert_eq!(config.docx_dir_name, "Srt to docx output");
    }

    #[test]
    fn test_convert_single_subtitle_file() {
        let dir = tempfile::tempdir().unwrap();
        let srt = dir.path().join("talk.srt");
        std::fs::write(&srt, "1\n00:00:00,000 --> 00:00:01,000\n[A] hi\n\n").unwrap();

        let written = convert_subtitles(&srt, &PipelineConfig::default()).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("Srt to docx output").join("talk.docx")]
        );
        assert!(written[0].exists());
    }

    #[test]
    fn test_convert_subtitles_requires_srt_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_subtitles(dir.path(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, ConvertError::NoInputFiles { .. }));
    }
}
