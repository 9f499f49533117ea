use std::io::{Seek, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use docx_rs::{
    Docx, Paragraph, Run, RunFonts, Table, TableCell, TableLayoutType, TableRow, WidthType,
};
use tracing::info;

use crate::error::{ConvertError, Result};
use crate::models::DialogueBlock;

/// Twentieths of a point per inch
const TWIPS_PER_INCH: f64 = 1440.0;

/// Alternate font family used when text contains characters of one script
#[derive(Debug, Clone)]
pub struct ScriptFont {
    /// Font family name
    pub family: String,
    /// Unicode range that triggers the alternate font
    pub range: RangeInclusive<char>,
}

impl ScriptFont {
    /// Tamil block, rendered with Arial Unicode MS
    pub fn tamil() -> Self {
        Self {
            family: "Arial Unicode MS".to_string(),
            range: '\u{0B80}'..='\u{0BFF}',
        }
    }

    /// Whether any character of `text` falls in this script's range
    pub fn matches(&self, text: &str) -> bool {
        text.chars().any(|c| self.range.contains(&c))
    }
}

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Width of the speaker column in inches
    pub speaker_column_inches: f64,
    /// Width of the dialogue column in inches
    pub dialogue_column_inches: f64,
    /// Font size in points
    pub font_size_pt: usize,
    /// Script-specific font override for dialogue text
    pub alternate_font: Option<ScriptFont>,
    /// Paragraph written when there is no dialogue at all
    pub placeholder: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            speaker_column_inches: 1.5,
            dialogue_column_inches: 5.5,
            font_size_pt: 11,
            alternate_font: Some(ScriptFont::tamil()),
            placeholder: "No speaker-tagged dialogue found.".to_string(),
        }
    }
}

fn twips(inches: f64) -> usize {
    (inches * TWIPS_PER_INCH) as usize
}

/// One borderless two-column row: bold speaker label, dialogue text
fn dialogue_table(block: &DialogueBlock, config: &RenderConfig) -> Table {
    let half_points = config.font_size_pt * 2;
    let speaker_width = twips(config.speaker_column_inches);
    let dialogue_width = twips(config.dialogue_column_inches);

    let speaker_run = Run::new().add_text(&block.speaker).bold().size(half_points);

    let mut dialogue_run = Run::new().add_text(&block.text).size(half_points);
    if let Some(font) = config.alternate_font.as_ref().filter(|f| f.matches(&block.text)) {
        dialogue_run = dialogue_run.fonts(
            RunFonts::new()
                .ascii(&font.family)
                .hi_ansi(&font.family)
                .east_asia(&font.family)
                .cs(&font.family),
        );
    }

    let row = TableRow::new(vec![
        TableCell::new()
            .add_paragraph(Paragraph::new().add_run(speaker_run))
            .width(speaker_width, WidthType::Dxa),
        TableCell::new()
            .add_paragraph(Paragraph::new().add_run(dialogue_run))
            .width(dialogue_width, WidthType::Dxa),
    ]);

    Table::new(vec![row])
        .set_grid(vec![speaker_width, dialogue_width])
        .layout(TableLayoutType::Fixed)
        .clear_all_border()
}

/// Build the dialogue document in memory
pub fn build_document(blocks: &[DialogueBlock], config: &RenderConfig) -> Docx {
    if blocks.is_empty() {
        return Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(&config.placeholder)));
    }

    blocks
        .iter()
        .fold(Docx::new(), |doc, block| doc.add_table(dialogue_table(block, config)))
}

/// Serialize the dialogue document into any seekable writer
pub fn write_document<W: Write + Seek>(blocks: &[DialogueBlock], config: &RenderConfig, writer: W) -> Result<()> {
    build_document(blocks, config)
        .build()
        .pack(writer)
        .map_err(|e| ConvertError::Document {
            message: e.to_string(),
        })
}

/// Execute Stage 3: render dialogue blocks to a `.docx` file
pub fn execute_render(blocks: &[DialogueBlock], output: &Path, config: &RenderConfig) -> Result<()> {
    let file = std::fs::File::create(output)?;
    write_document(blocks, config, file)?;
    info!("Document with {} dialogue blocks written to {:?}", blocks.len(), output);
    Ok(())
}
