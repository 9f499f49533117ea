use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::DialogueBlock;

/// Dialogue collected for the speaker currently holding the floor
#[derive(Debug, Default)]
struct DialogueBuffer {
    speaker: Option<String>,
    parts: Vec<String>,
}

impl DialogueBuffer {
    fn push(&mut self, text: &str) {
        if !text.is_empty() {
            self.parts.push(text.to_string());
        }
    }

    /// Move buffered text into `blocks`. A block for the same speaker as the
    /// previous one is folded into it so speakers always alternate.
    fn flush(&mut self, blocks: &mut Vec<DialogueBlock>) {
        if self.parts.is_empty() {
            return;
        }
        let Some(speaker) = self.speaker.clone() else {
            return;
        };
        let text = self.parts.join(" ");
        self.parts.clear();

        match blocks.last_mut() {
            Some(last) if last.speaker == speaker => {
                last.text.push(' ');
                last.text.push_str(&text);
            }
            _ => blocks.push(DialogueBlock { speaker, text }),
        }
    }
}

/// Split a `[speaker] text` line into its tag and trailing text
fn split_speaker_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let close = rest.find(']')?;
    Some((rest[..close].trim(), rest[close + 1..].trim()))
}

fn is_index_marker(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
}

/// Parse SRT text into speaker dialogue blocks
///
/// Index lines and time ranges are skipped. A `[speaker]` prefix starts a new
/// block when the speaker changes; untagged lines continue the current block.
pub fn extract_dialogues(srt: &str) -> Vec<DialogueBlock> {
    let mut blocks = Vec::new();
    let mut buffer = DialogueBuffer::default();

    for line in srt.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_index_marker(line) || line.contains("-->") {
            continue;
        }

        if let Some((speaker, text)) = split_speaker_tag(line) {
            // An empty `[]` tag leaves nobody holding the floor
            let speaker = (!speaker.is_empty()).then_some(speaker);
            if buffer.speaker.as_deref() != speaker {
                buffer.flush(&mut blocks);
                buffer.speaker = speaker.map(str::to_string);
            }
            if buffer.speaker.is_some() {
                buffer.push(text);
            }
        } else if buffer.speaker.is_some() {
            buffer.push(line);
        }
    }

    buffer.flush(&mut blocks);
    blocks
}

/// Execute Stage 2: read an SRT file and extract its dialogue blocks
pub fn execute_dialogue(srt_path: &Path) -> Result<Vec<DialogueBlock>> {
    let content = std::fs::read_to_string(srt_path)?;
    let blocks = extract_dialogues(&content);
    debug!("{} dialogue blocks from {:?}", blocks.len(), srt_path);
    Ok(blocks)
}
