/// A timestamped subtitle entry for one speaker turn
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// 1-based, contiguous position in the cue list
    pub index: usize,
    /// Start timestamp in seconds (first word)
    pub start: f64,
    /// End timestamp in seconds (last word)
    pub end: f64,
    /// Speaker identifier
    pub speaker_id: String,
    /// Words of the turn joined by single spaces
    pub text: String,
}

impl Cue {
    /// Render as an SRT block: index, time range, `[speaker] text`, blank line
    pub fn to_srt_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n[{}] {}\n\n",
            self.index,
            format_time(self.start),
            format_time(self.end),
            self.speaker_id,
            self.text
        )
    }
}

/// Render a cue list as a complete SRT document
pub fn render_srt(cues: &[Cue]) -> String {
    cues.iter().map(Cue::to_srt_block).collect()
}

/// One speaker's consolidated dialogue, the unit of document rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueBlock {
    pub speaker: String,
    pub text: String,
}

/// Format seconds as HH:MM:SS,mmm
///
/// Milliseconds are the first three fractional digits of the shortest decimal
/// form of `seconds`, so `3661.234` gives `,234` and `1.9999999995` gives
/// `,999`. Hours are not wrapped at 24. Values that are negative or not finite
/// format as zero.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00:00,000".to_string();
    }

    let whole = seconds.trunc() as u64;
    let repr = seconds.to_string();
    let millis = repr
        .split_once('.')
        .map(|(_, fraction)| {
            fraction
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(3)
                .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'))
        })
        .unwrap_or(0);

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
