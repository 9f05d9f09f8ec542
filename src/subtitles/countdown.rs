use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{error::PocketResult, fs::ensure_parent_dir};

/// Seconds the closing `00:00` cue stays up.
pub const FINAL_CUE_SECS: u64 = 60;

/// SubRip countdown for `minutes` minutes: one cue per second showing the time left as
/// `MM:SS`, then a `00:00` cue that lasts a minute.
///
/// ```
/// let srt = pocketpals::countdown_srt(1);
/// assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,000\n01:00\n\n"));
/// ```
pub fn countdown_srt(minutes: u32) -> String {
    let total = u64::from(minutes) * 60;
    let mut out = String::new();

    for i in 0..total {
        let left = total - i;
        push_cue(
            &mut out,
            i + 1,
            i,
            i + 1,
            &format!("{:02}:{:02}", left / 60, left % 60),
        );
    }
    push_cue(&mut out, total + 1, total, total + FINAL_CUE_SECS, "00:00");
    out
}

/// Write `srt` to `path`, creating parent directories as needed.
pub fn write_srt(path: &Path, srt: &str) -> PocketResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, srt).with_context(|| format!("write subtitles '{}'", path.display()))?;
    Ok(())
}

fn push_cue(out: &mut String, seq: u64, start: u64, end: u64, text: &str) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "{seq}\n{} --> {}\n{text}\n\n",
        timestamp(start),
        timestamp(end)
    );
}

/// `HH:MM:SS,000` for a whole number of seconds.
pub fn timestamp(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02},000",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    )
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/countdown.rs"]
mod tests;
