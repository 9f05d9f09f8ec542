use serde::Serialize;

/// One frame of a progressive text reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevealState {
    /// Frame index in `0..=fragment_count`; also the number of fragments shown.
    pub frame: usize,
    /// Concatenation of the first `frame` fragments.
    pub text: String,
    /// `true` only on the last frame, where the "fully revealed" indicator turns on.
    pub is_final: bool,
}

impl RevealState {
    /// Two-digit, zero-padded frame label for file names.
    pub fn label(&self) -> String {
        frame_label(self.frame)
    }
}

/// Build the `fragments.len() + 1` cumulative reveal states, starting from the empty frame.
pub fn sequence<S: AsRef<str>>(fragments: &[S]) -> Vec<RevealState> {
    let mut out = Vec::with_capacity(fragments.len() + 1);
    let mut text = String::new();

    out.push(RevealState {
        frame: 0,
        text: String::new(),
        is_final: fragments.is_empty(),
    });
    for (i, fragment) in fragments.iter().enumerate() {
        text.push_str(fragment.as_ref());
        out.push(RevealState {
            frame: i + 1,
            text: text.clone(),
            is_final: i + 1 == fragments.len(),
        });
    }

    out
}

/// Zero-padded two-digit label (`3` -> `"03"`). Indexes above 99 keep all their digits.
pub fn frame_label(frame: usize) -> String {
    format!("{frame:02}")
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/sequence.rs"]
mod tests;
