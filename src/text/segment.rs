//! Sentence segmentation for progressive reveals.
//!
//! A fragment is a run of ordinary characters closed by one or more terminators (`.`, `!`, `?`
//! or a paragraph break) plus any whitespace that follows them. Paragraph breaks are two line
//! endings in a row, in any of the LF, CRLF or CR conventions.
//!
//! Segmentation is a partition: the fragments, concatenated in order, are byte-for-byte the
//! input. Trailing text without a terminator becomes the last fragment, and text with no
//! terminators at all comes back as a single fragment.

/// Split `text` into reveal fragments.
///
/// Never returns an empty vector: empty input yields `[""]`.
///
/// ```
/// assert_eq!(pocketpals::segment("A. B! C"), vec!["A. ", "B! ", "C"]);
/// ```
pub fn segment(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    let mut has_content = false;

    while i < bytes.len() {
        let t = terminator_len(bytes, i);
        if t == 0 {
            has_content = true;
            i += 1;
            continue;
        }
        // A terminator only closes a fragment that already holds something; leading
        // terminators stay in the fragment they open.
        if !has_content {
            i += t;
            continue;
        }

        let mut end = i + t;
        loop {
            let t = terminator_len(bytes, end);
            if t == 0 {
                break;
            }
            end += t;
        }
        while end < bytes.len() && bytes[end].is_ascii_whitespace() {
            end += 1;
        }

        out.push(&text[start..end]);
        start = end;
        i = end;
        has_content = false;
    }

    if start < bytes.len() {
        out.push(&text[start..]);
    }
    if out.is_empty() {
        out.push(text);
    }
    out
}

/// Length in bytes of the terminator starting at `i`, or 0 if there is none.
///
/// All terminators are ASCII, so any returned boundary is a valid `str` boundary.
fn terminator_len(bytes: &[u8], i: usize) -> usize {
    let rest = &bytes[i.min(bytes.len())..];
    match rest {
        [b'.' | b'!' | b'?', ..] => 1,
        [b'\r', b'\n', b'\r', b'\n', ..] => 4,
        [b'\n', b'\n', ..] | [b'\r', b'\r', ..] => 2,
        _ => 0,
    }
}

/// Rewrite CRLF and lone CR line endings as LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
