//! Pure string helpers shared by the view synchronizer and the edit engine.
//!
//! Word text arrives from the editable surface carrying separator spaces,
//! non-breaking-space placeholders, and sanitizer entity artifacts. Everything
//! here is side-effect free; normalization policy lives at the model boundary
//! (extraction), not in the view.

use std::borrow::Cow;

/// Collapse whitespace runs (non-breaking space included) to a single ASCII
/// space. `trim_leading` trims both ends; otherwise only the trailing end is
/// trimmed; both call sites exist: merges want fully trimmed words, caret
/// end-of-text checks must keep a leading separator countable.
pub fn normalize(text: &str, trim_leading: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            if !out.is_empty() || !trim_leading {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }

    out
}

const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&nbsp;", '\u{a0}'),
];

/// Decode the fixed entity table the host sanitizer can leave behind.
///
/// Borrows when no `&` is present, so the common clean path allocates
/// nothing. Unrecognized `&…` sequences pass through verbatim.
pub fn unescape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        for (entity, ch) in ENTITIES {
            if rest.starts_with(entity) {
                out.push(ch);
                rest = &rest[entity.len()..];
                continue 'scan;
            }
        }

        out.push('&');
        rest = &rest[1..];
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Split `text` into the prefix `[0, offset)` and suffix `[offset, end)`.
///
/// `offset` counts characters, matching caret offsets. Callers guarantee
/// `offset <= char_len(text)`.
pub fn split_at(text: &str, offset: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(byte)
}

/// Character count of `text`, the unit caret offsets are expressed in.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split freely-typed text back into discrete words: runs of internal
/// whitespace are boundaries, zero-length tokens are discarded.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Clock-style label for a segment timestamp: `MM:SS`, or `H:MM:SS` past
/// one hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}
