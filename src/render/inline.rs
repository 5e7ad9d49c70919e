//! Inline markup lexer for paragraph text
//!
//! Recognizes `**bold**` and `` `code` `` spans in one left-to-right scan.
//! At every position a bold span is tried before a code span, and the
//! closing marker is the nearest one on the same line. Spans never nest or
//! overlap; an opening marker that does not close stays in the plain text.

use serde::Serialize;

const BOLD_MARKER: &[char] = &['*', '*'];
const CODE_MARKER: &[char] = &['`'];

/// A run of paragraph text with a single style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Run {
    Plain(String),
    Bold(String),
    Code(String),
}

impl Run {
    /// Text of the run with markers removed
    pub fn text(&self) -> &str {
        match self {
            Run::Plain(text) | Run::Bold(text) | Run::Code(text) => text,
        }
    }
}

/// Split paragraph text into styled runs
///
/// Adjacent plain text is merged into a single run, so the output never
/// holds two `Plain` runs in a row.
pub fn tokenize(text: &str) -> Vec<Run> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < chars.len() {
        if let Some((inner, next)) = match_span(&chars, pos, BOLD_MARKER) {
            flush_plain(&mut runs, &mut plain);
            runs.push(Run::Bold(inner));
            pos = next;
        } else if let Some((inner, next)) = match_span(&chars, pos, CODE_MARKER) {
            flush_plain(&mut runs, &mut plain);
            runs.push(Run::Code(inner));
            pos = next;
        } else {
            plain.push(chars[pos]);
            pos += 1;
        }
    }

    flush_plain(&mut runs, &mut plain);
    runs
}

/// Match `marker inner marker` at `start`
///
/// Returns the inner text and the index just past the closing marker.
fn match_span(chars: &[char], start: usize, marker: &[char]) -> Option<(String, usize)> {
    if !chars[start..].starts_with(marker) {
        return None;
    }

    let body_start = start + marker.len();
    let mut cursor = body_start;
    while cursor + marker.len() <= chars.len() {
        if chars[cursor] == '\n' {
            return None;
        }
        if chars[cursor..].starts_with(marker) {
            let inner = chars[body_start..cursor].iter().collect();
            return Some((inner, cursor + marker.len()));
        }
        cursor += 1;
    }
    None
}

fn flush_plain(runs: &mut Vec<Run>, plain: &mut String) {
    if !plain.is_empty() {
        runs.push(Run::Plain(std::mem::take(plain)));
    }
}
