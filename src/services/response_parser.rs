//! Pulls a JSON object out of free-form model output.
//!
//! Models wrap JSON in prose, in fenced code blocks, or emit several
//! brace-delimited spans. Fenced blocks are searched first; then every `{` is
//! tried in order and its balanced span (string and escape aware) is parsed.
//! The first span that parses as an object wins and malformed spans are
//! skipped.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn fenced_block() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("valid regex"))
}

pub fn extract_json_object(text: &str) -> Option<Value> {
    for captures in fenced_block().captures_iter(text) {
        if let Some(found) = captures.get(1).and_then(|body| scan_objects(body.as_str())) {
            return Some(found);
        }
    }

    scan_objects(text)
}

fn scan_objects(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();

    for (start, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'{') {
        let Some(end) = balanced_end(bytes, start) else {
            continue;
        };

        match serde_json::from_str::<Value>(&text[start..=end]) {
            Ok(value) if value.is_object() => return Some(value),
            _ => continue,
        }
    }

    None
}

/// Index of the `}` closing the `{` at `start`, if the span is balanced.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}
