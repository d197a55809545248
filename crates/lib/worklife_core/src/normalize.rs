//! Response normalizer — turns raw model text into an Analysis Record mapping.
//!
//! Attempts run in order and the first success wins:
//!
//! 1. strict parse of the whole text (must be a JSON object)
//! 2. extraction of the first complete top-level `{...}` object
//! 3. the fixed fallback record
//!
//! Extraction scans for balanced braces instead of taking the span from the
//! first `{` to the last `}`. Any object that span would recover is found by
//! the scan from the same `{`, and prose or a second object after the first
//! one no longer breaks parsing.
//!
//! Normalization never fails: every input yields a mapping.

use serde_json::{Map, Value};
use tracing::trace;

use crate::analysis::{check_shape, fallback_map};

/// Which attempt produced the normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSource {
    Strict,
    Extracted,
    Fallback,
}

impl ParseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseSource::Strict => "strict",
            ParseSource::Extracted => "extracted",
            ParseSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ParseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How parsed objects are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Any parsed JSON object is returned untouched.
    #[default]
    PassThrough,
    /// Parsed objects must also have the Analysis Record shape.
    Strict,
}

/// A normalized record plus the attempt that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: Map<String, Value>,
    pub source: ParseSource,
}

/// Normalize in pass-through mode, returning only the mapping.
pub fn normalize(raw: &str) -> Map<String, Value> {
    normalize_detailed(raw, NormalizeMode::PassThrough).record
}

/// Normalize raw model text, reporting which attempt succeeded.
pub fn normalize_detailed(raw: &str, mode: NormalizeMode) -> Normalized {
    if let Some(record) = parse_object(raw).filter(|map| acceptable(map, mode)) {
        return Normalized {
            record,
            source: ParseSource::Strict,
        };
    }

    if let Some(record) = extract_object(raw, mode) {
        return Normalized {
            record,
            source: ParseSource::Extracted,
        };
    }

    Normalized {
        record: fallback_map(),
        source: ParseSource::Fallback,
    }
}

fn acceptable(map: &Map<String, Value>, mode: NormalizeMode) -> bool {
    match mode {
        NormalizeMode::PassThrough => true,
        NormalizeMode::Strict => match check_shape(map) {
            Ok(_) => true,
            Err(e) => {
                trace!(error = %e, "rejecting parsed object in strict mode");
                false
            }
        },
    }
}

/// Parse text as JSON, keeping it only if it is an object.
fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Find the first complete object that parses, by opening position.
fn extract_object(text: &str, mode: NormalizeMode) -> Option<Map<String, Value>> {
    object_spans(text.as_bytes())
        .into_iter()
        .filter_map(|(start, end)| parse_object(&text[start..=end]))
        .find(|map| acceptable(map, mode))
}

/// Every balanced `{...}` pair as `(open, close)`, sorted by `open`.
///
/// One pass with a stack of open positions. String and escape state is only
/// tracked inside braces, so quotes in surrounding prose are ignored. Only
/// ASCII delimiters are inspected, so indices fall on UTF-8 boundaries.
fn object_spans(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(idx),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, idx));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}
