//! JSON recovery from model output
//!
//! Models are instructed to return a bare JSON object and regularly return
//! something else: fenced markdown blocks, leading prose, trailing commas.
//! Recovery applies four stages in order until one yields a JSON object:
//!
//! 1. Parse the contents of a fenced ```json code block
//! 2. Parse the entire response as-is
//! 3. Parse the greedy first-`{`-to-last-`}` substring
//! 4. Apply a best-effort cleanup pass to that substring and parse once more
//!
//! The cleanup pass is a last resort: collapsing whitespace can mangle
//! whitespace inside string values, which is acceptable only when the
//! alternative is losing the record entirely.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());
static BRACE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());
static TRAILING_COMMA_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());
static TRAILING_COMMA_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_AFTER_STRUCTURAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\{\[,:])\s+").unwrap());
static SPACE_BEFORE_STRUCTURAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([\}\],:])").unwrap());

/// Recover a JSON object from raw model output.
///
/// Returns `None` when all four stages fail; the caller decides how to
/// degrade. Non-object JSON (a bare string, number or array) counts as a
/// failure: downstream consumers need a record-shaped object.
pub fn recover_json(raw: &str) -> Option<Value> {
    // Stage 1: fenced code block
    if let Some(caps) = FENCED_BLOCK.captures(raw) {
        if let Some(value) = parse_object(caps.get(1).map(|m| m.as_str()).unwrap_or_default()) {
            return Some(value);
        }
    }

    // Stage 2: the whole response
    if let Some(value) = parse_object(raw.trim()) {
        return Some(value);
    }

    // Stage 3: greedy brace span
    let span = BRACE_SPAN.find(raw).map(|m| m.as_str());
    if let Some(span) = span {
        if let Some(value) = parse_object(span) {
            return Some(value);
        }
    }

    // Stage 4: cleanup pass over the brace span (or the whole response
    // when no braces were found) and one final parse
    let candidate = span.unwrap_or(raw);
    let cleaned = cleanup(candidate);
    if let Some(value) = parse_object(&cleaned) {
        tracing::debug!("recovered JSON object after cleanup pass");
        return Some(value);
    }

    None
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}

/// Repair common structural damage in near-JSON text
fn cleanup(candidate: &str) -> String {
    let cleaned = TRAILING_COMMA_ARRAY.replace_all(candidate, "]");
    let cleaned = TRAILING_COMMA_OBJECT.replace_all(&cleaned, "}");
    let cleaned = cleaned.replace('\n', " ");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let cleaned = SPACE_AFTER_STRUCTURAL.replace_all(&cleaned, "${1}");
    let cleaned = SPACE_BEFORE_STRUCTURAL.replace_all(&cleaned, "${1}");
    cleaned.into_owned()
}
