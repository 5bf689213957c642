//! Reporter name extraction from transcripts
//!
//! Dictated reports almost always carry an explicit self-introduction
//! ("मेरा नाम सुनील है", "my name is Raj Kumar"), so the primary patterns
//! anchor on those phrasings. The name span is a bounded capture of 1-4
//! tokens terminated by a boundary word, punctuation or end of input, which
//! keeps the match from swallowing the rest of the sentence.
//!
//! Captured spans are cleaned of trailing conjunctions and embedded Hindi
//! function words. The particle list is heuristic and can over-strip names
//! that contain a particle as a substring; it is kept as-is for behavioral
//! compatibility with the deployed patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Name extractor for incident transcripts
pub struct NameExtractor {
    /// Self-introduction patterns, tried in order
    primary_patterns: Vec<Regex>,
    /// Capitalized-word heuristics for terse English statements
    fallback_patterns: Vec<Regex>,
    /// One trailing conjunction/possessive token
    trailing_connective: Regex,
    /// Hindi function words captured mid-span
    embedded_particles: Regex,
}

static EXTRACTOR: Lazy<NameExtractor> = Lazy::new(NameExtractor::new);

/// Extract the reporter's name from a transcript.
///
/// Returns a cleaned span of more than one character, or `None`.
/// Never panics, including on empty input.
pub fn extract_name(text: &str) -> Option<String> {
    EXTRACTOR.extract(text)
}

impl NameExtractor {
    /// Create a new name extractor
    pub fn new() -> Self {
        Self {
            primary_patterns: Self::build_primary_patterns(),
            fallback_patterns: Self::build_fallback_patterns(),
            trailing_connective: Regex::new(r"\s+(?:और|एंड|and|my|मेरा|मेरी|का|की|के)\s*$")
                .unwrap(),
            embedded_particles: Regex::new(
                r"है|हूँ|हूं|का|की|के|से|को|और|एक|में|पर|हे|अपना|कि|उनका|उनकी",
            )
            .unwrap(),
        }
    }

    fn build_primary_patterns() -> Vec<Regex> {
        vec![
            // "मेरा नाम <name>" with boundary word, punctuation or end of input
            Regex::new(
                r"मेरा\s+नाम\s+([^\s,।.]+(?:\s+[^\s,।.]+){0,3})(?:\s+(?:है|हूँ|हैं|और|एंड|and|is)|\s*[,।.]|$)",
            )
            .unwrap(),
            // "नाम <name>"
            Regex::new(
                r"नाम\s+([^\s,।.]+(?:\s+[^\s,।.]+){0,3})(?:\s+(?:है|हूँ|हैं|और|एंड|and|is)|\s*[,।.]|$)",
            )
            .unwrap(),
            // "my name is <name>"
            Regex::new(
                r"(?i)my\s+name\s+is\s+([^\s,।.]+(?:\s+[^\s,।.]+){0,3})(?:\s+(?:और|एंड|and)|\s*[,।.]|$)",
            )
            .unwrap(),
            // "name is <name>"
            Regex::new(
                r"(?i)name\s+is\s+([^\s,।.]+(?:\s+[^\s,।.]+){0,3})(?:\s+(?:और|एंड|and)|\s*[,।.]|$)",
            )
            .unwrap(),
        ]
    }

    fn build_fallback_patterns() -> Vec<Regex> {
        vec![
            // "I am <Capitalized words>", 1-3 words
            Regex::new(r"(?i:\bI\s+am)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})").unwrap(),
            // Introduction at the very start of the transcript
            Regex::new(r"(?i:^My\s+name\s+is)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})").unwrap(),
        ]
    }

    /// Extract a name, trying primary patterns then fallbacks
    pub fn extract(&self, text: &str) -> Option<String> {
        for pattern in &self.primary_patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(span) = caps.get(1) {
                    if let Some(name) = self.clean_span(span.as_str()) {
                        tracing::debug!(name = %name, "extracted reporter name");
                        return Some(name);
                    }
                }
            }
        }

        for pattern in &self.fallback_patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(span) = caps.get(1) {
                    let name = span.as_str().trim();
                    if !name.is_empty() {
                        tracing::debug!(name = %name, "extracted reporter name (fallback)");
                        return Some(name.to_string());
                    }
                }
            }
        }

        None
    }

    /// Strip trailing connectives and embedded particles from a captured
    /// span. Returns `None` when nothing usable remains.
    fn clean_span(&self, raw: &str) -> Option<String> {
        let without_trailing = self.trailing_connective.replace(raw.trim(), "");
        let cleaned = self.embedded_particles.replace_all(&without_trailing, "");
        let cleaned = cleaned.trim();

        if cleaned.chars().count() > 1 {
            Some(cleaned.to_string())
        } else {
            None
        }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}
