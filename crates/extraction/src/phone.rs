//! Phone number extraction from transcripts
//!
//! Three-tier cascade, first tier with a valid hit wins:
//!
//! 1. Context-anchored: digit runs preceded by a bilingual phone keyword
//!    within a short lookahead window. Anchoring on keywords keeps dates,
//!    FIR numbers and pincodes from being mistaken for a contact number.
//! 2. Structural: digit groupings shaped like Indian mobile numbers
//!    (optional +91, 5+5 / 4+3+3 / 3+3+4 groups, bare 10-12 digit run).
//! 3. Last resort: the first contiguous 10-12 digit run anywhere.
//!
//! Candidates are normalized to bare ASCII digits before the length check,
//! so `+91 98765-43210` and `9876543210` yield the same value.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phone number extractor for incident transcripts
pub struct PhoneExtractor {
    /// Keyword-anchored patterns (Hindi, English, copula form)
    context_patterns: Vec<Regex>,
    /// Indian mobile number groupings without a keyword anchor
    structural_patterns: Vec<Regex>,
    /// Bare digit run, last resort
    bare_run: Regex,
}

static EXTRACTOR: Lazy<PhoneExtractor> = Lazy::new(PhoneExtractor::new);

/// Extract a candidate phone number from a transcript.
///
/// Returns 10-14 bare digits, or `None` when no plausible candidate exists.
/// Never panics, including on empty input.
pub fn extract_phone(text: &str) -> Option<String> {
    EXTRACTOR.extract(text)
}

impl PhoneExtractor {
    /// Create a new phone extractor
    pub fn new() -> Self {
        Self {
            context_patterns: Self::build_context_patterns(),
            structural_patterns: Self::build_structural_patterns(),
            bare_run: Regex::new(r"\d{10,12}").unwrap(),
        }
    }

    fn build_context_patterns() -> Vec<Regex> {
        // The lookahead window between keyword and digits is bounded so a
        // keyword early in the transcript cannot anchor digits from an
        // unrelated sentence much later.
        vec![
            // Hindi keywords
            Regex::new(
                r"(?:फोन|मोबाइल|संपर्क|कॉन्टैक्ट|कांटेक्ट|नंबर|फ़ोन)[^\d+]{0,40}((?:\+?\d{1,3}[-.\s]?)?(?:\d{3,4}[-.\s]?)?\d{3,4}[-.\s]?\d{3,4})",
            )
            .unwrap(),
            // English keywords
            Regex::new(
                r"(?i)(?:phone|mobile|contact|cell|number)[^\d+]{0,40}((?:\+?\d{1,3}[-.\s]?)?(?:\d{3,4}[-.\s]?)?\d{3,4}[-.\s]?\d{3,4})",
            )
            .unwrap(),
            // Grouped digits immediately followed by the Hindi copula
            Regex::new(r"(\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4})\s*है").unwrap(),
        ]
    }

    fn build_structural_patterns() -> Vec<Regex> {
        vec![
            Regex::new(r"\b(?:\+?91)?[-.\s]?(\d{5}[-.\s]?\d{5})\b").unwrap(),
            Regex::new(r"\b(?:\+?91)?[-.\s]?(\d{4}[-.\s]?\d{3}[-.\s]?\d{3})\b").unwrap(),
            Regex::new(r"\b(?:\+?91)?[-.\s]?(\d{3}[-.\s]?\d{3}[-.\s]?\d{4})\b").unwrap(),
            Regex::new(r"\b(\d{10,12})\b").unwrap(),
        ]
    }

    /// Extract a phone number, trying each tier in priority order
    pub fn extract(&self, text: &str) -> Option<String> {
        if let Some(phone) = self.extract_with_context(text) {
            tracing::debug!(phone = %phone, tier = "context", "extracted phone number");
            return Some(phone);
        }
        if let Some(phone) = self.extract_structural(text) {
            tracing::debug!(phone = %phone, tier = "structural", "extracted phone number");
            return Some(phone);
        }
        if let Some(phone) = self.extract_bare_run(text) {
            tracing::debug!(phone = %phone, tier = "bare", "extracted phone number");
            return Some(phone);
        }
        None
    }

    fn extract_with_context(&self, text: &str) -> Option<String> {
        for pattern in &self.context_patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(candidate) = caps.get(1) {
                    let digits = normalize_digits(candidate.as_str());
                    if (10..=14).contains(&digits.len()) {
                        return Some(digits);
                    }
                }
            }
        }
        None
    }

    fn extract_structural(&self, text: &str) -> Option<String> {
        for pattern in &self.structural_patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(candidate) = caps.get(1) {
                    let digits = normalize_digits(candidate.as_str());
                    if (10..=13).contains(&digits.len()) {
                        return Some(digits);
                    }
                }
            }
        }
        None
    }

    fn extract_bare_run(&self, text: &str) -> Option<String> {
        self.bare_run.find(text).map(|m| m.as_str().to_string())
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip separators and the country-code `+` down to bare ASCII digits
fn normalize_digits(candidate: &str) -> String {
    candidate.chars().filter(|c| c.is_ascii_digit()).collect()
}
