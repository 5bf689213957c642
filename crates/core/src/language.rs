//! Language detection for code-mixed Hindi/English transcripts
//!
//! Incident reports arrive as free-form speech transcripts that interleave
//! Devanagari and Latin script. The synthesizer only needs to know which
//! prompt variant to use, so detection is deliberately coarse: any
//! Devanagari code point marks the transcript as Hindi-dominant.

use serde::{Deserialize, Serialize};

/// Supported transcript languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
        }
    }

    /// Get script used by this language
    pub fn script(&self) -> Script {
        match self {
            Self::English => Script::Latin,
            Self::Hindi => Script::Devanagari,
        }
    }

    /// Detect the dominant language of a transcript.
    ///
    /// A single Devanagari code point is enough to classify the transcript
    /// as Hindi-dominant: dictated Hindi reports routinely embed Latin-script
    /// digits and English loanwords, so counting would under-report Hindi.
    pub fn detect(text: &str) -> Language {
        if text.chars().any(|c| Script::Devanagari.contains_char(c)) {
            Language::Hindi
        } else {
            Language::English
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Script systems appearing in transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Devanagari,
}

impl Script {
    /// Get Unicode range for this script (first block only)
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0000, 0x007F),
            Self::Devanagari => (0x0900, 0x097F),
        }
    }

    /// Check if a character belongs to this script
    pub fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }
}
