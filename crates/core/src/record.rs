//! FIR (First Information Report) record model
//!
//! The record produced by the intake pipeline. Every field carries a defined
//! fallback so a record is never partially populated: callers can rely on
//! each key being present regardless of how little the pipeline recovered.
//!
//! Deserialization is deliberately lenient. The record shape is dictated to
//! a generative model, and models violate instructions: keys go missing,
//! strings come back as `null`, phone numbers arrive as JSON numbers and
//! priorities as free text. All of those degrade to the field default
//! instead of failing the whole parse.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sentinel used for string fields with no recovered value
pub const NOT_PROVIDED: &str = "Not provided";

/// Incident priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Get wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured FIR record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contact_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient_string_vec")]
    pub witnesses: Vec<String>,
    #[serde(deserialize_with = "lenient_string_vec")]
    pub evidence: Vec<String>,
}

impl Default for FirRecord {
    fn default() -> Self {
        Self {
            full_name: NOT_PROVIDED.to_string(),
            contact_number: NOT_PROVIDED.to_string(),
            address: NOT_PROVIDED.to_string(),
            title: NOT_PROVIDED.to_string(),
            description: NOT_PROVIDED.to_string(),
            location: NOT_PROVIDED.to_string(),
            priority: Priority::Medium,
            date: None,
            time: None,
            witnesses: Vec::new(),
            evidence: Vec::new(),
        }
    }
}

impl FirRecord {
    /// Check whether a string field holds a real value
    /// (non-empty and not the sentinel)
    pub fn is_provided(value: &str) -> bool {
        !value.trim().is_empty() && value != NOT_PROVIDED
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(value).unwrap_or_else(|| NOT_PROVIDED.to_string()))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(value))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(Priority::from_str_loose)
        .unwrap_or_default())
}

fn lenient_string_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().filter_map(coerce_string).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Coerce a JSON value into a usable string, treating empty strings,
/// `null` and structured values as absent. Numbers are stringified because
/// models frequently emit contact numbers as JSON numbers.
fn coerce_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
