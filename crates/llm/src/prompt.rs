//! Prompt construction for FIR synthesis
//!
//! Builds the chat messages sent to the generative model. The system prompt
//! pins the exact JSON shape of the FIR record and instructs the model to
//! return nothing but that object; the response recovery layer still
//! tolerates violations of that instruction.

use std::fmt;

use serde::{Deserialize, Serialize};

use fir_intake_core::Language;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Build the full system prompt for FIR generation
pub fn fir_system_prompt(language: Language) -> String {
    format!(
        r#"You are an AI assistant that helps generate structured FIR (First Information Report) details from a transcript.
The transcript is in {language}.

MOST IMPORTANT: Your primary task is to identify and extract:
1. The full name of the person reporting (in English)
2. Their contact number/phone number (if present)

Then also extract:
3. Their address (in English)
4. Information about the incident including:
   - Title: A concise summary of the incident (in English)
   - Description: Detailed account of what happened (in English)
   - Location: Where the incident occurred (in English)
   - Priority: Assess the severity (high/medium/low)

For Hindi names, transliterate them into English (don't translate, keep the same pronunciation).

Format your response as a valid JSON object with this structure:
{{
  "fullName": string,
  "contactNumber": string,
  "address": string,
  "title": string,
  "description": string,
  "location": string,
  "priority": "high" | "medium" | "low",
  "date": string | null,
  "time": string | null,
  "witnesses": string[],
  "evidence": string[]
}}

Important: Ensure your response contains ONLY the JSON object and nothing else. Do not include any explanations, markdown formatting, or additional text."#,
        language = language.name(),
    )
}

/// Build the reduced system prompt used on the secondary-model retry.
///
/// Fewer required fields and a shorter output budget make the retry more
/// likely to succeed when the primary call failed.
pub fn reduced_fir_system_prompt(language: Language) -> String {
    format!(
        r#"You are an AI assistant that helps generate structured FIR (First Information Report) details from a transcript.
The transcript is in {language}.

Your PRIMARY task is to extract:
1. The full name of the person reporting
2. Their contact number/phone number

Then also extract:
3. Title: A concise summary of the incident (in English)
4. Description: Detailed account of what happened (in English)
5. Location: Where the incident occurred (in English)
6. Priority: Assess the severity (high/medium/low)

Format your response as a valid JSON object with this structure:
{{
  "fullName": string,
  "contactNumber": string,
  "title": string,
  "description": string,
  "location": string,
  "priority": "high" | "medium" | "low"
}}

Important: Ensure your response contains ONLY the JSON object and nothing else."#,
        language = language.name(),
    )
}

/// Build the user message carrying the transcript
pub fn fir_user_message(transcript: &str) -> String {
    format!("Transcript: {transcript}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_record_shape() {
        let prompt = fir_system_prompt(Language::English);
        assert!(prompt.contains("\"fullName\": string"));
        assert!(prompt.contains("\"contactNumber\": string"));
        assert!(prompt.contains("\"witnesses\": string[]"));
        assert!(prompt.contains("ONLY the JSON object"));
    }

    #[test]
    fn test_system_prompt_is_language_tagged() {
        assert!(fir_system_prompt(Language::Hindi).contains("The transcript is in Hindi."));
        assert!(fir_system_prompt(Language::English).contains("The transcript is in English."));
    }

    #[test]
    fn test_reduced_prompt_drops_optional_fields() {
        let prompt = reduced_fir_system_prompt(Language::Hindi);
        assert!(prompt.contains("\"fullName\": string"));
        assert!(!prompt.contains("witnesses"));
        assert!(!prompt.contains("evidence"));
    }

    #[test]
    fn test_user_message() {
        assert_eq!(fir_user_message("kal chori hui"), "Transcript: kal chori hui");
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::system("prompt");
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.content, "prompt");
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("ok").role, Role::Assistant);
        assert_eq!(Role::System.to_string(), "system");
    }
}
