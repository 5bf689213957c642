//! Reconciliation of model output with locally-extracted hints
//!
//! Two-level fallback policy:
//! - Field level: a synthesized field wins unless it is missing or the
//!   sentinel; name and phone then fall back to the local extraction hints.
//! - Record level: when synthesis failed entirely, a minimal record is
//!   built from the hints and a transcript preview.
//!
//! Pure and total: same inputs, same record, no I/O.

use fir_intake_core::{FirRecord, Priority, NOT_PROVIDED};

use crate::synthesis::SynthesisError;

/// Description length (in characters) kept in the degraded record
const TRANSCRIPT_PREVIEW_CHARS: usize = 300;

/// Merge synthesis output with extraction hints into the final record
pub fn reconcile(
    transcript: &str,
    phone_hint: Option<&str>,
    name_hint: Option<&str>,
    synthesis: Result<FirRecord, SynthesisError>,
) -> FirRecord {
    match synthesis {
        Ok(record) => merge(record, phone_hint, name_hint),
        Err(err) => {
            tracing::warn!(error = %err, "synthesis failed, degrading to minimal record");
            minimal_record(transcript, phone_hint, name_hint)
        }
    }
}

/// Field-level merge of a synthesized record with extraction hints
fn merge(mut record: FirRecord, phone_hint: Option<&str>, name_hint: Option<&str>) -> FirRecord {
    if !FirRecord::is_provided(&record.full_name) {
        record.full_name = hint_or_sentinel(name_hint);
    }
    if !FirRecord::is_provided(&record.contact_number) {
        record.contact_number = hint_or_sentinel(phone_hint);
    }

    for field in [
        &mut record.address,
        &mut record.title,
        &mut record.description,
        &mut record.location,
    ] {
        if field.trim().is_empty() {
            *field = NOT_PROVIDED.to_string();
        }
    }

    record
}

/// Minimal record built from local hints only
fn minimal_record(
    transcript: &str,
    phone_hint: Option<&str>,
    name_hint: Option<&str>,
) -> FirRecord {
    FirRecord {
        full_name: hint_or_sentinel(name_hint),
        contact_number: hint_or_sentinel(phone_hint),
        title: "Incident Report".to_string(),
        description: transcript_preview(transcript),
        location: "Not specified".to_string(),
        priority: Priority::Medium,
        ..FirRecord::default()
    }
}

fn hint_or_sentinel(hint: Option<&str>) -> String {
    match hint {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => NOT_PROVIDED.to_string(),
    }
}

/// Bounded, char-boundary-safe transcript prefix with an ellipsis marker
fn transcript_preview(transcript: &str) -> String {
    let mut preview: String = transcript.chars().take(TRANSCRIPT_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
