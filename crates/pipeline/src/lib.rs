//! Transcript-to-FIR pipeline
//!
//! One transcript in, one structured record out, always. The pipeline runs
//! the local extractors, asks the generative model for a structured record,
//! and reconciles the two unreliable sources. Synthesis failures degrade to
//! a minimal record built from the local hints; the caller never sees a
//! hard failure.
//!
//! The pipeline holds no mutable state: concurrent invocations for
//! different transcripts are fully independent.

pub mod reconcile;
pub mod synthesis;

pub use reconcile::reconcile;
pub use synthesis::{SynthesisConfig, SynthesisError, Synthesizer};

use std::sync::Arc;

use fir_intake_core::FirRecord;
use fir_intake_extraction::{extract_name, extract_phone};
use fir_intake_llm::ChatBackend;

/// The FIR intake pipeline
pub struct FirPipeline {
    synthesizer: Synthesizer,
}

impl FirPipeline {
    /// Create a pipeline over the given chat backend
    pub fn new(backend: Arc<dyn ChatBackend>, config: SynthesisConfig) -> Self {
        Self {
            synthesizer: Synthesizer::new(backend, config),
        }
    }

    /// Process one transcript into a FIR record.
    ///
    /// Infallible by construction: extraction misses are absent values and
    /// synthesis failures degrade to the minimal record.
    pub async fn process(&self, transcript: &str) -> FirRecord {
        let phone_hint = extract_phone(transcript);
        let name_hint = extract_name(transcript);
        tracing::info!(
            phone_found = phone_hint.is_some(),
            name_found = name_hint.is_some(),
            transcript_chars = transcript.chars().count(),
            "local extraction complete"
        );

        let synthesis = self.synthesizer.synthesize(transcript).await;

        reconcile(
            transcript,
            phone_hint.as_deref(),
            name_hint.as_deref(),
            synthesis,
        )
    }
}
