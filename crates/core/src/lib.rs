//! Core types for the FIR intake pipeline
//!
//! This crate provides the foundational types shared by the extraction,
//! synthesis and server crates:
//! - The FIR record and its sentinel defaults
//! - Incident priority
//! - Language/script detection for code-mixed Hindi/English transcripts

pub mod language;
pub mod record;

pub use language::{Language, Script};
pub use record::{FirRecord, Priority, NOT_PROVIDED};
