//! Rule-based reporter detail extraction
//!
//! Pulls a reporter's name and phone number out of noisy, code-mixed
//! Hindi/English incident transcripts. Extraction is pattern-based and
//! layered: each extractor evaluates an ordered list of independent
//! strategies and stops on the first valid hit, so precise context-anchored
//! patterns always outrank broad structural ones.
//!
//! Extractors are pure and infallible: a miss is `None`, never an error.
//! The synthesis layer merges these local hits with model output.

pub mod name;
pub mod phone;

pub use name::extract_name;
pub use phone::extract_phone;
