//! Morphological dictionary engine.
//!
//! `morph_core` holds the engine (feature model, lexicon, paradigm
//! generation, analysis and synthesis). This crate adds the language
//! registry, the value-returning boundary API and tracing setup.

pub mod api;
pub mod registry;
pub mod trace_init;

pub use morph_core::{Language, LoadError, LoadErrorReason, MorphDictionary, QueryError};
pub use registry::{LanguageHandle, Registry};
