#[cfg(not(target_endian = "little"))]
compile_error!("morph-core requires a little-endian platform");

pub mod analyzer;
pub mod dictionary;
pub mod feature;
pub mod language;
pub mod lexicon;
pub mod paradigm;
pub mod resource;
pub mod settings;
pub mod synthesizer;
#[cfg(test)]
mod tests;
pub mod unicode;

pub use dictionary::{LoadError, LoadErrorReason, MorphDictionary, QueryError};
pub use language::Language;
