use std::path::{Path, PathBuf};
use std::sync::Arc;

use morph_core::resource::{
    DirSource, EmbeddedSource, LayeredSource, ResourceError, ResourceSource,
};
use morph_core::settings::settings;
use morph_core::LoadError;
use morph_engine::Registry;
use serde::Serialize;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod query_ops;
pub mod resource_ops;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options shared by every query command.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Resource directory searched before the built-in resources.
    pub resources: Option<PathBuf>,
    pub json: bool,
}

impl QueryOptions {
    pub fn registry(&self) -> Registry {
        match &self.resources {
            Some(dir) => Registry::new(layered_source(dir, settings().resources.prefer_compiled)),
            None => Registry::with_default_source(),
        }
    }
}

/// `dir` layered over the built-in resources.
pub fn layered_source(dir: &Path, prefer_compiled: bool) -> Arc<dyn ResourceSource> {
    let layers: Vec<Arc<dyn ResourceSource>> = vec![
        Arc::new(DirSource::new(dir).prefer_compiled(prefer_compiled)),
        Arc::new(EmbeddedSource),
    ];
    Arc::new(LayeredSource::new(layers))
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}
