use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::{
    parse_grammar_toml, parse_lexicon_tsv, LanguageResource, ResourceError, ResourceSource,
};
use crate::language::Language;

/// Resources stored under a directory:
///
/// ```text
/// <root>/<code>.mrlx
/// <root>/<code>/grammar.toml
/// <root>/<code>/lexicon.tsv
/// ```
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    prefer_compiled: bool,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefer_compiled: true,
        }
    }

    /// When both forms exist, load the compiled file (`true`, the default)
    /// or the editable TOML/TSV sources (`false`).
    pub fn prefer_compiled(mut self, prefer: bool) -> Self {
        self.prefer_compiled = prefer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn compiled_path(&self, language: &Language) -> PathBuf {
        self.root.join(format!("{}.mrlx", language.file_stem()))
    }

    fn source_dir(&self, language: &Language) -> PathBuf {
        self.root.join(language.file_stem())
    }

    fn load_sources(&self, dir: &Path) -> Result<LanguageResource, ResourceError> {
        let lexicon_path = dir.join("lexicon.tsv");
        if !lexicon_path.is_file() {
            return Err(ResourceError::Incomplete(format!(
                "{} is missing",
                lexicon_path.display()
            )));
        }
        let grammar = parse_grammar_toml(&fs::read_to_string(dir.join("grammar.toml"))?)?;
        let entries = parse_lexicon_tsv(&fs::read_to_string(&lexicon_path)?)?;
        Ok(LanguageResource { grammar, entries })
    }
}

impl ResourceSource for DirSource {
    fn fetch(&self, language: &Language) -> Result<LanguageResource, ResourceError> {
        let compiled = self.compiled_path(language);
        let sources = self.source_dir(language);
        let has_compiled = compiled.is_file();
        let has_sources = sources.join("grammar.toml").is_file();

        if has_compiled && (self.prefer_compiled || !has_sources) {
            debug!(path = %compiled.display(), "loading compiled resource");
            return LanguageResource::open(&compiled);
        }
        if has_sources {
            debug!(path = %sources.display(), "loading resource sources");
            return self.load_sources(&sources);
        }
        Err(ResourceError::Missing(language.clone()))
    }
}

/// Tries each source in order; the first one that has the language wins.
///
/// A source returning anything other than `ResourceError::Missing` stops the
/// search, so a broken file is reported instead of silently shadowed.
pub struct LayeredSource {
    layers: Vec<Arc<dyn ResourceSource>>,
}

impl LayeredSource {
    pub fn new(layers: Vec<Arc<dyn ResourceSource>>) -> Self {
        Self { layers }
    }
}

impl ResourceSource for LayeredSource {
    fn fetch(&self, language: &Language) -> Result<LanguageResource, ResourceError> {
        for layer in &self.layers {
            match layer.fetch(language) {
                Err(ResourceError::Missing(_)) => continue,
                other => return other,
            }
        }
        Err(ResourceError::Missing(language.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::embedded::{EN_GRAMMAR, EN_LEXICON};
    use crate::resource::EmbeddedSource;

    fn en() -> Language {
        Language::new("EN").unwrap()
    }

    fn write_sources(root: &Path, lexicon: &str) {
        let dir = root.join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("grammar.toml"), EN_GRAMMAR).unwrap();
        fs::write(dir.join("lexicon.tsv"), lexicon).unwrap();
    }

    #[test]
    fn fetch_from_sources() {
        let tmp = tempfile::tempdir().unwrap();
        write_sources(tmp.path(), "cat\tnoun-s\n");
        let resource = DirSource::new(tmp.path()).fetch(&en()).unwrap();
        assert_eq!(resource.entries.len(), 1);
        assert_eq!(resource.grammar.language, "EN");
    }

    #[test]
    fn compiled_preference() {
        let tmp = tempfile::tempdir().unwrap();
        write_sources(tmp.path(), "cat\tnoun-s\n");
        let full = EmbeddedSource.fetch(&en()).unwrap();
        full.save(&tmp.path().join("en.mrlx")).unwrap();

        let compiled = DirSource::new(tmp.path()).fetch(&en()).unwrap();
        assert_eq!(compiled.entries.len(), full.entries.len());

        let sources = DirSource::new(tmp.path())
            .prefer_compiled(false)
            .fetch(&en())
            .unwrap();
        assert_eq!(sources.entries.len(), 1);
    }

    #[test]
    fn grammar_without_lexicon_is_incomplete() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("grammar.toml"), EN_GRAMMAR).unwrap();
        let err = DirSource::new(tmp.path()).fetch(&en()).unwrap_err();
        assert!(matches!(err, ResourceError::Incomplete(_)));
    }

    #[test]
    fn empty_dir_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DirSource::new(tmp.path()).fetch(&en()).unwrap_err();
        assert!(matches!(err, ResourceError::Missing(_)));
    }

    #[test]
    fn layered_falls_through_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let layers: Vec<Arc<dyn ResourceSource>> = vec![
            Arc::new(DirSource::new(tmp.path())),
            Arc::new(EmbeddedSource),
        ];
        let layered = LayeredSource::new(layers);
        let resource = layered.fetch(&en()).unwrap();
        assert_eq!(
            resource.entries.len(),
            parse_lexicon_tsv(EN_LEXICON).unwrap().len()
        );
        assert!(matches!(
            layered.fetch(&Language::new("XX").unwrap()),
            Err(ResourceError::Missing(_))
        ));
    }

    #[test]
    fn layered_stops_at_broken_resource() {
        let tmp = tempfile::tempdir().unwrap();
        write_sources(tmp.path(), "cat\n");
        let layers: Vec<Arc<dyn ResourceSource>> = vec![
            Arc::new(DirSource::new(tmp.path())),
            Arc::new(EmbeddedSource),
        ];
        let layered = LayeredSource::new(layers);
        let err = layered.fetch(&en()).unwrap_err();
        assert!(matches!(err, ResourceError::Parse { line: 1, .. }));
    }
}
