use std::fs;
use std::path::Path;

use morph_core::lexicon::LexiconStats;
use morph_core::resource::{
    is_compiled, parse_grammar_toml, parse_lexicon_tsv, LanguageResource, MAGIC,
};
use morph_core::{Language, LoadError, MorphDictionary};

use super::CommandError;

fn read(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a grammar/lexicon pair, then write it as a compiled
/// `.mrlx` file. Nothing is written unless the whole resource loads.
pub fn compile_files(
    grammar: &Path,
    lexicon: &Path,
    out: &Path,
) -> Result<(Language, LexiconStats), CommandError> {
    let resource = LanguageResource {
        grammar: parse_grammar_toml(&read(grammar)?)?,
        entries: parse_lexicon_tsv(&read(lexicon)?)?,
    };
    let declared = resource.grammar.language.as_str();
    let language = Language::new(declared).ok_or_else(|| LoadError::ResourceMalformed {
        language: declared.to_string(),
        detail: "grammar declares an invalid language code".to_string(),
    })?;
    let dict = MorphDictionary::from_resource(language.clone(), &resource, None)?;
    resource.save(out)?;
    Ok((language, dict.stats()))
}

pub fn compile(grammar: &str, lexicon: &str, out: &str) {
    let (language, stats) = die!(
        compile_files(Path::new(grammar), Path::new(lexicon), Path::new(out)),
        "Error: {}"
    );
    println!(
        "Compiled {language}: {} entries, {} lemmas, {} surface forms -> {out}",
        stats.entries, stats.lemmas, stats.surface_forms
    );
}

pub struct ResourceInfo {
    pub language: Language,
    pub file_size: u64,
    pub classes: usize,
    pub stats: LexiconStats,
}

pub fn describe(path: &Path) -> Result<ResourceInfo, CommandError> {
    let resource = LanguageResource::open(path)?;
    let declared = resource.grammar.language.as_str();
    let language = Language::new(declared).ok_or_else(|| LoadError::ResourceMalformed {
        language: declared.to_string(),
        detail: "invalid language code".to_string(),
    })?;
    let dict = MorphDictionary::from_resource(language.clone(), &resource, None)?;
    let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    Ok(ResourceInfo {
        language,
        file_size,
        classes: dict.model().classes().count(),
        stats: dict.stats(),
    })
}

pub fn info(file: &str) {
    let head = fs::read(file)
        .ok()
        .and_then(|b| b.get(..MAGIC.len()).map(|s| s.to_vec()));
    match head.as_deref() {
        Some(bytes) if is_compiled(bytes) => {}
        Some(other) => {
            eprintln!(
                "Unknown file format (magic: {:?})",
                String::from_utf8_lossy(other)
            );
            std::process::exit(1);
        }
        None => {
            eprintln!("Error reading file: {file}");
            std::process::exit(1);
        }
    }

    let info = die!(describe(Path::new(file)), "Error opening resource: {}");
    println!("Resource:   {file}");
    println!("File size:  {:.1} KB", info.file_size as f64 / 1024.0);
    println!("Language:   {}", info.language);
    println!("Classes:    {}", info.classes);
    println!("Entries:    {}", info.stats.entries);
    println!("Lemmas:     {}", info.stats.lemmas);
    println!("Forms:      {}", info.stats.surface_forms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{layered_source, QueryOptions};
    use morph_engine::Registry;

    const GRAMMAR: &str = r#"
language = "xt"

[[category]]
name = "POS"
tags = ["NOUN"]

[[category]]
name = "NMbr"
tags = ["sing", "plur"]

[[class]]
id = "n"
tags = ["NOUN"]
rules = [
    { tags = ["sing"] },
    { tags = ["plur"], suffix = "en" },
]
"#;

    fn write_sources(dir: &Path, lexicon: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let grammar = dir.join("grammar.toml");
        let lex = dir.join("lexicon.tsv");
        fs::write(&grammar, GRAMMAR).unwrap();
        fs::write(&lex, lexicon).unwrap();
        (grammar, lex)
    }

    #[test]
    fn compile_then_describe() {
        let tmp = tempfile::tempdir().unwrap();
        let (grammar, lex) = write_sources(tmp.path(), "ox\tn\t\nbox\tn\t\n");
        let out = tmp.path().join("xt.mrlx");

        let (language, stats) = compile_files(&grammar, &lex, &out).unwrap();
        assert_eq!(language.as_str(), "XT");
        assert_eq!(stats.entries, 2);

        let info = describe(&out).unwrap();
        assert_eq!(info.language.as_str(), "XT");
        assert_eq!(info.classes, 1);
        assert_eq!(info.stats.surface_forms, 4);
        assert!(info.file_size > 0);
    }

    #[test]
    fn compiled_file_is_served_from_resource_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let (grammar, lex) = write_sources(tmp.path(), "ox\tn\t\n");
        compile_files(&grammar, &lex, &tmp.path().join("xt.mrlx")).unwrap();

        let opts = QueryOptions {
            resources: Some(tmp.path().to_path_buf()),
            json: false,
        };
        let handle = opts.registry().load_language("xt").unwrap();
        let forms = handle.synthesize("ox", &["plur"]).unwrap();
        assert_eq!(forms, vec!["oxen"]);
    }

    #[test]
    fn prefer_compiled_picks_between_mrlx_and_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let (grammar, lex) = write_sources(tmp.path(), "ox\tn\t\n");
        compile_files(&grammar, &lex, &tmp.path().join("xt.mrlx")).unwrap();
        let src = tmp.path().join("xt");
        fs::create_dir_all(&src).unwrap();
        write_sources(&src, "box\tn\t\n");

        let compiled = Registry::new(layered_source(tmp.path(), true));
        let handle = compiled.load_language("xt").unwrap();
        assert_eq!(handle.synthesize("ox", &["plur"]).unwrap(), vec!["oxen"]);
        assert!(handle.synthesize("box", &["plur"]).unwrap().is_empty());

        let sources = Registry::new(layered_source(tmp.path(), false));
        let handle = sources.load_language("xt").unwrap();
        assert_eq!(handle.synthesize("box", &["plur"]).unwrap(), vec!["boxen"]);
        assert!(handle.synthesize("ox", &["plur"]).unwrap().is_empty());
    }

    #[test]
    fn duplicate_entry_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (grammar, lex) = write_sources(tmp.path(), "ox\tn\t\nox\tn\t\n");
        let out = tmp.path().join("xt.mrlx");

        let err = compile_files(&grammar, &lex, &out).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Load(LoadError::DuplicateEntry { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = compile_files(&missing, &missing, &tmp.path().join("o.mrlx")).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
