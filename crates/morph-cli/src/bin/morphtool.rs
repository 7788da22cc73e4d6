use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use morph_cli::commands::{config_ops, query_ops, resource_ops, QueryOptions};

#[derive(Parser)]
#[command(name = "morphtool", about = "Morphological dictionary tool")]
struct Cli {
    /// Resource directory searched before the built-in resources
    #[arg(long, global = true)]
    resources: Option<PathBuf>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every (lemma, features) reading of a word form
    Analyze {
        /// Language code (RU, EN, ...)
        lang: String,
        /// Word form
        token: String,
    },
    /// Generate the forms of a lemma carrying the given tags
    Synthesize {
        lang: String,
        lemma: String,
        /// Feature tags, space- or comma-separated (e.g. NOUN,sing gent)
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Print every paradigm of a lemma
    Paradigm { lang: String, lemma: String },
    /// Lemmas starting with a prefix
    Complete { lang: String, prefix: String },
    /// Print the feature vocabulary by category
    Vocab { lang: String },
    /// Compile grammar.toml + lexicon.tsv into a .mrlx resource
    Compile {
        /// Grammar TOML file
        grammar: String,
        /// Lexicon TSV file
        lexicon: String,
        /// Output file (conventionally <code>.mrlx)
        output_file: String,
    },
    /// Show compiled resource info
    Info {
        /// Compiled resource (.mrlx) file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    morph_engine::trace_init::init_stderr_tracing();

    if let Some(path) = &cli.settings {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        });
        if let Err(e) = morph_core::settings::init_custom(content) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let opts = QueryOptions {
        resources: cli.resources,
        json: cli.json,
    };

    match cli.command {
        Command::Analyze { lang, token } => query_ops::analyze(&opts, &lang, &token),
        Command::Synthesize { lang, lemma, tags } => {
            query_ops::synthesize(&opts, &lang, &lemma, &tags)
        }
        Command::Paradigm { lang, lemma } => query_ops::paradigm(&opts, &lang, &lemma),
        Command::Complete { lang, prefix } => query_ops::complete(&opts, &lang, &prefix),
        Command::Vocab { lang } => query_ops::vocab(&opts, &lang),
        Command::Compile {
            grammar,
            lexicon,
            output_file,
        } => resource_ops::compile(&grammar, &lexicon, &output_file),
        Command::Info { file } => resource_ops::info(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
