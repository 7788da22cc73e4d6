use std::fmt::Write as _;

use morph_engine::api::{self, ParadigmRecord};
use morph_engine::LanguageHandle;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{to_json, QueryOptions};

fn open(opts: &QueryOptions, lang: &str) -> LanguageHandle {
    die!(
        opts.registry().load_language(lang),
        "Error loading language {lang}: {}"
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", die!(to_json(value), "Error: {}"));
}

/// Accept tags as separate arguments, comma-separated, or both.
pub fn split_tags(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|a| a.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn analyze(opts: &QueryOptions, lang: &str, token: &str) {
    let handle = open(opts, lang);
    let records = api::analyze(&handle, token);
    if opts.json {
        print_json(&records);
        return;
    }
    if records.is_empty() {
        println!("{token}: no analyses");
        return;
    }
    for r in &records {
        println!("{}\t{}", r.lemma, r.features.join(","));
    }
}

pub fn synthesize(opts: &QueryOptions, lang: &str, lemma: &str, tags: &[String]) {
    let handle = open(opts, lang);
    let tags = split_tags(tags);
    let forms = die!(api::synthesize(&handle, lemma, &tags), "Error: {}");
    if opts.json {
        print_json(&forms);
        return;
    }
    if forms.is_empty() {
        println!("{lemma} [{}]: no forms", tags.join(","));
        return;
    }
    if forms.len() > 1 {
        eprintln!("{} matching forms (generation order, not ranked)", forms.len());
    }
    for form in &forms {
        println!("{form}");
    }
}

pub fn paradigm(opts: &QueryOptions, lang: &str, lemma: &str) {
    let handle = open(opts, lang);
    let paradigms = api::get_paradigms(&handle, lemma);
    if opts.json {
        print_json(&paradigms);
        return;
    }
    if paradigms.is_empty() {
        println!("{lemma}: not in lexicon");
        return;
    }
    let classes: Vec<&str> = handle
        .lexicon()
        .lookup_by_lemma(lemma)
        .into_iter()
        .map(|e| handle.class_name(e))
        .collect();
    for (i, p) in paradigms.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let class = classes.get(i).copied().unwrap_or("?");
        println!("== {lemma} ({class}, {} forms)", p.forms.len());
        print!("{}", format_paradigm(p));
    }
}

/// One line per analysis: the form padded to a common display width, then
/// its tags. Continuation lines of a syncretic form leave the column blank.
pub fn format_paradigm(p: &ParadigmRecord) -> String {
    let width = p
        .forms
        .iter()
        .map(|f| UnicodeWidthStr::width(f.form.as_str()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for f in &p.forms {
        for (i, a) in f.analyses.iter().enumerate() {
            let label = if i == 0 { f.form.as_str() } else { "" };
            let pad = width - UnicodeWidthStr::width(label);
            let _ = writeln!(out, "  {label}{:pad$}  {}", "", a.features.join(","));
        }
    }
    out
}

pub fn complete(opts: &QueryOptions, lang: &str, prefix: &str) {
    let handle = open(opts, lang);
    let lemmas = handle.complete(prefix);
    if opts.json {
        print_json(&lemmas);
        return;
    }
    for lemma in lemmas {
        println!("{lemma}");
    }
}

#[derive(Serialize)]
struct CategoryRecord<'a> {
    name: &'a str,
    tags: Vec<&'a str>,
}

pub fn vocab(opts: &QueryOptions, lang: &str) {
    let handle = open(opts, lang);
    let categories: Vec<CategoryRecord> = handle
        .model()
        .vocabulary()
        .categories()
        .iter()
        .map(|c| CategoryRecord {
            name: c.name(),
            tags: c.tags().iter().map(|t| t.as_str()).collect(),
        })
        .collect();
    if opts.json {
        print_json(&categories);
        return;
    }
    for c in &categories {
        println!("{:<6} {}", c.name, c.tags.join(" "));
    }
    let stats = handle.stats();
    eprintln!(
        "{}: {} entries, {} lemmas, {} surface forms",
        handle.language(),
        stats.entries,
        stats.lemmas,
        stats.surface_forms
    );
}
