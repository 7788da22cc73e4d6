use std::borrow::Cow;
use std::sync::Arc;

use super::FeatureTag;

/// Named table of `(from, to)` stem-final rewrites. The first `from` that
/// ends the stem is replaced; a stem matching none is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemAlternation {
    name: String,
    pairs: Vec<(String, String)>,
}

impl StemAlternation {
    pub(crate) fn new(name: String, pairs: Vec<(String, String)>) -> Self {
        Self { name, pairs }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply<'a>(&self, stem: &'a str) -> Cow<'a, str> {
        for (from, to) in &self.pairs {
            if let Some(base) = stem.strip_suffix(from.as_str()) {
                return Cow::Owned(format!("{base}{to}"));
            }
        }
        Cow::Borrowed(stem)
    }
}

/// Respells the start of a suffix after certain stem endings
/// (Russian `ы` → `и` after `к`, `ю` → `у` after `ж`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingRule {
    after: Vec<String>,
    replace: Vec<(String, String)>,
}

impl SpellingRule {
    pub(crate) fn new(after: Vec<String>, replace: Vec<(String, String)>) -> Self {
        Self { after, replace }
    }

    /// Rewritten suffix, or `None` when this rule does not fire.
    pub fn respell(&self, stem: &str, suffix: &str) -> Option<String> {
        if !self.after.iter().any(|a| stem.ends_with(a.as_str())) {
            return None;
        }
        self.replace.iter().find_map(|(from, to)| {
            suffix
                .strip_prefix(from.as_str())
                .map(|rest| format!("{to}{rest}"))
        })
    }
}

/// Recipe for one form of a paradigm class.
#[derive(Debug, Clone)]
pub struct InflectionRule {
    pub(crate) tags: Vec<FeatureTag>,
    pub(crate) prefix: String,
    pub(crate) suffix: String,
    pub(crate) alternation: Option<Arc<StemAlternation>>,
    pub(crate) requires: Vec<FeatureTag>,
}

impl InflectionRule {
    pub fn tags(&self) -> &[FeatureTag] {
        &self.tags
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn alternation(&self) -> Option<&StemAlternation> {
        self.alternation.as_deref()
    }

    /// Lexeme tags a lemma must carry for this form to exist.
    pub fn requires(&self) -> &[FeatureTag] {
        &self.requires
    }

    /// `prefix + alternate(stem) + respelled suffix`.
    pub fn inflect(&self, stem: &str, spelling: &[SpellingRule]) -> String {
        let stem = match &self.alternation {
            Some(alt) => alt.apply(stem),
            None => Cow::Borrowed(stem),
        };
        let suffix = spelling
            .iter()
            .find_map(|rule| rule.respell(&stem, &self.suffix))
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(self.suffix.as_str()));
        let mut form = String::with_capacity(self.prefix.len() + stem.len() + suffix.len());
        form.push_str(&self.prefix);
        form.push_str(&stem);
        form.push_str(&suffix);
        form
    }
}

#[derive(Debug, Clone)]
pub struct ParadigmClass {
    pub(crate) name: String,
    pub(crate) tags: Vec<FeatureTag>,
    pub(crate) ending: String,
    pub(crate) rules: Vec<InflectionRule>,
}

impl ParadigmClass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[FeatureTag] {
        &self.tags
    }

    /// Lemma ending removed to obtain the stem.
    pub fn ending(&self) -> &str {
        &self.ending
    }

    pub fn rules(&self) -> &[InflectionRule] {
        &self.rules
    }

    /// Stem of `lemma`, or `None` if the lemma lacks the class ending.
    pub fn stem<'a>(&self, lemma: &'a str) -> Option<&'a str> {
        lemma.strip_suffix(self.ending.as_str())
    }
}
