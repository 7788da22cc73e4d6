use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{
    FeatureSet, FeatureTag, GrammarError, InflectionRule, ParadigmClass, SpellingRule,
    StemAlternation, Vocabulary,
};
use crate::resource::GrammarRecord;

/// Index of a paradigm class inside its `FeatureModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct FeatureModel {
    language: String,
    vocabulary: Vocabulary,
    /// `(lexeme tag, excluded form tag)`
    restrictions: Vec<(FeatureTag, FeatureTag)>,
    spelling: Vec<SpellingRule>,
    classes: Vec<ParadigmClass>,
    class_index: HashMap<String, ClassId>,
}

/// Lookups lower-case their input, so every piece of a generated form must
/// already be lower-case for the form to be found again.
fn check_lower_case<'a>(
    texts: impl IntoIterator<Item = &'a String>,
    context: &str,
) -> Result<(), GrammarError> {
    match texts.into_iter().find(|t| t.to_lowercase() != **t) {
        Some(text) => Err(GrammarError::NotLowerCase {
            text: text.clone(),
            context: context.to_string(),
        }),
        None => Ok(()),
    }
}

impl FeatureModel {
    /// Build and validate the model. Every tag the grammar mentions must be in
    /// its vocabulary and every class needs a part of speech and at least one
    /// rule.
    pub fn from_grammar(grammar: &GrammarRecord) -> Result<Self, GrammarError> {
        let vocabulary = Vocabulary::new(&grammar.categories)?;

        let mut restrictions = Vec::with_capacity(grammar.restrictions.len());
        for r in &grammar.restrictions {
            restrictions.push((
                vocabulary.check_tag(&r.lexeme, "restriction")?,
                vocabulary.check_tag(&r.excludes, "restriction")?,
            ));
        }

        let mut spelling = Vec::with_capacity(grammar.spelling.len());
        for s in &grammar.spelling {
            if s.after.iter().any(String::is_empty)
                || s.replace.iter().any(|(from, _)| from.is_empty())
            {
                return Err(GrammarError::EmptyPattern("spelling rule".into()));
            }
            let texts = s
                .after
                .iter()
                .chain(s.replace.iter().flat_map(|(from, to)| [from, to]));
            check_lower_case(texts, "spelling rule")?;
            spelling.push(SpellingRule::new(s.after.clone(), s.replace.clone()));
        }

        let mut alternations = HashMap::with_capacity(grammar.alternations.len());
        for (name, pairs) in &grammar.alternations {
            if pairs.iter().any(|(from, _)| from.is_empty()) {
                return Err(GrammarError::EmptyPattern(format!("alternation {name:?}")));
            }
            check_lower_case(
                pairs.iter().flat_map(|(from, to)| [from, to]),
                &format!("alternation {name:?}"),
            )?;
            alternations.insert(
                name.as_str(),
                Arc::new(StemAlternation::new(name.clone(), pairs.clone())),
            );
        }

        let mut classes = Vec::with_capacity(grammar.classes.len());
        let mut class_index = HashMap::with_capacity(grammar.classes.len());
        for record in &grammar.classes {
            let context = format!("class {:?}", record.id);
            let tags = vocabulary.check(&record.tags, &context)?;
            let pos_count = tags
                .iter()
                .filter(|t| vocabulary.is_part_of_speech(t.as_str()))
                .count();
            if pos_count != 1 {
                return Err(GrammarError::MissingPartOfSpeech(record.id.clone()));
            }
            if record.rules.is_empty() {
                return Err(GrammarError::EmptyClass(record.id.clone()));
            }
            check_lower_case([&record.ending], &context)?;

            let mut rules = Vec::with_capacity(record.rules.len());
            for rule in &record.rules {
                check_lower_case([&rule.prefix, &rule.suffix], &context)?;
                let alternation = match &rule.alternation {
                    Some(name) => Some(
                        alternations
                            .get(name.as_str())
                            .cloned()
                            .ok_or_else(|| GrammarError::UnknownAlternation {
                                name: name.clone(),
                                class: record.id.clone(),
                            })?,
                    ),
                    None => None,
                };
                rules.push(InflectionRule {
                    tags: vocabulary.check(&rule.tags, &context)?,
                    prefix: rule.prefix.clone(),
                    suffix: rule.suffix.clone(),
                    alternation,
                    requires: vocabulary.check(&rule.requires, &context)?,
                });
            }

            let id = ClassId(classes.len());
            if class_index.insert(record.id.clone(), id).is_some() {
                return Err(GrammarError::DuplicateClass(record.id.clone()));
            }
            classes.push(ParadigmClass {
                name: record.id.clone(),
                tags,
                ending: record.ending.clone(),
                rules,
            });
        }

        debug!(
            language = %grammar.language,
            tags = vocabulary.len(),
            classes = classes.len(),
            "feature model built"
        );

        Ok(Self {
            language: grammar.language.clone(),
            vocabulary,
            restrictions,
            spelling,
            classes,
            class_index,
        })
    }

    /// Language code declared by the grammar.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn valid_feature_vocabulary(&self) -> impl Iterator<Item = &FeatureTag> {
        self.vocabulary.tags()
    }

    pub fn spelling(&self) -> &[SpellingRule] {
        &self.spelling
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(name).copied()
    }

    /// # Panics
    ///
    /// If `id` was not produced by this model.
    pub fn class(&self, id: ClassId) -> &ParadigmClass {
        &self.classes[id.0]
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ParadigmClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId(i), c))
    }

    /// # Panics
    ///
    /// If `id` was not produced by this model.
    pub fn paradigm_class_rules(&self, id: ClassId) -> &[InflectionRule] {
        self.class(id).rules()
    }

    /// Whether `rule` yields a form for a lexeme carrying `lexeme_tags`.
    pub fn applies(&self, rule: &InflectionRule, lexeme_tags: &FeatureSet) -> bool {
        if !rule
            .requires
            .iter()
            .all(|t| lexeme_tags.contains(t.as_str()))
        {
            return false;
        }
        !self.restrictions.iter().any(|(lexeme, excluded)| {
            lexeme_tags.contains(lexeme.as_str()) && rule.tags.contains(excluded)
        })
    }

    /// Canonical features of the form `rule` builds for a lexeme of `class`.
    ///
    /// A part-of-speech tag on the rule (`INFN`, `GRND`, `ADJS`) replaces the
    /// class part of speech.
    pub fn form_features(
        &self,
        class: &ParadigmClass,
        lexeme_tags: &FeatureSet,
        rule: &InflectionRule,
    ) -> FeatureSet {
        let rule_has_pos = rule
            .tags
            .iter()
            .any(|t| self.vocabulary.is_part_of_speech(t.as_str()));
        let class_tags = class
            .tags
            .iter()
            .filter(|t| !(rule_has_pos && self.vocabulary.is_part_of_speech(t.as_str())));
        self.vocabulary.canonicalize(
            class_tags
                .chain(lexeme_tags.iter())
                .chain(rule.tags.iter())
                .cloned(),
        )
    }
}
