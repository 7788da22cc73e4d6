use std::collections::HashMap;

use super::{FeatureSet, FeatureTag, GrammarError, UnknownTag};
use crate::resource::CategoryRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    tags: Vec<FeatureTag>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[FeatureTag] {
        &self.tags
    }
}

/// Closed tag vocabulary of one language.
///
/// The first category holds the parts of speech. Every tag belongs to
/// exactly one category; its `(category, position)` pair is its sort key.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    categories: Vec<Category>,
    index: HashMap<FeatureTag, (usize, usize)>,
}

impl Vocabulary {
    pub fn new(records: &[CategoryRecord]) -> Result<Self, GrammarError> {
        if records.is_empty() || records[0].tags.is_empty() {
            return Err(GrammarError::EmptyVocabulary);
        }
        let mut index = HashMap::new();
        let mut categories = Vec::with_capacity(records.len());
        for (ci, record) in records.iter().enumerate() {
            let mut tags = Vec::with_capacity(record.tags.len());
            for (ti, tag) in record.tags.iter().enumerate() {
                let tag = FeatureTag::new(tag.as_str());
                if index.insert(tag.clone(), (ci, ti)).is_some() {
                    return Err(GrammarError::DuplicateTag(tag.as_str().to_string()));
                }
                tags.push(tag);
            }
            categories.push(Category {
                name: record.name.clone(),
                tags,
            });
        }
        Ok(Self { categories, index })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All tags in canonical order.
    pub fn tags(&self) -> impl Iterator<Item = &FeatureTag> {
        self.categories.iter().flat_map(|c| c.tags.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    pub fn category_of(&self, tag: &str) -> Option<&Category> {
        self.index.get(tag).map(|&(ci, _)| &self.categories[ci])
    }

    pub fn is_part_of_speech(&self, tag: &str) -> bool {
        matches!(self.index.get(tag), Some(&(0, _)))
    }

    /// Part of speech of a canonical set (its first tag, if it is one).
    pub fn part_of_speech<'a>(&self, set: &'a FeatureSet) -> Option<&'a FeatureTag> {
        set.tags()
            .first()
            .filter(|t| self.is_part_of_speech(t.as_str()))
    }

    /// Sort `tags` into canonical order and drop repeats.
    ///
    /// Callers pass validated tags; an unknown tag would sort last.
    pub(crate) fn canonicalize(&self, tags: impl IntoIterator<Item = FeatureTag>) -> FeatureSet {
        let mut tags: Vec<FeatureTag> = tags.into_iter().collect();
        tags.sort_by_key(|t| {
            self.index
                .get(t.as_str())
                .copied()
                .unwrap_or((usize::MAX, usize::MAX))
        });
        tags.dedup();
        FeatureSet::from_canonical(tags)
    }

    /// Validate and canonicalize a requested tag list.
    pub fn feature_set<S: AsRef<str>>(&self, tags: &[S]) -> Result<FeatureSet, UnknownTag> {
        let mut out = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !self.contains(tag) {
                return Err(UnknownTag(tag.to_string()));
            }
            out.push(FeatureTag::new(tag));
        }
        Ok(self.canonicalize(out))
    }

    pub(crate) fn check_tag(&self, tag: &str, context: &str) -> Result<FeatureTag, GrammarError> {
        if self.contains(tag) {
            Ok(FeatureTag::new(tag))
        } else {
            Err(GrammarError::UnknownTag {
                tag: tag.to_string(),
                context: context.to_string(),
            })
        }
    }

    pub(crate) fn check(
        &self,
        tags: &[String],
        context: &str,
    ) -> Result<Vec<FeatureTag>, GrammarError> {
        tags.iter().map(|tag| self.check_tag(tag, context)).collect()
    }
}
