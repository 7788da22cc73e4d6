use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One grammeme (`NOUN`, `femn`, `gent`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureTag(String);

impl FeatureTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FeatureTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags of one form in canonical order: part of speech first, then the
/// remaining categories in vocabulary order. Built by `Vocabulary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureSet(Vec<FeatureTag>);

impl FeatureSet {
    /// Wrap tags that are already canonical and de-duplicated.
    pub(crate) fn from_canonical(tags: Vec<FeatureTag>) -> Self {
        Self(tags)
    }

    pub fn tags(&self) -> &[FeatureTag] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == tag)
    }

    /// Partial match: every tag of `requested` is present here.
    pub fn contains_all(&self, requested: &FeatureSet) -> bool {
        requested.iter().all(|t| self.contains(t.as_str()))
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.0.clone()).collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(tag.as_str())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a FeatureTag;
    type IntoIter = std::slice::Iter<'a, FeatureTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
