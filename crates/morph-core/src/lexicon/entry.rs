use std::fmt;

use crate::feature::{ClassId, FeatureSet};

/// Position of an entry in its `LexiconStore` (load order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u32);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub id: EntryId,
    /// Lower-case, never empty.
    pub lemma: String,
    pub class: ClassId,
    /// Lexeme-level tags shared by every form (`inan`, `Sgtm`, ...).
    pub tags: FeatureSet,
}
