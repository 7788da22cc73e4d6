use std::fmt;

use morph_core::paradigm::{Analysis, Paradigm};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Records (value types returned to callers)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub lemma: String,
    pub features: Vec<String>,
}

impl From<&Analysis> for AnalysisRecord {
    fn from(a: &Analysis) -> Self {
        Self {
            lemma: a.lemma.clone(),
            features: a.features.to_strings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub form: String,
    pub analyses: Vec<AnalysisRecord>,
}

/// One paradigm: forms in generation order, each with its analyses.
///
/// Serializes as a map keyed by form (`{"россия": [...], "россии": [...]}`)
/// keeping that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParadigmRecord {
    pub forms: Vec<FormRecord>,
}

impl ParadigmRecord {
    pub fn get(&self, form: &str) -> Option<&[AnalysisRecord]> {
        self.forms
            .iter()
            .find(|f| f.form == form)
            .map(|f| f.analyses.as_slice())
    }
}

impl From<&Paradigm> for ParadigmRecord {
    fn from(p: &Paradigm) -> Self {
        Self {
            forms: p
                .forms()
                .iter()
                .map(|f| FormRecord {
                    form: f.form.clone(),
                    analyses: f.analyses.iter().map(AnalysisRecord::from).collect(),
                })
                .collect(),
        }
    }
}

impl Serialize for ParadigmRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.forms.len()))?;
        for f in &self.forms {
            map.serialize_entry(&f.form, &f.analyses)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParadigmRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormsVisitor;

        impl<'de> Visitor<'de> for FormsVisitor {
            type Value = ParadigmRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from surface form to analyses")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut forms = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((form, analyses)) = access.next_entry()? {
                    forms.push(FormRecord { form, analyses });
                }
                Ok(ParadigmRecord { forms })
            }
        }

        deserializer.deserialize_map(FormsVisitor)
    }
}
