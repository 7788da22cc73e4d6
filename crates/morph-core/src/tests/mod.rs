
use crate::resource::{EmbeddedSource, ResourceSource};
use crate::{Language, MorphDictionary};

fn lang(code: &str) -> Language {
    Language::new(code).unwrap()
}

pub(super) fn embedded(code: &str, cache_capacity: Option<usize>) -> MorphDictionary {
    let language = lang(code);
    let resource = EmbeddedSource.fetch(&language).unwrap();
    MorphDictionary::from_resource(language, &resource, cache_capacity).unwrap()
}
