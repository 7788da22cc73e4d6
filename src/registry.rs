//! Language registry: the dispatch point from a language code to its loaded
//! dictionary.
//!
//! Each language has its own slot mutex, so concurrent loads of one language
//! are serialized (the first caller loads, the others wait and reuse the
//! result) while different languages load in parallel. The map lock is only
//! held long enough to fetch a slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

use morph_core::resource::{default_source, ResourceSource};
use morph_core::{Language, LoadError, MorphDictionary};
use tracing::{debug, info};

/// Shared, immutable handle to one loaded language.
pub type LanguageHandle = Arc<MorphDictionary>;

/// `None` until the first load attempt finishes. A failure stays cached until
/// `evict`.
type Slot = Arc<Mutex<Option<Result<LanguageHandle, LoadError>>>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Registry {
    source: Arc<dyn ResourceSource>,
    slots: Mutex<HashMap<Language, Slot>>,
}

impl Registry {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Registry over the resource source configured in the global settings.
    pub fn with_default_source() -> Self {
        Self::new(default_source())
    }

    /// Process-wide registry used by the `api` functions.
    pub fn global() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(Registry::with_default_source)
    }

    fn slot(&self, language: &Language) -> Slot {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(language.clone()).or_default())
    }

    /// Load `code`, or return the handle (or failure) of an earlier load.
    ///
    /// An invalid code is reported as `ResourceMissing`.
    pub fn load_language(&self, code: &str) -> Result<LanguageHandle, LoadError> {
        let language = Language::new(code)
            .ok_or_else(|| LoadError::ResourceMissing(code.trim().to_string()))?;
        let slot = self.slot(&language);
        let mut state = lock(&slot);
        if let Some(result) = state.as_ref() {
            debug!(%language, "reusing load result");
            return result.clone();
        }
        let result = MorphDictionary::load(&language, self.source.as_ref()).map(Arc::new);
        *state = Some(result.clone());
        result
    }

    /// Handle of an already loaded language. Waits for a load in progress;
    /// never starts one.
    pub fn get(&self, code: &str) -> Option<LanguageHandle> {
        let language = Language::new(code)?;
        let slot = lock(&self.slots).get(&language).cloned()?;
        let state = lock(&slot);
        state.as_ref().and_then(|r| r.as_ref().ok().cloned())
    }

    /// Successfully loaded languages, sorted by code.
    pub fn loaded(&self) -> Vec<Language> {
        let slots: Vec<(Language, Slot)> = lock(&self.slots)
            .iter()
            .map(|(l, s)| (l.clone(), Arc::clone(s)))
            .collect();
        let mut out: Vec<Language> = slots
            .into_iter()
            .filter(|(_, slot)| matches!(*lock(slot), Some(Ok(_))))
            .map(|(l, _)| l)
            .collect();
        out.sort();
        out
    }

    /// Forget the load result of `code` so the next `load_language` retries.
    /// A load in progress finishes first; the slot itself is kept so later
    /// loads stay serialized on it. Outstanding handles stay valid. Returns
    /// whether a result was cleared.
    pub fn evict(&self, code: &str) -> bool {
        let Some(language) = Language::new(code) else {
            return false;
        };
        let Some(slot) = lock(&self.slots).get(&language).cloned() else {
            return false;
        };
        let cleared = lock(&slot).take().is_some();
        if cleared {
            info!(%language, "language evicted");
        }
        cleared
    }

    /// Load several languages in parallel, one scoped thread each. Results
    /// keep the order of `codes`.
    pub fn preload<S: AsRef<str> + Sync>(
        &self,
        codes: &[S],
    ) -> Vec<(String, Result<LanguageHandle, LoadError>)> {
        thread::scope(|s| {
            let handles: Vec<_> = codes
                .iter()
                .map(|code| {
                    let code = code.as_ref();
                    (code, s.spawn(move || self.load_language(code)))
                })
                .collect();
            handles
                .into_iter()
                .map(|(code, h)| {
                    let result = h.join().unwrap_or_else(|_| {
                        Err(LoadError::ResourceMalformed {
                            language: code.to_string(),
                            detail: "loader thread panicked".into(),
                        })
                    });
                    (code.to_string(), result)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use morph_core::resource::{EmbeddedSource, LanguageResource, ResourceError};
    use morph_core::LoadErrorReason;

    use super::*;

    /// Embedded resources, counting fetches and optionally failing.
    struct CountingSource {
        fetches: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fetches: AtomicUsize::new(0),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
                fail,
            })
        }
    }

    impl ResourceSource for CountingSource {
        fn fetch(&self, language: &Language) -> Result<LanguageResource, ResourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            self.active.fetch_sub(1, Ordering::SeqCst);
            if self.fail {
                return Err(ResourceError::Incomplete("broken".into()));
            }
            EmbeddedSource.fetch(language)
        }
    }

    #[test]
    fn concurrent_loads_share_one_handle() {
        let source = CountingSource::new(false);
        let registry = Registry::new(source.clone());
        let handles: Vec<LanguageHandle> = thread::scope(|s| {
            let joins: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.load_language("ru").unwrap()))
                .collect();
            joins.into_iter().map(|j| j.join().unwrap()).collect()
        });
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn languages_are_independent() {
        let registry = Registry::new(Arc::new(EmbeddedSource));
        let results = registry.preload(&["RU", "XX", "EN"]);
        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert_eq!(
            results[1].1.as_ref().unwrap_err().reason(),
            LoadErrorReason::ResourceMissing
        );
        assert!(results[2].1.is_ok());
        let loaded: Vec<String> = registry.loaded().iter().map(|l| l.to_string()).collect();
        assert_eq!(loaded, vec!["EN", "RU"]);
    }

    #[test]
    fn failure_is_cached_until_evicted() {
        let source = CountingSource::new(true);
        let registry = Registry::new(source.clone());
        let first = registry.load_language("EN").unwrap_err();
        let second = registry.load_language("EN").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.reason(), LoadErrorReason::ResourceMalformed);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        assert!(registry.evict("en"));
        assert!(registry.load_language("EN").is_err());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn evict_during_load_keeps_loads_serialized() {
        let source = CountingSource::new(false);
        let registry = Registry::new(source.clone());
        thread::scope(|s| {
            let loader = s.spawn(|| registry.load_language("RU").unwrap());
            while source.fetches.load(Ordering::SeqCst) == 0 {
                thread::yield_now();
            }
            assert!(registry.evict("RU"));
            let reloaded = registry.load_language("RU").unwrap();
            let first = loader.join().unwrap();
            assert!(!Arc::ptr_eq(&first, &reloaded));
        });
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(source.max_active.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn evict_unknown_language() {
        let registry = Registry::new(Arc::new(EmbeddedSource));
        assert!(!registry.evict("RU"));
        assert!(registry.load_language("XX").is_err());
        assert!(registry.evict("XX"));
        assert!(!registry.evict("XX"));
    }

    #[test]
    fn get_never_loads() {
        let registry = Registry::new(Arc::new(EmbeddedSource));
        assert!(registry.get("RU").is_none());
        let handle = registry.load_language("RU").unwrap();
        assert!(Arc::ptr_eq(&registry.get("ru").unwrap(), &handle));
        assert!(registry.evict("RU"));
        assert!(registry.get("RU").is_none());
        // The evicted handle keeps working.
        assert!(!handle.analyze("россии").is_empty());
    }

    #[test]
    fn invalid_code_is_missing() {
        let registry = Registry::new(Arc::new(EmbeddedSource));
        for code in ["", "  ", "../ru"] {
            let err = registry.load_language(code).unwrap_err();
            assert_eq!(err.reason(), LoadErrorReason::ResourceMissing);
        }
        assert!(!registry.evict("../ru"));
    }
}
