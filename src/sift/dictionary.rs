//! Word list used for exact/broad matching and dictionary rejection

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::error::{DomainSiftError, Result};

/// Words must be strictly longer than this
const MIN_WORD_LEN: usize = 2;

/// Immutable, case-folded set of known words (length > 2)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build from in-memory words with the same cleanup as [`Dictionary::load`]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| w.chars().count() > MIN_WORD_LEN)
            .collect();
        Self { words }
    }

    /// Load a flat one-word-per-line file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            DomainSiftError::dictionary(path.to_string_lossy(), e.to_string())
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let dictionary = Self::from_words(text.lines());

        tracing::info!(
            path = %path.display(),
            words = dictionary.len(),
            "Word list loaded"
        );
        Ok(dictionary)
    }

    /// Load once per process and reuse for every later call with the same path
    pub fn shared(path: &Path) -> Result<Arc<Self>> {
        static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Dictionary>>>> = OnceLock::new();

        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut guard = cache.lock();
        if let Some(existing) = guard.get(path) {
            return Ok(Arc::clone(existing));
        }

        let loaded = Arc::new(Self::load(path)?);
        guard.insert(path.to_path_buf(), Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
