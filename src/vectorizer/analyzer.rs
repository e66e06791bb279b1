use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Debug;

use ahash::RandomState;
use rust_stemmers::Algorithm;

use crate::error::ServiceError;

/// Stopword lookup consulted once per raw word during tokenization
///
/// Implementations must be immutable after construction; the tokenizer
/// may call them from several threads at once.
pub trait StopwordSet: Send + Sync {
    /// # Arguments
    /// * `word` - case-folded raw word
    ///
    /// # Returns
    /// * `bool` - true if the word must be dropped
    fn is_stopword(&self, word: &str) -> Result<bool, ServiceError>;
}

/// Stemming function mapping a raw word to its root
pub trait WordStemmer: Send + Sync {
    /// # Arguments
    /// * `word` - case-folded raw word that passed the stopword filter
    ///
    /// # Returns
    /// * `Cow<str>` - stemmed form, borrowed when unchanged
    fn stem<'a>(&self, word: &'a str) -> Result<Cow<'a, str>, ServiceError>;
}

impl<S> StopwordSet for HashSet<String, S>
where
    S: std::hash::BuildHasher + Send + Sync,
{
    #[inline]
    fn is_stopword(&self, word: &str) -> Result<bool, ServiceError> {
        Ok(self.contains(word))
    }
}

/// In-memory stopword list
#[derive(Debug, Clone, Default)]
pub struct StopwordList {
    words: HashSet<Box<str>, RandomState>,
}

impl StopwordList {
    /// Empty list, nothing is filtered
    pub fn new() -> Self {
        Self {
            words: HashSet::with_hasher(RandomState::new()),
        }
    }

    /// English stopwords shipped with the `stop-words` crate
    pub fn english() -> Self {
        stop_words::get(stop_words::LANGUAGE::English).into_iter().collect()
    }

    /// Words are case-folded on insert so lookups against lower-cased text match
    pub fn insert(&mut self, word: &str) -> &mut Self {
        self.words.insert(word.to_lowercase().into_boxed_str());
        self
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<T> FromIterator<T> for StopwordList
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = StopwordList::new();
        for word in iter {
            list.insert(word.as_ref());
        }
        list
    }
}

impl StopwordSet for StopwordList {
    #[inline]
    fn is_stopword(&self, word: &str) -> Result<bool, ServiceError> {
        Ok(self.contains(word))
    }
}

/// Snowball stemmer from `rust_stemmers`
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(algorithm),
        }
    }

    /// English (Porter2) stemmer
    pub fn english() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer").finish_non_exhaustive()
    }
}

impl WordStemmer for SnowballStemmer {
    #[inline]
    fn stem<'a>(&self, word: &'a str) -> Result<Cow<'a, str>, ServiceError> {
        Ok(self.inner.stem(word))
    }
}

/// Leaves every word as is
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl WordStemmer for IdentityStemmer {
    #[inline]
    fn stem<'a>(&self, word: &'a str) -> Result<Cow<'a, str>, ServiceError> {
        Ok(Cow::Borrowed(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopword_list_folds_case_on_insert() {
        let list: StopwordList = ["The", "ON"].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(list.is_stopword("the").unwrap());
        assert!(list.is_stopword("on").unwrap());
        assert!(!list.is_stopword("cat").unwrap());
    }

    #[test]
    fn english_list_contains_common_function_words() {
        let list = StopwordList::english();
        assert!(!list.is_empty());
        assert!(list.contains("the"));
        assert!(list.contains("and"));
    }

    #[test]
    fn hashset_acts_as_stopword_set() {
        let set: HashSet<String> = ["a".to_string()].into_iter().collect();
        assert!(set.is_stopword("a").unwrap());
        assert!(!set.is_stopword("b").unwrap());
    }

    #[test]
    fn snowball_stems_plurals() {
        let stemmer = SnowballStemmer::english();
        assert_eq!(stemmer.stem("dogs").unwrap(), "dog");
        assert_eq!(stemmer.stem("cats").unwrap(), "cat");
        assert_eq!(stemmer.stem("great").unwrap(), "great");
    }

    #[test]
    fn identity_stemmer_borrows() {
        let out = IdentityStemmer.stem("running").unwrap();
        assert!(matches!(out, Cow::Borrowed("running")));
    }
}
