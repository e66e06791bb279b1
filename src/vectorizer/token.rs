use std::fmt::Debug;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::trace;

use crate::error::{Result, VectorizeError};
use crate::vectorizer::analyzer::{StopwordSet, WordStemmer};

/// Joins the unigrams of an n-gram window
pub const NGRAM_SEPARATOR: &str = "_";

/// Maximal runs of Unicode word characters
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+").unwrap_or_else(|e| unreachable!("word pattern is valid: {e}"))
});

/// Normalizer / n-gram tokenizer
///
/// Turns raw text into an ordered token sequence:
/// case-fold, split into word runs, drop stopwords and single-character
/// words, stem, then append every contiguous 2..=max_ngram window joined
/// with `_`.
///
/// The output is unigrams followed by bigrams, trigrams, ... each level in
/// left-to-right window order. It is neither de-duplicated nor sorted.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ngram_tfidf::{IdentityStemmer, StopwordList, Tokenizer};
///
/// let stopwords: StopwordList = ["the"].into_iter().collect();
/// let tokenizer = Tokenizer::new(Arc::new(stopwords), Arc::new(IdentityStemmer), 2);
/// let tokens = tokenizer.tokenize("The quick brown fox").unwrap();
/// assert_eq!(tokens, vec!["quick", "brown", "fox", "quick_brown", "brown_fox"]);
/// ```
#[derive(Clone)]
pub struct Tokenizer {
    stopwords: Arc<dyn StopwordSet>,
    stemmer: Arc<dyn WordStemmer>,
    max_ngram: usize,
}

impl Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("max_ngram", &self.max_ngram)
            .finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Create a tokenizer over already constructed services
    ///
    /// # Arguments
    /// * `stopwords` - stopword lookup
    /// * `stemmer` - stemming function
    /// * `max_ngram` - inclusive upper n-gram bound, 1 means unigrams only
    pub fn new(
        stopwords: Arc<dyn StopwordSet>,
        stemmer: Arc<dyn WordStemmer>,
        max_ngram: usize,
    ) -> Self {
        Self {
            stopwords,
            stemmer,
            max_ngram,
        }
    }

    #[inline]
    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    /// Tokenize one document
    ///
    /// # Arguments
    /// * `text` - raw document text
    ///
    /// # Returns
    /// * `Vec<String>` - unigrams then n-grams, in positional order
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let unigrams = self.unigrams(text)?;
        let tokens = expand_ngrams(unigrams, self.max_ngram);
        trace!(num_tokens = tokens.len(), "tokenized document");
        Ok(tokens)
    }

    /// Stemmed words surviving the stopword and length filters
    pub fn unigrams(&self, text: &str) -> Result<Vec<String>> {
        let folded = text.to_lowercase();
        let mut words = Vec::new();
        for word in WORD_PATTERN.find_iter(&folded).map(|m| m.as_str()) {
            if self
                .stopwords
                .is_stopword(word)
                .map_err(VectorizeError::stopwords)?
            {
                continue;
            }
            if word.chars().count() <= 1 {
                continue;
            }
            let stemmed = self.stemmer.stem(word).map_err(VectorizeError::stemmer)?;
            words.push(stemmed.into_owned());
        }
        Ok(words)
    }
}

/// Append every contiguous window of 2..=max_ngram unigrams
///
/// Windows longer than the unigram sequence contribute nothing.
pub fn expand_ngrams(unigrams: Vec<String>, max_ngram: usize) -> Vec<String> {
    let len = unigrams.len();
    let top = max_ngram.min(len);
    let extra: usize = (2..=top).map(|n| len - n + 1).sum();
    let mut tokens = unigrams;
    tokens.reserve(extra);
    for n in 2..=top {
        for start in 0..=(len - n) {
            let gram = tokens[start..start + n].join(NGRAM_SEPARATOR);
            tokens.push(gram);
        }
    }
    tokens
}
