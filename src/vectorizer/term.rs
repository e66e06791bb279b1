use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::vectorizer::vocab::Vocabulary;

/// TermFrequency struct
/// Counts how often each token occurs in one document,
/// together with the document's total token count.
///
/// # Examples
/// ```
/// use ngram_tfidf::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TermFrequency {
    term_count: HashMap<String, u64, RandomState>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: HashMap::with_hasher(RandomState::new()),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterator over all terms and their counts, in no particular order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Get the total count of all terms
    ///
    /// # Returns
    /// * `u64` - Total term count
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Get the occurrence count for a specific term
    ///
    /// # Arguments
    /// * `term` - term
    ///
    /// # Returns
    /// * `u64` - Occurrence count for the term
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_term_count == 0
    }
}

/// TF calculation
impl TermFrequency {
    /// Dense TF vector against a vocabulary
    ///
    /// Entry `i` is `count(vocab[i]) / term_sum()`.
    /// An empty document gives an all-zero vector of `vocab.len()`.
    /// Terms missing from the vocabulary still count towards the total.
    ///
    /// # Arguments
    /// * `vocab` - column layout
    ///
    /// # Returns
    /// * `Vec<f64>` - TF values, `vocab.len()` long
    pub fn tf_vector(&self, vocab: &Vocabulary) -> Vec<f64> {
        let mut tf_vec = vec![0.0; vocab.len()];
        if self.total_term_count == 0 {
            return tf_vec;
        }
        let total = self.total_term_count as f64;
        for (term, &count) in &self.term_count {
            if let Some(idx) = vocab.index_of(term) {
                tf_vec[idx] = count as f64 / total;
            }
        }
        tf_vec
    }
}

/// TF of a token sequence
///
/// # Arguments
/// * `tokens` - one document's tokens, as produced by the tokenizer
/// * `vocab` - column layout
///
/// # Returns
/// * `Vec<f64>` - TF values, `vocab.len()` long
pub fn term_frequency<T>(tokens: &[T], vocab: &Vocabulary) -> Vec<f64>
where
    T: AsRef<str>,
{
    TermFrequency::from(tokens).tf_vector(vocab)
}
