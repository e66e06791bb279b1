use std::collections::BTreeSet;

use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::vectorizer::token::Tokenizer;

/// Sorted, de-duplicated term set fixing the column layout of every vector
///
/// Position `i` of any TF, IDF or TF-IDF vector built against a vocabulary
/// refers to `vocab.term(i)`. The set also serves as the term -> index map,
/// so placing a value never depends on two sequences staying in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    /// Build the vocabulary of a corpus
    ///
    /// Every document is tokenized independently and the union of all
    /// tokens is sorted ascending.
    pub fn build<T>(tokenizer: &Tokenizer, corpus: &[T]) -> Result<Self>
    where
        T: AsRef<str>,
    {
        let mut terms = BTreeSet::new();
        for doc in corpus {
            terms.extend(tokenizer.tokenize(doc.as_ref())?);
        }
        let vocab = Self::from_sorted(terms);
        debug!(num_docs = corpus.len(), vocab_size = vocab.len(), "built vocabulary");
        Ok(vocab)
    }

    /// Same as `build`, tokenizing documents on the rayon pool
    pub fn par_build<T>(tokenizer: &Tokenizer, corpus: &[T]) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        let token_seqs = corpus
            .par_iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_token_seqs(token_seqs.iter()))
    }

    /// Union already tokenized documents
    pub fn from_token_seqs<'a, I, S>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<[String]> + 'a + ?Sized,
    {
        let terms: BTreeSet<String> = docs
            .into_iter()
            .flat_map(|tokens| tokens.as_ref().iter().cloned())
            .collect();
        Self::from_sorted(terms)
    }

    fn from_sorted(terms: BTreeSet<String>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column index of a term
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at a column index
    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Terms in column order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::vectorizer::analyzer::{SnowballStemmer, StopwordList};

    fn sample_tokenizer(max_ngram: usize) -> Tokenizer {
        let stopwords: StopwordList = ["the", "on", "and", "are"].into_iter().collect();
        Tokenizer::new(Arc::new(stopwords), Arc::new(SnowballStemmer::english()), max_ngram)
    }

    const CORPUS: [&str; 3] = [
        "the cat sat on the mat",
        "the dog sat on the log",
        "dogs and cats are great",
    ];

    #[test]
    fn vocabulary_is_sorted_union() {
        let vocab = Vocabulary::build(&sample_tokenizer(1), &CORPUS).unwrap();
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(terms, vec!["cat", "dog", "great", "log", "mat", "sat"]);
    }

    #[test]
    fn vocabulary_is_repeatable_and_strictly_ascending() {
        let t = sample_tokenizer(3);
        let a = Vocabulary::build(&t, &CORPUS).unwrap();
        let b = Vocabulary::build(&t, &CORPUS).unwrap();
        assert_eq!(a, b);
        let terms: Vec<&str> = a.iter().collect();
        assert!(terms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn vocabulary_ignores_document_order() {
        let t = sample_tokenizer(2);
        let mut reversed = CORPUS;
        reversed.reverse();
        assert_eq!(
            Vocabulary::build(&t, &CORPUS).unwrap(),
            Vocabulary::build(&t, &reversed).unwrap()
        );
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let t = sample_tokenizer(3);
        assert_eq!(
            Vocabulary::build(&t, &CORPUS).unwrap(),
            Vocabulary::par_build(&t, &CORPUS).unwrap()
        );
    }

    #[test]
    fn index_mapping_round_trips() {
        let vocab = Vocabulary::build(&sample_tokenizer(1), &CORPUS).unwrap();
        for (i, term) in vocab.iter().enumerate() {
            assert_eq!(vocab.index_of(term), Some(i));
            assert_eq!(vocab.term(i), Some(term));
        }
        assert_eq!(vocab.index_of("missing"), None);
        assert_eq!(vocab.term(vocab.len()), None);
    }

    #[test]
    fn corpus_without_tokens_gives_empty_vocabulary() {
        let vocab = Vocabulary::build(&sample_tokenizer(2), &["the on", "", "a"]).unwrap();
        assert!(vocab.is_empty());
    }
}
