use std::collections::HashSet;

use ahash::RandomState;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::vectorizer::{token::Tokenizer, vocab::Vocabulary};

/// Corpus tokenized once up front
///
/// Keeps one token sequence per document, in corpus order. Every later
/// stage (vocabulary, document frequency, TF) reads from here instead of
/// tokenizing the raw text again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizedCorpus {
    docs: Vec<Vec<String>>,
}

impl TokenizedCorpus {
    /// Tokenize every document in order
    pub fn tokenize<T>(tokenizer: &Tokenizer, corpus: &[T]) -> Result<Self>
    where
        T: AsRef<str>,
    {
        let docs = corpus
            .iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        debug!(num_docs = docs.len(), "tokenized corpus");
        Ok(Self { docs })
    }

    /// Tokenize on the rayon pool; output keeps corpus order
    pub fn par_tokenize<T>(tokenizer: &Tokenizer, corpus: &[T]) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        let docs = corpus
            .par_iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        debug!(num_docs = docs.len(), "tokenized corpus in parallel");
        Ok(Self { docs })
    }

    /// Number of documents, N in the IDF formula
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Token sequence of the document at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.docs.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[String]> {
        self.docs.iter().map(Vec::as_slice)
    }

    pub(crate) fn docs(&self) -> &[Vec<String>] {
        &self.docs
    }

    /// Sorted union of all tokens
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::from_token_seqs(self.docs.iter())
    }

    /// Count, per vocabulary term, the documents containing it at least once
    pub fn document_frequency(&self, vocab: &Vocabulary) -> DocumentFrequency {
        let mut counts = vec![0u64; vocab.len()];
        for tokens in &self.docs {
            add_presence(&mut counts, tokens, vocab);
        }
        DocumentFrequency {
            doc_num: self.doc_num() as u64,
            counts,
        }
    }

    /// Same as `document_frequency`, counting per document on the rayon pool
    pub fn par_document_frequency(&self, vocab: &Vocabulary) -> DocumentFrequency {
        let counts = self
            .docs
            .par_iter()
            .fold(
                || vec![0u64; vocab.len()],
                |mut acc, tokens| {
                    add_presence(&mut acc, tokens, vocab);
                    acc
                },
            )
            .reduce(
                || vec![0u64; vocab.len()],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        DocumentFrequency {
            doc_num: self.doc_num() as u64,
            counts,
        }
    }
}

/// Presence, not count: each distinct term of a document adds 1
fn add_presence(counts: &mut [u64], tokens: &[String], vocab: &Vocabulary) {
    let mut seen: HashSet<&str, RandomState> =
        HashSet::with_capacity_and_hasher(tokens.len(), RandomState::new());
    for token in tokens {
        if !seen.insert(token.as_str()) {
            continue;
        }
        if let Some(idx) = vocab.index_of(token) {
            counts[idx] += 1;
        }
    }
}

/// Per-term document counts, aligned with a vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFrequency {
    doc_num: u64,
    counts: Vec<u64>,
}

impl DocumentFrequency {
    /// # Arguments
    /// * `doc_num` - number of documents the counts were taken over
    /// * `counts` - one count per vocabulary term, in vocabulary order
    pub fn new(doc_num: u64, counts: Vec<u64>) -> Self {
        Self { doc_num, counts }
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document count of the term at a vocabulary index
    #[inline]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
