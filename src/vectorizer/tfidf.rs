use crate::error::{Result, VectorizeError};
use crate::vectorizer::{
    corpus::{DocumentFrequency, TokenizedCorpus},
    term::TermFrequency,
    token::Tokenizer,
    vocab::Vocabulary,
    IDFVector,
};

/// TF / IDF formula seam
///
/// `TFIDFVectorizer<E>` is generic over the engine so a different
/// weighting scheme can be plugged in without touching the pipeline.
pub trait TFIDFEngine {
    /// TFベクトルを生成するメソッド
    /// # Arguments
    /// * `freq` - one document's term counts
    /// * `vocab` - column layout
    /// # Returns
    /// * `Vec<f64>` - TF vector, `vocab.len()` long
    fn tf_vec(freq: &TermFrequency, vocab: &Vocabulary) -> Vec<f64>;

    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `doc_freq` - document frequency per vocabulary term
    /// # Returns
    /// * `IDFVector` - IDF values aligned with the same vocabulary
    fn idf_vec(doc_freq: &DocumentFrequency) -> Result<IDFVector>;
}

/// Default engine
///
/// - `tf = count / total_tokens` (0 for an empty document)
/// - `idf = ln(N / (df + 1)) + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// IDF of a single term
    ///
    /// # Arguments
    /// * `doc_num` - N, must be > 0
    /// * `doc_freq` - documents containing the term
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / (doc_freq as f64 + 1.0)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf_vec(freq: &TermFrequency, vocab: &Vocabulary) -> Vec<f64> {
        freq.tf_vector(vocab)
    }

    fn idf_vec(doc_freq: &DocumentFrequency) -> Result<IDFVector> {
        let doc_num = doc_freq.doc_num();
        if doc_num == 0 {
            return Err(VectorizeError::EmptyCorpus);
        }
        let idf_vec = doc_freq
            .counts()
            .iter()
            .map(|&df| Self::idf_calc(doc_num, df))
            .collect();
        Ok(IDFVector { idf_vec, doc_num })
    }
}

/// IDF of every vocabulary term over a raw corpus
///
/// Each document is tokenized exactly once; the per-term presence test
/// runs against the cached token sets.
///
/// # Errors
/// * `EmptyCorpus` - `corpus` has no documents
/// * `ExternalService` - stopword or stemmer failure during tokenization
pub fn inverse_document_frequency<T>(
    tokenizer: &Tokenizer,
    corpus: &[T],
    vocab: &Vocabulary,
) -> Result<IDFVector>
where
    T: AsRef<str>,
{
    if corpus.is_empty() {
        return Err(VectorizeError::EmptyCorpus);
    }
    let tokenized = TokenizedCorpus::tokenize(tokenizer, corpus)?;
    DefaultTFIDFEngine::idf_vec(&tokenized.document_frequency(vocab))
}
