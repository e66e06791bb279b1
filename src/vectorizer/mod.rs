pub mod analyzer;
pub mod corpus;
pub mod report;
pub mod term;
pub mod tfidf;
pub mod token;
pub mod vocab;

use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, VectorizeError};
use crate::utils::math::vector::{hadamard, l2_normalize_in_place};
use crate::vectorizer::{
    analyzer::{StopwordSet, WordStemmer},
    corpus::TokenizedCorpus,
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::Tokenizer,
    vocab::Vocabulary,
};

/// IDF values of one corpus, aligned with its vocabulary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IDFVector {
    /// IDF Vector, dense: every vocabulary term occurs somewhere in the corpus
    pub idf_vec: Vec<f64>,
    /// document count the values were computed for
    pub doc_num: u64,
}

impl IDFVector {
    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.idf_vec
    }
}

/// Vectorizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerParams {
    /// Inclusive upper n-gram bound, 1 means unigrams only
    pub max_ngram: usize,
    /// L2-normalize every output vector
    pub normalize: bool,
    /// Run per-document stages on the rayon pool
    pub parallel: bool,
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            max_ngram: 3,
            normalize: true,
            parallel: false,
        }
    }
}

impl VectorizerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_ngram == 0 {
            return Err(VectorizeError::InvalidParams(
                "max_ngram must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a vectorization run
///
/// `vectors[i]` is the TF-IDF vector of input document `i`; column `j` of
/// every vector is `vocabulary.term(j)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFIDFMatrix {
    pub vocabulary: Vocabulary,
    pub idf: IDFVector,
    pub vectors: Vec<Vec<f64>>,
}

impl TFIDFMatrix {
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// TF-IDF vector of the document at `doc`
    #[inline]
    pub fn vector(&self, doc: usize) -> Option<&[f64]> {
        self.vectors.get(doc).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.vectors.iter().map(Vec::as_slice)
    }

    /// Weight of `term` in document `doc`
    ///
    /// `None` if the document index is out of range or the term is not in
    /// the vocabulary.
    pub fn weight(&self, doc: usize, term: &str) -> Option<f64> {
        let idx = self.vocabulary.index_of(term)?;
        self.vector(doc).map(|v| v[idx])
    }
}

/// TF-IDF Vectorizer
///
/// Batch pipeline: tokenize every document once, build the vocabulary,
/// count document frequencies, derive IDF, then weight each document's TF
/// by IDF and optionally L2-normalize.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ngram_tfidf::{SnowballStemmer, StopwordList, TFIDFVectorizer, VectorizerParams};
///
/// let stopwords: StopwordList = ["the", "on", "and", "are"].into_iter().collect();
/// let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(
///     VectorizerParams::new().max_ngram(1),
///     Arc::new(stopwords),
///     Arc::new(SnowballStemmer::english()),
/// ).unwrap();
///
/// let matrix = vectorizer
///     .fit_transform(&["the cat sat on the mat", "the dog sat on the log"])
///     .unwrap();
/// assert_eq!(matrix.doc_num(), 2);
/// assert_eq!(matrix.vocab_size(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    params: VectorizerParams,
    tokenizer: Tokenizer,
    _marker: PhantomData<E>,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Create a new TFIDFVectorizer instance
    ///
    /// # Arguments
    /// * `params` - configuration, validated here
    /// * `stopwords` - stopword service, shared read-only
    /// * `stemmer` - stemmer service, shared read-only
    pub fn new(
        params: VectorizerParams,
        stopwords: Arc<dyn StopwordSet>,
        stemmer: Arc<dyn WordStemmer>,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            tokenizer: Tokenizer::new(stopwords, stemmer, params.max_ngram),
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    #[inline]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Vectorize a corpus
    ///
    /// # Errors
    /// * `EmptyCorpus` - `corpus` has no documents
    /// * `ExternalService` - stopword or stemmer failure
    pub fn fit_transform<T>(&self, corpus: &[T]) -> Result<TFIDFMatrix>
    where
        T: AsRef<str> + Sync,
    {
        debug!(
            num_docs = corpus.len(),
            max_ngram = self.params.max_ngram,
            parallel = self.params.parallel,
            "vectorizing corpus"
        );
        if corpus.is_empty() {
            return Err(VectorizeError::EmptyCorpus);
        }

        let tokenized = if self.params.parallel {
            TokenizedCorpus::par_tokenize(&self.tokenizer, corpus)?
        } else {
            TokenizedCorpus::tokenize(&self.tokenizer, corpus)?
        };

        // vocabulary and idf are complete before any TF work starts
        let vocabulary = tokenized.vocabulary();
        let doc_freq = if self.params.parallel {
            tokenized.par_document_frequency(&vocabulary)
        } else {
            tokenized.document_frequency(&vocabulary)
        };
        let idf = E::idf_vec(&doc_freq)?;
        debug!(vocab_size = vocabulary.len(), "computed idf");

        let vectors = self.weigh(&tokenized, &vocabulary, &idf);
        debug!(num_docs = vectors.len(), "computed tf-idf vectors");

        Ok(TFIDFMatrix {
            vocabulary,
            idf,
            vectors,
        })
    }

    fn weigh(&self, tokenized: &TokenizedCorpus, vocab: &Vocabulary, idf: &IDFVector) -> Vec<Vec<f64>> {
        let normalize = self.params.normalize;
        if self.params.parallel {
            tokenized
                .docs()
                .par_iter()
                .map(|tokens| tfidf_vec::<E>(tokens, vocab, idf, normalize))
                .collect()
        } else {
            tokenized
                .docs()
                .iter()
                .map(|tokens| tfidf_vec::<E>(tokens, vocab, idf, normalize))
                .collect()
        }
    }
}

/// TF-IDF of one tokenized document
fn tfidf_vec<E>(tokens: &[String], vocab: &Vocabulary, idf: &IDFVector, normalize: bool) -> Vec<f64>
where
    E: TFIDFEngine,
{
    debug_assert_eq!(vocab.len(), idf.len());
    let freq = TermFrequency::from(tokens);
    let mut vec = hadamard(&E::tf_vec(&freq, vocab), idf.as_slice());
    if normalize {
        l2_normalize_in_place(&mut vec);
    }
    trace!(num_tokens = tokens.len(), "weighted document");
    vec
}

/// TF-IDF vectors of a raw corpus against a prepared vocabulary and IDF
///
/// One vector per document, in corpus order, each `vocab.len()` long.
///
/// # Arguments
/// * `tokenizer` - the tokenizer the vocabulary was built with
/// * `corpus` - raw documents
/// * `vocab` - column layout
/// * `idf` - IDF values aligned with `vocab`
/// * `normalize` - L2-normalize every vector
pub fn compute_tfidf<T>(
    tokenizer: &Tokenizer,
    corpus: &[T],
    vocab: &Vocabulary,
    idf: &IDFVector,
    normalize: bool,
) -> Result<Vec<Vec<f64>>>
where
    T: AsRef<str>,
{
    if vocab.len() != idf.len() {
        return Err(VectorizeError::DimensionMismatch {
            vocab: vocab.len(),
            idf: idf.len(),
        });
    }
    corpus
        .iter()
        .map(|doc| {
            let tokens = tokenizer.tokenize(doc.as_ref())?;
            Ok(tfidf_vec::<DefaultTFIDFEngine>(&tokens, vocab, idf, normalize))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::vector::l2_norm;
    use crate::vectorizer::analyzer::{IdentityStemmer, SnowballStemmer, StopwordList};
    use crate::vectorizer::tfidf::inverse_document_frequency;

    const CORPUS: [&str; 3] = [
        "the cat sat on the mat",
        "the dog sat on the log",
        "dogs and cats are great",
    ];

    fn vectorizer(params: VectorizerParams) -> TFIDFVectorizer {
        let stopwords: StopwordList = ["the", "on", "and", "are"].into_iter().collect();
        TFIDFVectorizer::new(params, Arc::new(stopwords), Arc::new(SnowballStemmer::english())).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn worked_example_raw_weights() {
        let v = vectorizer(VectorizerParams::new().max_ngram(1).normalize(false));
        let m = v.fit_transform(&CORPUS).unwrap();
        let terms: Vec<&str> = m.vocabulary.iter().collect();
        assert_eq!(terms, vec!["cat", "dog", "great", "log", "mat", "sat"]);

        assert!(close(m.weight(0, "cat").unwrap(), 1.0 / 3.0));
        assert!(close(m.weight(0, "dog").unwrap(), 0.0));
        let rare = (1.0 / 3.0) * ((1.5_f64).ln() + 1.0);
        assert!(close(m.weight(0, "mat").unwrap(), rare));
        assert!(close(m.weight(2, "great").unwrap(), rare));
        assert!(close(m.weight(1, "sat").unwrap(), 1.0 / 3.0));
    }

    #[test]
    fn normalized_rows_have_unit_length() {
        let v = vectorizer(VectorizerParams::new());
        let m = v.fit_transform(&CORPUS).unwrap();
        assert_eq!(m.doc_num(), CORPUS.len());
        for row in m.rows() {
            assert_eq!(row.len(), m.vocab_size());
            assert!(close(l2_norm(row), 1.0));
        }
    }

    #[test]
    fn empty_document_row_is_zero() {
        let v = vectorizer(VectorizerParams::new());
        let m = v.fit_transform(&["cats sat", "the on and", "dogs ran"]).unwrap();
        assert!(m.vector(1).unwrap().iter().all(|&x| x == 0.0));
        assert_eq!(m.vector(1).unwrap().len(), m.vocab_size());
    }

    #[test]
    fn corpus_without_tokens_gives_zero_length_rows() {
        let v = vectorizer(VectorizerParams::new());
        let m = v.fit_transform(&["the", "a on"]).unwrap();
        assert_eq!(m.vocab_size(), 0);
        assert_eq!(m.doc_num(), 2);
        assert!(m.rows().all(|r| r.is_empty()));
    }

    #[test]
    fn empty_corpus_fails_fast() {
        let v = vectorizer(VectorizerParams::new());
        let err = v.fit_transform::<&str>(&[]).unwrap_err();
        assert!(matches!(err, VectorizeError::EmptyCorpus));
    }

    #[test]
    fn zero_max_ngram_is_rejected() {
        let params = VectorizerParams::new().max_ngram(0);
        let err = TFIDFVectorizer::<DefaultTFIDFEngine>::new(
            params,
            Arc::new(StopwordList::new()),
            Arc::new(IdentityStemmer),
        )
        .unwrap_err();
        assert!(matches!(err, VectorizeError::InvalidParams(_)));
    }

    #[test]
    fn parallel_matches_sequential() {
        let docs: Vec<String> = (0..64)
            .map(|i| format!("doc {i} shares words with doc {} about topic{}", i + 1, i % 5))
            .collect();
        let seq = vectorizer(VectorizerParams::new()).fit_transform(&docs).unwrap();
        let par = vectorizer(VectorizerParams::new().parallel(true))
            .fit_transform(&docs)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn output_order_follows_input_order() {
        let v = vectorizer(VectorizerParams::new().max_ngram(1));
        let forward = v.fit_transform(&CORPUS).unwrap();
        let mut reversed = CORPUS;
        reversed.reverse();
        let backward = v.fit_transform(&reversed).unwrap();
        assert_eq!(forward.vocabulary, backward.vocabulary);
        for i in 0..CORPUS.len() {
            assert_eq!(forward.vectors[i], backward.vectors[CORPUS.len() - 1 - i]);
        }
    }

    #[test]
    fn step_by_step_functions_agree_with_pipeline() {
        let v = vectorizer(VectorizerParams::new().max_ngram(2));
        let t = v.tokenizer();
        let vocab = Vocabulary::build(t, &CORPUS).unwrap();
        let idf = inverse_document_frequency(t, &CORPUS, &vocab).unwrap();
        let vectors = compute_tfidf(t, &CORPUS, &vocab, &idf, true).unwrap();

        let m = v.fit_transform(&CORPUS).unwrap();
        assert_eq!(m.vocabulary, vocab);
        assert_eq!(m.idf, idf);
        assert_eq!(m.vectors, vectors);
    }

    #[test]
    fn mismatched_idf_is_rejected() {
        let v = vectorizer(VectorizerParams::new().max_ngram(1));
        let vocab = Vocabulary::build(v.tokenizer(), &CORPUS).unwrap();
        let idf = IDFVector {
            idf_vec: vec![1.0],
            doc_num: 3,
        };
        let err = compute_tfidf(v.tokenizer(), &CORPUS, &vocab, &idf, false).unwrap_err();
        assert!(matches!(err, VectorizeError::DimensionMismatch { vocab: 6, idf: 1 }));
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: VectorizerParams = serde_json::from_str(r#"{"max_ngram": 2}"#).unwrap();
        assert_eq!(params, VectorizerParams::new().max_ngram(2));
    }
}
