//! This crate turns a batch of raw text documents into TF-IDF vectors,
//! with n-gram tokenization, stemming and stopword filtering.
pub mod error;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// The top-level struct of this crate.
/// It runs the whole batch pipeline over an in-memory corpus:
/// - tokenize every document once (stopwords, length filter, stemming, n-grams)
/// - build the sorted vocabulary
/// - count document frequencies and derive IDF
/// - weight each document's TF by IDF, optionally L2-normalized
///
/// `TFIDFVectorizer<E>` is generic over the TF-IDF calculation engine `E`
/// (`DefaultTFIDFEngine` unless stated otherwise).
///
/// The result is a `TFIDFMatrix`: one dense vector per document, in corpus
/// order, plus the vocabulary labelling the columns and the IDF vector.
pub use vectorizer::{TFIDFMatrix, TFIDFVectorizer, VectorizerParams, IDFVector};

/// Step-by-step pipeline functions
/// For callers who want to hold on to intermediate values:
/// `Vocabulary::build`, `term_frequency`, `inverse_document_frequency`,
/// `compute_tfidf` and `l2_normalize`.
pub use vectorizer::compute_tfidf;
pub use vectorizer::term::term_frequency;
pub use vectorizer::tfidf::inverse_document_frequency;
pub use utils::math::vector::l2_normalize;

/// Normalizer / Tokenizer
/// Case-folds text, extracts word runs, drops stopwords and single-character
/// words, stems, then appends contiguous n-grams joined with `_`.
pub use vectorizer::token::Tokenizer;

/// Vocabulary
/// Sorted, de-duplicated term set. It is both the column order of every
/// vector and the term -> index map used to fill them.
pub use vectorizer::vocab::Vocabulary;

/// Term Frequency structure
/// Counts token occurrences within one document, used as base data for TF.
pub use vectorizer::term::TermFrequency;

/// Tokenized corpus and per-term document frequency
/// Documents are tokenized once and reused by every later stage.
pub use vectorizer::corpus::{DocumentFrequency, TokenizedCorpus};

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug a different weighting scheme
/// into `TFIDFVectorizer<E>`.
/// `DefaultTFIDFEngine` computes `tf = count / total` and
/// `idf = ln(N / (df + 1)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// External services
/// Stopword lookup and stemming are injected into the tokenizer.
/// Defaults are provided on top of the `stop-words` and `rust-stemmers` crates.
pub use vectorizer::analyzer::{IdentityStemmer, SnowballStemmer, StopwordList, StopwordSet, WordStemmer};

/// Top-k term report for one document
pub use vectorizer::report::TopTerms;

pub use error::{Result, ServiceError, VectorizeError};
