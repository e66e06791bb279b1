use thiserror::Error;

/// Error returned by an external stopword or stemmer service
pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the vectorization pipeline
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// IDF needs at least one document: `ln(0 / (df + 1))` is undefined
    #[error("corpus is empty, IDF is undefined for zero documents")]
    EmptyCorpus,

    /// A stopword or stemmer service failed; the cause is passed through untouched
    #[error("external {service} service failed: {source}")]
    ExternalService {
        service: &'static str,
        #[source]
        source: ServiceError,
    },

    /// IDF vector built against a different vocabulary
    #[error("idf has {idf} entries but vocabulary has {vocab}")]
    DimensionMismatch { vocab: usize, idf: usize },

    #[error("invalid vectorizer parameters: {0}")]
    InvalidParams(String),
}

impl VectorizeError {
    pub(crate) fn stopwords(source: ServiceError) -> Self {
        VectorizeError::ExternalService { service: "stopword", source }
    }

    pub(crate) fn stemmer(source: ServiceError) -> Self {
        VectorizeError::ExternalService { service: "stemmer", source }
    }
}

pub type Result<T> = std::result::Result<T, VectorizeError>;
