use std::{env, fs, process::ExitCode, sync::Arc};

use ngram_tfidf::{SnowballStemmer, StopwordList, TFIDFVectorizer, VectorizerParams};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SAMPLE_CORPUS: [&str; 3] = [
    "the cat sat on the mat",
    "the dog sat on the log",
    "dogs and cats are great",
];

const DEFAULT_TOP_K: usize = 10;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

/// `name` parsed as usize, falling back to `default` when unset or malformed
fn env_usize(name: &str, default: usize) -> usize {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            error!(%name, %raw, "not a number, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn main() -> ExitCode {
    setup_logging();

    // one document per file argument, the sample corpus otherwise
    let paths: Vec<String> = env::args().skip(1).collect();
    let corpus: Vec<String> = if paths.is_empty() {
        SAMPLE_CORPUS.iter().map(|s| s.to_string()).collect()
    } else {
        let mut docs = Vec::with_capacity(paths.len());
        for path in &paths {
            match fs::read_to_string(path) {
                Ok(text) => docs.push(text),
                Err(e) => {
                    error!(%path, "failed to read document: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        docs
    };

    let params = VectorizerParams::new()
        .max_ngram(env_usize("TFIDF_MAX_NGRAM", VectorizerParams::default().max_ngram))
        .parallel(corpus.len() > 1);
    let top_k = env_usize("TFIDF_TOP_K", DEFAULT_TOP_K);

    let vectorizer: TFIDFVectorizer = match TFIDFVectorizer::new(
        params,
        Arc::new(StopwordList::english()),
        Arc::new(SnowballStemmer::english()),
    ) {
        Ok(v) => v,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let matrix = match vectorizer.fit_transform(&corpus) {
        Ok(m) => m,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        num_docs = matrix.doc_num(),
        vocab_size = matrix.vocab_size(),
        "TF-IDF computation completed"
    );

    for doc in 0..matrix.doc_num() {
        println!("\nDocument {} Top {} Terms:", doc + 1, top_k);
        print!("{}", matrix.top_terms(doc, top_k));
    }
    ExitCode::SUCCESS
}
