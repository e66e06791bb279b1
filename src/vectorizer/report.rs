use std::fmt;

use crate::vectorizer::TFIDFMatrix;

/// Highest-weighted terms of one document
#[derive(Debug, Clone, PartialEq)]
pub struct TopTerms<'a> {
    /// (term, weight), descending by weight
    pub list: Vec<(&'a str, f64)>,
}

impl fmt::Display for TopTerms<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (term, score) in &self.list {
            writeln!(f, "  {term:15}: {score:.4}")?;
        }
        Ok(())
    }
}

impl TFIDFMatrix {
    /// The `k` highest-weighted terms of document `doc`
    ///
    /// Ties keep vocabulary order. An out-of-range document gives an empty
    /// list.
    pub fn top_terms(&self, doc: usize, k: usize) -> TopTerms<'_> {
        let Some(row) = self.vector(doc) else {
            return TopTerms { list: Vec::new() };
        };
        let mut list: Vec<(&str, f64)> = self
            .vocabulary
            .iter()
            .zip(row.iter().copied())
            .collect();
        // stable: equal weights stay in vocabulary order
        list.sort_by(|a, b| b.1.total_cmp(&a.1));
        list.truncate(k);
        TopTerms { list }
    }
}
