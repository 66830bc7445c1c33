pub mod normalizer;

pub use normalizer::normalize;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::fetcher::fetch_text;

/// Default host serving the plain-text corpus.
pub const DEFAULT_TEXT_BASE: &str = "https://www.gutenberg.org";

#[derive(Error, Debug)]
pub enum ContentError {
    /// Every candidate location failed. The Display text doubles as the
    /// legacy error sentinel consumers of the old interface expect.
    #[error("Error: Could not fetch content for book ID {book_id}")]
    AllCandidatesFailed { book_id: String },
}

/// The three filename conventions the corpus has used over its history, in
/// the order they are worth trying.
pub fn candidate_urls(base: &str, book_id: &str) -> [String; 3] {
    [
        format!("{base}/files/{book_id}/{book_id}-0.txt"),
        format!("{base}/files/{book_id}/{book_id}.txt"),
        format!("{base}/cache/epub/{book_id}/pg{book_id}.txt"),
    ]
}

/// Retrieves and normalizes plain-text book bodies.
pub struct ContentFetcher {
    base_url: String,
}

impl ContentFetcher {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_TEXT_BASE)
    }

    /// Point at an alternate host. Used by tests against a local fake.
    pub fn with_base(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Try each candidate location in order and return the first body that
    /// fetches successfully, normalized. Per-candidate failures are silent;
    /// only total exhaustion is an error.
    #[instrument(skip(self))]
    pub async fn get_content(&self, book_id: &str) -> Result<String, ContentError> {
        for url in candidate_urls(&self.base_url, book_id) {
            match fetch_text(&url).await {
                Ok(body) => return Ok(normalize(&body)),
                Err(err) => {
                    debug!(%url, %err, "candidate failed, trying next");
                }
            }
        }

        Err(ContentError::AllCandidatesFailed {
            book_id: book_id.to_string(),
        })
    }
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_follow_historical_conventions_in_order() {
        let urls = candidate_urls("https://www.gutenberg.org", "1342");
        assert_eq!(
            urls,
            [
                "https://www.gutenberg.org/files/1342/1342-0.txt",
                "https://www.gutenberg.org/files/1342/1342.txt",
                "https://www.gutenberg.org/cache/epub/1342/pg1342.txt",
            ]
        );
    }

    #[test]
    fn exhaustion_error_embeds_the_book_id() {
        let err = ContentError::AllCandidatesFailed {
            book_id: "84".to_string(),
        };
        assert_eq!(err.to_string(), "Error: Could not fetch content for book ID 84");
    }
}
