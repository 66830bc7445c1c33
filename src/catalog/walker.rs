use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use crate::catalog::cache::CatalogSource;
use crate::catalog::parser::parse_listing;
use crate::catalog::record::BookRecord;
use crate::fetcher::{fetch_listing, FetchError};

/// The remote listing paginates in units of 25 entries.
pub const PAGE_SIZE: usize = 25;

/// Pause between listing requests to avoid hammering the remote source.
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Walks the paginated subject listing and aggregates every book entry.
pub struct ListingWalker {
    subject_url: Url,
}

impl ListingWalker {
    pub fn new(subject_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            subject_url: Url::parse(subject_url)?,
        })
    }
}

#[async_trait]
impl CatalogSource for ListingWalker {
    /// Fetch the complete listing, page by page. All-or-nothing: any
    /// network failure aborts the walk and no partial result escapes.
    #[instrument(skip(self), fields(subject_url = %self.subject_url))]
    async fn fetch_all(&self) -> Result<Vec<BookRecord>, FetchError> {
        let mut books = Vec::new();
        let mut page: usize = 1;

        loop {
            let offset = (page - 1) * PAGE_SIZE;
            let url = format!("{}?start_index={}", self.subject_url, offset);
            let html = fetch_listing(&url).await?;

            let listing = parse_listing(&html, &self.subject_url);
            debug!(
                page,
                entries = listing.entry_count,
                records = listing.books.len(),
                "parsed listing page"
            );

            if listing.entry_count == 0 {
                break;
            }
            books.extend(listing.books);

            if !listing.has_next {
                break;
            }

            page += 1;
            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(books)
    }
}
