use std::sync::Arc;

use crate::catalog::{CatalogCache, ListingWalker};
use crate::config::Config;
use crate::content::ContentFetcher;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<CatalogCache>,
    pub content: Arc<ContentFetcher>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, url::ParseError> {
        let walker = ListingWalker::new(config.subject_url())?;
        Ok(Self {
            config,
            catalog: Arc::new(CatalogCache::new(Box::new(walker))),
            content: Arc::new(ContentFetcher::new()),
        })
    }
}
