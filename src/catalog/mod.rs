pub mod cache;
pub mod parser;
pub mod record;
pub mod walker;

pub use cache::{CatalogCache, CatalogSource, CATALOG_TTL};
pub use record::{BookRecord, DEFAULT_WORD_ESTIMATE, UNKNOWN_AUTHOR};
pub use walker::ListingWalker;
