use serde::Serialize;

/// Sentinel author shown when the listing entry carries no subtitle.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Sentinel download count. A string on purpose: the listing either shows a
/// thousands-separated figure or nothing, and callers must not assume a
/// numeric type.
pub const DOWNLOADS_UNAVAILABLE: &str = "N/A";

/// Placeholder per-book word estimate. Every record carries this constant
/// regardless of actual length, which makes the 10,000-word selection budget
/// effectively a two-book cap. Kept as-is until real measurement lands.
pub const DEFAULT_WORD_ESTIMATE: u64 = 5000;

/// One catalog entry scraped from the subject listing. Immutable after
/// parsing; the whole set is replaced on every cache refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub download_count: String,
    pub url: String,
    pub estimated_words: u64,
}
