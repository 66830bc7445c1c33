use crate::fetcher::errors::FetchError;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;

/// Per-request ceilings: listing pages are small HTML documents, full book
/// texts can run to several megabytes on slow mirrors.
const LISTING_TIMEOUT: Duration = Duration::from_secs(10);
const TEXT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (FolioBot; public-domain book compiler)";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch one HTML listing page. Non-2xx statuses are errors.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_listing(url: &str) -> Result<String, FetchError> {
    fetch_with_timeout(url, LISTING_TIMEOUT).await
}

/// Fetch a plain-text book body. Longer timeout than listing pages.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    fetch_with_timeout(url, TEXT_TIMEOUT).await
}

async fn fetch_with_timeout(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))
}
