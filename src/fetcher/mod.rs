pub mod client;
pub mod errors;

pub use client::{fetch_listing, fetch_text};
pub use errors::FetchError;
