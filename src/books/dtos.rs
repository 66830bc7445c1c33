use serde::{Deserialize, Serialize};

use crate::books::service::ValidSelection;
use crate::catalog::record::BookRecord;

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<BookRecord>,
    pub current_page: i64,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub selected_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_words: Option<u64>,
}

impl ValidationResponse {
    pub fn valid(selection: ValidSelection) -> Self {
        Self {
            valid: true,
            reason: None,
            book_count: Some(selection.book_count),
            estimated_words: Some(selection.estimated_words),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            book_count: None,
            estimated_words: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub selected_ids: Vec<String>,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "folio_books.pdf".to_string()
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
