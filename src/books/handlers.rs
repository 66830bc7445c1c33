use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::{
    app_state::AppState,
    books::{
        dtos::{
            BookListResponse, ErrorResponse, GenerateRequest, ListBooksQuery, SelectionRequest,
            ValidationResponse,
        },
        service::{self, DEFAULT_PER_PAGE},
    },
    render::{build_sections, render_document, PdfStyle},
};

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Json<BookListResponse> {
    let records = state.catalog.get_or_refresh().await;
    let page = service::paginate(&records, query.page, DEFAULT_PER_PAGE);

    Json(BookListResponse {
        books: page.books,
        current_page: query.page,
        total_pages: page.total_pages,
        has_next: page.has_next,
        has_prev: page.has_prev,
    })
}

pub async fn validate_selection(
    State(state): State<AppState>,
    Json(payload): Json<SelectionRequest>,
) -> Json<ValidationResponse> {
    let records = state.catalog.get_or_refresh().await;

    match service::validate_selection(&records, &payload.selected_ids) {
        Ok(selection) => Json(ValidationResponse::valid(selection)),
        Err(err) => Json(ValidationResponse::invalid(err.to_string())),
    }
}

pub async fn generate_pdf(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Response {
    if payload.selected_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No books selected".to_string(),
            }),
        )
            .into_response();
    }

    let records = state.catalog.get_or_refresh().await;
    let sections = build_sections(&records, &state.content, &payload.selected_ids).await;
    let style = PdfStyle::from_config(&state.config);

    match render_document(&sections, &style) {
        Ok(bytes) => {
            let filename = sanitize_filename(&payload.filename);
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            error!(%err, "pdf generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate PDF".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Restrict the user-supplied download name to characters that are safe in a
/// Content-Disposition header.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "folio_books.pdf".to_string()
    } else {
        cleaned
    }
}
