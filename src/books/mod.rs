pub mod dtos;
pub mod handlers;
pub mod service;

pub use service::{paginate, validate_selection, CatalogPage, SelectionError, ValidSelection};
