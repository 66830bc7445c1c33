pub mod app_state;
pub mod books;
pub mod catalog;
pub mod config;
pub mod content;
pub mod fetcher;
pub mod health;
pub mod render;
