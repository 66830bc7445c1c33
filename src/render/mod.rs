pub mod pdf;
pub mod sections;

pub use pdf::{render_document, PdfStyle, RenderError};
pub use sections::{build_sections, RenderedSection};
