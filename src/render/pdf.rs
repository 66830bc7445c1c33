//! Document rendering backend.
//!
//! The service hands the renderer an ordered list of per-book sections and a
//! style; the renderer owns layout, in-document pagination, and separators.
//! Sections are serialized to deliberately simple HTML (headings and
//! paragraphs only) and rendered with `printpdf`.

use std::collections::BTreeMap;

use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::render::sections::RenderedSection;

const DOCUMENT_TITLE: &str = "Folio Compilation";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

/// Style knobs the configuration exposes to the renderer.
#[derive(Debug, Clone)]
pub struct PdfStyle {
    pub font_name: String,
    pub font_color: String,
}

impl PdfStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            font_name: config.font().to_string(),
            font_color: config.font_color().to_string(),
        }
    }
}

/// Render the assembled sections into a single PDF document. This is the
/// one failure in the pipeline that propagates to the caller.
pub fn render_document(
    sections: &[RenderedSection],
    style: &PdfStyle,
) -> Result<Vec<u8>, RenderError> {
    let html = sections_to_html(sections, style);
    let mut warnings = Vec::new();

    let doc = PdfDocument::from_html(
        &html,
        &BTreeMap::new(), // images
        &BTreeMap::new(), // fonts
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| RenderError::Pdf(format!("{e}")))?;

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    if !warnings.is_empty() {
        debug!(count = warnings.len(), "pdf generation produced warnings");
    }

    Ok(bytes)
}

/// Serialize sections into minimal HTML: a heading pair per book, body
/// paragraphs, and a horizontal rule separating consecutive books.
fn sections_to_html(sections: &[RenderedSection], style: &PdfStyle) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><style>");
    html.push_str(&format!(
        "body {{ font-family: '{}'; color: {}; }}",
        escape_html(&style.font_name),
        escape_html(&style.font_color)
    ));
    html.push_str("</style></head><body>");

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            html.push_str("<hr>");
        }
        html.push_str(&format!("<h1>{}</h1>", escape_html(&section.title)));
        if !section.author.is_empty() {
            html.push_str(&format!("<h2>by {}</h2>", escape_html(&section.author)));
        }
        for para in &section.body_paragraphs {
            html.push_str(&format!("<p>{}</p>", escape_html(para)));
        }
    }

    html.push_str("</body></html>");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
