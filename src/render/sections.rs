use crate::catalog::record::BookRecord;
use crate::content::ContentFetcher;

/// Fallback body paragraph when a book's text cannot be retrieved or the
/// normalizer extracted nothing.
const CONTENT_UNAVAILABLE: &str = "Content unavailable";

/// Rendering-ready content for one selected book. Built per generation
/// request and discarded afterwards, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub author: String,
    pub body_paragraphs: Vec<String>,
}

/// Assemble one section per selected id: metadata from the cached catalog,
/// body from the content fetcher. Failures degrade to placeholder sections
/// rather than aborting the whole document.
pub async fn build_sections(
    records: &[BookRecord],
    content: &ContentFetcher,
    ids: &[String],
) -> Vec<RenderedSection> {
    let mut sections = Vec::with_capacity(ids.len());

    for id in ids {
        let Some(record) = records.iter().find(|record| record.id == *id) else {
            sections.push(RenderedSection {
                title: format!("Error: Book {id} not found"),
                author: String::new(),
                body_paragraphs: Vec::new(),
            });
            continue;
        };

        let body_paragraphs = match content.get_content(id).await {
            Ok(body) if !body.trim().is_empty() => split_paragraphs(&body),
            _ => vec![CONTENT_UNAVAILABLE.to_string()],
        };

        sections.push(RenderedSection {
            title: record.title.clone(),
            author: record.author.clone(),
            body_paragraphs,
        });
    }

    sections
}

/// Split normalized text on blank lines; newlines inside a paragraph become
/// spaces so the renderer reflows them.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|para| para.replace('\n', " ").trim().to_string())
        .filter(|para| !para.is_empty())
        .collect()
}
