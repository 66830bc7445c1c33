use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::catalog::record::{BookRecord, DEFAULT_WORD_ESTIMATE, DOWNLOADS_UNAVAILABLE, UNKNOWN_AUTHOR};

static EBOOK_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/ebooks/(\d+)").unwrap());

static BY_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^by\s+").unwrap());

static DOWNLOADS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:,\d+)*)\s+downloads").unwrap());

/// One parsed listing page: the records it contained, how many structural
/// book entries the page carried before id filtering, and whether the page
/// links onward to a further page.
#[derive(Debug)]
pub struct ListingPage {
    pub books: Vec<BookRecord>,
    pub entry_count: usize,
    pub has_next: bool,
}

/// Parse a subject-listing page. Entries that cannot be resolved to a
/// numeric ebook id are skipped from the records, but still count as
/// entries: the end of the listing is a page with no `booklink` elements at
/// all, not a page where every entry happened to be unparseable.
pub fn parse_listing(html: &str, base_url: &Url) -> ListingPage {
    let document = Html::parse_document(html);

    let entry_selector = Selector::parse("li.booklink").expect("valid selector");
    let entries: Vec<ElementRef<'_>> = document.select(&entry_selector).collect();
    let entry_count = entries.len();
    let books = entries
        .into_iter()
        .filter_map(|entry| parse_book_entry(entry, base_url))
        .collect();

    ListingPage {
        books,
        entry_count,
        has_next: has_next_link(&document),
    }
}

fn parse_book_entry(entry: ElementRef<'_>, base_url: &Url) -> Option<BookRecord> {
    let link_selector = Selector::parse("a.link").expect("valid selector");
    let title_link = entry.select(&link_selector).next()?;

    let title = collect_text(title_link);
    let href = title_link.value().attr("href")?;
    let book_url = base_url.join(href).ok()?;

    let id = EBOOK_ID_REGEX
        .captures(book_url.as_str())
        .map(|caps| caps[1].to_string())?;

    let subtitle_selector = Selector::parse("span.subtitle").expect("valid selector");
    let author = entry
        .select(&subtitle_selector)
        .next()
        .map(|span| BY_PREFIX_REGEX.replace(&collect_text(span), "").into_owned())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let extra_selector = Selector::parse("span.extra").expect("valid selector");
    let download_count = entry
        .select(&extra_selector)
        .next()
        .map(|span| collect_text(span))
        .filter(|text| text.to_lowercase().contains("downloads"))
        .and_then(|text| {
            DOWNLOADS_REGEX
                .captures(&text)
                .map(|caps| caps[1].to_string())
        })
        .unwrap_or_else(|| DOWNLOADS_UNAVAILABLE.to_string());

    Some(BookRecord {
        id,
        title,
        author,
        download_count,
        url: book_url.into(),
        estimated_words: DEFAULT_WORD_ESTIMATE,
    })
}

/// The remote listing marks further pages with an anchor whose visible text
/// is exactly "Next".
fn has_next_link(document: &Html) -> bool {
    let anchor_selector = Selector::parse("a").expect("valid selector");
    document
        .select(&anchor_selector)
        .any(|a| collect_text(a) == "Next")
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
