//! Strips publisher boilerplate from raw book text.
//!
//! Gutenberg plain-text files wrap the narrative in a licensing header and
//! footer delimited by marker lines. Marker phrasing drifted over the years,
//! so each side carries an ordered list of known near-duplicates; the first
//! marker found wins. Matching is literal substring search, never regex.

/// Header markers, in priority order.
const START_MARKERS: [&str; 3] = [
    "*** START OF THE PROJECT GUTENBERG",
    "*** START OF THIS PROJECT GUTENBERG",
    "***START OF THE PROJECT GUTENBERG",
];

/// Footer markers, in priority order.
const END_MARKERS: [&str; 3] = [
    "*** END OF THE PROJECT GUTENBERG",
    "*** END OF THIS PROJECT GUTENBERG",
    "End of the Project Gutenberg",
];

/// Remove the boilerplate header and footer. Never fails: with no marker
/// match the input comes back unchanged apart from edge trimming. An empty
/// result is valid output and means no content was extracted.
pub fn normalize(raw_text: &str) -> String {
    let text = strip_header(raw_text);
    let text = strip_footer(text);
    text.trim().to_string()
}

/// Drop everything up to and including the first matching start-marker line.
/// A marker with no terminating newline leaves the text untouched.
fn strip_header(text: &str) -> &str {
    for marker in START_MARKERS {
        if let Some(pos) = text.find(marker) {
            let after_marker = &text[pos + marker.len()..];
            if let Some(line_end) = after_marker.find('\n') {
                return &after_marker[line_end + 1..];
            }
            break;
        }
    }
    text
}

/// Drop everything at and after the first matching end marker.
fn strip_footer(text: &str) -> &str {
    for marker in END_MARKERS {
        if let Some(pos) = text.find(marker) {
            return &text[..pos];
        }
    }
    text
}
