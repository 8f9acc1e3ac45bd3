//! HTML and plain-text extraction
//!
//! HTML: `<script>`/`<style>` subtrees are dropped, the remaining text
//! nodes are joined and every whitespace run becomes one space.
//! Plain text: UTF-8, retried as Windows-1252 (a Latin-1 superset) when the
//! bytes are not valid UTF-8.

use casequery_application::ports::content_extractor::{ContentExtractor, ExtractionError};
use casequery_domain::{DocumentKind, collapse_whitespace};
use encoding_rs::WINDOWS_1252;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 2] = ["script", "style"];

/// [`ContentExtractor`] for `.htm`/`.html`/`.txt` documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor;

impl ContentExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
        let text = decode_text(bytes);
        Ok(match kind {
            DocumentKind::Html => html_to_text(&text),
            DocumentKind::PlainText => text,
        })
    }
}

/// Decode as UTF-8, falling back to Windows-1252. Never fails.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Extract readable text from HTML
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts = Vec::new();
    collect_text(document.root_element(), &mut parts);

    collapse_whitespace(&parts.join(" "))
}

fn collect_text(element: ElementRef, parts: &mut Vec<String>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => parts.push(text.to_string()),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}
