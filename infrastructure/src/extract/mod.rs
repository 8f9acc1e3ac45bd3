//! Document text extraction

mod html;

pub use html::{DocumentTextExtractor, decode_text, html_to_text};
