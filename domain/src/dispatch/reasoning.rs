//! Reasoning segment removal for local model output

/// Closing delimiter of the reasoning segment
pub const REASONING_CLOSE: &str = "</think>";

/// Keep only the answer after the last closing reasoning delimiter.
///
/// Output without a delimiter is returned trimmed but otherwise unchanged.
pub fn strip_reasoning(text: &str) -> String {
    match text.rfind(REASONING_CLOSE) {
        Some(pos) => text[pos + REASONING_CLOSE.len()..].trim().to_string(),
        None => text.trim().to_string(),
    }
}
