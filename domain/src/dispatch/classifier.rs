//! Provider failure classifier
//!
//! Remote providers only give us error text, so quota and rate-limit
//! failures are recognized by vocabulary. Keep every marker here.

/// Lower-case markers of a quota/rate-limit failure
pub const RETRYABLE_MARKERS: [&str; 8] = [
    "quota",
    "rate limit",
    "rate-limit",
    "rate_limit",
    "ratelimit",
    "resource_exhausted",
    "resource has been exhausted",
    "too many requests",
];

/// How the dispatcher reacts to a failed remote attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Model-specific and transient: advance to the next model
    Retryable,
    /// Affects every remote model: abort the dispatch
    Fatal,
}

impl FailureClass {
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureClass::Retryable)
    }
}

/// Classify a raw provider error message (case-insensitive substring match)
pub fn classify_failure(message: &str) -> FailureClass {
    let lowered = message.to_lowercase();
    if RETRYABLE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        FailureClass::Retryable
    } else {
        FailureClass::Fatal
    }
}
