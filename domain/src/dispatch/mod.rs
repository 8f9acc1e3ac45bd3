//! Dispatch rules: failure classification, attempts and results
//!
//! The dispatcher itself lives in the application layer; this module holds
//! the pure pieces it relies on so they can be tested with canned inputs.

pub mod classifier;
pub mod reasoning;
pub mod value_objects;

pub use classifier::{FailureClass, RETRYABLE_MARKERS, classify_failure};
pub use reasoning::{REASONING_CLOSE, strip_reasoning};
pub use value_objects::{AttemptOutcome, DispatchAttempt, DispatchResult};
