//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dispatch_prompt;
pub mod process_document;
pub mod process_folder;
pub mod question_catalog;

#[cfg(test)]
pub(crate) mod test_support;
