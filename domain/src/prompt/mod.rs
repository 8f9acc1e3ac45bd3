//! Prompt domain
//!
//! Templates for the document question-answering prompt.

mod template;

pub use template::{NO_TASKS_SELECTED, PromptTemplate};
