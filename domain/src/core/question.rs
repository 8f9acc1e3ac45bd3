//! Question entity and catalog renumbering

use serde::{Deserialize, Serialize};

/// Prefix for synthesized external ids
pub const EXTERNAL_ID_PREFIX: &str = "Q_";

/// One persisted analysis question (Entity)
///
/// `id` is dense, 1-based and contiguous within its catalog;
/// `external_id` is always `Q_<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub external_id: String,
    pub text: String,
}

impl Question {
    /// Create a question with a synthesized external id
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            external_id: external_id_for(id),
            text: text.into(),
        }
    }

    /// Validate question text, returning the trimmed content
    pub fn validate_text(text: &str) -> Option<&str> {
        let trimmed = text.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

/// External id for a catalog position
pub fn external_id_for(id: u32) -> String {
    format!("{}{}", EXTERNAL_ID_PREFIX, id)
}

/// Reassign ids `1..=n` in the current order and regenerate external ids.
///
/// Callers sort by the old id first; relative order is preserved.
pub fn renumber(questions: &mut [Question]) {
    for (index, question) in questions.iter_mut().enumerate() {
        let id = index as u32 + 1;
        question.id = id;
        question.external_id = external_id_for(id);
    }
}

/// Check the dense/contiguous invariant
pub fn is_densely_numbered(questions: &[Question]) -> bool {
    questions
        .iter()
        .enumerate()
        .all(|(i, q)| q.id == i as u32 + 1 && q.external_id == external_id_for(q.id))
}
