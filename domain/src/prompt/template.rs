//! Prompt templates for document analysis

/// Explicit empty-state text used when no questions are selected
pub const NO_TASKS_SELECTED: &str =
    "No tasks selected. Do not invent questions; reply only that no tasks were selected.";

/// Templates for generating prompts sent to the models
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the local runtime's chat request
    pub fn analysis_system() -> &'static str {
        r#"You are a careful document analyst.
You answer questions strictly from the document you are given.
You never use outside knowledge and you never guess."#
    }

    /// Build the task prompt for one document.
    ///
    /// The extracted text is embedded verbatim, followed by the selected
    /// questions numbered from 1 in the caller's order.
    pub fn task_prompt(document_text: &str, questions: &[String]) -> String {
        let mut prompt = format!(
            r#"Below is the full text of a document.

=== DOCUMENT START ===
{}
=== DOCUMENT END ===

"#,
            document_text
        );

        if questions.is_empty() {
            prompt.push_str("Tasks:\n");
            prompt.push_str(NO_TASKS_SELECTED);
            prompt.push('\n');
            return prompt;
        }

        prompt.push_str("Tasks:\n");
        for (index, question) in questions.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", index + 1, question));
        }

        prompt.push_str(
            r#"
Instructions:
- Answer every task above, in order, using the same numbering.
- Use only the document text above as your source.
- If a task cannot be answered from the document, say explicitly "Not answerable from the document." for that item.
- Keep each answer concise and factual."#,
        );

        prompt
    }
}
