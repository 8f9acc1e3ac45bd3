//! Question catalog use case
//!
//! Routes catalog operations to the store of the chosen provider family and
//! resolves operator selections into prompt-ready question texts.

use crate::ports::question_repository::{QuestionRepository, RepositoryError};
use casequery_domain::{ProviderFamily, Question};
use std::sync::Arc;
use tracing::info;

pub struct QuestionCatalog {
    gemini: Arc<dyn QuestionRepository>,
    deepseek: Arc<dyn QuestionRepository>,
}

impl QuestionCatalog {
    pub fn new(gemini: Arc<dyn QuestionRepository>, deepseek: Arc<dyn QuestionRepository>) -> Self {
        Self { gemini, deepseek }
    }

    pub fn repository(&self, family: ProviderFamily) -> &dyn QuestionRepository {
        match family {
            ProviderFamily::Gemini => self.gemini.as_ref(),
            ProviderFamily::DeepSeek => self.deepseek.as_ref(),
        }
    }

    pub fn list(&self, family: ProviderFamily) -> Result<Vec<Question>, RepositoryError> {
        self.repository(family).list()
    }

    pub fn add(&self, family: ProviderFamily, text: &str) -> Result<Question, RepositoryError> {
        let question = self.repository(family).add(text)?;
        info!("Added {} to the {} catalog", question.external_id, family);
        Ok(question)
    }

    pub fn update(
        &self,
        family: ProviderFamily,
        id: u32,
        text: &str,
    ) -> Result<Question, RepositoryError> {
        let question = self.repository(family).update(id, text)?;
        info!("Updated {} in the {} catalog", question.external_id, family);
        Ok(question)
    }

    pub fn delete(&self, family: ProviderFamily, id: u32) -> Result<(), RepositoryError> {
        self.repository(family).delete(id)?;
        info!("Deleted question {} from the {} catalog", id, family);
        Ok(())
    }

    /// Texts of the selected questions, in the order the ids were given.
    ///
    /// Unknown ids are rejected rather than silently dropped.
    pub fn select(&self, family: ProviderFamily, ids: &[u32]) -> Result<Vec<String>, RepositoryError> {
        let questions = self.list(family)?;
        ids.iter()
            .map(|id| {
                questions
                    .iter()
                    .find(|q| q.id == *id)
                    .map(|q| q.text.clone())
                    .ok_or(RepositoryError::NotFound { family, id: *id })
            })
            .collect()
    }

    /// Every question of the family, in catalog order
    pub fn select_all(&self, family: ProviderFamily) -> Result<Vec<String>, RepositoryError> {
        Ok(self.list(family)?.into_iter().map(|q| q.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MemoryQuestions;
    use casequery_domain::is_densely_numbered;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(
            Arc::new(MemoryQuestions::new(ProviderFamily::Gemini, &["Who?", "When?", "Where?"])),
            Arc::new(MemoryQuestions::new(ProviderFamily::DeepSeek, &["Why?"])),
        )
    }

    #[test]
    fn test_families_are_independent() {
        let catalog = catalog();
        catalog.add(ProviderFamily::DeepSeek, "How?").unwrap();

        assert_eq!(catalog.list(ProviderFamily::Gemini).unwrap().len(), 3);
        assert_eq!(catalog.list(ProviderFamily::DeepSeek).unwrap().len(), 2);
    }

    #[test]
    fn test_select_keeps_caller_order() {
        let selected = catalog().select(ProviderFamily::Gemini, &[3, 1]).unwrap();
        assert_eq!(selected, vec!["Where?", "Who?"]);
    }

    #[test]
    fn test_select_rejects_unknown_id() {
        let err = catalog().select(ProviderFamily::Gemini, &[1, 9]).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::NotFound {
                family: ProviderFamily::Gemini,
                id: 9
            }
        );
    }

    #[test]
    fn test_delete_renumbers() {
        let catalog = catalog();
        catalog.delete(ProviderFamily::Gemini, 2).unwrap();

        let questions = catalog.list(ProviderFamily::Gemini).unwrap();
        assert!(is_densely_numbered(&questions));
        assert_eq!(questions[1].text, "Where?");
        assert_eq!(questions[1].external_id, "Q_2");
    }

    #[test]
    fn test_select_all() {
        assert_eq!(
            catalog().select_all(ProviderFamily::DeepSeek).unwrap(),
            vec!["Why?"]
        );
    }
}
