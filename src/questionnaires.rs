//! Questionnaire persistence.

use tracing::info;

use crate::error::Result;
use crate::traits::store::{collections, DocumentStore};
use crate::types::questionnaire::Questionnaire;

/// Questionnaire read/write service.
pub struct QuestionnaireService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> QuestionnaireService<S> {
    /// Create a service over a store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether the user has submitted a questionnaire. Completion is
    /// signalled purely by the document's presence.
    pub async fn has_completed(&self, user_id: &str) -> Result<bool> {
        Ok(self
            .store
            .get_document(collections::QUESTIONNAIRES, user_id)
            .await?
            .is_some())
    }

    /// Load a user's answers. `None` means never submitted.
    pub async fn load(&self, user_id: &str) -> Result<Option<Questionnaire>> {
        Ok(self
            .store
            .get_document(collections::QUESTIONNAIRES, user_id)
            .await?
            .as_ref()
            .map(Questionnaire::from_document))
    }

    /// Persist a user's answers as a snapshot, replacing any previous
    /// submission wholesale.
    pub async fn submit(&self, user_id: &str, answers: &Questionnaire) -> Result<()> {
        self.store
            .set_document(
                collections::QUESTIONNAIRES,
                user_id,
                answers.to_document(),
                false,
            )
            .await?;
        info!(user_id = %user_id, answer_count = answers.answers.len(), "questionnaire saved");
        Ok(())
    }
}
