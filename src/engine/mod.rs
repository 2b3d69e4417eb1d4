//! The matchmaking engine.
//!
//! [`Matchmaker`] is the entry point for the four matchmaking operations:
//! candidate generation, best-match selection, the pairing transition, and
//! pairing status reads. It owns a [`DocumentStore`] handle, a
//! [`Scorer`], and a [`MatchConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::new());
//! let engine = Matchmaker::new(store.clone());
//!
//! let candidates = engine.generate_candidates("alice").await?;
//! if let Some(best) = engine.select_best_available("alice").await? {
//!     engine.pair("alice", &best.user_id).await?;
//! }
//! ```

pub mod candidates;
pub mod pairing;
pub mod selection;
pub mod status;

use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::scoring::Scorer;
use crate::traits::store::{collections, DocumentStore};
use crate::types::profile::Profile;
use crate::types::questionnaire::Questionnaire;

/// The matchmaking engine.
pub struct Matchmaker<S: DocumentStore> {
    store: S,
    scorer: Scorer,
    config: MatchConfig,
}

impl<S: DocumentStore> Matchmaker<S> {
    /// Create an engine with the standard compatibility table and default
    /// configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            scorer: Scorer::default(),
            config: MatchConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(store: S, config: MatchConfig) -> Self {
        Self {
            store,
            scorer: Scorer::default(),
            config,
        }
    }

    /// Replace the scorer (e.g. to inject a custom weight table).
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the subject's profile. A missing record is fatal for the
    /// calling operation.
    pub(crate) async fn load_profile(&self, user_id: &str) -> Result<Profile> {
        let doc = self
            .store
            .get_document(collections::USERS, user_id)
            .await?
            .ok_or_else(|| MatchError::user_not_found(user_id))?;
        Ok(Profile::from_document(user_id, &doc))
    }

    /// Load a questionnaire, treating an absent record as an empty answer
    /// sheet. Store failures still propagate; this is only called for the
    /// subject's own record.
    pub(crate) async fn load_questionnaire(&self, user_id: &str) -> Result<Questionnaire> {
        let doc = self
            .store
            .get_document(collections::QUESTIONNAIRES, user_id)
            .await?;
        Ok(doc
            .as_ref()
            .map(Questionnaire::from_document)
            .unwrap_or_default())
    }
}
