//! Pairing status reads consumed by the UI layer.

use serde_json::json;
use tracing::warn;

use crate::engine::Matchmaker;
use crate::error::Result;
use crate::traits::store::{collections, Document, DocumentStore};
use crate::types::profile::{fields, Profile};

impl<S: DocumentStore> Matchmaker<S> {
    /// Whether the user currently has a partner.
    pub async fn is_paired(&self, user_id: &str) -> Result<bool> {
        Ok(self.load_profile(user_id).await?.is_paired)
    }

    /// The user's current partner id, if paired.
    pub async fn current_partner(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self
            .load_profile(user_id)
            .await?
            .partner()
            .map(str::to_owned))
    }

    /// The display name of the user's current partner. `None` when the
    /// user is unpaired or the partner record is missing.
    pub async fn current_partner_name(&self, user_id: &str) -> Result<Option<String>> {
        let profile = self.load_profile(user_id).await?;
        let Some(partner_id) = profile.partner() else {
            return Ok(None);
        };

        match self
            .store
            .get_document(collections::USERS, partner_id)
            .await?
        {
            Some(doc) => Ok(Some(Profile::from_document(partner_id, &doc).first_name)),
            None => {
                warn!(user_id = %user_id, partner_id = %partner_id, "partner record missing");
                Ok(None)
            }
        }
    }

    /// Whether the user has revealed their profile to their partner.
    pub async fn is_profile_revealed(&self, user_id: &str) -> Result<bool> {
        Ok(self.load_profile(user_id).await?.profile_revealed)
    }

    /// Reveal the user's profile to their current partner.
    ///
    /// Sets the reveal flag on the user's own record and bumps the
    /// partner's reveal counter (the number shown on their home screen).
    /// A missing partner record only skips the counter bump.
    pub async fn reveal_profile(&self, user_id: &str) -> Result<()> {
        let profile = self.load_profile(user_id).await?;

        let mut deltas = Document::new();
        deltas.insert(fields::PROFILE_REVEALED.into(), json!(true));
        self.store
            .update_document(collections::USERS, user_id, deltas)
            .await?;

        if let Some(partner_id) = profile.partner() {
            match self.store.get_document(collections::USERS, partner_id).await {
                Ok(Some(doc)) => {
                    let partner = Profile::from_document(partner_id, &doc);
                    let mut deltas = Document::new();
                    deltas.insert(
                        fields::PROFILE_REVEALS.into(),
                        json!(partner.profile_reveals + 1),
                    );
                    self.store
                        .update_document(collections::USERS, partner_id, deltas)
                        .await?;
                }
                Ok(None) => {
                    warn!(user_id = %user_id, partner_id = %partner_id, "partner record missing");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
