//! Profile reads and edits.
//!
//! Reads recompute the derived attributes (age, zodiac sign) from the
//! birth date and cache them back onto the document, so the scoring path
//! can consume them as plain stored fields. Edits are single-field
//! updates matching what the profile screen exposes.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{MatchError, Result, StoreError};
use crate::traits::store::{collections, Document, DocumentStore};
use crate::types::profile::{fields, Profile};

/// Profile read/edit service.
pub struct ProfileService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> ProfileService<S> {
    /// Create a service over a store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Write a complete profile record, replacing any existing one.
    pub async fn create(&self, profile: &Profile) -> Result<()> {
        self.store
            .set_document(
                collections::USERS,
                &profile.user_id,
                profile.to_document(),
                false,
            )
            .await?;
        Ok(())
    }

    /// Fetch a profile, refreshing the derived age and zodiac sign from
    /// the birth date.
    ///
    /// Freshly derived values are cached back onto the document so later
    /// readers (including scoring) see them without re-deriving. A failed
    /// cache-back is logged and otherwise ignored; the read still
    /// succeeds with the fresh values.
    pub async fn fetch(&self, user_id: &str) -> Result<Profile> {
        let doc = self
            .store
            .get_document(collections::USERS, user_id)
            .await?
            .ok_or_else(|| MatchError::user_not_found(user_id))?;
        let mut profile = Profile::from_document(user_id, &doc);

        let derived_age = profile.derive_age(chrono::Utc::now());
        let derived_sign = profile.derive_sign();

        let mut deltas = Document::new();
        if let Some(age) = &derived_age {
            if profile.age.as_deref() != Some(age) {
                deltas.insert(fields::AGE.into(), json!(age));
            }
        }
        if let Some(sign) = derived_sign {
            if profile.astrological_sign != Some(sign) {
                deltas.insert(fields::SIGN.into(), json!(sign.as_str()));
            }
        }

        if !deltas.is_empty() {
            debug!(user_id = %user_id, "caching derived attributes");
            if let Err(e) = self
                .store
                .update_document(collections::USERS, user_id, deltas)
                .await
            {
                warn!(user_id = %user_id, error = %e, "failed to cache derived attributes");
            }
        }

        if derived_age.is_some() {
            profile.age = derived_age;
        }
        if derived_sign.is_some() {
            profile.astrological_sign = derived_sign;
        }
        Ok(profile)
    }

    /// Save the user's height.
    pub async fn save_height(&self, user_id: &str, height: impl Into<String>) -> Result<()> {
        self.save_field(user_id, fields::HEIGHT, json!(height.into()))
            .await
    }

    /// Save the user's academic major.
    pub async fn save_major(&self, user_id: &str, major: impl Into<String>) -> Result<()> {
        self.save_field(user_id, fields::MAJOR, json!(major.into()))
            .await
    }

    /// Save the user's hometown.
    pub async fn save_hometown(&self, user_id: &str, hometown: impl Into<String>) -> Result<()> {
        self.save_field(user_id, fields::HOMETOWN, json!(hometown.into()))
            .await
    }

    /// Save the user's class year.
    pub async fn save_year(&self, user_id: &str, year: impl Into<String>) -> Result<()> {
        self.save_field(user_id, fields::YEAR, json!(year.into()))
            .await
    }

    /// Save the user's photo URL list wholesale.
    pub async fn save_photos(&self, user_id: &str, photos: Vec<String>) -> Result<()> {
        self.save_field(user_id, fields::PHOTOS, json!(photos))
            .await
    }

    async fn save_field(&self, user_id: &str, field: &str, value: Value) -> Result<()> {
        let mut deltas = Document::new();
        deltas.insert(field.to_string(), value);
        self.store
            .update_document(collections::USERS, user_id, deltas)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => MatchError::user_not_found(user_id),
                other => other.into(),
            })
    }
}
