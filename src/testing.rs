//! Testing utilities: profile fixtures and a fault-injecting store.
//!
//! Useful for exercising matchmaking flows without a real backend, and
//! for verifying that per-candidate store failures degrade to exclusions
//! instead of failing whole runs.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{collections, BatchWrite, Document, DocumentStore};
use crate::types::profile::{Gender, Profile};
use crate::types::questionnaire::Questionnaire;
use crate::types::zodiac::Zodiac;

/// Builder for profile fixtures.
///
/// Starts from an empty, unpaired profile and fills in only what a test
/// cares about.
#[derive(Debug, Clone)]
pub struct ProfileFixture {
    profile: Profile,
}

/// Start building a profile fixture.
pub fn profile(user_id: impl Into<String>) -> ProfileFixture {
    ProfileFixture {
        profile: Profile {
            user_id: user_id.into(),
            first_name: String::new(),
            date_of_birth: None,
            gender: Gender::Other,
            major: None,
            school_name: None,
            height: None,
            hometown: None,
            year: None,
            photos: Vec::new(),
            age: None,
            astrological_sign: None,
            is_paired: false,
            current_match_uid: None,
            profile_revealed: false,
            profile_reveals: 0,
            matched_data: Default::default(),
            potential_matches: 0,
        },
    }
}

impl ProfileFixture {
    /// Set the display name.
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.profile.first_name = name.into();
        self
    }

    /// Set the declared gender.
    pub fn gender(mut self, gender: Gender) -> Self {
        self.profile.gender = gender;
        self
    }

    /// Set the cached string-encoded age.
    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.profile.age = Some(age.into());
        self
    }

    /// Set the cached zodiac sign.
    pub fn sign(mut self, sign: Zodiac) -> Self {
        self.profile.astrological_sign = Some(sign);
        self
    }

    /// Set the academic major.
    pub fn major(mut self, major: impl Into<String>) -> Self {
        self.profile.major = Some(major.into());
        self
    }

    /// Set the school name.
    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.profile.school_name = Some(school.into());
        self
    }

    /// Set the birth date.
    pub fn born(mut self, date_of_birth: chrono::DateTime<chrono::Utc>) -> Self {
        self.profile.date_of_birth = Some(date_of_birth);
        self
    }

    /// Mark the profile as paired with a partner.
    pub fn paired_with(mut self, partner_id: impl Into<String>) -> Self {
        self.profile.is_paired = true;
        self.profile.current_match_uid = Some(partner_id.into());
        self
    }

    /// Add a persisted score map entry.
    pub fn scored(mut self, candidate_id: impl Into<String>, score: u32) -> Self {
        self.profile.matched_data.insert(candidate_id.into(), score);
        self.profile.potential_matches = self.profile.matched_data.len() as u32;
        self
    }

    /// Finish building.
    pub fn build(self) -> Profile {
        self.profile
    }

    /// Build and write the profile into a store.
    pub async fn seed(self, store: &impl DocumentStore) -> StoreResult<Profile> {
        let profile = self.profile;
        store
            .set_document(
                collections::USERS,
                &profile.user_id,
                profile.to_document(),
                false,
            )
            .await?;
        Ok(profile)
    }
}

/// Write a questionnaire snapshot into a store.
pub async fn seed_questionnaire(
    store: &impl DocumentStore,
    user_id: &str,
    answers: &Questionnaire,
) -> StoreResult<()> {
    store
        .set_document(
            collections::QUESTIONNAIRES,
            user_id,
            answers.to_document(),
            false,
        )
        .await
}

/// A store wrapper that injects faults into reads.
///
/// Wraps any inner store; configured documents fail with
/// [`StoreError::Unavailable`] or respond only after a delay. Writes pass
/// through untouched.
pub struct UnreliableStore<S> {
    inner: S,
    failing_reads: RwLock<HashSet<(String, String)>>,
    delayed_reads: RwLock<HashMap<(String, String), Duration>>,
}

impl<S: DocumentStore> UnreliableStore<S> {
    /// Wrap a store.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing_reads: RwLock::new(HashSet::new()),
            delayed_reads: RwLock::new(HashMap::new()),
        }
    }

    /// Make reads of one document fail.
    pub fn fail_reads_of(&self, collection: &str, id: &str) {
        self.failing_reads
            .write()
            .unwrap()
            .insert((collection.to_string(), id.to_string()));
    }

    /// Make reads of one document stall for a duration before answering.
    pub fn delay_reads_of(&self, collection: &str, id: &str, delay: Duration) {
        self.delayed_reads
            .write()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), delay);
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for UnreliableStore<S> {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let key = (collection.to_string(), id.to_string());
        if self.failing_reads.read().unwrap().contains(&key) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        let delay = self.delayed_reads.read().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.get_document(collection, id).await
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> StoreResult<()> {
        self.inner.set_document(collection, id, fields, merge).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        deltas: Document,
    ) -> StoreResult<()> {
        self.inner.update_document(collection, id, deltas).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.inner.delete_document(collection, id).await
    }

    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        self.inner.list_documents(collection).await
    }

    async fn atomic_batch(&self, writes: Vec<BatchWrite>) -> StoreResult<()> {
        self.inner.atomic_batch(writes).await
    }
}
