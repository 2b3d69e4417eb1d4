//! The pairing transition.
//!
//! Pairing is the only multi-document mutation in the system and the one
//! place the "at most one partner" invariant can break, so it always goes
//! through the store's atomic batch primitive with unpaired-ness
//! re-checked as a commit-time precondition. Two independent writes would
//! leave a window where concurrent pairings double-book a user; the batch
//! leaves none.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::engine::Matchmaker;
use crate::error::{MatchError, Result, StoreError};
use crate::traits::store::{collections, BatchWrite, Document, DocumentStore, Precondition};
use crate::types::candidate::Match;
use crate::types::profile::{fields, Profile};

fn pairing_write(user_id: &str, partner_id: &str) -> BatchWrite {
    let mut deltas = Document::new();
    deltas.insert(fields::IS_PAIRED.into(), json!(true));
    deltas.insert(fields::CURRENT_MATCH_UID.into(), json!(partner_id));
    deltas.insert(fields::PROFILE_REVEALED.into(), json!(false));
    BatchWrite::new(collections::USERS, user_id, deltas)
        .with_precondition(Precondition::Exists)
        .with_precondition(Precondition::FieldNotEquals {
            field: fields::IS_PAIRED.into(),
            value: Value::Bool(true),
        })
}

impl<S: DocumentStore> Matchmaker<S> {
    /// Atomically pair two users.
    ///
    /// Both records transition together: `isPaired` set, partner ids
    /// crossed, reveal status reset. Unpaired-ness is re-checked inside
    /// the commit, so a selection made against a stale snapshot loses
    /// cleanly instead of double-booking anyone. Calling again for a pair
    /// that is already mutually paired is a no-op success; any other
    /// existing pairing is [`MatchError::AlreadyPaired`].
    /// [`MatchError::TransactionAborted`] means a transient store
    /// conflict; the call is safe to retry.
    pub async fn pair(&self, user_a: &str, user_b: &str) -> Result<()> {
        if user_a == user_b {
            return Err(MatchError::SelfPairing {
                user_id: user_a.to_string(),
            });
        }

        let profile_a = self.load_profile(user_a).await?;
        let profile_b = self.load_profile(user_b).await?;

        if profile_a.is_paired || profile_b.is_paired {
            if mutually_paired(&profile_a, &profile_b) {
                return Ok(());
            }
            return Err(MatchError::already_paired(if profile_a.is_paired {
                user_a
            } else {
                user_b
            }));
        }

        let writes = vec![pairing_write(user_a, user_b), pairing_write(user_b, user_a)];
        match self.store.atomic_batch(writes).await {
            Ok(()) => {
                info!(user_a = %user_a, user_b = %user_b, "users paired");
                Ok(())
            }
            Err(StoreError::NotFound { id, .. }) => Err(MatchError::user_not_found(id)),
            Err(StoreError::Conflict { reason }) => {
                warn!(user_a = %user_a, user_b = %user_b, %reason, "pairing batch rejected");
                self.classify_pairing_conflict(user_a, user_b).await
            }
            Err(other) => Err(other.into()),
        }
    }

    /// A rejected batch means someone's pairing state moved under us.
    /// Re-read both sides to tell a lost race from a transient abort.
    async fn classify_pairing_conflict(&self, user_a: &str, user_b: &str) -> Result<()> {
        let profile_a = self.load_profile(user_a).await?;
        let profile_b = self.load_profile(user_b).await?;

        // A concurrent caller may have committed this very pairing.
        if mutually_paired(&profile_a, &profile_b) {
            return Ok(());
        }
        if profile_a.is_paired {
            return Err(MatchError::already_paired(user_a));
        }
        if profile_b.is_paired {
            return Err(MatchError::already_paired(user_b));
        }
        Err(MatchError::TransactionAborted)
    }

    /// Select the best still-available candidate for a user and pair with
    /// them in one call. Returns the committed match, or `None` when the
    /// score map holds no available candidate.
    pub async fn find_best_available_and_pair(&self, user_id: &str) -> Result<Option<Match>> {
        let subject = self.load_profile(user_id).await?;
        if subject.is_paired {
            return Err(MatchError::already_paired(user_id));
        }

        let Some(best) = self.select_best_available(user_id).await? else {
            return Ok(None);
        };
        self.pair(user_id, &best.user_id).await?;
        Ok(Some(best))
    }
}

fn mutually_paired(a: &Profile, b: &Profile) -> bool {
    a.partner() == Some(b.user_id.as_str()) && b.partner() == Some(a.user_id.as_str())
}
