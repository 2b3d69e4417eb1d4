//! Best-match selection over a persisted score map.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::engine::Matchmaker;
use crate::error::Result;
use crate::traits::store::{collections, DocumentStore};
use crate::types::candidate::Match;
use crate::types::profile::Profile;

/// Highest score wins; ties go to the lexicographically smallest candidate
/// id. The secondary order makes repeated calls deterministic; it is an
/// implementation choice, not a stability guarantee across score-map
/// regenerations.
fn best_of<I>(entries: I) -> Option<(String, u32)>
where
    I: IntoIterator<Item = (String, u32)>,
{
    entries
        .into_iter()
        .max_by(|(id_a, score_a), (id_b, score_b)| {
            score_a.cmp(score_b).then_with(|| id_b.cmp(id_a))
        })
}

impl<S: DocumentStore> Matchmaker<S> {
    /// Pick the highest-scoring candidate from the user's persisted score
    /// map. Returns `None` for an empty map, or when the winning
    /// candidate's record has since disappeared.
    pub async fn select_best(&self, user_id: &str) -> Result<Option<Match>> {
        let subject = self.load_profile(user_id).await?;

        let Some((best_id, score)) = best_of(
            subject
                .matched_data
                .iter()
                .map(|(id, score)| (id.clone(), *score)),
        ) else {
            debug!(user_id = %user_id, "score map empty, no match");
            return Ok(None);
        };

        match self
            .store
            .get_document(collections::USERS, &best_id)
            .await?
        {
            Some(doc) => Ok(Some(Match {
                profile: Profile::from_document(best_id.clone(), &doc),
                user_id: best_id,
                score,
            })),
            None => {
                warn!(user_id = %user_id, best_id = %best_id, "best match record missing");
                Ok(None)
            }
        }
    }

    /// Like [`select_best`](Self::select_best), but re-validates each
    /// mapped candidate's pairing status first: candidates who paired with
    /// someone since the score map was computed are excluded. One read per
    /// candidate, performed concurrently and gathered before the max is
    /// taken. A candidate whose re-read fails is excluded, not fatal.
    pub async fn select_best_available(&self, user_id: &str) -> Result<Option<Match>> {
        let subject = self.load_profile(user_id).await?;
        if subject.matched_data.is_empty() {
            debug!(user_id = %user_id, "score map empty, no match");
            return Ok(None);
        }

        let checks = subject.matched_data.iter().map(|(id, score)| async move {
            match self.store.get_document(collections::USERS, id).await {
                Ok(Some(doc)) => {
                    let profile = Profile::from_document(id.clone(), &doc);
                    if profile.is_paired {
                        None
                    } else {
                        Some((id.clone(), *score, profile))
                    }
                }
                Ok(None) => None,
                Err(e) => {
                    warn!(candidate = %id, error = %e, "availability re-check failed, excluding");
                    None
                }
            }
        });
        let available: Vec<(String, u32, Profile)> =
            join_all(checks).await.into_iter().flatten().collect();

        let Some((best_id, score)) =
            best_of(available.iter().map(|(id, score, _)| (id.clone(), *score)))
        else {
            debug!(user_id = %user_id, "no unpaired candidates remain");
            return Ok(None);
        };

        let profile = available
            .into_iter()
            .find(|(id, _, _)| *id == best_id)
            .map(|(_, _, profile)| profile)
            .expect("winner came from this set");

        Ok(Some(Match {
            user_id: best_id,
            score,
            profile,
        }))
    }
}
