//! Candidate generation: scan, filter, fan-out scoring, persist.

use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::Matchmaker;
use crate::error::{MatchError, Result, StoreError};
use crate::traits::store::{collections, Document, DocumentStore};
use crate::types::candidate::{CandidateSet, Match};
use crate::types::profile::{fields, Profile};
use crate::types::questionnaire::Questionnaire;

impl<S: DocumentStore> Matchmaker<S> {
    /// Generate and persist the candidate set for a user.
    ///
    /// Scans the full user population, drops the caller, gender-incompatible
    /// candidates, and candidates who are already paired, then scores each
    /// survivor against the caller. Candidates scoring strictly above the
    /// configured threshold are kept. The resulting score map and its
    /// cardinality overwrite `matchedData` / `potentialMatches` on the
    /// caller's record wholesale.
    ///
    /// The full scan does not scale past a small population; that ceiling
    /// is inherited from the product's data model and accepted here.
    pub async fn generate_candidates(&self, user_id: &str) -> Result<CandidateSet> {
        self.generate_candidates_with_cancel(user_id, &CancellationToken::new())
            .await
    }

    /// [`generate_candidates`](Self::generate_candidates) with cooperative
    /// cancellation. A cancelled run returns [`MatchError::Cancelled`]
    /// without persisting anything; the score map is all-or-nothing.
    pub async fn generate_candidates_with_cancel(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<CandidateSet> {
        let subject = self.load_profile(user_id).await?;
        let subject_answers = self.load_questionnaire(user_id).await?;

        let population = self.store.list_documents(collections::USERS).await?;
        let candidates: Vec<Profile> = population
            .into_iter()
            .filter(|(id, _)| id != user_id)
            .map(|(id, doc)| Profile::from_document(id, &doc))
            .filter(|candidate| subject.gender.compatible_with(candidate.gender))
            .filter(|candidate| !candidate.is_paired)
            .collect();

        debug!(
            user_id = %user_id,
            candidate_count = candidates.len(),
            "scoring filtered candidates"
        );

        // Fan out one questionnaire fetch per candidate; fan in before the
        // persist step. Each fetch-and-score is independent and touches no
        // shared state.
        let subject_ref = &subject;
        let answers_ref = &subject_answers;
        let fetches = candidates.into_iter().map(|candidate| async move {
            match self.fetch_candidate_answers(&candidate.user_id).await {
                Ok(answers) => {
                    let score =
                        self.scorer
                            .score(subject_ref, &candidate, answers_ref, &answers);
                    Some((candidate, score))
                }
                Err(reason) => {
                    warn!(
                        candidate = %candidate.user_id,
                        %reason,
                        "excluding candidate from run"
                    );
                    None
                }
            }
        });

        let scored = tokio::select! {
            _ = cancel.cancelled() => return Err(MatchError::Cancelled),
            scored = join_all(fetches) => scored,
        };
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }

        let threshold = self.config.score_threshold;
        let mut matches: Vec<Match> = scored
            .into_iter()
            .flatten()
            .filter(|(_, score)| *score > threshold)
            .map(|(profile, score)| Match {
                user_id: profile.user_id.clone(),
                score,
                profile,
            })
            .collect();
        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        let score_map: IndexMap<String, u32> = matches
            .iter()
            .map(|m| (m.user_id.clone(), m.score))
            .collect();

        let mut deltas = Document::new();
        deltas.insert(fields::MATCHED_DATA.into(), json!(score_map));
        deltas.insert(fields::POTENTIAL_MATCHES.into(), json!(score_map.len()));
        self.store
            .update_document(collections::USERS, user_id, deltas)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => MatchError::user_not_found(user_id),
                other => other.into(),
            })?;

        info!(
            user_id = %user_id,
            potential_matches = score_map.len(),
            "candidate generation complete"
        );
        Ok(CandidateSet { matches, score_map })
    }

    /// Fetch one candidate's questionnaire under the configured timeout.
    /// Absence is an empty sheet; a failed or timed-out fetch is an
    /// exclusion reason, never a run failure.
    async fn fetch_candidate_answers(&self, candidate_id: &str) -> std::result::Result<Questionnaire, String> {
        let fetch = self
            .store
            .get_document(collections::QUESTIONNAIRES, candidate_id);
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(doc)) => Ok(doc
                .as_ref()
                .map(Questionnaire::from_document)
                .unwrap_or_default()),
            Ok(Err(e)) => Err(format!("questionnaire fetch failed: {e}")),
            Err(_) => Err("questionnaire fetch timed out".to_string()),
        }
    }
}
