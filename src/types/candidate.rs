//! Transient match results produced by generation and selection.

use indexmap::IndexMap;

use crate::types::profile::Profile;

/// One scored candidate, with a profile snapshot for display.
///
/// Constructed per query and discarded after use; the durable record is
/// the score map persisted on the subject's profile.
#[derive(Debug, Clone)]
pub struct Match {
    /// Candidate user id.
    pub user_id: String,

    /// Compatibility score at the time the candidate was evaluated.
    pub score: u32,

    /// Candidate profile as read during the run.
    pub profile: Profile,
}

/// Result of one candidate generation run.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// Candidates over the score threshold, ranked best-first
    /// (score descending, candidate id ascending on ties).
    pub matches: Vec<Match>,

    /// The score map as persisted on the subject's record.
    pub score_map: IndexMap<String, u32>,
}

impl CandidateSet {
    /// Number of candidates retained.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the run found no candidates.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
