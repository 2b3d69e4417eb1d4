//! Configuration for the matchmaking engine.

use std::time::Duration;

/// Tunables for candidate generation and selection.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Candidates must score strictly above this to be kept.
    ///
    /// Default: 50.
    pub score_threshold: u32,

    /// Per-candidate questionnaire fetch timeout during generation.
    ///
    /// A fetch that exceeds this degrades that one candidate to
    /// "excluded"; it never fails the whole run. Default: 5s.
    pub fetch_timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            score_threshold: 50,
            fetch_timeout: Duration::from_secs(5),
        }
    }
}

impl MatchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score threshold.
    pub fn with_score_threshold(mut self, threshold: u32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the per-candidate fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
