//! Matchmaking backend for a campus dating app.
//!
//! The app's UI is thin; this crate is the part with actual behavior:
//! compatibility scoring between users, candidate generation over the
//! whole user population, and the atomic pairing transition that keeps
//! every user paired with at most one other user at a time.
//!
//! # Design
//!
//! - The backend database is abstracted as a [`DocumentStore`]: named
//!   collections of loosely-typed documents with a multi-document atomic
//!   batch primitive. Pairing goes through that primitive with
//!   commit-time preconditions; it never issues two independent writes.
//! - Scoring is pure and total: malformed profile fields degrade their
//!   sub-score to zero instead of failing the computation.
//! - Candidate generation fans out one questionnaire read per candidate,
//!   fans in, and persists the score map all-or-nothing. A single
//!   candidate's failed or slow fetch excludes that candidate only.
//!
//! # Usage
//!
//! ```rust,ignore
//! use matchmaker::{Matchmaker, MemoryStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let engine = Matchmaker::new(store.clone());
//!
//! engine.generate_candidates("alice").await?;
//! if let Some(best) = engine.select_best_available("alice").await? {
//!     engine.pair("alice", &best.user_id).await?;
//!     assert!(engine.is_paired("alice").await?);
//! }
//! ```
//!
//! # Modules
//!
//! - [`engine`] - The [`Matchmaker`]: generation, selection, pairing, status
//! - [`scoring`] - Pure compatibility scoring
//! - [`traits`] - The [`DocumentStore`] boundary
//! - [`stores`] - Storage implementations ([`MemoryStore`])
//! - [`types`] - Profiles, questionnaires, zodiac table, match results
//! - [`profiles`] / [`questionnaires`] / [`conversations`] - Record services
//! - [`testing`] - Fixtures and fault injection for tests

pub mod config;
pub mod conversations;
pub mod engine;
pub mod error;
pub mod profiles;
pub mod questionnaires;
pub mod scoring;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::MatchConfig;
pub use conversations::{conversation_id, ConversationService, Message};
pub use engine::Matchmaker;
pub use error::{MatchError, Result, StoreError, StoreResult};
pub use profiles::ProfileService;
pub use questionnaires::QuestionnaireService;
pub use scoring::Scorer;
pub use stores::MemoryStore;
pub use traits::store::{collections, BatchWrite, Document, DocumentStore, Precondition};
pub use types::{
    candidate::{CandidateSet, Match},
    profile::{Gender, Profile},
    questionnaire::{Question, Questionnaire, QUESTIONS},
    zodiac::{CompatibilityTable, Zodiac},
};
