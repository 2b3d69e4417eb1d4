//! Questionnaire snapshots and the fixed question catalog.

use indexmap::IndexMap;
use serde_json::Value;

use crate::traits::store::Document;

/// Answer string for an affirmative response.
pub const YES: &str = "Yes";

/// Answer string for a negative response.
pub const NO: &str = "No";

/// One entry in the fixed question catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Stable key the answer is stored under.
    pub key: &'static str,

    /// Prompt shown to the user.
    pub prompt: &'static str,
}

/// The fixed binary question catalog. Keys are immutable; answers are
/// user-editable until submission, then persisted as a snapshot.
pub const QUESTIONS: &[Question] = &[
    Question { key: "exploring", prompt: "Do you prefer spending your weekends exploring new places rather than staying in?" },
    Question { key: "humor", prompt: "Is humor a key factor for you in a relationship?" },
    Question { key: "loveAtFirstSight", prompt: "Do you believe in love at first sight?" },
    Question { key: "morningPerson", prompt: "Are you more of a morning person than a night owl?" },
    Question { key: "deepConversations", prompt: "Do you value deep conversations over small talk?" },
    Question { key: "careerGoals", prompt: "Is it important for you to share similar career goals with your partner?" },
    Question { key: "movieNight", prompt: "Would you rather have a movie night than go to a party?" },
    Question { key: "politicalViews", prompt: "Do you think it's important to share similar political views with your partner?" },
    Question { key: "dogPerson", prompt: "Are you a dog person more than a cat person?" },
    Question { key: "cookingTogether", prompt: "Is cooking together something you would enjoy in a relationship?" },
    Question { key: "oppositesAttract", prompt: "Do you believe that opposites attract?" },
    Question { key: "quietNight", prompt: "Would you prefer a quiet night in with a good book over going out?" },
    Question { key: "kids", prompt: "Do you see yourself wanting kids in the future?" },
    Question { key: "physicalFitness", prompt: "Is physical fitness important to you in a partner?" },
    Question { key: "friendship", prompt: "Do you believe that a strong friendship is essential in a romantic relationship?" },
    Question { key: "travelWorld", prompt: "Would you rather travel the world than settle in one place?" },
    Question { key: "religiousBeliefs", prompt: "Is it important for you to share the same religious beliefs as your partner?" },
    Question { key: "trust", prompt: "Do you think that trust is more important than love in a relationship?" },
    Question { key: "spontaneity", prompt: "Are you someone who prefers spontaneity over planning?" },
    Question { key: "sports", prompt: "Do you enjoy watching sports with someone else?" },
    Question { key: "friends", prompt: "Is it important for you that your partner gets along with your friends?" },
    Question { key: "longDistance", prompt: "Do you believe that long-distance relationships can work?" },
    Question { key: "smallGesture", prompt: "Would you rather be surprised with a small gesture of affection than receive a big, planned gift?" },
    Question { key: "musicTaste", prompt: "Is it important for you that your partner shares your taste in music?" },
    Question { key: "newFoods", prompt: "Do you enjoy trying new foods and cuisines with your partner?" },
    Question { key: "laughter", prompt: "Do you believe that laughter is the best way to resolve conflicts?" },
    Question { key: "independence", prompt: "Are you someone who values independence in a relationship?" },
    Question { key: "introverted", prompt: "Do you prefer a partner who is more introverted than extroverted?" },
    Question { key: "hobbies", prompt: "Is it important to you that your partner is involved in your hobbies?" },
    Question { key: "loveBeforeCareer", prompt: "Do you believe that love should always come before career?" },
];

/// A user's questionnaire answers.
///
/// Stored as its own document; the document's presence is what signals
/// questionnaire completion. A user without one is treated as having an
/// empty answer sheet wherever answers are consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Questionnaire {
    /// Question key -> "Yes"/"No".
    pub answers: IndexMap<String, String>,
}

impl Questionnaire {
    /// An empty answer sheet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A full answer sheet with every catalog question answered "No",
    /// the starting state of the submission form.
    pub fn blank() -> Self {
        Self {
            answers: QUESTIONS
                .iter()
                .map(|q| (q.key.to_string(), NO.to_string()))
                .collect(),
        }
    }

    /// Decode from a stored document. Non-string values are dropped.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            answers: doc
                .iter()
                .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_owned())))
                .collect(),
        }
    }

    /// Encode as a document for snapshot persistence.
    pub fn to_document(&self) -> Document {
        self.answers
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    /// Record an answer.
    pub fn set_answer(&mut self, key: impl Into<String>, yes: bool) {
        self.answers
            .insert(key.into(), if yes { YES } else { NO }.to_string());
    }

    /// Look up an answer by question key.
    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    /// Builder-style answer for fixture construction.
    pub fn with_answer(mut self, key: impl Into<String>, answer: impl Into<String>) -> Self {
        self.answers.insert(key.into(), answer.into());
        self
    }
}
