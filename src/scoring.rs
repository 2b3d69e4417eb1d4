//! Compatibility scoring between two users.

use crate::types::profile::Profile;
use crate::types::questionnaire::Questionnaire;
use crate::types::zodiac::CompatibilityTable;

/// Points for an age difference within the window.
const AGE_POINTS: u32 = 10;

/// Maximum age difference, in years, that still scores.
const AGE_WINDOW: i64 = 3;

/// Points for an exact major match.
const MAJOR_POINTS: u32 = 10;

/// Points for an exact school match.
const SCHOOL_POINTS: u32 = 10;

/// Points per agreeing questionnaire answer.
const ANSWER_POINTS: u32 = 5;

/// Computes compatibility scores.
///
/// Pure: no side effects, total over well-formed profiles. Malformed or
/// missing attributes degrade their sub-score to 0 rather than failing
/// the computation. The zodiac weight table is injected at construction.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    table: CompatibilityTable,
}

impl Scorer {
    /// Create a scorer over a compatibility table.
    pub fn new(table: CompatibilityTable) -> Self {
        Self { table }
    }

    /// Score `a` against `b` with their questionnaire answers.
    ///
    /// Additive, independent rules:
    /// - ages within 3 years: +10 (string-encoded ages; non-parsable -> 0)
    /// - zodiac pair weight from `a`'s side, divided by 10 and floored
    /// - identical major: +10 (case-sensitive)
    /// - identical school name: +10
    /// - +5 per question key in `a`'s sheet whose answer equals `b`'s
    ///   answer for the same key; keys only `a` answered are ignored
    ///
    /// Questionnaire iteration runs over `a`'s keys only, so the rule is
    /// symmetric just over keys both sides answered.
    pub fn score(
        &self,
        a: &Profile,
        b: &Profile,
        answers_a: &Questionnaire,
        answers_b: &Questionnaire,
    ) -> u32 {
        let mut score = 0;

        if let (Some(age_a), Some(age_b)) = (parse_age(a), parse_age(b)) {
            if (age_a - age_b).abs() <= AGE_WINDOW {
                score += AGE_POINTS;
            }
        }

        if let (Some(sign_a), Some(sign_b)) = (a.astrological_sign, b.astrological_sign) {
            if let Some(weight) = self.table.weight(sign_a, sign_b) {
                score += weight / 10;
            }
        }

        if let (Some(major_a), Some(major_b)) = (&a.major, &b.major) {
            if major_a == major_b {
                score += MAJOR_POINTS;
            }
        }

        if let (Some(school_a), Some(school_b)) = (&a.school_name, &b.school_name) {
            if school_a == school_b {
                score += SCHOOL_POINTS;
            }
        }

        for (key, answer) in &answers_a.answers {
            if answers_b.answer(key) == Some(answer.as_str()) {
                score += ANSWER_POINTS;
            }
        }

        score
    }
}

fn parse_age(profile: &Profile) -> Option<i64> {
    profile.age.as_deref().and_then(|age| age.parse().ok())
}
