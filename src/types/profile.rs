//! Profile records and the gender pairing rule.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::traits::store::Document;
use crate::types::zodiac::Zodiac;

/// Document field names for the `users` collection.
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const GENDER: &str = "gender";
    pub const MAJOR: &str = "major";
    pub const SCHOOL_NAME: &str = "schoolName";
    pub const HEIGHT: &str = "height";
    pub const HOMETOWN: &str = "hometown";
    pub const YEAR: &str = "year";
    pub const PHOTOS: &str = "photos";
    pub const AGE: &str = "age";
    pub const SIGN: &str = "astrologicalSign";
    pub const IS_PAIRED: &str = "isPaired";
    pub const CURRENT_MATCH_UID: &str = "currentMatchUID";
    pub const PROFILE_REVEALED: &str = "profileRevealed";
    pub const PROFILE_REVEALS: &str = "profileReveals";
    pub const MATCHED_DATA: &str = "matchedData";
    pub const POTENTIAL_MATCHES: &str = "potentialMatches";
}

/// Declared gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Canonical name as stored in profile documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse a stored gender. Unknown strings decode to [`Gender::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    /// The pairing rule: Male pairs only with Female, Female only with
    /// Male, Other only with Other. Symmetric and exhaustive; no other
    /// orientations are modelled. A deliberate product limitation carried
    /// over from the original matching rules, not something to widen here.
    pub fn compatible_with(&self, other: Gender) -> bool {
        matches!(
            (self, other),
            (Gender::Male, Gender::Female)
                | (Gender::Female, Gender::Male)
                | (Gender::Other, Gender::Other)
        )
    }
}

/// A user's profile record.
///
/// Decoded defensively from a loosely-typed document: missing or
/// type-mismatched fields become the documented defaults, never decode
/// errors. `age` and `astrologicalSign` are derived from the birth date and
/// cached back onto the document on profile reads (see
/// [`ProfileService::fetch`](crate::profiles::ProfileService::fetch));
/// scoring reads whatever is stored.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: String,
    pub first_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Gender,
    pub major: Option<String>,
    pub school_name: Option<String>,
    pub height: Option<String>,
    pub hometown: Option<String>,
    pub year: Option<String>,
    pub photos: Vec<String>,

    /// String-encoded age, derived from the birth date.
    pub age: Option<String>,
    pub astrological_sign: Option<Zodiac>,

    pub is_paired: bool,
    pub current_match_uid: Option<String>,
    pub profile_revealed: bool,
    pub profile_reveals: u32,

    /// Persisted score map: candidate id -> compatibility score.
    /// Overwritten wholesale on each candidate generation run.
    pub matched_data: IndexMap<String, u32>,
    pub potential_matches: u32,
}

fn str_field(doc: &Document, field: &str) -> Option<String> {
    doc.get(field).and_then(Value::as_str).map(str::to_owned)
}

impl Profile {
    /// Decode a profile from its stored document. Total: any malformed
    /// field degrades to its default.
    pub fn from_document(user_id: impl Into<String>, doc: &Document) -> Self {
        let date_of_birth = str_field(doc, fields::DATE_OF_BIRTH)
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|d| d.with_timezone(&Utc));

        let gender = str_field(doc, fields::GENDER)
            .map(|g| Gender::from_name(&g))
            .unwrap_or(Gender::Other);

        let photos = doc
            .get(fields::PHOTOS)
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let matched_data = doc
            .get(fields::MATCHED_DATA)
            .and_then(Value::as_object)
            .map(|scores| {
                scores
                    .iter()
                    .filter_map(|(uid, v)| Some((uid.clone(), u32::try_from(v.as_u64()?).ok()?)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            user_id: user_id.into(),
            first_name: str_field(doc, fields::FIRST_NAME).unwrap_or_default(),
            date_of_birth,
            gender,
            major: str_field(doc, fields::MAJOR),
            school_name: str_field(doc, fields::SCHOOL_NAME),
            height: str_field(doc, fields::HEIGHT),
            hometown: str_field(doc, fields::HOMETOWN),
            year: str_field(doc, fields::YEAR),
            photos,
            age: str_field(doc, fields::AGE),
            astrological_sign: str_field(doc, fields::SIGN)
                .as_deref()
                .and_then(Zodiac::from_name),
            is_paired: doc
                .get(fields::IS_PAIRED)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            current_match_uid: str_field(doc, fields::CURRENT_MATCH_UID),
            profile_revealed: doc
                .get(fields::PROFILE_REVEALED)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            profile_reveals: doc
                .get(fields::PROFILE_REVEALS)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            matched_data,
            potential_matches: doc
                .get(fields::POTENTIAL_MATCHES)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
        }
    }

    /// Encode the profile as a document, for seeding new records.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(fields::FIRST_NAME.into(), json!(self.first_name));
        if let Some(dob) = self.date_of_birth {
            doc.insert(fields::DATE_OF_BIRTH.into(), json!(dob.to_rfc3339()));
        }
        doc.insert(fields::GENDER.into(), json!(self.gender.as_str()));
        if let Some(major) = &self.major {
            doc.insert(fields::MAJOR.into(), json!(major));
        }
        if let Some(school) = &self.school_name {
            doc.insert(fields::SCHOOL_NAME.into(), json!(school));
        }
        if let Some(height) = &self.height {
            doc.insert(fields::HEIGHT.into(), json!(height));
        }
        if let Some(hometown) = &self.hometown {
            doc.insert(fields::HOMETOWN.into(), json!(hometown));
        }
        if let Some(year) = &self.year {
            doc.insert(fields::YEAR.into(), json!(year));
        }
        doc.insert(fields::PHOTOS.into(), json!(self.photos));
        if let Some(age) = &self.age {
            doc.insert(fields::AGE.into(), json!(age));
        }
        if let Some(sign) = self.astrological_sign {
            doc.insert(fields::SIGN.into(), json!(sign.as_str()));
        }
        doc.insert(fields::IS_PAIRED.into(), json!(self.is_paired));
        if let Some(uid) = &self.current_match_uid {
            doc.insert(fields::CURRENT_MATCH_UID.into(), json!(uid));
        }
        doc.insert(fields::PROFILE_REVEALED.into(), json!(self.profile_revealed));
        doc.insert(fields::PROFILE_REVEALS.into(), json!(self.profile_reveals));
        doc.insert(fields::MATCHED_DATA.into(), json!(self.matched_data));
        doc.insert(
            fields::POTENTIAL_MATCHES.into(),
            json!(self.potential_matches),
        );
        doc
    }

    /// Current partner id, honoring the pairing invariant: only meaningful
    /// while `is_paired` is set.
    pub fn partner(&self) -> Option<&str> {
        if self.is_paired {
            self.current_match_uid.as_deref()
        } else {
            None
        }
    }

    /// Age in whole years at `now`, derived from the birth date.
    pub fn derive_age(&self, now: DateTime<Utc>) -> Option<String> {
        let dob = self.date_of_birth?;
        now.date_naive()
            .years_since(dob.date_naive())
            .map(|years| years.to_string())
    }

    /// Zodiac sign derived from the birth date.
    pub fn derive_sign(&self) -> Option<Zodiac> {
        self.date_of_birth
            .and_then(|dob| Zodiac::from_date(dob.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gender_rule() {
        assert!(Gender::Male.compatible_with(Gender::Female));
        assert!(Gender::Female.compatible_with(Gender::Male));
        assert!(Gender::Other.compatible_with(Gender::Other));
        assert!(!Gender::Male.compatible_with(Gender::Male));
        assert!(!Gender::Male.compatible_with(Gender::Other));
        assert!(!Gender::Other.compatible_with(Gender::Female));
    }

    #[test]
    fn test_unknown_gender_decodes_to_other() {
        assert_eq!(Gender::from_name("Nonbinary"), Gender::Other);
        assert_eq!(Gender::from_name(""), Gender::Other);
    }

    #[test]
    fn test_decode_empty_document_uses_defaults() {
        let profile = Profile::from_document("u1", &Document::new());
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.first_name, "");
        assert_eq!(profile.gender, Gender::Other);
        assert!(!profile.is_paired);
        assert!(profile.current_match_uid.is_none());
        assert!(profile.matched_data.is_empty());
        assert_eq!(profile.potential_matches, 0);
    }

    #[test]
    fn test_decode_degrades_malformed_fields() {
        let mut doc = Document::new();
        doc.insert("age".into(), json!(25)); // number, not string
        doc.insert("isPaired".into(), json!("yes")); // string, not bool
        doc.insert("matchedData".into(), json!(["u2"])); // array, not map
        doc.insert("dateOfBirth".into(), json!("not-a-date"));

        let profile = Profile::from_document("u1", &doc);
        assert!(profile.age.is_none());
        assert!(!profile.is_paired);
        assert!(profile.matched_data.is_empty());
        assert!(profile.date_of_birth.is_none());
    }

    #[test]
    fn test_partner_requires_paired_flag() {
        let mut doc = Document::new();
        doc.insert("currentMatchUID".into(), json!("u2"));
        let unpaired = Profile::from_document("u1", &doc);
        assert_eq!(unpaired.partner(), None);

        doc.insert("isPaired".into(), json!(true));
        let paired = Profile::from_document("u1", &doc);
        assert_eq!(paired.partner(), Some("u2"));
    }

    #[test]
    fn test_derived_age_and_sign() {
        let mut doc = Document::new();
        let dob = Utc.with_ymd_and_hms(2000, 8, 1, 0, 0, 0).unwrap();
        doc.insert("dateOfBirth".into(), json!(dob.to_rfc3339()));
        let profile = Profile::from_document("u1", &doc);

        let now = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(profile.derive_age(now), Some("25".to_string()));
        assert_eq!(profile.derive_sign(), Some(Zodiac::Leo));

        // Birthday not yet reached this year
        let before_birthday = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(profile.derive_age(before_birthday), Some("24".to_string()));
    }

    #[test]
    fn test_document_round_trip() {
        let mut doc = Document::new();
        doc.insert("firstName".into(), json!("Ada"));
        doc.insert("gender".into(), json!("Female"));
        doc.insert("major".into(), json!("Mathematics"));
        doc.insert("isPaired".into(), json!(true));
        doc.insert("currentMatchUID".into(), json!("u9"));
        doc.insert("matchedData".into(), json!({"u9": 55}));

        let profile = Profile::from_document("u1", &doc);
        let encoded = profile.to_document();
        let decoded = Profile::from_document("u1", &encoded);

        assert_eq!(decoded.first_name, "Ada");
        assert_eq!(decoded.gender, Gender::Female);
        assert_eq!(decoded.major.as_deref(), Some("Mathematics"));
        assert_eq!(decoded.partner(), Some("u9"));
        assert_eq!(decoded.matched_data.get("u9"), Some(&55));
    }
}
