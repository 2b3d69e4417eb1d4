//! Zodiac signs and the astrological compatibility table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The twelve zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zodiac {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Zodiac {
    /// All signs, in calendar order starting from Aries.
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Aries,
        Zodiac::Taurus,
        Zodiac::Gemini,
        Zodiac::Cancer,
        Zodiac::Leo,
        Zodiac::Virgo,
        Zodiac::Libra,
        Zodiac::Scorpio,
        Zodiac::Sagittarius,
        Zodiac::Capricorn,
        Zodiac::Aquarius,
        Zodiac::Pisces,
    ];

    /// Canonical name as stored in profile documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zodiac::Aries => "Aries",
            Zodiac::Taurus => "Taurus",
            Zodiac::Gemini => "Gemini",
            Zodiac::Cancer => "Cancer",
            Zodiac::Leo => "Leo",
            Zodiac::Virgo => "Virgo",
            Zodiac::Libra => "Libra",
            Zodiac::Scorpio => "Scorpio",
            Zodiac::Sagittarius => "Sagittarius",
            Zodiac::Capricorn => "Capricorn",
            Zodiac::Aquarius => "Aquarius",
            Zodiac::Pisces => "Pisces",
        }
    }

    /// Parse a stored sign name. Unknown strings are `None`, not an error.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }

    /// Derive the sign for a calendar date of birth.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::from_month_day(date.month(), date.day())
    }

    /// Derive the sign from a month/day pair. Out-of-range pairs are `None`.
    pub fn from_month_day(month: u32, day: u32) -> Option<Self> {
        let sign = match (month, day) {
            (3, 21..=31) | (4, 1..=19) => Zodiac::Aries,
            (4, 20..=30) | (5, 1..=20) => Zodiac::Taurus,
            (5, 21..=31) | (6, 1..=20) => Zodiac::Gemini,
            (6, 21..=30) | (7, 1..=22) => Zodiac::Cancer,
            (7, 23..=31) | (8, 1..=22) => Zodiac::Leo,
            (8, 23..=31) | (9, 1..=22) => Zodiac::Virgo,
            (9, 23..=30) | (10, 1..=22) => Zodiac::Libra,
            (10, 23..=31) | (11, 1..=21) => Zodiac::Scorpio,
            (11, 22..=30) | (12, 1..=21) => Zodiac::Sagittarius,
            (12, 22..=31) | (1, 1..=19) => Zodiac::Capricorn,
            (1, 20..=31) | (2, 1..=18) => Zodiac::Aquarius,
            (2, 19..=29) | (3, 1..=20) => Zodiac::Pisces,
            _ => return None,
        };
        Some(sign)
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand-authored pairwise compatibility weights, in `[30, 100]`.
///
/// The table is directional: `weight(a, b)` is read from `a`'s row, and a
/// handful of entries differ from their mirror (e.g. Aries reads Taurus at
/// 50 while Taurus reads Aries at 30). Lookups use the first argument's row,
/// matching how scores are computed from the querying user's side.
///
/// Built once at startup and injected into the scorer; never ambient
/// global state.
#[derive(Debug, Clone)]
pub struct CompatibilityTable {
    weights: HashMap<(Zodiac, Zodiac), u32>,
}

use Zodiac::*;

#[rustfmt::skip]
const WEIGHTS: [(Zodiac, [(Zodiac, u32); 12]); 12] = [
    (Aries, [
        (Leo, 100), (Sagittarius, 100), (Gemini, 75), (Libra, 75), (Aquarius, 70), (Aries, 70),
        (Pisces, 50), (Taurus, 50), (Virgo, 45), (Capricorn, 45), (Scorpio, 40), (Cancer, 30),
    ]),
    (Taurus, [
        (Virgo, 100), (Capricorn, 100), (Cancer, 75), (Pisces, 75), (Taurus, 70), (Scorpio, 70),
        (Libra, 55), (Leo, 50), (Aquarius, 45), (Sagittarius, 40), (Aries, 30), (Gemini, 30),
    ]),
    (Gemini, [
        (Libra, 100), (Aquarius, 100), (Aries, 75), (Leo, 75), (Sagittarius, 70), (Gemini, 70),
        (Pisces, 50), (Virgo, 50), (Taurus, 40), (Capricorn, 40), (Cancer, 30), (Scorpio, 30),
    ]),
    (Cancer, [
        (Scorpio, 100), (Pisces, 100), (Taurus, 75), (Virgo, 75), (Cancer, 70), (Capricorn, 70),
        (Libra, 50), (Leo, 50), (Gemini, 45), (Aquarius, 45), (Aries, 30), (Sagittarius, 30),
    ]),
    (Leo, [
        (Aries, 100), (Sagittarius, 100), (Gemini, 75), (Libra, 75), (Leo, 70), (Aquarius, 70),
        (Pisces, 50), (Taurus, 50), (Cancer, 45), (Capricorn, 45), (Scorpio, 40), (Virgo, 30),
    ]),
    (Virgo, [
        (Taurus, 100), (Capricorn, 100), (Cancer, 75), (Scorpio, 75), (Virgo, 70), (Pisces, 70),
        (Libra, 50), (Leo, 50), (Gemini, 45), (Aquarius, 45), (Aries, 30), (Sagittarius, 30),
    ]),
    (Libra, [
        (Gemini, 100), (Aquarius, 100), (Leo, 75), (Sagittarius, 75), (Libra, 70), (Aries, 70),
        (Pisces, 50), (Virgo, 50), (Taurus, 45), (Capricorn, 45), (Scorpio, 40), (Cancer, 30),
    ]),
    (Scorpio, [
        (Cancer, 100), (Pisces, 100), (Virgo, 75), (Capricorn, 75), (Scorpio, 70), (Taurus, 70),
        (Libra, 50), (Leo, 50), (Gemini, 45), (Aquarius, 45), (Aries, 30), (Sagittarius, 30),
    ]),
    (Sagittarius, [
        (Aries, 100), (Leo, 100), (Gemini, 75), (Aquarius, 75), (Sagittarius, 70), (Libra, 70),
        (Pisces, 50), (Virgo, 50), (Taurus, 45), (Capricorn, 45), (Cancer, 40), (Scorpio, 40),
    ]),
    (Capricorn, [
        (Taurus, 100), (Virgo, 100), (Scorpio, 75), (Pisces, 75), (Capricorn, 70), (Cancer, 70),
        (Libra, 50), (Leo, 50), (Gemini, 45), (Aquarius, 45), (Aries, 30), (Sagittarius, 30),
    ]),
    (Aquarius, [
        (Gemini, 100), (Libra, 100), (Aries, 75), (Sagittarius, 75), (Aquarius, 70), (Leo, 70),
        (Pisces, 50), (Virgo, 50), (Taurus, 45), (Capricorn, 45), (Cancer, 40), (Scorpio, 40),
    ]),
    (Pisces, [
        (Cancer, 100), (Scorpio, 100), (Taurus, 75), (Capricorn, 75), (Pisces, 70), (Virgo, 70),
        (Libra, 50), (Leo, 50), (Gemini, 45), (Aquarius, 45), (Aries, 30), (Sagittarius, 30),
    ]),
];

impl Default for CompatibilityTable {
    fn default() -> Self {
        let mut weights = HashMap::with_capacity(144);
        for (row, entries) in WEIGHTS {
            for (col, weight) in entries {
                weights.insert((row, col), weight);
            }
        }
        Self { weights }
    }
}

impl CompatibilityTable {
    /// Build the standard table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the weight for a sign pair from `a`'s row.
    pub fn weight(&self, a: Zodiac, b: Zodiac) -> Option<u32> {
        self.weights.get(&(a, b)).copied()
    }
}
