//! Maturity band classification
//!
//! Maps a numeric maturity score onto one of five bands, plus
//! `NotAssessed` when no score is available. Each band's lower bound is
//! inclusive:
//!
//! | Score range       | Band        |
//! |-------------------|-------------|
//! | score >= 4.5      | Optimized   |
//! | 3.5 <= s < 4.5    | Managed     |
//! | 2.5 <= s < 3.5    | Defined     |
//! | 1.5 <= s < 2.5    | Developing  |
//! | s < 1.5           | Initial     |
//! | absent            | Not Assessed|

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maturity band derived from a score
///
/// Serializes as the human-readable label ("Not Assessed" keeps its space)
/// so the JSON documents stay interchangeable with the precomputed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Band {
    Initial,
    Developing,
    Defined,
    Managed,
    Optimized,
    #[default]
    #[serde(rename = "Not Assessed")]
    NotAssessed,
}

impl Band {
    /// Lower bound of `Optimized`
    pub const OPTIMIZED_MIN: f64 = 4.5;
    /// Lower bound of `Managed`
    pub const MANAGED_MIN: f64 = 3.5;
    /// Lower bound of `Defined`
    pub const DEFINED_MIN: f64 = 2.5;
    /// Lower bound of `Developing`
    pub const DEVELOPING_MIN: f64 = 1.5;

    /// Classify an optional score
    ///
    /// Any number is accepted. Scores below 1.5, negative values included,
    /// land in `Initial`. NaN carries no information and is treated like an
    /// absent score.
    pub fn classify(score: Option<f64>) -> Band {
        match score {
            None => Band::NotAssessed,
            Some(s) if s.is_nan() => Band::NotAssessed,
            Some(s) if s >= Self::OPTIMIZED_MIN => Band::Optimized,
            Some(s) if s >= Self::MANAGED_MIN => Band::Managed,
            Some(s) if s >= Self::DEFINED_MIN => Band::Defined,
            Some(s) if s >= Self::DEVELOPING_MIN => Band::Developing,
            Some(_) => Band::Initial,
        }
    }

    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Band::Initial => "Initial",
            Band::Developing => "Developing",
            Band::Defined => "Defined",
            Band::Managed => "Managed",
            Band::Optimized => "Optimized",
            Band::NotAssessed => "Not Assessed",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
