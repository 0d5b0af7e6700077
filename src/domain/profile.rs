//! Per-user profile: city, exam scores, derived aggregate, specializations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::specialization::Specialization;
use crate::domain::subject::Subject;
use crate::error::ValidationError;

/// Multiplier applied to the mean subject score. Models a three-exam
/// maximum composite; downstream thresholds are calibrated against it.
pub const AGGREGATE_MULTIPLIER: f64 = 3.0;

/// Compute the aggregate for a score map: `(Σ scores / count) * 3`,
/// `None` iff the map is empty.
///
/// This is the single source of the aggregate invariant. It runs after
/// every successful score mutation, and the store backend applies it when
/// assembling a profile from rows.
pub fn aggregate_of(scores: &BTreeMap<Subject, u8>) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: u32 = scores.values().map(|&v| u32::from(v)).sum();
    Some(f64::from(sum) / scores.len() as f64 * AGGREGATE_MULTIPLIER)
}

/// Parse raw score text into a validated value in `0..=100`.
pub fn parse_score(text: &str) -> Result<u8, ValidationError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if !(0..=100).contains(&value) {
        return Err(ValidationError::OutOfRange(value));
    }
    Ok(value as u8)
}

/// A user's stored data. Keyed by an opaque stable user id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    /// Free-text location, optional.
    pub city: Option<String>,
    /// Sparse per-subject score map; values are integers in `0..=100`.
    pub scores: BTreeMap<Subject, u8>,
    /// Derived composite value; `None` iff `scores` is empty.
    pub aggregate: Option<f64>,
    /// Selected field-of-study flags.
    pub specializations: BTreeSet<Specialization>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Whether any field is stored at all.
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.scores.is_empty() && self.specializations.is_empty()
    }

    /// Store a validated score for a subject, overwriting any prior value,
    /// and recompute the aggregate. On a validation failure the profile is
    /// unchanged.
    pub fn set_score(&mut self, subject: Subject, value: i64) -> Result<(), ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::OutOfRange(value));
        }
        self.scores.insert(subject, value as u8);
        self.aggregate = aggregate_of(&self.scores);
        Ok(())
    }

    /// The stored aggregate.
    pub fn aggregate(&self) -> Option<f64> {
        self.aggregate
    }

    /// Select a field-of-study category. Set-union semantics: re-selecting
    /// an already-set category is a no-op, not a toggle. Returns whether
    /// the flag was newly set.
    pub fn select_specialization(&mut self, category: Specialization) -> bool {
        self.specializations.insert(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_matches_formula() {
        let mut profile = UserProfile::new("u1");
        profile.set_score(Subject::Russian, 80).unwrap();
        profile.set_score(Subject::Math, 90).unwrap();
        // (80 + 90) / 2 * 3 = 255
        assert_eq!(profile.aggregate(), Some(255.0));
    }

    #[test]
    fn aggregate_none_for_empty_map() {
        let profile = UserProfile::new("u1");
        assert_eq!(profile.aggregate(), None);
        assert_eq!(aggregate_of(&BTreeMap::new()), None);
    }

    #[test]
    fn aggregate_single_subject() {
        let mut profile = UserProfile::new("u1");
        profile.set_score(Subject::Physics, 70).unwrap();
        assert_eq!(profile.aggregate(), Some(210.0));
    }

    #[test]
    fn set_score_overwrites() {
        let mut profile = UserProfile::new("u1");
        profile.set_score(Subject::Russian, 50).unwrap();
        profile.set_score(Subject::Russian, 95).unwrap();
        assert_eq!(profile.scores.len(), 1);
        assert_eq!(profile.aggregate(), Some(285.0));
    }

    #[test]
    fn out_of_range_score_leaves_profile_unchanged() {
        let mut profile = UserProfile::new("u1");
        profile.set_score(Subject::Russian, 80).unwrap();
        let before = profile.clone();

        assert_eq!(
            profile.set_score(Subject::Math, 105),
            Err(ValidationError::OutOfRange(105))
        );
        assert_eq!(
            profile.set_score(Subject::Math, -1),
            Err(ValidationError::OutOfRange(-1))
        );
        assert_eq!(profile, before);
    }

    #[test]
    fn parse_score_accepts_bounds() {
        assert_eq!(parse_score("0"), Ok(0));
        assert_eq!(parse_score("100"), Ok(100));
        assert_eq!(parse_score(" 42 "), Ok(42));
    }

    #[test]
    fn parse_score_rejects_garbage() {
        assert_eq!(parse_score("abc"), Err(ValidationError::NotANumber));
        assert_eq!(parse_score(""), Err(ValidationError::NotANumber));
        assert_eq!(parse_score("4.5"), Err(ValidationError::NotANumber));
        assert_eq!(parse_score("105"), Err(ValidationError::OutOfRange(105)));
        assert_eq!(parse_score("-3"), Err(ValidationError::OutOfRange(-3)));
    }

    #[test]
    fn specialization_select_is_idempotent() {
        let mut profile = UserProfile::new("u1");
        assert!(profile.select_specialization(Specialization::Medical));
        assert!(!profile.select_specialization(Specialization::Medical));
        assert_eq!(profile.specializations.len(), 1);
        assert!(profile.specializations.contains(&Specialization::Medical));
    }

    #[test]
    fn is_empty_tracks_all_fields() {
        let mut profile = UserProfile::new("u1");
        assert!(profile.is_empty());
        profile.city = Some("Москва".into());
        assert!(!profile.is_empty());

        let mut profile = UserProfile::new("u2");
        profile.select_specialization(Specialization::Law);
        assert!(!profile.is_empty());
    }
}
