//! The closed set of field-of-study categories.
//!
//! The original data source modeled these as one boolean column per
//! category, discovered by schema introspection at runtime. Here the set
//! is a compile-time contract: a fixed enumeration with a bidirectional
//! key↔label mapping.

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategoryError;

/// A field-of-study category an institution can offer and a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    Aviation,
    Agrarian,
    Architectural,
    Biological,
    Military,
    Cultural,
    Geographical,
    Humanities,
    Design,
    Information,
    InternalAffairs,
    Medical,
    EmergencyServices,
    Petroleum,
    Pedagogical,
    Psychological,
    FoodTechnology,
    Service,
    Sports,
    Construction,
    Technical,
    Transport,
    Economics,
    Law,
}

impl Specialization {
    /// All categories, in menu order.
    pub const ALL: [Specialization; 24] = [
        Self::Aviation,
        Self::Agrarian,
        Self::Architectural,
        Self::Biological,
        Self::Military,
        Self::Cultural,
        Self::Geographical,
        Self::Humanities,
        Self::Design,
        Self::Information,
        Self::InternalAffairs,
        Self::Medical,
        Self::EmergencyServices,
        Self::Petroleum,
        Self::Pedagogical,
        Self::Psychological,
        Self::FoodTechnology,
        Self::Service,
        Self::Sports,
        Self::Construction,
        Self::Technical,
        Self::Transport,
        Self::Economics,
        Self::Law,
    ];

    /// Stable storage key, carried over from the reference data set.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Aviation => "aviacionnye",
            Self::Agrarian => "agrarnye",
            Self::Architectural => "arkhitekturnye",
            Self::Biological => "biologicheskie",
            Self::Military => "voennye",
            Self::Cultural => "vuzykultury",
            Self::Geographical => "geograficheskie",
            Self::Humanities => "gumanitarnye",
            Self::Design => "dizayna",
            Self::Information => "informacionnye",
            Self::InternalAffairs => "mvd",
            Self::Medical => "medicinckie",
            Self::EmergencyServices => "mchs",
            Self::Petroleum => "neftyanye",
            Self::Pedagogical => "pedagogicheskie",
            Self::Psychological => "psihologicheskie",
            Self::FoodTechnology => "pishevye",
            Self::Service => "servic",
            Self::Sports => "sportivnye",
            Self::Construction => "stroitelnye",
            Self::Technical => "tekhnicheskie",
            Self::Transport => "transportnye",
            Self::Economics => "ekonomicheskie",
            Self::Law => "yuridicheskie",
        }
    }

    /// Fixed display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aviation => "Авиационные",
            Self::Agrarian => "Аграрные",
            Self::Architectural => "Архитектурные",
            Self::Biological => "Биологические",
            Self::Military => "Военные",
            Self::Cultural => "Вузовской культуры",
            Self::Geographical => "Географические",
            Self::Humanities => "Гуманитарные",
            Self::Design => "Дизайна",
            Self::Information => "Информационные",
            Self::InternalAffairs => "МВД",
            Self::Medical => "Медицинские",
            Self::EmergencyServices => "МЧС",
            Self::Petroleum => "Нефтяные",
            Self::Pedagogical => "Педагогические",
            Self::Psychological => "Психологические",
            Self::FoodTechnology => "Пищевые",
            Self::Service => "Сервис",
            Self::Sports => "Спортивные",
            Self::Construction => "Строительные",
            Self::Technical => "Технические",
            Self::Transport => "Транспортные",
            Self::Economics => "Экономические",
            Self::Law => "Юридические",
        }
    }

    /// Menu callback token (`spec_<key>`).
    pub fn token(&self) -> String {
        format!("spec_{}", self.key())
    }

    /// Reverse lookup from a storage key.
    pub fn from_key(key: &str) -> Result<Specialization, UnknownCategoryError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.key() == key)
            .ok_or_else(|| UnknownCategoryError(key.to_string()))
    }

    /// Reverse lookup from a menu callback token.
    pub fn from_token(token: &str) -> Result<Specialization, UnknownCategoryError> {
        match token.strip_prefix("spec_") {
            Some(key) => Self::from_key(key),
            None => Err(UnknownCategoryError(token.to_string())),
        }
    }
}

impl std::fmt::Display for Specialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_categories() {
        assert_eq!(Specialization::ALL.len(), 24);
    }

    #[test]
    fn keys_round_trip() {
        for spec in Specialization::ALL {
            assert_eq!(Specialization::from_key(spec.key()), Ok(spec));
            assert_eq!(Specialization::from_token(&spec.token()), Ok(spec));
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = Specialization::ALL.iter().map(|s| s.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Specialization::ALL.len());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = Specialization::from_key("astronautics").unwrap_err();
        assert_eq!(err, UnknownCategoryError("astronautics".into()));
    }

    #[test]
    fn token_without_prefix_is_an_error() {
        assert!(Specialization::from_token("mvd").is_err());
        assert!(Specialization::from_token("").is_err());
    }
}
