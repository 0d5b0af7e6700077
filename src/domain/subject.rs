//! The closed set of exam subjects.

use serde::{Deserialize, Serialize};

/// An exam subject a user can enter a score for.
///
/// The set is fixed: sixteen subjects, each with a stable storage key and
/// a fixed display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Russian,
    Math,
    MathProfile,
    Physics,
    Chemistry,
    History,
    SocialStudies,
    Informatics,
    Biology,
    Geography,
    English,
    German,
    French,
    Spanish,
    Chinese,
    Literature,
}

impl Subject {
    /// All subjects, in menu order.
    pub const ALL: [Subject; 16] = [
        Self::Russian,
        Self::Math,
        Self::MathProfile,
        Self::Physics,
        Self::Chemistry,
        Self::History,
        Self::SocialStudies,
        Self::Informatics,
        Self::Biology,
        Self::Geography,
        Self::English,
        Self::German,
        Self::French,
        Self::Spanish,
        Self::Chinese,
        Self::Literature,
    ];

    /// Stable storage/callback key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Russian => "rus",
            Self::Math => "math",
            Self::MathProfile => "math_prof",
            Self::Physics => "phy",
            Self::Chemistry => "chem",
            Self::History => "hist",
            Self::SocialStudies => "soc",
            Self::Informatics => "inf",
            Self::Biology => "bio",
            Self::Geography => "geo",
            Self::English => "eng",
            Self::German => "ger",
            Self::French => "fren",
            Self::Spanish => "span",
            Self::Chinese => "chi",
            Self::Literature => "lit",
        }
    }

    /// Fixed display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Russian => "Русский",
            Self::Math => "Математика",
            Self::MathProfile => "Математика профильная",
            Self::Physics => "Физика",
            Self::Chemistry => "Химия",
            Self::History => "История",
            Self::SocialStudies => "Обществознание",
            Self::Informatics => "Информатика",
            Self::Biology => "Биология",
            Self::Geography => "География",
            Self::English => "Английский",
            Self::German => "Немецкий",
            Self::French => "Французский",
            Self::Spanish => "Испанский",
            Self::Chinese => "Китайский",
            Self::Literature => "Литература",
        }
    }

    /// Reverse lookup from a storage/callback key.
    pub fn from_key(key: &str) -> Option<Subject> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
