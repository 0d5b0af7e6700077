//! Dialog states and per-user session context.

use serde::{Deserialize, Serialize};

use crate::domain::subject::Subject;

/// Which input the dialog expects next from a user.
///
/// `Idle` is both the initial state and the rest state leaf actions
/// return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    Idle,
    ConfirmClearOldData,
    ChangeDataMenu,
    CollectingCity,
    SubjectPicker,
    CollectingScore,
    SpecializationPicker,
    AwaitingBudgetChoice,
    ReviewingResults,
}

impl Default for DialogState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for DialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::ConfirmClearOldData => "confirm_clear_old_data",
            Self::ChangeDataMenu => "change_data_menu",
            Self::CollectingCity => "collecting_city",
            Self::SubjectPicker => "subject_picker",
            Self::CollectingScore => "collecting_score",
            Self::SpecializationPicker => "specialization_picker",
            Self::AwaitingBudgetChoice => "awaiting_budget_choice",
            Self::ReviewingResults => "reviewing_results",
        };
        write!(f, "{s}")
    }
}

/// One cached match-result entry. The name rides along so page navigation
/// renders from the cache without re-reading the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub id: i64,
    pub name: String,
}

/// Per-user ephemeral conversation context. Created lazily on first
/// event; no durability beyond the conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub state: DialogState,
    /// The subject a score is currently being collected for.
    pub current_subject: Option<Subject>,
    /// Ordered match result cached by the last search.
    pub matches: Vec<MatchEntry>,
    /// Current page index into `matches`.
    pub page: usize,
}

impl Session {
    /// Back to the initial state, dropping all transient context.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
