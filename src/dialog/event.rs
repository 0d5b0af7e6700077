//! Outputs of the state machine: replies and declarative menus.
//!
//! Menus are transport-neutral descriptions; the channel layer renders
//! them into whatever keyboard concept the transport has.

/// Fixed choice tokens carried by inline menus.
pub mod token {
    /// Finish score entry, back to the change-data menu.
    pub const SAVE: &str = "save";
    /// Erase the whole stored profile (offered from the view-data reply).
    pub const CLEAR_DATA: &str = "clear_data";
    /// Prefix for subject selection: `sub_<key>`.
    pub const SUBJECT_PREFIX: &str = "sub_";
    /// Prefix for specialization selection: `spec_<key>`.
    pub const SPEC_PREFIX: &str = "spec_";
    /// Prefix for result-page navigation: `page_<index>`.
    pub const PAGE_PREFIX: &str = "page_";
    /// Prefix for institution detail: `university_<id>`.
    pub const INSTITUTION_PREFIX: &str = "university_";
}

/// A menu to attach to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    /// Main menu (search, enter data, help, about, view data).
    Main,
    /// Delete-old-data confirmation.
    ConfirmClear,
    /// What-to-change menu (city, scores, specialization, return).
    ChangeData,
    /// City suggestions.
    Cities,
    /// Subject grid plus the save button.
    Subjects,
    /// Specialization grid.
    Specializations,
    /// Budget vs. paid choice.
    BudgetChoice,
    /// Inline delete control under the stored-data view.
    StoredData,
    /// Numbered result buttons plus navigation.
    Results(ResultsMenu),
}

/// Inline controls for one page of match results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsMenu {
    /// Numbered buttons on this page: (ordinal shown, institution id).
    pub entries: Vec<(usize, i64)>,
    /// The page the menu belongs to.
    pub page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }
}

/// What the transport should do with a rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Send a new message to the user.
    Reply(Reply),
    /// Edit the message the triggering choice came from (page navigation).
    EditSource(Reply),
}
