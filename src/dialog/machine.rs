//! The conversation state machine.
//!
//! One dispatcher per process. Each event is matched first against the
//! global triggers (valid from any state), then against the handlers of
//! the user's current state. A trigger that is not valid for the current
//! state is ignored: no transition, no side effect, no reply — deliberate
//! policy, not an error.
//!
//! Validation-class failures (bad score text, unknown category token) are
//! resolved here at the transition boundary and never reach the
//! aggregator or the matching engine. Store faults propagate out of
//! [`Dialog::handle`]; the caller converts them to one generic
//! user-visible message.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::channels::channel::{EventPayload, IncomingEvent};
use crate::dialog::event::{Menu, Outgoing, Reply, ResultsMenu, token};
use crate::dialog::sessions::SessionStore;
use crate::dialog::state::{DialogState, MatchEntry};
use crate::dialog::texts::{self, button};
use crate::domain::institution::Funding;
use crate::domain::profile::parse_score;
use crate::domain::specialization::Specialization;
use crate::domain::subject::Subject;
use crate::error::{Error, NoAggregateDataError};
use crate::matching::engine::shortlist;
use crate::matching::page::page_of;
use crate::store::retry::with_backoff;
use crate::store::traits::{CatalogStore, ProfileStore};

/// The conversational core: state tracking plus transition side effects.
pub struct Dialog {
    profiles: Arc<dyn ProfileStore>,
    catalog: Arc<dyn CatalogStore>,
    sessions: SessionStore,
}

impl Dialog {
    pub fn new(profiles: Arc<dyn ProfileStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            profiles,
            catalog,
            sessions: SessionStore::new(),
        }
    }

    /// Process one event and return the replies to deliver.
    pub async fn handle(&self, event: &IncomingEvent) -> Result<Vec<Outgoing>, Error> {
        match &event.payload {
            EventPayload::Text(text) => self.handle_text(&event.user_id, text.trim()).await,
            EventPayload::Choice(choice) => self.handle_choice(&event.user_id, choice).await,
        }
    }

    // ── Text events ─────────────────────────────────────────────────

    async fn handle_text(&self, user_id: &str, text: &str) -> Result<Vec<Outgoing>, Error> {
        // Global triggers, valid from any state.
        match text {
            "/start" => {
                self.sessions.clear(user_id).await;
                return Ok(reply(texts::WELCOME, Menu::Main));
            }
            "/help" | button::HELP => return Ok(reply(texts::HELP, Menu::Main)),
            "/about" | button::ABOUT => return Ok(reply(texts::ABOUT, Menu::Main)),
            "/change_data" | button::ENTER_DATA => return self.start_editing(user_id).await,
            button::VIEW_DATA => return self.view_data(user_id).await,
            button::BACK_TO_MAIN => {
                self.sessions.clear(user_id).await;
                return Ok(reply(texts::BACK_TO_MAIN, Menu::Main));
            }
            button::START_SEARCH => {
                self.sessions
                    .with(user_id, |s| s.state = DialogState::AwaitingBudgetChoice)
                    .await;
                return Ok(reply(texts::BUDGET_PROMPT, Menu::BudgetChoice));
            }
            _ => {}
        }

        let state = self.sessions.state(user_id).await;
        match (state, text) {
            (DialogState::ConfirmClearOldData, button::CONFIRM_CLEAR) => {
                with_backoff(|| self.profiles.delete(user_id)).await?;
                info!(user_id, "Old profile data erased");
                self.sessions
                    .with(user_id, |s| s.state = DialogState::ChangeDataMenu)
                    .await;
                Ok(reply(texts::OLD_DATA_DELETED, Menu::ChangeData))
            }
            (DialogState::ConfirmClearOldData, button::DECLINE_CLEAR) => {
                self.sessions
                    .with(user_id, |s| s.state = DialogState::ChangeDataMenu)
                    .await;
                Ok(reply(texts::OLD_DATA_KEPT, Menu::ChangeData))
            }
            (DialogState::ChangeDataMenu, button::CITY) => {
                self.sessions
                    .with(user_id, |s| s.state = DialogState::CollectingCity)
                    .await;
                Ok(reply(texts::CITY_PROMPT, Menu::Cities))
            }
            (DialogState::ChangeDataMenu, button::SCORES) => {
                self.sessions
                    .with(user_id, |s| s.state = DialogState::SubjectPicker)
                    .await;
                Ok(reply(texts::SUBJECTS_PROMPT, Menu::Subjects))
            }
            (DialogState::ChangeDataMenu, button::SPECIALIZATION) => {
                self.sessions
                    .with(user_id, |s| s.state = DialogState::SpecializationPicker)
                    .await;
                Ok(reply(texts::SPEC_PROMPT, Menu::Specializations))
            }
            (DialogState::CollectingCity, city) => {
                with_backoff(|| self.profiles.upsert_location(user_id, city)).await?;
                info!(user_id, city, "Location saved");
                self.sessions
                    .with(user_id, |s| s.state = DialogState::ChangeDataMenu)
                    .await;
                Ok(reply(texts::CITY_SAVED, Menu::ChangeData))
            }
            (DialogState::CollectingScore, raw) => self.collect_score(user_id, raw).await,
            (DialogState::AwaitingBudgetChoice, button::BUDGET) => {
                self.search(user_id, Funding::Budget).await
            }
            (DialogState::AwaitingBudgetChoice, button::PAID) => {
                self.search(user_id, Funding::Paid).await
            }
            _ => {
                debug!(user_id, %state, "Ignoring unexpected text input");
                Ok(Vec::new())
            }
        }
    }

    async fn start_editing(&self, user_id: &str) -> Result<Vec<Outgoing>, Error> {
        let profile = with_backoff(|| self.profiles.get(user_id)).await?;
        let has_data = profile.is_some_and(|p| !p.is_empty());

        if has_data {
            self.sessions
                .with(user_id, |s| s.state = DialogState::ConfirmClearOldData)
                .await;
            Ok(reply(texts::ASK_CLEAR_OLD, Menu::ConfirmClear))
        } else {
            self.sessions
                .with(user_id, |s| s.state = DialogState::ChangeDataMenu)
                .await;
            Ok(reply(texts::NO_OLD_DATA, Menu::ChangeData))
        }
    }

    async fn view_data(&self, user_id: &str) -> Result<Vec<Outgoing>, Error> {
        let profile = with_backoff(|| self.profiles.get(user_id)).await?;
        match profile {
            Some(profile) if !profile.is_empty() => Ok(reply(
                texts::profile_view(&profile),
                Menu::StoredData,
            )),
            _ => Ok(vec![Outgoing::Reply(Reply::new(texts::NO_DATA))]),
        }
    }

    async fn collect_score(&self, user_id: &str, raw: &str) -> Result<Vec<Outgoing>, Error> {
        let Some(subject) = self.sessions.with(user_id, |s| s.current_subject).await else {
            // No subject on record: the picker was never passed through.
            debug!(user_id, "Score text with no subject in session, ignoring");
            return Ok(Vec::new());
        };

        match parse_score(raw) {
            Ok(value) => {
                with_backoff(|| self.profiles.upsert_score(user_id, subject, value)).await?;
                info!(user_id, subject = %subject, value, "Score saved");
                self.sessions.with(user_id, |s| {
                    s.state = DialogState::SubjectPicker;
                    s.current_subject = None;
                })
                .await;
                Ok(vec![
                    Outgoing::Reply(Reply::new(texts::score_saved(subject))),
                    Outgoing::Reply(Reply::with_menu(texts::SUBJECTS_PROMPT, Menu::Subjects)),
                ])
            }
            Err(error) => {
                debug!(user_id, raw, %error, "Score validation failed");
                Ok(vec![Outgoing::Reply(Reply::new(texts::validation_message(
                    error,
                )))])
            }
        }
    }

    async fn search(&self, user_id: &str, funding: Funding) -> Result<Vec<Outgoing>, Error> {
        let profile = with_backoff(|| self.profiles.get(user_id)).await?;
        let Some(aggregate) = profile.and_then(|p| p.aggregate) else {
            let err = NoAggregateDataError;
            info!(user_id, %err, "Search refused");
            self.sessions.clear(user_id).await;
            return Ok(reply(texts::NO_AGGREGATE, Menu::Main));
        };

        let catalog = with_backoff(|| self.catalog.list_all()).await?;
        let matches = shortlist(aggregate, funding, catalog);
        info!(
            user_id,
            aggregate,
            funding = ?funding,
            matched = matches.len(),
            "Search complete"
        );

        if matches.is_empty() {
            self.sessions.clear(user_id).await;
            return Ok(reply(texts::no_matches(funding), Menu::Main));
        }

        let entries: Vec<MatchEntry> = matches
            .into_iter()
            .map(|inst| MatchEntry {
                id: inst.id,
                name: inst.name,
            })
            .collect();
        let first = render_results(texts::RESULTS_HEADER, &entries, 0);
        self.sessions.with(user_id, |s| {
            s.state = DialogState::ReviewingResults;
            s.matches = entries;
            s.page = 0;
        })
        .await;
        Ok(vec![Outgoing::Reply(first)])
    }

    // ── Choice events ───────────────────────────────────────────────

    async fn handle_choice(&self, user_id: &str, choice: &str) -> Result<Vec<Outgoing>, Error> {
        if choice == token::CLEAR_DATA {
            with_backoff(|| self.profiles.delete(user_id)).await?;
            info!(user_id, "Profile data cleared");
            self.sessions.clear(user_id).await;
            return Ok(reply(texts::DATA_DELETED, Menu::Main));
        }

        let state = self.sessions.state(user_id).await;
        match state {
            DialogState::SubjectPicker | DialogState::CollectingScore => {
                if choice == token::SAVE {
                    self.sessions.with(user_id, |s| {
                        s.state = DialogState::ChangeDataMenu;
                        s.current_subject = None;
                    })
                    .await;
                    return Ok(reply(texts::DATA_SAVED, Menu::ChangeData));
                }
                if let Some(key) = choice.strip_prefix(token::SUBJECT_PREFIX) {
                    let Some(subject) = Subject::from_key(key) else {
                        debug!(user_id, choice, "Unknown subject token, ignoring");
                        return Ok(Vec::new());
                    };
                    self.sessions.with(user_id, |s| {
                        s.state = DialogState::CollectingScore;
                        s.current_subject = Some(subject);
                    })
                    .await;
                    return Ok(vec![Outgoing::Reply(Reply::new(texts::score_prompt(
                        subject,
                    )))]);
                }
                Ok(Vec::new())
            }
            DialogState::SpecializationPicker if choice.starts_with(token::SPEC_PREFIX) => {
                match Specialization::from_token(choice) {
                    Ok(category) => {
                        with_backoff(|| self.profiles.upsert_specialization(user_id, category))
                            .await?;
                        info!(user_id, category = %category, "Specialization selected");
                        Ok(reply(texts::SPEC_SAVED, Menu::ChangeData))
                    }
                    Err(error) => {
                        warn!(user_id, %error, "Specialization selection rejected");
                        Ok(Vec::new())
                    }
                }
            }
            DialogState::ReviewingResults => {
                if let Some(raw) = choice.strip_prefix(token::PAGE_PREFIX) {
                    let Ok(requested) = raw.parse::<usize>() else {
                        debug!(user_id, choice, "Unparseable page token, ignoring");
                        return Ok(Vec::new());
                    };
                    return Ok(self.turn_page(user_id, requested).await);
                }
                if let Some(raw) = choice.strip_prefix(token::INSTITUTION_PREFIX) {
                    let Ok(id) = raw.parse::<i64>() else {
                        debug!(user_id, choice, "Unparseable institution token, ignoring");
                        return Ok(Vec::new());
                    };
                    return self.institution_detail(user_id, id).await;
                }
                Ok(Vec::new())
            }
            _ => {
                debug!(user_id, %state, choice, "Ignoring unexpected choice");
                Ok(Vec::new())
            }
        }
    }

    async fn turn_page(&self, user_id: &str, requested: usize) -> Vec<Outgoing> {
        let rendered = self
            .sessions
            .with(user_id, |s| {
                if s.matches.is_empty() {
                    return None;
                }
                let index = page_of(&s.matches, requested).index;
                s.page = index;
                Some(render_results(texts::PAGE_HEADER, &s.matches, index))
            })
            .await;
        match rendered {
            Some(body) => vec![Outgoing::EditSource(body)],
            None => Vec::new(),
        }
    }

    async fn institution_detail(&self, user_id: &str, id: i64) -> Result<Vec<Outgoing>, Error> {
        let inst = with_backoff(|| self.catalog.get_by_id(id)).await?;
        match inst {
            Some(inst) => Ok(reply(texts::institution_view(&inst), Menu::Main)),
            None => {
                warn!(user_id, id, "Institution detail requested for unknown id");
                Ok(vec![Outgoing::Reply(Reply::new(
                    texts::INSTITUTION_NOT_FOUND,
                ))])
            }
        }
    }
}

/// Single reply with a menu.
fn reply(text: impl Into<String>, menu: Menu) -> Vec<Outgoing> {
    vec![Outgoing::Reply(Reply::with_menu(text, menu))]
}

/// Render one page of cached results: numbered list plus inline controls.
fn render_results(header: &str, entries: &[MatchEntry], index: usize) -> Reply {
    let page = page_of(entries, index);
    let names: Vec<&str> = page.items.iter().map(|e| e.name.as_str()).collect();
    let menu = Menu::Results(ResultsMenu {
        entries: page
            .items
            .iter()
            .enumerate()
            .map(|(i, e)| (i + 1, e.id))
            .collect(),
        page: page.index,
        has_prev: page.has_prev,
        has_next: page.has_next,
    });
    Reply::with_menu(
        format!("{header}\n{}", texts::results_list(&names)),
        menu,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::institution::Institution;
    use crate::store::libsql_backend::LibSqlBackend;

    fn inst(id: i64, name: &str, budget: Option<&str>, paid: Option<&str>) -> Institution {
        Institution {
            id,
            name: name.into(),
            city: "Москва".into(),
            tuition: None,
            budget_places: None,
            paid_places: None,
            budget_score: budget.map(String::from),
            paid_score: paid.map(String::from),
            url: None,
            specializations: BTreeSet::new(),
        }
    }

    async fn dialog_with_catalog(catalog: &[Institution]) -> Dialog {
        let profiles = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let store = LibSqlBackend::new_memory().await.unwrap();
        for record in catalog {
            store.insert_institution(record).await.unwrap();
        }
        Dialog::new(profiles, Arc::new(store))
    }

    fn text_event(text: &str) -> IncomingEvent {
        IncomingEvent::text("100", text)
    }

    fn choice_event(token: &str) -> IncomingEvent {
        IncomingEvent::choice("100", token)
    }

    #[tokio::test]
    async fn start_resets_and_welcomes() {
        let dialog = dialog_with_catalog(&[]).await;
        let out = dialog.handle(&text_event("/start")).await.unwrap();
        assert_eq!(out.len(), 1);
        match &out[0] {
            Outgoing::Reply(r) => {
                assert_eq!(r.text, texts::WELCOME);
                assert_eq!(r.menu, Some(Menu::Main));
            }
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(dialog.sessions.state("100").await, DialogState::Idle);
    }

    #[tokio::test]
    async fn unexpected_input_is_ignored() {
        let dialog = dialog_with_catalog(&[]).await;
        // Random text in Idle
        assert!(dialog.handle(&text_event("hello?")).await.unwrap().is_empty());
        // Budget button outside AwaitingBudgetChoice
        assert!(
            dialog
                .handle(&text_event(button::BUDGET))
                .await
                .unwrap()
                .is_empty()
        );
        // Page navigation outside ReviewingResults
        assert!(
            dialog
                .handle(&choice_event("page_1"))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(dialog.sessions.state("100").await, DialogState::Idle);
    }

    #[tokio::test]
    async fn edit_data_without_stored_data_skips_confirmation() {
        let dialog = dialog_with_catalog(&[]).await;
        let out = dialog.handle(&text_event(button::ENTER_DATA)).await.unwrap();
        match &out[0] {
            Outgoing::Reply(r) => assert_eq!(r.text, texts::NO_OLD_DATA),
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::ChangeDataMenu
        );
    }

    #[tokio::test]
    async fn edit_data_with_stored_data_asks_for_confirmation() {
        let dialog = dialog_with_catalog(&[]).await;
        dialog
            .profiles
            .upsert_location("100", "Москва")
            .await
            .unwrap();

        let out = dialog.handle(&text_event(button::ENTER_DATA)).await.unwrap();
        match &out[0] {
            Outgoing::Reply(r) => {
                assert_eq!(r.text, texts::ASK_CLEAR_OLD);
                assert_eq!(r.menu, Some(Menu::ConfirmClear));
            }
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::ConfirmClearOldData
        );
    }

    #[tokio::test]
    async fn score_collection_validates_and_loops() {
        let dialog = dialog_with_catalog(&[]).await;
        dialog.handle(&text_event(button::ENTER_DATA)).await.unwrap();
        dialog.handle(&text_event(button::SCORES)).await.unwrap();
        dialog.handle(&choice_event("sub_math")).await.unwrap();
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::CollectingScore
        );

        // Out of range: stays collecting, no mutation
        let out = dialog.handle(&text_event("105")).await.unwrap();
        match &out[0] {
            Outgoing::Reply(r) => assert_eq!(r.text, texts::SCORE_OVER_LIMIT),
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::CollectingScore
        );
        assert!(dialog.profiles.get("100").await.unwrap().is_none());

        // Not a number
        let out = dialog.handle(&text_event("abc")).await.unwrap();
        match &out[0] {
            Outgoing::Reply(r) => assert_eq!(r.text, texts::SCORE_NOT_A_NUMBER),
            other => panic!("unexpected output: {other:?}"),
        }

        // Valid score: saved, back to the picker
        dialog.handle(&text_event("90")).await.unwrap();
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::SubjectPicker
        );
        let profile = dialog.profiles.get("100").await.unwrap().unwrap();
        assert_eq!(profile.scores.get(&Subject::Math), Some(&90));
        assert_eq!(profile.aggregate, Some(270.0));
    }

    #[tokio::test]
    async fn search_without_scores_short_circuits_to_idle() {
        let dialog = dialog_with_catalog(&[inst(1, "A", Some("от 100"), None)]).await;
        dialog.handle(&text_event(button::START_SEARCH)).await.unwrap();
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::AwaitingBudgetChoice
        );

        let out = dialog.handle(&text_event(button::BUDGET)).await.unwrap();
        match &out[0] {
            Outgoing::Reply(r) => {
                assert_eq!(r.text, texts::NO_AGGREGATE);
                assert_eq!(r.menu, Some(Menu::Main));
            }
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(dialog.sessions.state("100").await, DialogState::Idle);
    }

    #[tokio::test]
    async fn search_renders_first_page_and_caches_results() {
        let catalog: Vec<Institution> = (1..=12)
            .map(|i| inst(i, &format!("U{i}"), Some("от 100"), None))
            .collect();
        let dialog = dialog_with_catalog(&catalog).await;
        dialog
            .profiles
            .upsert_score("100", Subject::Russian, 80)
            .await
            .unwrap();

        dialog.handle(&text_event(button::START_SEARCH)).await.unwrap();
        let out = dialog.handle(&text_event(button::BUDGET)).await.unwrap();
        let Outgoing::Reply(first) = &out[0] else {
            panic!("expected a fresh reply");
        };
        assert!(first.text.starts_with(texts::RESULTS_HEADER));
        assert!(first.text.contains("1. U1"));
        assert!(first.text.contains("5. U5"));
        assert!(!first.text.contains("U6"));
        let Some(Menu::Results(menu)) = &first.menu else {
            panic!("expected results menu");
        };
        assert_eq!(menu.entries.len(), 5);
        assert!(!menu.has_prev);
        assert!(menu.has_next);
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::ReviewingResults
        );
    }

    #[tokio::test]
    async fn page_navigation_edits_in_place_and_clamps() {
        let catalog: Vec<Institution> = (1..=12)
            .map(|i| inst(i, &format!("U{i}"), Some("от 100"), None))
            .collect();
        let dialog = dialog_with_catalog(&catalog).await;
        dialog
            .profiles
            .upsert_score("100", Subject::Russian, 80)
            .await
            .unwrap();
        dialog.handle(&text_event(button::START_SEARCH)).await.unwrap();
        dialog.handle(&text_event(button::BUDGET)).await.unwrap();

        let out = dialog.handle(&choice_event("page_2")).await.unwrap();
        let Outgoing::EditSource(body) = &out[0] else {
            panic!("expected an edit of the source message");
        };
        assert!(body.text.contains("1. U11"));
        assert!(body.text.contains("2. U12"));
        let Some(Menu::Results(menu)) = &body.menu else {
            panic!("expected results menu");
        };
        assert!(menu.has_prev);
        assert!(!menu.has_next);

        // Out-of-range index clamps to the last page
        let out = dialog.handle(&choice_event("page_99")).await.unwrap();
        let Outgoing::EditSource(body) = &out[0] else {
            panic!("expected an edit of the source message");
        };
        assert!(body.text.contains("U11"));
    }

    #[tokio::test]
    async fn specialization_selection_is_idempotent_and_logged_on_unknown() {
        let dialog = dialog_with_catalog(&[]).await;
        dialog.handle(&text_event(button::ENTER_DATA)).await.unwrap();
        dialog
            .handle(&text_event(button::SPECIALIZATION))
            .await
            .unwrap();

        dialog.handle(&choice_event("spec_mvd")).await.unwrap();
        dialog.handle(&choice_event("spec_mvd")).await.unwrap();
        let profile = dialog.profiles.get("100").await.unwrap().unwrap();
        assert_eq!(profile.specializations.len(), 1);

        // Unknown category: logged, ignored, state unchanged
        let out = dialog.handle(&choice_event("spec_nope")).await.unwrap();
        assert!(out.is_empty());
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::SpecializationPicker
        );
    }

    #[tokio::test]
    async fn clear_data_choice_erases_profile() {
        let dialog = dialog_with_catalog(&[]).await;
        dialog
            .profiles
            .upsert_location("100", "Москва")
            .await
            .unwrap();
        dialog
            .profiles
            .upsert_score("100", Subject::Russian, 70)
            .await
            .unwrap();

        let out = dialog
            .handle(&choice_event(token::CLEAR_DATA))
            .await
            .unwrap();
        match &out[0] {
            Outgoing::Reply(r) => assert_eq!(r.text, texts::DATA_DELETED),
            other => panic!("unexpected output: {other:?}"),
        }
        assert!(dialog.profiles.get("100").await.unwrap().is_none());
        assert_eq!(dialog.sessions.state("100").await, DialogState::Idle);
    }

    #[tokio::test]
    async fn institution_detail_fetches_by_id() {
        let mut record = inst(7, "МГУ", Some("от 100"), Some("от 90"));
        record.url = Some("https://example.com".into());
        let dialog = dialog_with_catalog(&[record]).await;
        dialog
            .profiles
            .upsert_score("100", Subject::Russian, 80)
            .await
            .unwrap();
        dialog.handle(&text_event(button::START_SEARCH)).await.unwrap();
        dialog.handle(&text_event(button::BUDGET)).await.unwrap();

        let out = dialog.handle(&choice_event("university_7")).await.unwrap();
        let Outgoing::Reply(body) = &out[0] else {
            panic!("expected a fresh reply");
        };
        assert!(body.text.contains("Название: МГУ"));
        // Detail does not leave the results state
        assert_eq!(
            dialog.sessions.state("100").await,
            DialogState::ReviewingResults
        );

        let out = dialog
            .handle(&choice_event("university_999"))
            .await
            .unwrap();
        let Outgoing::Reply(body) = &out[0] else {
            panic!("expected a fresh reply");
        };
        assert_eq!(body.text, texts::INSTITUTION_NOT_FOUND);
    }
}
