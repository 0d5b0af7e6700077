//! Telegram channel — long-polls the Bot API for updates.
//!
//! Converts `message` updates into text events and `callback_query`
//! updates into choice events, and renders the dialog's declarative menus
//! into reply / inline keyboards.

use async_trait::async_trait;

use crate::channels::channel::{Channel, EventStream, IncomingEvent};
use crate::dialog::event::{Menu, Outgoing, Reply, ResultsMenu, token};
use crate::dialog::texts::button;
use crate::domain::specialization::Specialization;
use crate::domain::subject::Subject;
use crate::error::ChannelError;

/// Maximum message length for Telegram's sendMessage API.
const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Long-poll timeout passed to getUpdates, seconds.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Telegram channel — connects to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: String,
    allowed_users: Vec<String>,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, allowed_users: Vec<String>) -> Self {
        Self {
            bot_token,
            allowed_users,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    /// Check if a username is in the allowed list.
    pub fn is_user_allowed(&self, username: &str) -> bool {
        self.allowed_users.iter().any(|u| u == "*" || u == username)
    }

    /// Send a text message with an optional keyboard. Splits long texts
    /// that exceed Telegram's 4096 char limit; the keyboard rides on the
    /// last chunk.
    async fn send_reply(&self, chat_id: &str, reply: &Reply) -> Result<(), ChannelError> {
        let chunks = split_message(&reply.text, TELEGRAM_MAX_MESSAGE_LENGTH);
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.iter().enumerate() {
            let mut body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            if i == last {
                if let Some(menu) = &reply.menu {
                    body["reply_markup"] = reply_markup(menu);
                }
            }

            let resp = self
                .client
                .post(self.api_url("sendMessage"))
                .json(&body)
                .send()
                .await
                .map_err(|e| ChannelError::SendFailed {
                    name: "telegram".into(),
                    reason: e.to_string(),
                })?;

            if !resp.status().is_success() {
                let err = resp.text().await.unwrap_or_default();
                return Err(ChannelError::SendFailed {
                    name: "telegram".into(),
                    reason: format!("sendMessage failed: {err}"),
                });
            }
        }
        Ok(())
    }

    /// Edit a previously sent message in place (page navigation).
    async fn edit_message(
        &self,
        chat_id: &str,
        message_id: i64,
        reply: &Reply,
    ) -> Result<(), ChannelError> {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": reply.text,
        });
        // editMessageText only accepts inline keyboards
        if let Some(menu) = &reply.menu {
            if is_inline(menu) {
                body["reply_markup"] = reply_markup(menu);
            }
        }

        let resp = self
            .client
            .post(self.api_url("editMessageText"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let err = resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!("editMessageText failed: {err}"),
            });
        }
        Ok(())
    }
}

// ── Channel trait implementation ────────────────────────────────────

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<EventStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let bot_token = self.bot_token.clone();
        let allowed_users = self.allowed_users.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;

            tracing::info!("Telegram channel listening for updates...");

            loop {
                let url = format!("https://api.telegram.org/bot{}/getUpdates", bot_token);
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": POLL_TIMEOUT_SECS,
                    "allowed_updates": ["message", "callback_query"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Telegram poll error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let data: serde_json::Value = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let Some(results) = data.get("result").and_then(serde_json::Value::as_array)
                else {
                    continue;
                };

                for update in results {
                    if let Some(uid) = update.get("update_id").and_then(serde_json::Value::as_i64)
                    {
                        offset = uid + 1;
                    }

                    let event = if let Some(message) = update.get("message") {
                        message_to_event(message, &allowed_users)
                    } else if let Some(callback) = update.get("callback_query") {
                        // Acknowledge the callback so the client stops spinning
                        if let Some(id) = callback.get("id").and_then(|v| v.as_str()) {
                            let _ = client
                                .post(format!(
                                    "https://api.telegram.org/bot{}/answerCallbackQuery",
                                    bot_token
                                ))
                                .json(&serde_json::json!({ "callback_query_id": id }))
                                .send()
                                .await;
                        }
                        callback_to_event(callback, &allowed_users)
                    } else {
                        None
                    };

                    if let Some(event) = event {
                        if tx.send(event).is_err() {
                            tracing::info!("Telegram listener channel closed");
                            return;
                        }
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(&self, event: &IncomingEvent, out: Outgoing) -> Result<(), ChannelError> {
        let chat_id = event
            .metadata
            .get("chat_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: "No chat_id in event metadata".into(),
            })?;

        match out {
            Outgoing::Reply(reply) => self.send_reply(chat_id, &reply).await,
            Outgoing::EditSource(reply) => {
                let message_id = event
                    .metadata
                    .get("message_id")
                    .and_then(serde_json::Value::as_i64)
                    .ok_or_else(|| ChannelError::SendFailed {
                        name: "telegram".into(),
                        reason: "No message_id in event metadata".into(),
                    })?;
                self.edit_message(chat_id, message_id, &reply).await
            }
        }
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("getMe returned {}", resp.status()),
            })
        }
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        tracing::info!("Telegram channel shutting down");
        Ok(())
    }
}

// ── Update conversion ───────────────────────────────────────────────

/// Convert a `message` update into a text event, applying the allowlist.
fn message_to_event(
    message: &serde_json::Value,
    allowed_users: &[String],
) -> Option<IncomingEvent> {
    let text = message.get("text").and_then(serde_json::Value::as_str)?;
    let from = message.get("from")?;
    let user_id = from.get("id").and_then(serde_json::Value::as_i64)?.to_string();
    let username = from
        .get("username")
        .and_then(|u| u.as_str())
        .unwrap_or("unknown");

    if !check_user_allowed(allowed_users, [username, user_id.as_str()]) {
        tracing::warn!(
            username,
            user_id,
            "Telegram: ignoring message from unauthorized user"
        );
        return None;
    }

    let chat_id = message
        .get("chat")
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64)
        .map(|id| id.to_string())
        .unwrap_or_default();

    Some(IncomingEvent::text(user_id, text).with_metadata(serde_json::json!({
        "chat_id": chat_id,
        "username": username,
    })))
}

/// Convert a `callback_query` update into a choice event. Carries the
/// source message id so the dialog's edits land on the right message.
fn callback_to_event(
    callback: &serde_json::Value,
    allowed_users: &[String],
) -> Option<IncomingEvent> {
    let data = callback.get("data").and_then(serde_json::Value::as_str)?;
    let from = callback.get("from")?;
    let user_id = from.get("id").and_then(serde_json::Value::as_i64)?.to_string();
    let username = from
        .get("username")
        .and_then(|u| u.as_str())
        .unwrap_or("unknown");

    if !check_user_allowed(allowed_users, [username, user_id.as_str()]) {
        tracing::warn!(
            username,
            user_id,
            "Telegram: ignoring callback from unauthorized user"
        );
        return None;
    }

    let message = callback.get("message");
    let chat_id = message
        .and_then(|m| m.get("chat"))
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64)
        .map(|id| id.to_string())
        .unwrap_or_default();
    let message_id = message
        .and_then(|m| m.get("message_id"))
        .and_then(serde_json::Value::as_i64);

    Some(
        IncomingEvent::choice(user_id, data).with_metadata(serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "username": username,
        })),
    )
}

/// Check if any identity in the iterator matches the allowed users list.
fn check_user_allowed<'a>(
    allowed_users: &[String],
    identities: impl IntoIterator<Item = &'a str>,
) -> bool {
    let ids: Vec<&str> = identities.into_iter().collect();
    allowed_users
        .iter()
        .any(|u| u == "*" || ids.contains(&u.as_str()))
}

// ── Keyboard rendering ──────────────────────────────────────────────

/// Whether a menu renders as an inline keyboard (attachable to edits).
fn is_inline(menu: &Menu) -> bool {
    matches!(
        menu,
        Menu::Subjects | Menu::Specializations | Menu::StoredData | Menu::Results(_)
    )
}

/// Render a menu into a Bot API `reply_markup` object.
fn reply_markup(menu: &Menu) -> serde_json::Value {
    match menu {
        Menu::Main => reply_keyboard(
            &[
                vec![button::START_SEARCH],
                vec![button::ENTER_DATA],
                vec![button::HELP, button::ABOUT],
                vec![button::VIEW_DATA],
            ],
            Some("Выберите пункт меню..."),
            false,
        ),
        Menu::ConfirmClear => reply_keyboard(
            &[
                vec![button::CONFIRM_CLEAR],
                vec![button::DECLINE_CLEAR],
                vec![button::VIEW_DATA],
            ],
            None,
            true,
        ),
        Menu::ChangeData => reply_keyboard(
            &[
                vec![button::CITY, button::SCORES],
                vec![button::SPECIALIZATION, button::BACK_TO_MAIN],
            ],
            Some("Что хотите изменить?"),
            false,
        ),
        Menu::Cities => reply_keyboard(
            &[vec![button::CITY_MOSCOW], vec![button::CITY_SPB]],
            Some("Выберите город..."),
            false,
        ),
        Menu::BudgetChoice => {
            reply_keyboard(&[vec![button::BUDGET, button::PAID]], None, false)
        }
        Menu::Subjects => {
            let buttons: Vec<(String, String)> = Subject::ALL
                .iter()
                .map(|s| (s.label().to_string(), format!("{}{}", token::SUBJECT_PREFIX, s.key())))
                .collect();
            let mut rows = inline_grid(&buttons, 2);
            rows.push(serde_json::json!([
                { "text": button::SAVE_DATA, "callback_data": token::SAVE }
            ]));
            serde_json::json!({ "inline_keyboard": rows })
        }
        Menu::Specializations => {
            let buttons: Vec<(String, String)> = Specialization::ALL
                .iter()
                .map(|s| (s.label().to_string(), s.token()))
                .collect();
            let rows = inline_grid(&buttons, 2);
            serde_json::json!({ "inline_keyboard": rows })
        }
        Menu::StoredData => serde_json::json!({
            "inline_keyboard": [[
                { "text": button::DELETE_DATA, "callback_data": token::CLEAR_DATA }
            ]]
        }),
        Menu::Results(results) => results_markup(results),
    }
}

fn reply_keyboard(
    rows: &[Vec<&str>],
    placeholder: Option<&str>,
    one_time: bool,
) -> serde_json::Value {
    let keyboard: Vec<Vec<serde_json::Value>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|label| serde_json::json!({ "text": label }))
                .collect()
        })
        .collect();
    let mut markup = serde_json::json!({
        "keyboard": keyboard,
        "resize_keyboard": true,
    });
    if let Some(placeholder) = placeholder {
        markup["input_field_placeholder"] = serde_json::Value::String(placeholder.into());
    }
    if one_time {
        markup["one_time_keyboard"] = serde_json::Value::Bool(true);
    }
    markup
}

/// Group (label, callback) pairs into rows of `per_row` inline buttons.
fn inline_grid(buttons: &[(String, String)], per_row: usize) -> Vec<serde_json::Value> {
    buttons
        .chunks(per_row)
        .map(|chunk| {
            let row: Vec<serde_json::Value> = chunk
                .iter()
                .map(|(label, callback)| {
                    serde_json::json!({ "text": label, "callback_data": callback })
                })
                .collect();
            serde_json::Value::Array(row)
        })
        .collect()
}

/// Numbered result buttons, one per row, plus a navigation row.
fn results_markup(results: &ResultsMenu) -> serde_json::Value {
    let mut rows: Vec<serde_json::Value> = results
        .entries
        .iter()
        .map(|(ordinal, id)| {
            serde_json::json!([{
                "text": ordinal.to_string(),
                "callback_data": format!("{}{}", token::INSTITUTION_PREFIX, id),
            }])
        })
        .collect();

    let mut nav: Vec<serde_json::Value> = Vec::new();
    if results.has_prev {
        nav.push(serde_json::json!({
            "text": button::PAGE_PREV,
            "callback_data": format!("{}{}", token::PAGE_PREFIX, results.page - 1),
        }));
    }
    if results.has_next {
        nav.push(serde_json::json!({
            "text": button::PAGE_NEXT,
            "callback_data": format!("{}{}", token::PAGE_PREFIX, results.page + 1),
        }));
    }
    if !nav.is_empty() {
        rows.push(serde_json::Value::Array(nav));
    }

    serde_json::json!({ "inline_keyboard": rows })
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Split a message into chunks that fit Telegram's character limit.
/// Tries to split on newlines, then spaces, then hard-cuts on the
/// nearest char boundary (all bot texts are Cyrillic, so byte offsets
/// are not char boundaries in general).
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        let mut cut = max_len;
        while !remaining.is_char_boundary(cut) {
            cut -= 1;
        }
        let chunk = &remaining[..cut];
        let split_at = chunk
            .rfind('\n')
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(cut);

        // Don't split at position 0 (infinite loop guard)
        let split_at = if split_at == 0 { cut } else { split_at };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

// ── Tests ───────────────────────────────────────────────────────────
