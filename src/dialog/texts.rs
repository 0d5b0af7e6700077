//! Fixed user-facing label tables and reply renderers.
//!
//! Every string the bot shows lives here. Button labels double as text
//! triggers: a reply-keyboard press arrives as a plain text message
//! carrying the label.

use crate::domain::institution::{Funding, Institution};
use crate::domain::profile::UserProfile;
use crate::domain::subject::Subject;
use crate::error::ValidationError;

// ── Button labels ───────────────────────────────────────────────────

pub mod button {
    pub const START_SEARCH: &str = "Начать поиск";
    pub const ENTER_DATA: &str = "Внести данные";
    pub const HELP: &str = "Что делать?";
    pub const ABOUT: &str = "О нас";
    pub const VIEW_DATA: &str = "Просмотреть данные";

    pub const CONFIRM_CLEAR: &str = "Да, удалить старые данные";
    pub const DECLINE_CLEAR: &str = "Нет, оставить старые данные";

    pub const CITY: &str = "Город";
    pub const SCORES: &str = "Баллы ЕГЭ";
    pub const SPECIALIZATION: &str = "Специальность вуза";
    pub const BACK_TO_MAIN: &str = "Вернуться в начало";

    pub const BUDGET: &str = "Бюджет";
    pub const PAID: &str = "Платное";

    pub const SAVE_DATA: &str = "Сохранить данные";
    pub const DELETE_DATA: &str = "Удалить данные";

    pub const PAGE_PREV: &str = "Назад";
    pub const PAGE_NEXT: &str = "Вперед";

    pub const CITY_MOSCOW: &str = "Москва";
    pub const CITY_SPB: &str = "Санкт-Петербург";
}

// ── Fixed messages ──────────────────────────────────────────────────

pub const WELCOME: &str = "Добро пожаловать, здесь мы поможем тебе найти университет \
     по твоим баллам ЕГЭ.\nВоспользуйся /help если что-то непонятно!";

pub const HELP: &str = "1. Воспользуйся коммандой /change_data, чтобы внести или \
     изменить свои баллы по ЕГЭ\n\
     2. Теперь нажми на кнопку Начать поиск и ожидай результата";

pub const ABOUT: &str = "В случае технических сбоев, либо некорректности данных \
     обращайтесь к поддержке.\n\n\
     Данные о ВУЗах были взяты с сайта vuzopedia.com\n\
     Автор не преследует цели присвоить себе какие-либо данные!\n\n\
     Приятного пользования!";

pub const ASK_CLEAR_OLD: &str = "Хотите удалить старые данные?";
pub const NO_OLD_DATA: &str = "Старые данные не найдены.";
pub const OLD_DATA_DELETED: &str = "Старые данные удалены. Что вы хотите изменить?";
pub const OLD_DATA_KEPT: &str = "Старые данные сохранены. Что вы хотите изменить?";

pub const CITY_PROMPT: &str = "Введите ваш город:";
pub const CITY_SAVED: &str = "Вы успешно сохранили свой город";

pub const SUBJECTS_PROMPT: &str = "Выберите предмет для ввода баллов:";
pub const SCORE_NOT_A_NUMBER: &str = "Пожалуйста, введите корректное числовое значение.";
pub const SCORE_OVER_LIMIT: &str =
    "Пожалуйста, введите числовое значение, не превышающее 100.";
pub const DATA_SAVED: &str = "Данные успешно сохранены!";

pub const SPEC_PROMPT: &str = "Выберите специальность:";
pub const SPEC_SAVED: &str = "Специальность успешно сохранена!";

pub const BACK_TO_MAIN: &str = "Вы вернулись в главное меню.";
pub const BUDGET_PROMPT: &str = "На какие места вы рассчитываете?";

pub const NO_AGGREGATE: &str =
    "У вас нет данных о средних баллах. Пожалуйста, введите данные.";
pub const NO_MATCHES_BUDGET: &str =
    "Не найдено вузов, соответствующих вашим средним баллам для бюджета.";
pub const NO_MATCHES_PAID: &str =
    "Не найдено вузов, соответствующих вашим средним баллам для платного.";

pub const RESULTS_HEADER: &str = "Подходящие университеты:";
pub const PAGE_HEADER: &str = "Выберите нужный вам ВУЗ:";
pub const INSTITUTION_NOT_FOUND: &str = "Университет не найден.";

pub const DATA_DELETED: &str = "Данные успешно удалены.";
pub const NO_DATA: &str = "Данные не найдены.";
pub const NOT_SET: &str = "не указано";

pub const GENERIC_FAILURE: &str = "Что-то пошло не так. Попробуйте ещё раз позже.";

// ── Parameterized renderers ─────────────────────────────────────────

pub fn score_prompt(subject: Subject) -> String {
    format!("Введите баллы для предмета {}:", subject.label())
}

pub fn score_saved(subject: Subject) -> String {
    format!(
        "Баллы для предмета {} сохранены.\nВыберите следующий предмет.",
        subject.label()
    )
}

pub fn validation_message(error: ValidationError) -> &'static str {
    match error {
        ValidationError::NotANumber => SCORE_NOT_A_NUMBER,
        ValidationError::OutOfRange(_) => SCORE_OVER_LIMIT,
    }
}

pub fn no_matches(funding: Funding) -> &'static str {
    match funding {
        Funding::Budget => NO_MATCHES_BUDGET,
        Funding::Paid => NO_MATCHES_PAID,
    }
}

/// Numbered name list for one page of results.
pub fn results_list(names: &[&str]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The stored-data view: city, present scores, aggregate, specializations.
pub fn profile_view(profile: &UserProfile) -> String {
    let city_line = match &profile.city {
        Some(city) => format!("Выбранный город: {city}"),
        None => "Выбранный город: не выбран".to_string(),
    };

    let scores_line = if profile.scores.is_empty() {
        "Баллы ЕГЭ: не указаны".to_string()
    } else {
        let lines: Vec<String> = profile
            .scores
            .iter()
            .map(|(subject, score)| format!("{}: {}", subject.label(), score))
            .collect();
        format!("Баллы ЕГЭ:\n{}", lines.join("\n"))
    };

    let aggregate_line = match profile.aggregate {
        Some(value) => format!("Ваш средний балл: {value:.2}"),
        None => "Ваш средний балл: не указан".to_string(),
    };

    let specs_line = if profile.specializations.is_empty() {
        "Специализации: не выбраны".to_string()
    } else {
        let labels: Vec<&str> = profile.specializations.iter().map(|s| s.label()).collect();
        format!("Выбранные специализации: {}", labels.join(", "))
    };

    format!("{city_line}\n{scores_line}\n{aggregate_line}\n{specs_line}")
}

/// The institution detail card.
pub fn institution_view(inst: &Institution) -> String {
    let specialties = if inst.specializations.is_empty() {
        "Нет доступных специальностей".to_string()
    } else {
        let labels: Vec<&str> = inst.specializations.iter().map(|s| s.label()).collect();
        labels.join(", ")
    };

    format!(
        "Название: {}\n\
         Количество бюджетных мест: {}\n\
         Количество платных мест: {}\n\
         Необходимое количество баллов ЕГЭ для бюджета: {}\n\
         Необходимое количество баллов ЕГЭ для платного: {}\n\
         Все специальности: {}\n\
         Ссылка: {}",
        inst.name,
        inst.budget_places.as_deref().unwrap_or(NOT_SET),
        inst.paid_places.as_deref().unwrap_or(NOT_SET),
        inst.budget_score.as_deref().unwrap_or(NOT_SET),
        inst.paid_score.as_deref().unwrap_or(NOT_SET),
        specialties,
        inst.url.as_deref().unwrap_or(NOT_SET),
    )
}
