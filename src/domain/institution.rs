//! Institution catalog records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::specialization::Specialization;

/// Seat allocation mode a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Funding {
    /// Budget-funded places, gated by the budget score threshold.
    Budget,
    /// Tuition-paying places, gated by the (typically lower) paid threshold.
    Paid,
}

/// A catalog record. Written only by the external ingestion pipeline;
/// read-only for matching.
///
/// Seat counts, cost, and score thresholds are kept as the raw scraped
/// text. Threshold texts look like `"от 270"`, or carry the `"от ?"`
/// placeholder when the source site did not know the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub city: String,
    /// Raw tuition cost text.
    pub tuition: Option<String>,
    /// Raw budget seat-count text.
    pub budget_places: Option<String>,
    /// Raw paid seat-count text.
    pub paid_places: Option<String>,
    /// Raw budget score-threshold text.
    pub budget_score: Option<String>,
    /// Raw paid score-threshold text.
    pub paid_score: Option<String>,
    pub url: Option<String>,
    pub specializations: BTreeSet<Specialization>,
}

impl Institution {
    /// The raw threshold text for the given funding mode.
    pub fn threshold_text(&self, funding: Funding) -> Option<&str> {
        match funding {
            Funding::Budget => self.budget_score.as_deref(),
            Funding::Paid => self.paid_score.as_deref(),
        }
    }
}
