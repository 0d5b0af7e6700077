//! Backend-agnostic store traits.
//!
//! The dialog core talks to persistence only through these interfaces;
//! the storage technology behind them is an implementation detail.

use async_trait::async_trait;

use crate::domain::institution::Institution;
use crate::domain::profile::UserProfile;
use crate::domain::specialization::Specialization;
use crate::domain::subject::Subject;
use crate::error::DatabaseError;

/// Per-user profile persistence. One logical row per user id; mutations
/// are atomic per user, last writer wins.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load a user's assembled profile, or `None` when nothing is stored.
    /// The returned profile carries the derived aggregate.
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, DatabaseError>;

    /// Store or replace the user's location.
    async fn upsert_location(&self, user_id: &str, city: &str) -> Result<(), DatabaseError>;

    /// Store or replace one subject score (already validated to `0..=100`).
    async fn upsert_score(
        &self,
        user_id: &str,
        subject: Subject,
        value: u8,
    ) -> Result<(), DatabaseError>;

    /// Set a specialization flag. Idempotent.
    async fn upsert_specialization(
        &self,
        user_id: &str,
        category: Specialization,
    ) -> Result<(), DatabaseError>;

    /// Erase the user's profile wholesale: location, scores, all flags.
    async fn delete(&self, user_id: &str) -> Result<(), DatabaseError>;
}

/// Read access to the institution catalog. Written only by the external
/// ingestion pipeline.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All catalog records, in stable catalog order.
    async fn list_all(&self) -> Result<Vec<Institution>, DatabaseError>;

    /// One record by id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Institution>, DatabaseError>;
}
