//! libSQL backend — async implementation of both store traits.
//!
//! Supports local file and in-memory databases. Profile and catalog
//! normally live in separate database files; both are served by this one
//! backend type.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{info, warn};

use crate::domain::institution::Institution;
use crate::domain::profile::{UserProfile, aggregate_of};
use crate::domain::specialization::Specialization;
use crate::domain::subject::Subject;
use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{CatalogStore, ProfileStore};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&backend.conn).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&backend.conn).await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert a catalog record with its specialization flags.
    ///
    /// Not part of [`CatalogStore`]: the catalog is read-only for the core.
    /// This is the write path for the ingestion pipeline and for tests.
    pub async fn insert_institution(&self, inst: &Institution) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO institutions
                     (id, name, city, tuition, budget_places, paid_places,
                      budget_score, paid_score, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    inst.id,
                    inst.name.as_str(),
                    inst.city.as_str(),
                    inst.tuition.as_deref(),
                    inst.budget_places.as_deref(),
                    inst.paid_places.as_deref(),
                    inst.budget_score.as_deref(),
                    inst.paid_score.as_deref(),
                    inst.url.as_deref(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("insert institution: {e}")))?;

        for category in &inst.specializations {
            self.conn()
                .execute(
                    "INSERT OR IGNORE INTO institution_specializations
                         (institution_id, category)
                     VALUES (?1, ?2)",
                    params![inst.id, category.key()],
                )
                .await
                .map_err(|e| DatabaseError::Query(format!("insert institution flag: {e}")))?;
        }
        Ok(())
    }

    /// Load the specialization flag sets for all institutions.
    async fn institution_flags(
        &self,
    ) -> Result<HashMap<i64, BTreeSet<Specialization>>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT institution_id, category FROM institution_specializations",
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list institution flags: {e}")))?;

        let mut flags: HashMap<i64, BTreeSet<Specialization>> = HashMap::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            let id: i64 = row.get(0).map_err(row_error)?;
            let key: String = row.get(1).map_err(row_error)?;
            match Specialization::from_key(&key) {
                Ok(category) => {
                    flags.entry(id).or_default().insert(category);
                }
                Err(e) => warn!(institution = id, error = %e, "Skipping unknown category row"),
            }
        }
        Ok(flags)
    }
}

fn row_error(e: libsql::Error) -> DatabaseError {
    DatabaseError::Serialization(e.to_string())
}

/// Map an institutions row to an [`Institution`] (flags filled separately).
///
/// Column order: 0:id, 1:name, 2:city, 3:tuition, 4:budget_places,
/// 5:paid_places, 6:budget_score, 7:paid_score, 8:url.
/// Nullable columns read as `None` on NULL.
fn row_to_institution(row: &libsql::Row) -> Result<Institution, DatabaseError> {
    Ok(Institution {
        id: row.get(0).map_err(row_error)?,
        name: row.get(1).map_err(row_error)?,
        city: row.get(2).map_err(row_error)?,
        tuition: row.get::<String>(3).ok(),
        budget_places: row.get::<String>(4).ok(),
        paid_places: row.get::<String>(5).ok(),
        budget_score: row.get::<String>(6).ok(),
        paid_score: row.get::<String>(7).ok(),
        url: row.get::<String>(8).ok(),
        specializations: BTreeSet::new(),
    })
}

const INSTITUTION_COLUMNS: &str =
    "id, name, city, tuition, budget_places, paid_places, budget_score, paid_score, url";

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, DatabaseError> {
        let mut profile = UserProfile::new(user_id);
        let mut found = false;

        let mut rows = self
            .conn()
            .query(
                "SELECT city FROM users WHERE user_id = ?1",
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get user: {e}")))?;
        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            found = true;
            profile.city = row.get::<String>(0).ok();
        }

        let mut rows = self
            .conn()
            .query(
                "SELECT subject, score FROM exam_scores WHERE user_id = ?1",
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get scores: {e}")))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            found = true;
            let key: String = row.get(0).map_err(row_error)?;
            let score: i64 = row.get(1).map_err(row_error)?;
            match Subject::from_key(&key) {
                Some(subject) => {
                    profile.scores.insert(subject, score as u8);
                }
                None => warn!(user_id, subject = %key, "Skipping unknown subject row"),
            }
        }

        let mut rows = self
            .conn()
            .query(
                "SELECT category FROM user_specializations WHERE user_id = ?1",
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get specializations: {e}")))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            found = true;
            let key: String = row.get(0).map_err(row_error)?;
            match Specialization::from_key(&key) {
                Ok(category) => {
                    profile.specializations.insert(category);
                }
                Err(e) => warn!(user_id, error = %e, "Skipping unknown category row"),
            }
        }

        if !found {
            return Ok(None);
        }
        profile.aggregate = aggregate_of(&profile.scores);
        Ok(Some(profile))
    }

    async fn upsert_location(&self, user_id: &str, city: &str) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO users (user_id, city, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                     city = excluded.city,
                     updated_at = excluded.updated_at",
                params![user_id, city, now],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("upsert location: {e}")))?;
        Ok(())
    }

    async fn upsert_score(
        &self,
        user_id: &str,
        subject: Subject,
        value: u8,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO exam_scores (user_id, subject, score, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, subject) DO UPDATE SET
                     score = excluded.score,
                     updated_at = excluded.updated_at",
                params![user_id, subject.key(), i64::from(value), now],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("upsert score: {e}")))?;
        Ok(())
    }

    async fn upsert_specialization(
        &self,
        user_id: &str,
        category: Specialization,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO user_specializations (user_id, category, created_at)
                 VALUES (?1, ?2, ?3)",
                params![user_id, category.key(), now],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("upsert specialization: {e}")))?;
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), DatabaseError> {
        let tx = self
            .conn()
            .transaction()
            .await
            .map_err(|e| DatabaseError::Query(format!("begin delete: {e}")))?;
        for sql in [
            "DELETE FROM user_specializations WHERE user_id = ?1",
            "DELETE FROM exam_scores WHERE user_id = ?1",
            "DELETE FROM users WHERE user_id = ?1",
        ] {
            tx.execute(sql, params![user_id])
                .await
                .map_err(|e| DatabaseError::Query(format!("delete profile: {e}")))?;
        }
        tx.commit()
            .await
            .map_err(|e| DatabaseError::Query(format!("commit delete: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for LibSqlBackend {
    async fn list_all(&self) -> Result<Vec<Institution>, DatabaseError> {
        let mut flags = self.institution_flags().await?;

        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {INSTITUTION_COLUMNS} FROM institutions ORDER BY id"),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list institutions: {e}")))?;

        let mut institutions = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            let mut inst = row_to_institution(&row)?;
            if let Some(set) = flags.remove(&inst.id) {
                inst.specializations = set;
            }
            institutions.push(inst);
        }
        Ok(institutions)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Institution>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {INSTITUTION_COLUMNS} FROM institutions WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get institution: {e}")))?;

        let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        else {
            return Ok(None);
        };
        let mut inst = row_to_institution(&row)?;

        let mut rows = self
            .conn()
            .query(
                "SELECT category FROM institution_specializations WHERE institution_id = ?1",
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get institution flags: {e}")))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            let key: String = row.get(0).map_err(row_error)?;
            match Specialization::from_key(&key) {
                Ok(category) => {
                    inst.specializations.insert(category);
                }
                Err(e) => warn!(institution = id, error = %e, "Skipping unknown category row"),
            }
        }
        Ok(Some(inst))
    }
}
