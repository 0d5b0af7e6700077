//! Version-tracked schema migrations for the libSQL backend.
//!
//! Each migration has a version number and SQL. `run_migrations()` checks
//! the current version and applies only the new ones sequentially. The
//! same migration set serves both the profile and the catalog database;
//! tables the other side never touches simply stay empty.

use libsql::Connection;

use crate::error::DatabaseError;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id TEXT PRIMARY KEY,
            city TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exam_scores (
            user_id TEXT NOT NULL,
            subject TEXT NOT NULL,
            score INTEGER NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (user_id, subject)
        );
        CREATE INDEX IF NOT EXISTS idx_exam_scores_user ON exam_scores(user_id);

        CREATE TABLE IF NOT EXISTS user_specializations (
            user_id TEXT NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, category)
        );
        CREATE INDEX IF NOT EXISTS idx_user_specializations_user
            ON user_specializations(user_id);

        CREATE TABLE IF NOT EXISTS institutions (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL DEFAULT '',
            tuition TEXT,
            budget_places TEXT,
            paid_places TEXT,
            budget_score TEXT,
            paid_score TEXT,
            url TEXT
        );

        CREATE TABLE IF NOT EXISTS institution_specializations (
            institution_id INTEGER NOT NULL REFERENCES institutions(id) ON DELETE CASCADE,
            category TEXT NOT NULL,
            PRIMARY KEY (institution_id, category)
        );
        CREATE INDEX IF NOT EXISTS idx_institution_specializations_institution
            ON institution_specializations(institution_id);
    "#,
}];

/// Apply any migrations newer than the database's recorded version.
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        (),
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("creating _migrations table: {e}")))?;

    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("reading current version: {e}")))?;
    let current: i64 = match rows
        .next()
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?
    {
        Some(row) => row
            .get(0)
            .map_err(|e| DatabaseError::Migration(e.to_string()))?,
        None => 0,
    };

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        conn.execute_batch(migration.sql)
            .await
            .map_err(|e| DatabaseError::Migration(format!("{}: {e}", migration.name)))?;
        conn.execute(
            "INSERT INTO _migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            libsql::params![
                migration.version,
                migration.name,
                chrono::Utc::now().to_rfc3339()
            ],
        )
        .await
        .map_err(|e| DatabaseError::Migration(format!("recording {}: {e}", migration.name)))?;
    }

    Ok(())
}
