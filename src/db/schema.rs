use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use crate::models::RECORD_COLUMNS;

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    // The shelter export, one row per outcome document. `seq` keeps import order.
    Migration {
        version: "001",
        name: "initial",
        sql: include_str!("migrations/001_initial.sql"),
    },
    // Every rescue predicate filters on breed, then sex and an age range.
    Migration {
        version: "002",
        name: "rescue_indexes",
        sql: include_str!("migrations/002_rescue_indexes.sql"),
    },
];

/// Bring the schema up to date, then check the record table still carries
/// every column the dashboard reads.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let applied = applied_versions(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(m.version))
        .collect();

    if pending.is_empty() {
        tracing::debug!("Shelter schema is up to date");
    }
    for migration in pending {
        apply(conn, migration)?;
    }

    verify_animals_table(conn)
}

fn applied_versions(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<HashSet<String>, _>>()?;
    Ok(versions)
}

/// Run one migration and record it in the same transaction, so a failed
/// migration leaves neither its tables nor its bookkeeping row behind.
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!(
        version = migration.version,
        "Applying shelter migration {}",
        migration.name
    );

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql).with_context(|| {
        format!(
            "Failed to apply migration {}: {}",
            migration.version, migration.name
        )
    })?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (
            migration.version,
            migration.name,
            chrono::Utc::now().to_rfc3339(),
        ),
    )?;
    tx.commit()?;

    Ok(())
}

/// Fail early when a database file predates a record column, instead of
/// failing later on the first selector query.
fn verify_animals_table(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('animals')")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<String>, _>>()?;

    let missing: Vec<&str> = RECORD_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(*column))
        .collect();
    if !missing.is_empty() {
        bail!("animals table is missing columns: {}", missing.join(", "));
    }
    Ok(())
}
