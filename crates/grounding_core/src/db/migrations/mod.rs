//! Ordered schema steps for the record store.
//!
//! Step `n` in `STEPS` brings the schema from version `n` to `n + 1`.
//! Steps are append-only: shipped steps are never edited.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_records.sql")];

/// Schema version this binary writes.
pub const SCHEMA_VERSION: u32 = STEPS.len() as u32;

/// Reads the schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings `conn` up to `SCHEMA_VERSION` in one transaction.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is stamped newer than this build.
/// - `DbError::Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (sql, version) in STEPS.iter().zip(1u32..).skip(found as usize) {
        tx.execute_batch(sql)
            .map_err(|source| DbError::Migration { version, source })?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}
