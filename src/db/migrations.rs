use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction};

use crate::error::StorageError;

const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Written to `PRAGMA application_id` so other SQLite files are refused
/// instead of migrated. ASCII "SlpT".
const SLEEPTRACK_APPLICATION_ID: i32 = 0x536c_7054;

fn check_application_id(conn: &Connection) -> Result<()> {
    let found: i32 = conn
        .pragma_query_value(None, "application_id", |row| row.get(0))
        .context("failed to read application_id pragma")?;

    // 0 is a fresh file or one created before the id was stamped
    if found != 0 && found != SLEEPTRACK_APPLICATION_ID {
        let path = conn.path().unwrap_or(":memory:").to_string();
        return Err(StorageError::ForeignDatabase { path, found }.into());
    }
    Ok(())
}

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    check_application_id(conn)?;

    let mut version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StorageError::NewerSchema {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        }
        .into());
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version)
            .with_context(|| format!("migration to version {next_version} failed"))?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.pragma_update(None, "application_id", SLEEPTRACK_APPLICATION_ID)
        .context("failed to stamp application_id pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => {
            tx.execute_batch(include_str!("schemas/schema_v1.sql"))
                .context("failed to execute schema_v1.sql")?;
            Ok(())
        }
        2 => {
            tx.execute_batch(include_str!("schemas/schema_v2.sql"))
                .context("failed to execute schema_v2.sql")?;
            Ok(())
        }
        _ => Err(StorageError::UnknownMigration(version).into()),
    }
}
