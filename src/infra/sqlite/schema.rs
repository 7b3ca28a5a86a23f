use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    // tags are stored comma-joined without spaces so membership can be
    // matched against ',' || tags || ','
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS word (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            word        TEXT NOT NULL,
            meaning     TEXT NOT NULL DEFAULT '',
            difficulty  TEXT NOT NULL DEFAULT 'easy',
            tags        TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            favorite    INTEGER NOT NULL DEFAULT 0,
            progress    INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_word_word
            ON word(word);

        CREATE INDEX IF NOT EXISTS idx_word_created_at
            ON word(created_at);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
