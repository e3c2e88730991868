use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            firstName   TEXT NOT NULL,
            lastName    TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS catalogs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            catalogName TEXT NOT NULL,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_catalogs_user
            ON catalogs(user_id);

        -- colors holds the ordered descriptor list as a JSON array;
        -- it replaces the legacy color1..color5 columns (one descriptor
        -- per column, in order).
        CREATE TABLE IF NOT EXISTS palettes (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            paletteName TEXT NOT NULL,
            catalog_id  INTEGER NOT NULL REFERENCES catalogs(id),
            colors      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_palettes_catalog
            ON palettes(catalog_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
