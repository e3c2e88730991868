use crate::Database;
use crate::models::{CatalogRow, PaletteRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;
use rusqlite::types::Value;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (firstName, lastName, email, password) VALUES (?1, ?2, ?3, ?4)",
                (first_name, last_name, email, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    // -- Catalogs --

    pub fn create_catalog(&self, catalog_name: &str, user_id: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO catalogs (catalogName, user_id) VALUES (?1, ?2)",
                (catalog_name, user_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn catalogs_for_user(&self, user_id: i64) -> Result<Vec<CatalogRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, catalogName, user_id FROM catalogs WHERE user_id = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([user_id], catalog_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_catalog(&self, id: i64, user_id: i64) -> Result<Option<CatalogRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, catalogName, user_id FROM catalogs WHERE id = ?1 AND user_id = ?2",
            )?;
            stmt.query_row((id, user_id), catalog_from_row).optional()
        })
    }

    pub fn get_catalog_by_id(&self, id: i64) -> Result<Option<CatalogRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, catalogName, user_id FROM catalogs WHERE id = ?1")?;
            stmt.query_row([id], catalog_from_row).optional()
        })
    }

    /// Returns the number of catalogs renamed (0 or 1).
    pub fn rename_catalog(&self, id: i64, new_name: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute(
                "UPDATE catalogs SET catalogName = ?1 WHERE id = ?2",
                (new_name, id),
            )?;
            Ok(n)
        })
    }

    /// Deletes a catalog and its palettes in one transaction, palettes
    /// first so the foreign key never dangles. Returns the number of
    /// catalog rows removed (0 when the catalog did not exist).
    pub fn delete_catalog_cascade(&self, id: i64) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM palettes WHERE catalog_id = ?1", [id])?;
            let n = tx.execute("DELETE FROM catalogs WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(n)
        })
    }

    // -- Palettes --

    pub fn create_palette(
        &self,
        palette_name: &str,
        catalog_id: i64,
        colors_json: &str,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO palettes (paletteName, catalog_id, colors) VALUES (?1, ?2, ?3)",
                (palette_name, catalog_id, colors_json),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn palettes_for_catalog(&self, catalog_id: i64) -> Result<Vec<PaletteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, paletteName, catalog_id, colors FROM palettes
                 WHERE catalog_id = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([catalog_id], palette_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_palette(&self, id: i64, catalog_id: i64) -> Result<Option<PaletteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, paletteName, catalog_id, colors FROM palettes
                 WHERE id = ?1 AND catalog_id = ?2",
            )?;
            stmt.query_row((id, catalog_id), palette_from_row).optional()
        })
    }

    pub fn get_palette_by_id(&self, id: i64) -> Result<Option<PaletteRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, paletteName, catalog_id, colors FROM palettes WHERE id = ?1")?;
            stmt.query_row([id], palette_from_row).optional()
        })
    }

    /// Partial update; only the supplied fields are written. Returns the
    /// number of rows updated (0 or 1), with all-`None` a no-op.
    pub fn update_palette(
        &self,
        id: i64,
        palette_name: Option<&str>,
        catalog_id: Option<i64>,
        colors_json: Option<&str>,
    ) -> Result<usize> {
        let mut assignments: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(name) = palette_name {
            params.push(Value::from(name.to_string()));
            assignments.push(format!("paletteName = ?{}", params.len()));
        }
        if let Some(cid) = catalog_id {
            params.push(Value::from(cid));
            assignments.push(format!("catalog_id = ?{}", params.len()));
        }
        if let Some(colors) = colors_json {
            params.push(Value::from(colors.to_string()));
            assignments.push(format!("colors = ?{}", params.len()));
        }

        if assignments.is_empty() {
            return Ok(0);
        }

        self.with_conn_mut(|conn| {
            params.push(Value::from(id));
            let sql = format!(
                "UPDATE palettes SET {} WHERE id = ?{}",
                assignments.join(", "),
                params.len()
            );

            let n = conn.execute(&sql, rusqlite::params_from_iter(params))?;
            Ok(n)
        })
    }

    /// Returns the number of palettes removed (0 or 1).
    pub fn delete_palette(&self, id: i64) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute("DELETE FROM palettes WHERE id = ?1", [id])?;
            Ok(n)
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, firstName, lastName, email, password FROM users WHERE email = ?1",
    )?;
    stmt.query_row([email], user_from_row).optional()
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, firstName, lastName, email, password FROM users WHERE id = ?1")?;
    stmt.query_row([id], user_from_row).optional()
}

fn user_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password: row.get(4)?,
    })
}

fn catalog_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<CatalogRow, rusqlite::Error> {
    Ok(CatalogRow {
        id: row.get(0)?,
        catalog_name: row.get(1)?,
        user_id: row.get(2)?,
    })
}

fn palette_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<PaletteRow, rusqlite::Error> {
    Ok(PaletteRow {
        id: row.get(0)?,
        palette_name: row.get(1)?,
        catalog_id: row.get(2)?,
        colors: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
