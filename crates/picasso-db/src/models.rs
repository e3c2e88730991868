/// Database row types — these map directly to SQLite rows.
/// Distinct from picasso-types wire models to keep the DB layer independent;
/// in particular `colors` stays a raw JSON string down here.

pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub struct CatalogRow {
    pub id: i64,
    pub catalog_name: String,
    pub user_id: i64,
}

pub struct PaletteRow {
    pub id: i64,
    pub palette_name: String,
    pub catalog_id: i64,
    pub colors: String,
}
