use serde::{Deserialize, Serialize};

/// Wire-shape records. Field names match the original API's casing
/// (camelCase names alongside snake_case foreign keys), so the renames
/// are explicit rather than blanket `rename_all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub id: i64,
    #[serde(rename = "catalogName")]
    pub catalog_name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub id: i64,
    #[serde(rename = "paletteName")]
    pub palette_name: String,
    pub catalog_id: i64,
    pub colors: Vec<ColorDescriptor>,
}

/// One entry in a palette's ordered color sequence. Rows migrated from the
/// legacy five-column schema carry a bare `hex` with no name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDescriptor {
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
