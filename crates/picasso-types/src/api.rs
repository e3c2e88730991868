use serde::{Deserialize, Serialize};

use crate::models::ColorDescriptor;

// -- Auth --

/// Signup body. Fields are optional so validation can name the first
/// missing property instead of surfacing a serde error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Shared reply for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub id: i64,
}

// -- Catalogs --

#[derive(Debug, Deserialize)]
pub struct NewCatalogRequest {
    #[serde(rename = "catalogName")]
    pub catalog_name: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RenameCatalogRequest {
    #[serde(rename = "newName")]
    pub new_name: Option<String>,
}

// -- Palettes --

#[derive(Debug, Deserialize)]
pub struct NewPaletteRequest {
    #[serde(rename = "paletteName")]
    pub palette_name: Option<String>,
    pub catalog_id: Option<i64>,
    pub colors: Option<Vec<ColorDescriptor>>,
}

// -- Search --

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub database: String,
    pub id: i64,
}
