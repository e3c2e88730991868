use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use picasso_types::api::SearchQuery;

use crate::AppState;
use crate::catalogs::catalog_response;
use crate::error::ApiError;
use crate::palettes::palette_response;
use crate::users::user_response;

/// Tables reachable through `/searchdatabase`. An explicit allow-list so
/// the query-string value never reaches SQL.
#[derive(Debug, Clone, Copy)]
enum SearchTable {
    Users,
    Catalogs,
    Palettes,
}

impl FromStr for SearchTable {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(SearchTable::Users),
            "catalogs" => Ok(SearchTable::Catalogs),
            "palettes" => Ok(SearchTable::Palettes),
            _ => Err(()),
        }
    }
}

impl SearchTable {
    fn singular(self) -> &'static str {
        match self {
            SearchTable::Users => "user",
            SearchTable::Catalogs => "catalog",
            SearchTable::Palettes => "palette",
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let table: SearchTable = query.database.parse().map_err(|_| {
        ApiError::Validation("database must be one of users, catalogs, palettes".into())
    })?;

    let record: Option<Value> = match table {
        SearchTable::Users => state
            .db
            .get_user_by_id(query.id)?
            .map(|row| serde_json::to_value(user_response(row)))
            .transpose()
            .map_err(|e| anyhow::anyhow!("encode record: {e}"))?,
        SearchTable::Catalogs => state
            .db
            .get_catalog_by_id(query.id)?
            .map(|row| serde_json::to_value(catalog_response(row)))
            .transpose()
            .map_err(|e| anyhow::anyhow!("encode record: {e}"))?,
        SearchTable::Palettes => state
            .db
            .get_palette_by_id(query.id)?
            .map(|row| serde_json::to_value(palette_response(row)))
            .transpose()
            .map_err(|e| anyhow::anyhow!("encode record: {e}"))?,
    };

    match record {
        Some(value) => Ok(Json(value)),
        None => Err(ApiError::NotFound(format!("{} not found", table.singular()))),
    }
}
