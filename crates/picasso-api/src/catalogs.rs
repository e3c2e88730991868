use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use picasso_db::models::CatalogRow;
use picasso_types::api::{NewCatalogRequest, RenameCatalogRequest};
use picasso_types::models::Catalog;

use crate::AppState;
use crate::error::ApiError;
use crate::users::{missing, require, require_id};

const CATALOG_FORMAT: &str = "{ catalogName: <string>, user_id: <integer> }";

pub async fn list_catalogs(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Catalog>>, ApiError> {
    let rows = state.db.catalogs_for_user(user_id)?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("Catalogs not found".into()));
    }

    Ok(Json(rows.into_iter().map(catalog_response).collect()))
}

pub async fn get_catalog(
    State(state): State<AppState>,
    Path((user_id, catalog_id)): Path<(i64, i64)>,
) -> Result<Json<Catalog>, ApiError> {
    let row = state
        .db
        .get_catalog(catalog_id, user_id)?
        .ok_or_else(|| ApiError::NotFound("Catalog not found".into()))?;

    Ok(Json(catalog_response(row)))
}

pub async fn create_catalog(
    State(state): State<AppState>,
    Path(_user_id): Path<i64>,
    Json(req): Json<NewCatalogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let catalog_name = require(&req.catalog_name, "catalogName", CATALOG_FORMAT)?;
    let user_id = require_id(req.user_id, "user_id", CATALOG_FORMAT)?;

    let id = state.db.create_catalog(catalog_name, user_id)?;

    Ok((
        StatusCode::CREATED,
        Json(Catalog {
            id,
            catalog_name: catalog_name.to_string(),
            user_id,
        }),
    ))
}

pub async fn rename_catalog(
    State(state): State<AppState>,
    Path((_user_id, catalog_id)): Path<(i64, i64)>,
    Json(req): Json<RenameCatalogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_name = req
        .new_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("newName", "{ newName: <string> }"))?;

    let updated = state.db.rename_catalog(catalog_id, new_name)?;
    if updated == 0 {
        return Err(ApiError::NotFound("Catalog not found".into()));
    }

    Ok(Json(json!({ "newName": new_name })))
}

/// Palettes go first, inside one transaction in the DB layer, so a catalog
/// is never removed out from under its palettes.
pub async fn delete_catalog(
    State(state): State<AppState>,
    Path((_user_id, catalog_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let removed = state.db.delete_catalog_cascade(catalog_id)?;
    if removed == 0 {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(format!("Catalog {catalog_id} was successfully removed")),
    )
        .into_response())
}

pub(crate) fn catalog_response(row: CatalogRow) -> Catalog {
    Catalog {
        id: row.id,
        catalog_name: row.catalog_name,
        user_id: row.user_id,
    }
}
