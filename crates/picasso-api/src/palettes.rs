use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::warn;

use picasso_db::models::PaletteRow;
use picasso_types::api::NewPaletteRequest;
use picasso_types::models::{ColorDescriptor, Palette};

use crate::AppState;
use crate::error::ApiError;
use crate::users::{missing, require, require_id};

const PALETTE_FORMAT: &str =
    "{ paletteName: <string>, catalog_id: <integer>, colors: <array of { hex: <string> }> }";

pub async fn list_palettes(
    State(state): State<AppState>,
    Path((_user_id, catalog_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<Palette>>, ApiError> {
    let rows = state.db.palettes_for_catalog(catalog_id)?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("No palettes were found".into()));
    }

    Ok(Json(rows.into_iter().map(palette_response).collect()))
}

pub async fn get_palette(
    State(state): State<AppState>,
    Path((_user_id, catalog_id, palette_id)): Path<(i64, i64, i64)>,
) -> Result<Json<Palette>, ApiError> {
    let row = state
        .db
        .get_palette(palette_id, catalog_id)?
        .ok_or_else(|| ApiError::NotFound("Palette not found".into()))?;

    Ok(Json(palette_response(row)))
}

pub async fn create_palette(
    State(state): State<AppState>,
    Path((_user_id, _catalog_id)): Path<(i64, i64)>,
    Json(req): Json<NewPaletteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let palette_name = require(&req.palette_name, "paletteName", PALETTE_FORMAT)?;
    let catalog_id = require_id(req.catalog_id, "catalog_id", PALETTE_FORMAT)?;
    let colors = match &req.colors {
        Some(colors) if !colors.is_empty() => colors,
        _ => return Err(missing("colors", PALETTE_FORMAT)),
    };

    let colors_json =
        serde_json::to_string(colors).map_err(|e| anyhow::anyhow!("encode colors: {e}"))?;
    let id = state
        .db
        .create_palette(palette_name, catalog_id, &colors_json)?;

    Ok((
        StatusCode::CREATED,
        Json(Palette {
            id,
            palette_name: palette_name.to_string(),
            catalog_id,
            colors: colors.clone(),
        }),
    ))
}

/// Partial update. Recognized fields are paletteName, catalog_id, and
/// colors; anything else in the body is ignored. Success echoes the patch
/// body back to the client.
pub async fn patch_palette(
    State(state): State<AppState>,
    Path((_user_id, _catalog_id, palette_id)): Path<(i64, i64, i64)>,
    Json(body): Json<serde_json::Map<String, Value>>,
) -> Result<Json<serde_json::Map<String, Value>>, ApiError> {
    let mut palette_name: Option<&str> = None;
    let mut catalog_id: Option<i64> = None;
    let mut colors_json: Option<String> = None;

    for (key, value) in &body {
        match key.as_str() {
            "paletteName" => {
                palette_name = Some(value.as_str().ok_or_else(|| {
                    ApiError::Validation("paletteName must be a string".into())
                })?);
            }
            "catalog_id" => {
                catalog_id = Some(value.as_i64().ok_or_else(|| {
                    ApiError::Validation("catalog_id must be an integer".into())
                })?);
            }
            "colors" => {
                let descriptors: Vec<ColorDescriptor> = serde_json::from_value(value.clone())
                    .map_err(|_| {
                        ApiError::Validation("colors must be an array of { hex: <string> }".into())
                    })?;
                colors_json = Some(
                    serde_json::to_string(&descriptors)
                        .map_err(|e| anyhow::anyhow!("encode colors: {e}"))?,
                );
            }
            _ => {}
        }
    }

    if palette_name.is_none() && catalog_id.is_none() && colors_json.is_none() {
        return Err(ApiError::Validation(format!(
            "Expected at least one palette field to update: {PALETTE_FORMAT}"
        )));
    }

    let updated =
        state
            .db
            .update_palette(palette_id, palette_name, catalog_id, colors_json.as_deref())?;
    if updated == 0 {
        return Err(ApiError::NotFound("Palette not found".into()));
    }

    Ok(Json(body))
}

pub async fn delete_palette(
    State(state): State<AppState>,
    Path((_user_id, _catalog_id, palette_id)): Path<(i64, i64, i64)>,
) -> Result<Response, ApiError> {
    let removed = state.db.delete_palette(palette_id)?;
    if removed == 0 {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(format!("Palette {palette_id} was successfully removed")),
    )
        .into_response())
}

pub(crate) fn palette_response(row: PaletteRow) -> Palette {
    let colors = serde_json::from_str(&row.colors).unwrap_or_else(|e| {
        warn!("Corrupt colors on palette {}: {}", row.id, e);
        Vec::new()
    });

    Palette {
        id: row.id,
        palette_name: row.palette_name,
        catalog_id: row.catalog_id,
        colors,
    }
}
