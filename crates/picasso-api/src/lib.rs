pub mod catalogs;
pub mod error;
pub mod palettes;
pub mod search;
pub mod users;

pub use users::{AppState, AppStateInner};

use axum::{
    Router,
    routing::{get, post},
};

async fn root() -> &'static str {
    "We're going to test all the routes!"
}

/// Full route table. Layers (CORS, request tracing) are applied by the
/// server binary; tests drive this router directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/users", post(users::signup))
        .route("/api/v1/login", post(users::login))
        .route("/api/v1/searchdatabase", get(search::search))
        .route(
            "/api/v1/users/{user_id}/catalogs",
            get(catalogs::list_catalogs).post(catalogs::create_catalog),
        )
        .route(
            "/api/v1/users/{user_id}/catalogs/{catalog_id}",
            get(catalogs::get_catalog)
                .patch(catalogs::rename_catalog)
                .delete(catalogs::delete_catalog),
        )
        .route(
            "/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes",
            get(palettes::list_palettes).post(palettes::create_palette),
        )
        .route(
            "/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}",
            get(palettes::get_palette)
                .patch(palettes::patch_palette)
                .delete(palettes::delete_palette),
        )
        .with_state(state)
}
