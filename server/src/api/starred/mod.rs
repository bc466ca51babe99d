pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/starred endpoints (mounted at /api/starred)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_starred))
        .route("/{id}", patch(update::update_starred))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_starred, update::update_starred),
    components(schemas(update::UpdateStarredRequest, update::StarredResponse))
)]
pub struct ApiDoc;
