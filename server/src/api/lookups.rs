//! Name lists for the pickers on the client: ingredients, categories and
//! cuisine types.

use crate::api::ErrorResponse;
use crate::catalog::{list_named, NamedTable};
use crate::get_conn;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for the lookup endpoints (mounted at the root)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ingredients", get(list_ingredients))
        .route("/api/categories", get(list_categories))
        .route("/api/types", get(list_types))
}

#[derive(OpenApi)]
#[openapi(
    paths(list_ingredients, list_categories, list_types),
    components(schemas(NamedItem, NamedItemsResponse))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NamedItem {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NamedItemsResponse {
    pub items: Vec<NamedItem>,
}

fn named_items(state: &AppState, table: NamedTable) -> axum::response::Response {
    let mut conn = get_conn!(state.pool);

    match list_named(&mut conn, table) {
        Ok(rows) => (
            StatusCode::OK,
            Json(NamedItemsResponse {
                items: rows
                    .into_iter()
                    .map(|(id, name)| NamedItem { id, name })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch {:?} list: {}", table, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch list".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "lookups",
    responses(
        (status = 200, description = "All ingredients ordered by name", body = NamedItemsResponse)
    )
)]
pub async fn list_ingredients(State(state): State<AppState>) -> impl IntoResponse {
    named_items(&state, NamedTable::Ingredient)
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "lookups",
    responses(
        (status = 200, description = "All categories ordered by name", body = NamedItemsResponse)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    named_items(&state, NamedTable::Category)
}

#[utoipa::path(
    get,
    path = "/api/types",
    tag = "lookups",
    responses(
        (status = 200, description = "All cuisine types ordered by name", body = NamedItemsResponse)
    )
)]
pub async fn list_types(State(state): State<AppState>) -> impl IntoResponse {
    named_items(&state, NamedTable::CuisineType)
}
