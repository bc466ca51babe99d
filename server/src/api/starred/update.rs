use crate::api::ErrorResponse;
use crate::catalog::set_starred;
use crate::get_conn;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::CatalogEvent;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStarredRequest {
    pub starred: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StarredResponse {
    pub id: i32,
    pub starred: bool,
}

#[utoipa::path(
    patch,
    path = "/api/starred/{id}",
    tag = "starred",
    params(
        ("id" = i32, Path, description = "Dish ID")
    ),
    request_body = UpdateStarredRequest,
    responses(
        (status = 200, description = "Starred flag updated", body = StarredResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    )
)]
pub async fn update_starred(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStarredRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match set_starred(&mut conn, id, request.starred) {
        Ok(Some(starred)) => {
            state.events.publish(CatalogEvent::updated(id));
            (StatusCode::OK, Json(StarredResponse { id, starred })).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Dish not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update starred flag: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update dish".to_string(),
                }),
            )
                .into_response()
        }
    }
}
