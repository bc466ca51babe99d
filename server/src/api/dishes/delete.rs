use crate::api::ErrorResponse;
use crate::catalog;
use crate::get_conn;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::CatalogEvent;

#[utoipa::path(
    delete,
    path = "/api/dishes/{id}",
    tag = "dishes",
    params(
        ("id" = i32, Path, description = "Dish ID")
    ),
    responses(
        (status = 204, description = "Dish deleted"),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    )
)]
pub async fn delete_dish(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match catalog::delete_dish(&mut conn, id) {
        Ok(true) => {
            tracing::info!(dish_id = id, "Deleted dish");
            state.events.publish(CatalogEvent::deleted(id));
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Dish not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete dish: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete dish".to_string(),
                }),
            )
                .into_response()
        }
    }
}
