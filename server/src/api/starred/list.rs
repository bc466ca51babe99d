use crate::api::dishes::list::{dishes_response, DishesResponse};
use crate::api::ErrorResponse;
use crate::catalog::DishFilter;
use crate::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/starred",
    tag = "starred",
    responses(
        (status = 200, description = "Starred dishes ordered by title", body = DishesResponse),
        (status = 500, description = "Dishes could not be read", body = ErrorResponse)
    )
)]
pub async fn list_starred(State(state): State<AppState>) -> impl IntoResponse {
    let filter = DishFilter {
        starred_only: true,
        ..Default::default()
    };

    dishes_response(&state, &filter)
}
