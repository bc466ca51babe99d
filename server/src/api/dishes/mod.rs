pub mod create;
pub mod delete;
pub mod list;
pub mod possible;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/dishes endpoints (mounted at /api/dishes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_dish))
        .route("/all", get(list::list_all_dishes))
        .route("/possible", post(possible::possible_dishes))
        .route("/{id}", delete(delete::delete_dish))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_dish,
        delete::delete_dish,
        list::list_all_dishes,
        possible::possible_dishes,
    ),
    components(schemas(
        create::CreateDishRequest,
        create::CreateDishResponse,
        create::IngredientLine,
        list::DishSummary,
        list::DishesResponse,
        crate::catalog::DishOrdering,
        possible::PossibleDishesRequest,
        possible::PossibleDish,
        possible::PossibleDishesResponse,
    ))
)]
pub struct ApiDoc;
