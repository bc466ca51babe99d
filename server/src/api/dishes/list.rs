use crate::api::ErrorResponse;
use crate::catalog::{load_recipes, DishFilter, DishOrdering};
use crate::get_conn;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::Recipe;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDishesParams {
    /// Only dishes in this category (exact name)
    pub category: Option<String>,
    /// Case-insensitive text searched in title, description, instructions
    /// and ingredient names
    pub search: Option<String>,
    /// One of title, -title, cooktime, -cooktime (default: title)
    #[serde(default)]
    pub ordering: DishOrdering,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub instructions: String,
    /// Cook time in minutes
    pub cooktime: Option<i32>,
    pub starred: bool,
    pub category_name: Option<String>,
    pub type_name: Option<String>,
    /// Ingredient names in recipe order
    pub ingredients: Vec<String>,
}

impl From<Recipe> for DishSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            ingredients: recipe.ingredient_names(),
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            instructions: recipe.instructions,
            cooktime: recipe.cooktime,
            starred: recipe.starred,
            category_name: recipe.category_name,
            type_name: recipe.type_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishesResponse {
    pub dishes: Vec<DishSummary>,
}

/// Load dishes for `filter` and wrap them as a response.
pub(crate) fn dishes_response(state: &AppState, filter: &DishFilter) -> axum::response::Response {
    let mut conn = get_conn!(state.pool);

    match load_recipes(&mut conn, filter) {
        Ok(recipes) => (
            StatusCode::OK,
            Json(DishesResponse {
                dishes: recipes.into_iter().map(DishSummary::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch dishes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch dishes".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dishes/all",
    tag = "dishes",
    params(ListDishesParams),
    responses(
        (status = 200, description = "All dishes matching the filters", body = DishesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_all_dishes(
    State(state): State<AppState>,
    Query(params): Query<ListDishesParams>,
) -> impl IntoResponse {
    let filter = DishFilter {
        category: params.category.filter(|c| !c.is_empty()),
        search: params.search,
        starred_only: false,
        ordering: params.ordering,
    };

    dishes_response(&state, &filter)
}
