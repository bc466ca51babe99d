use crate::api::ErrorResponse;
use crate::catalog::{insert_dish, DishDraft};
use crate::get_conn;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use larder_core::CatalogEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

const MAX_TITLE_LEN: usize = 200;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientLine {
    /// Ingredient name; created if it does not exist yet
    pub name: String,
    /// Free-text amount, e.g. "200 g"
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDishRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    /// Cook time in minutes
    #[serde(default)]
    pub cooktime: Option<i32>,
    /// Category name; created if it does not exist yet
    #[serde(default)]
    pub category: Option<String>,
    /// Cuisine type name; created if it does not exist yet
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateDishResponse {
    pub id: i32,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn validate(request: &CreateDishRequest) -> Result<DishDraft<'_>, String> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title is longer than {} characters", MAX_TITLE_LEN));
    }
    if request.cooktime.is_some_and(|t| t < 0) {
        return Err("Cook time cannot be negative".to_string());
    }

    let category = non_empty(request.category.as_ref());
    let cuisine_type = non_empty(request.cuisine_type.as_ref());
    for name in category.iter().chain(cuisine_type.iter()) {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("'{}' is longer than {} characters", name, MAX_NAME_LEN));
        }
    }

    let mut seen = HashSet::new();
    let mut ingredients = Vec::with_capacity(request.ingredients.len());
    for line in &request.ingredients {
        let name = line.name.trim();
        if name.is_empty() {
            return Err("Ingredient name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("'{}' is longer than {} characters", name, MAX_NAME_LEN));
        }
        if !seen.insert(name) {
            return Err(format!("Ingredient '{}' is listed more than once", name));
        }
        ingredients.push((name, line.quantity.trim()));
    }

    Ok(DishDraft {
        title,
        description: &request.description,
        instructions: &request.instructions,
        cooktime: request.cooktime,
        category,
        cuisine_type,
        starred: request.starred,
        ingredients,
    })
}

#[utoipa::path(
    post,
    path = "/api/dishes",
    tag = "dishes",
    request_body = CreateDishRequest,
    responses(
        (status = 201, description = "Dish created", body = CreateDishResponse),
        (status = 400, description = "Invalid dish", body = ErrorResponse)
    )
)]
pub async fn create_dish(
    State(state): State<AppState>,
    Json(request): Json<CreateDishRequest>,
) -> impl IntoResponse {
    let draft = match validate(&request) {
        Ok(draft) => draft,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
        }
    };

    let mut conn = get_conn!(state.pool);

    let id = match insert_dish(&mut conn, &draft) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create dish: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create dish".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(dish_id = id, title = draft.title, "Created dish");
    state.events.publish(CatalogEvent::created(id));

    (StatusCode::CREATED, Json(CreateDishResponse { id })).into_response()
}
