use crate::api::ErrorResponse;
use crate::catalog::DbCatalog;
use crate::get_conn;
use crate::pagination::{paginate, Page, PageParams};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::{find_possible, FindError, IngredientId, MatchMode, PossibleRecipe};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, ToSchema)]
pub struct PossibleDishesRequest {
    /// Ids of the ingredients the user has. Ids that are not numbers, or
    /// that no dish uses, simply match nothing.
    #[schema(value_type = Option<Vec<i32>>)]
    pub ingredients: Vec<Value>,
    /// Also list dishes that need ingredients the user would have to buy
    #[schema(value_type = Option<bool>)]
    pub willing_to_buy: bool,
}

impl PossibleDishesRequest {
    /// Read the body without rejecting it. A missing or unparsable body, a
    /// non-array `ingredients` or a non-bool `willing_to_buy` falls back to
    /// no ingredients in strict mode.
    fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        Self {
            ingredients: value
                .get("ingredients")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            willing_to_buy: value
                .get("willing_to_buy")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PossibleDish {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub instructions: String,
    /// Cook time in minutes
    pub cooktime: Option<i32>,
    pub starred: bool,
    pub category_name: Option<String>,
    pub type_name: Option<String>,
    /// Share of the dish's ingredients the user has, 0-100, one decimal
    pub match_percentage: f64,
    /// Ingredients the user lacks, in recipe order
    pub missing_ingredients: Vec<String>,
}

impl From<PossibleRecipe> for PossibleDish {
    fn from(possible: PossibleRecipe) -> Self {
        let recipe = possible.recipe;
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            instructions: recipe.instructions,
            cooktime: recipe.cooktime,
            starred: recipe.starred,
            category_name: recipe.category_name,
            type_name: recipe.type_name,
            match_percentage: possible.match_percentage,
            missing_ingredients: possible.missing_ingredients,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PossibleDishesResponse {
    /// Total number of matching dishes
    pub count: usize,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    pub results: Vec<PossibleDish>,
}

impl From<Page<PossibleDish>> for PossibleDishesResponse {
    fn from(page: Page<PossibleDish>) -> Self {
        Self {
            count: page.count,
            next: page.next,
            previous: page.previous,
            results: page.results,
        }
    }
}

/// Integer ids, or strings holding one. Anything else is dropped.
fn owned_ingredient_ids(values: &[Value]) -> HashSet<IngredientId> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Number(n) => n.as_i64().and_then(|id| IngredientId::try_from(id).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/api/dishes/possible",
    tag = "dishes",
    params(PageParams),
    request_body = PossibleDishesRequest,
    responses(
        (status = 200, description = "Dishes the user can cook, best match first", body = PossibleDishesResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse),
        (status = 500, description = "Catalog could not be read or is malformed", body = ErrorResponse)
    )
)]
pub async fn possible_dishes(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(page_params): Query<PageParams>,
    body: Bytes,
) -> impl IntoResponse {
    let request = PossibleDishesRequest::from_body(&body);
    let owned = owned_ingredient_ids(&request.ingredients);

    if owned.is_empty() {
        return (
            StatusCode::OK,
            Json(PossibleDishesResponse {
                count: 0,
                next: None,
                previous: None,
                results: Vec::new(),
            }),
        )
            .into_response();
    }

    let mode = MatchMode::from_willing_to_buy(request.willing_to_buy);

    let mut conn = get_conn!(state.pool);
    let possible = match find_possible(&mut DbCatalog::new(&mut conn), owned, mode) {
        Ok(possible) => possible,
        Err(FindError::Source(e)) => {
            tracing::error!("Failed to fetch dishes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch dishes".to_string(),
                }),
            )
                .into_response();
        }
        Err(FindError::Match(e)) => {
            tracing::error!("Catalog is malformed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };
    drop(conn);

    let dishes: Vec<PossibleDish> = possible.into_iter().map(PossibleDish::from).collect();

    match paginate(dishes, &page_params, uri.path()) {
        Ok(page) => (StatusCode::OK, Json(PossibleDishesResponse::from(page))).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Invalid page.".to_string(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owned_ids_accept_numbers_and_numeric_strings() {
        let values = vec![json!(1), json!("2"), json!(" 3 "), json!(1)];
        assert_eq!(owned_ingredient_ids(&values), HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_owned_ids_drop_malformed_values() {
        let values = vec![
            json!("salt"),
            json!(1.5),
            json!(null),
            json!({"id": 4}),
            json!(i64::MAX),
            json!(-7),
        ];
        assert_eq!(owned_ingredient_ids(&values), HashSet::from([-7]));
    }

    #[test]
    fn test_request_defaults() {
        for body in ["", "{}", "not json", "[1, 2]", "null"] {
            let request = PossibleDishesRequest::from_body(body.as_bytes());
            assert!(request.ingredients.is_empty(), "body {:?}", body);
            assert!(!request.willing_to_buy, "body {:?}", body);
        }
    }

    #[test]
    fn test_request_ignores_wrongly_typed_fields() {
        let body = json!({"ingredients": null, "willing_to_buy": null}).to_string();
        let request = PossibleDishesRequest::from_body(body.as_bytes());
        assert!(request.ingredients.is_empty());
        assert!(!request.willing_to_buy);

        let body = json!({"ingredients": "1,2", "willing_to_buy": "yes"}).to_string();
        let request = PossibleDishesRequest::from_body(body.as_bytes());
        assert!(request.ingredients.is_empty());
        assert!(!request.willing_to_buy);
    }

    #[test]
    fn test_request_reads_fields() {
        let body = json!({"ingredients": [1, "2"], "willing_to_buy": true}).to_string();
        let request = PossibleDishesRequest::from_body(body.as_bytes());
        assert_eq!(request.ingredients, vec![json!(1), json!("2")]);
        assert!(request.willing_to_buy);
    }
}
