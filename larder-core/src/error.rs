use crate::types::{IngredientId, RecipeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Recipe {recipe_id} lists ingredient {ingredient_id} more than once")]
    DuplicateIngredient {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    },
}

#[derive(Error, Debug)]
pub enum FindError<E> {
    #[error("Failed to fetch recipes: {0}")]
    Source(E),

    #[error(transparent)]
    Match(#[from] MatchError),
}
