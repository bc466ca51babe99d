//! The "fetch recipes with their required ingredients" seam.
//!
//! The matcher only ever sees a snapshot; where that snapshot comes from
//! (a database, a fixture file, a search index) lives behind [`RecipeSource`].

use crate::error::FindError;
use crate::matcher::{match_recipes, MatchMode, MatchResult};
use crate::types::{IngredientId, Recipe};
use std::collections::HashSet;
use std::convert::Infallible;

pub trait RecipeSource {
    type Error;

    /// Return every recipe with its ingredients in declared order.
    fn fetch_recipes(&mut self) -> Result<Vec<Recipe>, Self::Error>;
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    recipes: Vec<Recipe>,
}

impl InMemoryCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeSource for InMemoryCatalog {
    type Error = Infallible;

    fn fetch_recipes(&mut self) -> Result<Vec<Recipe>, Self::Error> {
        Ok(self.recipes.clone())
    }
}

/// A match result that owns its recipe, detached from the snapshot it was
/// computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PossibleRecipe {
    pub recipe: Recipe,
    pub matching: usize,
    pub total: usize,
    pub match_percentage: f64,
    pub missing_ingredients: Vec<String>,
}

impl From<MatchResult<'_>> for PossibleRecipe {
    fn from(result: MatchResult<'_>) -> Self {
        Self {
            recipe: result.recipe.clone(),
            matching: result.matching,
            total: result.total,
            match_percentage: result.match_percentage,
            missing_ingredients: result.missing_ingredients,
        }
    }
}

/// Fetch one snapshot from `source` and run the matcher over it.
///
/// An empty `owned` set skips the fetch entirely.
pub fn find_possible<S: RecipeSource>(
    source: &mut S,
    owned: HashSet<IngredientId>,
    mode: MatchMode,
) -> Result<Vec<PossibleRecipe>, FindError<S::Error>> {
    if owned.is_empty() {
        return Ok(Vec::new());
    }

    let catalog = source.fetch_recipes().map_err(FindError::Source)?;
    let results = match_recipes(&catalog, &owned, mode)?;

    tracing::debug!(
        recipes = catalog.len(),
        owned = owned.len(),
        matched = results.len(),
        ?mode,
        "Matched owned ingredients against catalog"
    );

    Ok(results.into_iter().map(PossibleRecipe::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use crate::types::RequiredIngredient;

    struct FailingSource;

    impl RecipeSource for FailingSource {
        type Error = String;

        fn fetch_recipes(&mut self) -> Result<Vec<Recipe>, Self::Error> {
            Err("connection refused".to_string())
        }
    }

    fn pancakes() -> Recipe {
        Recipe {
            id: 1,
            title: "Pancakes".to_string(),
            description: "Fluffy".to_string(),
            instructions: "Mix and fry".to_string(),
            cooktime: Some(20),
            starred: true,
            category_name: Some("Breakfast".to_string()),
            type_name: None,
            ingredients: vec![
                RequiredIngredient {
                    ingredient_id: 10,
                    name: "flour".to_string(),
                    quantity: "200 g".to_string(),
                },
                RequiredIngredient {
                    ingredient_id: 11,
                    name: "milk".to_string(),
                    quantity: "300 ml".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_find_possible_owns_results() {
        let mut source = InMemoryCatalog::new(vec![pancakes()]);
        let results =
            find_possible(&mut source, HashSet::from([10]), MatchMode::WillingToBuy).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.title, "Pancakes");
        assert_eq!(results[0].match_percentage, 50.0);
        assert_eq!(results[0].missing_ingredients, vec!["milk"]);
    }

    #[test]
    fn test_empty_owned_set_skips_fetch() {
        let results = find_possible(&mut FailingSource, HashSet::new(), MatchMode::Strict).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_source_error_is_surfaced() {
        let err = find_possible(&mut FailingSource, HashSet::from([1]), MatchMode::Strict)
            .unwrap_err();
        assert!(matches!(err, FindError::Source(ref e) if e == "connection refused"));
    }

    #[test]
    fn test_malformed_recipe_is_surfaced() {
        let mut recipe = pancakes();
        recipe.ingredients.push(recipe.ingredients[0].clone());
        let mut source = InMemoryCatalog::new(vec![recipe]);

        let err = find_possible(&mut source, HashSet::from([10]), MatchMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            FindError::Match(MatchError::DuplicateIngredient {
                recipe_id: 1,
                ingredient_id: 10
            })
        ));
    }
}
