//! Ingredient matching and ranking.
//!
//! Given a catalog snapshot and the set of ingredients a user owns, work out
//! which recipes can be cooked right now (`Strict`) or which are worth a trip
//! to the shop (`WillingToBuy`), and how close each one is to complete.

use crate::error::MatchError;
use crate::types::{IngredientId, Recipe};
use std::collections::HashSet;

/// Which recipes to keep and how to rank them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Only recipes whose every ingredient is owned, ordered by title
    #[default]
    Strict,
    /// Any recipe sharing at least one ingredient, closest first
    WillingToBuy,
}

impl MatchMode {
    pub fn from_willing_to_buy(willing_to_buy: bool) -> Self {
        if willing_to_buy {
            MatchMode::WillingToBuy
        } else {
            MatchMode::Strict
        }
    }
}

/// Match statistics for one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    pub matching: usize,
    pub total: usize,
    /// 0-100, one decimal place
    pub match_percentage: f64,
    /// Names of required ingredients the user lacks, in recipe order
    pub missing_ingredients: Vec<String>,
}

impl MatchResult<'_> {
    /// All required ingredients are owned. A recipe with no ingredients is
    /// never complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.matching == self.total
    }
}

/// Reject a recipe that lists the same ingredient twice.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(recipe.ingredients.len());
    for ingredient in &recipe.ingredients {
        if !seen.insert(ingredient.ingredient_id) {
            return Err(MatchError::DuplicateIngredient {
                recipe_id: recipe.id,
                ingredient_id: ingredient.ingredient_id,
            });
        }
    }
    Ok(())
}

fn match_percentage(matching: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = matching as f64 / total as f64 * 100.0;
    (ratio * 10.0).round_ties_even() / 10.0
}

fn score<'a>(recipe: &'a Recipe, owned: &HashSet<IngredientId>) -> MatchResult<'a> {
    let mut matching = 0;
    let mut missing_ingredients = Vec::new();

    for ingredient in &recipe.ingredients {
        if owned.contains(&ingredient.ingredient_id) {
            matching += 1;
        } else {
            missing_ingredients.push(ingredient.name.clone());
        }
    }

    let total = recipe.ingredients.len();

    MatchResult {
        recipe,
        matching,
        total,
        match_percentage: match_percentage(matching, total),
        missing_ingredients,
    }
}

/// Score every recipe against `owned`, then filter and order by `mode`.
///
/// The whole catalog is validated first, so a malformed entry fails the call
/// instead of skewing the statistics. Ids in `owned` that no recipe uses are
/// ignored. An empty `owned` set yields an empty result.
pub fn match_recipes<'a>(
    catalog: &'a [Recipe],
    owned: &HashSet<IngredientId>,
    mode: MatchMode,
) -> Result<Vec<MatchResult<'a>>, MatchError> {
    for recipe in catalog {
        validate_recipe(recipe)?;
    }

    if owned.is_empty() {
        return Ok(Vec::new());
    }

    let scored = catalog.iter().map(|recipe| score(recipe, owned));

    let mut results: Vec<MatchResult<'a>> = match mode {
        MatchMode::Strict => scored.filter(MatchResult::is_complete).collect(),
        MatchMode::WillingToBuy => scored.filter(|r| r.matching >= 1).collect(),
    };

    // sort_by is stable, so equal keys keep catalog order
    match mode {
        MatchMode::Strict => results.sort_by(|a, b| a.recipe.title.cmp(&b.recipe.title)),
        MatchMode::WillingToBuy => results.sort_by(|a, b| {
            b.matching
                .cmp(&a.matching)
                .then_with(|| a.recipe.title.cmp(&b.recipe.title))
        }),
    }

    Ok(results)
}
