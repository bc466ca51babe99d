use serde::{Deserialize, Serialize};

pub type RecipeId = i32;
pub type IngredientId = i32;

/// One (ingredient, quantity) pairing on a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredIngredient {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub quantity: String,
}

/// A catalog snapshot entry: the dish plus its required ingredients in
/// declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub instructions: String,
    /// Cook time in minutes
    #[serde(default)]
    pub cooktime: Option<i32>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RequiredIngredient>,
}

impl Recipe {
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.name.clone()).collect()
    }
}
