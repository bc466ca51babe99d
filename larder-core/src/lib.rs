pub mod error;
pub mod events;
pub mod matcher;
pub mod source;
pub mod types;

pub use error::{FindError, MatchError};
pub use events::{CatalogEvent, CatalogEventKind};
pub use matcher::{match_recipes, validate_recipe, MatchMode, MatchResult};
pub use source::{find_possible, InMemoryCatalog, PossibleRecipe, RecipeSource};
pub use types::{IngredientId, Recipe, RecipeId, RequiredIngredient};
