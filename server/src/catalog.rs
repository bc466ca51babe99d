//! Catalog reads and writes shared by the dish endpoints.
//!
//! Everything that turns rows into `larder_core::Recipe` snapshots lives here,
//! so the list views and the matcher see dishes the same way.

use crate::models::{Dish, NewDish, NewDishIngredient};
use crate::schema::{categories, cuisine_types, dish_ingredients, dishes, ingredients};
use diesel::prelude::*;
use larder_core::{Recipe, RecipeSource, RequiredIngredient};
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Sort order for dish lists
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum DishOrdering {
    #[default]
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "-title")]
    TitleDesc,
    #[serde(rename = "cooktime")]
    CooktimeAsc,
    #[serde(rename = "-cooktime")]
    CooktimeDesc,
}

#[derive(Debug, Default, Clone)]
pub struct DishFilter {
    /// Exact category name
    pub category: Option<String>,
    /// Case-insensitive substring over text fields and ingredient names
    pub search: Option<String>,
    pub starred_only: bool,
    pub ordering: DishOrdering,
}

fn like_pattern(term: &str) -> String {
    format!(
        "%{}%",
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

/// Load dishes matching `filter`, each with its ingredients in the order they
/// were added.
pub fn load_recipes(conn: &mut SqliteConnection, filter: &DishFilter) -> QueryResult<Vec<Recipe>> {
    let mut query = dishes::table
        .left_join(categories::table)
        .left_join(cuisine_types::table)
        .select((
            Dish::as_select(),
            categories::name.nullable(),
            cuisine_types::name.nullable(),
        ))
        .into_boxed();

    if let Some(category) = filter.category.as_deref() {
        query = query.filter(categories::name.eq(category.to_string()));
    }

    if filter.starred_only {
        query = query.filter(dishes::starred.eq(true));
    }

    if let Some(term) = filter.search.as_deref().map(str::trim) {
        if !term.is_empty() {
            let pattern = like_pattern(term);
            let by_ingredient = dish_ingredients::table
                .inner_join(ingredients::table)
                .filter(ingredients::name.like(pattern.clone()).escape('\\'))
                .select(dish_ingredients::dish_id);

            query = query.filter(
                dishes::title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(dishes::description.like(pattern.clone()).escape('\\'))
                    .or(dishes::instructions.like(pattern).escape('\\'))
                    .or(dishes::id.eq_any(by_ingredient)),
            );
        }
    }

    let query = match filter.ordering {
        DishOrdering::TitleAsc => query.order((dishes::title.asc(), dishes::id.asc())),
        DishOrdering::TitleDesc => query.order((dishes::title.desc(), dishes::id.asc())),
        DishOrdering::CooktimeAsc => query.order((dishes::cooktime.asc(), dishes::title.asc())),
        DishOrdering::CooktimeDesc => {
            query.order((dishes::cooktime.desc(), dishes::title.asc()))
        }
    };

    let rows: Vec<(Dish, Option<String>, Option<String>)> = query.load(conn)?;

    let ids: Vec<i32> = rows.iter().map(|(dish, _, _)| dish.id).collect();
    let mut ingredients_by_dish = load_required_ingredients(conn, &ids)?;

    Ok(rows
        .into_iter()
        .map(|(dish, category_name, type_name)| Recipe {
            ingredients: ingredients_by_dish.remove(&dish.id).unwrap_or_default(),
            id: dish.id,
            title: dish.title,
            description: dish.description,
            instructions: dish.instructions,
            cooktime: dish.cooktime,
            starred: dish.starred,
            category_name,
            type_name,
        })
        .collect())
}

fn load_required_ingredients(
    conn: &mut SqliteConnection,
    dish_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<RequiredIngredient>>> {
    let mut by_dish: HashMap<i32, Vec<RequiredIngredient>> = HashMap::new();
    if dish_ids.is_empty() {
        return Ok(by_dish);
    }

    let rows: Vec<(i32, i32, String, String)> = dish_ingredients::table
        .inner_join(ingredients::table)
        .filter(dish_ingredients::dish_id.eq_any(dish_ids))
        .order(dish_ingredients::id.asc())
        .select((
            dish_ingredients::dish_id,
            ingredients::id,
            ingredients::name,
            dish_ingredients::quantity,
        ))
        .load(conn)?;

    for (dish_id, ingredient_id, name, quantity) in rows {
        by_dish.entry(dish_id).or_default().push(RequiredIngredient {
            ingredient_id,
            name,
            quantity,
        });
    }

    Ok(by_dish)
}

/// The whole catalog, read through one borrowed connection.
pub struct DbCatalog<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> DbCatalog<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl RecipeSource for DbCatalog<'_> {
    type Error = diesel::result::Error;

    fn fetch_recipes(&mut self) -> Result<Vec<Recipe>, Self::Error> {
        // Catalog order (by id) so equal titles rank deterministically
        let mut recipes = load_recipes(self.conn, &DishFilter::default())?;
        recipes.sort_by_key(|r| r.id);
        Ok(recipes)
    }
}

/// Lookup tables keyed by a unique name
#[derive(Debug, Clone, Copy)]
pub enum NamedTable {
    Category,
    CuisineType,
    Ingredient,
}

macro_rules! get_or_create {
    ($conn:expr, $table:ident, $name:expr) => {{
        let existing: Option<i32> = $table::table
            .filter($table::name.eq($name))
            .select($table::id)
            .first($conn)
            .optional()?;
        match existing {
            Some(id) => Ok(id),
            None => diesel::insert_into($table::table)
                .values($table::name.eq($name))
                .returning($table::id)
                .get_result($conn),
        }
    }};
}

/// Id of the row called `name`, inserting it first if needed.
pub fn get_or_create(conn: &mut SqliteConnection, table: NamedTable, name: &str) -> QueryResult<i32> {
    match table {
        NamedTable::Category => get_or_create!(conn, categories, name),
        NamedTable::CuisineType => get_or_create!(conn, cuisine_types, name),
        NamedTable::Ingredient => get_or_create!(conn, ingredients, name),
    }
}

/// List (id, name) pairs of a lookup table ordered by name.
pub fn list_named(conn: &mut SqliteConnection, table: NamedTable) -> QueryResult<Vec<(i32, String)>> {
    match table {
        NamedTable::Category => categories::table
            .select((categories::id, categories::name))
            .order(categories::name.asc())
            .load(conn),
        NamedTable::CuisineType => cuisine_types::table
            .select((cuisine_types::id, cuisine_types::name))
            .order(cuisine_types::name.asc())
            .load(conn),
        NamedTable::Ingredient => ingredients::table
            .select((ingredients::id, ingredients::name))
            .order(ingredients::name.asc())
            .load(conn),
    }
}

/// A dish to insert, with its ingredients already checked for duplicates.
pub struct DishDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub instructions: &'a str,
    pub cooktime: Option<i32>,
    pub category: Option<&'a str>,
    pub cuisine_type: Option<&'a str>,
    pub starred: bool,
    /// (ingredient name, quantity) in declared order
    pub ingredients: Vec<(&'a str, &'a str)>,
}

/// Insert a dish and its ingredient pairings in one transaction.
pub fn insert_dish(conn: &mut SqliteConnection, draft: &DishDraft<'_>) -> QueryResult<i32> {
    conn.transaction(|conn| {
        let category_id = draft
            .category
            .map(|name| get_or_create(conn, NamedTable::Category, name))
            .transpose()?;
        let type_id = draft
            .cuisine_type
            .map(|name| get_or_create(conn, NamedTable::CuisineType, name))
            .transpose()?;

        let dish_id: i32 = diesel::insert_into(dishes::table)
            .values(&NewDish {
                title: draft.title,
                description: draft.description,
                instructions: draft.instructions,
                cooktime: draft.cooktime,
                category_id,
                type_id,
                starred: draft.starred,
            })
            .returning(dishes::id)
            .get_result(conn)?;

        // Row by row so pairing ids follow the declared order
        for &(name, quantity) in &draft.ingredients {
            let ingredient_id = get_or_create(conn, NamedTable::Ingredient, name)?;
            diesel::insert_into(dish_ingredients::table)
                .values(&NewDishIngredient {
                    dish_id,
                    ingredient_id,
                    quantity,
                })
                .execute(conn)?;
        }

        Ok(dish_id)
    })
}

/// Delete a dish and its pairings. Returns whether the dish existed.
pub fn delete_dish(conn: &mut SqliteConnection, dish_id: i32) -> QueryResult<bool> {
    conn.transaction(|conn| {
        diesel::delete(dish_ingredients::table.filter(dish_ingredients::dish_id.eq(dish_id)))
            .execute(conn)?;
        let deleted = diesel::delete(dishes::table.filter(dishes::id.eq(dish_id))).execute(conn)?;
        Ok(deleted > 0)
    })
}

/// Set the starred flag. Returns the new value, or `None` if no such dish.
pub fn set_starred(
    conn: &mut SqliteConnection,
    dish_id: i32,
    starred: bool,
) -> QueryResult<Option<bool>> {
    diesel::update(dishes::table.filter(dishes::id.eq(dish_id)))
        .set(dishes::starred.eq(starred))
        .returning(dishes::starred)
        .get_result(conn)
        .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use larder_core::{find_possible, MatchMode};
    use std::collections::HashSet;

    fn draft<'a>(title: &'a str, ingredients: Vec<(&'a str, &'a str)>) -> DishDraft<'a> {
        DishDraft {
            title,
            description: "",
            instructions: "",
            cooktime: None,
            category: None,
            cuisine_type: None,
            starred: false,
            ingredients,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("egg"), "%egg%");
    }

    #[test]
    fn test_insert_and_load_keeps_ingredient_order() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        let mut pie = draft("Apple pie", vec![("flour", "300 g"), ("apple", "4"), ("sugar", "100 g")]);
        pie.category = Some("Dessert");
        pie.cuisine_type = Some("American");
        pie.cooktime = Some(60);
        insert_dish(&mut conn, &pie).unwrap();

        let recipes = load_recipes(&mut conn, &DishFilter::default()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredient_names(), vec!["flour", "apple", "sugar"]);
        assert_eq!(recipes[0].category_name.as_deref(), Some("Dessert"));
        assert_eq!(recipes[0].type_name.as_deref(), Some("American"));
        assert_eq!(recipes[0].ingredients[1].quantity, "4");
    }

    #[test]
    fn test_ingredients_are_shared_between_dishes() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        insert_dish(&mut conn, &draft("Omelette", vec![("egg", "3")])).unwrap();
        insert_dish(&mut conn, &draft("Boiled egg", vec![("egg", "1")])).unwrap();

        let names = list_named(&mut conn, NamedTable::Ingredient).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].1, "egg");
    }

    #[test]
    fn test_duplicate_pairing_rolls_back() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        let result = insert_dish(&mut conn, &draft("Bad", vec![("egg", "1"), ("egg", "2")]));
        assert!(result.is_err());
        assert!(load_recipes(&mut conn, &DishFilter::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_filters_and_ordering() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        let mut soup = draft("Soup", vec![("carrot", "2")]);
        soup.category = Some("Lunch");
        soup.cooktime = Some(45);
        insert_dish(&mut conn, &soup).unwrap();

        let mut toast = draft("Toast", vec![("bread", "2 slices")]);
        toast.category = Some("Breakfast");
        toast.cooktime = Some(5);
        toast.starred = true;
        insert_dish(&mut conn, &toast).unwrap();

        let lunch = load_recipes(
            &mut conn,
            &DishFilter {
                category: Some("Lunch".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(lunch.len(), 1);
        assert_eq!(lunch[0].title, "Soup");

        let by_ingredient = load_recipes(
            &mut conn,
            &DishFilter {
                search: Some("CARROT".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(by_ingredient.len(), 1);
        assert_eq!(by_ingredient[0].title, "Soup");

        let starred = load_recipes(
            &mut conn,
            &DishFilter {
                starred_only: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(starred.len(), 1);
        assert_eq!(starred[0].title, "Toast");

        let slowest_first = load_recipes(
            &mut conn,
            &DishFilter {
                ordering: DishOrdering::CooktimeDesc,
                ..Default::default()
            },
        )
        .unwrap();
        let titles: Vec<&str> = slowest_first.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Soup", "Toast"]);
    }

    #[test]
    fn test_star_and_delete() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        let id = insert_dish(&mut conn, &draft("Toast", vec![("bread", "1")])).unwrap();
        assert_eq!(set_starred(&mut conn, id, true).unwrap(), Some(true));
        assert_eq!(set_starred(&mut conn, id + 100, true).unwrap(), None);

        assert!(delete_dish(&mut conn, id).unwrap());
        assert!(!delete_dish(&mut conn, id).unwrap());
        assert!(load_recipes(&mut conn, &DishFilter::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_db_catalog_feeds_matcher() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();

        insert_dish(&mut conn, &draft("A", vec![("salt", "1"), ("egg", "2")])).unwrap();
        insert_dish(
            &mut conn,
            &draft("B", vec![("salt", "1"), ("egg", "2"), ("flour", "3")]),
        )
        .unwrap();

        let ids: HashMap<String, i32> = list_named(&mut conn, NamedTable::Ingredient)
            .unwrap()
            .into_iter()
            .map(|(id, name)| (name, id))
            .collect();
        let owned: HashSet<i32> = HashSet::from([ids["salt"], ids["egg"]]);

        let mut source = DbCatalog::new(&mut conn);
        let strict = find_possible(&mut source, owned.clone(), MatchMode::Strict).unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].recipe.title, "A");

        let willing = find_possible(&mut source, owned, MatchMode::WillingToBuy).unwrap();
        assert_eq!(willing.len(), 2);
        assert_eq!(willing[1].match_percentage, 66.7);
        assert_eq!(willing[1].missing_ingredients, vec!["flour"]);
    }
}
