use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::dishes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[allow(dead_code)]
pub struct Dish {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub cooktime: Option<i32>,
    pub category_id: Option<i32>,
    pub type_id: Option<i32>,
    pub starred: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dishes)]
pub struct NewDish<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub instructions: &'a str,
    pub cooktime: Option<i32>,
    pub category_id: Option<i32>,
    pub type_id: Option<i32>,
    pub starred: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dish_ingredients)]
pub struct NewDishIngredient<'a> {
    pub dish_id: i32,
    pub ingredient_id: i32,
    pub quantity: &'a str,
}
