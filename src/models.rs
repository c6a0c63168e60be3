use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::kitchen_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct KitchenMember {
    pub id: Uuid,
    pub kitchen_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One language-specific rendering of a dish. A recipe with
/// `original_recipe_id = None` is the root of its family; translations point
/// back at the root, never at each other.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub kitchen_id: Uuid,
    pub original_recipe_id: Option<Uuid>,
    pub language: String,
    pub recipe_title: String,
    pub reasoning: String,
    pub steps: serde_json::Value,
    pub analysis_log: String,
    pub is_safe: bool,
    pub meal_type: String,
    pub difficulty: String,
    pub prep_time: String,
    pub dish_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub kitchen_id: Uuid,
    pub original_recipe_id: Option<Uuid>,
    pub language: &'a str,
    pub recipe_title: &'a str,
    pub reasoning: &'a str,
    pub steps: serde_json::Value,
    pub analysis_log: &'a str,
    pub is_safe: bool,
    pub meal_type: &'a str,
    pub difficulty: &'a str,
    pub prep_time: &'a str,
    pub dish_image: Option<&'a str>,
}

/// Tenant-scoped catalog entry, unique per `(kitchen_id, name)`.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub id: Uuid,
    pub kitchen_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub kitchen_id: Uuid,
    pub name: &'a str,
}

/// Tenant-scoped catalog entry. Unlike ingredients, quantity/unit live on the
/// catalog row itself and are shared by every recipe referencing the item.
/// Rows created by translation carry `original_shopping_item_id` pointing at
/// the source item's catalog row.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::shopping_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShoppingItem {
    pub id: Uuid,
    pub kitchen_id: Uuid,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub original_shopping_item_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shopping_items)]
pub struct NewShoppingItem<'a> {
    pub kitchen_id: Uuid,
    pub name: &'a str,
    pub quantity: &'a str,
    pub unit: &'a str,
    pub original_shopping_item_id: Option<Uuid>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub in_pantry: bool,
    pub quantity: String,
    pub unit: String,
    pub amount: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient<'a> {
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub in_pantry: bool,
    pub quantity: &'a str,
    pub unit: &'a str,
    pub amount: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_shopping_items)]
pub struct NewRecipeShoppingItem {
    pub recipe_id: Uuid,
    pub shopping_item_id: Uuid,
}
