//! Find-or-create resolution of tenant-scoped catalog entries.
//!
//! Catalog rows are unique per `(kitchen_id, name)` (shopping items further
//! distinguish translation counterparts via `original_shopping_item_id`).
//! Resolution is insert-on-conflict-do-nothing followed by a re-fetch, so a
//! concurrent creator racing us turns into one extra select instead of a
//! surfaced unique violation.

use diesel::prelude::*;
use uuid::Uuid;

use crate::models::{Ingredient, NewIngredient, NewShoppingItem, ShoppingItem};
use crate::schema::{ingredients, shopping_items};

/// Extra fields supplied when resolving a shopping item. Quantity and unit
/// live on the catalog row itself, so reusing an existing entry with
/// non-empty values overwrites what every other referencing recipe sees.
/// That shared-value behavior is deliberate and load-bearing for the UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShoppingExtra<'a> {
    pub quantity: &'a str,
    pub unit: &'a str,
    /// Set when this entry is the translated counterpart of a source catalog
    /// row; counterparts are distinct rows even when the names collide.
    pub original_shopping_item_id: Option<Uuid>,
}

pub fn resolve_or_create_ingredient(
    conn: &mut PgConnection,
    kitchen_id: Uuid,
    name: &str,
) -> QueryResult<Ingredient> {
    let existing: Option<Ingredient> = ingredients::table
        .filter(ingredients::kitchen_id.eq(kitchen_id))
        .filter(ingredients::name.eq(name))
        .select(Ingredient::as_select())
        .first(conn)
        .optional()?;

    if let Some(found) = existing {
        return Ok(found);
    }

    let inserted: Option<Ingredient> = diesel::insert_into(ingredients::table)
        .values(&NewIngredient { kitchen_id, name })
        .on_conflict((ingredients::kitchen_id, ingredients::name))
        .do_nothing()
        .returning(Ingredient::as_returning())
        .get_result(conn)
        .optional()?;

    match inserted {
        Some(created) => Ok(created),
        // Lost the race to a concurrent creator; the row exists now.
        None => ingredients::table
            .filter(ingredients::kitchen_id.eq(kitchen_id))
            .filter(ingredients::name.eq(name))
            .select(Ingredient::as_select())
            .first(conn),
    }
}

pub fn resolve_or_create_shopping_item(
    conn: &mut PgConnection,
    kitchen_id: Uuid,
    name: &str,
    extra: ShoppingExtra,
) -> QueryResult<ShoppingItem> {
    if let Some(found) = lookup_shopping_item(conn, kitchen_id, name, &extra)? {
        return apply_catalog_overwrite(conn, found, &extra);
    }

    let inserted: Option<ShoppingItem> = diesel::insert_into(shopping_items::table)
        .values(&NewShoppingItem {
            kitchen_id,
            name,
            quantity: extra.quantity,
            unit: extra.unit,
            original_shopping_item_id: extra.original_shopping_item_id,
        })
        .on_conflict_do_nothing()
        .returning(ShoppingItem::as_returning())
        .get_result(conn)
        .optional()?;

    match inserted {
        Some(created) => Ok(created),
        None => {
            let refetched = lookup_shopping_item(conn, kitchen_id, name, &extra)?
                .ok_or(diesel::result::Error::NotFound)?;
            apply_catalog_overwrite(conn, refetched, &extra)
        }
    }
}

fn lookup_shopping_item(
    conn: &mut PgConnection,
    kitchen_id: Uuid,
    name: &str,
    extra: &ShoppingExtra,
) -> QueryResult<Option<ShoppingItem>> {
    let mut query = shopping_items::table
        .filter(shopping_items::kitchen_id.eq(kitchen_id))
        .filter(shopping_items::name.eq(name))
        .select(ShoppingItem::as_select())
        .into_boxed();

    query = match extra.original_shopping_item_id {
        Some(source_id) => query.filter(shopping_items::original_shopping_item_id.eq(source_id)),
        None => query.filter(shopping_items::original_shopping_item_id.is_null()),
    };

    query.first(conn).optional()
}

/// Write the caller's quantity/unit onto a reused catalog row when supplied.
/// All recipes referencing this item will see the new values.
fn apply_catalog_overwrite(
    conn: &mut PgConnection,
    item: ShoppingItem,
    extra: &ShoppingExtra,
) -> QueryResult<ShoppingItem> {
    if extra.quantity.is_empty() && extra.unit.is_empty() {
        return Ok(item);
    }
    if item.quantity == extra.quantity && item.unit == extra.unit {
        return Ok(item);
    }
    diesel::update(shopping_items::table.find(item.id))
        .set((
            shopping_items::quantity.eq(extra.quantity),
            shopping_items::unit.eq(extra.unit),
        ))
        .returning(ShoppingItem::as_returning())
        .get_result(conn)
}
