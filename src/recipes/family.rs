//! Family grouping and display-variant selection.
//!
//! A recipe family is the root plus every translation pointing at it. Nothing
//! about the family is persisted; it is computed here, at read time, from the
//! rows fetched for one kitchen. Downstream code never null-checks
//! `original_recipe_id` itself — the root/translation distinction is decided
//! once, in [`RecipeRole`].

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Recipe;

/// Whether a row is the root of its family or a translation of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeRole {
    Root,
    Translation { root_id: Uuid },
}

impl RecipeRole {
    pub fn of(recipe: &Recipe) -> Self {
        match recipe.original_recipe_id {
            None => RecipeRole::Root,
            Some(root_id) => RecipeRole::Translation { root_id },
        }
    }
}

/// The id every family member shares: the root's own id.
pub fn root_id(recipe: &Recipe) -> Uuid {
    match RecipeRole::of(recipe) {
        RecipeRole::Root => recipe.id,
        RecipeRole::Translation { root_id } => root_id,
    }
}

/// A sibling variant offered as a "switch language" option.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TranslationOption {
    pub id: Uuid,
    pub language: String,
    pub recipe_title: String,
}

/// Group fetched rows into families, preserving fetch order both across and
/// within families. The caller fetches ordered by creation time descending,
/// which is the only cross-family ordering we promise.
pub fn group_into_families(rows: Vec<Recipe>) -> Vec<Vec<Recipe>> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut families: std::collections::HashMap<Uuid, Vec<Recipe>> =
        std::collections::HashMap::new();

    for row in rows {
        let key = root_id(&row);
        let family = families.entry(key).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        family.push(row);
    }

    order
        .into_iter()
        .map(|key| families.remove(&key).unwrap_or_default())
        .collect()
}

/// Pick the single member that represents the family for a requested
/// language: exact language match, else the root, else the first-fetched
/// member (deterministic given the fetch order).
pub fn select_variant<'a>(family: &'a [Recipe], lang: &str) -> Option<&'a Recipe> {
    if family.is_empty() {
        return None;
    }
    family
        .iter()
        .find(|member| member.language == lang)
        .or_else(|| {
            family
                .iter()
                .find(|member| RecipeRole::of(member) == RecipeRole::Root)
        })
        .or_else(|| family.first())
}

/// The other family members, for the client-side language switcher. The
/// selected variant itself is excluded.
pub fn translation_options(family: &[Recipe], selected_id: Uuid) -> Vec<TranslationOption> {
    family
        .iter()
        .filter(|member| member.id != selected_id)
        .map(|member| TranslationOption {
            id: member.id,
            language: member.language.clone(),
            recipe_title: member.recipe_title.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(id: Uuid, lang: &str, original: Option<Uuid>) -> Recipe {
        Recipe {
            id,
            kitchen_id: Uuid::new_v4(),
            original_recipe_id: original,
            language: lang.to_string(),
            recipe_title: format!("title-{lang}"),
            reasoning: String::new(),
            steps: serde_json::json!([]),
            analysis_log: String::new(),
            is_safe: true,
            meal_type: "dinner".to_string(),
            difficulty: "easy".to_string(),
            prep_time: "20 min".to_string(),
            dish_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_of_root_and_translation() {
        let root = recipe(Uuid::new_v4(), "en", None);
        assert_eq!(RecipeRole::of(&root), RecipeRole::Root);
        assert_eq!(root_id(&root), root.id);

        let translated = recipe(Uuid::new_v4(), "pt-BR", Some(root.id));
        assert_eq!(
            RecipeRole::of(&translated),
            RecipeRole::Translation { root_id: root.id }
        );
        assert_eq!(root_id(&translated), root.id);
    }

    #[test]
    fn test_grouping_keeps_fetch_order() {
        let root_a = Uuid::new_v4();
        let root_b = Uuid::new_v4();
        let rows = vec![
            recipe(Uuid::new_v4(), "pt-BR", Some(root_a)),
            recipe(root_b, "en", None),
            recipe(root_a, "en", None),
            recipe(Uuid::new_v4(), "fr", Some(root_b)),
        ];

        let families = group_into_families(rows);
        assert_eq!(families.len(), 2);
        // First family seen first, even though its root came later in the fetch.
        assert_eq!(root_id(&families[0][0]), root_a);
        assert_eq!(families[0].len(), 2);
        assert_eq!(root_id(&families[1][0]), root_b);
        assert_eq!(families[1].len(), 2);
    }

    #[test]
    fn test_exact_language_match_wins() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let family = vec![recipe(a, "en", None), recipe(b, "pt-BR", Some(a))];

        let selected = select_variant(&family, "pt-BR").unwrap();
        assert_eq!(selected.id, b);

        let options = translation_options(&family, selected.id);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, a);
        assert_eq!(options[0].language, "en");
    }

    #[test]
    fn test_no_match_falls_back_to_root() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let family = vec![recipe(b, "pt-BR", Some(a)), recipe(a, "en", None)];

        let selected = select_variant(&family, "fr").unwrap();
        assert_eq!(selected.id, a);

        let options = translation_options(&family, selected.id);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, b);
    }

    #[test]
    fn test_orphaned_family_falls_back_to_first_member() {
        // A family-of-one translation whose root is gone: no language match,
        // no root, so the first-fetched member is chosen.
        let family = vec![recipe(Uuid::new_v4(), "pt-BR", Some(Uuid::new_v4()))];
        let selected = select_variant(&family, "fr").unwrap();
        assert_eq!(selected.id, family[0].id);
    }

    #[test]
    fn test_selected_variant_excluded_from_options() {
        let a = Uuid::new_v4();
        let family = vec![recipe(a, "en", None)];
        let selected = select_variant(&family, "en").unwrap();
        assert!(translation_options(&family, selected.id).is_empty());
    }

    #[test]
    fn test_empty_family_selects_nothing() {
        assert!(select_variant(&[], "en").is_none());
    }
}
