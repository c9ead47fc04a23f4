use std::cmp::Ordering;
use std::collections::BTreeMap;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use larder_shared::{Recipe, RecipeSelection};

use crate::aggregation::IngredientAggregationService;
use crate::categorization::{CategorizationService, StoreSection};
use crate::list::{GroceryItem, OrganizedGroceryList};

/// Generate a shopping list from a set of recipes
///
/// This command:
/// 1. Flattens every ingredient into an item tagged with its recipe title
/// 2. Categorizes items by store section
/// 3. Merges duplicates inside each section
/// 4. Sorts items by name inside each section
///
/// Pure and deterministic: the same recipes always produce the same list.
pub fn generate_grocery_list(recipes: &[Recipe]) -> OrganizedGroceryList {
    let mut grouped: BTreeMap<StoreSection, Vec<GroceryItem>> = BTreeMap::new();

    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            let item = GroceryItem::from_ingredient(ingredient, &recipe.title);
            let section = CategorizationService::categorize(&item.name);
            grouped.entry(section).or_default().push(item);
        }
    }

    let collator = NameCollator::new();
    let mut list = OrganizedGroceryList::new();

    for (section, items) in grouped {
        let mut items = IngredientAggregationService::merge(items);
        items.sort_by(|a, b| collator.compare(&a.name, &b.name));
        list.insert(section, items);
    }

    tracing::debug!(
        recipes = recipes.len(),
        sections = list.section_count(),
        items = list.item_count(),
        "grocery list generated"
    );

    list
}

/// [`generate_grocery_list`] over the recipes currently selected.
pub fn generate_for_selection(selection: &RecipeSelection) -> OrganizedGroceryList {
    generate_grocery_list(selection.recipes())
}

/// Locale-aware ordering of item names.
///
/// Root collation at tertiary strength: letters first, then accents, then
/// case with lowercase ahead of uppercase.
pub struct NameCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    pub fn new() -> Self {
        match Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(err) => {
                tracing::warn!(err = %err, "collation data unavailable, sorting names by code point");
                Self { collator: None }
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}
