use std::collections::BTreeMap;

use larder_shared::Ingredient;
use serde::{Deserialize, Serialize};

use crate::categorization::StoreSection;

/// One line of the shopping list.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Titles of the recipes that asked for this item, first appearance first.
    #[serde(default)]
    pub from_recipes: Vec<String>,
    #[serde(default)]
    pub checked: bool,
}

impl GroceryItem {
    /// Builds an unchecked item for `ingredient` as used by `recipe_title`.
    ///
    /// Text fields are trimmed and blank notes are dropped.
    pub fn from_ingredient(ingredient: &Ingredient, recipe_title: &str) -> Self {
        Self {
            name: ingredient.name.trim().to_owned(),
            amount: ingredient.amount.trim().to_owned(),
            unit: ingredient.unit.trim().to_owned(),
            notes: ingredient
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            from_recipes: vec![recipe_title.to_owned()],
            checked: false,
        }
    }

    /// Identity used to remember checked items across list rebuilds.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.name, self.unit, self.amount)
    }

    /// Unions `titles` into `from_recipes`, keeping first-appearance order.
    pub fn add_recipes<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for title in titles {
            let title = title.as_ref();
            if !self.from_recipes.iter().any(|t| t == title) {
                self.from_recipes.push(title.to_owned());
            }
        }
    }

    /// `[amount] [unit] name [(notes)]`, skipping empty segments.
    pub fn display_text(&self) -> String {
        let mut parts = Vec::with_capacity(4);

        if is_present(&self.amount) {
            parts.push(self.amount.clone());
        }

        if is_present(&self.unit) {
            parts.push(self.unit.clone());
        }

        parts.push(self.name.clone());

        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            parts.push(format!("({notes})"));
        }

        parts.join(" ")
    }
}

// front ends have been seen to send the literal "undefined" for missing values
fn is_present(value: &str) -> bool {
    !value.is_empty() && value != "undefined"
}

/// Shopping list grouped by store section.
///
/// Sections always enumerate in [`StoreSection`] declaration order and a
/// section is only present while it holds at least one item.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct OrganizedGroceryList {
    sections: BTreeMap<StoreSection, Vec<GroceryItem>>,
}

impl OrganizedGroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `items` to `section`. Empty batches leave the list untouched.
    pub fn insert(&mut self, section: StoreSection, items: Vec<GroceryItem>) {
        if items.is_empty() {
            return;
        }

        self.sections.entry(section).or_default().extend(items);
    }

    pub fn get(&self, section: StoreSection) -> Option<&[GroceryItem]> {
        self.sections.get(&section).map(Vec::as_slice)
    }

    /// Sections with their items, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StoreSection, &[GroceryItem])> {
        self.sections
            .iter()
            .map(|(section, items)| (*section, items.as_slice()))
    }

    pub fn sections(&self) -> impl Iterator<Item = StoreSection> + '_ {
        self.sections.keys().copied()
    }

    /// Every item of every section, in display order.
    pub fn items(&self) -> impl Iterator<Item = &GroceryItem> {
        self.sections.values().flatten()
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut GroceryItem> {
        self.sections.values_mut().flatten()
    }

    pub fn item_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> GroceryItem {
        GroceryItem {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_ingredient_trims_and_drops_blank_notes() {
        let ingredient = Ingredient {
            name: "  Carrots ".to_owned(),
            amount: " 3 ".to_owned(),
            unit: "".to_owned(),
            notes: Some("   ".to_owned()),
        };

        let item = GroceryItem::from_ingredient(&ingredient, "Stew");

        assert_eq!(item.name, "Carrots");
        assert_eq!(item.amount, "3");
        assert!(item.notes.is_none());
        assert_eq!(item.from_recipes, vec!["Stew"]);
        assert!(!item.checked);
    }

    #[test]
    fn test_display_text() {
        let mut flour = item("flour");
        flour.amount = "2".to_owned();
        flour.unit = "cup".to_owned();
        flour.notes = Some("sifted".to_owned());
        assert_eq!(flour.display_text(), "2 cup flour (sifted)");

        let mut salt = item("salt");
        salt.unit = "undefined".to_owned();
        assert_eq!(salt.display_text(), "salt");
    }

    #[test]
    fn test_add_recipes_deduplicates() {
        let mut onion = item("onion");
        onion.from_recipes = vec!["A".to_owned()];

        onion.add_recipes(["B", "A", "C", "B"]);

        assert_eq!(onion.from_recipes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_key() {
        let mut milk = item("milk");
        milk.amount = "1".to_owned();
        milk.unit = "cup".to_owned();

        assert_eq!(milk.key(), "milk-cup-1");
    }

    #[test]
    fn test_list_orders_sections_and_omits_empty_ones() {
        let mut list = OrganizedGroceryList::new();
        list.insert(StoreSection::Other, vec![item("xyzzy")]);
        list.insert(StoreSection::Pantry, vec![item("sugar")]);
        list.insert(StoreSection::DairyAndEggs, vec![]);
        list.insert(StoreSection::Produce, vec![item("onion")]);

        let sections: Vec<_> = list.sections().collect();
        assert_eq!(
            sections,
            vec![StoreSection::Produce, StoreSection::Pantry, StoreSection::Other]
        );
        assert!(list.get(StoreSection::DairyAndEggs).is_none());
        assert_eq!(list.item_count(), 3);
    }

    #[test]
    fn test_list_serializes_as_section_map() {
        let mut list = OrganizedGroceryList::new();
        list.insert(StoreSection::MeatAndSeafood, vec![item("bacon")]);

        let json = serde_json::to_value(&list).unwrap();

        assert_eq!(json["Meat & Seafood"][0]["name"], "bacon");
        assert_eq!(json["Meat & Seafood"][0]["fromRecipes"], serde_json::json!([]));

        let back: OrganizedGroceryList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }
}
