use std::collections::HashSet;

use crate::list::{GroceryItem, OrganizedGroceryList};

/// Items ticked off while shopping.
///
/// Kept outside the list itself and keyed by [`GroceryItem::key`], so a
/// rebuilt list picks the ticks back up as long as an item's name, unit and
/// amount did not change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckedItems {
    keys: HashSet<String>,
}

impl CheckedItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the checked state of `item`, returning the new state.
    pub fn toggle(&mut self, item: &GroceryItem) -> bool {
        self.toggle_key(item.key())
    }

    pub fn toggle_key(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.keys.remove(&key) {
            return false;
        }

        self.keys.insert(key);
        true
    }

    pub fn is_checked(&self, item: &GroceryItem) -> bool {
        self.keys.contains(&item.key())
    }

    /// Forget ticks for items that are no longer on `list`.
    pub fn retain_present(&mut self, list: &OrganizedGroceryList) {
        let present: HashSet<String> = list.items().map(GroceryItem::key).collect();
        self.keys.retain(|k| present.contains(k));
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CheckedItems {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Render the list as plain text for the clipboard.
///
/// ```text
/// Shopping list for 2 recipes:
/// Pancakes • Omelette
///
/// Dairy & Eggs:
/// □ 3 egg
/// □ 1 cup milk (whole)
/// ```
///
/// Checked items are left out, as are sections with nothing left to buy.
pub fn export_text<S: AsRef<str>>(
    recipe_titles: &[S],
    list: &OrganizedGroceryList,
    checked: &CheckedItems,
) -> String {
    let noun = if recipe_titles.len() == 1 {
        "recipe"
    } else {
        "recipes"
    };
    let titles = recipe_titles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" • ");

    let sections = list
        .iter()
        .filter_map(|(section, items)| {
            let lines = items
                .iter()
                .filter(|item| !checked.is_checked(item))
                .map(|item| format!("□ {}", item.display_text()))
                .collect::<Vec<_>>();

            if lines.is_empty() {
                return None;
            }

            Some(format!("{}:\n{}", section, lines.join("\n")))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Shopping list for {} {}:\n{}\n\n{}",
        recipe_titles.len(),
        noun,
        titles,
        sections
    )
}
