use std::collections::HashMap;

use crate::list::GroceryItem;

/// Ingredient Aggregation Service
///
/// Stateless domain service that folds duplicate items of one store section
/// into a single line:
/// - "2 cup flour" + "1 cup Flour" = "3 cup flour"
/// - "2 cups flour" + "200 g flour" = 2 separate line items (different units)
/// - "1 tsp salt" + "a pinch tsp salt" = 2 separate line items (amount is not a number)
///
/// Units are compared as written; there is no unit conversion.
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Merge items sharing the same `(name, unit)` identity.
    ///
    /// Amounts are summed only when both sides parse as numbers; otherwise the
    /// incoming item is kept as its own line so nothing is lost. Output keeps
    /// first-insertion order.
    pub fn merge(items: Vec<GroceryItem>) -> Vec<GroceryItem> {
        let mut merged: Vec<GroceryItem> = Vec::with_capacity(items.len());
        let mut positions: HashMap<(String, String), usize> = HashMap::new();

        for item in items {
            let key = (Self::normalize_name(&item.name), item.unit.clone());

            let Some(&position) = positions.get(&key) else {
                positions.insert(key, merged.len());
                merged.push(item);
                continue;
            };

            let amounts = (
                parse_amount(&merged[position].amount),
                parse_amount(&item.amount),
            );

            match amounts {
                (Some(current), Some(incoming)) => {
                    let existing = &mut merged[position];
                    existing.amount = format_amount(current + incoming);
                    existing.add_recipes(&item.from_recipes);
                    Self::merge_notes(&mut existing.notes, item.notes);
                }
                _ => {
                    tracing::trace!(
                        name = %item.name,
                        unit = %item.unit,
                        amount = %item.amount,
                        "amount is not numeric, keeping a separate line"
                    );

                    // the position index only tracks the first line of a key,
                    // this one stays unreachable for later merges
                    merged.push(item);
                }
            }
        }

        merged
    }

    /// Normalize ingredient name (lowercase, trim whitespace)
    fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    fn merge_notes(current: &mut Option<String>, incoming: Option<String>) {
        let Some(incoming) = incoming.filter(|n| !n.is_empty()) else {
            return;
        };

        match current {
            Some(existing) if !existing.is_empty() => {
                if *existing != incoming {
                    existing.push_str("; ");
                    existing.push_str(&incoming);
                }
            }
            _ => *current = Some(incoming),
        }
    }
}

/// Parse a free-text amount as a finite number ("2", "1.5", " 3 ").
///
/// Fractions and words ("1/2", "a pinch") are not numbers here.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let value: f64 = amount.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Shortest decimal form of a summed amount ("3", "2.5").
pub fn format_amount(value: f64) -> String {
    value.to_string()
}
