pub mod aggregation;
pub mod categorization;
pub mod checklist;
pub mod cleanup;
pub mod generate;
pub mod list;
pub mod session;

// Re-export commonly used types
pub use aggregation::IngredientAggregationService;
pub use categorization::{CategorizationService, StoreSection};
pub use checklist::{CheckedItems, export_text};
pub use cleanup::{
    CleanupError, CleanupRequest, CleanupService, GroceryListOrganizer, HttpCleanupService,
    ORGANIZE_MARKER,
};
pub use generate::{generate_for_selection, generate_grocery_list};
pub use list::{GroceryItem, OrganizedGroceryList};
pub use session::{CleanupOutcome, CleanupTicket, ShoppingSession};
