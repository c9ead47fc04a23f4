pub mod recipe;
mod selection;

pub use recipe::{Ingredient, Recipe};
pub use selection::*;
