pub mod inventory;
pub mod recipe;
pub mod shopping;

pub use inventory::{active_items, normalize_unit, Category, InventoryItem, PackageSize};
pub use recipe::{MealPlan, PairUnlock, RecipeMatch, SingleUnlock};
pub use shopping::{ShoppingCandidate, ShoppingList};
