pub mod deduction;
pub mod depletion;
pub mod meal_plan;
pub mod planner;
pub mod pricing;
pub mod shopping_list;
pub mod unlocks;
pub mod vocabulary;

pub use deduction::DeductionTable;
pub use depletion::{is_low_or_expiring, low_or_expiring, staples};
pub use meal_plan::plan_week;
pub use planner::{PlannerService, UnlockReport};
pub use pricing::PriceTable;
pub use shopping_list::build_shopping_list;
pub use unlocks::{pair_unlocks, single_unlocks};
pub use vocabulary::{keywords, PantryVocabulary};
