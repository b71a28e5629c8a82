use crate::models::{MealPlan, RecipeMatch};

/// 缺料最少的菜谱优先 (稳定排序)，取前 dinners 个
pub fn plan_week(recipes: &[RecipeMatch], dinners: usize) -> MealPlan {
    let mut candidates = recipes.to_vec();
    candidates.sort_by_key(|r| r.missing_ingredient_count);
    candidates.truncate(dinners);
    MealPlan {
        dinners,
        recipes: candidates,
    }
}
