use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::models::{
    active_items, InventoryItem, MealPlan, PairUnlock, RecipeMatch, ShoppingList, SingleUnlock,
};
use crate::service::deduction::DeductionTable;
use crate::service::pricing::PriceTable;
use crate::service::vocabulary::PantryVocabulary;
use crate::service::{depletion, meal_plan, shopping_list, unlocks};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 库存决策服务
///
/// 只持有静态参数表，每次调用都是对传入快照的纯计算。
pub struct PlannerService {
    config: PlannerConfig,
    deductions: DeductionTable,
    prices: PriceTable,
}

/// 单项 + 组合解锁
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockReport {
    pub singles: Vec<SingleUnlock>,
    pub pairs: Vec<PairUnlock>,
}

impl PlannerService {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_tables(config, DeductionTable::default(), PriceTable::default())
    }

    pub fn with_tables(config: PlannerConfig, deductions: DeductionTable, prices: PriceTable) -> Self {
        Self {
            config,
            deductions,
            prices,
        }
    }

    /// 边界校验: 剩余量与规格必须是非负有限数
    pub fn validate_items(items: &[InventoryItem]) -> Result<(), PlannerError> {
        for item in items {
            if !item.remaining.is_finite() || item.remaining < 0.0 {
                return Err(PlannerError::NegativeRemaining {
                    id: item.id.clone(),
                    remaining: item.remaining,
                });
            }
            if let Some(size) = &item.package_size {
                if !size.value.is_finite() || size.value < 0.0 {
                    return Err(PlannerError::InvalidPackageSize {
                        id: item.id.clone(),
                        value: size.value,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn validate_horizon(horizon_days: i64) -> Result<(), PlannerError> {
        if horizon_days < 0 {
            return Err(PlannerError::InvalidHorizon(horizon_days));
        }
        Ok(())
    }

    pub fn vocabulary(&self, items: &[InventoryItem]) -> PantryVocabulary {
        PantryVocabulary::from_items(items)
    }

    /// 发给外部菜谱服务的关键词
    pub fn recipe_query_terms(&self, items: &[InventoryItem]) -> Vec<String> {
        self.vocabulary(items).query_terms(self.config.recipe_query_terms)
    }

    pub fn estimate_deduction(&self, name: &str, package_size: Option<f64>, quantity: u32) -> f64 {
        self.deductions.estimate(name, package_size, quantity)
    }

    /// 做完一道菜后的库存快照
    pub fn record_usage<S: AsRef<str>>(
        &self,
        items: &[InventoryItem],
        ingredient_names: &[S],
    ) -> Vec<InventoryItem> {
        self.deductions.record_usage(items, ingredient_names)
    }

    /// 缺货/临期条目，未指定窗口时用展示窗口 (3 天)
    pub fn low_or_expiring(
        &self,
        items: &[InventoryItem],
        now: DateTime<Utc>,
        horizon_days: Option<i64>,
    ) -> Vec<InventoryItem> {
        let horizon = horizon_days.unwrap_or(self.config.display_horizon_days);
        depletion::low_or_expiring(items, now, horizon)
    }

    /// 盘点: 用购物窗口 (7 天) 扫一遍
    pub fn reality_check(&self, items: &[InventoryItem], now: DateTime<Utc>) -> Vec<InventoryItem> {
        depletion::low_or_expiring(items, now, self.config.shopping_horizon_days)
    }

    pub fn staples(&self, items: &[InventoryItem]) -> Vec<InventoryItem> {
        depletion::staples(&active_items(items))
    }

    pub fn unlocks(&self, items: &[InventoryItem], recipes: &[RecipeMatch]) -> UnlockReport {
        let pantry = self.vocabulary(items);
        UnlockReport {
            singles: unlocks::single_unlocks(recipes, &pantry),
            pairs: unlocks::pair_unlocks(recipes, &pantry),
        }
    }

    /// 完整流程: 词表 -> 7 天窗口筛选 -> 解锁分析 -> 预算贪心
    pub fn shopping_list(
        &self,
        items: &[InventoryItem],
        recipes: &[RecipeMatch],
        now: DateTime<Utc>,
        weekly_budget: Option<&BigDecimal>,
    ) -> ShoppingList {
        let budget = weekly_budget.unwrap_or(&self.config.weekly_budget);
        let low = self.reality_check(items, now);
        let report = self.unlocks(items, recipes);

        tracing::info!(
            "Planning shopping list: {} items, {} low/expiring, {} recipes, {} single / {} pair unlocks",
            items.len(), low.len(), recipes.len(), report.singles.len(), report.pairs.len()
        );

        shopping_list::build_shopping_list(&low, &report.singles, &report.pairs, budget, &self.prices)
    }

    pub fn meal_plan(&self, recipes: &[RecipeMatch], dinners: Option<usize>) -> MealPlan {
        meal_plan::plan_week(recipes, dinners.unwrap_or(self.config.dinners_per_week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PackageSize};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 18, 0, 0).unwrap()
    }

    fn pantry() -> Vec<InventoryItem> {
        vec![
            // 1 件且临期
            InventoryItem::new("m", "Milk", Category::Dairy, None, 1, now() - Duration::days(2)),
            // 充足
            InventoryItem::new("r", "Rice", Category::Pantry, None, 3, now()),
            // 6 天后到期, 仅在 7 天窗口内
            InventoryItem::new("c", "Cheddar Cheese", Category::Other, None, 2, now())
                .with_par_level(3)
                .with_expiry(now() + Duration::days(6)),
        ]
    }

    #[test]
    fn test_display_vs_shopping_horizon() {
        let service = PlannerService::new(PlannerConfig::default());
        let shown: Vec<_> = service
            .low_or_expiring(&pantry(), now(), None)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(shown, vec!["m"]);

        let swept: Vec<_> = service
            .reality_check(&pantry(), now())
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(swept, vec!["m", "c"]);
    }

    #[test]
    fn test_shopping_list_end_to_end() {
        let service = PlannerService::new(PlannerConfig::default());
        let recipes = vec![
            RecipeMatch::new("Rice Pudding", ["rice", "milk"], ["cinnamon"]),
            RecipeMatch::new("Cinnamon Rice", ["rice"], ["cinnamon"]),
            // 已在词表中，不算解锁
            RecipeMatch::new("Milk Rice", ["rice"], ["milk"]),
            RecipeMatch::new("Risotto", ["rice", "cheese"], ["onion", "stock"]),
        ];
        let list = service.shopping_list(&pantry(), &recipes, now(), None);
        let names: Vec<_> = list.items.iter().map(|i| i.name.as_str()).collect();
        // onion: (1+1)/2; cinnamon: 3/5; milk 1/4; stock 2/5; cheddar cheese 1/6
        assert_eq!(names, vec!["onion", "cinnamon", "stock", "milk", "cheddar cheese"]);
        assert_eq!(list.total, BigDecimal::from(2 + 5 + 5 + 4 + 6));
        assert_eq!(list.budget, BigDecimal::from(100));
    }

    #[test]
    fn test_validate_items() {
        let mut bad = InventoryItem::new("x", "Flour", Category::Pantry, None, 1, now());
        bad.remaining = -1.0;
        assert!(matches!(
            PlannerService::validate_items(&[bad]),
            Err(PlannerError::NegativeRemaining { .. })
        ));

        let mut bad_size = InventoryItem::new("y", "Flour", Category::Pantry, None, 1, now());
        bad_size.package_size = Some(PackageSize::new(f64::NAN, "g"));
        assert!(matches!(
            PlannerService::validate_items(&[bad_size]),
            Err(PlannerError::InvalidPackageSize { .. })
        ));

        assert!(PlannerService::validate_items(&pantry()).is_ok());
        assert!(PlannerService::validate_horizon(-1).is_err());
    }

    #[test]
    fn test_service_uses_custom_tables() {
        use crate::service::deduction::DeductionRule;

        let deductions = DeductionTable::new(vec![DeductionRule::new(&["flour"], 0.5)], 0.2).unwrap();
        let service =
            PlannerService::with_tables(PlannerConfig::default(), deductions, PriceTable::default());
        assert!((service.estimate_deduction("Flour", Some(1000.0), 1) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_usage_through_service() {
        let service = PlannerService::new(PlannerConfig::default());
        let items = vec![InventoryItem::new(
            "f",
            "Flour",
            Category::Pantry,
            Some(PackageSize::new(1000.0, "g")),
            1,
            now(),
        )];
        let updated = service.record_usage(&items, &["flour"]);
        assert!((updated[0].remaining - 800.0).abs() < 1e-9);
        assert!((service.estimate_deduction("Flour", Some(1000.0), 1) - 200.0).abs() < 1e-9);
    }
}
