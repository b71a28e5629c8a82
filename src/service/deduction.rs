use crate::error::PlannerError;
use crate::models::InventoryItem;

/// 关键词 -> 单次使用扣减比例
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionRule {
    pub keywords: Vec<String>,
    pub fraction: f64,
}

impl DeductionRule {
    pub fn new(keywords: &[&str], fraction: f64) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            fraction,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

/// 扣减估算表: 按顺序匹配，首个命中生效
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionTable {
    rules: Vec<DeductionRule>,
    default_fraction: f64,
}

/// 规格未知时的最小扣减量
const MIN_UNITLESS_DEDUCTION: f64 = 0.25;

impl Default for DeductionTable {
    fn default() -> Self {
        Self {
            rules: vec![
                DeductionRule::new(&["olive", "oil"], 0.10),
                DeductionRule::new(&["milk", "oat", "almond", "soy"], 0.25),
                DeductionRule::new(&["butter"], 0.20),
                DeductionRule::new(&["flour", "sugar"], 0.20),
                DeductionRule::new(&["rice", "pasta"], 0.25),
                DeductionRule::new(&["cheese"], 0.15),
                DeductionRule::new(&["yogurt"], 0.25),
                DeductionRule::new(&["chicken", "beef", "pork", "meat"], 0.50),
                DeductionRule::new(&["egg"], 0.20),
                DeductionRule::new(&["salt", "pepper", "spice", "season"], 0.05),
            ],
            default_fraction: 0.20,
        }
    }
}

impl DeductionTable {
    /// 自定义扣减表，比例必须是非负有限数
    pub fn new(rules: Vec<DeductionRule>, default_fraction: f64) -> Result<Self, PlannerError> {
        if !default_fraction.is_finite() || default_fraction < 0.0 {
            return Err(PlannerError::InvalidFraction {
                keyword: "<default>".to_string(),
                fraction: default_fraction,
            });
        }
        for rule in &rules {
            if !rule.fraction.is_finite() || rule.fraction < 0.0 {
                return Err(PlannerError::InvalidFraction {
                    keyword: rule.keywords.join("|"),
                    fraction: rule.fraction,
                });
            }
        }
        Ok(Self {
            rules: rules
                .into_iter()
                .map(|r| DeductionRule {
                    keywords: r.keywords.into_iter().map(|k| k.to_lowercase()).collect(),
                    fraction: r.fraction,
                })
                .collect(),
            default_fraction,
        })
    }

    /// 名称对应的扣减比例 (大小写不敏感)
    pub fn fraction_for(&self, name: &str) -> f64 {
        let name = name.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&name))
            .map(|r| r.fraction)
            .unwrap_or(self.default_fraction)
    }

    /// 估算一次使用消耗的量
    ///
    /// 有正数规格时按规格比例扣减，否则退化为 `max(比例, 0.25)`。
    /// `quantity` 不参与计算，一次使用只消耗一件的一部分。
    pub fn estimate(&self, name: &str, package_size: Option<f64>, _quantity: u32) -> f64 {
        let fraction = self.fraction_for(name);
        match package_size {
            Some(size) if size > 0.0 => size * fraction,
            _ => fraction.max(MIN_UNITLESS_DEDUCTION),
        }
    }

    pub fn estimate_for_item(&self, item: &InventoryItem) -> f64 {
        self.estimate(
            &item.name,
            item.package_size.as_ref().map(|s| s.value),
            item.quantity,
        )
    }

    /// 记录一次烹饪: 名称包含任一食材名的条目按估算量扣减剩余，下限为 0
    pub fn record_usage<S: AsRef<str>>(
        &self,
        items: &[InventoryItem],
        ingredient_names: &[S],
    ) -> Vec<InventoryItem> {
        let names: Vec<String> = ingredient_names
            .iter()
            .map(|n| n.as_ref().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        items
            .iter()
            .map(|item| {
                let key = item.name.to_lowercase();
                if !names.iter().any(|n| key.contains(n.as_str())) {
                    return item.clone();
                }
                let deducted = self.estimate_for_item(item);
                let mut next = item.clone();
                next.remaining = (item.remaining - deducted).max(0.0);
                tracing::debug!(
                    "Used {}: remaining {} -> {}",
                    item.name, item.remaining, next.remaining
                );
                next
            })
            .collect()
    }
}
