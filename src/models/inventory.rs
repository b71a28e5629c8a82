use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 库存分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Pantry,
    Frozen,
    Bakery,
    Beverage,
    #[default]
    Other,
}

impl Category {
    /// 默认保质期 (天)
    pub fn default_shelf_life_days(self) -> i64 {
        match self {
            Category::Produce => 5,
            Category::Dairy => 7,
            Category::Meat => 3,
            Category::Seafood => 2,
            Category::Pantry => 365,
            Category::Frozen => 120,
            Category::Bakery => 3,
            Category::Beverage => 180,
            Category::Other => 30,
        }
    }
}

/// 包装规格 (数值 + 单位)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSize {
    pub value: f64,
    pub unit: String,
}

static MULTIPACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*([a-z]+)").expect("valid multipack pattern")
});
static SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*([a-z]+)").expect("valid size pattern"));

impl PackageSize {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// 解析商品标注的规格，如 "2 x 12 oz" (=24 oz)、"473ml"、"1.89 L"、"12 count"
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.replace('×', "x").to_lowercase();

        if let Some(caps) = MULTIPACK_RE.captures(&s) {
            let count: f64 = caps[1].parse().ok()?;
            let value: f64 = caps[2].parse().ok()?;
            return Some(Self::new(count * value, normalize_unit(&caps[3])));
        }

        let caps = SINGLE_RE.captures(&s)?;
        let value: f64 = caps[1].parse().ok()?;
        Some(Self::new(value, normalize_unit(&caps[2])))
    }

    /// 仅正数规格参与按比例扣减
    pub fn positive_value(&self) -> Option<f64> {
        (self.value > 0.0).then_some(self.value)
    }
}

/// 单位归一化，未知单位原样(小写)返回
pub fn normalize_unit(unit: &str) -> String {
    let u = unit.to_lowercase().replace('.', "");
    let canonical = match u.as_str() {
        "g" | "gram" | "grams" => "g",
        "kg" | "kilogram" | "kilograms" => "kg",
        "ml" | "milliliter" | "milliliters" => "ml",
        "l" | "liter" | "litre" | "liters" | "litres" => "L",
        "oz" | "ounce" | "ounces" => "oz",
        "lb" | "pound" | "pounds" => "lb",
        "ct" | "count" | "pcs" | "piece" | "pieces" => "ct",
        _ => return u,
    };
    canonical.to_string()
}

/// 库存条目 (外部快照中的一行)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub package_size: Option<PackageSize>,
    /// 剩余量，单位与包装规格一致；规格未知时等于件数
    pub remaining: f64,
    /// 在手件数, 0 视为已移出库存
    pub quantity: u32,
    #[serde(default = "default_par_level")]
    pub par_level: u32,
    pub added_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
}

fn default_par_level() -> u32 {
    2
}

impl InventoryItem {
    /// 新建条目: 保质期按分类默认天数推算，par 默认 2
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        package_size: Option<PackageSize>,
        quantity: u32,
        added_at: DateTime<Utc>,
    ) -> Self {
        let remaining = package_size
            .as_ref()
            .and_then(PackageSize::positive_value)
            .unwrap_or(quantity as f64);
        Self {
            id: id.into(),
            name: name.into(),
            category,
            package_size,
            remaining,
            quantity,
            par_level: default_par_level(),
            added_at,
            expiry: added_at + Duration::days(category.default_shelf_life_days()),
        }
    }

    pub fn with_par_level(mut self, par_level: u32) -> Self {
        self.par_level = par_level;
        self
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }

    /// 低于 par 的缺口
    pub fn shortfall(&self) -> u32 {
        self.par_level.saturating_sub(self.quantity)
    }
}

/// 过滤掉件数为 0 的条目
pub fn active_items(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items.iter().filter(|i| i.is_active()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_multipack() {
        let size = PackageSize::parse("2 x 12 oz").unwrap();
        assert_eq!(size, PackageSize::new(24.0, "oz"));

        let size = PackageSize::parse("6×330 ml").unwrap();
        assert_eq!(size, PackageSize::new(1980.0, "ml"));
    }

    #[test]
    fn test_parse_single_and_count() {
        assert_eq!(PackageSize::parse("473ml").unwrap(), PackageSize::new(473.0, "ml"));
        assert_eq!(PackageSize::parse("1.89 L").unwrap(), PackageSize::new(1.89, "L"));
        assert_eq!(PackageSize::parse("12 count").unwrap(), PackageSize::new(12.0, "ct"));
        assert_eq!(PackageSize::parse("3 Pounds").unwrap(), PackageSize::new(3.0, "lb"));
    }

    #[test]
    fn test_parse_rejects_unitless() {
        assert!(PackageSize::parse("").is_none());
        assert!(PackageSize::parse("family size").is_none());
        assert!(PackageSize::parse("500").is_none());
    }

    #[test]
    fn test_unknown_unit_passthrough() {
        assert_eq!(normalize_unit("Cup"), "cup");
        assert_eq!(normalize_unit("fl.oz"), "floz");
    }

    #[test]
    fn test_new_item_defaults() {
        let item = InventoryItem::new("m1", "Whole Milk", Category::Dairy, None, 1, t0());
        assert_eq!(item.par_level, 2);
        assert_eq!(item.remaining, 1.0);
        assert_eq!(item.expiry, t0() + Duration::days(7));
        assert_eq!(item.shortfall(), 1);

        let rice = InventoryItem::new(
            "r1",
            "Rice",
            Category::Pantry,
            Some(PackageSize::new(2000.0, "g")),
            1,
            t0(),
        );
        assert_eq!(rice.remaining, 2000.0);
        assert_eq!(rice.expiry, t0() + Duration::days(365));
    }

    #[test]
    fn test_active_items_drops_empty() {
        let mut gone = InventoryItem::new("a", "Apples", Category::Produce, None, 1, t0());
        gone.quantity = 0;
        let kept = InventoryItem::new("b", "Bread", Category::Bakery, None, 2, t0());
        let active = active_items(&[gone, kept.clone()]);
        assert_eq!(active, vec![kept]);
    }

    #[test]
    fn test_category_deserializes_lowercase() {
        let c: Category = serde_json::from_str("\"seafood\"").unwrap();
        assert_eq!(c, Category::Seafood);
        assert_eq!(Category::default_shelf_life_days(c), 2);
    }
}
