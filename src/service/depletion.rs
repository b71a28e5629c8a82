use crate::models::InventoryItem;
use chrono::{DateTime, Duration, Utc};

/// 缺货或临期: 件数 <= 1，或到期时间不晚于 now + horizon (含边界)
///
/// 每次调用都重新计算，now 是持续推进的。
/// 窗口超出可表示的时间范围时，正向视为无界 (全部临期)，负向视为空窗口。
pub fn is_low_or_expiring(item: &InventoryItem, now: DateTime<Utc>, horizon_days: i64) -> bool {
    if item.quantity <= 1 {
        return true;
    }
    match Duration::try_days(horizon_days).and_then(|d| now.checked_add_signed(d)) {
        Some(deadline) => item.expiry <= deadline,
        None => horizon_days >= 0,
    }
}

/// 筛出缺货或临期的在库条目 (保持输入顺序)
pub fn low_or_expiring(
    items: &[InventoryItem],
    now: DateTime<Utc>,
    horizon_days: i64,
) -> Vec<InventoryItem> {
    items
        .iter()
        .filter(|i| i.is_active() && is_low_or_expiring(i, now, horizon_days))
        .cloned()
        .collect()
}

const STAPLES: [&str; 12] = [
    "salt", "pepper", "olive oil", "butter", "flour", "sugar", "rice", "pasta", "oil", "spice",
    "garlic", "onion",
];

/// 常备品 (盐、油、面粉等)
pub fn staples(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items
        .iter()
        .filter(|i| {
            let name = i.name.to_lowercase();
            STAPLES.iter().any(|s| name.contains(s))
        })
        .cloned()
        .collect()
}
