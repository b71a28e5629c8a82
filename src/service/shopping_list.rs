use crate::models::{InventoryItem, PairUnlock, ShoppingCandidate, ShoppingList, SingleUnlock};
use crate::service::pricing::PriceTable;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use indexmap::IndexMap;

/// 参与需求登记的解锁项条数
pub const UNLOCK_DEMAND_LIMIT: usize = 5;

/// 需求跟踪器 - 每个食材(小写)的需求件数，多来源取最大值而非求和
#[derive(Debug, Clone, Default)]
struct Demand {
    quantities: IndexMap<String, u32>,
    reasons: IndexMap<String, Vec<String>>,
}

impl Demand {
    fn require(&mut self, name: &str, quantity: u32) {
        let entry = self.quantities.entry(name.to_lowercase()).or_insert(0);
        *entry = (*entry).max(quantity);
    }

    /// 只给已登记的食材追加理由
    fn annotate(&mut self, name: &str, reason: String) {
        let key = name.to_lowercase();
        if self.quantities.contains_key(&key) {
            self.reasons.entry(key).or_default().push(reason);
        }
    }
}

/// 生成预算内购物清单
///
/// 1. 缺货/临期条目按 par 缺口登记需求
/// 2. 前 5 个单项解锁、前 5 个组合解锁各登记至少 1 件
/// 3. 权重 = (1 + 解锁数) / max(1, 单价)，按权重降序 (稳定，同权重保持登记顺序)
/// 4. 贪心: 依次放入不超预算的候选，超预算的跳过但继续看后面的
///
/// 贪心结果不保证是背包最优解。
pub fn build_shopping_list(
    low_or_expiring: &[InventoryItem],
    single_unlocks: &[SingleUnlock],
    pair_unlocks: &[PairUnlock],
    weekly_budget: &BigDecimal,
    prices: &PriceTable,
) -> ShoppingList {
    let top_singles = &single_unlocks[..single_unlocks.len().min(UNLOCK_DEMAND_LIMIT)];
    let top_pairs = &pair_unlocks[..pair_unlocks.len().min(UNLOCK_DEMAND_LIMIT)];

    // Phase 1: 登记需求
    let mut demand = Demand::default();
    for item in low_or_expiring {
        let need = item.shortfall();
        if need > 0 {
            demand.require(&item.name, need);
        }
    }
    for u in top_singles {
        demand.require(&u.ingredient, 1);
    }
    for p in top_pairs {
        for ingredient in &p.pair {
            demand.require(ingredient, 1);
        }
    }

    // Phase 2: 理由
    for item in low_or_expiring {
        demand.annotate(
            &item.name,
            format!("refill (qty {}, exp {})", item.quantity, item.expiry.format("%Y-%m-%d")),
        );
    }
    for u in top_singles {
        demand.annotate(&u.ingredient, format!("unlocks {} rec.", u.unlocks));
    }
    for p in top_pairs {
        for ingredient in &p.pair {
            demand.annotate(ingredient, format!("pair {} → {}", p.label(), p.unlocks));
        }
    }

    // Phase 3: 评分
    let Demand {
        quantities,
        mut reasons,
    } = demand;
    let mut candidates: Vec<ShoppingCandidate> = quantities
        .into_iter()
        .map(|(name, quantity)| {
            let price = prices.price_of(&name);
            let unlocks = unlock_score(&name, single_unlocks, pair_unlocks);
            let weight = weight_of(unlocks, &price);
            let subtotal = price.clone() * BigDecimal::from(quantity);
            ShoppingCandidate {
                reasons: reasons.swap_remove(&name).unwrap_or_default(),
                name,
                quantity,
                price,
                unlocks,
                weight,
                subtotal,
            }
        })
        .collect();
    candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    // Phase 4: 贪心选择
    let mut total = BigDecimal::zero();
    let mut kept = Vec::new();
    if *weekly_budget > BigDecimal::zero() {
        for candidate in candidates {
            let next_total = &total + &candidate.subtotal;
            if next_total <= *weekly_budget {
                tracing::debug!(
                    "Keep {} x{} (weight {:.4}, subtotal {})",
                    candidate.name, candidate.quantity, candidate.weight, candidate.subtotal
                );
                total = next_total;
                kept.push(candidate);
            } else {
                tracing::debug!(
                    "Skip {} x{}: subtotal {} exceeds remaining budget",
                    candidate.name, candidate.quantity, candidate.subtotal
                );
            }
        }
    }

    tracing::info!(
        "Shopping list built: {} items kept, total {} / budget {}",
        kept.len(), total, weekly_budget
    );

    ShoppingList {
        items: kept,
        total,
        budget: weekly_budget.clone(),
    }
}

/// 单项解锁数 + 所有包含该食材的组合解锁数
fn unlock_score(name: &str, single_unlocks: &[SingleUnlock], pair_unlocks: &[PairUnlock]) -> usize {
    let single = single_unlocks
        .iter()
        .find(|s| s.ingredient == name)
        .map(|s| s.unlocks)
        .unwrap_or(0);
    let pairs: usize = pair_unlocks
        .iter()
        .filter(|p| p.contains(name))
        .map(|p| p.unlocks)
        .sum();
    single + pairs
}

fn weight_of(unlocks: usize, price: &BigDecimal) -> f64 {
    let divisor = price.to_f64().unwrap_or(1.0).max(1.0);
    (1 + unlocks) as f64 / divisor
}
