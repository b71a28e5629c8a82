use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 购物候选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCandidate {
    pub name: String,
    pub quantity: u32,
    pub price: BigDecimal,
    pub reasons: Vec<String>,
    pub unlocks: usize,
    pub weight: f64,
    pub subtotal: BigDecimal,
}

/// 预算内保留下来的购物清单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingCandidate>,
    pub total: BigDecimal,
    pub budget: BigDecimal,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 可分享的纯文本
    pub fn share_text(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|i| format!("• {} x{} (${})", i.name, i.quantity, i.price))
            .collect();
        format!(
            "Kitchen Sync list (budget ${}, total ${}):\n{}",
            self.budget,
            self.total,
            lines.join("\n")
        )
    }

    /// 导出为 CSV (含表头)
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["name", "quantity", "price", "subtotal", "unlocks", "weight", "reasons"])?;

        for item in &self.items {
            writer.write_record(&[
                item.name.clone(),
                item.quantity.to_string(),
                item.price.to_string(),
                item.subtotal.to_string(),
                item.unlocks.to_string(),
                format!("{:.4}", item.weight),
                item.reasons.join("; "),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShoppingList {
        ShoppingList {
            items: vec![ShoppingCandidate {
                name: "cumin".to_string(),
                quantity: 1,
                price: BigDecimal::from(5),
                reasons: vec!["unlocks 2 rec.".to_string(), "pair cumin+lime → 1".to_string()],
                unlocks: 3,
                weight: 0.8,
                subtotal: BigDecimal::from(5),
            }],
            total: BigDecimal::from(5),
            budget: BigDecimal::from(20),
        }
    }

    #[test]
    fn test_share_text() {
        assert_eq!(
            sample().share_text(),
            "Kitchen Sync list (budget $20, total $5):\n• cumin x1 ($5)"
        );
    }

    #[test]
    fn test_csv_export() {
        let csv = sample().to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("name,quantity,price,subtotal,unlocks,weight,reasons"));
        assert_eq!(
            lines.next(),
            Some("cumin,1,5,5,3,0.8000,unlocks 2 rec.; pair cumin+lime → 1")
        );
        assert_eq!(lines.next(), None);
    }
}
