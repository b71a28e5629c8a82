use crate::error::PlannerError;
use bigdecimal::{BigDecimal, Zero};

/// 粗略价格表: 关键词包含匹配，按表顺序首个命中生效，未命中用默认价
///
/// 只是近似值，不代表真实价格。
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    rules: Vec<(Vec<String>, BigDecimal)>,
    default_price: BigDecimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        fn rule(keywords: &[&str], price: u32) -> (Vec<String>, BigDecimal) {
            (
                keywords.iter().map(|k| k.to_string()).collect(),
                BigDecimal::from(price),
            )
        }
        Self {
            rules: vec![
                rule(&["chicken"], 8),
                rule(&["beef"], 10),
                rule(&["salmon", "fish"], 12),
                rule(&["milk"], 4),
                rule(&["eggs"], 4),
                rule(&["yogurt"], 5),
                rule(&["cheese"], 6),
                rule(&["bread"], 3),
                rule(&["onion", "garlic"], 2),
            ],
            default_price: BigDecimal::from(5),
        }
    }
}

impl PriceTable {
    /// 自定义价格表，负价格属于调用方错误
    pub fn new(
        rules: Vec<(Vec<String>, BigDecimal)>,
        default_price: BigDecimal,
    ) -> Result<Self, PlannerError> {
        if default_price < BigDecimal::zero() {
            return Err(PlannerError::InvalidPrice {
                keyword: "<default>".to_string(),
                price: default_price,
            });
        }
        for (keywords, price) in &rules {
            if *price < BigDecimal::zero() {
                return Err(PlannerError::InvalidPrice {
                    keyword: keywords.join("|"),
                    price: price.clone(),
                });
            }
        }
        Ok(Self {
            rules: rules
                .into_iter()
                .map(|(keywords, price)| {
                    (keywords.into_iter().map(|k| k.to_lowercase()).collect(), price)
                })
                .collect(),
            default_price,
        })
    }

    pub fn price_of(&self, ingredient: &str) -> BigDecimal {
        let name = ingredient.to_lowercase();
        self.rules
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k.as_str())))
            .map(|(_, price)| price.clone())
            .unwrap_or_else(|| self.default_price.clone())
    }
}
