use bigdecimal::BigDecimal;
use thiserror::Error;

/// 调用方违反约定 (负数价格、负剩余量等)
///
/// 决策核心本身不会失败，这些错误只在 HTTP 边界上校验输入时产生。
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("item {id} has negative remaining amount {remaining}")]
    NegativeRemaining { id: String, remaining: f64 },

    #[error("item {id} has invalid package size {value}")]
    InvalidPackageSize { id: String, value: f64 },

    #[error("price for '{keyword}' must be non-negative, got {price}")]
    InvalidPrice { keyword: String, price: BigDecimal },

    #[error("deduction fraction for '{keyword}' must be a non-negative number, got {fraction}")]
    InvalidFraction { keyword: String, fraction: f64 },

    #[error("horizon must be non-negative, got {0} days")]
    InvalidHorizon(i64),
}
