use bigdecimal::BigDecimal;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 购物清单/库存决策参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 每周预算上限
    pub weekly_budget: BigDecimal,
    /// 默认展示用的临期窗口 (天)
    pub display_horizon_days: i64,
    /// 生成购物清单与盘点时的临期窗口 (天)
    pub shopping_horizon_days: i64,
    pub dinners_per_week: usize,
    /// 发给外部菜谱服务的关键词数量上限
    pub recipe_query_terms: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weekly_budget: BigDecimal::from(100),
            display_horizon_days: 3,
            shopping_horizon_days: 7,
            dinners_per_week: 4,
            recipe_query_terms: 12,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            planner: PlannerConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> kitchen-sync.toml (可选) -> 环境变量 KITCHEN_SYNC__*
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("planner.weekly_budget", "100")?
            .set_default("planner.display_horizon_days", 3)?
            .set_default("planner.shopping_horizon_days", 7)?
            .set_default("planner.dinners_per_week", 4)?
            .set_default("planner.recipe_query_terms", 12)?
            .add_source(File::with_name("kitchen-sync").required(false))
            .add_source(
                Environment::with_prefix("KITCHEN_SYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_planner_settings() {
        let config = AppConfig::default();
        assert_eq!(config.planner.weekly_budget, BigDecimal::from(100));
        assert_eq!(config.planner.display_horizon_days, 3);
        assert_eq!(config.planner.shopping_horizon_days, 7);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
