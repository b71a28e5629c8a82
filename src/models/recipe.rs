use serde::{Deserialize, Serialize};

/// 外部菜谱匹配服务返回的一条记录 (只读)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub title: String,
    #[serde(default)]
    pub used_ingredient_names: Vec<String>,
    #[serde(default)]
    pub missing_ingredient_names: Vec<String>,
    #[serde(default)]
    pub used_ingredient_count: usize,
    #[serde(default)]
    pub missing_ingredient_count: usize,
}

impl RecipeMatch {
    pub fn new<U, M>(title: impl Into<String>, used: U, missing: M) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let used_ingredient_names: Vec<String> = used.into_iter().map(Into::into).collect();
        let missing_ingredient_names: Vec<String> = missing.into_iter().map(Into::into).collect();
        Self {
            title: title.into(),
            used_ingredient_count: used_ingredient_names.len(),
            missing_ingredient_count: missing_ingredient_names.len(),
            used_ingredient_names,
            missing_ingredient_names,
        }
    }

    /// 缺失食材名 (小写)
    pub fn missing_lowercase(&self) -> Vec<String> {
        self.missing_ingredient_names
            .iter()
            .map(|n| n.to_lowercase())
            .collect()
    }
}

/// 单个食材可解锁的菜谱数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUnlock {
    pub ingredient: String,
    pub unlocks: usize,
}

/// 食材组合 (字典序) 可解锁的菜谱数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairUnlock {
    pub pair: [String; 2],
    pub unlocks: usize,
}

impl PairUnlock {
    pub fn contains(&self, ingredient: &str) -> bool {
        self.pair.iter().any(|p| p == ingredient)
    }

    pub fn label(&self) -> String {
        self.pair.join("+")
    }
}

/// 一周晚餐计划
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub dinners: usize,
    pub recipes: Vec<RecipeMatch>,
}

impl MealPlan {
    /// 可分享的纯文本
    pub fn share_text(&self) -> String {
        let lines: Vec<String> = self
            .recipes
            .iter()
            .map(|r| format!("• {} (need {})", r.title, r.missing_ingredient_count))
            .collect();
        format!("Weekly plan ({} dinners):\n{}", self.dinners, lines.join("\n"))
    }
}
