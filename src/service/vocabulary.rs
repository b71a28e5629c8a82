use crate::models::InventoryItem;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 把名称拆成小写关键词: "olive oil" 先折叠为 "olive"，再按非字母数字切分
pub fn keywords(name: &str) -> Vec<String> {
    name.to_lowercase()
        .replace("olive oil", "olive")
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// 食材词表 - 所有在库条目名称的关键词 (保序去重)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryVocabulary {
    words: IndexSet<String>,
}

impl PantryVocabulary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let words = items
            .iter()
            .filter(|i| i.is_active())
            .flat_map(|i| keywords(&i.name))
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// 发给外部菜谱服务的前 n 个关键词
    pub fn query_terms(&self, limit: usize) -> Vec<String> {
        self.words.iter().take(limit).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PantryVocabulary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
