use crate::models::{PairUnlock, RecipeMatch, SingleUnlock};
use crate::service::vocabulary::PantryVocabulary;
use indexmap::IndexMap;

/// 单项/组合解锁列表的保留条数
pub const UNLOCK_LIMIT: usize = 8;

/// 只差一种食材的菜谱，按食材计数
///
/// 结果按解锁数降序；计数相同时保持首次出现的顺序 (稳定排序)。
pub fn single_unlocks(recipes: &[RecipeMatch], pantry: &PantryVocabulary) -> Vec<SingleUnlock> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for recipe in recipes {
        let missing = recipe.missing_lowercase();
        let [ingredient] = missing.as_slice() else {
            continue;
        };
        if pantry.contains(ingredient) {
            continue;
        }
        *counts.entry(ingredient.clone()).or_insert(0) += 1;
    }

    let mut unlocks: Vec<SingleUnlock> = counts
        .into_iter()
        .map(|(ingredient, unlocks)| SingleUnlock { ingredient, unlocks })
        .collect();
    unlocks.sort_by(|a, b| b.unlocks.cmp(&a.unlocks));
    unlocks.truncate(UNLOCK_LIMIT);

    tracing::debug!("Single unlocks: {} candidates from {} recipes", unlocks.len(), recipes.len());
    unlocks
}

/// 只差两种食材的菜谱，按字典序组合计数 ((a,b) 与 (b,a) 合并)
pub fn pair_unlocks(recipes: &[RecipeMatch], pantry: &PantryVocabulary) -> Vec<PairUnlock> {
    let mut counts: IndexMap<[String; 2], usize> = IndexMap::new();

    for recipe in recipes {
        let mut missing = recipe.missing_lowercase();
        if missing.len() != 2 {
            continue;
        }
        missing.sort();
        let pair = [missing[0].clone(), missing[1].clone()];
        if pantry.contains(&pair[0]) && pantry.contains(&pair[1]) {
            continue;
        }
        *counts.entry(pair).or_insert(0) += 1;
    }

    let mut unlocks: Vec<PairUnlock> = counts
        .into_iter()
        .map(|(pair, unlocks)| PairUnlock { pair, unlocks })
        .collect();
    unlocks.sort_by(|a, b| b.unlocks.cmp(&a.unlocks));
    unlocks.truncate(UNLOCK_LIMIT);

    tracing::debug!("Pair unlocks: {} candidates from {} recipes", unlocks.len(), recipes.len());
    unlocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, missing: &[&str]) -> RecipeMatch {
        RecipeMatch::new(title, Vec::<String>::new(), missing.iter().copied())
    }

    #[test]
    fn test_single_unlocks_counts_one_missing_only() {
        let recipes = vec![
            recipe("R1", &["cumin"]),
            recipe("R2", &["cumin"]),
            recipe("R3", &["cumin", "salt"]),
        ];
        let unlocks = single_unlocks(&recipes, &PantryVocabulary::default());
        assert_eq!(
            unlocks,
            vec![SingleUnlock {
                ingredient: "cumin".to_string(),
                unlocks: 2
            }]
        );
    }

    #[test]
    fn test_single_unlocks_lowercases_and_skips_pantry_words() {
        let recipes = vec![
            recipe("R1", &["Cumin"]),
            recipe("R2", &["cumin"]),
            recipe("R3", &["garlic"]),
        ];
        let pantry: PantryVocabulary = ["garlic"].into_iter().collect();
        let unlocks = single_unlocks(&recipes, &pantry);
        assert_eq!(unlocks.len(), 1);
        assert_eq!(unlocks[0].ingredient, "cumin");
        assert_eq!(unlocks[0].unlocks, 2);
    }

    #[test]
    fn test_single_unlocks_ties_keep_first_seen_order_and_truncate() {
        let mut recipes: Vec<RecipeMatch> = (0..10)
            .map(|i| {
                let spice = format!("spice{i}");
                recipe(&format!("R{i}"), &[spice.as_str()])
            })
            .collect();
        recipes.push(recipe("extra", &["spice7"]));

        let unlocks = single_unlocks(&recipes, &PantryVocabulary::default());
        assert_eq!(unlocks.len(), UNLOCK_LIMIT);
        assert_eq!(unlocks[0].ingredient, "spice7");
        assert_eq!(unlocks[0].unlocks, 2);
        let rest: Vec<_> = unlocks[1..].iter().map(|u| u.ingredient.as_str()).collect();
        assert_eq!(
            rest,
            vec!["spice0", "spice1", "spice2", "spice3", "spice4", "spice5", "spice6"]
        );
    }

    #[test]
    fn test_pair_unlocks_merge_orderings() {
        let recipes = vec![recipe("R1", &["a", "b"]), recipe("R2", &["b", "a"]), recipe("R3", &["c"])];
        let unlocks = pair_unlocks(&recipes, &PantryVocabulary::default());
        assert_eq!(
            unlocks,
            vec![PairUnlock {
                pair: ["a".to_string(), "b".to_string()],
                unlocks: 2
            }]
        );
    }

    #[test]
    fn test_pair_unlocks_ties_keep_first_seen_order_and_truncate() {
        let mut recipes: Vec<RecipeMatch> = (0..10)
            .map(|i| {
                let herb = format!("herb{i}");
                recipe(&format!("R{i}"), &[herb.as_str(), "zest"])
            })
            .collect();
        recipes.push(recipe("extra", &["Zest", "herb7"]));

        let unlocks = pair_unlocks(&recipes, &PantryVocabulary::default());
        assert_eq!(unlocks.len(), UNLOCK_LIMIT);
        assert_eq!(unlocks[0].pair, ["herb7".to_string(), "zest".to_string()]);
        assert_eq!(unlocks[0].unlocks, 2);
        let rest: Vec<_> = unlocks[1..].iter().map(|u| u.pair[0].as_str()).collect();
        assert_eq!(
            rest,
            vec!["herb0", "herb1", "herb2", "herb3", "herb4", "herb5", "herb6"]
        );
        assert!(unlocks[1..].iter().all(|u| u.unlocks == 1 && u.pair[1] == "zest"));
    }

    #[test]
    fn test_pair_unlocks_skip_pairs_fully_in_pantry() {
        let recipes = vec![recipe("R1", &["lime", "basil"]), recipe("R2", &["lime", "mint"])];
        let pantry: PantryVocabulary = ["lime", "basil"].into_iter().collect();
        let unlocks = pair_unlocks(&recipes, &pantry);
        assert_eq!(unlocks.len(), 1);
        assert_eq!(unlocks[0].pair, ["lime".to_string(), "mint".to_string()]);
    }

    #[test]
    fn test_empty_inputs_give_empty_unlocks() {
        let pantry = PantryVocabulary::default();
        assert!(single_unlocks(&[], &pantry).is_empty());
        assert!(pair_unlocks(&[], &pantry).is_empty());
        assert!(single_unlocks(&[recipe("no gaps", &[])], &pantry).is_empty());
    }
}
