use super::types::{DisplayMode, RulesTable};
use std::collections::BTreeMap;

/// Seed rules used when neither the remote source nor the cache is usable.
pub fn builtin_rules() -> RulesTable {
    let rules: BTreeMap<String, String> = [
        ("2024-25 SP Game Used Hockey|Gold", "149"),
        ("2024-25 SP Game Used Hockey|Blue", "99"),
        ("2024-25 SP Game Used Hockey|Green", "25"),
        ("2024-25 SP Game Used Hockey|Purple", "10"),
        ("2024-25 SP Game Used Hockey|Black", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    RulesTable {
        version: "fallback".to_string(),
        display: DisplayMode::UnknownNumerator,
        rules,
    }
}
