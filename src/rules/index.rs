use super::canon::{canonicalize, clean_set, rule_key};
use super::types::{DisplayMode, RulesTable};
use crate::tools::header::normalize_rarity;
use std::collections::HashMap;

/// Canonicalized lookup index over one [`RulesTable`].
///
/// Built once per export run and passed by reference to the engine.
#[derive(Debug, Clone)]
pub struct RulesIndex {
    version: String,
    display: DisplayMode,
    by_key: HashMap<String, String>,
}

impl RulesIndex {
    pub fn new(table: &RulesTable) -> Self {
        let mut by_key = HashMap::new();
        for (key, denom) in &table.rules {
            let Some((set, rarity)) = key.rsplit_once('|') else {
                continue;
            };
            if canonicalize(set).is_empty() || canonicalize(rarity).is_empty() {
                continue;
            }
            // BTreeMap order: the first spelling of a canonical key wins.
            by_key
                .entry(rule_key(set, rarity))
                .or_insert_with(|| denom.trim().to_string());
        }
        Self {
            version: table.version.clone(),
            display: table.display,
            by_key,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Denominator for (set, rarity), trying the most specific key first:
    /// (cleaned set, normalized rarity), (cleaned set, raw rarity),
    /// (raw set, normalized rarity), (raw set, raw rarity).
    pub fn denominator(&self, set: &str, rarity: &str) -> Option<&str> {
        if set.trim().is_empty() || rarity.trim().is_empty() {
            return None;
        }
        let cleaned = clean_set(set, rarity);
        let normalized = normalize_rarity(rarity);
        let attempts = [
            (cleaned.as_str(), normalized.as_str()),
            (cleaned.as_str(), rarity),
            (set, normalized.as_str()),
            (set, rarity),
        ];
        attempts
            .iter()
            .filter(|(s, _)| !canonicalize(s).is_empty())
            .find_map(|(s, r)| self.by_key.get(&rule_key(s, r)))
            .map(String::as_str)
    }

    /// Serial cell for (set, rarity): `?/<denom>` or `/<denom>`, empty when
    /// either input is empty or no rule matches.
    pub fn serial_for(&self, set: &str, rarity: &str) -> String {
        self.denominator(set, rarity)
            .map(|denom| self.display.format(denom))
            .unwrap_or_default()
    }
}

impl From<&RulesTable> for RulesIndex {
    fn from(table: &RulesTable) -> Self {
        Self::new(table)
    }
}
