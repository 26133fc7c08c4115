use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// How a known denominator is rendered in the Serial column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum DisplayMode {
    /// `?/<denom>`: the page never says which copy number is owned.
    #[default]
    UnknownNumerator,
    /// `/<denom>`
    DenomOnly,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownNumerator => "unknownNumerator",
            Self::DenomOnly => "denomOnly",
        }
    }

    /// Render a denominator as a serial cell.
    pub fn format(&self, denom: &str) -> String {
        match self {
            Self::UnknownNumerator => format!("?/{denom}"),
            Self::DenomOnly => format!("/{denom}"),
        }
    }
}

impl From<&Value> for DisplayMode {
    /// `"denomOnly"` (any case); every other value, string or not, is the default.
    fn from(value: &Value) -> Self {
        match value.as_str().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("denomOnly") => Self::DenomOnly,
            _ => Self::UnknownNumerator,
        }
    }
}

impl From<DisplayMode> for String {
    fn from(value: DisplayMode) -> Self {
        value.as_str().to_string()
    }
}

/// Serial-numbering rules: `"<set>|<rarity>"` → denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesTable {
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_display")]
    pub display: DisplayMode,
    #[serde(deserialize_with = "denominators")]
    pub rules: BTreeMap<String, String>,
}

/// Accept strings and numbers; anything else becomes empty.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(value_text(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_display<'de, D: Deserializer<'de>>(d: D) -> Result<DisplayMode, D::Error> {
    Ok(DisplayMode::from(&Value::deserialize(d)?))
}

fn denominators<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = BTreeMap::<String, Value>::deserialize(d)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value_text(value).map(|denom| (key, denom)))
        .filter(|(_, denom)| !denom.is_empty())
        .collect())
}

/// Where the table in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesOrigin {
    Remote,
    Cache,
    Builtin,
}

impl fmt::Display for RulesOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Cache => "cache",
            Self::Builtin => "built-in",
        })
    }
}

/// A resolved table and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedRules {
    pub origin: RulesOrigin,
    pub table: RulesTable,
}
