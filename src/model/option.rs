//! Selectable option items shared by every catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier or value of a catalog option.
///
/// Catalog sources mix numeric and textual keys, so both are accepted.
/// Serialized untagged: `3` and `"PAINT"` are both valid keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
    /// Numeric key
    Number(u32),
    /// Textual key
    Text(String),
}

impl From<u32> for OptionKey {
    fn from(value: u32) -> Self {
        OptionKey::Number(value)
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Text(value.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(value: String) -> Self {
        OptionKey::Text(value)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Number(n) => write!(f, "{}", n),
            OptionKey::Text(s) => f.write_str(s),
        }
    }
}

/// A single selectable entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    /// Unique identifier within its catalog
    pub id: OptionKey,
    /// Display label, also the target of search filtering
    pub label: String,
    /// Value stored on annotations (e.g. the numeric severity score)
    pub value: OptionKey,
}

impl CatalogOption {
    /// Create an option with explicit id, label and value.
    pub fn new(id: impl Into<OptionKey>, label: &str, value: impl Into<OptionKey>) -> Self {
        Self {
            id: id.into(),
            label: label.to_string(),
            value: value.into(),
        }
    }

    /// Create a numbered option whose value equals its id.
    pub fn numbered(id: u32, label: &str) -> Self {
        Self::new(id, label, id)
    }

    /// Check whether the label contains `needle`, which must already be lowercase.
    pub(crate) fn label_matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_key_untagged_json() {
        let number: OptionKey = serde_json::from_str("7").unwrap();
        assert_eq!(number, OptionKey::Number(7));

        let text: OptionKey = serde_json::from_str("\"PAINT\"").unwrap();
        assert_eq!(text, OptionKey::from("PAINT"));

        assert_eq!(serde_json::to_string(&OptionKey::Number(3)).unwrap(), "3");
    }

    #[test]
    fn test_option_key_display() {
        assert_eq!(OptionKey::Number(12).to_string(), "12");
        assert_eq!(OptionKey::from("hood").to_string(), "hood");
    }

    #[test]
    fn test_numbered_option_value_matches_id() {
        let option = CatalogOption::numbered(4, "Severe");
        assert_eq!(option.id, option.value);
        assert_eq!(option.label, "Severe");
    }
}
