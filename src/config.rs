#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Enable the negation convention (`no-a = true` stores `a = false`)
    pub negation: bool,
    /// Prefix marking a key as the negation of its base key
    pub negation_prefix: String,
    /// Option that, when truthy, suppresses negation and `reverse`
    pub reverse_guard: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            negation: true,
            negation_prefix: "no-".to_string(),
            reverse_guard: "noreverse".to_string(),
        }
    }
}

impl Config {
    /// Base key negated by `key`, if `key` carries the prefix and something after it.
    /// An empty prefix never matches.
    pub fn negated_base<'k>(&self, key: &'k str) -> Option<&'k str> {
        if self.negation_prefix.is_empty() {
            return None;
        }
        key.strip_prefix(self.negation_prefix.as_str())
            .filter(|base| !base.is_empty())
    }
}
