//! Command-line flag rendering.
//!
//! `true` renders as `--key`, `false` as `--no-key`, anything else as
//! `--key=value`.

use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag<'a> {
    On(&'a str),
    Off(&'a str),
    Value(&'a str, String),
}

impl<'a> Flag<'a> {
    pub fn new(key: &'a str, value: &Value) -> Self {
        match value {
            Value::Bool(true) => Flag::On(key),
            Value::Bool(false) => Flag::Off(key),
            other => Flag::Value(key, coerce(other)),
        }
    }
}

impl fmt::Display for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::On(key) => write!(f, "--{}", key),
            Flag::Off(key) => write!(f, "--no-{}", key),
            Flag::Value(key, value) => write!(f, "--{}={}", key, value),
        }
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
