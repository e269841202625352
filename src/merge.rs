use serde_json::{Map, Value};

use crate::error::Error;
use crate::key::Key;

/// One write request against an option mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A single key and its value
    Entry(Key, Value),
    /// Every key of the mapping, in insertion order
    Mapping(Map<String, Value>),
    /// Every key of every mapping, in order
    Mappings(Vec<Map<String, Value>>),
}

impl Update {
    /// Flatten into the `(key, value)` writes this update stands for.
    pub(crate) fn into_entries(self) -> Vec<(Key, Value)> {
        match self {
            Update::Entry(key, value) => vec![(key, value)],
            Update::Mapping(map) => map.into_iter().map(|(k, v)| (Key::Path(k), v)).collect(),
            Update::Mappings(maps) => maps
                .into_iter()
                .flat_map(|map| map.into_iter().map(|(k, v)| (Key::Path(k), v)))
                .collect(),
        }
    }
}

/// Conversion into an [`Update`], fallible for untyped values.
pub trait IntoUpdate {
    fn into_update(self) -> Result<Update, Error>;
}

impl IntoUpdate for Update {
    fn into_update(self) -> Result<Update, Error> {
        Ok(self)
    }
}

impl IntoUpdate for Map<String, Value> {
    fn into_update(self) -> Result<Update, Error> {
        Ok(Update::Mapping(self))
    }
}

impl IntoUpdate for Vec<Map<String, Value>> {
    fn into_update(self) -> Result<Update, Error> {
        Ok(Update::Mappings(self))
    }
}

impl<K: Into<Key>> IntoUpdate for (K, Value) {
    fn into_update(self) -> Result<Update, Error> {
        Ok(Update::Entry(self.0.into(), self.1))
    }
}

/// Objects become a mapping update; arrays (nested arrays are flattened) must
/// hold only objects. Anything else is rejected.
impl IntoUpdate for Value {
    fn into_update(self) -> Result<Update, Error> {
        match self {
            Value::Object(map) => Ok(Update::Mapping(map)),
            Value::Array(items) => {
                let mut maps = Vec::with_capacity(items.len());
                collect_mappings(items, &mut maps)?;
                if maps.is_empty() {
                    return Err(Error::InvalidOption);
                }
                Ok(Update::Mappings(maps))
            }
            _ => Err(Error::InvalidOption),
        }
    }
}

fn collect_mappings(items: Vec<Value>, out: &mut Vec<Map<String, Value>>) -> Result<(), Error> {
    for item in items {
        match item {
            Value::Object(map) => out.push(map),
            Value::Array(nested) => collect_mappings(nested, out)?,
            _ => return Err(Error::InvalidOption),
        }
    }
    Ok(())
}

/// Recursively merge `source` into `target`.
///
/// Mappings merge key by key; any other pairing replaces the target value.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
