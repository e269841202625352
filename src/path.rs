//! Dotted-path access into nested `serde_json` mappings.
//!
//! Reads walk mappings (and arrays, for numeric segments) and stop at the first
//! missing segment. Writes create missing intermediate mappings, reuse existing
//! ones, and refuse to descend through any other value.

use serde_json::{Map, Value};

use crate::error::Error;

pub(crate) fn get<'a>(root: &'a Map<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(*first)?;
    for segment in rest {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

pub(crate) fn get_mut<'a>(
    root: &'a mut Map<String, Value>,
    segments: &[&str],
) -> Option<&'a mut Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get_mut(*first)?;
    for segment in rest {
        current = current.as_object_mut()?.get_mut(*segment)?;
    }
    Some(current)
}

pub(crate) fn has(root: &Map<String, Value>, segments: &[&str]) -> bool {
    get(root, segments).is_some()
}

/// Mapping that holds the final segment, creating intermediates as needed.
pub(crate) fn parent_mut<'a>(
    root: &'a mut Map<String, Value>,
    segments: &[&str],
) -> Result<&'a mut Map<String, Value>, Error> {
    let Some((_, parents)) = segments.split_last() else {
        return Err(Error::EmptyKey);
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(*segment)
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            _ => {
                return Err(Error::NotAMapping {
                    path: segments[..=depth].join("."),
                })
            }
        };
    }
    Ok(current)
}

/// Store `value` at the path, returning whatever it replaced.
pub(crate) fn set(
    root: &mut Map<String, Value>,
    segments: &[&str],
    value: Value,
) -> Result<Option<Value>, Error> {
    let parent = parent_mut(root, segments)?;
    let last = segments[segments.len() - 1];
    Ok(parent.insert(last.to_string(), value))
}

pub(crate) fn remove(root: &mut Map<String, Value>, segments: &[&str]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    let parent = if parents.is_empty() {
        root
    } else {
        get_mut(root, parents)?.as_object_mut()?
    };
    parent.shift_remove(*last)
}
