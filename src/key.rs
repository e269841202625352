use std::fmt;

/// Address of an option: a dotted path or an explicit list of segments.
///
/// `Key::from(["a", "b"])` and `Key::from("a.b")` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Path(String),
    Segments(Vec<String>),
}

impl Key {
    /// Split the key into path segments.
    ///
    /// A path without a `.` yields a single segment without splitting. Segments
    /// of a `Segments` key are themselves split on `.`, so both forms agree.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Key::Path(path) => split_path(path),
            Key::Segments(parts) => parts.iter().flat_map(|part| split_path(part)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Key::Path(path) => path.is_empty(),
            Key::Segments(parts) => parts.iter().all(|part| part.is_empty()),
        }
    }

    /// Dotted form of the key, as reported in change notifications and flags.
    pub fn to_path(&self) -> String {
        match self {
            Key::Path(path) => path.clone(),
            Key::Segments(parts) => parts.join("."),
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    match memchr::memchr(b'.', path.as_bytes()) {
        None => vec![path],
        Some(_) => path.split('.').collect(),
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Path(path) => f.write_str(path),
            Key::Segments(parts) => f.write_str(&parts.join(".")),
        }
    }
}

impl From<&str> for Key {
    fn from(path: &str) -> Self {
        Key::Path(path.to_string())
    }
}

impl From<String> for Key {
    fn from(path: String) -> Self {
        Key::Path(path)
    }
}

impl From<&String> for Key {
    fn from(path: &String) -> Self {
        Key::Path(path.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<Vec<String>> for Key {
    fn from(parts: Vec<String>) -> Self {
        Key::Segments(parts)
    }
}

impl From<Vec<&str>> for Key {
    fn from(parts: Vec<&str>) -> Self {
        Key::Segments(parts.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Key {
    fn from(parts: &[&str]) -> Self {
        Key::Segments(parts.iter().map(|part| part.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Key {
    fn from(parts: [&str; N]) -> Self {
        Key::Segments(parts.iter().map(|part| part.to_string()).collect())
    }
}
