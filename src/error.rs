use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Multi-key option write with something other than a mapping or a list of mappings
    #[error("expected option to be a string, object or array")]
    InvalidOption,
    /// Multi-key default write with something other than a mapping or a list of mappings
    #[error("expected default to be a string or object")]
    InvalidDefault,
    /// Write addressed by an empty key
    #[error("expected option key to be a non-empty string or array")]
    EmptyKey,
    /// Write that would have to descend through a value that is not a mapping
    #[error("cannot set a nested value: `{path}` is not an object")]
    NotAMapping { path: String },
}
