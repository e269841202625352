mod config;
mod error;
mod events;
mod flags;
mod host;
mod key;
mod merge;
mod path;
mod value;

use serde_json::{Map, Value};

pub use config::Config;
pub use error::Error;
pub use events::{Change, EventKind, ListenerId};
pub use flags::Flag;
pub use host::HasOptions;
pub use key::Key;
pub use merge::{deep_merge, IntoUpdate, Update};
pub use value::{truthy, Kind};

use crate::events::Emitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Merge,
    FillIn(Option<Kind>),
}

/// In-memory option store with a parallel mapping of defaults.
///
/// Reads fall back to the defaults when an option is absent. Every write
/// notifies the listeners registered for its mapping, in registration order,
/// before the write returns.
#[derive(Debug, Default)]
pub struct OptionStore {
    config: Config,
    options: Map<String, Value>,
    defaults: Map<String, Value>,
    emitter: Emitter,
}

impl OptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Seed the option mapping. No notifications are emitted.
    pub fn with_options(options: Map<String, Value>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn negation_prefix(&self) -> &str {
        &self.config.negation_prefix
    }

    pub fn set_negation_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.config.negation_prefix = prefix.into();
        self
    }

    /// The option mapping, without defaults applied.
    pub fn values(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    /// Read an option, falling back to its default when the option is absent.
    ///
    /// An option explicitly set to `null` is returned as `null`.
    pub fn option(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        let segments = key.segments();
        match path::get(&self.options, &segments) {
            Some(value) => Some(value),
            None => path::get(&self.defaults, &segments),
        }
    }

    /// Read a default, ignoring the option mapping.
    pub fn default_for(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        path::get(&self.defaults, &key.segments())
    }

    /// Store `value` at `key`. A mapping is deep-merged into a mapping already at `key`.
    pub fn set_option(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.write(EventKind::Option, key.into(), value.into(), Mode::Merge)?;
        Ok(self)
    }

    /// Apply every entry of `update`, one notification per key.
    pub fn merge_options(&mut self, update: impl IntoUpdate) -> Result<&mut Self, Error> {
        let entries = update.into_update()?.into_entries();
        self.apply(EventKind::Option, entries, Mode::Merge)?;
        Ok(self)
    }

    pub fn set_default(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.write(EventKind::Default, key.into(), value.into(), Mode::Merge)?;
        Ok(self)
    }

    pub fn merge_defaults(&mut self, update: impl IntoUpdate) -> Result<&mut Self, Error> {
        let update = update.into_update().map_err(|err| match err {
            Error::InvalidOption => Error::InvalidDefault,
            other => other,
        })?;
        self.apply(EventKind::Default, update.into_entries(), Mode::Merge)?;
        Ok(self)
    }

    /// Store `value` only if nothing (not even `null`) is stored at `key`.
    pub fn fill_in(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.write(EventKind::Option, key.into(), value.into(), Mode::FillIn(None))?;
        Ok(self)
    }

    /// Like [`fill_in`](Self::fill_in), but also replaces an existing value of another kind.
    pub fn fill_in_as(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
        kind: Kind,
    ) -> Result<&mut Self, Error> {
        self.write(
            EventKind::Option,
            key.into(),
            value.into(),
            Mode::FillIn(Some(kind)),
        )?;
        Ok(self)
    }

    pub fn fill_in_from(&mut self, update: impl IntoUpdate) -> Result<&mut Self, Error> {
        let entries = update.into_update()?.into_entries();
        self.apply(EventKind::Option, entries, Mode::FillIn(None))?;
        Ok(self)
    }

    /// The resolved option if it is set, non-null and (when given) of `kind`; otherwise `fallback`.
    pub fn either<'a>(
        &'a self,
        key: impl Into<Key>,
        fallback: &'a Value,
        kind: Option<Kind>,
    ) -> &'a Value {
        match self.option(key) {
            Some(value) if !value.is_null() && kind.map_or(true, |k| Kind::of(value) == k) => {
                value
            }
            _ => fallback,
        }
    }

    pub fn has_option(&self, key: impl Into<Key>) -> bool {
        path::has(&self.options, &key.into().segments())
    }

    pub fn has_default(&self, key: impl Into<Key>) -> bool {
        path::has(&self.defaults, &key.into().segments())
    }

    pub fn enable(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.set_option(key, true)
    }

    pub fn disable(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.set_option(key, false)
    }

    pub fn enabled(&self, key: impl Into<Key>) -> bool {
        self.option(key).is_some_and(truthy)
    }

    pub fn disabled(&self, key: impl Into<Key>) -> bool {
        !self.enabled(key)
    }

    pub fn is_true(&self, key: impl Into<Key>) -> bool {
        matches!(self.option(key), Some(Value::Bool(true)))
    }

    pub fn is_false(&self, key: impl Into<Key>) -> bool {
        matches!(self.option(key), Some(Value::Bool(false)))
    }

    pub fn is_boolean(&self, key: impl Into<Key>) -> bool {
        matches!(self.option(key), Some(Value::Bool(_)))
    }

    /// Whether `key` starts with the negation prefix and has something after it.
    pub fn is_negated(&self, key: impl Into<Key>) -> bool {
        self.config.negated_base(&key.into().to_path()).is_some()
    }

    /// Alias of [`is_negated`](Self::is_negated).
    pub fn is_reversed(&self, key: impl Into<Key>) -> bool {
        self.is_negated(key)
    }

    /// Flip `key` to the opposite of [`enabled`](Self::enabled), unless the reverse guard is set.
    pub fn reverse(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        let key = key.into();
        if self.is_guarded() {
            tracing::debug!(key = %key, guard = %self.config.reverse_guard, "reverse suppressed");
            return Ok(self);
        }
        let flipped = !self.enabled(&key);
        self.write(EventKind::Option, key, Value::Bool(flipped), Mode::Merge)?;
        Ok(self)
    }

    /// Flags for every option, in insertion order.
    pub fn flags(&self) -> Vec<String> {
        self.flags_for(self.options.keys())
    }

    /// Flags for `keys`, in the given order. Keys without a value are skipped.
    ///
    /// A negated key is left out when its base key is also listed, since the
    /// base key already carries the negated state.
    pub fn flags_for<I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let items: Vec<I::Item> = keys.into_iter().collect();
        let keys: Vec<&str> = items.iter().map(|key| key.as_ref()).collect();
        let negating = self.config.negation && !self.is_guarded();
        keys.iter()
            .filter(|key| {
                !negating
                    || self
                        .config
                        .negated_base(key)
                        .map_or(true, |base| !keys.contains(&base))
            })
            .filter_map(|&key| self.option(key).map(|value| Flag::new(key, value).to_string()))
            .collect()
    }

    /// Remove every option. Defaults are kept.
    pub fn clear(&mut self) -> &mut Self {
        self.options.clear();
        self
    }

    pub fn remove_option(&mut self, key: impl Into<Key>) -> Option<Value> {
        path::remove(&mut self.options, &key.into().segments())
    }

    pub fn clear_defaults(&mut self) -> &mut Self {
        self.defaults.clear();
        self
    }

    pub fn remove_default(&mut self, key: impl Into<Key>) -> Option<Value> {
        path::remove(&mut self.defaults, &key.into().segments())
    }

    /// Register a listener for writes to the option or default mapping.
    pub fn on<F>(&mut self, event: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Change<'_>) + 'static,
    {
        self.emitter.on(event, Box::new(listener))
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub fn listener_count(&self) -> usize {
        self.emitter.len()
    }

    fn is_guarded(&self) -> bool {
        self.enabled(self.config.reverse_guard.as_str())
    }

    fn mapping(&self, event: EventKind) -> &Map<String, Value> {
        match event {
            EventKind::Option => &self.options,
            EventKind::Default => &self.defaults,
        }
    }

    fn mapping_mut(&mut self, event: EventKind) -> &mut Map<String, Value> {
        match event {
            EventKind::Option => &mut self.options,
            EventKind::Default => &mut self.defaults,
        }
    }

    fn write(&mut self, event: EventKind, key: Key, value: Value, mode: Mode) -> Result<(), Error> {
        self.apply(event, vec![(key, value)], mode)
    }

    /// Apply every entry, then notify once per key written.
    ///
    /// Either all entries are stored or, on error, the mapping is left as it was
    /// and nothing is emitted.
    fn apply(&mut self, event: EventKind, entries: Vec<(Key, Value)>, mode: Mode) -> Result<(), Error> {
        let snapshot = self
            .may_write_twice(event, &entries)
            .then(|| self.mapping(event).clone());

        let mut written = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Err(err) = self.stage(event, &key, value, mode, &mut written) {
                if let Some(snapshot) = snapshot {
                    *self.mapping_mut(event) = snapshot;
                }
                tracing::debug!(key = %key, error = %err, "write rejected, store unchanged");
                return Err(err);
            }
        }

        for key in &written {
            self.notify(event, key);
        }
        Ok(())
    }

    /// Whether a failure could come after an earlier part of the same call was stored.
    ///
    /// A single plain write fails before it touches the mapping, so only
    /// multi-key writes and negated keys need a snapshot to roll back to.
    fn may_write_twice(&self, event: EventKind, entries: &[(Key, Value)]) -> bool {
        entries.len() > 1
            || (event == EventKind::Option
                && self.config.negation
                && entries.iter().any(|(key, value)| {
                    *value == Value::Bool(true) && self.config.negated_base(&key.to_path()).is_some()
                }))
    }

    fn stage(
        &mut self,
        event: EventKind,
        key: &Key,
        value: Value,
        mode: Mode,
        written: &mut Vec<Key>,
    ) -> Result<(), Error> {
        let segments = key.segments();
        if segments.is_empty() {
            return Err(Error::EmptyKey);
        }
        let negates = event == EventKind::Option && value == Value::Bool(true);

        if !store(self.mapping_mut(event), &segments, value, mode)? {
            tracing::trace!(key = %key, "fill-in skipped, value present");
            return Ok(());
        }
        tracing::trace!(key = %key, event = ?event, "value written");
        written.push(Key::Path(key.to_path()));

        if negates {
            self.negate(&key.to_path(), mode, written)?;
        }
        Ok(())
    }

    /// Store `false` on the base key of a negated key that was set to `true`.
    ///
    /// The base key is written in the same mode as the negated key, so a
    /// fill-in never overwrites an existing base value.
    fn negate(&mut self, path: &str, mode: Mode, written: &mut Vec<Key>) -> Result<(), Error> {
        if !self.config.negation {
            return Ok(());
        }
        let Some(base) = self.config.negated_base(path) else {
            return Ok(());
        };
        let base = Key::Path(base.to_string());
        if self.is_guarded() {
            tracing::debug!(key = %path, guard = %self.config.reverse_guard, "negation suppressed");
            return Ok(());
        }

        if store(&mut self.options, &base.segments(), Value::Bool(false), mode)? {
            tracing::debug!(key = %path, base = %base, "negated key written, disabling base key");
            written.push(base);
        } else {
            tracing::trace!(key = %path, base = %base, "base key present, fill-in left it");
        }
        Ok(())
    }

    fn notify(&mut self, event: EventKind, key: &Key) {
        let path = key.to_path();
        let segments = key.segments();
        let root = match event {
            EventKind::Option => &self.options,
            EventKind::Default => &self.defaults,
        };
        let change = Change {
            kind: event,
            key: &path,
            value: path::get(root, &segments),
        };
        self.emitter.emit(&change);
    }
}

/// Store `value` according to `mode`. Returns `false` when a fill-in found the slot taken.
fn store(
    root: &mut Map<String, Value>,
    segments: &[&str],
    value: Value,
    mode: Mode,
) -> Result<bool, Error> {
    match mode {
        Mode::Merge => assign(root, segments, value)?,
        Mode::FillIn(expected) => {
            if let Some(existing) = path::get(root, segments) {
                if expected.map_or(true, |kind| Kind::of(existing) == kind) {
                    return Ok(false);
                }
            }
            path::set(root, segments, value)?;
        }
    }
    Ok(true)
}

/// Write `value` at the path, deep-merging mappings into an existing mapping.
fn assign(root: &mut Map<String, Value>, segments: &[&str], value: Value) -> Result<(), Error> {
    if value.is_object() {
        if let Some(existing) = path::get_mut(root, segments).filter(|v| v.is_object()) {
            deep_merge(existing, value);
            return Ok(());
        }
    }
    path::set(root, segments, value)?;
    Ok(())
}
