use serde_json::Value;

use crate::error::Error;
use crate::key::Key;
use crate::merge::IntoUpdate;
use crate::OptionStore;

/// Capability for types that own an [`OptionStore`].
///
/// Implement the two accessors and the rest forwards to the store.
pub trait HasOptions {
    fn options(&self) -> &OptionStore;

    fn options_mut(&mut self) -> &mut OptionStore;

    fn option(&self, key: impl Into<Key>) -> Option<&Value> {
        self.options().option(key)
    }

    fn set_option(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.options_mut().set_option(key, value)?;
        Ok(self)
    }

    fn merge_options(&mut self, update: impl IntoUpdate) -> Result<&mut Self, Error> {
        self.options_mut().merge_options(update)?;
        Ok(self)
    }

    fn enable(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.options_mut().enable(key)?;
        Ok(self)
    }

    fn disable(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.options_mut().disable(key)?;
        Ok(self)
    }

    fn enabled(&self, key: impl Into<Key>) -> bool {
        self.options().enabled(key)
    }

    fn disabled(&self, key: impl Into<Key>) -> bool {
        self.options().disabled(key)
    }

    fn has_option(&self, key: impl Into<Key>) -> bool {
        self.options().has_option(key)
    }

    fn flags(&self) -> Vec<String> {
        self.options().flags()
    }
}
