use std::collections::HashMap;

use super::settings::SettingsStore;

pub type ToggleHandler = Box<dyn FnMut(&str, &mut dyn SettingsStore)>;

/// Flip the boolean under `key` and persist.
pub fn flip_flag(key: &str, store: &mut dyn SettingsStore) {
    let on = !store.record().flag(key);
    store.record_mut().set_flag(key, on);
    store.save();
}

/// Dispatch table from settings key to toggle handler.
///
/// Keys without a registered handler go to the fallback, which flips the
/// flag unless replaced.
pub struct ToggleTable {
    handlers: HashMap<String, ToggleHandler>,
    fallback: ToggleHandler,
}

impl Default for ToggleTable {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Box::new(flip_flag),
        }
    }
}

impl ToggleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `key`, returning the one it replaces.
    pub fn register(&mut self, key: &str, handler: ToggleHandler) -> Option<ToggleHandler> {
        self.handlers.insert(key.to_string(), handler)
    }

    /// Replace the fallback, returning the previous one.
    pub fn set_fallback(&mut self, handler: ToggleHandler) -> ToggleHandler {
        std::mem::replace(&mut self.fallback, handler)
    }

    pub fn dispatch(&mut self, key: &str, store: &mut dyn SettingsStore) {
        match self.handlers.get_mut(key) {
            Some(handler) => handler(key, store),
            None => (self.fallback)(key, store),
        }
    }
}
