//! Key/value configuration sources.
//!
//! # Responsibilities
//! - Abstract where string settings come from (process env, test maps)
//! - Keep the gateway core independent of `std::env`
//!
//! # Design Decisions
//! - Lookup only: providers never mutate
//! - Empty values are treated as absent

use std::collections::HashMap;

/// A source of string configuration values by key.
pub trait ConfigProvider: Send + Sync {
    /// Raw lookup. Implementations return `None` for unknown keys.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Lookup that treats empty or whitespace-only values as absent.
    fn get(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads values from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl ConfigProvider for EnvProvider {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for &P {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}
