//! Shared test utilities for serialising environment mutation.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serialises tests that mutate process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Guard that holds the env mutex and cleans up variables on drop.
pub struct EnvGuard {
    keys: Vec<String>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets several environment variables while holding a global mutex.
    pub fn set_vars(pairs: &[(&str, &str)]) -> Self {
        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in pairs {
            unsafe { env::set_var(key, value) };
        }
        Self {
            keys: pairs.iter().map(|(key, _)| (*key).to_owned()).collect(),
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            unsafe { env::remove_var(key) };
        }
    }
}
