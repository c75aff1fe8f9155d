//! Test utilities for tests that touch real process environment variables.
//!
//! Most tests inject a `MockEnv`; the few that exercise `SystemEnv` must
//! hold [`ENV_LOCK`] so they never observe each other's variables.

use std::env;
use std::sync::Mutex;

/// Shared lock to serialize tests that read or write process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that restores an environment variable to its original value on drop.
///
/// # Example
///
/// ```ignore
/// let _guard = ENV_LOCK.lock().unwrap();
/// let _env = EnvVarGuard::set("OPENAI_API_KEY", "sk-test");
/// // ... test code that reads OPENAI_API_KEY ...
/// // Original value restored when _env is dropped
/// ```
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Remove an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn unset(key: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        if let Some(ref value) = self.previous {
            unsafe {
                env::set_var(&self.key, value);
            }
        } else {
            unsafe {
                env::remove_var(&self.key);
            }
        }
    }
}
