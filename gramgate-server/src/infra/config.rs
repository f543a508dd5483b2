//! Environment-derived runtime settings.

use std::path::PathBuf;

use thiserror::Error;

/// Fixed artifact directory checked first; falls back to the working
/// directory when absent.
pub const DEFAULT_SESSIONS_DIR: &str = "/app/sessions";

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub sessions_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    MissingCredential(&'static str),
}

impl Config {
    /// Read account credentials and the session location from the
    /// environment. Raised before any listener is bound, so a missing
    /// credential means the process never accepts traffic.
    pub fn from_env(host: String, port: u16) -> Result<Self, ConfigError> {
        let username = require_env("INSTAGRAM_USERNAME")?;
        let password = require_env("INSTAGRAM_PASSWORD")?;

        Ok(Config {
            username,
            password,
            sessions_dir: resolve_sessions_dir(),
            host,
            port,
        })
    }
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(key)),
    }
}

fn resolve_sessions_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SESSIONS_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let fixed = PathBuf::from(DEFAULT_SESSIONS_DIR);
    if fixed.is_dir() {
        fixed
    } else {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, MutexGuard};

    // Tests mutate process-wide environment state; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarGuard {
        fn unset(key: &'static str) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: tests hold ENV_LOCK and restore prior state on drop.
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, previous }
        }

        fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: tests hold ENV_LOCK and restore prior state on drop.
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: we reinstate the environment variable to its prior state.
            unsafe {
                match &self.previous {
                    Some(prev) => std::env::set_var(self.key, prev),
                    None => std::env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    fn missing_username_is_a_fatal_configuration_error() {
        let _lock = env_lock();
        let _user = EnvVarGuard::unset("INSTAGRAM_USERNAME");
        let _pass = EnvVarGuard::set("INSTAGRAM_PASSWORD", "hunter2");

        match Config::from_env("0.0.0.0".to_string(), 5000) {
            Err(ConfigError::MissingCredential("INSTAGRAM_USERNAME")) => {}
            other => panic!("expected missing-credential error, got {other:?}"),
        }
    }

    #[test]
    fn blank_password_is_a_fatal_configuration_error() {
        let _lock = env_lock();
        let _user = EnvVarGuard::set("INSTAGRAM_USERNAME", "tester");
        let _pass = EnvVarGuard::set("INSTAGRAM_PASSWORD", "   ");

        assert!(Config::from_env("0.0.0.0".to_string(), 5000).is_err());
    }

    #[test]
    fn sessions_dir_override_wins() {
        let _lock = env_lock();
        let _user = EnvVarGuard::set("INSTAGRAM_USERNAME", "tester");
        let _pass = EnvVarGuard::set("INSTAGRAM_PASSWORD", "hunter2");
        let _dir = EnvVarGuard::set("SESSIONS_DIR", "/tmp/gramgate-sessions");

        let config =
            Config::from_env("0.0.0.0".to_string(), 5000).unwrap();
        assert_eq!(
            config.sessions_dir,
            PathBuf::from("/tmp/gramgate-sessions")
        );
    }

    #[test]
    fn sessions_dir_falls_back_to_the_working_directory() {
        let _lock = env_lock();
        let _user = EnvVarGuard::set("INSTAGRAM_USERNAME", "tester");
        let _pass = EnvVarGuard::set("INSTAGRAM_PASSWORD", "hunter2");
        let _dir = EnvVarGuard::unset("SESSIONS_DIR");

        let config =
            Config::from_env("0.0.0.0".to_string(), 5000).unwrap();
        // The fixed directory only exists in deployment images.
        if !PathBuf::from(DEFAULT_SESSIONS_DIR).is_dir() {
            assert_eq!(config.sessions_dir, PathBuf::from("."));
        }
    }
}
