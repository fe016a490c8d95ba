use super::*;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes tests that touch the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers hold [`env_guard`] so no other test reads the environment.
unsafe fn clear_blazing_env() {
    unsafe {
        std::env::remove_var("BLAZING_API_URL");
        std::env::remove_var("BLAZING_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("BLAZING_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("BLAZING_DEBOUNCE_MS");
        std::env::remove_var("BLAZING_CACHE_STALE_SECS");
        std::env::remove_var("BLAZING_SESSION_FILE");
        std::env::remove_var("BLAZING_LOOKUP_FILE");
    }
}

#[test]
fn from_env_uses_defaults() {
    let _env = env_guard();
    unsafe { clear_blazing_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert_eq!(cfg.debounce, Duration::from_millis(500));
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_guard();
    unsafe {
        clear_blazing_env();
        std::env::set_var("BLAZING_API_URL", "https://api.example.test/ ");
        std::env::set_var("BLAZING_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("BLAZING_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("BLAZING_DEBOUNCE_MS", "250");
        std::env::set_var("BLAZING_CACHE_STALE_SECS", "0");
        std::env::set_var("BLAZING_SESSION_FILE", "/tmp/blazing-session.json");
        std::env::set_var("BLAZING_LOOKUP_FILE", "/tmp/lookup.json");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://api.example.test");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.debounce, Duration::from_millis(250));
    assert_eq!(cfg.cache_stale, Duration::ZERO);
    assert_eq!(cfg.session_path().unwrap(), PathBuf::from("/tmp/blazing-session.json"));
    assert_eq!(cfg.lookup_file, Some(PathBuf::from("/tmp/lookup.json")));

    unsafe { clear_blazing_env() };
}

#[test]
fn from_env_rejects_non_numeric_timeout() {
    let _env = env_guard();
    unsafe {
        clear_blazing_env();
        std::env::set_var("BLAZING_DEBOUNCE_MS", "soon");
    }

    let err = ClientConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("BLAZING_DEBOUNCE_MS"));
    assert!(err.contains("soon"));

    unsafe { clear_blazing_env() };
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url("http://host:8000///"), "http://host:8000");
    assert_eq!(normalize_base_url("  http://host  "), "http://host");
}
