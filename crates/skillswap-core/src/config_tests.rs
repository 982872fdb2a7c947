//! Config module tests

use std::collections::HashMap;

use tempfile::TempDir;

use crate::config::Config;
use crate::domain::skills::ALL_CATEGORIES;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.backend.url.is_none());
    assert!(config.backend.anon_key.is_none());
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.backend.skills_table, "Skills");
    assert_eq!(config.backend.users_table, "users");
    assert_eq!(config.listing.default_category, ALL_CATEGORIES);
    assert_eq!(config.listing.default_level, "");
}

#[test]
fn test_credentials_prefer_prefixed_env() {
    let mut config = Config::default();
    config.backend.url = Some("https://file.supabase.co".to_string());

    let creds = config
        .backend
        .credentials_from(env(&[
            ("SKILLSWAP_SUPABASE_URL", "https://env.supabase.co/"),
            ("SUPABASE_URL", "https://other.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
    assert_eq!(creds.url, "https://env.supabase.co");
    assert_eq!(creds.anon_key, "anon");
}

#[test]
fn test_credentials_fall_back_to_file_url() {
    let mut config = Config::default();
    config.backend.url = Some("https://file.supabase.co".to_string());

    let creds = config
        .backend
        .credentials_from(env(&[("SKILLSWAP_SUPABASE_ANON_KEY", "anon")]))
        .unwrap();
    assert_eq!(creds.url, "https://file.supabase.co");
}

#[test]
fn test_credentials_missing_key_is_config_error() {
    let mut config = Config::default();
    config.backend.url = Some("https://file.supabase.co".to_string());

    let err = config.backend.credentials_from(env(&[])).unwrap_err();
    assert_eq!(err.code(), "E600");

    // Blank values count as unset
    let err = config
        .backend
        .credentials_from(env(&[("SUPABASE_ANON_KEY", "  ")]))
        .unwrap_err();
    assert_eq!(err.code(), "E600");
}

#[test]
fn test_stored_anon_key_is_rejected() {
    let mut config = Config::default();
    config.backend.anon_key = Some("leaked".to_string());
    assert!(config.validate().is_err());
    assert!(
        config
            .backend
            .credentials_from(env(&[("SUPABASE_ANON_KEY", "anon"), ("SUPABASE_URL", "https://x.co")]))
            .is_err()
    );
}

#[test]
fn test_get_set_round_trip() {
    let mut config = Config::default();

    config.set("backend.url", "https://abc.supabase.co/").unwrap();
    assert_eq!(config.get("backend.url").unwrap(), "https://abc.supabase.co");

    config.set("backend.timeout_secs", "5").unwrap();
    assert_eq!(config.get("backend.timeout_secs").unwrap(), "5");

    config.set("listing.default_category", "Music").unwrap();
    assert_eq!(config.get("listing.default_category").unwrap(), "Music");

    config.set("backend.skills_table", "skills_v2").unwrap();
    assert_eq!(config.backend.skills_table, "skills_v2");
}

#[test]
fn test_set_rejects_invalid_values() {
    let mut config = Config::default();
    assert!(config.set("backend.url", "ftp://nope").is_err());
    assert!(config.set("backend.timeout_secs", "0").is_err());
    assert!(config.set("backend.timeout_secs", "soon").is_err());
    assert!(config.set("backend.users_table", " ").is_err());
    assert!(config.set("backend.anon_key", "secret").is_err());
    assert!(config.set("no.such.key", "x").is_err());
}

#[test]
fn test_list_contains_every_key() {
    let keys: Vec<String> = Config::default()
        .list()
        .unwrap()
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(keys.len(), 7);
    assert!(keys.contains(&"backend.anon_key".to_string()));
    assert!(keys.contains(&"listing.default_level".to_string()));
}

#[test]
fn test_save_and_load_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set("backend.url", "https://abc.supabase.co").unwrap();
    config.set("listing.default_level", "Advanced").unwrap();
    config.save_to(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("anon_key"));

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.backend.url.as_deref(), Some("https://abc.supabase.co"));
    assert_eq!(loaded.listing.default_level, "Advanced");
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[backend]\nurl = \"https://abc.supabase.co\"\n").unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.backend.timeout_secs, 30);
    assert_eq!(loaded.listing.default_category, ALL_CATEGORIES);
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.backend.url.is_none());
}
