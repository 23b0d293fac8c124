use super::*;

#[test]
fn config_defaults_match_documented_values() {
    let config: Config = toml::from_str("").expect("empty config is valid");
    assert_eq!(config.port, None);
    assert_eq!(
        config.cache.default_ttl,
        std::time::Duration::from_secs(600)
    );
    assert_eq!(config.cache.search_ttl, std::time::Duration::from_secs(300));
    assert_eq!(
        config.cache.refresh_interval,
        std::time::Duration::from_secs(900)
    );
    assert_eq!(config.provider.base_url, "https://newsapi.org/v2");
    assert_eq!(config.provider.timeout, std::time::Duration::from_secs(5));
    assert_eq!(config.provider.language, "en");
}

#[test]
fn config_parses_humantime_durations() {
    let config: Config = toml::from_str(
        r#"
        port = 8080

        [cache]
        default-ttl = "2m"
        search-ttl = "30s"
        refresh-interval = "1h"

        [provider]
        base-url = "http://localhost:9000/v2"
        api-key = "secret"
        timeout = "2s"
        language = "de"
        "#,
    )
    .expect("config should parse");
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.cache.default_ttl, std::time::Duration::from_secs(120));
    assert_eq!(config.cache.search_ttl, std::time::Duration::from_secs(30));
    assert_eq!(
        config.cache.refresh_interval,
        std::time::Duration::from_secs(3600)
    );
    assert_eq!(config.provider.base_url, "http://localhost:9000/v2");
    assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
    assert_eq!(config.provider.timeout, std::time::Duration::from_secs(2));
    assert_eq!(config.provider.language, "de");
}

#[test]
fn entry_ttls_convert_to_cache_units() {
    let config = CacheConfig::default();
    assert_eq!(config.entry_ttl(), chrono::Duration::minutes(10));
    assert_eq!(config.search_entry_ttl(), chrono::Duration::minutes(5));
}

#[test]
fn configured_api_key_wins() {
    let config: Config = toml::from_str(
        r#"
        [provider]
        api-key = "from-config"
        "#,
    )
    .expect("config should parse");
    assert_eq!(
        config.provider.resolved_api_key().as_deref(),
        Some("from-config")
    );
}

#[test]
fn blank_api_key_counts_as_missing() {
    let config: Config = toml::from_str(
        r#"
        [provider]
        api-key = ""
        "#,
    )
    .expect("config should parse");
    assert_eq!(config.provider.resolved_api_key(), None);
}

#[test]
fn topics_parse_from_comma_lists() {
    assert_eq!(
        parse_topics(Some("tech, world ,,rust")),
        vec!["tech".to_string(), "world".to_string(), "rust".to_string()]
    );
    assert!(parse_topics(Some("")).is_empty());
    assert!(parse_topics(None).is_empty());
}

#[test]
fn cli_parses_overrides() {
    let cli =
        Cli::try_parse_from(["tidings", "--port", "8080", "--debug"])
            .expect("cli should parse");
    assert_eq!(cli.port, Some(8080));
    assert!(cli.debug);
    assert!(!cli.verbose);
}
