//! 配置功能测试

use pokedex::infrastructure::config::{parse_config, Config};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.theme, "temp");
    assert!(config.enable_emoji);
    assert!(config.user_agent.starts_with("pokedex/"));
}

#[test]
fn test_cache_defaults() {
    let config = Config::default();

    assert_eq!(config.cache.json_capacity, 512);
    assert_eq!(config.cache.detail_capacity, 256);
    assert_eq!(config.cache.image_capacity, 256);
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
base_url = "http://localhost:9000/api/v2"
user_agent = "pokedex-dev"
timeout_secs = 30
theme = "gameboy"
enable_emoji = false

[cache]
json_capacity = 64
detail_capacity = 32
image_capacity = 16

[logging]
enable = true
path = "/tmp/pokedex.log"
level = "DEBUG"
"#;

    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.api_base(), "http://localhost:9000/api/v2");
    assert_eq!(config.user_agent, "pokedex-dev");
    assert_eq!(config.timeout().as_secs(), 30);
    assert_eq!(config.theme, "gameboy");
    assert!(!config.enable_emoji);
    assert_eq!(config.cache.json_capacity, 64);
    assert_eq!(config.cache.detail_capacity, 32);
    assert_eq!(config.cache.image_capacity, 16);
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/pokedex.log"));
    assert_eq!(config.logging.level, "DEBUG");
}

#[test]
fn test_sample_config_round_trips() {
    let sample = toml::to_string_pretty(&Config::default()).unwrap();
    assert!(sample.contains("base_url"));
    assert!(sample.contains("[cache]"));
    assert!(sample.contains("[logging]"));

    let parsed = parse_config(&sample).unwrap();
    assert_eq!(parsed.timeout_secs, 15);
    assert_eq!(parsed.cache.detail_capacity, 256);
}

#[test]
fn test_zero_timeout_is_clamped() {
    let config = parse_config("timeout_secs = 0").unwrap();
    assert_eq!(config.timeout().as_secs(), 1);
}
