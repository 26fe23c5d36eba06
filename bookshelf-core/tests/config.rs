use bookshelf_core::config::{BookshelfConfig, ConfigError, PROFILE_ENV};
use serial_test::serial;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn test_missing_key_is_not_found() {
    let config = BookshelfConfig::empty();
    assert!(matches!(
        config.get::<String>("store.kind"),
        Err(ConfigError::NotFound(key)) if key == "store.kind"
    ));
}

#[test]
fn test_values_parse_into_requested_type() {
    let mut config = BookshelfConfig::empty();
    config.set("server.port", " 9090 ");
    config.set("database.connections", "3");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 9090);
    assert_eq!(config.get::<u32>("database.connections").unwrap(), 3);
    assert_eq!(config.get::<String>("server.port").unwrap(), "9090");
}

#[test]
fn test_get_or_only_defaults_absent_keys() {
    let mut config = BookshelfConfig::empty();
    assert_eq!(config.get_or("server.port", 8080u16).unwrap(), 8080);

    config.set("server.port", "eighty");
    let err = config.get_or("server.port", 8080u16).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_out_of_range_port_is_invalid() {
    let mut config = BookshelfConfig::empty();
    config.set("server.port", "70000");
    assert!(matches!(
        config.get::<u16>("server.port"),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_yaml_document() {
    let yaml = "server:\n  host: \"127.0.0.1\"\n  port: 9000\ndatabase:\n  url: \"sqlite::memory:\"\n";
    let config = BookshelfConfig::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(config.get::<String>("server.host").unwrap(), "127.0.0.1");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 9000);
    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite::memory:");
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_malformed_yaml_is_load_error() {
    let result = BookshelfConfig::from_yaml_str("server: [unclosed", "test");
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial]
fn test_profile_file_overrides_base() {
    std::env::remove_var(PROFILE_ENV);
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "application.yaml", "server:\n  port: 8080\nstore:\n  kind: sqlite\n");
    write(&dir, "application-prod.yaml", "server:\n  port: 80\n");

    let config = BookshelfConfig::load_from_dir(dir.path(), "prod").unwrap();
    assert_eq!(config.profile(), "prod");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 80);
    assert_eq!(config.get::<String>("store.kind").unwrap(), "sqlite");
}

#[test]
#[serial]
fn test_missing_files_yield_empty_config() {
    std::env::remove_var(PROFILE_ENV);
    let dir = tempfile::tempdir().unwrap();
    let config = BookshelfConfig::load_from_dir(dir.path(), "dev").unwrap();
    assert!(matches!(
        config.get::<String>("store.kind"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
#[serial]
fn test_profile_env_var_wins_over_argument() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "application-staging.yaml", "store:\n  kind: memory\n");

    std::env::set_var(PROFILE_ENV, "staging");
    let config = BookshelfConfig::load_from_dir(dir.path(), "dev");
    std::env::remove_var(PROFILE_ENV);

    let config = config.unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("store.kind").unwrap(), "memory");
}

#[test]
#[serial]
fn test_environment_overrides_yaml() {
    std::env::remove_var(PROFILE_ENV);
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "application.yaml", "bookshelftest:\n  marker: yaml\n");

    std::env::set_var("BOOKSHELFTEST_MARKER", "env");
    let config = BookshelfConfig::load_from_dir(dir.path(), "dev");
    std::env::remove_var("BOOKSHELFTEST_MARKER");

    assert_eq!(config.unwrap().get::<String>("bookshelftest.marker").unwrap(), "env");
}

#[test]
#[serial]
fn test_dotenv_file_feeds_environment() {
    std::env::remove_var(PROFILE_ENV);
    std::env::remove_var("BOOKSHELFDOTENV_KEY");
    let dir = tempfile::tempdir().unwrap();
    write(&dir, ".env", "BOOKSHELFDOTENV_KEY=from-dotenv\n");

    let config = BookshelfConfig::load_from_dir(dir.path(), "dev");
    std::env::remove_var("BOOKSHELFDOTENV_KEY");

    assert_eq!(
        config.unwrap().get::<String>("bookshelfdotenv.key").unwrap(),
        "from-dotenv"
    );
}
