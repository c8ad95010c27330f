use dotquill::config::Config;
use dotquill::file::DocumentFormat;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.output_format, DocumentFormat::Json);
    assert_eq!(config.indent_size, 2);
    assert!(!config.create_backup);
    assert!(!config.compact_output);
}

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        output_format: DocumentFormat::Toml,
        indent_size: 4,
        create_backup: true,
        compact_output: true,
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "indent_size = \"wide\"\n").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(Config::load_from(&dir.path().join("absent.toml")), Config::default());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/dotquill/config.toml"));
    }
}

#[test]
fn test_config_save_writes_default_location() {
    let home = TempDir::new().unwrap();
    std::env::set_var("HOME", home.path());

    let config = Config {
        output_format: DocumentFormat::Yaml,
        ..Config::default()
    };
    config.save().unwrap();

    let path = home.path().join(".config/dotquill/config.toml");
    assert!(path.exists());
    assert_eq!(Config::load(), config);
}
