// ==========================================
// 配置加载集成测试
// ==========================================
// 测试目标: TOML 配置覆盖默认值，注入的映射表参与导出
// ==========================================


use std::fs;
use tempfile::TempDir;
use test_helpers::{load_schema, request, write_csv, StaticDictionarySource};
use uigf_export::config::{ConfigError, ExportConfig};
use uigf_export::domain::Game;
use uigf_export::importer::UigfExporter;

#[test]
fn test_default_config() {
    let config = ExportConfig::load_or_default(None).unwrap();

    assert_eq!(config.timezone, 8);
    assert_eq!(config.dict_locale, "chs");
    assert_eq!(config.locales.uigf_lang("zh").unwrap(), "zh-cn");
    assert_eq!(config.locales.uigf_lang("en").unwrap(), "en-us");
    assert_eq!(config.sheet_categories.genshin.code_for("角色活动祈愿"), Some("301"));
}

#[test]
fn test_config_file_overrides() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("uigf-export.toml");
    fs::write(
        &config_path,
        r#"
timezone = -5
dict_locale = "en"

[sheet_categories.genshin]
fallback_code = "500"

[sheet_categories.genshin.entries]
"Character Event" = "301"
"Standard" = "200"
"#,
    )
    .unwrap();

    let config = ExportConfig::load_or_default(Some(&config_path)).unwrap();

    assert_eq!(config.timezone, -5);
    assert_eq!(config.dict_locale, "en");
    assert_eq!(config.sheet_categories.genshin.code_for("Standard"), Some("200"));
    assert_eq!(config.sheet_categories.genshin.code_for("常驻祈愿"), None);
    // 未配置的游戏保持默认映射
    assert_eq!(config.sheet_categories.starrail.code_for("常驻跃迁"), Some("200"));
}

#[test]
fn test_unsupported_dict_locale_rejected() {
    let result = ExportConfig::from_toml_str(r#"dict_locale = "xx""#);
    assert!(matches!(result, Err(ConfigError::UnsupportedDictLocale(code)) if code == "xx"));
}

#[test]
fn test_unreadable_config_file() {
    let dir = TempDir::new().unwrap();
    let result = ExportConfig::load(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_injected_sheet_table_drives_export() {
    let dir = TempDir::new().unwrap();
    let mut config = ExportConfig::from_toml_str(
        r#"
[sheet_categories.genshin.entries]
"Character Event" = "301"
"#,
    )
    .unwrap();
    config.cache_dir = Some(dir.path().join("cache"));
    config.output_dir = dir.path().join("out");

    let path = write_csv(
        dir.path(),
        "Character Event",
        &["Furina,Character,5,1,2024-01-01 10:00:00"],
    );
    let source = StaticDictionarySource::ok(r#"{"Furina": 10000089}"#);
    let exporter = UigfExporter::new(&config, source);
    let outcome = exporter
        .convert(&request(path, Game::Genshin), &load_schema())
        .unwrap();

    assert_eq!(outcome.document.hk4e[0].list[0].uigf_gacha_type, "301");
    assert!(outcome.report.unknown_sheets.is_empty());
}
