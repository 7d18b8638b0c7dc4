// ==========================================
// UIGF 导出工具 - 导出配置
// ==========================================
// 职责: 配置加载（TOML，可选）与默认值
// 说明: 每一项都有默认值，配置文件只需写需要覆写的项
// ==========================================

use crate::config::tables::{LocaleTable, SheetCategories};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置键默认值
pub mod defaults {
    pub const DICT_URL_TEMPLATE: &str = "https://api.uigf.org/dict/{game}/{lang}.json";
    pub const SCHEMA_URL: &str = concat!(
        "https://raw.githubusercontent.com/UIGF-org/UIGF-SchemaVerify/",
        "refs/heads/master/src/source/uigf-4.0-schema.json"
    );
    pub const TIMEZONE: i32 = 8;
    pub const DICT_LOCALE: &str = "chs";
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    pub const CACHE_SUBDIR: &str = "uigf-export";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("不支持的字典语言代码: {0}")]
    UnsupportedDictLocale(String),

    #[error("不支持的界面语言: {0}（可选: zh / en）")]
    UnknownInterfaceLang(String),
}

// ==========================================
// ExportConfig - 导出配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 字典下载地址模板（{game} / {lang} 占位）
    pub dict_url_template: String,

    /// UIGF Schema 下载地址
    pub schema_url: String,

    /// 字典缓存目录（None 时使用系统缓存目录）
    pub cache_dir: Option<PathBuf>,

    /// 导出文件目录
    pub output_dir: PathBuf,

    /// 导出时区（小时偏移）
    pub timezone: i32,

    /// 字典语言代码
    pub dict_locale: String,

    /// 网络请求超时（秒）
    pub http_timeout_secs: u64,

    /// 工作表 → 类别码
    pub sheet_categories: SheetCategories,

    /// 语言配置
    pub locales: LocaleTable,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dict_url_template: defaults::DICT_URL_TEMPLATE.to_string(),
            schema_url: defaults::SCHEMA_URL.to_string(),
            cache_dir: None,
            output_dir: PathBuf::from("."),
            timezone: defaults::TIMEZONE,
            dict_locale: defaults::DICT_LOCALE.to_string(),
            http_timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            sheet_categories: SheetCategories::default(),
            locales: LocaleTable::default(),
        }
    }
}

impl ExportConfig {
    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = toml::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.locales.check_dict_locale(&config.dict_locale)?;
        Ok(config)
    }

    /// 有路径则加载，否则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// 实际使用的字典缓存目录
    pub fn resolved_cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .map(|base| base.join(defaults::CACHE_SUBDIR))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.timezone, 8);
        assert_eq!(config.dict_locale, "chs");
        assert!(config.dict_url_template.contains("{game}"));
        assert_eq!(
            config.sheet_categories.genshin.code_for("常驻祈愿"),
            Some("200")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExportConfig::from_toml_str(
            r#"
            timezone = 1
            output_dir = "exports"

            [sheet_categories.genshin.entries]
            "集录祈愿" = "500"
            "#,
        )
        .unwrap();

        assert_eq!(config.timezone, 1);
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.dict_locale, "chs");
        // 覆写 genshin 表时，fallback 仍有默认值
        assert_eq!(config.sheet_categories.genshin.fallback_code, "500");
        assert_eq!(
            config.sheet_categories.genshin.code_for("集录祈愿"),
            Some("500")
        );
        assert_eq!(
            config.sheet_categories.starrail.code_for("常驻跃迁"),
            Some("1")
        );
    }

    #[test]
    fn test_invalid_dict_locale_rejected() {
        let result = ExportConfig::from_toml_str(r#"dict_locale = "xx""#);
        assert!(matches!(result, Err(ConfigError::UnsupportedDictLocale(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "dict_locale = \"en\"").unwrap();
        writeln!(temp_file, "cache_dir = \"/tmp/uigf-cache\"").unwrap();

        let config = ExportConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.dict_locale, "en");
        assert_eq!(config.resolved_cache_dir(), PathBuf::from("/tmp/uigf-cache"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExportConfig::load(Path::new("non_existent_config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ExportConfig::from_toml_str("timezone = \"eight\"");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
