// ==========================================
// UIGF 导出工具 - 可注入映射表
// ==========================================
// 职责: 工作表名称 → 卡池类别码；界面语言 → UIGF lang；字典语言代码白名单
// 红线: 只做查表，不含导出流程逻辑
// ==========================================

use crate::config::export_config::ConfigError;
use crate::domain::Game;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 未知工作表的保留类别码
pub const FALLBACK_CATEGORY_CODE: &str = "500";

fn default_fallback_code() -> String {
    FALLBACK_CATEGORY_CODE.to_string()
}

// ==========================================
// SheetCategoryTable - 工作表 → 类别码
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCategoryTable {
    /// 未命中时使用的类别码
    #[serde(default = "default_fallback_code")]
    pub fallback_code: String,

    /// 工作表名称 → 类别码
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl SheetCategoryTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fallback_code: default_fallback_code(),
            entries: pairs
                .iter()
                .map(|(label, code)| (label.to_string(), code.to_string()))
                .collect(),
        }
    }

    /// 原神祈愿卡池
    pub fn genshin_default() -> Self {
        Self::from_pairs(&[
            ("角色活动祈愿", "301"),
            ("武器活动祈愿", "302"),
            ("常驻祈愿", "200"),
            ("新手祈愿", "100"),
        ])
    }

    /// 星穹铁道跃迁卡池（沿用 hk4e 类别码）
    pub fn starrail_default() -> Self {
        Self::from_pairs(&[
            ("角色活动跃迁", "301"),
            ("光锥活动跃迁", "302"),
            ("常驻跃迁", "200"),
            ("新手跃迁", "100"),
        ])
    }

    /// 查表（名称两端空白不参与匹配）
    pub fn code_for(&self, label: &str) -> Option<&str> {
        self.entries.get(label.trim()).map(String::as_str)
    }
}

// ==========================================
// SheetCategories - 按游戏区分的映射表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCategories {
    #[serde(default = "SheetCategoryTable::genshin_default")]
    pub genshin: SheetCategoryTable,

    #[serde(default = "SheetCategoryTable::starrail_default")]
    pub starrail: SheetCategoryTable,
}

impl Default for SheetCategories {
    fn default() -> Self {
        Self {
            genshin: SheetCategoryTable::genshin_default(),
            starrail: SheetCategoryTable::starrail_default(),
        }
    }
}

impl SheetCategories {
    pub fn for_game(&self, game: Game) -> &SheetCategoryTable {
        match game {
            Game::Genshin => &self.genshin,
            Game::StarRail => &self.starrail,
        }
    }
}

// ==========================================
// LocaleTable - 语言配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    /// 界面语言 → UIGF lang 标签
    #[serde(default = "default_interface_langs")]
    pub interface_langs: BTreeMap<String, String>,

    /// 字典接口支持的语言代码
    #[serde(default = "default_dict_locales")]
    pub dict_locales: Vec<String>,
}

fn default_interface_langs() -> BTreeMap<String, String> {
    [("zh", "zh-cn"), ("en", "en-us")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_dict_locales() -> Vec<String> {
    [
        "chs", "cht", "jp", "en", "de", "es", "fr", "id", "kr", "pt", "ru", "th", "vi",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self {
            interface_langs: default_interface_langs(),
            dict_locales: default_dict_locales(),
        }
    }
}

impl LocaleTable {
    /// 界面语言对应的 UIGF lang 标签
    pub fn uigf_lang(&self, interface_lang: &str) -> Result<&str, ConfigError> {
        let key = interface_lang.trim().to_lowercase();
        self.interface_langs
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownInterfaceLang(interface_lang.to_string()))
    }

    /// 校验字典语言代码
    pub fn check_dict_locale<'a>(&self, code: &'a str) -> Result<&'a str, ConfigError> {
        let code = code.trim();
        if self.dict_locales.iter().any(|c| c == code) {
            Ok(code)
        } else {
            Err(ConfigError::UnsupportedDictLocale(code.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genshin_table_codes() {
        let table = SheetCategoryTable::genshin_default();
        assert_eq!(table.code_for("角色活动祈愿"), Some("301"));
        assert_eq!(table.code_for("武器活动祈愿"), Some("302"));
        assert_eq!(table.code_for("常驻祈愿"), Some("200"));
        assert_eq!(table.code_for(" 新手祈愿 "), Some("100"));
        assert_eq!(table.code_for("集录祈愿"), None);
        assert_eq!(table.fallback_code, "500");
    }

    #[test]
    fn test_sheet_categories_for_game() {
        let categories = SheetCategories::default();
        assert_eq!(
            categories.for_game(Game::StarRail).code_for("光锥活动跃迁"),
            Some("302")
        );
        assert_eq!(categories.for_game(Game::Genshin).code_for("光锥活动跃迁"), None);
    }

    #[test]
    fn test_locale_table() {
        let table = LocaleTable::default();
        assert_eq!(table.uigf_lang("zh").unwrap(), "zh-cn");
        assert_eq!(table.uigf_lang("EN").unwrap(), "en-us");
        assert!(table.uigf_lang("fr").is_err());

        assert_eq!(table.check_dict_locale("chs").unwrap(), "chs");
        assert_eq!(table.dict_locales.len(), 13);
        assert!(matches!(
            table.check_dict_locale("xx"),
            Err(ConfigError::UnsupportedDictLocale(_))
        ));
    }
}
