// ==========================================
// UIGF 导出工具 - 配置层
// ==========================================
// 职责: 导出配置、工作表映射表、语言配置
// 存储: 可选 TOML 文件，缺省项使用内置默认值
// ==========================================

pub mod export_config;
pub mod tables;

// 重导出核心配置
pub use export_config::{defaults, ConfigError, ExportConfig};
pub use tables::{LocaleTable, SheetCategories, SheetCategoryTable, FALLBACK_CATEGORY_CODE};
