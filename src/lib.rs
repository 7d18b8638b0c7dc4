// ==========================================
// UIGF 导出工具 - 核心库
// ==========================================
// 用途: 将电子表格中的抽卡记录转换为 UIGF v4.0 JSON
// 流程: 字典 → 解析 → 规范化 → 组装 → Schema 校验 → 输出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与文档模型
pub mod domain;

// 导入 / 导出层 - 流程组件
pub mod importer;

// 配置层 - 映射表与端点
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ExportConfig, LocaleTable, SheetCategoryTable};
pub use domain::{DropReason, ExportDocument, Game, NormalizedRecord, RawRow};
pub use importer::{
    ExportError, ExportOutcome, ExportRequest, ExportResult, SchemaValidator, UigfExporter,
};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 程序名称
pub const APP_NAME: &str = "UIGF 导出工具";
