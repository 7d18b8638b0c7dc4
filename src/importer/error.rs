// ==========================================
// UIGF 导出工具 - 导入 / 导出错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: ImportError（源文件）/ DictionaryError（字典）/ SchemaError（校验）
//       → ExportError（一次导出尝试的最终错误）
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 源文件读取错误（对外归入 SourceUnreadable）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("文件中没有可用的工作表: {0}")]
    NoSheets(String),

    #[error("工作表 '{sheet}' 缺少必需列: {column}")]
    MissingColumn { sheet: String, column: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

/// 字典获取错误
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("字典下载失败: {0}")]
    Fetch(String),

    #[error("字典解析失败: {0}")]
    Parse(String),

    #[error("字典不可用 ({game}/{locale}): {reason}")]
    Unavailable {
        game: String,
        locale: String,
        reason: String,
    },
}

/// Schema 获取 / 校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema 获取失败: {0}")]
    Unavailable(String),

    #[error("Schema 无法编译: {0}")]
    Invalid(String),

    #[error("{detail}（位置: {path}）")]
    Violation { path: String, detail: String },
}

/// 一次导出尝试的错误
///
/// 行级问题不在此列：它们以 DroppedRow 的形式记录在报告中，不中断流程。
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("字典不可用: {0}")]
    DictUnavailable(#[source] DictionaryError),

    #[error("源文件无法读取: {0}")]
    SourceUnreadable(#[from] ImportError),

    #[error("JSON验证失败: {detail}（位置: {path}）")]
    SchemaViolation { path: String, detail: String },

    #[error("Schema 不可用: {0}")]
    SchemaUnavailable(String),

    #[error("Schema 无效: {0}")]
    SchemaInvalid(String),

    #[error("导出文件写入失败 ({path}): {message}")]
    WriteFailed { path: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<DictionaryError> for ExportError {
    fn from(err: DictionaryError) -> Self {
        ExportError::DictUnavailable(err)
    }
}

impl From<SchemaError> for ExportError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Unavailable(msg) => ExportError::SchemaUnavailable(msg),
            SchemaError::Invalid(msg) => ExportError::SchemaInvalid(msg),
            SchemaError::Violation { path, detail } => {
                ExportError::SchemaViolation { path, detail }
            }
        }
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
