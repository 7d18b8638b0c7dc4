// ==========================================
// UIGF 导出工具 - 输出文件写入
// ==========================================
// 文件名: output_uigf_<uid>_<YYYYMMDDHHMMSS>.json（本地时间）
// 格式: UTF-8，非 ASCII 字符不转义，2 空格缩进
// ==========================================

use crate::domain::ExportDocument;
use crate::importer::error::{ExportError, ExportResult};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn output_file_name(uid: &str, at: NaiveDateTime) -> String {
    format!("output_uigf_{}_{}.json", uid, at.format("%Y%m%d%H%M%S"))
}

/// 写入导出文档，返回文件路径
pub fn write_document(
    document: &ExportDocument,
    output_dir: &Path,
    uid: &str,
    at: NaiveDateTime,
) -> ExportResult<PathBuf> {
    let path = output_dir.join(output_file_name(uid, at));
    let write_failed = |message: String| ExportError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    let json = serde_json::to_string_pretty(document).map_err(|e| write_failed(e.to_string()))?;

    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir).map_err(|e| write_failed(e.to_string()))?;
    }
    fs::write(&path, json).map_err(|e| write_failed(e.to_string()))?;

    debug!(path = %path.display(), "导出文件已写入");
    Ok(path)
}
