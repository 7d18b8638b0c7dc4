// ==========================================
// UIGF 导出工具 - 源文件元信息
// ==========================================
// 用途: 从源文件名推断 UID（如 抽卡记录100000001_20240101.xlsx）
// ==========================================

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn uid_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"抽卡记录(\d+)_").ok())
        .as_ref()
}

/// 文件名中的 UID；不匹配时返回 None
pub fn extract_uid_from_filename(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    uid_pattern()?
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// UID 必须是非空纯数字
pub fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty() && uid.chars().all(|c| c.is_ascii_digit())
}
