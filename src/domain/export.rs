// ==========================================
// UIGF 导出工具 - 导出文档模型
// ==========================================
// 对齐: UIGF v4.0 顶层结构 { info, hk4e[] }
// 红线: 记录一律写入 hk4e 分区，与游戏无关
// ==========================================

use crate::domain::record::NormalizedRecord;
use serde::{Deserialize, Serialize};

/// UIGF 格式版本（协议常量）
pub const UIGF_VERSION: &str = "v4.0";

// ==========================================
// ExportInfo - 文档头
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub export_timestamp: i64,      // 导出时间（epoch 秒）
    pub export_app: String,         // 导出程序名
    pub export_app_version: String, // 导出程序版本
    pub version: String,            // UIGF 格式版本
}

// ==========================================
// UidSection - 单个 UID 分区
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidSection {
    pub uid: String,
    pub timezone: i32,
    pub lang: String,
    pub list: Vec<NormalizedRecord>, // 顺序 = 工作表顺序，其次行顺序；不去重
}

// ==========================================
// ExportDocument - UIGF 导出文档
// ==========================================
// 红线: 校验开始后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub info: ExportInfo,

    #[serde(default)]
    pub hk4e: Vec<UidSection>,
}

impl ExportDocument {
    pub fn new(info: ExportInfo) -> Self {
        Self {
            info,
            hk4e: Vec::new(),
        }
    }

    pub fn push_section(&mut self, section: UidSection) {
        self.hk4e.push(section);
    }

    /// 文档中的记录总数
    pub fn record_count(&self) -> usize {
        self.hk4e.iter().map(|s| s.list.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> ExportInfo {
        ExportInfo {
            export_timestamp: 1_700_000_000,
            export_app: "uigf-export".to_string(),
            export_app_version: "0.1.0".to_string(),
            version: UIGF_VERSION.to_string(),
        }
    }

    fn section(uid: &str) -> UidSection {
        UidSection {
            uid: uid.to_string(),
            timezone: 8,
            lang: "zh-cn".to_string(),
            list: Vec::new(),
        }
    }

    #[test]
    fn test_sections_keep_push_order() {
        let mut doc = ExportDocument::new(info());
        doc.push_section(section("100000001"));
        doc.push_section(section("100000002"));

        assert_eq!(doc.hk4e.len(), 2);
        assert_eq!(doc.hk4e[1].uid, "100000002");
        assert_eq!(doc.record_count(), 0);
    }

    #[test]
    fn test_serialized_keys() {
        let mut doc = ExportDocument::new(info());
        doc.push_section(section("100000001"));

        let value = serde_json::to_value(&doc).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["hk4e", "info"]);
        assert_eq!(value["info"]["version"], "v4.0");
    }
}
