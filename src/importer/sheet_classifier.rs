// ==========================================
// UIGF 导出工具 - 工作表分类器
// ==========================================
// 职责: 工作表名称 → 卡池类别码（全函数，不报错）
// 规则: 未知名称 → 保留码 "500"，每个不同的未知名称只告警一次
// ==========================================

use crate::config::SheetCategoryTable;
use crate::i18n::t_with_args;
use std::sync::Mutex;
use tracing::warn;

pub struct SheetClassifier {
    table: SheetCategoryTable,
    unknown_labels: Mutex<Vec<String>>, // 已告警的未知名称（按出现顺序）
}

impl SheetClassifier {
    pub fn new(table: SheetCategoryTable) -> Self {
        Self {
            table,
            unknown_labels: Mutex::new(Vec::new()),
        }
    }

    /// 工作表名称 → 类别码
    pub fn classify(&self, sheet_label: &str) -> String {
        if let Some(code) = self.table.code_for(sheet_label) {
            return code.to_string();
        }

        let mut unknown = self.unknown_labels.lock().unwrap_or_else(|e| e.into_inner());
        if !unknown.iter().any(|l| l == sheet_label) {
            unknown.push(sheet_label.to_string());
            warn!(
                sheet = %sheet_label,
                "{}",
                t_with_args(
                    "export.unknown_sheet",
                    &[("sheet", sheet_label), ("code", &self.table.fallback_code)]
                )
            );
        }

        self.table.fallback_code.clone()
    }

    /// 本次运行中遇到的未知工作表名称
    pub fn unknown_labels(&self) -> Vec<String> {
        self.unknown_labels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
