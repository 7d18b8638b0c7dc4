// ==========================================
// UIGF 导出工具 - 导出文档组装
// ==========================================
// 阶段 4: 各工作表记录 → 单个 UID 分区的 UIGF 文档（hk4e）
// 红线: 按工作表顺序拼接，保持表内行序；不排序、不去重、不按类别重新分组
// ==========================================

use crate::domain::{ExportDocument, ExportInfo, NormalizedRecord, UidSection, UIGF_VERSION};
use chrono::Utc;

/// 导出程序名（协议常量）
pub const EXPORT_APP: &str = "uigf-export";

/// 导出程序版本（协议常量）
pub const EXPORT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 分区参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub uid: String,
    pub timezone: i32,
    pub lang: String, // UIGF lang 标签，如 zh-cn
}

pub struct ExportAssembler;

impl ExportAssembler {
    /// 以当前时间组装
    pub fn assemble<I>(&self, per_sheet: I, target: &ExportTarget) -> ExportDocument
    where
        I: IntoIterator<Item = Vec<NormalizedRecord>>,
    {
        self.assemble_at(per_sheet, target, Utc::now().timestamp())
    }

    /// 以指定导出时间组装（epoch 秒）
    pub fn assemble_at<I>(
        &self,
        per_sheet: I,
        target: &ExportTarget,
        export_timestamp: i64,
    ) -> ExportDocument
    where
        I: IntoIterator<Item = Vec<NormalizedRecord>>,
    {
        let list: Vec<NormalizedRecord> = per_sheet.into_iter().flatten().collect();

        let mut document = ExportDocument::new(ExportInfo {
            export_timestamp,
            export_app: EXPORT_APP.to_string(),
            export_app_version: EXPORT_APP_VERSION.to_string(),
            version: UIGF_VERSION.to_string(),
        });
        document.push_section(UidSection {
            uid: target.uid.clone(),
            timezone: target.timezone,
            lang: target.lang.clone(),
            list,
        });
        document
    }
}
