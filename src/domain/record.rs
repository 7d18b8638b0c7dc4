// ==========================================
// UIGF 导出工具 - 抽卡记录领域模型
// ==========================================
// 职责: 表格原始行 → 规范化记录 的中间与最终结构
// ==========================================

use crate::i18n::{t, t_with_args};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellTime - 时间单元格
// ==========================================
// 表格可能给出原生日期时间，也可能给出文本
#[derive(Debug, Clone, PartialEq)]
pub enum CellTime {
    Native(NaiveDateTime), // 原生日期时间单元格
    Text(String),          // 文本（需按固定格式解析）
    Missing,               // 空单元格
}

// ==========================================
// RawRow - 导入中间结构体
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构 → 规范化
// 生命周期: 仅在一次导出流程内
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub name: Option<String>,      // 名称
    pub item_type: Option<String>, // 类别（角色 / 武器）
    pub rank: Option<String>,      // 星级
    pub pull_id: Option<String>,   // 祈愿 Id
    pub time: CellTime,            // 时间

    // 元信息
    pub row_number: usize, // 数据行号（从 1 开始，不含表头）
}

// ==========================================
// NormalizedRecord - UIGF 记录
// ==========================================
// 红线: item_id 永不为 "0"；count 固定为 "1"
// 红线: uigf_gacha_type 与 gacha_type 同值（交换格式要求冗余）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub uigf_gacha_type: String, // 卡池类别码
    pub gacha_type: String,      // 卡池类别码（同上）
    pub item_id: String,         // 物品 ID
    pub count: String,           // 数量
    pub time: String,            // YYYY-MM-DD HH:MM:SS
    pub name: String,            // 名称
    pub item_type: String,       // 类别
    pub rank_type: String,       // 星级
    pub id: String,              // 祈愿 Id
}

// ==========================================
// DropReason - 行被跳过的原因
// ==========================================
// 行级问题，不中断批处理；说明文本随当前语言变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    MissingField(&'static str), // 列名
    NameNotFound(String),       // 名称
    MissingTime,
    InvalidTime(String), // 原始文本
}

impl DropReason {
    pub fn message(&self) -> String {
        match self {
            DropReason::MissingField(field) => {
                t_with_args("drop.missing_field", &[("field", field)])
            }
            DropReason::NameNotFound(name) => t_with_args("drop.name_not_found", &[("name", name)]),
            DropReason::MissingTime => t("drop.missing_time"),
            DropReason::InvalidTime(value) => {
                t_with_args("drop.invalid_time", &[("value", value)])
            }
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for DropReason {}

// ==========================================
// DroppedRow - 被跳过的行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub sheet: String,      // 工作表名称
    pub row_number: usize,  // 数据行号
    pub reason: DropReason, // 跳过原因
}
