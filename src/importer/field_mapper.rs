// ==========================================
// UIGF 导出工具 - 字段映射器实现
// ==========================================
// 阶段 2: 源列 → RawRow 字段 + 单元格类型转换
// 列名: 名称 / 类别 / 星级 / 祈愿 Id / 时间（固定，不可配置）
// ==========================================

use crate::domain::{CellTime, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CellValue, RawSheet, RawTable};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

pub const COL_NAME: &str = "名称";
pub const COL_ITEM_TYPE: &str = "类别";
pub const COL_RANK: &str = "星级";
pub const COL_PULL_ID: &str = "祈愿 Id";
pub const COL_TIME: &str = "时间";

/// 必需列（缺任何一列即无法导出该表）
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_NAME, COL_ITEM_TYPE, COL_RANK, COL_PULL_ID, COL_TIME];

// f64 可精确表示的最大整数
const MAX_EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

static EMPTY_CELL: CellValue = CellValue::Empty;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_table(&self, table: RawTable) -> ImportResult<RawSheet> {
        for column in REQUIRED_COLUMNS {
            let present = Self::aliases(column)
                .iter()
                .any(|alias| table.headers.iter().any(|h| h == alias));
            if !present {
                return Err(ImportError::MissingColumn {
                    sheet: table.label.clone(),
                    column: column.to_string(),
                });
            }
        }

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_row(row, idx + 1))
            .collect();

        Ok(RawSheet {
            label: table.label,
            rows,
        })
    }
}

impl FieldMapper {
    /// 列名别名（导出工具版本不同，祈愿 Id 列的写法不一）
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            COL_NAME => &[COL_NAME],
            COL_ITEM_TYPE => &[COL_ITEM_TYPE],
            COL_RANK => &[COL_RANK],
            COL_PULL_ID => &[COL_PULL_ID, "祈愿Id", "id"],
            COL_TIME => &[COL_TIME],
            _ => &[],
        }
    }

    pub fn map_row(&self, row: &HashMap<String, CellValue>, row_number: usize) -> RawRow {
        RawRow {
            name: self.get_string(row, COL_NAME),
            item_type: self.get_string(row, COL_ITEM_TYPE),
            rank: self.get_string(row, COL_RANK),
            pull_id: self.get_string(row, COL_PULL_ID),
            time: self.get_time(row, COL_TIME),
            row_number,
        }
    }

    fn get_cell<'a>(&self, row: &'a HashMap<String, CellValue>, key: &str) -> &'a CellValue {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .find(|cell| !cell.is_empty())
            .unwrap_or(&EMPTY_CELL)
    }

    /// 提取字符串字段；整数形式的数字去掉小数部分
    fn get_string(&self, row: &HashMap<String, CellValue>, key: &str) -> Option<String> {
        match self.get_cell(row, key) {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(format_float(*f)),
            CellValue::DateTime(dt) => Some(dt.to_string()),
            CellValue::Empty => None,
        }
    }

    /// 提取时间字段；原生日期时间保持原样，其余转为文本交由规范化解析
    fn get_time(&self, row: &HashMap<String, CellValue>, key: &str) -> CellTime {
        match self.get_cell(row, key) {
            CellValue::DateTime(dt) => CellTime::Native(*dt),
            CellValue::Text(s) => CellTime::Text(s.clone()),
            CellValue::Int(i) => CellTime::Text(i.to_string()),
            CellValue::Float(f) => CellTime::Text(format_float(*f)),
            CellValue::Empty => CellTime::Missing,
        }
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_F64_INT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
