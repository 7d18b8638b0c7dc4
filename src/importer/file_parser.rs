// ==========================================
// UIGF 导出工具 - 文件解析器实现
// ==========================================
// 阶段 1: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xls/.ods，全部工作表) / CSV (.csv，单表)
// ==========================================

use crate::domain::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ==========================================
// CellValue - 单元格值
// ==========================================
// 保留原生日期时间，数字与文本留给字段映射处理
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }
}

// ==========================================
// RawTable - 一张工作表的原始数据
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub label: String,                          // 工作表名称
    pub headers: Vec<String>,                   // 表头（已 trim）
    pub rows: Vec<HashMap<String, CellValue>>, // 列名 → 单元格
}

// ==========================================
// RawSheet - 字段映射后的工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub label: String,
    pub rows: Vec<RawRow>,
}

/// 按表头组装一行，完全空白的行返回 None
fn build_row(headers: &[String], cells: Vec<CellValue>) -> Option<HashMap<String, CellValue>> {
    let mut row_map = HashMap::new();
    for (col_idx, cell) in cells.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if !header.is_empty() {
                row_map.insert(header.clone(), cell);
            }
        }
    }

    if row_map.values().all(CellValue::is_empty) {
        None
    } else {
        Some(row_map)
    }
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 整个 CSV 视为一张工作表，表名取文件名（不含扩展名）
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let label = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells = record.iter().map(CellValue::from_text).collect();
            if let Some(row) = build_row(&headers, cells) {
                rows.push(row);
            }
        }

        debug!(sheet = %label, rows = rows.len(), "CSV 解析完成");
        Ok(vec![RawTable {
            label,
            headers,
            rows,
        }])
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取全部工作表，保持工作簿中的顺序
pub struct ExcelParser;

impl ExcelParser {
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::from_text(s),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(native) => CellValue::DateTime(native),
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .map(CellValue::DateTime)
                .unwrap_or_else(|_| CellValue::from_text(s)),
            Data::DurationIso(s) => CellValue::from_text(s),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::NoSheets(file_path.display().to_string()));
        }

        let mut tables = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;

            let mut rows = range.rows();
            let headers: Vec<String> = match rows.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
                None => Vec::new(),
            };

            let mut records = Vec::new();
            for data_row in rows {
                let cells = data_row.iter().map(Self::cell_value).collect();
                if let Some(row) = build_row(&headers, cells) {
                    records.push(row);
                }
            }

            debug!(sheet = %sheet_name, rows = records.len(), "工作表解析完成");
            tables.push(RawTable {
                label: sheet_name,
                headers,
                rows: records,
            });
        }

        Ok(tables)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_tables(file_path),
            "xlsx" | "xlsm" | "xls" | "ods" => ExcelParser.parse_to_raw_tables(file_path),
            other => {
                check_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
