// ==========================================
// UIGF 导出工具 - 导入管道 Trait
// ==========================================
// 职责: 定义文件解析 / 字段映射接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::file_parser::{RawSheet, RawTable};
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为按工作表分组的原始表格
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawTable>): 工作表列表（保持文件中的顺序）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 2）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将一张原始表格映射为 RawRow 列表
    ///
    /// # 参数
    /// - table: 原始表格（表头 + 按列名索引的行）
    ///
    /// # 返回
    /// - Ok(RawSheet): 映射后的工作表
    /// - Err: 缺少必需列
    fn map_table(&self, table: RawTable) -> ImportResult<RawSheet>;
}
