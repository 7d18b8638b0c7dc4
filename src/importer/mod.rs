// ==========================================
// UIGF 导出工具 - 导入 / 导出层
// ==========================================
// 职责: 电子表格 → 规范化记录 → UIGF v4.0 文档
// 支持: Excel (xlsx/xlsm/xls/ods), CSV
// ==========================================

// 模块声明
pub mod dictionary;
pub mod error;
pub mod export_assembler;
pub mod exporter;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod output_writer;
pub mod record_normalizer;
pub mod schema_validator;
pub mod sheet_classifier;
pub mod source_meta;

// 重导出核心类型
pub use dictionary::{
    Dictionary, DictionaryResolver, DictionarySource, HttpDictionarySource, ItemLookup,
};
pub use error::{
    DictionaryError, ExportError, ExportResult, ImportError, ImportResult, SchemaError,
};
pub use export_assembler::{ExportAssembler, ExportTarget, EXPORT_APP, EXPORT_APP_VERSION};
pub use exporter::{ExportOutcome, ExportReport, ExportRequest, UigfExporter};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CellValue, CsvParser, ExcelParser, RawSheet, RawTable, UniversalFileParser};
pub use record_normalizer::{NormalizedSheet, RecordNormalizer};
pub use schema_validator::{FileSchemaSource, HttpSchemaSource, SchemaSource, SchemaValidator};
pub use sheet_classifier::SheetClassifier;
pub use source_meta::{extract_uid_from_filename, is_valid_uid};

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, FileParser};
