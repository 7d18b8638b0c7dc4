// ==========================================
// UIGF 导出工具 - 导出流程编排
// ==========================================
// 职责: 整合导出流程，从电子表格到 UIGF 文件
// 流程: 字典解析 → 文件解析 → 字段映射 → 分类/规范化 → 组装 → 校验 → 写文件
// 红线: 每次调用是一次完整尝试；要么返回结果，要么返回具名错误
// 红线: 校验失败时不写文件
// ==========================================

use crate::config::{ExportConfig, SheetCategories};
use crate::domain::{DroppedRow, ExportDocument, Game};
use crate::i18n::{t, t_with_args};
use crate::importer::dictionary::{DictionaryResolver, DictionarySource};
use crate::importer::error::ExportResult;
use crate::importer::export_assembler::{ExportAssembler, ExportTarget};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser};
use crate::importer::output_writer;
use crate::importer::record_normalizer::RecordNormalizer;
use crate::importer::schema_validator::SchemaValidator;
use crate::importer::sheet_classifier::SheetClassifier;
use chrono::Local;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// ExportRequest - 单次导出参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub source_path: PathBuf, // 源电子表格
    pub uid: String,          // 纯数字 UID
    pub game: Game,
    pub dict_locale: String, // 字典语言代码，如 chs
    pub lang: String,        // UIGF lang 标签，如 zh-cn
    pub timezone: i32,
    pub sheet_label: Option<String>, // 单表来源的工作表名（默认取文件名）
}

// ==========================================
// ExportReport - 导出统计与诊断
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub sheet_count: usize,          // 参与导出的工作表数
    pub total_rows: usize,           // 源数据行数（不含表头、空行）
    pub exported_rows: usize,        // 写入文档的记录数
    pub dropped: Vec<DroppedRow>,    // 被跳过的行
    pub unknown_sheets: Vec<String>, // 使用保留码的工作表
    pub skipped_sheets: Vec<String>, // 空工作表
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub document: ExportDocument,
    pub report: ExportReport,
    pub output_path: Option<PathBuf>, // 仅 export() 写文件后有值
}

// ==========================================
// UigfExporter - 导出器
// ==========================================
pub struct UigfExporter<S: DictionarySource> {
    resolver: DictionaryResolver<S>,

    // 读取组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,

    sheet_categories: SheetCategories,
    output_dir: PathBuf,
}

impl<S: DictionarySource> UigfExporter<S> {
    /// 按配置创建导出器（通用文件解析器 + 默认字段映射）
    pub fn new(config: &ExportConfig, source: S) -> Self {
        Self::with_components(
            DictionaryResolver::new(config.resolved_cache_dir(), source),
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl),
            config.sheet_categories.clone(),
            config.output_dir.clone(),
        )
    }

    pub fn with_components(
        resolver: DictionaryResolver<S>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        sheet_categories: SheetCategories,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            resolver,
            file_parser,
            field_mapper,
            sheet_categories,
            output_dir,
        }
    }

    /// 生成并校验导出文档（不写文件）
    ///
    /// # 返回
    /// - Ok(ExportOutcome): 通过校验的文档与统计
    /// - Err(DictUnavailable): 字典缓存与远程均不可用
    /// - Err(SourceUnreadable): 源文件无法打开或缺少必需列
    /// - Err(SchemaViolation / SchemaInvalid): 文档未通过校验
    #[instrument(skip(self, request, schema), fields(uid = %request.uid, game = %request.game))]
    pub fn convert(&self, request: &ExportRequest, schema: &Value) -> ExportResult<ExportOutcome> {
        info!(source = %request.source_path.display(), "开始导出");

        // === 步骤 1: 字典 ===
        debug!("步骤 1: 解析字典");
        let dictionary = self.resolver.resolve(request.game, &request.dict_locale)?;

        // === 步骤 2: 解析文件 ===
        debug!("步骤 2: 解析文件");
        let mut tables = self
            .file_parser
            .parse_to_raw_tables(&request.source_path)
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;
        if let Some(label) = &request.sheet_label {
            match tables.as_mut_slice() {
                [table] => table.label = label.clone(),
                _ => warn!("{}", t_with_args("export.sheet_label_ignored", &[("sheet", label)])),
            }
        }

        // === 步骤 3: 映射 + 规范化（逐表） ===
        debug!("步骤 3: 规范化记录");
        info!("{}", t("export.building"));
        let classifier = SheetClassifier::new(self.sheet_categories.for_game(request.game).clone());
        let normalizer = RecordNormalizer::new(&classifier);

        let mut report = ExportReport::default();
        let mut per_sheet = Vec::with_capacity(tables.len());
        for table in tables {
            if table.headers.iter().all(|h| h.is_empty()) {
                warn!("{}", t_with_args("export.empty_sheet", &[("sheet", &table.label)]));
                report.skipped_sheets.push(table.label);
                continue;
            }

            let sheet = self.field_mapper.map_table(table).map_err(|e| {
                error!(error = %e, "字段映射失败");
                e
            })?;

            report.sheet_count += 1;
            report.total_rows += sheet.rows.len();

            let normalized = normalizer.normalize(&sheet.label, &sheet.rows, &dictionary);
            report.dropped.extend(normalized.dropped);
            per_sheet.push(normalized.records);
        }
        report.unknown_sheets = classifier.unknown_labels();

        // === 步骤 4: 组装 ===
        let target = ExportTarget {
            uid: request.uid.clone(),
            timezone: request.timezone,
            lang: request.lang.clone(),
        };
        let document = ExportAssembler.assemble(per_sheet, &target);
        report.exported_rows = document.record_count();

        // === 步骤 5: 校验 ===
        debug!("步骤 5: Schema 校验");
        let validated = SchemaValidator::compile(schema).and_then(|v| v.validate(&document));
        if let Err(e) = validated {
            error!("{}", t_with_args("export.validation_failed", &[("error", &e.to_string())]));
            return Err(e.into());
        }
        info!("{}", t("export.validation_passed"));

        info!(
            "{}",
            t_with_args(
                "export.summary",
                &[
                    ("total", &report.total_rows.to_string()),
                    ("exported", &report.exported_rows.to_string()),
                    ("dropped", &report.dropped.len().to_string()),
                ]
            )
        );

        Ok(ExportOutcome {
            document,
            report,
            output_path: None,
        })
    }

    /// 生成、校验并写出 output_uigf_<uid>_<时间戳>.json
    pub fn export(&self, request: &ExportRequest, schema: &Value) -> ExportResult<ExportOutcome> {
        let mut outcome = self.convert(request, schema)?;

        let path = output_writer::write_document(
            &outcome.document,
            &self.output_dir,
            &request.uid,
            Local::now().naive_local(),
        )?;
        info!("{}", t_with_args("export.exported", &[("path", &path.display().to_string())]));

        outcome.output_path = Some(path);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DropReason;
    use crate::importer::error::{DictionaryError, ExportError};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    struct FixedSource(String);

    impl DictionarySource for FixedSource {
        fn fetch(&self, _game: Game, _locale: &str) -> Result<String, DictionaryError> {
            Ok(self.0.clone())
        }
    }

    fn exporter(dir: &TempDir) -> UigfExporter<FixedSource> {
        let config = ExportConfig {
            cache_dir: Some(dir.path().join("cache")),
            output_dir: dir.path().join("out"),
            ..ExportConfig::default()
        };
        UigfExporter::new(&config, FixedSource(r#"{"A": 10001, "C": 10003}"#.to_string()))
    }

    fn request(path: PathBuf) -> ExportRequest {
        ExportRequest {
            source_path: path,
            uid: "100000001".to_string(),
            game: Game::Genshin,
            dict_locale: "chs".to_string(),
            lang: "zh-cn".to_string(),
            timezone: 8,
            sheet_label: None,
        }
    }

    fn permissive_schema() -> Value {
        json!({ "type": "object", "required": ["info"] })
    }

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const HEADER: &str = "名称,类别,星级,祈愿 Id,时间";

    #[test]
    fn test_convert_three_row_scenario() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            "A,角色,5,1700000000000000001,2024-01-01 10:00:00",
            "B,角色,4,1700000000000000002,2024-01-01 10:00:01",
            "C,武器,3,1700000000000000003,"
        );
        let path = write_csv(&dir, "角色活动祈愿.csv", &csv);

        let outcome = exporter(&dir)
            .convert(&request(path), &permissive_schema())
            .unwrap();

        let list = &outcome.document.hk4e[0].list;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].item_id, "10001");
        assert_eq!(list[0].uigf_gacha_type, "301");
        assert_eq!(outcome.report.total_rows, 3);
        assert_eq!(outcome.report.exported_rows, 1);
        assert_eq!(outcome.report.dropped.len(), 2);
        assert_eq!(
            outcome.report.dropped[0].reason,
            DropReason::NameNotFound("B".to_string())
        );
        assert!(outcome.output_path.is_none());
    }

    #[test]
    fn test_missing_column_is_source_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "常驻祈愿.csv", "名称,星级,时间\nA,5,2024-01-01 10:00:00\n");

        let result = exporter(&dir).convert(&request(path), &permissive_schema());
        assert!(matches!(result, Err(ExportError::SourceUnreadable(_))));
    }

    #[test]
    fn test_schema_violation_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let csv = format!("{}\nA,角色,5,1,2024-01-01 10:00:00\n", HEADER);
        let path = write_csv(&dir, "常驻祈愿.csv", &csv);
        let schema = json!({ "type": "object", "required": ["does_not_exist"] });

        let result = exporter(&dir).export(&request(path), &schema);

        assert!(matches!(result, Err(ExportError::SchemaViolation { .. })));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let csv = format!("{}\nA,角色,5,1,2024-01-01 10:00:00\n", HEADER);
        let path = write_csv(&dir, "常驻祈愿.csv", &csv);

        let outcome = exporter(&dir)
            .export(&request(path), &permissive_schema())
            .unwrap();

        let written = outcome.output_path.unwrap();
        assert!(written.starts_with(dir.path().join("out")));
        let name = written.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("output_uigf_100000001_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_headerless_sheet_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "新手祈愿.csv", "");

        let outcome = exporter(&dir)
            .convert(&request(path), &permissive_schema())
            .unwrap();

        assert_eq!(outcome.report.sheet_count, 0);
        assert_eq!(outcome.report.skipped_sheets, vec!["新手祈愿".to_string()]);
        assert!(outcome.document.hk4e[0].list.is_empty());
    }
}
