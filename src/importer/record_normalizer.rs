// ==========================================
// UIGF 导出工具 - 记录规范化
// ==========================================
// 阶段 3: RawRow → NormalizedRecord
// 流程: 类别码 → 字典查表 → 时间解析 → 组装记录
// 红线: 整批不报错；每行独立成功或被跳过（附诊断）
// 红线: 查表以行自身的名称为键，不依赖并行下标
// ==========================================

use crate::domain::{CellTime, DropReason, DroppedRow, NormalizedRecord, RawRow};
use crate::i18n::t_with_args;
use crate::importer::dictionary::{Dictionary, ItemLookup};
use crate::importer::field_mapper::{COL_NAME, COL_PULL_ID};
use crate::importer::sheet_classifier::SheetClassifier;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// UIGF 时间格式（输入文本与输出共用）
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 源格式没有数量列，每条记录固定为 1
const RECORD_COUNT: &str = "1";

// ==========================================
// NormalizedSheet - 单表规范化结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSheet {
    pub label: String,                   // 工作表名称
    pub category_code: String,           // 类别码
    pub records: Vec<NormalizedRecord>,  // 顺序与源行一致
    pub dropped: Vec<DroppedRow>,        // 被跳过的行
}

pub struct RecordNormalizer<'a> {
    classifier: &'a SheetClassifier,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(classifier: &'a SheetClassifier) -> Self {
        Self { classifier }
    }

    /// 规范化一张工作表的全部行
    pub fn normalize(
        &self,
        sheet_label: &str,
        rows: &[RawRow],
        dictionary: &Dictionary,
    ) -> NormalizedSheet {
        let category_code = self.classifier.classify(sheet_label);

        let mut records = Vec::with_capacity(rows.len());
        let mut dropped = Vec::new();
        for row in rows {
            match Self::normalize_row(&category_code, row, dictionary) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    if let DropReason::NameNotFound(name) = &reason {
                        warn!("{}", t_with_args("export.name_not_found", &[("name", name)]));
                    }
                    warn!(
                        sheet = %sheet_label,
                        row = row.row_number,
                        "{}",
                        t_with_args(
                            "export.row_dropped",
                            &[
                                ("sheet", sheet_label),
                                ("row", &row.row_number.to_string()),
                                ("reason", &reason.message()),
                            ]
                        )
                    );
                    dropped.push(DroppedRow {
                        sheet: sheet_label.to_string(),
                        row_number: row.row_number,
                        reason,
                    });
                }
            }
        }

        debug!(
            sheet = %sheet_label,
            category = %category_code,
            records = records.len(),
            dropped = dropped.len(),
            "工作表规范化完成"
        );

        NormalizedSheet {
            label: sheet_label.to_string(),
            category_code,
            records,
            dropped,
        }
    }

    fn normalize_row(
        category_code: &str,
        row: &RawRow,
        dictionary: &Dictionary,
    ) -> Result<NormalizedRecord, DropReason> {
        let name = row
            .name
            .as_deref()
            .ok_or(DropReason::MissingField(COL_NAME))?;

        let item_id = match dictionary.lookup(name) {
            ItemLookup::Resolved(id) => id,
            ItemLookup::Unresolved => return Err(DropReason::NameNotFound(name.to_string())),
        };

        let time = format_time(&row.time)?;

        let pull_id = row
            .pull_id
            .as_deref()
            .ok_or(DropReason::MissingField(COL_PULL_ID))?;

        Ok(NormalizedRecord {
            uigf_gacha_type: category_code.to_string(),
            gacha_type: category_code.to_string(),
            item_id: item_id.to_string(),
            count: RECORD_COUNT.to_string(),
            time,
            name: name.to_string(),
            item_type: row.item_type.clone().unwrap_or_default(),
            rank_type: row.rank.clone().unwrap_or_default(),
            id: pull_id.to_string(),
        })
    }
}

/// 时间单元格 → "YYYY-MM-DD HH:MM:SS"
pub fn format_time(cell: &CellTime) -> Result<String, DropReason> {
    match cell {
        CellTime::Native(dt) => Ok(dt.format(TIME_FORMAT).to_string()),
        CellTime::Text(raw) => NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .map(|dt| dt.format(TIME_FORMAT).to_string())
            .map_err(|_| DropReason::InvalidTime(raw.clone())),
        CellTime::Missing => Err(DropReason::MissingTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetCategoryTable;

    fn classifier() -> SheetClassifier {
        SheetClassifier::new(SheetCategoryTable::genshin_default())
    }

    fn text_time(s: &str) -> CellTime {
        CellTime::Text(s.to_string())
    }

    fn full_row(row_number: usize, name: &str, time: CellTime) -> RawRow {
        RawRow {
            name: Some(name.to_string()),
            item_type: Some("角色".to_string()),
            rank: Some("5".to_string()),
            pull_id: Some(format!("17000000000000000{:02}", row_number)),
            time,
            row_number,
        }
    }

    #[test]
    fn test_three_row_scenario() {
        let dict = Dictionary::from_entries([("A", 10001), ("C", 10003)]);
        let rows = vec![
            full_row(1, "A", text_time("2024-01-01 10:00:00")),
            full_row(2, "B", text_time("2024-01-01 10:00:01")),
            full_row(3, "C", CellTime::Missing),
        ];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("角色活动祈愿", &rows, &dict);

        assert_eq!(sheet.records.len(), 1);
        let record = &sheet.records[0];
        assert_eq!(record.item_id, "10001");
        assert_eq!(record.uigf_gacha_type, "301");
        assert_eq!(record.gacha_type, "301");
        assert_eq!(record.count, "1");
        assert_eq!(record.time, "2024-01-01 10:00:00");
        assert_eq!(record.name, "A");
        assert_eq!(record.rank_type, "5");
        assert_eq!(record.id, "1700000000000000001");

        assert_eq!(sheet.dropped.len(), 2);
        assert_eq!(sheet.dropped[0].row_number, 2);
        assert_eq!(sheet.dropped[0].reason, DropReason::NameNotFound("B".to_string()));
        assert_eq!(sheet.dropped[1].row_number, 3);
        assert_eq!(sheet.dropped[1].reason, DropReason::MissingTime);
    }

    #[test]
    fn test_unknown_name_drops_every_reference_without_inserting() {
        let dict = Dictionary::from_entries([("A", 10001)]);
        let rows = vec![
            full_row(1, "X", text_time("2024-01-01 10:00:00")),
            full_row(2, "A", text_time("2024-01-01 10:00:01")),
            full_row(3, "X", text_time("2024-01-01 10:00:02")),
        ];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("常驻祈愿", &rows, &dict);

        assert_eq!(sheet.records.len(), 1);
        assert!(sheet.records.iter().all(|r| r.name != "X"));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.lookup("X"), ItemLookup::Unresolved);
    }

    #[test]
    fn test_order_preserved_after_drops() {
        let dict = Dictionary::from_entries([("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
        let rows = vec![
            full_row(1, "D", text_time("2024-01-01 10:00:03")),
            full_row(2, "A", CellTime::Text("yesterday".to_string())),
            full_row(3, "C", text_time("2024-01-01 10:00:01")),
            full_row(4, "B", text_time("2024-01-01 10:00:00")),
        ];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("常驻祈愿", &rows, &dict);

        let names: Vec<&str> = sheet.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D", "C", "B"]);
        assert_eq!(
            sheet.dropped[0].reason,
            DropReason::InvalidTime("yesterday".to_string())
        );
    }

    #[test]
    fn test_zero_id_in_dictionary_drops_row() {
        let dict = Dictionary::from_entries([("A", 0)]);
        let rows = vec![full_row(1, "A", text_time("2024-01-01 10:00:00"))];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("常驻祈愿", &rows, &dict);

        assert!(sheet.records.is_empty());
        assert!(sheet.records.iter().all(|r| r.item_id != "0"));
    }

    #[test]
    fn test_native_time_used_directly() {
        let dict = Dictionary::from_entries([("A", 10001)]);
        let dt = NaiveDateTime::parse_from_str("2023-12-31 23:59:59", TIME_FORMAT).unwrap();
        let rows = vec![full_row(1, "A", CellTime::Native(dt))];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("新手祈愿", &rows, &dict);

        assert_eq!(sheet.records[0].time, "2023-12-31 23:59:59");
        assert_eq!(sheet.records[0].gacha_type, "100");
    }

    #[test]
    fn test_missing_name_or_pull_id_dropped() {
        let dict = Dictionary::from_entries([("A", 10001)]);
        let mut no_name = full_row(1, "A", text_time("2024-01-01 10:00:00"));
        no_name.name = None;
        let mut no_id = full_row(2, "A", text_time("2024-01-01 10:00:00"));
        no_id.pull_id = None;

        let classifier = classifier();
        let sheet =
            RecordNormalizer::new(&classifier).normalize("常驻祈愿", &[no_name, no_id], &dict);

        assert!(sheet.records.is_empty());
        assert_eq!(sheet.dropped[0].reason, DropReason::MissingField(COL_NAME));
        assert_eq!(sheet.dropped[1].reason, DropReason::MissingField(COL_PULL_ID));
    }

    #[test]
    fn test_unknown_sheet_uses_fallback_code() {
        let dict = Dictionary::from_entries([("A", 10001)]);
        let rows = vec![full_row(1, "A", text_time("2024-01-01 10:00:00"))];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("Sheet1", &rows, &dict);

        assert_eq!(sheet.category_code, "500");
        assert_eq!(sheet.records[0].uigf_gacha_type, "500");
        assert_eq!(classifier.unknown_labels(), vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_duplicates_not_removed() {
        let dict = Dictionary::from_entries([("A", 10001)]);
        let rows = vec![
            full_row(1, "A", text_time("2024-01-01 10:00:00")),
            full_row(1, "A", text_time("2024-01-01 10:00:00")),
        ];

        let classifier = classifier();
        let sheet = RecordNormalizer::new(&classifier).normalize("常驻祈愿", &rows, &dict);
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[0], sheet.records[1]);
    }

    #[test]
    fn test_format_time_trims_text() {
        assert_eq!(
            format_time(&text_time(" 2024-01-01 10:00:00 ")).unwrap(),
            "2024-01-01 10:00:00"
        );
        assert!(format_time(&text_time("2024/01/01 10:00:00")).is_err());
    }
}
