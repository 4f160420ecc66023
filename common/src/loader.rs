//! データ読み込み
//!
//! CSV（推奨）または Results シートを含む Excel からデータセットを構築する。
//!
//! 正規化の手順:
//! 1. 無名列（"Unnamed: N" や空ヘッダ）を除去
//! 2. 表示列・タグ列・フラグ列・メモ列が無ければ追加
//! 3. __row_order が無ければ行位置から 1..N を付与（あれば維持）
//! 4. order で安定ソート

use crate::dataset::Dataset;
use crate::error::LoadError;
use crate::record::{CsFlag, Record};
use crate::schema::{
    is_unnamed_column, ColumnKind, DisplayField, Tag, FLAG_COL, NOTES_COL, ORDER_COL,
};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Excel で必須のシート名
pub const RESULTS_SHEET: &str = "Results";

/// 拡張子で形式を判定して読み込み
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)?;
            load_csv(file)?
        }
        #[cfg(feature = "excel")]
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    debug!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// CSV を読み込み（UTF-8、BOM可、列数の揃わない行も許容）
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    build_dataset(headers, rows)
}

/// Excel の Results シートを読み込み
#[cfg(feature = "excel")]
pub fn load_workbook(path: &Path) -> Result<Dataset, LoadError> {
    use calamine::{open_workbook_auto, Reader};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Workbook(e.to_string()))?;

    if !workbook.sheet_names().iter().any(|name| name == RESULTS_SHEET) {
        return Err(LoadError::MissingSheet(RESULTS_SHEET.to_string()));
    }

    let range = workbook
        .worksheet_range(RESULTS_SHEET)
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::MissingHeader)?
        .iter()
        .map(cell_text)
        .collect();
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    build_dataset(headers, rows)
}

/// セルを文字列化（整数値の浮動小数は "3.0" ではなく "3"）
#[cfg(feature = "excel")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// ヘッダと行データからデータセットを構築
pub fn build_dataset(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Dataset, LoadError> {
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    // 無名列と重複列を除いた (元の位置, 列名)
    let mut seen = HashSet::new();
    let mut kept: Vec<(usize, String)> = Vec::new();
    for (i, name) in headers.into_iter().enumerate() {
        if is_unnamed_column(&name) {
            debug!(column = %name, "dropping unnamed column");
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!(column = %name, "duplicate column ignored");
            continue;
        }
        kept.push((i, name));
    }

    let mut columns: Vec<String> = kept.iter().map(|(_, name)| name.clone()).collect();
    let required = DisplayField::ALL
        .iter()
        .map(|f| f.column())
        .chain(Tag::ALL.iter().map(|t| t.column()))
        .chain([FLAG_COL, NOTES_COL]);
    for column in required {
        if !seen.contains(column) {
            columns.push(column.to_string());
        }
    }
    let order_present = seen.contains(ORDER_COL);
    if !order_present {
        columns.push(ORDER_COL.to_string());
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut orders = HashSet::new();
    let mut position = 0u32;
    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        position += 1;
        // ヘッダ行を1行目として数える
        let line = row_idx + 2;

        let mut record = Record {
            order: position,
            ..Default::default()
        };
        for (i, name) in &kept {
            let value = row.get(*i).map(String::as_str).unwrap_or("");
            match ColumnKind::of(name) {
                ColumnKind::Order => record.order = parse_order(value, line)?,
                ColumnKind::Display(field) => *record.display_mut(field) = value.to_string(),
                ColumnKind::Flag => {
                    record.flag = parse_flag(value, line);
                    let canonical = record.flag.map(CsFlag::as_str).unwrap_or("");
                    keep_raw(&mut record, name, value, canonical);
                }
                ColumnKind::Tag(tag) => {
                    let on = parse_tag(value, tag, line);
                    record.tags.set(tag, on);
                    keep_raw(&mut record, name, value, if on { "1" } else { "0" });
                }
                ColumnKind::Notes => record.notes = value.to_string(),
                ColumnKind::Extra => {
                    record.extra.insert(name.clone(), value.to_string());
                }
            }
        }
        if order_present && !orders.insert(record.order) {
            return Err(LoadError::DuplicateOrder {
                row: line,
                value: record.order,
            });
        }
        records.push(record);
    }

    Ok(Dataset::new(columns, records))
}

/// 正規形と異なる表記は書き出し用にそのまま残す
fn keep_raw(record: &mut Record, column: &str, value: &str, canonical: &str) {
    if value != canonical {
        record.raw.insert(column.to_string(), value.to_string());
    }
}

fn parse_order(value: &str, line: usize) -> Result<u32, LoadError> {
    let trimmed = value.trim();
    let invalid = || LoadError::InvalidOrder {
        row: line,
        value: value.to_string(),
    };

    if let Ok(n) = trimmed.parse::<u32>() {
        return if n == 0 { Err(invalid()) } else { Ok(n) };
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f >= 1.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(invalid()),
    }
}

fn parse_flag(value: &str, line: usize) -> Option<CsFlag> {
    if value.trim().is_empty() {
        return None;
    }
    match value.parse::<CsFlag>() {
        Ok(flag) => Some(flag),
        Err(_) => {
            warn!(row = line, value, "unrecognized {} value kept as-is", FLAG_COL);
            None
        }
    }
}

fn parse_tag(value: &str, tag: Tag, line: usize) -> bool {
    let trimmed = value.trim().to_lowercase();
    match trimmed.as_str() {
        "" | "0" | "false" | "no" | "n" => false,
        "1" | "true" | "yes" | "y" | "x" => true,
        other => match other.parse::<f64>() {
            Ok(n) => n != 0.0,
            Err(_) => {
                warn!(row = line, column = tag.column(), value, "unrecognized tag value kept as-is, counted as 0");
                false
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Company name Latin alphabet,Website address";

    #[test]
    fn test_assigns_order_by_row_position() {
        let csv = format!("{HEADER}\nAcme,acme.com\nBeta,beta.io\nGamma,\n");
        let dataset = load_csv(csv.as_bytes()).unwrap();

        let orders: Vec<u32> = dataset.records().iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(dataset.records()[1].company_name, "Beta");
        assert_eq!(dataset.remaining(), 3);
    }

    #[test]
    fn test_adds_missing_columns_in_order() {
        let csv = format!("{HEADER}\nAcme,acme.com\n");
        let dataset = load_csv(csv.as_bytes()).unwrap();
        let columns = dataset.columns();

        assert_eq!(columns[0], "Company name Latin alphabet");
        assert_eq!(columns[1], "Website address");
        assert_eq!(columns[2], "Trade description (English)");
        assert!(columns.iter().any(|c| c == "supply_chain_Equipment"));
        assert_eq!(columns[columns.len() - 3], "compound_semiconductor");
        assert_eq!(columns[columns.len() - 2], "notes");
        assert_eq!(columns[columns.len() - 1], "__row_order");
        // 7 + 10 + flag + notes + order
        assert_eq!(columns.len(), 20);
    }

    #[test]
    fn test_preserves_existing_order_and_sorts() {
        let csv = "__row_order,Company name Latin alphabet\n3,C\n1,A\n2.0,B\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();

        let names: Vec<&str> = dataset.records().iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        // 既存の順序列は元の位置を保つ
        assert_eq!(dataset.columns()[0], "__row_order");
    }

    #[test]
    fn test_invalid_order_is_load_error() {
        let csv = "__row_order,Company name Latin alphabet\n1,A\nx,B\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidOrder { row: 3, .. }));
    }

    #[test]
    fn test_drops_unnamed_columns() {
        let csv = ",Unnamed: 1,Company name Latin alphabet,Country\n0,x,Acme,JP\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();

        assert!(!dataset.columns().iter().any(|c| is_unnamed_column(c)));
        let record = &dataset.records()[0];
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.extra.get("Country").map(String::as_str), Some("JP"));
        assert_eq!(record.extra.len(), 1);
    }

    #[test]
    fn test_parses_existing_labels() {
        let csv = "compound_semiconductor,supply_chain_Substrate,functional_taxonomy_Compound RF,notes\n\
                   Y,1,0,checked\n\
                   ,0.0,,\n\
                   n,true,1,\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();
        let records = dataset.records();

        assert_eq!(records[0].flag, Some(CsFlag::Y));
        assert!(records[0].tags.get(Tag::Substrate));
        assert_eq!(records[0].notes, "checked");

        assert!(records[1].is_unlabeled());

        assert_eq!(records[2].flag, Some(CsFlag::N));
        assert!(records[2].tags.get(Tag::Substrate));
        assert!(records[2].tags.get(Tag::CompoundRf));
        assert_eq!(dataset.remaining(), 1);
    }

    #[test]
    fn test_unrecognized_flag_is_kept_verbatim() {
        let csv = "compound_semiconductor\nmaybe\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.flag, None);
        assert_eq!(record.cell("compound_semiconductor").as_deref(), Some("maybe"));
        assert!(!record.is_unlabeled());
    }

    #[test]
    fn test_only_non_canonical_cells_keep_raw_text() {
        let csv = "compound_semiconductor,supply_chain_Substrate,supply_chain_Package\n\
                   Y,1,0\n\
                   y,2,abc\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();
        let records = dataset.records();

        assert!(records[0].raw.is_empty());
        assert_eq!(records[1].flag, Some(CsFlag::Y));
        assert!(records[1].tags.get(Tag::Substrate));
        assert!(!records[1].tags.get(Tag::Package));
        assert_eq!(records[1].raw.get("compound_semiconductor").map(String::as_str), Some("y"));
        assert_eq!(records[1].raw.get("supply_chain_Substrate").map(String::as_str), Some("2"));
        assert_eq!(records[1].raw.get("supply_chain_Package").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_duplicate_order_is_load_error() {
        let csv = "__row_order,Company name Latin alphabet\n1,A\n1,B\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateOrder { row: 3, value: 1 }));
    }

    #[test]
    fn test_strips_bom_and_skips_blank_rows() {
        let csv = "\u{feff}Company name Latin alphabet,notes\nAcme,\n,\nBeta,x\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();

        assert_eq!(dataset.columns()[0], "Company name Latin alphabet");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].order, 2);
    }

    #[test]
    fn test_short_rows_default_to_blank() {
        let csv = "Company name Latin alphabet,Website address,notes\nAcme\n";
        let dataset = load_csv(csv.as_bytes()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.website, "");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_empty_header_is_error() {
        let err = build_dataset(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_path(Path::new("data.json")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }
}
