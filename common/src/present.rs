//! 表示用ヘルパー（状態を持たない純粋関数）

use crate::export::ExportFormat;
use crate::record::Record;
use crate::schema::{TagGroup, PLACEHOLDER};
use chrono::NaiveDateTime;
use std::borrow::Cow;

/// 列の値を取得。存在しない・空白のみの場合は "—"
pub fn get_or_blank<'a>(record: &'a Record, column: &str) -> Cow<'a, str> {
    match record.cell(column) {
        Some(value) if !value.trim().is_empty() => value,
        _ => Cow::Borrowed(PLACEHOLDER),
    }
}

/// URL を正規化（スキーム無しなら https:// を付与）
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// チートシートを1行にまとめる
pub fn cheat_sheet_line(group: TagGroup) -> String {
    let entries: Vec<String> = group
        .cheat_sheet()
        .iter()
        .map(|(name, hint)| format!("{}: {}", name, hint))
        .collect();
    format!("Cheat sheet — {}", entries.join(" • "))
}

/// "Record 2/10 · Fixed order #5"
pub fn record_heading(position: usize, view_len: usize, order: u32) -> String {
    format!("Record {}/{} · Fixed order #{}", position + 1, view_len, order)
}

/// 既定の出力ファイル名
pub fn default_export_file_name(now: NaiveDateTime, format: ExportFormat) -> String {
    format!(
        "classified_results_required_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("https://x.com"), "https://x.com");
        assert_eq!(normalize_url("HTTP://Upper.com"), "HTTP://Upper.com");
        assert_eq!(normalize_url("  www.acme.jp "), "https://www.acme.jp");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
        assert_eq!(normalize_url("—"), "");
    }

    #[test]
    fn test_get_or_blank() {
        let mut record = Record {
            company_name: "Acme Corp".into(),
            trade_description: "  ".into(),
            ..Default::default()
        };
        record.extra.insert("Country".into(), "".into());

        assert_eq!(get_or_blank(&record, "Company name Latin alphabet"), "Acme Corp");
        assert_eq!(get_or_blank(&record, "Trade description (English)"), "—");
        assert_eq!(get_or_blank(&record, "Website address"), "—");
        assert_eq!(get_or_blank(&record, "Country"), "—");
        assert_eq!(get_or_blank(&record, "No such column"), "—");
    }

    #[test]
    fn test_cheat_sheet_line() {
        let line = cheat_sheet_line(TagGroup::Functional);
        assert!(line.starts_with("Cheat sheet — Compound RF: RF front-end"));
        assert_eq!(line.matches(" • ").count(), 3);
    }

    #[test]
    fn test_record_heading() {
        assert_eq!(record_heading(0, 3, 7), "Record 1/3 · Fixed order #7");
    }

    #[test]
    fn test_default_export_file_name() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 18)
            .and_then(|d| d.and_hms_opt(9, 5, 3))
            .unwrap();
        assert_eq!(
            default_export_file_name(now, ExportFormat::Csv),
            "classified_results_required_20260118_090503.csv"
        );
        assert_eq!(
            default_export_file_name(now, ExportFormat::Xlsx),
            "classified_results_required_20260118_090503.xlsx"
        );
    }
}
