//! エクスポート
//!
//! 全レコード（未ラベル行も含む）をそのまま書き出す。
//! 未ラベルが残っている場合は確認（acknowledgment）が無い限りブロックする。

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::schema::{ColumnKind, ORDER_COL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// 出力パスの拡張子から判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Unknown format: {}. Use csv or xlsx", s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 書き出しオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// __row_order 列を出力に含めるか
    pub include_order_column: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_order_column: true,
        }
    }
}

/// エクスポート可否の判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportGate {
    /// データセット全体の未ラベル件数
    pub remaining: usize,
    pub acknowledged: bool,
}

impl ExportGate {
    pub fn is_enabled(&self) -> bool {
        self.remaining == 0 || self.acknowledged
    }

    /// 確認トグルを表示すべきか
    pub fn needs_acknowledgment(&self) -> bool {
        self.remaining > 0
    }

    pub fn warning(&self) -> Option<String> {
        self.needs_acknowledgment().then(|| {
            format!(
                "There are still {} unfinished records (unlabeled). Exporting now will include them as blanks.",
                self.remaining
            )
        })
    }

    pub fn check(&self) -> Result<()> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(Error::ExportBlocked {
                remaining: self.remaining,
            })
        }
    }
}

/// 出力する列
pub fn export_columns<'a>(dataset: &'a Dataset, options: &ExportOptions) -> Vec<&'a str> {
    dataset
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| options.include_order_column || *c != ORDER_COL)
        .collect()
}

/// CSV（UTF-8 BOM付き）で書き出し
pub fn write_csv<W: Write>(dataset: &Dataset, mut writer: W, options: &ExportOptions) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let columns = export_columns(dataset, options);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;
    for record in dataset.records() {
        let row = columns
            .iter()
            .map(|c| record.cell(c).unwrap_or_default());
        csv_writer.write_record(row.map(|v| v.into_owned()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer, options)?;
    Ok(buffer)
}

/// Excel（Results シート）で書き出し。再読み込み可能な形式
#[cfg(feature = "excel")]
pub fn write_xlsx(dataset: &Dataset, path: &Path, options: &ExportOptions) -> Result<()> {
    use crate::loader::RESULTS_SHEET;
    use rust_xlsxwriter::Workbook;

    let columns = export_columns(dataset, options);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULTS_SHEET)?;

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (i, record) in dataset.records().iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, name) in columns.iter().enumerate() {
            let col = col as u16;
            match ColumnKind::of(name) {
                ColumnKind::Order => {
                    worksheet.write_number(row, col, f64::from(record.order))?;
                }
                ColumnKind::Tag(_) => {
                    let value = record.cell(name).unwrap_or_default();
                    if let Ok(number) = value.trim().parse::<f64>() {
                        worksheet.write_number(row, col, number)?;
                    } else if !value.is_empty() {
                        worksheet.write_string(row, col, &*value)?;
                    }
                }
                _ => {
                    let value = record.cell(name).unwrap_or_default();
                    if !value.is_empty() {
                        worksheet.write_string(row, col, &*value)?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// 形式に応じてファイルへ書き出し
pub fn write_file(dataset: &Dataset, path: &Path, options: &ExportOptions) -> Result<()> {
    match options.format {
        ExportFormat::Csv => {
            let file = std::fs::File::create(path)?;
            write_csv(dataset, std::io::BufWriter::new(file), options)?;
        }
        #[cfg(feature = "excel")]
        ExportFormat::Xlsx => write_xlsx(dataset, path, options)?,
        #[cfg(not(feature = "excel"))]
        ExportFormat::Xlsx => {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "xlsx export requires the `excel` feature",
            )))
        }
    }
    debug!(path = %path.display(), format = %options.format, rows = dataset.len(), "exported");
    Ok(())
}
