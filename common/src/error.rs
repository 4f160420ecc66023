//! エラー型定義

use thiserror::Error;

/// 読み込みエラー
///
/// 読み込みに失敗しても既存のデータセットは変更しない。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{0}' not found in Excel")]
    MissingSheet(String),

    #[error("Unsupported file type: {0} (use .csv or .xlsx)")]
    UnsupportedFormat(String),

    #[error("No header row found")]
    MissingHeader,

    #[error("Invalid __row_order value {value:?} on row {row}")]
    InvalidOrder { row: usize, value: String },

    #[error("Duplicate __row_order value {value} on row {row}")]
    DuplicateOrder { row: usize, value: u32 },
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("No record is currently displayed")]
    NoRecord,

    #[error("Choose Y or N before saving")]
    FlagRequired,

    #[error("There are still {remaining} unfinished records (unlabeled); acknowledge before exporting")]
    ExportBlocked { remaining: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
