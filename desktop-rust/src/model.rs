use labeler_common::{ExportOptions, Session};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub source_path: Option<PathBuf>,
    /// 出力ファイル名（既定は日時入り）
    pub save_name: String,
    pub options: ExportOptions,
}

/// 描画中に集めて、描画後にまとめて適用する操作
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetFlag(Option<labeler_common::CsFlag>),
    ToggleTag(labeler_common::Tag, bool),
    SetNotes(String),
    Prev,
    Skip,
    Save,
    SetFilter(bool),
    SetAcknowledged(bool),
    Export,
}
