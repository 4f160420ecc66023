use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] labeler_common::Error),
}

impl From<labeler_common::LoadError> for LabelerError {
    fn from(err: labeler_common::LoadError) -> Self {
        LabelerError::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, LabelerError>;
