use crate::error::{LabelerError, Result};
use labeler_common::{ExportFormat, ExportOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 起動時に未ラベルのみ表示するか
    pub show_only_unlabeled: bool,
    /// __row_order 列を出力に含めるか
    pub include_order_column: bool,
    /// 出力先フォルダ（未設定ならカレント）
    pub output_dir: Option<PathBuf>,
    pub export_format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_only_unlabeled: true,
            include_order_column: true,
            output_dir: None,
            export_format: ExportFormat::Csv,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LabelerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("rewire-labeler").join("config.json"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.export_format,
            include_order_column: self.include_order_column,
        }
    }
}
