use anyhow::{Context, Result};
use chrono::Local;
use labeler_common::{default_export_file_name, loader, Dataset, ExportFormat, ExportOptions, Session};
use std::path::Path;

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = loader::load_path(path).with_context(|| format!("load {}", path.display()))?;
    Ok(dataset)
}

pub fn export_dataset(session: &Session, path: &Path, options: &ExportOptions) -> Result<()> {
    session
        .export_to(path, options)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn default_save_name(format: ExportFormat) -> String {
    default_export_file_name(Local::now().naive_local(), format)
}
