//! エクスポート（CLI版）
//!
//! 出力パス・形式の決定と、ゲート付きの書き出し

use crate::error::Result;
use chrono::NaiveDateTime;
use labeler_common::{default_export_file_name, ExportFormat, ExportOptions, Session};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 出力形式を決定: 明示指定 > 出力パスの拡張子 > 設定値
pub fn resolve_format(
    explicit: Option<ExportFormat>,
    output: Option<&Path>,
    fallback: ExportFormat,
) -> ExportFormat {
    explicit
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or(fallback)
}

/// 出力パスを決定（フォルダ指定・省略時は日時入りの既定名）
pub fn resolve_output_path(
    output: Option<&Path>,
    output_dir: &Path,
    format: ExportFormat,
    now: NaiveDateTime,
) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_export_file_name(now, format)),
        Some(path) => path.to_path_buf(),
        None => output_dir.join(default_export_file_name(now, format)),
    }
}

/// セッションの内容を書き出し（未ラベルが残る場合は確認済みであること）
pub fn export_session(session: &Session, path: &Path, options: &ExportOptions) -> Result<()> {
    println!("- {}を書き出し中...", options.format.extension().to_uppercase());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    session.export_to(path, options)?;
    debug!(path = %path.display(), format = %options.format, "export written");

    let summary = session.summary();
    println!(
        "✔ 出力: {} ({}件, 未ラベル{}件)",
        path.display(),
        summary.total,
        summary.remaining
    );
    Ok(())
}

/// convert コマンド用。未ラベルが残り --force も無ければ書き出し前に中止する
pub fn convert_session(
    session: &mut Session,
    path: &Path,
    options: &ExportOptions,
    force: bool,
) -> Result<()> {
    session.set_export_acknowledged(force);
    let gate = session.export_gate();
    if let Some(warning) = gate.warning() {
        println!("⚠ {}", warning);
        if !force {
            println!("  --force を指定すると未ラベルのまま書き出します");
        }
    }
    gate.check()?;
    export_session(session, path, options)
}
