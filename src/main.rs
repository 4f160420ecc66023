use chrono::Local;
use clap::Parser;
use labeler_common::{loader, ExportOptions, Session};
use rewire_labeler::{cli, config, error, export, labeling};
use cli::{Cli, Commands};
use config::Config;
use error::{LabelerError, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Label { input, output, all, format, no_order_column } => {
            println!("🏷  rewire-labeler - ラベリング\n");

            println!("[1/2] データを読み込み中...");
            let dataset = load_input(&input)?;
            println!("✔ {}件のレコードを読み込みました\n", dataset.len());

            let format = export::resolve_format(format, output.as_deref(), config.export_format);
            let path = export::resolve_output_path(
                output.as_deref(),
                &config.output_dir(),
                format,
                Local::now().naive_local(),
            );
            let target = labeling::ExportTarget {
                path: &path,
                options: ExportOptions {
                    format,
                    include_order_column: config.include_order_column && !no_order_column,
                },
            };

            println!("[2/2] ラベリング");
            let show_only_unlabeled = config.show_only_unlabeled && !all;
            let mut session = Session::new(dataset, show_only_unlabeled);
            labeling::run_label_session(&mut session, &target)?;

            let summary = session.summary();
            println!(
                "\n✅ ラベル済み {}/{}（残り{}件）",
                summary.labeled, summary.total, summary.remaining
            );
        }

        Commands::Stats { input } => {
            let dataset = load_input(&input)?;
            let summary = dataset.summary();
            println!("進捗: {}", input.display());
            println!("  レコード数: {}", summary.total);
            println!("  ラベル済み: {}", summary.labeled);
            println!("  残り: {}", summary.remaining);
            println!("  進捗率: {:.1}%", summary.progress() * 100.0);
        }

        Commands::Convert { input, output, format, force, no_order_column } => {
            println!("📄 rewire-labeler - 変換\n");

            let dataset = load_input(&input)?;
            println!("✔ {}件のレコードを読み込みました", dataset.len());

            let format = export::resolve_format(format, output.as_deref(), config.export_format);
            let path = export::resolve_output_path(
                output.as_deref(),
                &config.output_dir(),
                format,
                Local::now().naive_local(),
            );
            let options = ExportOptions {
                format,
                include_order_column: config.include_order_column && !no_order_column,
            };

            let mut session = Session::new(dataset, false);
            export::convert_session(&mut session, &path, &options, force)?;

            println!("\n✅ 変換完了");
        }

        Commands::Config {
            show,
            set_output_dir,
            include_order_column,
            show_only_unlabeled,
            export_format,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if let Some(value) = include_order_column {
                config.include_order_column = value;
                changed = true;
            }
            if let Some(value) = show_only_unlabeled {
                config.show_only_unlabeled = value;
                changed = true;
            }
            if let Some(value) = export_format {
                config.export_format = value;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  未ラベルのみ表示: {}", config.show_only_unlabeled);
                println!("  __row_order を出力: {}", config.include_order_column);
                println!("  出力先: {}", config.output_dir().display());
                println!("  出力形式: {}", config.export_format);
            }
        }
    }

    Ok(())
}

fn load_input(input: &Path) -> Result<labeler_common::Dataset> {
    if !input.exists() {
        return Err(LabelerError::FileNotFound(input.display().to_string()));
    }
    Ok(loader::load_path(input)?)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
