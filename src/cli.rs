use clap::{Parser, Subcommand};
use labeler_common::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rewire-labeler")]
#[command(about = "REWIRE Compound Semiconductor Classification (Y/N 必須ラベリング)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1件ずつ対話的にラベル付け
    Label {
        /// 入力ファイル（CSV 推奨、または Results シートを含む Excel）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（省略時は出力先フォルダ/classified_results_required_<日時>.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ラベル済みも含めて全件表示
        #[arg(long)]
        all: bool,

        /// 出力形式 (csv/xlsx)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// __row_order 列を出力しない
        #[arg(long)]
        no_order_column: bool,
    },

    /// 進捗（ラベル済み/残り）を表示
    Stats {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 読み込み・正規化した表をそのまま書き出し
    Convert {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/xlsx)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 未ラベルが残っていても書き出す
        #[arg(long)]
        force: bool,

        /// __row_order 列を出力しない
        #[arg(long)]
        no_order_column: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 出力先フォルダを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// __row_order 列を出力するか (true/false)
        #[arg(long)]
        include_order_column: Option<bool>,

        /// 起動時に未ラベルのみ表示するか (true/false)
        #[arg(long)]
        show_only_unlabeled: Option<bool>,

        /// 既定の出力形式 (csv/xlsx)
        #[arg(long)]
        export_format: Option<ExportFormat>,
    },
}
