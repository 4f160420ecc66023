//! REWIRE Labeler
//!
//! 企業プロファイルを1件ずつ確認し、化合物半導体フラグ（Y/N 必須）と
//! サプライチェーン/機能分類タグを付与して書き出すCLI

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod labeling;
