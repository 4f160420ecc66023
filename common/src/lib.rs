//! REWIRE Labeler Common Library
//!
//! CLIとデスクトップ版で共有されるラベリングセッションのコア。
//! UIを持たず、全ての状態遷移は Session のメソッドとして同期的に行う。

pub mod schema;
pub mod record;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod view;
pub mod session;
pub mod export;
pub mod present;

pub use schema::{DisplayField, Tag, TagGroup, FLAG_COL, NOTES_COL, ORDER_COL, PLACEHOLDER};
pub use record::{CsFlag, Record, TagSet};
pub use dataset::{Dataset, Summary};
pub use error::{Error, LoadError, Result};
pub use loader::{load_csv, load_path, RESULTS_SHEET};
pub use view::View;
pub use session::{Session, Slot, StagingBuffer};
pub use export::{ExportFormat, ExportGate, ExportOptions};
pub use present::{cheat_sheet_line, default_export_file_name, get_or_blank, normalize_url, record_heading};
