//! ラベリングセッション
//!
//! データセット・ビューのカーソル・編集中バッファ（staging buffer）を1つの構造体で所有し、
//! ユーザー操作ごとに同期的に状態遷移させる。
//!
//! - 編集は常に staging buffer に対して行い、Save でのみデータセットへ反映する
//! - 表示中レコードの order が変わったら staging buffer は白紙に戻る
//! - Save はフラグ（Y/N）未選択の間は拒否される

use crate::dataset::{Dataset, Summary};
use crate::error::{Error, Result};
use crate::export::{self, ExportGate, ExportOptions};
use crate::record::{CsFlag, Record, TagSet};
use crate::schema::Tag;
use crate::view::View;
use std::path::Path;
use tracing::debug;

/// 1レコード分の未確定の編集内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingBuffer {
    order: u32,
    pub flag: Option<CsFlag>,
    pub tags: TagSet,
    pub notes: String,
}

impl StagingBuffer {
    pub fn blank(order: u32) -> Self {
        Self {
            order,
            flag: None,
            tags: TagSet::default(),
            notes: String::new(),
        }
    }

    /// 対象レコードの order
    pub fn order(&self) -> u32 {
        self.order
    }
}

/// 表示スロットの状態
#[derive(Debug)]
pub enum Slot<'a> {
    /// ビューが空
    NoRecordLoaded,
    Viewing {
        /// ビュー内の位置（0始まり）
        position: usize,
        view_len: usize,
        record: &'a Record,
        staged: &'a StagingBuffer,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    cursor: usize,
    show_only_unlabeled: bool,
    staged: Option<StagingBuffer>,
    export_acknowledged: bool,
}

impl Session {
    pub fn new(dataset: Dataset, show_only_unlabeled: bool) -> Self {
        Self {
            dataset,
            cursor: 0,
            show_only_unlabeled,
            staged: None,
            export_acknowledged: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// 再読み込み成功時のみ呼ぶ。カーソル・編集内容・確認状態はリセット
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.cursor = 0;
        self.staged = None;
        self.export_acknowledged = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn view(&self) -> View {
        View::build(&self.dataset, self.show_only_unlabeled)
    }

    pub fn show_only_unlabeled(&self) -> bool {
        self.show_only_unlabeled
    }

    pub fn set_show_only_unlabeled(&mut self, value: bool) {
        self.show_only_unlabeled = value;
    }

    pub fn staged(&self) -> Option<&StagingBuffer> {
        self.staged.as_ref()
    }

    /// カーソルを丸め、表示中レコードに staging buffer を合わせる
    fn sync(&mut self) -> Option<u32> {
        let view = self.view();
        self.cursor = view.clamp(self.cursor);
        let Some(order) = view.get(self.cursor) else {
            self.staged = None;
            return None;
        };
        if self.staged.as_ref().map(StagingBuffer::order) != Some(order) {
            debug!(order, "staging buffer initialized");
            self.staged = Some(StagingBuffer::blank(order));
        }
        Some(order)
    }

    /// 現在のレコードを表示状態にする（同じレコードなら何もしない）
    pub fn load_record(&mut self) -> Slot<'_> {
        let view_len = self.view().len();
        let Some(order) = self.sync() else {
            return Slot::NoRecordLoaded;
        };
        match (self.dataset.get(order), self.staged.as_ref()) {
            (Some(record), Some(staged)) => Slot::Viewing {
                position: self.cursor,
                view_len,
                record,
                staged,
            },
            _ => Slot::NoRecordLoaded,
        }
    }

    /// 表示中のレコード（状態は変更しない）
    pub fn current(&self) -> Option<&Record> {
        let view = self.view();
        view.get(view.clamp(self.cursor))
            .and_then(|order| self.dataset.get(order))
    }

    fn staged_mut(&mut self) -> Result<&mut StagingBuffer> {
        self.sync();
        self.staged.as_mut().ok_or(Error::NoRecord)
    }

    pub fn set_flag(&mut self, flag: Option<CsFlag>) -> Result<()> {
        self.staged_mut()?.flag = flag;
        Ok(())
    }

    pub fn toggle_tag(&mut self, tag: Tag, value: bool) -> Result<()> {
        self.staged_mut()?.tags.set(tag, value);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.staged_mut()?.notes = notes.into();
        Ok(())
    }

    /// Save ボタンを有効にできるか
    pub fn can_save(&self) -> bool {
        let Some(record) = self.current() else {
            return false;
        };
        self.staged
            .as_ref()
            .is_some_and(|s| s.order == record.order && s.flag.is_some())
    }

    pub fn prev(&mut self) {
        let view = self.view();
        self.cursor = view.clamp(self.cursor).saturating_sub(1);
        self.staged = None;
    }

    /// 記録せずに次へ（データセットは変更しない）
    pub fn skip(&mut self) {
        let view = self.view();
        if let Some(last) = view.len().checked_sub(1) {
            self.cursor = (view.clamp(self.cursor) + 1).min(last);
        }
        self.staged = None;
    }

    /// staging buffer を表示中レコードへ反映して次へ進む
    ///
    /// カーソルは保存前のビューに対して進める。戻り値は保存したレコードの order。
    pub fn save(&mut self) -> Result<u32> {
        let view = self.view();
        let order = self.sync().ok_or(Error::NoRecord)?;
        let flag = self
            .staged
            .as_ref()
            .and_then(|s| s.flag)
            .ok_or(Error::FlagRequired)?;
        let staged = self.staged.take().ok_or(Error::NoRecord)?;

        let record = self.dataset.get_mut(order).ok_or(Error::NoRecord)?;
        record.flag = Some(flag);
        record.tags = staged.tags;
        record.notes = staged.notes;
        record.raw.clear();

        self.cursor = (self.cursor + 1).min(view.len().saturating_sub(1));
        debug!(order, flag = %flag, tags = record.tags.count(), "record saved");
        Ok(order)
    }

    pub fn remaining(&self) -> usize {
        self.dataset.remaining()
    }

    pub fn summary(&self) -> Summary {
        self.dataset.summary()
    }

    pub fn export_acknowledged(&self) -> bool {
        self.export_acknowledged
    }

    /// 未ラベルが残っていてもエクスポートを許可する
    pub fn set_export_acknowledged(&mut self, value: bool) {
        self.export_acknowledged = value;
    }

    pub fn export_gate(&self) -> ExportGate {
        ExportGate {
            remaining: self.remaining(),
            acknowledged: self.export_acknowledged,
        }
    }

    /// CSV バイト列を生成（ゲートを通過した場合のみ）
    pub fn export_csv_bytes(&self, options: &ExportOptions) -> Result<Vec<u8>> {
        self.export_gate().check()?;
        export::to_csv_bytes(&self.dataset, options)
    }

    /// ファイルへ書き出し（ゲートを通過した場合のみ）
    pub fn export_to(&self, path: &Path, options: &ExportOptions) -> Result<()> {
        self.export_gate().check()?;
        export::write_file(&self.dataset, path, options)
    }
}
