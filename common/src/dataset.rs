//! データセット
//!
//! レコード列とエクスポート時の列順を保持する。
//! レコードは固定順序（order）で昇順に並び、order がレコードの唯一の識別子となる。

use crate::record::Record;
use crate::schema::{DisplayField, Tag, FLAG_COL, NOTES_COL, ORDER_COL};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

/// 進捗の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub labeled: usize,
    pub remaining: usize,
}

impl Summary {
    /// ラベル済みの割合（0.0〜1.0）
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.labeled as f32 / self.total as f32
    }
}

impl Dataset {
    /// 列順とレコードから構築（order で安定ソート）
    pub(crate) fn new(columns: Vec<String>, mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.order);
        Self { columns, records }
    }

    /// 既知列のみのデータセットを構築
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(standard_columns(), records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// order からデータセット内の位置を探す
    pub fn position_of(&self, order: u32) -> Option<usize> {
        self.records.iter().position(|r| r.order == order)
    }

    pub fn get(&self, order: u32) -> Option<&Record> {
        self.position_of(order).map(|i| &self.records[i])
    }

    /// 変更はセッションの保存操作からのみ行う
    pub(crate) fn get_mut(&mut self, order: u32) -> Option<&mut Record> {
        self.position_of(order).map(move |i| &mut self.records[i])
    }

    /// 未ラベル件数（フィルタに関係なく全件から数える）
    pub fn remaining(&self) -> usize {
        self.records.iter().filter(|r| r.is_unlabeled()).count()
    }

    pub fn summary(&self) -> Summary {
        let remaining = self.remaining();
        Summary {
            total: self.len(),
            labeled: self.len() - remaining,
            remaining,
        }
    }
}

/// 既知列の標準順序
pub fn standard_columns() -> Vec<String> {
    DisplayField::ALL
        .iter()
        .map(|f| f.column())
        .chain(Tag::ALL.iter().map(|t| t.column()))
        .chain([FLAG_COL, NOTES_COL, ORDER_COL])
        .map(str::to_string)
        .collect()
}
