//! 表示ビュー
//!
//! データセットを「全件」または「未ラベルのみ」で絞り込み、0始まりで振り直した射影。
//! データセットが変わりうるため描画・操作のたびに作り直す。

use crate::dataset::Dataset;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    orders: Vec<u32>,
    only_unlabeled: bool,
}

impl View {
    pub fn build(dataset: &Dataset, show_only_unlabeled: bool) -> Self {
        let orders = dataset
            .records()
            .iter()
            .filter(|r| !show_only_unlabeled || r.is_unlabeled())
            .map(|r| r.order)
            .collect();
        Self {
            orders,
            only_unlabeled: show_only_unlabeled,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// ビュー内の位置 → order
    pub fn get(&self, index: usize) -> Option<u32> {
        self.orders.get(index).copied()
    }

    pub fn orders(&self) -> &[u32] {
        &self.orders
    }

    pub fn is_filtered(&self) -> bool {
        self.only_unlabeled
    }

    /// 範囲外のカーソルは 0 に戻す
    pub fn clamp(&self, cursor: usize) -> usize {
        if cursor >= self.len() {
            0
        } else {
            cursor
        }
    }
}
