//! レコード型定義
//!
//! - CsFlag: 必須分類（Y / N）
//! - TagSet: 10種のタグの真偽値
//! - Record: 1行分のデータ（既知列は型付き、その他は extra に保持）

use crate::schema::{ColumnKind, DisplayField, Tag, FLAG_COL};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 化合物半導体フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsFlag {
    Y,
    N,
}

impl CsFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            CsFlag::Y => "Y",
            CsFlag::N => "N",
        }
    }
}

impl fmt::Display for CsFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CsFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(CsFlag::Y),
            "n" | "no" => Ok(CsFlag::N),
            _ => Err(format!("Unknown flag: {}. Use Y or N", s)),
        }
    }
}

/// タグの真偽値セット（Tag::index() でアクセス）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TagSet([bool; Tag::COUNT]);

impl TagSet {
    pub fn get(&self, tag: Tag) -> bool {
        self.0[tag.index()]
    }

    pub fn set(&mut self, tag: Tag, value: bool) {
        self.0[tag.index()] = value;
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&v| v)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&v| v).count()
    }

    /// 選択中のタグ
    pub fn selected(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::ALL.into_iter().filter(move |&t| self.get(t))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::default();
        for tag in iter {
            set.set(tag, true);
        }
        set
    }
}

/// 1レコード
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// 読み込み時に確定する固定順序（1始まり）
    pub order: u32,
    pub company_name: String,
    pub trade_description: String,
    pub description: String,
    pub website: String,
    pub primary_industry: String,
    pub secondary_industry: String,
    pub bvd_sectors: String,
    /// None = 未設定
    pub flag: Option<CsFlag>,
    pub tags: TagSet,
    pub notes: String,
    /// 既知でない列（列名 → 値）
    pub extra: HashMap<String, String>,
    /// フラグ・タグ列の元の表記（"y" や "2" など正規形でないもの）。保存で消える
    pub raw: HashMap<String, String>,
}

impl Record {
    pub fn display(&self, field: DisplayField) -> &str {
        match field {
            DisplayField::CompanyName => &self.company_name,
            DisplayField::TradeDescription => &self.trade_description,
            DisplayField::Description => &self.description,
            DisplayField::Website => &self.website,
            DisplayField::PrimaryIndustry => &self.primary_industry,
            DisplayField::SecondaryIndustry => &self.secondary_industry,
            DisplayField::BvdSectors => &self.bvd_sectors,
        }
    }

    pub fn display_mut(&mut self, field: DisplayField) -> &mut String {
        match field {
            DisplayField::CompanyName => &mut self.company_name,
            DisplayField::TradeDescription => &mut self.trade_description,
            DisplayField::Description => &mut self.description,
            DisplayField::Website => &mut self.website,
            DisplayField::PrimaryIndustry => &mut self.primary_industry,
            DisplayField::SecondaryIndustry => &mut self.secondary_industry,
            DisplayField::BvdSectors => &mut self.bvd_sectors,
        }
    }

    /// 未ラベル判定: タグがすべて false かつフラグ未設定
    ///
    /// 解釈できないフラグ値でも空でなければ設定済みとみなす。
    pub fn is_unlabeled(&self) -> bool {
        let raw_flag = self
            .raw
            .get(FLAG_COL)
            .is_some_and(|v| !v.trim().is_empty());
        !self.tags.any() && self.flag.is_none() && !raw_flag
    }

    /// 列名で値を取得（エクスポート形式の文字列）
    ///
    /// 既知列は常に値を返す。extra に存在しない列は None。
    pub fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        if let Some(raw) = self.raw.get(column) {
            return Some(Cow::Borrowed(raw));
        }
        match ColumnKind::of(column) {
            ColumnKind::Order => Some(Cow::Owned(self.order.to_string())),
            ColumnKind::Display(field) => Some(Cow::Borrowed(self.display(field))),
            ColumnKind::Flag => Some(Cow::Borrowed(self.flag.map(CsFlag::as_str).unwrap_or(""))),
            ColumnKind::Tag(tag) => Some(Cow::Borrowed(if self.tags.get(tag) { "1" } else { "0" })),
            ColumnKind::Notes => Some(Cow::Borrowed(&self.notes)),
            ColumnKind::Extra => self.extra.get(column).map(|v| Cow::Borrowed(v.as_str())),
        }
    }
}
