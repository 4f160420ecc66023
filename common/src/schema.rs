//! 列スキーマ定義
//!
//! 入力テーブルで参照する列名・タグ列・チートシートをまとめて定義する。
//! 列名は大文字小文字を含め完全一致で扱う。

/// 読み込み時に付与する固定順序列
pub const ORDER_COL: &str = "__row_order";

/// 必須分類列（"Y" / "N" / 空）
pub const FLAG_COL: &str = "compound_semiconductor";

/// 自由記述メモ列
pub const NOTES_COL: &str = "notes";

/// 空欄表示用のプレースホルダ
pub const PLACEHOLDER: &str = "—";

/// 表示専用の固定列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    CompanyName,
    TradeDescription,
    Description,
    Website,
    PrimaryIndustry,
    SecondaryIndustry,
    BvdSectors,
}

impl DisplayField {
    /// 読み込み時に不足分を補う順序
    pub const ALL: [DisplayField; 7] = [
        DisplayField::CompanyName,
        DisplayField::TradeDescription,
        DisplayField::Description,
        DisplayField::Website,
        DisplayField::PrimaryIndustry,
        DisplayField::SecondaryIndustry,
        DisplayField::BvdSectors,
    ];

    pub fn column(self) -> &'static str {
        match self {
            DisplayField::CompanyName => "Company name Latin alphabet",
            DisplayField::TradeDescription => "Trade description (English)",
            DisplayField::Description => "Description and history",
            DisplayField::Website => "Website address",
            DisplayField::PrimaryIndustry => {
                "Primary code in national industry classification - description"
            }
            DisplayField::SecondaryIndustry => {
                "Secondary code in national industry classification - description"
            }
            DisplayField::BvdSectors => "BvD sectors",
        }
    }

    /// 画面表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            DisplayField::CompanyName => "Company",
            DisplayField::TradeDescription => "Trade description (English)",
            DisplayField::Description => "Description and history",
            DisplayField::Website => "Website",
            DisplayField::PrimaryIndustry => "Primary industry (desc)",
            DisplayField::SecondaryIndustry => "Secondary industry (desc)",
            DisplayField::BvdSectors => "BvD sectors",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }
}

/// タグのグループ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    SupplyChain,
    Functional,
}

impl TagGroup {
    pub const ALL: [TagGroup; 2] = [TagGroup::SupplyChain, TagGroup::Functional];

    pub fn title(self) -> &'static str {
        match self {
            TagGroup::SupplyChain => "Supply chain",
            TagGroup::Functional => "Functional taxonomy",
        }
    }

    /// 列名のプレフィックス
    pub fn prefix(self) -> &'static str {
        match self {
            TagGroup::SupplyChain => "supply_chain_",
            TagGroup::Functional => "functional_taxonomy_",
        }
    }

    pub fn tags(self) -> &'static [Tag] {
        match self {
            TagGroup::SupplyChain => &Tag::ALL[..6],
            TagGroup::Functional => &Tag::ALL[6..],
        }
    }

    /// キーワードのヒント（短縮名 → 例）
    pub fn cheat_sheet(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TagGroup::SupplyChain => CHEATS_SUPPLY,
            TagGroup::Functional => CHEATS_FUNCTIONAL,
        }
    }
}

const CHEATS_SUPPLY: &[(&str, &str)] = &[
    ("Substrate", "SiC/GaN/GaAs/InP wafers, substrates, boules, ingots; wafer slicing/polishing."),
    ("Epiwafer", "Epitaxy, MOCVD/MBE, epitaxial wafers, epi services, homo/heteroepitaxy."),
    ("Device_Design", "Fabless design, IC/device design, circuit design, PDK, reference design."),
    ("Chip_Processing", "Wafer fab/foundry, lithography, etch, deposition (CVD/PVD/ALD), implant, CMP."),
    ("Package", "Assembly/OSAT, bumping, dicing, wirebond/flip-chip, testing/ATE."),
    (
        "Equipment",
        "MOCVD/MBE tools, lithography systems, etchers, CVD/PVD/ALD, implanters, CMP, metrology/inspection, furnaces.",
    ),
];

const CHEATS_FUNCTIONAL: &[(&str, &str)] = &[
    ("Compound RF", "RF front-end, PA, GaAs PHEMT, GaN HEMT, LNA, switch, mmWave."),
    ("Compound Photonic", "LED, laser diode, VCSEL, LiDAR, photonics, optical transceiver."),
    ("Compound Sensors", "Photodetector, IR sensor, image/ToF/UV sensors (compound materials)."),
    ("Power Devices", "SiC diode/MOSFET, GaN HEMT, power rectifier, power electronics."),
];

/// 複数選択タグ（10種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Substrate,
    Epiwafer,
    DeviceDesign,
    ChipProcessing,
    Package,
    Equipment,
    CompoundRf,
    CompoundPhotonic,
    CompoundSensors,
    PowerDevices,
}

impl Tag {
    pub const COUNT: usize = 10;

    pub const ALL: [Tag; Tag::COUNT] = [
        Tag::Substrate,
        Tag::Epiwafer,
        Tag::DeviceDesign,
        Tag::ChipProcessing,
        Tag::Package,
        Tag::Equipment,
        Tag::CompoundRf,
        Tag::CompoundPhotonic,
        Tag::CompoundSensors,
        Tag::PowerDevices,
    ];

    /// TagSet 内のインデックス
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn group(self) -> TagGroup {
        if self.index() < 6 {
            TagGroup::SupplyChain
        } else {
            TagGroup::Functional
        }
    }

    /// プレフィックスを除いた短縮名
    pub fn label(self) -> &'static str {
        match self {
            Tag::Substrate => "Substrate",
            Tag::Epiwafer => "Epiwafer",
            Tag::DeviceDesign => "Device_Design",
            Tag::ChipProcessing => "Chip_Processing",
            Tag::Package => "Package",
            Tag::Equipment => "Equipment",
            Tag::CompoundRf => "Compound RF",
            Tag::CompoundPhotonic => "Compound Photonic",
            Tag::CompoundSensors => "Compound Sensors",
            Tag::PowerDevices => "Power Devices",
        }
    }

    /// 完全な列名
    pub fn column(self) -> &'static str {
        match self {
            Tag::Substrate => "supply_chain_Substrate",
            Tag::Epiwafer => "supply_chain_Epiwafer",
            Tag::DeviceDesign => "supply_chain_Device_Design",
            Tag::ChipProcessing => "supply_chain_Chip_Processing",
            Tag::Package => "supply_chain_Package",
            Tag::Equipment => "supply_chain_Equipment",
            Tag::CompoundRf => "functional_taxonomy_Compound RF",
            Tag::CompoundPhotonic => "functional_taxonomy_Compound Photonic",
            Tag::CompoundSensors => "functional_taxonomy_Compound Sensors",
            Tag::PowerDevices => "functional_taxonomy_Power Devices",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.column() == name)
    }
}

/// 列名の分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Order,
    Display(DisplayField),
    Flag,
    Tag(Tag),
    Notes,
    Extra,
}

impl ColumnKind {
    pub fn of(name: &str) -> Self {
        if name == ORDER_COL {
            ColumnKind::Order
        } else if name == FLAG_COL {
            ColumnKind::Flag
        } else if name == NOTES_COL {
            ColumnKind::Notes
        } else if let Some(field) = DisplayField::from_column(name) {
            ColumnKind::Display(field)
        } else if let Some(tag) = Tag::from_column(name) {
            ColumnKind::Tag(tag)
        } else {
            ColumnKind::Extra
        }
    }
}

/// 位置情報のみの無名列か（"Unnamed: 0" や空ヘッダ）
pub fn is_unnamed_column(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.to_lowercase().starts_with("unnamed")
}
