//! ラベリングセッションのエンドツーエンドテスト
//!
//! 読み込み → 未ラベル絞り込み → 保存/スキップ → エクスポートまでの流れを検証

use labeler_common::{
    load_csv, CsFlag, Error, ExportOptions, Session, Slot, Tag,
};

const INPUT: &str = "\
Company name Latin alphabet,Website address
Alpha Semi,alpha.example
Beta Photonics,https://beta.example
Gamma Tools,
";

fn current_order(session: &mut Session) -> Option<u32> {
    match session.load_record() {
        Slot::Viewing { record, .. } => Some(record.order),
        Slot::NoRecordLoaded => None,
    }
}

fn exported_rows(bytes: &[u8]) -> Vec<Vec<String>> {
    let text = std::str::from_utf8(bytes).expect("UTF-8");
    let text = text.strip_prefix('\u{feff}').expect("BOM");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|r| r.expect("CSV行").iter().map(str::to_string).collect())
        .collect()
}

/// 3件のテーブルを一通り処理する
#[test]
fn test_end_to_end_labeling() {
    let dataset = load_csv(INPUT.as_bytes()).expect("読み込み失敗");
    let orders: Vec<u32> = dataset.records().iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    let mut session = Session::new(dataset, true);
    assert_eq!(session.view().len(), 3);
    assert_eq!(session.remaining(), 3);

    // レコード1: Y + サプライチェーンタグ1つで保存
    assert_eq!(current_order(&mut session), Some(1));
    session.set_flag(Some(CsFlag::Y)).unwrap();
    session.toggle_tag(Tag::Substrate, true).unwrap();
    assert_eq!(session.save().unwrap(), 1);
    assert_eq!(session.remaining(), 2);

    // 保存前のビューでカーソルが進むため、絞り込み後は #3 を指す。Prev で #2 へ戻る
    assert_eq!(current_order(&mut session), Some(3));
    session.prev();
    assert_eq!(current_order(&mut session), Some(2));

    // レコード2: 編集してからスキップ → 変更されない
    session.set_flag(Some(CsFlag::N)).unwrap();
    session.toggle_tag(Tag::Package, true).unwrap();
    session.set_notes("draft").unwrap();
    session.skip();
    assert_eq!(session.cursor(), 1);
    let record2 = session.dataset().get(2).unwrap();
    assert!(record2.is_unlabeled());
    assert_eq!(record2.notes, "");
    assert_eq!(session.remaining(), 2);

    // 未ラベルが残る間は確認が必要
    let options = ExportOptions::default();
    let gate = session.export_gate();
    assert_eq!(gate.remaining, 2);
    assert!(!gate.is_enabled());
    assert!(matches!(
        session.export_csv_bytes(&options),
        Err(Error::ExportBlocked { remaining: 2 })
    ));

    session.set_export_acknowledged(true);
    assert!(session.export_gate().is_enabled());
    let bytes = session.export_csv_bytes(&options).expect("エクスポート失敗");

    let rows = exported_rows(&bytes);
    assert_eq!(rows.len(), 4, "ヘッダ + 3行");
    let header = &rows[0];
    let col = |name: &str| header.iter().position(|h| h == name).expect(name);
    let flag = col("compound_semiconductor");
    let substrate = col("supply_chain_Substrate");
    let order = col("__row_order");

    assert_eq!(rows[1][flag], "Y");
    assert_eq!(rows[1][substrate], "1");
    for row in &rows[2..] {
        assert_eq!(row[flag], "");
        for tag in Tag::ALL {
            assert_eq!(row[col(tag.column())], "0", "{}", tag.column());
        }
    }
    let exported_orders: Vec<&str> = rows[1..].iter().map(|r| r[order].as_str()).collect();
    assert_eq!(exported_orders, vec!["1", "2", "3"]);
}

/// 保存後は全タグが 0/1、フラグが Y/N になる
#[test]
fn test_saved_record_has_complete_labels() {
    let dataset = load_csv(INPUT.as_bytes()).unwrap();
    let mut session = Session::new(dataset, false);
    session.set_flag(Some(CsFlag::N)).unwrap();
    session.save().unwrap();

    session.set_export_acknowledged(true);
    let rows = exported_rows(&session.export_csv_bytes(&ExportOptions::default()).unwrap());
    let header = &rows[0];
    let first = &rows[1];
    for (name, value) in header.iter().zip(first) {
        if name.starts_with("supply_chain_") || name.starts_with("functional_taxonomy_") {
            assert!(value == "0" || value == "1");
        }
        if name == "compound_semiconductor" {
            assert_eq!(value, "N");
        }
    }
}

/// 絞り込みを切り替えても order は変わらない
#[test]
fn test_order_is_stable_across_filtering() {
    let dataset = load_csv(INPUT.as_bytes()).unwrap();
    let mut session = Session::new(dataset, false);
    session.skip();
    session.set_flag(Some(CsFlag::Y)).unwrap();
    session.save().unwrap();

    assert_eq!(session.view().orders(), &[1, 2, 3]);
    session.set_show_only_unlabeled(true);
    assert_eq!(session.view().orders(), &[1, 3]);
    session.set_show_only_unlabeled(false);
    assert_eq!(session.view().orders(), &[1, 2, 3]);
    assert_eq!(session.dataset().get(2).unwrap().company_name, "Beta Photonics");
}

/// 全件ラベル済みなら確認なしでエクスポートできる
#[test]
fn test_export_without_acknowledgment_when_done() {
    let dataset = load_csv(INPUT.as_bytes()).unwrap();
    let mut session = Session::new(dataset, true);
    for _ in 0..3 {
        session.set_flag(Some(CsFlag::N)).unwrap();
        session.save().unwrap();
    }
    assert_eq!(session.remaining(), 0);
    assert!(matches!(session.load_record(), Slot::NoRecordLoaded));

    let gate = session.export_gate();
    assert!(gate.is_enabled());
    assert!(gate.warning().is_none());
    assert!(session.export_csv_bytes(&ExportOptions::default()).is_ok());
}
