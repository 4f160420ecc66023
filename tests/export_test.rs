//! 書き出しと再読み込みのテスト

use labeler_common::{
    load_csv, load_path, CsFlag, ExportFormat, ExportOptions, Session, Tag, ORDER_COL,
};
use rewire_labeler::export::export_session;
use tempfile::tempdir;

const INPUT: &str = "\
Company name Latin alphabet,Website address,Extra note
Alpha Semi,alpha.example,keep me
Beta Photonics,beta.example,
";

fn labeled_session() -> Session {
    let mut session = Session::new(load_csv(INPUT.as_bytes()).unwrap(), true);
    session.set_flag(Some(CsFlag::Y)).unwrap();
    session.toggle_tag(Tag::PowerDevices, true).unwrap();
    session.set_notes("GaN power").unwrap();
    session.save().unwrap();
    session.set_export_acknowledged(true);
    session
}

#[test]
fn test_csv_has_bom_and_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("labels.csv");
    let session = labeled_session();

    export_session(&session, &path, &ExportOptions::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let reloaded = load_path(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    let first = reloaded.get(1).unwrap();
    assert_eq!(first.flag, Some(CsFlag::Y));
    assert!(first.tags.get(Tag::PowerDevices));
    assert_eq!(first.notes, "GaN power");
    assert_eq!(first.extra.get("Extra note").map(String::as_str), Some("keep me"));
    assert!(reloaded.get(2).unwrap().is_unlabeled());
    assert_eq!(reloaded.remaining(), 1);
}

#[test]
fn test_xlsx_export_reloads_from_results_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.xlsx");
    let session = labeled_session();
    let options = ExportOptions {
        format: ExportFormat::Xlsx,
        include_order_column: true,
    };

    export_session(&session, &path, &options).unwrap();

    let reloaded = load_path(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get(1).unwrap().flag, Some(CsFlag::Y));
    assert_eq!(reloaded.get(2).unwrap().company_name, "Beta Photonics");
}

#[test]
fn test_order_column_can_be_omitted() {
    let session = labeled_session();
    let options = ExportOptions {
        include_order_column: false,
        ..Default::default()
    };
    let bytes = session.export_csv_bytes(&options).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let header = text.lines().next().unwrap();
    assert!(!header.contains(ORDER_COL));
    assert!(header.contains("compound_semiconductor"));
}

#[test]
fn test_blocked_export_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blocked.csv");
    let session = Session::new(load_csv(INPUT.as_bytes()).unwrap(), true);

    assert!(export_session(&session, &path, &ExportOptions::default()).is_err());
    assert!(!path.exists());
}

#[test]
fn test_untouched_rows_export_verbatim() {
    let input = "\
Company name Latin alphabet,compound_semiconductor,supply_chain_Substrate,supply_chain_Package
A,maybe,2,0
B,y,,abc
C,,,
";
    let mut session = Session::new(load_csv(input.as_bytes()).unwrap(), false);
    assert_eq!(session.remaining(), 1);

    // C だけ保存して正規化されることを確認
    session.skip();
    session.skip();
    session.set_flag(Some(CsFlag::N)).unwrap();
    assert_eq!(session.save().unwrap(), 3);
    assert_eq!(session.remaining(), 0);

    let bytes = session.export_csv_bytes(&ExportOptions::default()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.trim_start_matches('\u{feff}').lines().collect();
    assert!(lines[0].starts_with(
        "Company name Latin alphabet,compound_semiconductor,supply_chain_Substrate,supply_chain_Package,"
    ));
    assert!(lines[1].starts_with("A,maybe,2,0,"), "{}", lines[1]);
    assert!(lines[2].starts_with("B,y,,abc,"), "{}", lines[2]);
    assert!(lines[3].starts_with("C,N,0,0,"), "{}", lines[3]);
}
