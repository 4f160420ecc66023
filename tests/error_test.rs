use rewire_labeler::error::LabelerError;

#[test]
fn test_error_display() {
    let error = LabelerError::Config("test config error".to_string());
    assert_eq!(format!("{}", error), "設定エラー: test config error");

    let error = LabelerError::FileNotFound("/path/to/file.csv".to_string());
    assert_eq!(format!("{}", error), "ファイルが見つかりません: /path/to/file.csv");

    let error = LabelerError::Prompt("interrupted".to_string());
    assert_eq!(format!("{}", error), "入力エラー: interrupted");
}

#[test]
fn test_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: LabelerError = io_error.into();
    assert!(matches!(error, LabelerError::Io(_)));
    assert!(format!("{}", error).contains("file not found"));
}

#[test]
fn test_error_from_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let error: LabelerError = json_error.into();
    assert!(matches!(error, LabelerError::JsonParse(_)));
}

#[test]
fn test_common_errors_are_transparent() {
    let error: LabelerError = labeler_common::Error::FlagRequired.into();
    assert_eq!(format!("{}", error), "Choose Y or N before saving");

    let error: LabelerError = labeler_common::LoadError::MissingHeader.into();
    assert_eq!(format!("{}", error), "No header row found");

    let error: LabelerError = labeler_common::Error::ExportBlocked { remaining: 4 }.into();
    assert!(format!("{}", error).contains("4 unfinished records"));
}
