use super::*;

#[test]
fn file_name_uses_record_id_and_pdf_by_default() {
    let id = RecordId::new("abc123");
    assert_eq!(export_file_name(&id, None), "prediction_abc123.pdf");
    assert_eq!(
        export_file_name(&id, Some("application/pdf")),
        "prediction_abc123.pdf"
    );
    assert_eq!(
        export_file_name(&id, Some("application/octet-stream")),
        "prediction_abc123.pdf"
    );
}

#[test]
fn file_name_follows_content_type() {
    let id = RecordId::new("abc123");
    assert_eq!(
        export_file_name(&id, Some("text/csv; charset=utf-8")),
        "prediction_abc123.csv"
    );
    assert_eq!(export_file_name(&id, Some("  ")), "prediction_abc123.pdf");
    assert_eq!(
        export_file_name(&id, Some("application/x-not-a-real-type")),
        "prediction_abc123.pdf"
    );
}

#[test]
fn file_name_sanitizes_path_characters() {
    let id = RecordId::new("../etc/passwd");
    assert_eq!(export_file_name(&id, None), "prediction____etc_passwd.pdf");
}

#[test]
fn directory_sink_writes_document_and_removes_staging_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::new(dir.path().join("exports"));

    let saved = deliver(&mut sink, b"%PDF-1.4 body", "prediction_abc123.pdf").expect("saved");

    assert_eq!(saved, dir.path().join("exports").join("prediction_abc123.pdf"));
    assert_eq!(fs::read(&saved).expect("read back"), b"%PDF-1.4 body");
}

#[test]
fn directory_sink_release_deletes_staged_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::new(dir.path());

    let handle = sink.materialize(b"payload").expect("staged");
    let staged_path = handle.path().to_path_buf();
    assert!(staged_path.exists());
    sink.save_as(&handle, "prediction_x.pdf").expect("saved");
    sink.release(handle);

    assert!(!staged_path.exists());
    assert_eq!(sink.target_dir(), dir.path());
}

#[test]
fn save_failure_reports_target_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"file").expect("write blocker");
    let mut sink = DirectorySink::new(&blocker);

    let err = deliver(&mut sink, b"payload", "prediction_x.pdf").expect_err("must fail");

    match err {
        ExportError::Save { path, .. } => assert_eq!(path, blocker.join("prediction_x.pdf")),
        other => panic!("unexpected error: {other}"),
    }
}
