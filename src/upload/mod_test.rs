use super::*;
use std::sync::Mutex;

// =========================================================================
// MockApi
// =========================================================================

/// Rejects any file whose name contains `reject`, records every call.
struct MockApi {
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockApi {
    fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AttachmentApi for MockApi {
    async fn attach_file(&self, page_id: &str, path: &Path) -> Result<String, Error> {
        self.calls.lock().unwrap().push((page_id.to_owned(), path.to_path_buf()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if name.contains("reject") {
            return Err(Error::RemoteCallFailure("status 403: forbidden".to_owned()));
        }
        Ok(name)
    }
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"png").unwrap();
    path
}

// =========================================================================
// run
// =========================================================================

#[tokio::test]
async fn uploads_every_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![touch(dir.path(), "arch.png"), touch(dir.path(), "er.png")];
    let api = MockApi::new();

    let report = run(&api, "123", &files).await.unwrap();

    assert_eq!(report.page_id, "123");
    assert_eq!(
        report.uploaded.iter().map(|u| u.filename.as_str()).collect::<Vec<_>>(),
        ["arch.png", "er.png"]
    );
    assert!(report.errors.is_empty());
    assert!(!report.all_failed());
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn missing_file_aborts_before_any_upload() {
    let dir = tempfile::tempdir().unwrap();
    let present = touch(dir.path(), "arch.png");
    let missing = dir.path().join("missing.png");
    let api = MockApi::new();

    let err = run(&api, "123", &[present, missing.clone()]).await.unwrap_err();

    assert!(matches!(err, Error::InputNotFound(path) if path == missing));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn partial_failure_is_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![touch(dir.path(), "arch.png"), touch(dir.path(), "reject.png")];

    let report = run(&MockApi::new(), "9", &files).await.unwrap();

    assert_eq!(report.uploaded.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].file.ends_with("reject.png"));
    assert!(report.errors[0].error.contains("403"));
    assert!(!report.all_failed());
}

#[tokio::test]
async fn every_failure_marks_report_failed() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![touch(dir.path(), "reject-a.png"), touch(dir.path(), "reject-b.png")];

    let report = run(&MockApi::new(), "9", &files).await.unwrap();

    assert!(report.uploaded.is_empty());
    assert!(report.all_failed());
}

// =========================================================================
// report JSON
// =========================================================================

#[test]
fn report_omits_empty_errors() {
    let report = UploadReport {
        page_id: "1".to_owned(),
        uploaded: vec![Uploaded { file: "out/a.png".to_owned(), filename: "a.png".to_owned() }],
        errors: Vec::new(),
    };
    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        r#"{"page_id":"1","uploaded":[{"file":"out/a.png","filename":"a.png"}]}"#
    );
}

#[test]
fn report_lists_errors_when_present() {
    let report = UploadReport {
        page_id: "1".to_owned(),
        uploaded: Vec::new(),
        errors: vec![UploadFailure { file: "a.png".to_owned(), error: "boom".to_owned() }],
    };
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["errors"][0]["error"], "boom");
    assert_eq!(json["uploaded"], serde_json::json!([]));
}

#[test]
fn check_files_rejects_directories() {
    let dir = tempfile::tempdir().unwrap();
    let err = check_files(&[dir.path().to_path_buf()]).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}
