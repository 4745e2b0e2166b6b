use super::*;

fn credentials(verify_tls: bool) -> Credentials {
    Credentials {
        base_url: "https://wiki.example.com".to_owned(),
        username: "bot".to_owned(),
        api_token: "token".to_owned(),
        verify_tls,
    }
}

#[test]
fn attachment_urls_follow_content_api_layout() {
    assert_eq!(
        attachments_url("https://wiki.example.com/", "12345"),
        "https://wiki.example.com/rest/api/content/12345/child/attachment"
    );
    assert_eq!(
        attachment_data_url("https://wiki.example.com", "12345", "att987"),
        "https://wiki.example.com/rest/api/content/12345/child/attachment/att987/data"
    );
}

#[test]
fn comment_names_the_file() {
    assert_eq!(attachment_comment("arch.png"), "SDD diagram: arch.png");
}

#[test]
fn file_name_takes_last_component() {
    assert_eq!(file_name(Path::new("out/diagrams/er.png")).expect("name"), "er.png");
    assert!(matches!(file_name(Path::new("/")), Err(Error::InputNotFound(_))));
}

#[test]
fn lookup_returns_first_result_id() {
    let body = r#"{"results": [{"id": "att42", "title": "arch.png"}, {"id": "att43"}], "size": 2}"#;
    assert_eq!(parse_attachment_lookup(body).expect("parse").as_deref(), Some("att42"));
}

#[test]
fn lookup_accepts_numeric_ids() {
    assert_eq!(parse_attachment_lookup(r#"{"results": [{"id": 42}]}"#).expect("parse").as_deref(), Some("42"));
}

#[test]
fn lookup_without_results_is_none() {
    assert_eq!(parse_attachment_lookup(r#"{"results": [], "size": 0}"#).expect("parse"), None);
    assert_eq!(parse_attachment_lookup("{}").expect("parse"), None);
}

#[test]
fn lookup_rejects_non_json() {
    let err = parse_attachment_lookup("<html>login</html>").expect_err("not json");
    assert!(matches!(err, Error::RemoteCallFailure(_)));
}

#[test]
fn truncate_caps_long_bodies() {
    let long = "x".repeat(MAX_ERROR_BODY_CHARS + 50);
    let short = truncate(&long);
    assert_eq!(short.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    assert!(short.ends_with("..."));
    assert_eq!(truncate("  denied  "), "denied");
}

#[test]
fn client_builds_with_and_without_tls_verification() {
    assert!(ConfluenceClient::new(&credentials(true)).is_ok());
    assert!(ConfluenceClient::new(&credentials(false)).is_ok());
}

#[tokio::test]
async fn attach_missing_file_fails_before_any_request() {
    let client = ConfluenceClient::new(&credentials(true)).expect("client");
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("gone.png");
    let err = client.attach_file("1", &missing).await.expect_err("missing");
    assert!(matches!(err, Error::InputNotFound(path) if path == missing));
}
