use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::Read;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{Value, json};

use super::*;
use crate::config::ApiUrlRegion;
use crate::models::{Confidence, ValidateStatus, ValidateSubStatus};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get {
        url: String,
        query: Vec<(&'static str, String)>,
        timeout: Option<Duration>,
    },
    PostJson {
        url: String,
        body: Value,
    },
    PostMultipart {
        url: String,
        form: Vec<(&'static str, String)>,
        file_name: String,
        contents: String,
    },
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
struct StubTransport {
    replies: RefCell<VecDeque<TransportResponse>>,
    calls: RefCell<Vec<Call>>,
}

impl StubTransport {
    fn replying(replies: impl IntoIterator<Item = TransportResponse>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            calls: RefCell::default(),
        }
    }

    fn json(body: Value) -> Self {
        Self::replying([TransportResponse::json(200, &body)])
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next_reply(&self) -> Result<TransportResponse, Error> {
        Ok(self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("stub ran out of replies"))
    }
}

impl Transport for StubTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error> {
        self.calls.borrow_mut().push(Call::Get {
            url: url.to_string(),
            query: query.to_vec(),
            timeout,
        });
        self.next_reply()
    }

    fn post_json(
        &self,
        url: &str,
        body: &Value,
        _timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error> {
        self.calls.borrow_mut().push(Call::PostJson {
            url: url.to_string(),
            body: body.clone(),
        });
        self.next_reply()
    }

    fn post_multipart(
        &self,
        url: &str,
        form: &[(&'static str, String)],
        mut upload: Upload,
        _timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error> {
        let mut contents = String::new();
        upload.file.read_to_string(&mut contents).unwrap();
        assert_eq!(upload.length, contents.len() as u64);
        self.calls.borrow_mut().push(Call::PostMultipart {
            url: url.to_string(),
            form: form.to_vec(),
            file_name: upload.file_name,
            contents,
        });
        self.next_reply()
    }
}

fn client(transport: StubTransport) -> ZeroBounce<StubTransport> {
    ZeroBounce::with_transport(ClientConfig::new("test-key").unwrap(), transport)
}

fn query(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    pairs
        .iter()
        .map(|(key, value)| (*key, value.to_string()))
        .collect()
}

fn only_get(zb: &ZeroBounce<StubTransport>) -> (String, Vec<(&'static str, String)>) {
    match zb.transport().calls().as_slice() {
        [Call::Get { url, query, .. }] => (url.clone(), query.clone()),
        other => panic!("expected a single GET, got {other:?}"),
    }
}

#[test]
fn credits_are_fetched_from_base_url() {
    let zb = client(StubTransport::json(json!({"Credits": "12345"})));
    let credits = zb.get_credits().unwrap();
    assert_eq!(credits.credits, "12345");

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/getcredits");
    assert_eq!(params, query(&[("api_key", "test-key")]));
}

#[test]
fn error_key_wins_over_model_construction() {
    let zb = client(StubTransport::json(json!({
        "error": "Invalid API key or your account ran out of credits",
        "processed_at": "not a timestamp",
    })));
    let err = zb.validate("a@example.com", None).expect_err("api error");
    assert_eq!(
        err.api_message(),
        Some("Invalid API key or your account ran out of credits")
    );
}

#[test]
fn error_key_list_uses_first_entry() {
    let zb = client(StubTransport::json(json!({"error": ["first", "second"]})));
    let err = zb.get_credits().expect_err("api error");
    assert_eq!(err.api_message(), Some("first"));
}

#[test]
fn falsy_error_key_is_ignored() {
    let zb = client(StubTransport::json(json!({"error": false, "Credits": "7"})));
    assert_eq!(zb.get_credits().unwrap().credits, "7");

    let zb = client(StubTransport::json(json!({"error": "", "Credits": "8"})));
    assert_eq!(zb.get_credits().unwrap().credits, "8");
}

#[test]
fn validate_builds_typed_model() {
    let zb = client(StubTransport::json(json!({
        "address": "invalid@example.com",
        "status": "invalid",
        "sub_status": "mailbox_not_found",
        "free_email": false,
        "mx_found": "true",
        "processed_at": "2023-03-28 12:30:18.990",
    })));
    let response = zb.validate("invalid@example.com", None).unwrap();
    assert_eq!(response.status, Some(ValidateStatus::Invalid));
    assert_eq!(response.sub_status, Some(ValidateSubStatus::MailboxNotFound));
    assert!(!response.free_email);
    assert!(response.mx_found);
    assert_eq!(
        response.processed_at,
        NaiveDate::from_ymd_opt(2023, 3, 28).and_then(|d| d.and_hms_micro_opt(12, 30, 18, 990_000))
    );

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/validate");
    assert_eq!(
        params,
        query(&[("api_key", "test-key"), ("email", "invalid@example.com")])
    );
}

#[test]
fn validate_sends_ip_when_given() {
    let zb = client(StubTransport::json(json!({"status": "valid"})));
    zb.validate("a@example.com", Some("99.110.204.1")).unwrap();
    let (_, params) = only_get(&zb);
    assert_eq!(
        params,
        query(&[
            ("api_key", "test-key"),
            ("email", "a@example.com"),
            ("ip_address", "99.110.204.1"),
        ])
    );
}

#[test]
fn validate_blank_email_sends_nothing() {
    let zb = client(StubTransport::default());
    let err = zb.validate(" ", None).expect_err("blank email");
    assert!(err.is_client());
    assert_eq!(err.to_string(), "Empty parameter: email");
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn non_json_reply_is_decode_error() {
    let zb = client(StubTransport::replying([TransportResponse {
        status: 502,
        content_type: Some("text/html".to_string()),
        body: b"<html>bad gateway</html>".to_vec(),
    }]));
    let err = zb.get_credits().expect_err("not json");
    assert!(matches!(err, Error::Decode { status: 502, .. }));
    assert!(err.to_string().contains("HTTP 502"), "{err}");
}

#[test]
fn json_array_reply_is_rejected() {
    let zb = client(StubTransport::json(json!(["Credits", "5"])));
    let err = zb.get_credits().expect_err("not an object");
    assert!(matches!(err, Error::NotAnObject));
}

#[test]
fn api_usage_sends_formatted_dates() {
    let zb = client(StubTransport::json(json!({
        "total": 3,
        "start_date": "2019-07-05",
        "end_date": "2019-07-15",
    })));
    let start = NaiveDate::from_ymd_opt(2019, 7, 5).unwrap();
    let end = NaiveDate::from_ymd_opt(2019, 7, 15).unwrap();
    let usage = zb.get_api_usage(start, end).unwrap();
    assert_eq!(usage.total, 3);
    assert_eq!(usage.start_date, Some(start));

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/getapiusage");
    assert_eq!(
        params,
        query(&[
            ("api_key", "test-key"),
            ("start_date", "2019-07-05"),
            ("end_date", "2019-07-15"),
        ])
    );
}

#[test]
fn activity_requires_email() {
    let zb = client(StubTransport::json(json!({"found": true, "active_in_days": "180"})));
    assert!(zb.get_activity("").unwrap_err().is_client());
    let activity = zb.get_activity("a@example.com").unwrap();
    assert!(activity.found);
    let (url, _) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/activity");
}

#[test]
fn empty_batch_sends_nothing() {
    let zb = client(StubTransport::default());
    let err = zb.validate_batch(&[]).expect_err("empty batch");
    assert!(matches!(
        err,
        Error::Client(ClientError::EmptyParameter {
            name: "email_batch"
        })
    ));
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn batch_posts_json_body_to_bulk_host() {
    let zb = client(StubTransport::json(json!({
        "email_batch": [{"address": "a@example.com", "status": "valid"}],
        "errors": [{"error": "Invalid email", "email_address": "nope"}],
    })));
    let batch = [
        BatchElement::with_ip("a@example.com", Some("1.1.1.1")).unwrap(),
        BatchElement::new("nope").unwrap(),
    ];
    let response = zb.validate_batch(&batch).unwrap();
    assert_eq!(response.email_batch.len(), 1);
    assert_eq!(response.errors[0].email_address.as_deref(), Some("nope"));

    assert_eq!(
        zb.transport().calls(),
        vec![Call::PostJson {
            url: "https://bulkapi.zerobounce.net/v2/validatebatch".to_string(),
            body: json!({
                "api_key": "test-key",
                "email_batch": [
                    {"email_address": "a@example.com", "ip_address": "1.1.1.1"},
                    {"email_address": "nope"},
                ],
            }),
        }]
    );
}

#[test]
fn send_file_missing_path_fails_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let zb = client(StubTransport::default());
    let err = zb
        .send_file(dir.path().join("absent.csv"), &SendFileOptions::new(1))
        .expect_err("missing file");
    assert!(matches!(err, Error::Io { .. }));
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn send_file_zero_column_is_client_error() {
    let zb = client(StubTransport::default());
    let err = zb
        .send_file("emails.csv", &SendFileOptions::new(0))
        .expect_err("zero column");
    assert!(matches!(
        err,
        Error::Client(ClientError::InvalidColumn { value: 0, .. })
    ));
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn send_file_uploads_form_and_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emails.csv");
    fs::write(&path, "email\nvalid@example.com\n").unwrap();

    let zb = client(StubTransport::json(json!({
        "success": true,
        "message": "File Accepted",
        "file_name": "emails.csv",
        "file_id": "abc-123",
    })));
    let options = SendFileOptions::new(1)
        .with_return_url("https://example.com/callback")
        .with_name_columns(2, 3)
        .has_header_row(true);
    let response = zb.send_file(&path, &options).unwrap();
    assert!(response.success);
    assert_eq!(response.file_id.as_deref(), Some("abc-123"));

    assert_eq!(
        zb.transport().calls(),
        vec![Call::PostMultipart {
            url: "https://bulkapi.zerobounce.net/v2/sendfile".to_string(),
            form: query(&[
                ("api_key", "test-key"),
                ("email_address_column", "1"),
                ("return_url", "https://example.com/callback"),
                ("first_name_column", "2"),
                ("last_name_column", "3"),
                ("has_header_row", "true"),
                ("remove_duplicate", "true"),
            ]),
            file_name: "emails.csv".to_string(),
            contents: "email\nvalid@example.com\n".to_string(),
        }]
    );
}

#[test]
fn scoring_upload_targets_scoring_host() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.csv");
    fs::write(&path, "a@example.com\n").unwrap();

    let zb = client(StubTransport::json(json!({"success": "True", "file_id": "s-1"})));
    let options = ScoringSendFileOptions::new(1).remove_duplicate(false);
    let response = zb.scoring_send_file(&path, &options).unwrap();
    assert!(response.success);

    match zb.transport().calls().as_slice() {
        [Call::PostMultipart { url, form, .. }] => {
            assert_eq!(url, "https://bulkapi.zerobounce.net/v2/scoring/sendfile");
            assert!(form.contains(&("remove_duplicate", "false".to_string())));
        }
        other => panic!("expected multipart upload, got {other:?}"),
    }
}

#[test]
fn file_status_blank_id_sends_nothing() {
    let zb = client(StubTransport::default());
    let err = zb.file_status("").expect_err("blank id");
    assert_eq!(err.to_string(), "Empty parameter: file_id");
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn file_status_reads_bulk_host() {
    let zb = client(StubTransport::json(json!({
        "success": true,
        "file_id": "abc",
        "upload_date": "2023-04-01T08:15:00Z",
        "file_status": "Complete",
    })));
    let status = zb.file_status("abc").unwrap();
    assert_eq!(status.file_status.as_deref(), Some("Complete"));
    assert!(status.upload_date.is_some());

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://bulkapi.zerobounce.net/v2/filestatus");
    assert_eq!(params, query(&[("api_key", "test-key"), ("file_id", "abc")]));
}

#[test]
fn scoring_file_operations_use_scoring_host() {
    let zb = client(StubTransport::replying([
        TransportResponse::json(200, &json!({"success": true, "file_status": "Processing"})),
        TransportResponse::json(200, &json!({"success": true, "message": "File Deleted"})),
    ]));
    zb.scoring_file_status("abc").unwrap();
    let deleted = zb.scoring_delete_file("abc").unwrap();
    assert_eq!(deleted.message.as_deref(), Some("File Deleted"));

    let urls: Vec<String> = zb
        .transport()
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Get { url, .. } => url,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://bulkapi.zerobounce.net/v2/scoring/filestatus",
            "https://bulkapi.zerobounce.net/v2/scoring/deletefile",
        ]
    );
}

#[test]
fn delete_file_keeps_message_in_band() {
    let zb = client(StubTransport::json(json!({
        "success": "False",
        "message": "File cannot be deleted",
    })));
    let response = zb.delete_file("abc").unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("File cannot be deleted"));
}

#[test]
fn get_file_json_reply_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("results.csv");
    let zb = client(StubTransport::json(json!({
        "success": false,
        "message": ["api_key is invalid"],
    })));
    let response = zb.get_file("abc", &target).unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("api_key is invalid"));
    assert_eq!(response.local_file_path, None);
    assert!(!target.exists());
}

#[test]
fn get_file_saves_body_into_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("deeper").join("results.csv");
    let zb = client(StubTransport::replying([TransportResponse {
        status: 200,
        content_type: Some("application/octet-stream".to_string()),
        body: b"email,status\na@example.com,valid\n".to_vec(),
    }]));
    let response = zb.get_file("abc", &target).unwrap();
    assert!(response.success);
    assert_eq!(response.local_file_path.as_deref(), Some(target.as_path()));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "email,status\na@example.com,valid\n"
    );

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://bulkapi.zerobounce.net/v2/getfile");
    assert_eq!(params, query(&[("api_key", "test-key"), ("file_id", "abc")]));
}

#[test]
fn scoring_get_file_detects_json_with_charset() {
    let dir = tempfile::tempdir().unwrap();
    let zb = client(StubTransport::replying([TransportResponse {
        status: 200,
        content_type: Some("application/json; charset=utf-8".to_string()),
        body: br#"{"success": "False", "message": "File not found"}"#.to_vec(),
    }]));
    let response = zb
        .scoring_get_file("abc", dir.path().join("out.csv"))
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("File not found"));
}

#[test]
fn get_file_blank_arguments_send_nothing() {
    let zb = client(StubTransport::default());
    assert!(zb.get_file("", "out.csv").unwrap_err().is_client());
    let err = zb.get_file("abc", "").expect_err("blank path");
    assert_eq!(err.to_string(), "Empty parameter: download_path");
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn find_domain_needs_exactly_one_lookup_key() {
    let zb = client(StubTransport::default());
    let both = zb
        .find_domain(Some("example.com"), Some("Example"))
        .expect_err("both given");
    assert!(matches!(
        both,
        Error::Client(ClientError::ConflictingParameters { .. })
    ));
    let neither = zb.find_domain(None, Some("  ")).expect_err("neither given");
    assert!(matches!(
        neither,
        Error::Client(ClientError::MissingParameter { .. })
    ));
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn find_domain_by_company() {
    let zb = client(StubTransport::json(json!({
        "domain": "example.com",
        "company_name": "Example",
        "format": "first.last",
        "confidence": "High",
        "other_domain_formats": [{"format": "first", "confidence": "LOW"}],
    })));
    let response = zb.find_domain(None, Some("Example")).unwrap();
    assert_eq!(response.confidence, Some(Confidence::High));
    assert_eq!(response.other_domain_formats[0].confidence, Some(Confidence::Low));

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/guessformat");
    assert_eq!(
        params,
        query(&[("api_key", "test-key"), ("company_name", "Example")])
    );
}

#[test]
fn find_email_format_sends_name_parts() {
    let zb = client(StubTransport::json(json!({
        "email": "john.doe@example.com",
        "email_confidence": "medium",
    })));
    let name = PersonName::new("John").last("Doe");
    let response = zb
        .find_email_format(Some("example.com"), None, name)
        .unwrap();
    assert_eq!(response.email_confidence, Some(Confidence::Medium));

    let (_, params) = only_get(&zb);
    assert_eq!(
        params,
        query(&[
            ("api_key", "test-key"),
            ("domain", "example.com"),
            ("first_name", "John"),
            ("last_name", "Doe"),
        ])
    );
}

#[test]
fn find_email_format_requires_first_name() {
    let zb = client(StubTransport::default());
    let err = zb
        .find_email_format(Some("example.com"), None, PersonName::default())
        .expect_err("first name");
    assert_eq!(err.to_string(), "Empty parameter: first_name");
    assert!(zb.transport().calls().is_empty());
}

#[test]
fn find_email_format_embedded_message_is_api_error() {
    let zb = client(StubTransport::json(json!({"Message": "Domain not found"})));
    let err = zb
        .find_email_format(Some("example.com"), None, PersonName::new("John"))
        .expect_err("api error");
    assert_eq!(err.api_message(), Some("Domain not found"));
}

#[test]
#[allow(deprecated)]
fn guess_format_still_reaches_endpoint() {
    let zb = client(StubTransport::json(json!({
        "domain": "example.com",
        "format": "first.last",
        "status": "Valid",
        "confidence": "high",
    })));
    let response = zb
        .guess_format("example.com", PersonName::new("John").middle(""))
        .unwrap();
    assert_eq!(response.status, Some(ValidateStatus::Valid));
    assert_eq!(response.confidence, Some(Confidence::High));

    let (url, params) = only_get(&zb);
    assert_eq!(url, "https://api.zerobounce.net/v2/guessformat");
    assert_eq!(
        params,
        query(&[
            ("api_key", "test-key"),
            ("domain", "example.com"),
            ("first_name", "John"),
        ])
    );
}

#[test]
fn region_and_timeout_reach_transport() {
    let config = ClientConfig::new("test-key")
        .unwrap()
        .with_region(ApiUrlRegion::Eu)
        .with_timeout(Duration::from_secs(5));
    let zb = ZeroBounce::with_transport(config, StubTransport::json(json!({"Credits": "1"})));
    zb.get_credits().unwrap();

    match zb.transport().calls().as_slice() {
        [Call::Get { url, timeout, .. }] => {
            assert_eq!(url, "https://api-eu.zerobounce.net/v2/getcredits");
            assert_eq!(*timeout, Some(Duration::from_secs(5)));
        }
        other => panic!("expected a single GET, got {other:?}"),
    }
}
