// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payclip::PayrollError;
use payclip::config::{Config, FetchFailurePolicy};
use payclip::feed::{FeedClient, fallback_employees};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Serve one HTTP response and report the request line that asked for it.
fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let line = request.lines().next().unwrap_or("").to_string();
            let _ = tx.send(line);
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });
    (format!("http://{}", addr), rx)
}

/// A base URL nothing listens on.
fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn config(base: String, policy: FetchFailurePolicy) -> Config {
    Config {
        api_base: base,
        on_fetch_failure: policy,
        fetch_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

#[test]
fn payroll_feed_is_parsed_from_the_service() {
    let body = r#"[{"employeeId":"E010","name":"Dana Lee","role":"QA","salary":6100,"doj":"2024-02-01","month":"May 2025","slip":"dana_may_2025.pdf"}]"#;
    let (base, rx) = serve_once("200 OK", body);
    let client = FeedClient::new(&config(base, FetchFailurePolicy::Error)).unwrap();
    let entries = client.fetch_payroll().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].employee_id, "E010");
    assert_eq!(entries[0].slip_reference, "dana_may_2025.pdf");
    assert_eq!(entries[0].salary, rust_decimal::Decimal::from(6100));
    assert_eq!(rx.recv().unwrap(), "GET /api/payroll HTTP/1.1");
}

#[test]
fn employees_feed_reads_form_field_names() {
    let body = r#"[{"empId":"E020","empName":"Ravi Kumar","designation":"Analyst","doj":"2023-07-01","ifsccode":"HDFC0001"}]"#;
    let (base, rx) = serve_once("200 OK", body);
    let client = FeedClient::new(&config(base, FetchFailurePolicy::Error)).unwrap();
    let employees = client.fetch_employees().unwrap();
    assert_eq!(employees[0].id, "E020");
    assert_eq!(employees[0].name, "Ravi Kumar");
    assert_eq!(employees[0].ifsc_code, "HDFC0001");
    assert!(employees[0].pan.is_empty());
    assert_eq!(rx.recv().unwrap(), "GET /api/employees HTTP/1.1");
}

#[test]
fn unreachable_feed_falls_back_when_configured() {
    let client = FeedClient::new(&config(dead_base(), FetchFailurePolicy::Fallback)).unwrap();
    let entries = client.fetch_payroll().unwrap();
    assert!(!entries.is_empty());
    assert_eq!(entries[0].employee_id, "E001");

    let employees = client.fetch_employees().unwrap();
    assert_eq!(employees, fallback_employees());
    assert_eq!(employees.len(), 3);
}

#[test]
fn unreachable_feed_is_an_error_by_default() {
    let client = FeedClient::new(&config(dead_base(), FetchFailurePolicy::default())).unwrap();
    match client.fetch_payroll() {
        Err(PayrollError::NetworkFetch { url, .. }) => assert!(url.ends_with("/api/payroll")),
        other => panic!("expected NetworkFetch, got {:?}", other),
    }
}

#[test]
fn unreachable_feed_yields_nothing_under_empty_policy() {
    let client = FeedClient::new(&config(dead_base(), FetchFailurePolicy::Empty)).unwrap();
    assert!(client.fetch_payroll().unwrap().is_empty());
}

#[test]
fn server_errors_count_as_fetch_failures() {
    let (base, _rx) = serve_once("500 Internal Server Error", "{}");
    let client = FeedClient::new(&config(base, FetchFailurePolicy::Fallback)).unwrap();
    assert_eq!(client.fetch_payroll().unwrap().len(), 4);
}

#[test]
fn download_returns_raw_bytes() {
    let (base, rx) = serve_once("200 OK", "%PDF-1.4 fake");
    let client = FeedClient::new(&config(base, FetchFailurePolicy::Error)).unwrap();
    let bytes = client.download_slip("alice_april_2025.pdf").unwrap();
    assert_eq!(bytes, b"%PDF-1.4 fake");
    assert_eq!(
        rx.recv().unwrap(),
        "GET /api/payroll/download/alice_april_2025.pdf HTTP/1.1"
    );
}

#[test]
fn download_rejects_path_like_names() {
    let client = FeedClient::new(&config(dead_base(), FetchFailurePolicy::Fallback)).unwrap();
    assert!(matches!(
        client.download_slip("../secrets.pdf"),
        Err(PayrollError::InvalidField { .. })
    ));
    assert_eq!(
        client.download_slip("  "),
        Err(PayrollError::MissingField { field: "filename" })
    );
}

#[test]
fn failed_download_is_served_from_local_slips_under_fallback() {
    let slips = tempfile::tempdir().unwrap();
    std::fs::write(slips.path().join("bob_april_2025.pdf"), b"%PDF-1.4 local").unwrap();
    let mut cfg = config(dead_base(), FetchFailurePolicy::Fallback);
    cfg.slips_dir = slips.path().to_path_buf();

    let client = FeedClient::new(&cfg).unwrap();
    assert_eq!(client.download_slip("bob_april_2025.pdf").unwrap(), b"%PDF-1.4 local");
    // Nothing local either: the network error stands
    assert!(matches!(
        client.download_slip("carol_april_2025.pdf"),
        Err(PayrollError::NetworkFetch { .. })
    ));
}

#[test]
fn failed_download_has_no_stand_in_under_error_policy() {
    let slips = tempfile::tempdir().unwrap();
    std::fs::write(slips.path().join("bob_april_2025.pdf"), b"%PDF-1.4 local").unwrap();
    let mut cfg = config(dead_base(), FetchFailurePolicy::Error);
    cfg.slips_dir = slips.path().to_path_buf();

    let client = FeedClient::new(&cfg).unwrap();
    assert!(matches!(
        client.download_slip("bob_april_2025.pdf"),
        Err(PayrollError::NetworkFetch { .. })
    ));
}

#[test]
fn feed_rows_missing_optional_fields_still_parse() {
    let body = r#"[{"employeeId":"E030","name":"Eve Park","month":"May 2025","slip":"eve.pdf"},{"employeeId":"E031"}]"#;
    let (base, _rx) = serve_once("200 OK", body);
    let client = FeedClient::new(&config(base, FetchFailurePolicy::Error)).unwrap();
    let entries = client.fetch_payroll().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].role.is_empty());
    assert!(entries[0].doj.is_empty());
    assert_eq!(entries[0].salary, rust_decimal::Decimal::ZERO);
    assert_eq!(entries[1].employee_id, "E031");
}

#[test]
fn config_reads_lookup_values() {
    let cfg = Config::from_lookup(|k| match k {
        "API_BASE_URL" => Some("http://hr.internal:8080/".into()),
        "ON_FETCH_FAILURE" => Some("Fallback".into()),
        "FETCH_RETRIES" => Some("2".into()),
        "PAYCLIP_LOG" => Some("debug".into()),
        "MOCK_SLIPS_DIR" => Some("/srv/slips".into()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.api_base, "http://hr.internal:8080");
    assert_eq!(cfg.on_fetch_failure, FetchFailurePolicy::Fallback);
    assert_eq!(cfg.fetch_retries, 2);
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(15));
    assert_eq!(cfg.log_level, tracing::Level::DEBUG);
    assert_eq!(cfg.slips_dir, std::path::PathBuf::from("/srv/slips"));
}

#[test]
fn config_defaults_and_rejects_bad_values() {
    let cfg = Config::from_lookup(|_| None).unwrap();
    assert_eq!(cfg.api_base, "http://localhost:5000");
    assert_eq!(cfg.on_fetch_failure, FetchFailurePolicy::Error);
    assert_eq!(cfg.slips_dir, std::path::PathBuf::from("mock_slips"));

    let err = Config::from_lookup(|k| (k == "ON_FETCH_FAILURE").then(|| "retry".to_string()))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Unknown fetch failure policy 'retry'"));
}
