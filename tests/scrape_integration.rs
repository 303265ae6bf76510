//! End-to-end pipeline tests against a mock NPS server.
//!
//! The template table points both NPS hosts at a wiremock server, so the
//! full resolve → probe → fetch → extract → parse → record path runs without
//! touching the network.

use std::time::Duration;

use assert_json_diff::assert_json_include;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parkfetch::config::{ScrapeConfig, SheetRef};
use parkfetch::model::{ParkRecord, ParkStatus};
use parkfetch::pipeline::Scraper;
use parkfetch::resolver::UrlTemplates;
use parkfetch::sink::json::write_json;
use parkfetch::sink::sheets::SheetsWriter;
use parkfetch::sink::SinkError;

/// Assemble a minimal single-page PDF with one Helvetica text run, computing
/// xref offsets so the file is well-formed.
fn minimal_pdf(text: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, obj) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{obj}\nendobj\n", i + 1).as_bytes());
    }
    let xref_pos = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for off in &offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

/// Config with both template hosts pointed at the mock server, zero delay.
fn test_config(server: &MockServer, limit: usize) -> ScrapeConfig {
    ScrapeConfig {
        limit,
        delay: Duration::from_secs(0),
        http_timeout: Duration::from_secs(5),
        templates: UrlTemplates {
            primary_host: server.uri(),
            mirror_host: server.uri(),
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_two_park_run_writes_two_records_in_order() {
    let server = MockServer::start().await;

    // Yellowstone: the index page links the brochure, which parses fully.
    Mock::given(method("GET"))
        .and(path("/yell/planyourvisit/brochures.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a href="/yell/planyourvisit/upload/Yellowstone-Brochure.pdf">Brochure</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/yell/planyourvisit/upload/Yellowstone-Brochure.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            minimal_pdf(
                "Yellowstone National Park located in Wyoming was \
                 Established in 1872 and covers 2,219,791 acres",
            ),
            "application/pdf",
        ))
        .mount(&server)
        .await;
    // Yosemite: nothing mounted, every candidate 404s.

    let config = test_config(&server, 2);
    let output_path = config.output_path.clone();
    let dir = tempfile::tempdir().unwrap();
    let config = ScrapeConfig {
        output_path: dir.path().join(output_path),
        ..config
    };

    let aggregator = Scraper::new(config.clone()).run().await;

    // Exactly one record per park, in table order.
    assert_eq!(aggregator.len(), 2);
    let records = aggregator.records();
    assert_eq!(records[0].name, "Yellowstone");
    assert_eq!(records[1].name, "Yosemite");

    // Yellowstone parsed fully from the probed link.
    assert_eq!(records[0].status, ParkStatus::Ok);
    assert_eq!(records[0].state.as_deref(), Some("Wyoming"));
    assert_eq!(records[0].established_year, Some(1872));
    assert_eq!(records[0].size.as_deref(), Some("2,219,791 acres"));
    assert!(records[0]
        .brochure_url
        .as_deref()
        .unwrap()
        .ends_with("/yell/planyourvisit/upload/Yellowstone-Brochure.pdf"));
    assert!(records[0].text_preview.is_some());

    // Yosemite exhausted its candidates.
    assert_eq!(records[1].status, ParkStatus::DownloadFailed);
    assert!(records[1].brochure_url.is_some());

    // The JSON sink reflects every attempted park and round-trips exactly.
    write_json(&config.output_path, records).unwrap();
    let raw = std::fs::read_to_string(&config.output_path).unwrap();
    let parsed: Vec<ParkRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed, records);

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_json_include!(
        actual: value,
        expected: json!([
            { "name": "Yellowstone", "status": "ok", "state": "Wyoming" },
            { "name": "Yosemite", "status": "download_failed" },
        ])
    );
}

#[tokio::test]
async fn test_all_candidates_404_yields_download_failed() {
    let server = MockServer::start().await;
    // No mounts at all: index probe and all four templates answer 404.

    let aggregator = Scraper::new(test_config(&server, 1)).run().await;

    assert_eq!(aggregator.len(), 1);
    let record = &aggregator.records()[0];
    assert_eq!(record.name, "Yellowstone");
    assert_eq!(record.status, ParkStatus::DownloadFailed);
    // The last attempted candidate is recorded for diagnosis.
    assert!(record
        .brochure_url
        .as_deref()
        .unwrap()
        .ends_with("Yellowstone-Brochure.pdf"));
    assert_eq!(aggregator.ok_count(), 0);
    assert_eq!(
        aggregator.failure_counts().get(&ParkStatus::DownloadFailed),
        Some(&1)
    );
}

#[tokio::test]
async fn test_undecodable_pdf_yields_extract_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/yell/planyourvisit/upload/Yellowstone-Brochure.pdf",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"not a pdf at all".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let aggregator = Scraper::new(test_config(&server, 1)).run().await;

    let record = &aggregator.records()[0];
    assert_eq!(record.status, ParkStatus::ExtractFailed);
    assert!(record.brochure_url.is_some());
    assert!(record.state.is_none());
}

#[tokio::test]
async fn test_unparseable_brochure_yields_parse_partial() {
    let server = MockServer::start().await;

    // The brochure decodes fine but names no state, year, or size.
    Mock::given(method("GET"))
        .and(path(
            "/yell/planyourvisit/upload/Yellowstone-Brochure.pdf",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            minimal_pdf("Welcome to the park. Enjoy your visit."),
            "application/pdf",
        ))
        .mount(&server)
        .await;

    let aggregator = Scraper::new(test_config(&server, 1)).run().await;

    let record = &aggregator.records()[0];
    assert_eq!(record.status, ParkStatus::ParsePartial);
    assert!(record.state.is_none());
    assert!(record.established_year.is_none());
    assert!(record.size.is_none());
    assert!(record.text_preview.is_some());
    assert_eq!(aggregator.ok_count(), 0);
}

#[tokio::test]
async fn test_html_error_page_at_pdf_url_is_rejected() {
    let server = MockServer::start().await;

    // A soft-404: HTML served at the brochure path. It must not be accepted,
    // so the park ends as download_failed, not parse_partial.
    Mock::given(method("GET"))
        .and(path_regex(r"^/yell/.*\.pdf$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html>Page not found</html>".to_vec(),
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let aggregator = Scraper::new(test_config(&server, 1)).run().await;
    assert_eq!(aggregator.records()[0].status, ParkStatus::DownloadFailed);
}

#[tokio::test]
async fn test_sheets_auth_failure_leaves_json_sink_intact() {
    // Records computed in-memory; the spreadsheet service rejects the token.
    let records = vec![
        ParkRecord::failed("Yellowstone", ParkStatus::ParsePartial, None),
        ParkRecord::failed("Yosemite", ParkStatus::DownloadFailed, None),
    ];

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("parks_data.json");
    write_json(&json_path, &records).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v4/spreadsheets/.*$"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let sheet = SheetRef {
        spreadsheet: "no-access".to_string(),
        token: "expired".to_string(),
    };
    let err = SheetsWriter::open_at(&server.uri(), &sheet).await.unwrap_err();
    assert!(matches!(err, SinkError::AuthFailed(_)));

    // The JSON sink for the same run is unaffected.
    let parsed: Vec<ParkRecord> =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 2);
}
