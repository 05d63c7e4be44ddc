//! Orchestration loop against mock HTTP servers

mod helper;

use mockito::Server;
use serde_json::{Value, json};

use checksum_url::digest::{DigestAlgorithm, DigestReader};
use checksum_url::gate::ABORT_PROMPT;
use checksum_url::harvest::{HarvestOptions, HarvestOutcome, harvest};
use checksum_url::navigation::PackageInfo;
use checksum_url::output::JsonOutput;
use checksum_url::version::VersionString;

use helper::{FakeNavigator, RecordedFailure, RecordingOutput, ScriptedGate};

const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

#[tokio::test]
async fn failing_url_is_reported_inline_and_the_batch_continues() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/app-3.0.zip")
        .with_status(200)
        .with_body("hello world")
        .create_async()
        .await;
    let second = server
        .mock("GET", "/app-2.0.zip")
        .with_status(404)
        .create_async()
        .await;
    let third = server
        .mock("GET", "/app-1.0.zip")
        .with_status(200)
        .with_body("hello world")
        .create_async()
        .await;

    let urls = [
        format!("{}/app-3.0.zip", server.url()),
        format!("{}/app-2.0.zip", server.url()),
        format!("{}/app-1.0.zip", server.url()),
    ];
    let mut navigator = FakeNavigator::new(vec![
        (urls[0].clone(), "3.0"),
        (urls[1].clone(), "2.0"),
        (urls[2].clone(), "1.0"),
    ])
    .with_package(PackageInfo {
        name: "app".to_string(),
        ..PackageInfo::default()
    });
    let reader = DigestReader::new(DigestAlgorithm::Sha256);
    let mut output = RecordingOutput::default();
    let mut gate = ScriptedGate::default();
    let mut report = Vec::<u8>::new();

    let outcome = harvest(
        &mut navigator,
        &reader,
        &mut output,
        &mut gate,
        &mut report,
        &HarvestOptions::default(),
    )
    .await
    .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    assert_eq!(outcome, HarvestOutcome::Completed { hashed: 2, failed: 1 });
    assert_eq!(outcome.exit_status(), 0);
    assert!(gate.prompts.is_empty());

    let hashed: Vec<(&str, usize)> = output
        .hashes
        .iter()
        .map(|hash| (hash.url.as_str(), hash.index))
        .collect();
    assert_eq!(hashed, vec![(urls[0].as_str(), 1), (urls[2].as_str(), 3)]);
    assert!(output.hashes.iter().all(|hash| hash.hash == HELLO_SHA256 && hash.total == 3));

    assert!(report.is_empty());
    assert_eq!(
        output.failures,
        vec![RecordedFailure {
            url: urls[1].clone(),
            message: "download failed [response was 404]".to_string(),
            index: 2,
        }]
    );

    let (package, versions) = output.finished.unwrap();
    assert_eq!(package.map(|package| package.name), Some("app".to_string()));
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[&urls[0]], Some(VersionString::new("3.0")));
    assert!(!versions.contains_key(&urls[1]));
}

#[tokio::test]
async fn json_manifest_stays_valid_when_a_download_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/app-2.0.zip")
        .with_status(200)
        .with_body("hello world")
        .create_async()
        .await;
    server
        .mock("GET", "/app-1.0.zip")
        .with_status(404)
        .create_async()
        .await;

    let good = format!("{}/app-2.0.zip", server.url());
    let bad = format!("{}/app-1.0.zip", server.url());
    let mut navigator = FakeNavigator::new(vec![(good.clone(), "2.0"), (bad.clone(), "1.0")]);
    let reader = DigestReader::new(DigestAlgorithm::Sha256);
    let mut output = JsonOutput::new(Vec::new(), DigestAlgorithm::Sha256);
    let mut gate = ScriptedGate::default();
    let mut report = Vec::<u8>::new();

    let outcome = harvest(
        &mut navigator,
        &reader,
        &mut output,
        &mut gate,
        &mut report,
        &HarvestOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, HarvestOutcome::Completed { hashed: 1, failed: 1 });
    assert!(report.is_empty());

    let manifest: Value = serde_json::from_slice(&output.into_inner()).unwrap();
    assert_eq!(
        manifest,
        json!({
            "package": null,
            "digest": "sha256",
            "files": [{"url": good, "version": "2.0", "hash": HELLO_SHA256}],
            "failures": [{"url": bad, "error": "download failed [response was 404]"}]
        })
    );
}

#[tokio::test]
async fn fail_early_abort_stops_before_the_next_url() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/a.zip")
        .with_status(200)
        .with_body("hello world")
        .create_async()
        .await;
    server
        .mock("GET", "/b.zip")
        .with_status(500)
        .create_async()
        .await;
    let never = server
        .mock("GET", "/c.zip")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let mut navigator = FakeNavigator::new(vec![
        (format!("{}/a.zip", server.url()), "1"),
        (format!("{}/b.zip", server.url()), "2"),
        (format!("{}/c.zip", server.url()), "3"),
    ]);
    let reader = DigestReader::new(DigestAlgorithm::Sha256);
    let mut output = RecordingOutput::default();
    let mut gate = ScriptedGate::new([true]);
    let mut report = Vec::<u8>::new();
    let options = HarvestOptions {
        fail_early: true,
        ..HarvestOptions::default()
    };

    let outcome = harvest(&mut navigator, &reader, &mut output, &mut gate, &mut report, &options)
        .await
        .unwrap();

    never.assert_async().await;
    assert_eq!(outcome, HarvestOutcome::Aborted { index: 2 });
    assert_eq!(outcome.exit_status(), 1);
    assert_eq!(gate.prompts, vec![ABORT_PROMPT.to_string()]);
    assert_eq!(output.hashes.len(), 1);
    assert!(output.finished.is_none());

    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].message, "download failed [response was 500]");
    assert_eq!(String::from_utf8(report).unwrap(), "exiting...\n");
}

#[tokio::test]
async fn root_is_opened_before_discovery() {
    let mut server = Server::new_async().await;
    let root = server
        .mock("GET", "/downloads/")
        .with_status(200)
        .with_body("<html></html>")
        .expect(1)
        .create_async()
        .await;

    let mut navigator = FakeNavigator::new(vec![]);
    let reader = DigestReader::new(DigestAlgorithm::Sha256);
    let mut output = RecordingOutput::default();
    let mut gate = ScriptedGate::default();
    let options = HarvestOptions {
        root: Some(format!("{}/downloads/", server.url())),
        ..HarvestOptions::default()
    };

    let outcome = harvest(
        &mut navigator,
        &reader,
        &mut output,
        &mut gate,
        &mut Vec::<u8>::new(),
        &options,
    )
    .await
    .unwrap();

    root.assert_async().await;
    assert_eq!(outcome, HarvestOutcome::Completed { hashed: 0, failed: 0 });
    assert!(output.finished.is_some());
}

#[tokio::test]
async fn failed_login_ends_the_run() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/login")
        .with_status(503)
        .create_async()
        .await;

    let mut navigator = FakeNavigator::new(vec![]);
    let reader = DigestReader::new(DigestAlgorithm::Sha256);
    let mut output = RecordingOutput::default();
    let mut gate = ScriptedGate::default();
    let options = HarvestOptions {
        root: Some(format!("{}/login", server.url())),
        ..HarvestOptions::default()
    };

    let result = harvest(
        &mut navigator,
        &reader,
        &mut output,
        &mut gate,
        &mut Vec::<u8>::new(),
        &options,
    )
    .await;

    assert!(matches!(
        result,
        Err(checksum_url::error::HarvestError::Navigator(ref e)) if e.is_authentication()
    ));
    assert!(output.finished.is_none());
}
