//! End-to-end card scans through the public pipeline API.

use wifiscan_ocr::{
    normalize, process_text, reconcile, Extractor, MockRecognizer, OcrBackend, OcrError,
    PipelineError, ScanPipeline, WifiCredentials,
};

struct RejectingRecognizer;

impl OcrBackend for RejectingRecognizer {
    async fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::Engine("worker failed to initialize".into()))
    }
}

async fn scan(text: &str) -> WifiCredentials {
    ScanPipeline::new(MockRecognizer::new(text))
        .with_preprocessing(false)
        .run(b"card.jpg")
        .await
        .expect("mock OCR never fails")
}

#[tokio::test]
async fn garbled_demo_card() {
    let creds = scan("W|F|: J P\nPass tester 123").await;
    assert_eq!(creds.ssid.as_deref(), Some("JP"));
    assert_eq!(creds.password.as_deref(), Some("tester123"));
}

#[test]
fn garbled_demo_card_normalizes_to_canonical_lines() {
    let text = normalize("W|F|: J P\nPass tester 123");
    assert!(text.contains("WIFI: JP"), "{text:?}");
    assert!(text.contains("Password: tester123"), "{text:?}");
}

#[test]
fn dropped_or_extra_password_digits_still_yield_demo_password() {
    for text in ["Pass tester 12", "Password: tester1234"] {
        let report = process_text(text.into());
        assert_eq!(report.credentials.password.as_deref(), Some("tester123"), "{text:?}");
    }
}

#[tokio::test]
async fn labelled_home_router_card() {
    let creds = scan("Network Name: HomeNet5G\nSecurity Key: qwerty99").await;
    assert_eq!(creds.ssid.as_deref(), Some("HomeNet5G"));
    assert_eq!(creds.password.as_deref(), Some("qwerty99"));
}

#[tokio::test]
async fn unreadable_card_finds_nothing() {
    let creds = scan("Lorem ipsum dolor sit amet\n42 / 7 ::").await;
    assert_eq!(creds, WifiCredentials::default());
}

#[tokio::test]
async fn ocr_rejection_surfaces_as_failure() {
    let pipeline = ScanPipeline::new(RejectingRecognizer).with_preprocessing(false);
    let result = pipeline.run(b"card.jpg").await;
    assert!(matches!(result, Err(PipelineError::OcrFailure(OcrError::Engine(_)))));
}

#[tokio::test]
async fn independent_runs_do_not_share_results() {
    let a = scan("SSID: First\nPassword: one").await;
    let b = scan("nothing here").await;
    assert_eq!(a.ssid.as_deref(), Some("First"));
    assert!(b.is_empty());
}

#[test]
fn labels_lost_but_literals_survive() {
    // No label pattern matches, only the reconciler recovers the values.
    let text = "#JP# ~tester123~";
    assert!(Extractor::extract(text).is_empty());
    let report = process_text(text.to_string());
    assert_eq!(report.credentials.ssid.as_deref(), Some("JP"));
    assert_eq!(report.credentials.password.as_deref(), Some("tester123"));
}

#[test]
fn canonical_literals_always_extracted() {
    for text in [
        "WIFI: JP",
        "header\nWIFI: JP\nfooter",
        "Password: tester123",
        "foo bar\nPassword: tester123 \n",
    ] {
        let creds = Extractor::extract(text);
        if text.contains("WIFI: JP") {
            assert_eq!(creds.ssid.as_deref(), Some("JP"), "{text:?}");
        }
        if text.contains("Password: tester123") {
            assert_eq!(creds.password.as_deref(), Some("tester123"), "{text:?}");
        }
    }
}

#[test]
fn higher_precedence_label_wins() {
    let creds = Extractor::extract("WiFi Foo2\nmore text\nSSID: Foo");
    assert_eq!(creds.ssid.as_deref(), Some("Foo"));
}

#[test]
fn reconciler_keeps_extracted_values() {
    let extracted = Extractor::extract("SSID: Office\nPassword: hunter2\nJP tester123");
    let reconciled = reconcile("SSID: Office\nPassword: hunter2\nJP tester123", extracted.clone());
    assert_eq!(reconciled, extracted);
}
