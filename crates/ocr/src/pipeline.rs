use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;
use wifiscan_core::WifiCredentials;

use crate::extract::Extractor;
use crate::normalize::normalize;
use crate::preprocess;
use crate::reconcile::reconcile;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("OCR recognition failed: {0}")]
    OcrFailure(#[from] OcrError),
    #[error("A scan is already in progress")]
    Busy,
}

/// Everything one scan produced. Owned by that scan alone.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Raw OCR text output.
    pub recognized_text: String,
    /// Text after OCR-confusion repair.
    pub normalized_text: String,
    pub credentials: WifiCredentials,
}

/// Orchestrates: preprocess → OCR → normalize → extract → reconcile.
///
/// Runs hold no shared state, so dropping a pending future (the user walked
/// away mid-scan) is always safe.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: R,
    preprocess: bool,
    in_flight: AtomicBool,
}

impl<R: OcrBackend> ScanPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer, preprocess: true, in_flight: AtomicBool::new(false) }
    }

    /// Skip grayscale/contrast preprocessing and hand the bytes to the
    /// backend untouched.
    pub fn with_preprocessing(mut self, enabled: bool) -> Self {
        self.preprocess = enabled;
        self
    }

    /// Scan one image and return whatever credentials could be found.
    pub async fn run(&self, image: &[u8]) -> Result<WifiCredentials, PipelineError> {
        Ok(self.run_detailed(image).await?.credentials)
    }

    /// Like [`run`](Self::run), keeping the intermediate texts.
    pub async fn run_detailed(&self, image: &[u8]) -> Result<ScanReport, PipelineError> {
        let recognized_text = self.recognize(image).await.inspect_err(|e| {
            tracing::warn!("Scan aborted: {e}");
        })?;
        tracing::debug!(chars = recognized_text.len(), "OCR finished");
        Ok(process_text(recognized_text))
    }

    /// Like [`run`](Self::run), but refuses to start while another guarded
    /// scan on this pipeline is still outstanding.
    pub async fn try_run(&self, image: &[u8]) -> Result<WifiCredentials, PipelineError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(PipelineError::Busy)?;
        self.run(image).await
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        if self.preprocess {
            let prepared = preprocess::prepare_for_ocr(image)?;
            self.recognizer.recognize(&prepared).await
        } else {
            self.recognizer.recognize(image).await
        }
    }
}

/// Run the text stages on already-recognized text. Never fails.
pub fn process_text(recognized_text: String) -> ScanReport {
    let normalized_text = normalize(&recognized_text);
    if normalized_text != recognized_text {
        tracing::debug!("Normalizer repaired OCR text");
    }

    let partial = Extractor::extract(&normalized_text);
    let credentials = reconcile(&normalized_text, partial.clone());
    if credentials != partial {
        tracing::debug!("Reconciler filled fields from known literals");
    }
    if credentials.is_empty() {
        tracing::info!("No WiFi credentials found");
    }

    ScanReport { recognized_text, normalized_text, credentials }
}

/// Marks a guarded scan as outstanding until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
