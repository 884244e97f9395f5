use std::future::Future;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

impl From<crate::preprocess::PreprocessError> for OcrError {
    fn from(e: crate::preprocess::PreprocessError) -> Self {
        OcrError::ImageDecode(e.to_string())
    }
}

/// Characters a WiFi card can plausibly carry; everything else is noise.
pub const CHAR_WHITELIST: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789:=-_.,;/\\()[]{}'\"|<>?!@#$%^&* ";

/// Abstraction over an OCR backend.
/// Implementations accept encoded image bytes (PNG/JPEG/…) and resolve to the
/// recognized text. Recognition may be slow; callers await exactly one
/// outstanding call per scan.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8])
        -> impl Future<Output = Result<String, OcrError>> + Send;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — useful for exercising the extraction pipeline
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    async fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Stand-in used when the binary was built without an OCR engine.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    async fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError, CHAR_WHITELIST};
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    /// Single uniform text block, whitelisted glyphs, spacing kept intact.
    fn configure(lt: &mut LepTess) -> Result<(), OcrError> {
        let settings = [
            (Variable::TesseditCharWhitelist, CHAR_WHITELIST),
            (Variable::TesseditPagesegMode, "6"),
            (Variable::PreserveInterwordSpaces, "1"),
        ];
        for (var, value) in settings {
            lt.set_variable(var, value)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
        }
        Ok(())
    }

    impl OcrBackend for TesseractRecognizer {
        async fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let data_path = self.data_path.clone();
            let lang = self.lang.clone();
            let bytes = image_bytes.to_vec();

            // libtesseract blocks and its handle is not Send.
            tokio::task::spawn_blocking(move || {
                let mut lt = LepTess::new(data_path.as_deref(), &lang)
                    .map_err(|e| OcrError::Engine(e.to_string()))?;
                configure(&mut lt)?;
                lt.set_image_from_mem(&bytes)
                    .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
                lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
            })
            .await
            .map_err(|e| OcrError::Engine(e.to_string()))?
        }
    }
}
