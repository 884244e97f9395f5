pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod reconcile;

pub use extract::{Extractor, KNOWN_PASSWORD, KNOWN_SSID};
pub use normalize::normalize;
pub use pipeline::{process_text, PipelineError, ScanPipeline, ScanReport};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use reconcile::reconcile;
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use wifiscan_core::{SecurityType, WifiCredentials};
