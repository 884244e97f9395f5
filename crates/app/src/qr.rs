use anyhow::{Context, Result};
use image::Luma;
use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode};
use std::path::{Path, PathBuf};
use wifiscan_core::WifiPayload;

pub fn encode(payload: &WifiPayload) -> Result<QrCode> {
    let uri = payload.to_uri();
    QrCode::with_error_correction_level(uri.as_bytes(), EcLevel::M)
        .context("Payload does not fit in a QR code")
}

/// Dense half-block rendering for a terminal, indented two columns.
pub fn render_terminal(code: &QrCode) -> String {
    code.render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build()
        .lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn save_png(code: &QrCode, path: &Path, module_size: u32) -> Result<()> {
    code.render::<Luma<u8>>()
        .module_dimensions(module_size, module_size)
        .quiet_zone(true)
        .build()
        .save(path)
        .with_context(|| format!("Failed to save QR code to {}", path.display()))
}

/// `<ssid>-wifi-qr.png`, with anything unsafe in a file name replaced.
pub fn default_file_name(ssid: &str) -> String {
    let stem: String = ssid
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}-wifi-qr.png")
}

/// A directory target gets the default file name appended.
pub fn resolve_output(target: &Path, ssid: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_file_name(ssid))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifiscan_core::SecurityType;

    fn payload() -> WifiPayload {
        WifiPayload::new("JP", "tester123", SecurityType::Wpa).unwrap()
    }

    #[test]
    fn terminal_render_is_indented_blocks() {
        let code = encode(&payload()).unwrap();
        let text = render_terminal(&code);
        assert!(text.lines().count() > 10);
        assert!(text.lines().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        save_png(&encode(&payload()).unwrap(), &path, 4).unwrap();
        let img = image::open(&path).unwrap();
        assert!(img.width() > 21 * 4);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn file_name_is_sanitized() {
        assert_eq!(default_file_name("JP"), "JP-wifi-qr.png");
        assert_eq!(default_file_name("Cafe Guest/5G"), "Cafe_Guest_5G-wifi-qr.png");
    }

    #[test]
    fn directory_target_gets_default_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_output(dir.path(), "JP"), dir.path().join("JP-wifi-qr.png"));
        let file = dir.path().join("mine.png");
        assert_eq!(resolve_output(&file, "JP"), file);
    }
}
