use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wifiscan_core::SecurityType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Security type used for the QR payload unless overridden per command.
    pub security: SecurityType,
    /// Grayscale/contrast pass before OCR.
    pub preprocess: bool,
    pub tesseract: TesseractConfig,
    pub qr: QrConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Directory holding `*.traineddata`; system default when unset.
    pub data_path: Option<String>,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Where saved QR images go when `--qr-out` names no directory.
    pub out_dir: Option<PathBuf>,
    /// Pixels per QR module in saved PNGs.
    pub module_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            security: SecurityType::default(),
            preprocess: true,
            tesseract: TesseractConfig::default(),
            qr: QrConfig::default(),
        }
    }
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self { data_path: None, lang: "eng".into() }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self { out_dir: None, module_size: 8 }
    }
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise the per-user config
    /// file if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `<config_dir>/config.toml`, e.g. `~/.config/wifiscan/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "wifiscan", "wifiscan")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.preprocess);
        assert_eq!(cfg.tesseract.lang, "eng");
        assert_eq!(cfg.qr.module_size, 8);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let cfg = Config::from_toml(
            r#"
            security = "nopass"

            [tesseract]
            data_path = "/usr/share/tessdata"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.security, SecurityType::NoPassword);
        assert_eq!(cfg.tesseract.data_path.as_deref(), Some("/usr/share/tessdata"));
        assert_eq!(cfg.tesseract.lang, "eng");
        assert!(cfg.preprocess);
    }

    #[test]
    fn unknown_security_is_rejected() {
        assert!(Config::from_toml(r#"security = "WPA-EAP""#).is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wifiscan.toml");
        std::fs::write(&path, "preprocess = false\n[qr]\nmodule_size = 4\n").unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert!(!cfg.preprocess);
        assert_eq!(cfg.qr.module_size, 4);
    }
}
