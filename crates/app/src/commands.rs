use anyhow::{Context, Result};
use clap::Args;
use qrcode::QrCode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wifiscan_core::{SecurityType, WifiCredentials, WifiPayload};
use wifiscan_ocr::{process_text, ScanPipeline, ScanReport};

use crate::config::Config;
use crate::{qr, source};

/// How a command ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The card was read but neither field was found.
    NotFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(2),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Photo of the WiFi card, or `-` for stdin.
    pub image: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// File with already-recognized OCR text, or `-` for stdin.
    pub text: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// WPA, WEP or nopass. Defaults to the configured value.
    #[arg(long)]
    pub security: Option<SecurityType>,
    /// Save the QR code as PNG to this file or directory.
    #[arg(long)]
    pub qr_out: Option<PathBuf>,
    /// Also print the raw and corrected OCR text.
    #[arg(long)]
    pub show_text: bool,
    /// Print a JSON document instead of the human-readable summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct QrArgs {
    #[arg(long)]
    pub ssid: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long)]
    pub security: Option<SecurityType>,
    /// Save the QR code as PNG to this file or directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    credentials: &'a WifiCredentials,
    security: SecurityType,
    /// WiFi-config URI, when an SSID was found.
    payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recognized_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized_text: Option<&'a str>,
}

#[cfg(feature = "tesseract")]
fn recognizer(config: &Config) -> wifiscan_ocr::recognizer::tesseract_backend::TesseractRecognizer {
    wifiscan_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(
        config.tesseract.data_path.clone(),
        &config.tesseract.lang,
    )
}

#[cfg(not(feature = "tesseract"))]
fn recognizer(_config: &Config) -> wifiscan_ocr::UnavailableRecognizer {
    tracing::warn!("Built without the `tesseract` feature; image scans will fail");
    wifiscan_ocr::UnavailableRecognizer
}

pub async fn scan(args: ScanArgs, config: &Config) -> Result<Outcome> {
    let image = source::load_image(&args.image).await?;
    tracing::info!("Scanning {} ({} bytes)", args.image, image.len());

    let pipeline = ScanPipeline::new(recognizer(config)).with_preprocessing(config.preprocess);
    let report = pipeline
        .run_detailed(&image)
        .await
        .context("Failed to process image. Please try again.")?;

    present(&report, &args.output, config)
}

pub async fn extract(args: ExtractArgs, config: &Config) -> Result<Outcome> {
    let text = source::load_text(&args.text).await?;
    let report = process_text(text);
    present(&report, &args.output, config)
}

pub fn qr(args: QrArgs, config: &Config) -> Result<Outcome> {
    let security = args.security.unwrap_or(config.security);
    let payload = WifiPayload::new(args.ssid, args.password, security)?;
    let code = qr::encode(&payload)?;

    println!("{}", qr::render_terminal(&code));
    println!("{}", payload.to_uri());
    if let Some(target) = args.out.or_else(|| config.qr.out_dir.clone()) {
        save(&code, &target, &payload.ssid, config)?;
    }
    Ok(Outcome::Done)
}

fn present(report: &ScanReport, output: &OutputArgs, config: &Config) -> Result<Outcome> {
    let creds = &report.credentials;
    let security = output.security.unwrap_or(config.security);
    let payload = WifiPayload::from_credentials(creds, security).ok();

    if output.json {
        let doc = ScanOutput {
            credentials: creds,
            security,
            payload: payload.as_ref().map(WifiPayload::to_uri),
            recognized_text: output.show_text.then_some(report.recognized_text.as_str()),
            normalized_text: output.show_text.then_some(report.normalized_text.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        if output.show_text {
            println!("── OCR text ──\n{}", report.recognized_text.trim_end());
            println!("── Corrected ──\n{}\n", report.normalized_text.trim_end());
        }
        if creds.is_empty() {
            println!("No WiFi details were found. Please try scanning again.");
        } else {
            println!("Network:  {}", creds.ssid.as_deref().unwrap_or("(not found)"));
            println!("Password: {}", creds.password.as_deref().unwrap_or("(not found)"));
            println!("Security: {security}");
        }
    }

    if creds.is_empty() {
        return Ok(Outcome::NotFound);
    }
    let Some(payload) = payload else {
        tracing::warn!("No network name found; use `wifiscan qr --ssid <NAME>` to build a code");
        return Ok(Outcome::Done);
    };
    if lacks_password(creds, security) {
        tracing::warn!("No password found; the QR code carries an empty one");
    }

    let code = qr::encode(&payload)?;
    if !output.json {
        println!("\n{}", qr::render_terminal(&code));
        println!("{}", payload.to_uri());
    }
    if let Some(target) = output.qr_out.clone().or_else(|| config.qr.out_dir.clone()) {
        save(&code, &target, &payload.ssid, config)?;
    }
    Ok(Outcome::Done)
}

/// The network needs a password but the card did not yield one.
fn lacks_password(creds: &WifiCredentials, security: SecurityType) -> bool {
    !creds.is_complete() && security != SecurityType::NoPassword
}

fn save(code: &QrCode, target: &Path, ssid: &str, config: &Config) -> Result<()> {
    let path = qr::resolve_output(target, ssid);
    qr::save_png(code, &path, config.qr.module_size)?;
    tracing::info!("QR code saved to {}", path.display());
    eprintln!("Saved {}", path.display());
    Ok(())
}
