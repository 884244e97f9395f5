use anyhow::{bail, Context, Result};
use tokio::io::AsyncReadExt;

/// Read one still image (encoded bytes) from a path, or stdin for `-`.
pub async fn load_image(source: &str) -> Result<Vec<u8>> {
    let bytes = read_source(source).await?;
    if bytes.is_empty() {
        bail!("Image '{source}' is empty");
    }
    Ok(bytes)
}

/// Read already-recognized OCR text from a path, or stdin for `-`.
pub async fn load_text(source: &str) -> Result<String> {
    let bytes = read_source(source).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn read_source(source: &str) -> Result<Vec<u8>> {
    if source == "-" {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    tokio::fs::read(source)
        .await
        .with_context(|| format!("Failed to read '{source}'"))
}
