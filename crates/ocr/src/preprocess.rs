use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Longest side above which photos are scaled down.
const MAX_SIDE: u32 = 2800;
/// Longest side below which crops are scaled up; tiny card text OCRs badly.
const MIN_SIDE: u32 = 1000;

/// Decode camera/upload bytes (JPEG / PNG / WEBP / …) and return grayscale,
/// contrast-stretched PNG bytes ready for OCR.
pub fn prepare_for_ocr(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(enhance(img))
}

fn rescale(img: DynamicImage) -> DynamicImage {
    let longest = img.width().max(img.height());
    if longest > MAX_SIDE {
        img.resize(MAX_SIDE, MAX_SIDE, FilterType::Lanczos3)
    } else if longest > 0 && longest < MIN_SIDE {
        let factor = MIN_SIDE.div_ceil(longest);
        img.resize(img.width() * factor, img.height() * factor, FilterType::CatmullRom)
    } else {
        img
    }
}

/// Rescale + grayscale + contrast stretch.
fn enhance(img: DynamicImage) -> DynamicImage {
    let gray: GrayImage = rescale(img).to_luma8();

    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if max_px <= min_px {
        // Uniform (or empty) image — nothing to stretch.
        return DynamicImage::ImageLuma8(gray);
    }

    let range = (max_px - min_px) as u32;
    let stretched: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - min_px) as u32 * 255 / range) as u8])
    });

    DynamicImage::ImageLuma8(stretched)
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
