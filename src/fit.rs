//! Aspect-ratio-preserving fit onto a fixed-size solid canvas.

use crate::config::TargetSize;
use crate::error::{AssetError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    pub background: [u8; 3],
    pub jpeg_quality: u8,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            jpeg_quality: 95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOutcome {
    pub source_size: (u32, u32),
    pub fitted_size: (u32, u32),
    pub offset: (u32, u32),
    pub canvas_size: (u32, u32),
}

/// Largest size with the source's aspect ratio that fits inside `target`.
///
/// The ratio test and the scaled side are computed in integers, so the
/// scaled side is the floor of the exact value and never exceeds the canvas.
/// Returns `None` for a zero-sized source, which has no aspect ratio.
pub fn fit_dimensions(width: u32, height: u32, target: TargetSize) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));

    // w / h > tw / th
    if w * th > tw * h {
        let new_height = (tw * h / w).max(1);
        Some((target.width, new_height as u32))
    } else {
        let new_width = (th * w / h).max(1);
        Some((new_width as u32, target.height))
    }
}

/// `(left, top)` placing a `fitted` image in the middle of `target`.
pub fn centre_offsets(fitted: (u32, u32), target: TargetSize) -> (u32, u32) {
    let left = target.width.saturating_sub(fitted.0) / 2;
    let top = target.height.saturating_sub(fitted.1) / 2;
    (left, top)
}

fn check_target(target: TargetSize) -> Result<()> {
    if target.width == 0 || target.height == 0 {
        return Err(AssetError::InvalidTargetSize {
            width: target.width,
            height: target.height,
        });
    }
    Ok(())
}

/// Scales `img` into `target` with Lanczos3 and centres it on a solid canvas.
/// Transparent pixels are blended over the background.
pub fn fit_and_pad(
    img: &DynamicImage,
    target: TargetSize,
    background: [u8; 3],
) -> Result<(RgbImage, FitOutcome)> {
    check_target(target)?;

    let (width, height) = (img.width(), img.height());
    let fitted =
        fit_dimensions(width, height, target).ok_or(AssetError::EmptyImage { width, height })?;
    let offset = centre_offsets(fitted, target);

    let source = img.to_rgba8();
    let scaled = if fitted == (width, height) {
        source
    } else {
        imageops::resize(&source, fitted.0, fitted.1, FilterType::Lanczos3)
    };

    let [r, g, b] = background;
    let mut canvas = RgbaImage::from_pixel(target.width, target.height, Rgba([r, g, b, 255]));
    imageops::overlay(&mut canvas, &scaled, i64::from(offset.0), i64::from(offset.1));

    let outcome = FitOutcome {
        source_size: (width, height),
        fitted_size: fitted,
        offset,
        canvas_size: (target.width, target.height),
    };

    Ok((DynamicImage::ImageRgba8(canvas).to_rgb8(), outcome))
}

pub fn write_jpeg(img: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).map_err(|e| AssetError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    encoder
        .encode(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)
        .map_err(|e| AssetError::image(path, e))?;
    writer.flush().map_err(|e| AssetError::io(path, e))
}

/// Decodes `src`, fits it into `target` and writes the canvas to `dst` as JPEG.
pub fn process_file(
    src: &Path,
    dst: &Path,
    target: TargetSize,
    options: &FitOptions,
) -> Result<FitOutcome> {
    check_target(target)?;

    // Sniff the format from content; extensions in screenshot folders are not reliable
    let img = image::io::Reader::open(src)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| AssetError::io(src, e))?
        .decode()
        .map_err(|e| AssetError::image(src, e))?;

    let (canvas, outcome) = fit_and_pad(&img, target, options.background)?;
    write_jpeg(&canvas, dst, options.jpeg_quality)?;
    Ok(outcome)
}
