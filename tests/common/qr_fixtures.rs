//! QR code fixture images
//!
//! Fixtures are rendered at test time from `qrcode` module matrices so the
//! tests control payload, placement and damage exactly.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, imageops};
use qrcode::{Color, EcLevel, QrCode, Version};

/// Pixels per QR module
pub const MODULE_PX: u32 = 8;
/// Light modules around the code
pub const QUIET_ZONE: u32 = 4;

/// Renders `payload` as a version-1, EC level L code
pub fn render_qr(payload: &str) -> GrayImage {
    render_modules(&modules(payload), None)
}

/// Renders `payload` with every module in rows/cols `start..end` inverted
///
/// For a version-1 code, `9..21` covers only data and error-correction
/// modules, so the code stays locatable but cannot be decoded.
pub fn render_damaged_qr(payload: &str, start: usize, end: usize) -> GrayImage {
    render_modules(&modules(payload), Some((start, end)))
}

/// Places several images on one white canvas, left to right with `gap`
/// pixels between them
pub fn side_by_side(images: &[GrayImage], gap: u32) -> GrayImage {
    let width = images.iter().map(|img| img.width()).sum::<u32>() + gap * (images.len() as u32 + 1);
    let height = images.iter().map(|img| img.height()).max().unwrap_or(0) + 2 * gap;

    let mut canvas = GrayImage::from_pixel(width, height, Luma([255]));
    let mut x = gap;
    for img in images {
        imageops::overlay(&mut canvas, img, x as i64, gap as i64);
        x += img.width() + gap;
    }
    canvas
}

/// Saves `image` as PNG under `dir` and returns its path
pub fn save_png(dir: &Path, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("fixture should save");
    path
}

fn modules(payload: &str) -> (usize, Vec<Color>) {
    let code = QrCode::with_version(payload.as_bytes(), Version::Normal(1), EcLevel::L)
        .expect("payload fits in a version-1 code");
    (code.width(), code.to_colors())
}

fn render_modules((width, colors): &(usize, Vec<Color>), damage: Option<(usize, usize)>) -> GrayImage {
    let mut colors = colors.clone();
    if let Some((start, end)) = damage {
        for row in start..end {
            for col in start..end {
                let idx = row * width + col;
                colors[idx] = match colors[idx] {
                    Color::Dark => Color::Light,
                    Color::Light => Color::Dark,
                };
            }
        }
    }

    let side = (*width as u32 + 2 * QUIET_ZONE) * MODULE_PX;
    GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let my = (y / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let inside = mx >= 0 && my >= 0 && (mx as usize) < *width && (my as usize) < *width;
        if inside && colors[my as usize * width + mx as usize] == Color::Dark {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}
