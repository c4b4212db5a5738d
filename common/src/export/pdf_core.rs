//! PDF export core utilities shared by CLI/desktop.
//!
//! A rasterized snapshot is scaled to the printable width of an A4 page and
//! cut into page-height bands, one band per page.

use crate::error::{Error, Result};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// Printed width of the snapshot image.
pub const IMAGE_WIDTH_MM: f32 = 190.0;
/// Height of the band each page shows.
pub const PAGE_BAND_HEIGHT_MM: f32 = 277.0;
/// Snapshot pixels per layout pixel.
pub const RASTER_SCALE: f32 = 2.0;

/// RGBA8 pixels, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(Error::Raster(format!(
                "raster of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Rows `[top, top + height)`, clamped to the image.
    pub fn crop_rows(&self, top: u32, height: u32) -> RasterImage {
        let top = top.min(self.height);
        let bottom = top.saturating_add(height).min(self.height);
        let row_bytes = self.width as usize * 4;
        let rgba = self.rgba[top as usize * row_bytes..bottom as usize * row_bytes].to_vec();
        RasterImage {
            width: self.width,
            height: bottom - top,
            rgba,
        }
    }

    /// Drops the alpha channel, compositing over white.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.rgba.chunks_exact(4) {
            let alpha = px[3] as u32;
            for &channel in &px[..3] {
                let value = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
                rgb.push(value as u8);
            }
        }
        rgb
    }
}

/// One page's share of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    pub index: usize,
    pub top_px: u32,
    pub height_px: u32,
    /// Printed height of this band.
    pub height_mm: f32,
}

/// Printed height of an image scaled to `IMAGE_WIDTH_MM`.
pub fn image_height_mm(width_px: u32, height_px: u32) -> f32 {
    if width_px == 0 {
        return 0.0;
    }
    height_px as f32 * IMAGE_WIDTH_MM / width_px as f32
}

/// Pixel rows that fit in one page band at this image width.
pub fn rows_per_page(width_px: u32) -> u32 {
    ((PAGE_BAND_HEIGHT_MM * width_px as f32 / IMAGE_WIDTH_MM).floor() as u32).max(1)
}

/// Cuts an image of the given size into page bands.
///
/// Always yields at least one page; an image exactly one band tall yields
/// exactly one page.
pub fn paginate(width_px: u32, height_px: u32) -> Vec<PageSlice> {
    let per_page = rows_per_page(width_px);
    let pages = height_px.div_ceil(per_page).max(1);
    (0..pages)
        .map(|index| {
            let top_px = index * per_page;
            let height_px = per_page.min(height_px.saturating_sub(top_px));
            PageSlice {
                index: index as usize,
                top_px,
                height_px,
                height_mm: image_height_mm(width_px, height_px),
            }
        })
        .collect()
}

/// Paginates and crops in one go.
pub fn slice_pages(image: &RasterImage) -> Vec<(PageSlice, RasterImage)> {
    paginate(image.width, image.height)
        .into_iter()
        .map(|slice| {
            let band = image.crop_rows(slice.top_px, slice.height_px);
            (slice, band)
        })
        .collect()
}

/// Distance from the page's bottom edge to the band's bottom edge, for PDF
/// coordinate systems whose origin is bottom-left.
pub fn band_bottom_mm(slice: &PageSlice) -> f32 {
    A4_HEIGHT_MM - MARGIN_MM - slice.height_mm
}
