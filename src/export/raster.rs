//! SVG snapshot rasterization with resvg.

use crate::error::{DocScannerError, Result};
use doc_scanner_common::export::pdf_core::{RasterImage, RASTER_SCALE};
use doc_scanner_common::export::snapshot::Snapshot;
use resvg::render;
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};
use usvg::{fontdb, Options, Tree};

/// Turns a laid-out snapshot into pixels.
pub trait Rasterizer {
    fn rasterize(&self, snapshot: &Snapshot) -> Result<RasterImage>;
}

/// Renders with the system fonts at `scale` pixels per layout pixel.
pub struct ResvgRasterizer {
    options: Options<'static>,
    scale: f32,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self::with_scale(RASTER_SCALE)
    }

    pub fn with_scale(scale: f32) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let options = Options {
            fontdb: Arc::new(db),
            ..Options::default()
        };
        Self { options, scale }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, snapshot: &Snapshot) -> Result<RasterImage> {
        let tree = Tree::from_str(&snapshot.svg, &self.options)
            .map_err(|e| DocScannerError::Raster(format!("SVG inválido: {}", e)))?;
        let size = tree.size();
        let width = (size.width() * self.scale).ceil() as u32;
        let height = (size.height() * self.scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| DocScannerError::Raster(format!("tamanho inválido: {}x{}", width, height)))?;

        let mut pixmap_mut = pixmap.as_mut();
        render(&tree, Transform::from_scale(self.scale, self.scale), &mut pixmap_mut);

        let mut rgba = pixmap.take();
        demultiply(&mut rgba);
        Ok(RasterImage::new(width, height, rgba)?)
    }
}

/// tiny-skia stores premultiplied alpha; `RasterImage` is straight alpha.
fn demultiply(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let alpha = px[3] as u32;
        if alpha == 0 || alpha == 255 {
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((*channel as u32 * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_scanner_common::export::snapshot::render_snapshot;
    use doc_scanner_common::{AnalysisResult, DetailView};
    use serde_json::json;

    #[test]
    fn test_demultiply() {
        let mut px = vec![64, 32, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0];
        demultiply(&mut px);
        assert_eq!(&px[..4], &[128, 64, 0, 128]);
        assert_eq!(&px[4..8], &[10, 20, 30, 255]);
        assert_eq!(&px[8..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_rasterize_at_double_scale() {
        let result = AnalysisResult::from_value(json!({
            "data": { "documento": { "tipo_documento": "nota_de_remessa" } }
        }))
        .unwrap();
        let snapshot = render_snapshot(&DetailView::from_result(&result));
        let image = ResvgRasterizer::new().rasterize(&snapshot).unwrap();
        assert_eq!(image.width, snapshot.width * 2);
        assert_eq!(image.height, snapshot.height * 2);
    }

    #[test]
    fn test_rasterize_ocr_with_page_breaks() {
        let result = AnalysisResult::from_value(json!({
            "data": { "documento": {
                "conteudo_completo": "PAGINA 1\u{000c}PAGINA 2\u{0000}",
                "metadata": { "nome_arquivo": "scan\u{000b}.png" }
            } }
        }))
        .unwrap();
        let snapshot = render_snapshot(&DetailView::from_result(&result));
        let image = ResvgRasterizer::new().rasterize(&snapshot).unwrap();
        assert_eq!(image.width, snapshot.width * 2);
    }

    #[test]
    fn test_invalid_svg() {
        let snapshot = Snapshot {
            svg: "<not-svg".into(),
            width: 10,
            height: 10,
        };
        let err = ResvgRasterizer::new().rasterize(&snapshot).unwrap_err();
        assert!(matches!(err, DocScannerError::Raster(_)));
    }
}
