use crate::error::{DocScannerError, Result};
use crate::export::raster::Rasterizer;
use doc_scanner_common::export::pdf_core::{
    band_bottom_mm, slice_pages, RasterImage, A4_HEIGHT_MM, A4_WIDTH_MM, IMAGE_WIDTH_MM,
    MARGIN_MM,
};
use doc_scanner_common::export::snapshot::render_snapshot;
use doc_scanner_common::{AnalysisResult, DetailView};
use printpdf::image_crate::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Detail view → snapshot → pixels → A4 pages.
pub struct PdfExporter<R: Rasterizer> {
    rasterizer: R,
}

impl<R: Rasterizer> PdfExporter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<RenderedPdf> {
        let view = DetailView::from_result(result);
        let snapshot = render_snapshot(&view);
        debug!("snapshot {}x{} px", snapshot.width, snapshot.height);
        let image = self.rasterizer.rasterize(&snapshot)?;
        build_pdf(&view.title, &image)
    }

    /// Writes the PDF and returns its page count.
    pub fn export(&self, result: &AnalysisResult, output_path: &Path) -> Result<usize> {
        let rendered = self.render(result)?;
        std::fs::write(output_path, &rendered.bytes)?;
        Ok(rendered.page_count)
    }
}

/// One A4 portrait page per band of `image`, each band printed
/// `IMAGE_WIDTH_MM` wide from the top-left margin.
pub fn build_pdf(title: &str, image: &RasterImage) -> Result<RenderedPdf> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
    // Pixels per inch that make the band exactly IMAGE_WIDTH_MM wide.
    let dpi = image.width as f32 * MM_PER_INCH / IMAGE_WIDTH_MM;

    let slices = slice_pages(image);
    let page_count = slices.len();
    debug!("{} page(s) at {:.1} dpi", slices.len(), dpi);

    for (slice, band) in slices {
        let (page, layer) = if slice.index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(A4_WIDTH_MM),
                Mm(A4_HEIGHT_MM),
                format!("Layer {}", slice.index + 1),
            )
        };
        if band.height == 0 {
            continue;
        }

        let rgb = RgbImage::from_raw(band.width, band.height, band.to_rgb())
            .ok_or_else(|| DocScannerError::Pdf("buffer de imagem inválido".into()))?;
        let pdf_image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(rgb));
        let transform = ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(band_bottom_mm(&slice))),
            rotate: None,
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            dpi: Some(dpi),
        };
        pdf_image.add_to_layer(doc.get_page(page).get_layer(layer), transform);
    }

    let mut buffer = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buffer);
        doc.save(&mut writer)
            .map_err(|e| DocScannerError::Pdf(format!("erro ao salvar PDF: {:?}", e)))?;
    }
    Ok(RenderedPdf {
        bytes: buffer,
        page_count,
    })
}
