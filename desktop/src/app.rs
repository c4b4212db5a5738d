use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Color32, RichText};
use image::ImageReader;
use tokio_util::sync::CancellationToken;

use doc_scanner::api::ApiClient;
use doc_scanner::config::Config;
use doc_scanner::error::{DocScannerError, Result as ScanResult};
use doc_scanner_common::carousel::{ItemStyle, item_style, paint_order};
use doc_scanner_common::export::export_file_name;
use doc_scanner_common::listing::{DocumentListItem, FetchState};
use doc_scanner_common::upload::quick_summary;
use doc_scanner_common::{AnalysisResult, DetailField, DetailView, SwipeTracker, ViewMode};

use crate::io::{load_result, save_json, save_pdf};
use crate::model::{AppState, ModalSource, Tab};

const CARD_SIZE: egui::Vec2 = egui::vec2(150.0, 190.0);
const TRACK_HEIGHT: f32 = 340.0;
const PERSPECTIVE_PX: f32 = 1000.0;
const THUMB_SIZE: egui::Vec2 = egui::vec2(120.0, 120.0);
const GRID_CARD_WIDTH: f32 = 170.0;

const ACCENT: Color32 = Color32::from_rgb(246, 196, 69);
const CARD_FILL: Color32 = Color32::from_rgb(24, 28, 40);
const CARD_FILL_ACTIVE: Color32 = Color32::from_rgb(31, 35, 48);

pub struct DesktopApp {
    state: AppState,
    client: ApiClient,
    placeholder_image: String,
    swipe: SwipeTracker,
    status: String,
    export_status: String,
    uploading: bool,
    loading: bool,
    exporting: bool,
    /// Cancels the list fetch when the app goes away.
    cancel: CancellationToken,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,
    placeholder: Option<egui::TextureHandle>,
    pending_thumb: Option<ThumbData>,
    thumb_requested: bool,
}

enum UiMessage {
    UploadDone(ScanResult<AnalysisResult>),
    DocumentsLoaded(FetchState),
    ExportDone { message: String },
    Thumb(ThumbData),
}

struct ThumbData {
    size: [usize; 2],
    pixels: Vec<u8>,
}

fn runtime() -> ScanResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

impl DesktopApp {
    pub fn new(config: Config) -> Self {
        let client = ApiClient::from_config(&config).unwrap_or_else(|err| {
            tracing::warn!("falling back to default HTTP client: {}", err);
            ApiClient::new(config.upload_endpoint(), config.list_endpoint())
                .with_retry_policy(config.retry_policy())
        });
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            state: AppState::default(),
            client,
            placeholder_image: config.placeholder_image,
            swipe: SwipeTracker::default(),
            status: String::new(),
            export_status: String::new(),
            uploading: false,
            loading: false,
            exporting: false,
            cancel: CancellationToken::new(),
            tx,
            rx,
            placeholder: None,
            pending_thumb: None,
            thumb_requested: false,
        };
        app.refresh_documents();
        app
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Imagem ou PDF", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "pdf"])
            .add_filter("Todos os arquivos", &["*"])
            .pick_file()
        {
            self.state.select_file(path);
        }
    }

    fn submit_upload(&mut self) {
        let Some(path) = self.state.selected_path.clone() else {
            self.state.form.begin_submit();
            return;
        };
        if self.state.form.begin_submit().is_none() {
            return;
        }
        self.uploading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = runtime().and_then(|rt| rt.block_on(client.upload_file(&path)));
            let _ = tx.send(UiMessage::UploadDone(outcome));
        });
    }

    fn refresh_documents(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.state.dashboard.start_loading();

        let client = self.client.clone();
        let placeholder = self.placeholder_image.clone();
        let cancel = self.cancel.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = runtime()
                .and_then(|rt| rt.block_on(client.load_dashboard(&cancel, &placeholder)));
            match outcome {
                Ok(state) => {
                    let _ = tx.send(UiMessage::DocumentsLoaded(state));
                }
                Err(DocScannerError::Cancelled) => {}
                Err(err) => {
                    tracing::warn!("document list: {}", err);
                    let _ = tx.send(UiMessage::DocumentsLoaded(FetchState::Empty));
                }
            }
        });
    }

    fn open_saved_result(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match load_result(&path) {
            Ok(result) => {
                self.state.upload_modal.open(result);
                self.status = format!("Aberto: {}", path.display());
            }
            Err(err) => self.status = format!("Falha ao abrir: {err:#}"),
        }
    }

    fn download_json(&mut self, result: &AnalysisResult) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export_file_name(result, "json"))
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        self.export_status = match save_json(&path, result) {
            Ok(()) => format!("JSON salvo: {}", path.display()),
            Err(err) => format!("Falha ao salvar JSON: {err:#}"),
        };
    }

    fn download_pdf(&mut self, result: &AnalysisResult) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export_file_name(result, "pdf"))
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };
        self.exporting = true;
        self.export_status = "Gerando PDF...".to_string();

        let result = result.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let message = match save_pdf(&path, &result) {
                Ok(pages) => format!("PDF salvo: {} ({} página(s))", path.display(), pages),
                Err(err) => format!("Falha ao gerar PDF: {err:#}"),
            };
            let _ = tx.send(UiMessage::ExportDone { message });
        });
    }

    fn request_placeholder(&mut self) {
        if self.thumb_requested {
            return;
        }
        self.thumb_requested = true;
        let path = PathBuf::from(&self.placeholder_image);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            if let Some(thumb) = load_thumbnail(&path) {
                let _ = tx.send(UiMessage::Thumb(thumb));
            }
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::UploadDone(outcome) => {
                    self.uploading = false;
                    match outcome {
                        Ok(result) => {
                            self.state.form.finish_success(result);
                            self.state.selected_path = None;
                        }
                        Err(DocScannerError::UploadRejected { status, body }) => {
                            self.state.form.finish_rejected(status, &body);
                        }
                        Err(DocScannerError::Http(err)) => {
                            self.state.form.finish_connection_error(&err.to_string());
                        }
                        Err(err) => self.state.form.finish_connection_error(&err.to_string()),
                    }
                }
                UiMessage::DocumentsLoaded(state) => {
                    self.loading = false;
                    self.state.dashboard.finish_loading(state);
                }
                UiMessage::ExportDone { message } => {
                    self.exporting = false;
                    self.export_status = message;
                }
                UiMessage::Thumb(thumb) => self.pending_thumb = Some(thumb),
            }
        }
    }

    fn process_pending_thumb(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.pending_thumb.take() else {
            return;
        };
        if msg.size[0] == 0 || msg.size[1] == 0 {
            return;
        }
        let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
        self.placeholder =
            Some(ctx.load_texture("document-placeholder", color_image, egui::TextureOptions::default()));
    }

    fn render_upload(&mut self, ui: &mut egui::Ui) {
        ui.heading("Enviar Documento");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.uploading, egui::Button::new(self.state.form.select_label()))
                .clicked()
            {
                self.pick_file();
            }
            let submit = ui.add_enabled(
                self.state.form.can_submit(),
                egui::Button::new(RichText::new("Enviar para Análise").strong()),
            );
            if submit.clicked() {
                self.submit_upload();
            }
            if self.uploading {
                ui.spinner();
            }
        });
        ui.add_space(4.0);
        ui.label(RichText::new(self.state.form.status()).color(Color32::from_gray(190)));

        let Some(result) = self.state.form.response().cloned() else {
            return;
        };
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.label(RichText::new("Resumo Rápido").strong());
            egui::Grid::new("quick_summary").striped(true).show(ui, |ui| {
                for (label, value) in quick_summary(&result) {
                    ui.label(RichText::new(label).color(Color32::from_gray(200)));
                    ui.label(value);
                    ui.end_row();
                }
            });
            if ui.button("Ver Detalhes do Documento").clicked() {
                self.state.upload_modal.open_with(Some(&result));
            }
        });
    }

    fn render_documents(&mut self, ui: &mut egui::Ui) {
        let view_mode = self.state.dashboard.view().view_mode();
        ui.horizontal(|ui| {
            ui.heading("Documentos");
            ui.label(format!("{} itens", self.state.dashboard.count()));
            ui.separator();
            if ui
                .add_enabled(!self.loading, egui::Button::new("Atualizar"))
                .clicked()
            {
                self.refresh_documents();
            }
            if ui
                .button(format!("Ver em {}", view_mode.toggled().label()))
                .clicked()
            {
                self.state.dashboard.toggle_view_mode();
            }
        });
        ui.separator();

        if let Some(message) = self.state.dashboard.fetch_state().message() {
            ui.horizontal(|ui| {
                if self.loading {
                    ui.spinner();
                }
                ui.label(message);
            });
            return;
        }

        self.request_placeholder();
        match view_mode {
            ViewMode::Carousel => self.render_carousel(ui),
            ViewMode::Grid => self.render_grid(ui),
        }
    }

    fn render_carousel(&mut self, ui: &mut egui::Ui) {
        let count = self.state.dashboard.count();
        let active = self.state.dashboard.view().active_index();

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), TRACK_HEIGHT),
            egui::Sense::click_and_drag(),
        );
        let painter = ui.painter_at(rect);

        // Back to front; the last hit box is the topmost card.
        let mut hit_boxes: Vec<(usize, egui::Rect)> = Vec::with_capacity(count);
        for index in paint_order(active, count) {
            let Some(style) = item_style(index, active, count) else {
                continue;
            };
            let card = card_rect(rect, &style);
            if let Some(item) = self.state.dashboard.items().get(index) {
                self.paint_card(&painter, card, item, &style, index == active);
            }
            hit_boxes.push((index, card));
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.swipe.begin(pos.x);
            }
        }
        if response.drag_stopped() {
            let pos = response
                .interact_pointer_pos()
                .or_else(|| ui.ctx().input(|i| i.pointer.latest_pos()));
            match pos {
                Some(pos) => {
                    if let Some(direction) = self.swipe.end(pos.x) {
                        self.state.dashboard.swipe(direction);
                    }
                }
                None => self.swipe.cancel(),
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((index, _)) = hit_boxes.iter().rev().find(|(_, r)| r.contains(pos)) {
                    self.state.dashboard.select_index(*index);
                }
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Anterior").clicked() {
                self.state.dashboard.previous();
            }
            if let Some(item) = self.state.dashboard.active_item() {
                ui.label(RichText::new(&item.name).strong());
                ui.label(RichText::new(&item.date).color(Color32::from_gray(170)));
            }
            if ui.button("Próximo").clicked() {
                self.state.dashboard.next();
            }
        });

        let (left, right, enter) = ui.ctx().input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Enter),
            )
        });
        if left {
            self.state.dashboard.previous();
        }
        if right {
            self.state.dashboard.next();
        }
        if enter && !self.state.dashboard.modal().is_open() {
            let active = self.state.dashboard.view().active_index();
            self.state.dashboard.select_index(active);
        }
    }

    fn paint_card(
        &self,
        painter: &egui::Painter,
        card: egui::Rect,
        item: &DocumentListItem,
        style: &ItemStyle,
        is_active: bool,
    ) {
        // Further back reads dimmer.
        let shade = (PERSPECTIVE_PX / (PERSPECTIVE_PX - style.depth_px)).clamp(0.4, 1.0);
        let tint = Color32::from_gray((255.0 * shade) as u8);
        let rounding = egui::Rounding::same(10.0);

        painter.rect_filled(card, rounding, if is_active { CARD_FILL_ACTIVE } else { CARD_FILL });
        painter.rect_stroke(
            card,
            rounding,
            egui::Stroke::new(
                if is_active { 2.0 } else { 1.0 },
                if is_active { ACCENT } else { Color32::from_gray(60) },
            ),
        );

        let image_rect = egui::Rect::from_min_max(
            card.min + egui::vec2(8.0, 8.0),
            egui::pos2(card.max.x - 8.0, card.max.y - 44.0),
        );
        match &self.placeholder {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    tint,
                );
            }
            None => paint_document_icon(painter, image_rect, tint),
        }

        let text_color = Color32::from_gray((230.0 * shade) as u8);
        painter.text(
            egui::pos2(card.center().x, card.max.y - 30.0),
            egui::Align2::CENTER_CENTER,
            truncate(&item.name, 20),
            egui::FontId::proportional(13.0),
            text_color,
        );
        painter.text(
            egui::pos2(card.center().x, card.max.y - 14.0),
            egui::Align2::CENTER_CENTER,
            &item.date,
            egui::FontId::proportional(11.0),
            Color32::from_gray((160.0 * shade) as u8),
        );
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        let active = self.state.dashboard.view().active_index();
        let mut clicked = None;
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for item in self.state.dashboard.items() {
                    if self.render_grid_card(ui, item, item.index == active) {
                        clicked = Some(item.index);
                    }
                }
            });
        });
        if let Some(index) = clicked {
            self.state.dashboard.select_index(index);
        }
    }

    fn render_grid_card(&self, ui: &mut egui::Ui, item: &DocumentListItem, is_active: bool) -> bool {
        let frame = egui::Frame::none()
            .fill(if is_active { CARD_FILL_ACTIVE } else { CARD_FILL })
            .stroke(egui::Stroke::new(
                1.0,
                if is_active { ACCENT } else { Color32::from_gray(40) },
            ))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(10.0));

        let inner = frame.show(ui, |ui| {
            ui.set_width(GRID_CARD_WIDTH);
            ui.vertical_centered(|ui| {
                match &self.placeholder {
                    Some(texture) => {
                        ui.add(egui::Image::new(texture).fit_to_exact_size(THUMB_SIZE));
                    }
                    None => {
                        let (rect, _) = ui.allocate_exact_size(THUMB_SIZE, egui::Sense::hover());
                        paint_document_icon(ui.painter(), rect, Color32::WHITE);
                    }
                }
                ui.label(RichText::new(truncate(&item.name, 24)).strong());
                ui.label(RichText::new(&item.date).color(Color32::from_gray(170)).size(11.0));
            });
        });

        inner.response.interact(egui::Sense::click()).clicked()
    }

    fn render_detail_window(&mut self, ctx: &egui::Context, source: ModalSource) {
        let Some(result) = self.state.modal(source).data().cloned() else {
            return;
        };
        let view = DetailView::from_result(&result);
        let mut open = true;
        let mut want_pdf = false;
        let mut want_json = false;

        let window_id = match source {
            ModalSource::Upload => "detail_upload",
            ModalSource::Dashboard => "detail_dashboard",
        };
        egui::Window::new(RichText::new(&view.title).strong())
            .id(egui::Id::new(window_id))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([640.0, 720.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    want_pdf = ui
                        .add_enabled(!self.exporting, egui::Button::new("Baixar PDF"))
                        .clicked();
                    want_json = ui.button("Baixar JSON").clicked();
                    if self.exporting {
                        ui.spinner();
                    }
                    if !self.export_status.is_empty() {
                        ui.label(RichText::new(&self.export_status).color(ACCENT));
                    }
                });
                ui.separator();
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    render_detail_body(ui, &view);
                });
            });

        if want_pdf {
            self.download_pdf(&result);
        }
        if want_json {
            self.download_json(&result);
        }
        if !open {
            self.state.close_modal(source);
        }
    }
}

fn render_fields(ui: &mut egui::Ui, id: &str, fields: &[DetailField]) {
    egui::Grid::new(id).striped(true).min_col_width(120.0).show(ui, |ui| {
        for field in fields {
            ui.label(RichText::new(field.label).color(Color32::from_gray(200)));
            ui.label(field.display());
            ui.end_row();
        }
    });
}

fn render_detail_body(ui: &mut egui::Ui, view: &DetailView) {
    ui.group(|ui| {
        ui.label(RichText::new("Informações Principais").strong());
        render_fields(ui, "detail_main", &view.main);
    });
    ui.group(|ui| {
        ui.label(RichText::new("Detalhes do Transporte").strong());
        render_fields(ui, "detail_transport", &view.transport);
    });

    if let Some(products) = &view.products {
        ui.group(|ui| {
            ui.label(RichText::new("Produtos Enviados").strong());
            let columns = products.column_count();
            egui::Grid::new("detail_products").striped(true).show(ui, |ui| {
                for col in 0..columns {
                    let cell = products.header.get(col).map(String::as_str).unwrap_or("");
                    ui.label(RichText::new(cell).strong());
                }
                ui.end_row();
                for row in &products.rows {
                    for col in 0..columns {
                        ui.label(row.get(col).map(String::as_str).unwrap_or(""));
                    }
                    ui.end_row();
                }
            });
        });
    }

    ui.group(|ui| {
        ui.label(RichText::new("Conteúdo Bruto (OCR)").strong());
        egui::ScrollArea::vertical()
            .id_source("detail_raw_text")
            .max_height(200.0)
            .show(ui, |ui| {
                let mut text = view.raw_text.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    });

    egui::CollapsingHeader::new("JSON Completo")
        .default_open(false)
        .show(ui, |ui| {
            if ui.button("Copiar JSON").clicked() {
                ui.output_mut(|o| o.copied_text = view.raw_json.clone());
            }
            let mut text = view.raw_json.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}

/// Screen rect of a carousel card: scaled by the style, narrowed by its
/// Y rotation and shrunk by its depth.
fn card_rect(track: egui::Rect, style: &ItemStyle) -> egui::Rect {
    let depth = PERSPECTIVE_PX / (PERSPECTIVE_PX - style.depth_px);
    let turn = style.rotate_y_deg.to_radians().cos().abs().max(0.3);
    let size = egui::vec2(
        CARD_SIZE.x * style.scale * depth * turn,
        CARD_SIZE.y * style.scale * depth,
    );
    let center = egui::pos2(
        track.left() + track.width() * style.left_percent / 100.0,
        track.center().y,
    );
    egui::Rect::from_center_size(center, size)
}

fn paint_document_icon(painter: &egui::Painter, rect: egui::Rect, tint: Color32) {
    let page = egui::Rect::from_center_size(rect.center(), egui::vec2(rect.width() * 0.5, rect.height() * 0.7));
    painter.rect_filled(page, egui::Rounding::same(3.0), Color32::from_gray(235).linear_multiply(tint.r() as f32 / 255.0));
    let line = egui::Stroke::new(1.5, Color32::from_gray(150));
    for i in 1..6 {
        let y = page.top() + page.height() * i as f32 / 7.0;
        painter.line_segment(
            [egui::pos2(page.left() + 6.0, y), egui::pos2(page.right() - 6.0, y)],
            line,
        );
    }
}

fn load_thumbnail(path: &Path) -> Option<ThumbData> {
    let image = ImageReader::open(path).ok()?.decode().ok()?;
    let thumb = image.thumbnail(THUMB_SIZE.x as u32 * 2, THUMB_SIZE.y as u32 * 2);
    let size = [thumb.width() as usize, thumb.height() as usize];
    Some(ThumbData {
        size,
        pixels: thumb.to_rgba8().into_raw(),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

impl Drop for DesktopApp {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.uploading || self.loading || self.exporting || self.pending_thumb.is_some() {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.process_pending_thumb(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Arquivo", |ui| {
                    if ui.button("Abrir resultado JSON").clicked() {
                        self.open_saved_result();
                        ui.close_menu();
                    }
                });
                ui.separator();
                for tab in [Tab::Upload, Tab::Documents] {
                    ui.selectable_value(&mut self.state.tab, tab, tab.label());
                }
                ui.separator();
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Upload => self.render_upload(ui),
            Tab::Documents => self.render_documents(ui),
        });

        self.render_detail_window(ctx, ModalSource::Upload);
        self.render_detail_window(ctx, ModalSource::Dashboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, TRACK_HEIGHT))
    }

    #[test]
    fn test_card_rect_follows_left_percent() {
        let style = item_style(2, 2, 5).unwrap();
        let card = card_rect(track(), &style);
        // position -2 -> left 0%
        assert!((card.center().x - 0.0).abs() < 1e-3);
        assert!((card.center().y - TRACK_HEIGHT / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_card_rect_centre_item_is_unrotated() {
        // count 5, offset 2 -> position 0: scale 1, no depth, no rotation
        let style = item_style(4, 2, 5).unwrap();
        let card = card_rect(track(), &style);
        assert!((card.width() - CARD_SIZE.x).abs() < 1e-3);
        assert!((card.height() - CARD_SIZE.y).abs() < 1e-3);
        assert!((card.center().x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("nota.png", 20), "nota.png");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
