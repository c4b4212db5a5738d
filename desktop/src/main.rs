mod app;
mod io;
mod model;

use app::DesktopApp;
use doc_scanner::config::Config;

fn main() -> eframe::Result<()> {
    doc_scanner::logging::init(std::env::var_os("DOC_SCANNER_VERBOSE").is_some());
    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("using default config: {}", err);
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Doc-Scanner")
            .with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Doc-Scanner",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(config))),
    )
}
