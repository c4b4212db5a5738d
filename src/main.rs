use clap::Parser;
use doc_scanner::api::ApiClient;
use doc_scanner::export::{export_result, PdfExporter, ResvgRasterizer};
use doc_scanner::{cli, config, error, logging, view};
use doc_scanner_common::listing::build_items;
use doc_scanner_common::{AnalysisResult, DetailView, RetryPolicy, ViewMode};
use cli::{Cli, Commands};
use config::Config;
use error::{DocScannerError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_result(path: &std::path::Path) -> Result<AnalysisResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(AnalysisResult::from_json_str(&content)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Upload { file, output, details } => {
            println!("📄 doc-scanner - Envio de documento\n");
            let client = ApiClient::from_config(&config)?;

            println!("[1/2] Arquivo selecionado: {}", file.display());
            tracing::debug!("endpoint: {}", client.upload_endpoint());
            let pb = spinner("Enviando arquivo e aguardando análise...");
            let outcome = client.upload_file(&file).await;
            pb.finish_and_clear();

            let result = match outcome {
                Ok(result) => result,
                Err(err @ DocScannerError::UnsupportedFile(_)) => {
                    println!("❌ Por favor, selecione um arquivo de imagem ou PDF.");
                    return Err(err);
                }
                Err(err) => {
                    println!("❌ {}", err.upload_status());
                    return Err(err);
                }
            };
            println!("✔ Sucesso! Documento processado.\n");

            print!("{}", view::render_summary(&result));
            if details {
                println!();
                print!("{}", view::render_detail(&DetailView::from_result(&result), false));
            }

            if let Some(output) = output {
                println!("\n[2/2] Salvando resposta...");
                doc_scanner::export::json::export_json(&result, &output)?;
                println!("✔ Resposta salva: {}", output.display());
            }
        }

        Commands::List { output, attempts, base_delay_ms } => {
            println!("📚 doc-scanner - Documentos\n");
            let default_policy = config.retry_policy();
            let policy = RetryPolicy::new(
                attempts.unwrap_or(default_policy.max_attempts),
                base_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(default_policy.base_delay),
            );
            let client = ApiClient::from_config(&config)?.with_retry_policy(policy);

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            tracing::debug!("endpoint: {}", client.list_endpoint());
            let pb = spinner("Carregando documentos...");
            let outcome = client.fetch_documents(&cancel).await;
            pb.finish_and_clear();

            let documents = match outcome {
                Ok(documents) => documents,
                Err(DocScannerError::Cancelled) => return Err(DocScannerError::Cancelled),
                Err(err) => {
                    tracing::warn!("{}", err);
                    Vec::new()
                }
            };

            if let Some(output) = output {
                let raw: Vec<&serde_json::Value> = documents.iter().map(|d| d.raw()).collect();
                std::fs::write(&output, serde_json::to_string_pretty(&raw)?)?;
                println!("✔ Lista salva: {}", output.display());
            }

            let items = build_items(documents, &config.placeholder_image);
            if items.is_empty() {
                println!("{}", doc_scanner_common::listing::EMPTY_MESSAGE);
            } else {
                print!("{}", view::render_list(&items));
                println!("\n✅ {} documento(s)", items.len());
            }
        }

        Commands::Show { input, json } => {
            let result = read_result(&input)?;
            print!("{}", view::render_detail(&DetailView::from_result(&result), json));
        }

        Commands::Export { input, format, output } => {
            println!("📄 doc-scanner - Exportação\n");
            let result = read_result(&input)?;
            let exporter = PdfExporter::new(ResvgRasterizer::new());
            let written = export_result(&result, format, &output, &exporter)?;
            println!("\n✅ {} arquivo(s) gerado(s)", written.len());
        }

        Commands::Carousel { count, active, grid } => {
            let mode = if grid { ViewMode::Grid } else { ViewMode::Carousel };
            println!("{} ({} itens, ativo {})", mode.label(), count, active);
            print!("{}", view::render_carousel(active, count, mode));
        }

        Commands::Config { set_upload_endpoint, set_list_endpoint, show } => {
            if let Some(url) = set_upload_endpoint {
                config.set_upload_endpoint(url)?;
                println!("✔ Endpoint de envio salvo");
            }
            if let Some(url) = set_list_endpoint {
                config.set_list_endpoint(url)?;
                println!("✔ Endpoint da lista salvo");
            }

            if show {
                println!("Configuração ({}):", Config::config_path()?.display());
                println!("  Envio: {}", config.upload_endpoint());
                println!("  Lista: {}", config.list_endpoint());
                println!("  Tentativas: {}", config.max_attempts);
                println!("  Espera inicial: {}ms", config.base_delay_ms);
                println!("  Imagem padrão: {}", config.placeholder_image);
                match config.timeout() {
                    Some(timeout) => println!("  Timeout: {}s", timeout.as_secs()),
                    None => println!("  Timeout: desativado"),
                }
            }
        }
    }

    Ok(())
}
