use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-scanner")]
#[command(about = "Envio de documentos para análise e visualização dos dados extraídos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Exibe logs detalhados
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Envia um documento (imagem ou PDF) para análise
    Upload {
        /// Arquivo a enviar
        #[arg(required = true)]
        file: PathBuf,

        /// Salva a resposta JSON neste arquivo
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mostra os detalhes completos após o envio
        #[arg(short, long)]
        details: bool,
    },

    /// Lista os documentos já analisados
    List {
        /// Salva a lista recebida (JSON) neste arquivo
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Número máximo de tentativas
        #[arg(long)]
        attempts: Option<u32>,

        /// Espera inicial entre tentativas (ms), dobrando a cada falha
        #[arg(long)]
        base_delay_ms: Option<u64>,
    },

    /// Mostra os detalhes de um resultado salvo
    Show {
        /// Arquivo JSON do resultado
        #[arg(required = true)]
        input: PathBuf,

        /// Inclui o JSON completo
        #[arg(long)]
        json: bool,
    },

    /// Exporta um resultado salvo para PDF/JSON
    Export {
        /// Arquivo JSON do resultado
        #[arg(required = true)]
        input: PathBuf,

        /// Formato de saída (pdf/json/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// Diretório ou arquivo de saída
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Mostra o layout do carrossel para N itens
    Carousel {
        /// Quantidade de itens
        #[arg(short, long)]
        count: usize,

        /// Índice ativo
        #[arg(short, long, default_value = "0")]
        active: usize,

        /// Modo grade
        #[arg(long)]
        grid: bool,
    },

    /// Mostra/edita a configuração
    Config {
        /// Define o endpoint de envio
        #[arg(long)]
        set_upload_endpoint: Option<String>,

        /// Define o endpoint da lista
        #[arg(long)]
        set_list_endpoint: Option<String>,

        /// Mostra a configuração
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Json,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            "both" | "ambos" => Ok(ExportFormat::Both),
            _ => Err(format!("Formato desconhecido: {}. Use pdf, json ou both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
