#![forbid(unsafe_code)]

use clap::{Parser, ValueEnum};
use secure_headers_lib::config::{load_from_path, LoggingConfig};
use secure_headers_lib::{create_secure_headers, telemetry::init_tracing, SecureHeader};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `Name: value` line per header
    Text,
    /// JSON list of `{ "key", "value" }` objects
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the security headers a configuration produces")]
struct Cli {
    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE", default_value = "demos/config/basic.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Everything written to stdout; logs go to stderr
fn render(headers: &[SecureHeader], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(headers
            .iter()
            .map(|header| format!("{}: {}", header.key, header.value))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(headers),
    }
}

fn main() {
    let cli = Cli::parse();

    let cfg = match load_from_path(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            let default_logging = LoggingConfig::default();
            if init_tracing(&default_logging.level, default_logging.show_target).is_err() {
                eprintln!("failed to load configuration: {err}");
            }
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging.level, cfg.logging.show_target) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }

    let headers = match create_secure_headers(&cfg.headers) {
        Ok(headers) => headers,
        Err(err) => {
            error!(%err, "failed to build security headers");
            std::process::exit(1);
        }
    };
    info!(config = %cli.config.display(), headers = headers.len(), "security headers built");

    match render(&headers, cli.format) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(%err, "failed to serialize headers");
            std::process::exit(1);
        }
    }
}
