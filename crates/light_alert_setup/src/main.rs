//! # Light Alert Setup
//!
//! Valida a configuração de implantação do sistema de alerta de luz e gera o
//! template público do arquivo de segredos.
//!
//! ## Uso
//! ```bash
//! light_alert_setup                    # Valida (ambiente ou LIGHT_ALERT_SECRETS_FILE)
//! light_alert_setup check              # Idem
//! light_alert_setup template [arquivo] # Gera o template (padrão: secrets.example.toml)
//! ```

use light_alert_core::config;
use light_alert_core::template;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("check") => check(),
        Some("template") => {
            let path = args
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(default_template_path);
            write_template(&path)
        }
        Some(other) => {
            error!("Comando desconhecido: {other} (use check ou template)");
            ExitCode::FAILURE
        }
    }
}

fn check() -> ExitCode {
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuração inválida: {e}");
            return ExitCode::FAILURE;
        }
    };

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   💡 LIGHT ALERT – CONFIGURAÇÃO OK");
    println!("══════════════════════════════════════════════");
    println!("  WiFi:     {}", config.wifi_ssid());
    println!("  Destino:  {}", config.notification_target().kind());
    println!("══════════════════════════════════════════════");
    println!();

    info!("{config}");
    ExitCode::SUCCESS
}

fn write_template(path: &Path) -> ExitCode {
    match template::write_template(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `secrets.example.toml` ao lado do executável.
fn default_template_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
        .unwrap_or_else(|_| PathBuf::from("."));
    exe_dir.join("secrets.example.toml")
}
