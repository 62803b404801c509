//! Configuração de implantação do sistema de alerta de luz.
//!
//! Substitui os `#define` do antigo `config.h` por um valor explícito,
//! construído uma vez na inicialização e imutável depois disso.

use crate::credentials::{
    CredentialSource, RawCredentials, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID, WIFI_PASSWORD,
    WIFI_SSID,
};
use crate::secret::Secret;
use crate::template;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Erros de carregamento da configuração. Todos são fatais na inicialização.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Credencial obrigatória ausente: {key}")]
    MissingCredential { key: &'static str },

    #[error("Destino de notificação inválido: {0}")]
    InvalidNotificationTarget(String),

    #[error("Erro ao ler {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Erro ao parsear {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Arquivo já existe: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Erro ao escrever {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Destino único que recebe os alertas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// Webhook do Discord (a URL contém o token, por isso é segredo).
    DiscordWebhook { url: Secret },
    /// Bot do Telegram.
    TelegramBot { token: Secret, chat_id: String },
    /// Notificações desativadas. Nunca produzido por [`load`].
    None,
}

impl NotificationTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationTarget::DiscordWebhook { .. } => "discord",
            NotificationTarget::TelegramBot { .. } => "telegram",
            NotificationTarget::None => "none",
        }
    }
}

/// Configuração validada: WiFi + um destino de notificação.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    wifi_ssid: String,
    wifi_password: Secret,
    notification_target: NotificationTarget,
}

impl DeploymentConfig {
    /// Lê de uma origem explícita e valida.
    pub fn load_from(source: &CredentialSource) -> Result<Self, ConfigError> {
        info!("Carregando configuração de {source}");
        let raw = source.read()?;

        if *source != CredentialSource::Template {
            for key in template::placeholder_keys(&raw) {
                warn!("{key} ainda contém o valor do template");
            }
        }

        Self::from_raw(raw)
    }

    /// Valida um conjunto bruto de credenciais.
    pub fn from_raw(raw: RawCredentials) -> Result<Self, ConfigError> {
        let wifi_ssid = raw
            .wifi_ssid
            .ok_or(ConfigError::MissingCredential { key: WIFI_SSID })?;
        let wifi_password = raw
            .wifi_password
            .ok_or(ConfigError::MissingCredential { key: WIFI_PASSWORD })?;

        let notification_target = match (
            raw.discord_webhook_url,
            raw.telegram_bot_token,
            raw.telegram_chat_id,
        ) {
            (Some(url), None, None) => NotificationTarget::DiscordWebhook { url: url.into() },
            (Some(_), _, _) => {
                return Err(ConfigError::InvalidNotificationTarget(
                    "Discord e Telegram configurados ao mesmo tempo".into(),
                ));
            }
            (None, Some(token), Some(chat_id)) => NotificationTarget::TelegramBot {
                token: token.into(),
                chat_id,
            },
            (None, None, None) => {
                return Err(ConfigError::InvalidNotificationTarget(
                    "nenhum destino configurado".into(),
                ));
            }
            (None, token, _) => {
                let missing = if token.is_none() {
                    TELEGRAM_BOT_TOKEN
                } else {
                    TELEGRAM_CHAT_ID
                };
                return Err(ConfigError::InvalidNotificationTarget(format!(
                    "Telegram incompleto, falta {missing}"
                )));
            }
        };

        debug!("Destino de notificação: {}", notification_target.kind());

        Ok(Self {
            wifi_ssid,
            wifi_password: wifi_password.into(),
            notification_target,
        })
    }

    pub fn wifi_ssid(&self) -> &str {
        &self.wifi_ssid
    }

    pub fn wifi_password(&self) -> &Secret {
        &self.wifi_password
    }

    pub fn notification_target(&self) -> &NotificationTarget {
        &self.notification_target
    }
}

/// Resumo de uma linha, sem segredos. Seguro para logs.
impl fmt::Display for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ssid={} senha={} ", self.wifi_ssid, self.wifi_password)?;
        match &self.notification_target {
            NotificationTarget::DiscordWebhook { url } => write!(f, "destino=discord({url})"),
            NotificationTarget::TelegramBot { token, chat_id } => {
                write!(f, "destino=telegram(token={token}, chat_id={chat_id})")
            }
            NotificationTarget::None => f.write_str("destino=none"),
        }
    }
}

/// Carrega a configuração da origem designada pelo ambiente.
///
/// Lê `.env` (se existir), escolhe o arquivo de
/// [`crate::credentials::SECRETS_FILE_ENV`] ou as variáveis de ambiente, e
/// valida o resultado.
pub fn load() -> Result<DeploymentConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(".env carregado de {}", path.display());
    }
    DeploymentConfig::load_from(&CredentialSource::from_env_selection())
}
