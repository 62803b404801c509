//! Conjunto bruto de credenciais e suas origens.
//!
//! Uma [`CredentialSource`] produz um [`RawCredentials`] sem validação; quem
//! decide se o conjunto forma uma configuração utilizável é
//! [`crate::config::DeploymentConfig::from_raw`].

use crate::config::ConfigError;
use crate::template;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const WIFI_SSID: &str = "WIFI_SSID";
pub const WIFI_PASSWORD: &str = "WIFI_PASSWORD";
pub const DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Variável que aponta para o arquivo TOML de segredos.
pub const SECRETS_FILE_ENV: &str = "LIGHT_ALERT_SECRETS_FILE";

/// Todas as chaves reconhecidas, na ordem em que são validadas.
pub const KEYS: [&str; 5] = [
    WIFI_SSID,
    WIFI_PASSWORD,
    DISCORD_WEBHOOK_URL,
    TELEGRAM_BOT_TOKEN,
    TELEGRAM_CHAT_ID,
];

/// Chaves cujo valor nunca pode aparecer em logs.
const SENSITIVE: [&str; 3] = [WIFI_PASSWORD, DISCORD_WEBHOOK_URL, TELEGRAM_BOT_TOKEN];

/// Valores lidos de uma origem, ainda não validados.
///
/// `None` significa ausente ou em branco. Valores presentes são guardados
/// como vieram: SSIDs e senhas WPA podem começar ou terminar com espaço.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawCredentials {
    pub wifi_ssid: Option<String>,
    pub wifi_password: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl RawCredentials {
    /// Monta o conjunto a partir de qualquer função chave → valor.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self {
            wifi_ssid: populated(lookup(WIFI_SSID)),
            wifi_password: populated(lookup(WIFI_PASSWORD)),
            discord_webhook_url: populated(lookup(DISCORD_WEBHOOK_URL)),
            telegram_bot_token: populated(lookup(TELEGRAM_BOT_TOKEN)),
            telegram_chat_id: populated(lookup(TELEGRAM_CHAT_ID)),
        }
    }

    /// Lê as variáveis de ambiente do processo.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Constantes capturadas em tempo de compilação (`option_env!`).
    ///
    /// Útil em firmware, onde não há ambiente nem sistema de arquivos.
    pub fn embedded() -> Self {
        Self {
            wifi_ssid: populated(option_env!("WIFI_SSID").map(String::from)),
            wifi_password: populated(option_env!("WIFI_PASSWORD").map(String::from)),
            discord_webhook_url: populated(option_env!("DISCORD_WEBHOOK_URL").map(String::from)),
            telegram_bot_token: populated(option_env!("TELEGRAM_BOT_TOKEN").map(String::from)),
            telegram_chat_id: populated(option_env!("TELEGRAM_CHAT_ID").map(String::from)),
        }
    }

    /// Placeholders do template público (Telegram desativado).
    pub fn template() -> Self {
        Self {
            wifi_ssid: Some(template::WIFI_SSID_PLACEHOLDER.into()),
            wifi_password: Some(template::WIFI_PASSWORD_PLACEHOLDER.into()),
            discord_webhook_url: Some(template::WEBHOOK_URL_PLACEHOLDER.into()),
            telegram_bot_token: None,
            telegram_chat_id: None,
        }
    }

    /// Interpreta o conteúdo de um arquivo de segredos TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: SecretsFile = toml::from_str(content)?;
        Ok(Self {
            wifi_ssid: populated(Some(file.wifi.ssid)),
            wifi_password: populated(Some(file.wifi.password)),
            discord_webhook_url: populated(Some(file.discord.webhook_url)),
            telegram_bot_token: populated(Some(file.telegram.bot_token)),
            telegram_chat_id: populated(Some(file.telegram.chat_id)),
        })
    }

    /// Lê e interpreta um arquivo de segredos TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Combina dois conjuntos; chaves preenchidas em `other` prevalecem.
    pub fn overlay(self, other: RawCredentials) -> Self {
        Self {
            wifi_ssid: other.wifi_ssid.or(self.wifi_ssid),
            wifi_password: other.wifi_password.or(self.wifi_password),
            discord_webhook_url: other.discord_webhook_url.or(self.discord_webhook_url),
            telegram_bot_token: other.telegram_bot_token.or(self.telegram_bot_token),
            telegram_chat_id: other.telegram_chat_id.or(self.telegram_chat_id),
        }
    }

    /// Pares (chave, valor) na ordem de [`KEYS`].
    pub fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        let values = [
            self.wifi_ssid.as_deref(),
            self.wifi_password.as_deref(),
            self.discord_webhook_url.as_deref(),
            self.telegram_bot_token.as_deref(),
            self.telegram_chat_id.as_deref(),
        ];
        std::array::from_fn(|i| (KEYS[i], values[i]))
    }

    /// Chaves com valor preenchido.
    pub fn populated_keys(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter_map(|(key, value)| value.map(|_| key))
            .collect()
    }
}

// Debug manual: senha, token e URL aparecem só como "set".
impl fmt::Debug for RawCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RawCredentials");
        for (key, value) in self.entries() {
            match value {
                Some(_) if SENSITIVE.contains(&key) => s.field(key, &"set"),
                Some(v) => s.field(key, &v),
                None => s.field(key, &"unset"),
            };
        }
        s.finish()
    }
}

fn populated(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ──────────────────────────────────────────────
// Formato do arquivo de segredos
// ──────────────────────────────────────────────

#[derive(Default, Deserialize)]
#[serde(default)]
struct SecretsFile {
    wifi: WifiSection,
    discord: DiscordSection,
    telegram: TelegramSection,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct WifiSection {
    ssid: String,
    password: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DiscordSection {
    webhook_url: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct TelegramSection {
    bot_token: String,
    chat_id: String,
}

// ──────────────────────────────────────────────
// Origens
// ──────────────────────────────────────────────

/// De onde as credenciais são lidas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Constantes embutidas no binário em tempo de compilação.
    Embedded,
    /// Variáveis de ambiente do processo.
    Environment,
    /// Arquivo TOML; variáveis de ambiente sobrescrevem chave a chave.
    File(PathBuf),
    /// Placeholders do template público.
    Template,
}

impl CredentialSource {
    /// `File` se [`SECRETS_FILE_ENV`] estiver definida, senão `Environment`.
    pub fn from_env_selection() -> Self {
        Self::select_with(|key| std::env::var(key).ok())
    }

    pub(crate) fn select_with<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        match populated(lookup(SECRETS_FILE_ENV)) {
            Some(path) => CredentialSource::File(PathBuf::from(path)),
            None => CredentialSource::Environment,
        }
    }

    /// Lê o conjunto bruto desta origem.
    pub fn read(&self) -> Result<RawCredentials, ConfigError> {
        self.read_with(|key| std::env::var(key).ok())
    }

    pub(crate) fn read_with<F>(&self, lookup: F) -> Result<RawCredentials, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        match self {
            CredentialSource::Embedded => Ok(RawCredentials::embedded()),
            CredentialSource::Environment => Ok(RawCredentials::from_lookup(lookup)),
            CredentialSource::Template => Ok(RawCredentials::template()),
            CredentialSource::File(path) => {
                let from_file = RawCredentials::from_file(path)?;
                let from_env = RawCredentials::from_lookup(lookup);
                for key in from_env.populated_keys() {
                    debug!("{key} sobrescrito pelo ambiente");
                }
                Ok(from_file.overlay(from_env))
            }
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Embedded => f.write_str("constantes embutidas"),
            CredentialSource::Environment => f.write_str("variáveis de ambiente"),
            CredentialSource::File(path) => write!(f, "arquivo {}", path.display()),
            CredentialSource::Template => f.write_str("template"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn blank_values_count_as_absent() {
        let raw = RawCredentials::from_lookup(lookup(&[
            (WIFI_SSID, "HAMOSHAVA"),
            (WIFI_PASSWORD, "   "),
            (TELEGRAM_CHAT_ID, ""),
        ]));
        assert_eq!(raw.wifi_ssid.as_deref(), Some("HAMOSHAVA"));
        assert_eq!(raw.wifi_password, None);
        assert_eq!(raw.telegram_chat_id, None);
        assert_eq!(raw.populated_keys(), vec![WIFI_SSID]);
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let raw = RawCredentials::from_lookup(lookup(&[
            (WIFI_SSID, "My Net "),
            (WIFI_PASSWORD, " pass phrase "),
        ]));
        assert_eq!(raw.wifi_ssid.as_deref(), Some("My Net "));
        assert_eq!(raw.wifi_password.as_deref(), Some(" pass phrase "));

        let raw = RawCredentials::from_toml_str(
            r#"
[wifi]
ssid = " Casa"
password = "senha com espaço "
"#,
        )
        .unwrap();
        assert_eq!(raw.wifi_ssid.as_deref(), Some(" Casa"));
        assert_eq!(raw.wifi_password.as_deref(), Some("senha com espaço "));
    }

    #[test]
    fn environment_source_reads_lookup() {
        let raw = CredentialSource::Environment
            .read_with(lookup(&[
                (WIFI_SSID, "HAMOSHAVA"),
                (WIFI_PASSWORD, "saloniki"),
                (TELEGRAM_BOT_TOKEN, "123456:ABC"),
                (TELEGRAM_CHAT_ID, "987654"),
            ]))
            .unwrap();
        assert_eq!(
            raw.populated_keys(),
            vec![WIFI_SSID, WIFI_PASSWORD, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID]
        );
        assert_eq!(raw.telegram_chat_id.as_deref(), Some("987654"));
    }

    #[test]
    fn entries_follow_key_order() {
        let keys: Vec<&str> = RawCredentials::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, KEYS);
    }

    #[test]
    fn partial_toml_leaves_missing_keys_empty() {
        let raw = RawCredentials::from_toml_str(
            r#"
[wifi]
ssid = "HAMOSHAVA"
"#,
        )
        .unwrap();
        assert_eq!(raw.wifi_ssid.as_deref(), Some("HAMOSHAVA"));
        assert_eq!(raw.wifi_password, None);
        assert_eq!(raw.discord_webhook_url, None);
    }

    #[test]
    fn overlay_prefers_populated_keys_of_other() {
        let base = RawCredentials::from_lookup(lookup(&[
            (WIFI_SSID, "from-file"),
            (WIFI_PASSWORD, "file-pass"),
        ]));
        let top = RawCredentials::from_lookup(lookup(&[(WIFI_SSID, "from-env")]));
        let merged = base.overlay(top);
        assert_eq!(merged.wifi_ssid.as_deref(), Some("from-env"));
        assert_eq!(merged.wifi_password.as_deref(), Some("file-pass"));
    }

    #[test]
    fn file_source_applies_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(
            &path,
            r#"
[wifi]
ssid = "HAMOSHAVA"
password = "saloniki"

[discord]
webhook_url = "https://discord.com/api/webhooks/1/abc"
"#,
        )
        .unwrap();

        let source = CredentialSource::File(path);
        let raw = source
            .read_with(lookup(&[(WIFI_PASSWORD, "rotated")]))
            .unwrap();
        assert_eq!(raw.wifi_ssid.as_deref(), Some("HAMOSHAVA"));
        assert_eq!(raw.wifi_password.as_deref(), Some("rotated"));
        assert_eq!(
            raw.discord_webhook_url.as_deref(),
            Some("https://discord.com/api/webhooks/1/abc")
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CredentialSource::File(dir.path().join("nope.toml"));
        let err = source.read_with(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "[wifi\nssid = ").unwrap();
        let err = RawCredentials::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn selection_follows_secrets_file_variable() {
        assert_eq!(
            CredentialSource::select_with(lookup(&[])),
            CredentialSource::Environment
        );
        assert_eq!(
            CredentialSource::select_with(lookup(&[(SECRETS_FILE_ENV, "/etc/light/secrets.toml")])),
            CredentialSource::File(PathBuf::from("/etc/light/secrets.toml"))
        );
    }

    #[test]
    fn debug_hides_sensitive_values() {
        let raw = RawCredentials::from_lookup(lookup(&[
            (WIFI_SSID, "HAMOSHAVA"),
            (WIFI_PASSWORD, "saloniki"),
            (TELEGRAM_BOT_TOKEN, "123:ABC"),
        ]));
        let dbg = format!("{raw:?}");
        assert!(dbg.contains("HAMOSHAVA"));
        assert!(!dbg.contains("saloniki"));
        assert!(!dbg.contains("123:ABC"));
    }
}
