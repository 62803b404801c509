//! Template público do arquivo de segredos.
//!
//! O template só contém placeholders e pode ir para o controle de versão.
//! A cópia real (`secrets.toml`) deve ficar fora dele.

use crate::config::ConfigError;
use crate::credentials::RawCredentials;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const WIFI_SSID_PLACEHOLDER: &str = "YOUR_WIFI_SSID";
pub const WIFI_PASSWORD_PLACEHOLDER: &str = "YOUR_WIFI_PASSWORD";
pub const WEBHOOK_URL_PLACEHOLDER: &str = "YOUR_WEBHOOK_URL_HERE";
pub const BOT_TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN";
pub const CHAT_ID_PLACEHOLDER: &str = "YOUR_CHAT_ID";

const PLACEHOLDERS: [&str; 5] = [
    WIFI_SSID_PLACEHOLDER,
    WIFI_PASSWORD_PLACEHOLDER,
    WEBHOOK_URL_PLACEHOLDER,
    BOT_TOKEN_PLACEHOLDER,
    CHAT_ID_PLACEHOLDER,
];

/// Gera o conteúdo TOML do template.
///
/// Discord fica ativo; o bloco do Telegram vem comentado.
pub fn render_template() -> String {
    format!(
        r#"# Configuração do sistema de alerta de luz
#
# IMPORTANTE: copie este arquivo para secrets.toml e preencha com as
# credenciais reais. NÃO faça commit do secrets.toml!
#
# Variáveis de ambiente com o mesmo nome das chaves (WIFI_SSID,
# WIFI_PASSWORD, DISCORD_WEBHOOK_URL, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID)
# sobrescrevem os valores deste arquivo.

[wifi]
ssid = "{WIFI_SSID_PLACEHOLDER}"
password = "{WIFI_PASSWORD_PLACEHOLDER}"

# Webhook do Discord
# 1. Abra o Discord e vá até o seu servidor
# 2. Configurações do servidor > Integrações > Webhooks
# 3. Clique em "Novo webhook"
# 4. Dê um nome e escolha o canal
# 5. Copie a URL do webhook e cole abaixo (mantenha as aspas)
[discord]
webhook_url = "{WEBHOOK_URL_PLACEHOLDER}"

# Alternativa: bot do Telegram (use no lugar do Discord, nunca os dois)
# 1. Mande mensagem para @BotFather no Telegram
# 2. Envie /newbot e siga as instruções
# 3. Copie o token do bot
# 4. Descubra o chat ID mandando mensagem para @userinfobot
# [telegram]
# bot_token = "{BOT_TOKEN_PLACEHOLDER}"
# chat_id = "{CHAT_ID_PLACEHOLDER}"
"#
    )
}

/// Escreve o template em `path`. Nunca sobrescreve um arquivo existente.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                ConfigError::AlreadyExists(path.to_path_buf())
            } else {
                ConfigError::Write {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    file.write_all(render_template().as_bytes())
        .map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Template salvo em {}", path.display());
    Ok(())
}

/// Chaves que ainda contêm um placeholder do template.
pub fn placeholder_keys(raw: &RawCredentials) -> Vec<&'static str> {
    raw.entries()
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|v| PLACEHOLDERS.contains(&v)))
        .map(|(key, _)| key)
        .collect()
}
