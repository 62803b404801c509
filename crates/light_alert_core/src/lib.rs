//! # Light Alert Core
//!
//! Fronteira de segredos do sistema de alerta de luz: credenciais de WiFi e
//! o destino das notificações (Discord ou Telegram), carregados uma vez na
//! inicialização e compartilhados só para leitura.
//!
//! ## Módulos
//! - [`config`] – `DeploymentConfig`, validação e [`load`]
//! - [`credentials`] – Chaves reconhecidas e origens (ambiente, arquivo, embutidas)
//! - [`template`] – Template público com placeholders
//! - [`secret`] – Strings que nunca aparecem em logs

pub mod config;
pub mod credentials;
pub mod secret;
pub mod template;

// Re-exports convenientes
pub use config::{load, ConfigError, DeploymentConfig, NotificationTarget};
pub use credentials::{CredentialSource, RawCredentials};
pub use secret::Secret;
