//! Valor sensível que nunca aparece em logs.

use std::fmt;

/// Marcador exibido no lugar de qualquer segredo.
pub const REDACTED: &str = "***";

/// String sensível (senha, token, URL de webhook).
///
/// `Debug` e `Display` imprimem sempre [`REDACTED`]; o valor real só é
/// acessível via [`Secret::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retorna o valor em claro. Não passe o resultado para `tracing`.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
