use crate::crypto::error::CipherError;

/// Построение расписания раундовых ключей.
///
/// Тип раундового ключа задаётся реализацией: для DES это байты подключа,
/// для DEAL: готовый экземпляр внутреннего шифра.
pub trait KeyExpansion {
    type RoundKey;

    fn generate_round_keys(&self, key: &[u8]) -> Result<Vec<Self::RoundKey>, CipherError>;
}
