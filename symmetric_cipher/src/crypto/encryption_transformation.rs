use crate::crypto::error::CipherError;

/// Раундовая функция сети Фейстеля: половина блока + раундовый ключ.
pub trait EncryptionTransformation {
    type RoundKey;

    fn transform(
        &self,
        half_block: &[u8],
        round_key: &Self::RoundKey,
    ) -> Result<Vec<u8>, CipherError>;
}
