use crate::crypto::cipher_traits::{BlockCipherAdapter, CipherAlgorithm};
use crate::crypto::error::CipherError;
use crate::crypto::key_expansion::KeyExpansion;
use std::sync::Arc;

/// Допустимые размеры ключа DEAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealKeySize {
    Deal128,
    Deal192,
    Deal256,
}

impl DealKeySize {
    pub fn from_bytes(len: usize) -> Result<Self, CipherError> {
        match len {
            16 => Ok(DealKeySize::Deal128),
            24 => Ok(DealKeySize::Deal192),
            32 => Ok(DealKeySize::Deal256),
            actual => Err(CipherError::InvalidKeyLength {
                algorithm: "DEAL",
                expected: "16, 24 or 32",
                actual,
            }),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            DealKeySize::Deal128 => 16,
            DealKeySize::Deal192 => 24,
            DealKeySize::Deal256 => 32,
        }
    }

    pub fn rounds(self) -> usize {
        match self {
            DealKeySize::Deal128 | DealKeySize::Deal192 => 6,
            DealKeySize::Deal256 => 8,
        }
    }
}

/// Расписание ключей DEAL.
///
/// Ключ режется на фрагменты по размеру ключа внутреннего шифра. Раундовый
/// ключ `i`: это константный блок с последним байтом `i + 1`, зашифрованный
/// фрагментом `i mod n`. Сразу строится готовый экземпляр внутреннего шифра.
pub struct DealKeyExpansion {
    key_size: DealKeySize,
    adapter: Arc<dyn BlockCipherAdapter>,
}

impl DealKeyExpansion {
    pub fn new(key_size: DealKeySize, adapter: Arc<dyn BlockCipherAdapter>) -> Self {
        Self { key_size, adapter }
    }
}

impl KeyExpansion for DealKeyExpansion {
    type RoundKey = Box<dyn CipherAlgorithm>;

    fn generate_round_keys(&self, key: &[u8]) -> Result<Vec<Self::RoundKey>, CipherError> {
        if key.len() != self.key_size.bytes() {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "DEAL",
                expected: match self.key_size {
                    DealKeySize::Deal128 => "16",
                    DealKeySize::Deal192 => "24",
                    DealKeySize::Deal256 => "32",
                },
                actual: key.len(),
            });
        }

        let fragments: Vec<&[u8]> = key.chunks(self.adapter.key_size()).collect();
        let block_size = self.adapter.block_size();

        (0..self.key_size.rounds())
            .map(|round| {
                let mut constant = vec![0u8; block_size];
                constant[block_size - 1] = (round + 1) as u8;

                let fragment = fragments[round % fragments.len()];
                let round_key = self.adapter.encrypt_block(&constant, fragment)?;
                self.adapter.keyed(&round_key)
            })
            .collect()
    }
}
