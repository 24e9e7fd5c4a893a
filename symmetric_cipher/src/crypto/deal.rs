use crate::crypto::cipher_traits::{BlockCipherAdapter, CipherAlgorithm, SymmetricCipher};
use crate::crypto::deal_key_expansion::{DealKeyExpansion, DealKeySize};
use crate::crypto::des_adapter::DesAdapter;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::CipherError;
use crate::crypto::feistel_network::{Direction, FeistelNetwork};
use std::sync::Arc;

/// Раундовая функция DEAL: половина блока шифруется раундовым экземпляром DES.
pub struct DealTransformation;

impl EncryptionTransformation for DealTransformation {
    type RoundKey = Box<dyn CipherAlgorithm>;

    fn transform(
        &self,
        half_block: &[u8],
        round_key: &Self::RoundKey,
    ) -> Result<Vec<u8>, CipherError> {
        round_key.encrypt(half_block)
    }
}

/// DEAL: сеть Фейстеля над 128-битным блоком, где F: DES.
pub struct Deal {
    key_size: DealKeySize,
    block_size: usize,
    feistel_network: FeistelNetwork<Box<dyn CipherAlgorithm>>,
}

impl Deal {
    pub fn new(key_size: DealKeySize) -> Self {
        Self::with_adapter(key_size, Arc::new(DesAdapter))
    }

    pub fn with_adapter(key_size: DealKeySize, adapter: Arc<dyn BlockCipherAdapter>) -> Self {
        let block_size = adapter.block_size() * 2;
        Self {
            key_size,
            block_size,
            feistel_network: FeistelNetwork::new(
                "DEAL",
                key_size.rounds(),
                false,
                Arc::new(DealKeyExpansion::new(key_size, adapter)),
                Arc::new(DealTransformation),
            ),
        }
    }

    /// DEAL с размером, выбранным по длине ключа.
    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let mut deal = Self::new(DealKeySize::from_bytes(key.len())?);
        deal.set_key(key)?;
        Ok(deal)
    }

    pub fn key_size(&self) -> DealKeySize {
        self.key_size
    }

    pub fn num_rounds(&self) -> usize {
        self.feistel_network.num_rounds()
    }

    fn process(&self, block: &[u8], direction: Direction) -> Result<Vec<u8>, CipherError> {
        if !self.feistel_network.is_keyed() {
            return Err(CipherError::KeyNotSet("DEAL"));
        }
        CipherError::check_block(block, self.block_size)?;
        self.feistel_network.process_rounds(block, direction)
    }
}

impl CipherAlgorithm for Deal {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.process(block, Direction::Encrypt)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.process(block, Direction::Decrypt)
    }
}

impl SymmetricCipher for Deal {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        self.feistel_network.set_key(key)
    }
}
