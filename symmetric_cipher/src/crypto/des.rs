use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_tables::{FP, IP};
use crate::crypto::des_transformation::DesTransformation;
use crate::crypto::error::CipherError;
use crate::crypto::feistel_network::{
    Direction, FeistelNetwork, SharedKeyExpansion, SharedTransformation,
};
use crate::crypto::utils::{extend_key_with_parity, permute_bits, BitOrder, IndexBase};
use std::sync::Arc;

pub const DES_BLOCK_SIZE: usize = 8;
const DES_ROUNDS: usize = 16;

/// DES: IP -> 16 раундов Фейстеля -> IP^-1.
///
/// Ключ 8 байт (биты чётности игнорируются) или 7 байт: тогда он
/// расширяется битами нечётности.
pub struct Des {
    feistel_network: FeistelNetwork<Vec<u8>>,
}

impl Des {
    pub fn new() -> Self {
        Self::with_components(Arc::new(DesKeyExpansion), Arc::new(DesTransformation))
    }

    /// DES с подменёнными расписанием ключей и раундовой функцией.
    pub fn with_components(
        key_expansion: SharedKeyExpansion<Vec<u8>>,
        transformation: SharedTransformation<Vec<u8>>,
    ) -> Self {
        Self {
            feistel_network: FeistelNetwork::new(
                "DES",
                DES_ROUNDS,
                true,
                key_expansion,
                transformation,
            ),
        }
    }

    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let mut des = Self::new();
        des.set_key(key)?;
        Ok(des)
    }

    fn process(&self, block: &[u8], direction: Direction) -> Result<Vec<u8>, CipherError> {
        if !self.feistel_network.is_keyed() {
            return Err(CipherError::KeyNotSet("DES"));
        }
        CipherError::check_block(block, DES_BLOCK_SIZE)?;

        let permuted = permute_bits(block, &IP, BitOrder::MsbFirst, IndexBase::One)?;
        let processed = self.feistel_network.process_rounds(&permuted, direction)?;
        permute_bits(&processed, &FP, BitOrder::MsbFirst, IndexBase::One)
    }
}

impl Default for Des {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherAlgorithm for Des {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.process(block, Direction::Encrypt)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.process(block, Direction::Decrypt)
    }
}

impl SymmetricCipher for Des {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        let key = extend_key_with_parity(key)?;
        self.feistel_network.set_key(&key)
    }
}
