use crate::crypto::cipher_traits::{BlockCipherAdapter, CipherAlgorithm};
use crate::crypto::des::{Des, DES_BLOCK_SIZE};
use crate::crypto::error::CipherError;

/// DES как внутренний примитив для DEAL.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesAdapter;

impl BlockCipherAdapter for DesAdapter {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn key_size(&self) -> usize {
        8
    }

    fn keyed(&self, key: &[u8]) -> Result<Box<dyn CipherAlgorithm>, CipherError> {
        Ok(Box::new(Des::with_key(key)?))
    }
}
