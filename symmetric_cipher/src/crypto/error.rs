use thiserror::Error;

use crate::crypto::cipher_types::CipherMode;

/// Ошибки шифров, режимов и набивки.
///
/// Ошибки конфигурации (ключ, размер блока, IV) возникают при создании
/// или первом использовании; ошибки данных относятся к конкретному вызову
/// и не оставляют частичного результата.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("{algorithm}: invalid key length {actual} bytes, expected {expected}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("{algorithm}: invalid block size {actual} bytes, expected {expected}")]
    InvalidBlockSize {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("{0}: key not set, call set_key first")]
    KeyNotSet(&'static str),

    #[error("{algorithm}: key schedule has {actual} round keys, expected {expected}")]
    InvalidRoundCount {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("keystream cipher cannot be used in a block mode, use StreamCipherContext")]
    KeystreamCipher,

    #[error("mode {0:?} requires an initialization vector")]
    MissingIv(CipherMode),

    #[error("initialization vector must be {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("block must be {expected} bytes, got {actual}")]
    BlockLengthMismatch { expected: usize, actual: usize },

    #[error("data length {length} is not a multiple of block size {block_size}")]
    UnalignedData { length: usize, block_size: usize },

    #[error("bit index {index} is out of range for a {bits}-bit input")]
    BitIndexOutOfRange { index: usize, bits: usize },

    #[error("invalid padding")]
    InvalidPadding,
}

impl CipherError {
    /// Проверка длины блока, общая для всех шифров.
    pub fn check_block(block: &[u8], expected: usize) -> Result<(), CipherError> {
        if block.len() != expected {
            return Err(CipherError::BlockLengthMismatch {
                expected,
                actual: block.len(),
            });
        }
        Ok(())
    }
}
