use symmetric_cipher::CipherError;
use thiserror::Error;

/// Ошибки арифметики GF(2^8): выбран неподходящий модуль или элемент.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GfError {
    #[error("modulus 0x1{0:02X} is reducible over GF(2)")]
    ReducibleModulus(u8),

    #[error("0x{element:02X} has no inverse modulo 0x1{modulus:02X}")]
    NotInvertible { element: u8, modulus: u8 },

    #[error("polynomial division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RijndaelError {
    #[error("unsupported block size {0} bits, expected 128, 192 or 256")]
    UnsupportedBlockBits(usize),

    #[error(transparent)]
    Field(#[from] GfError),

    #[error(transparent)]
    Cipher(#[from] CipherError),
}
