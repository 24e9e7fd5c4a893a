pub mod arithmetic;
pub mod irreducible;

pub use arithmetic::{add, degree, inverse, multiply, multiply_unchecked, poly_divmod, poly_mul};
pub use irreducible::{factorize, irreducible_moduli, is_irreducible};

use crate::error::GfError;

/// Младший байт модуля AES: x^8 + x^4 + x^3 + x + 1.
pub const AES_MODULUS: u8 = 0x1B;

/// Поле GF(2^8) с проверенным неприводимым модулем.
///
/// Модуль хранится без старшего бита x^8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gf256 {
    modulus: u8,
}

impl Gf256 {
    pub fn new(modulus: u8) -> Result<Self, GfError> {
        if !is_irreducible(modulus) {
            return Err(GfError::ReducibleModulus(modulus));
        }
        Ok(Self { modulus })
    }

    pub fn aes() -> Self {
        Self {
            modulus: AES_MODULUS,
        }
    }

    pub fn modulus(&self) -> u8 {
        self.modulus
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        multiply_unchecked(a, b, self.modulus)
    }

    /// Обратный элемент; у нуля его нет.
    pub fn inverse(&self, a: u8) -> Result<u8, GfError> {
        inverse(a, self.modulus)
    }
}

impl Default for Gf256 {
    fn default() -> Self {
        Self::aes()
    }
}
