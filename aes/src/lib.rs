//! Rijndael с настраиваемым размером блока (128/192/256 бит) и неприводимым
//! модулем поля GF(2^8), а также арифметика этого поля.

pub mod error;
pub mod gf;
pub mod rijndael;

pub use error::{GfError, RijndaelError};
pub use gf::Gf256;
pub use rijndael::cipher::Rijndael;
