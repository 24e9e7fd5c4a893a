pub mod cipher;
pub mod key_schedule;
pub mod sbox;

pub use cipher::Rijndael;
pub use key_schedule::RijndaelKeyExpansion;
pub use sbox::RijndaelSBox;
