//! Симметричные блочные шифры, режимы шифрования и схемы набивки.
//!
//! Шифры (DES, DEAL, Triple-DES, RC4, FROG) реализуют общий интерфейс
//! [`CipherAlgorithm`], поэтому режимы из [`crypto::cipher_mode`] работают
//! с любым из них, включая Rijndael из соседнего крейта.

pub mod crypto;

pub use crypto::cipher_context::{ContextError, StreamCipherContext, SymmetricContext};
pub use crypto::cipher_mode::{CipherModeContext, ModeState};
pub use crypto::cipher_traits::*;
pub use crypto::cipher_types::*;
pub use crypto::error::CipherError;
pub use crypto::padding::Padding;
