use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::des::{Des, DES_BLOCK_SIZE};
use crate::crypto::error::CipherError;

/// Схема ключей Triple-DES.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleDesKeying {
    /// K1, K2, K3: 21 или 24 байта.
    ThreeKey,
    /// K1, K2 и K3 = K1: 14 или 16 байт.
    TwoKey,
}

/// Triple-DES по схеме EDE: `C = E_K3(D_K2(E_K1(P)))`.
pub struct TripleDes {
    keying: TripleDesKeying,
    stages: Option<[Des; 3]>,
}

impl TripleDes {
    pub fn new(keying: TripleDesKeying) -> Self {
        Self { keying, stages: None }
    }

    /// Схема ключей выбирается по длине.
    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let keying = match key.len() {
            14 | 16 => TripleDesKeying::TwoKey,
            _ => TripleDesKeying::ThreeKey,
        };
        let mut cipher = Self::new(keying);
        cipher.set_key(key)?;
        Ok(cipher)
    }

    pub fn keying(&self) -> TripleDesKeying {
        self.keying
    }

    fn stages(&self) -> Result<&[Des; 3], CipherError> {
        self.stages.as_ref().ok_or(CipherError::KeyNotSet("TripleDES"))
    }
}

impl CipherAlgorithm for TripleDes {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let [k1, k2, k3] = self.stages()?;
        CipherError::check_block(block, DES_BLOCK_SIZE)?;
        k3.encrypt(&k2.decrypt(&k1.encrypt(block)?)?)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let [k1, k2, k3] = self.stages()?;
        CipherError::check_block(block, DES_BLOCK_SIZE)?;
        k1.decrypt(&k2.encrypt(&k3.decrypt(block)?)?)
    }
}

impl SymmetricCipher for TripleDes {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        let (parts, expected) = match self.keying {
            TripleDesKeying::ThreeKey => (3, "21 or 24"),
            TripleDesKeying::TwoKey => (2, "14 or 16"),
        };
        if key.len() != parts * 7 && key.len() != parts * 8 {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "TripleDES",
                expected,
                actual: key.len(),
            });
        }

        let part_len = key.len() / parts;
        let k1 = &key[..part_len];
        let k2 = &key[part_len..2 * part_len];
        let k3 = match self.keying {
            TripleDesKeying::ThreeKey => &key[2 * part_len..],
            TripleDesKeying::TwoKey => k1,
        };

        self.stages = Some([Des::with_key(k1)?, Des::with_key(k2)?, Des::with_key(k3)?]);
        Ok(())
    }
}
