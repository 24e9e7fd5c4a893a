use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::error::CipherError;
use std::sync::{Mutex, PoisonError};

struct Rc4State {
    s: [u8; 256],
    x: u8,
    y: u8,
}

impl Rc4State {
    /// KSA.
    fn new(key: &[u8]) -> Self {
        let mut s = [0u8; 256];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u8;
        }

        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        Self { s, x: 0, y: 0 }
    }

    /// PRGA: очередной байт гаммы.
    fn next_byte(&mut self) -> u8 {
        self.x = self.x.wrapping_add(1);
        self.y = self.y.wrapping_add(self.s[self.x as usize]);
        self.s.swap(self.x as usize, self.y as usize);
        let idx = self.s[self.x as usize].wrapping_add(self.s[self.y as usize]);
        self.s[idx as usize]
    }
}

/// Потоковый шифр RC4.
///
/// Состояние гаммы меняется при каждом вызове и хранится под мьютексом,
/// поэтому последовательные вызовы продолжают один поток гаммы.
/// Расшифрование совпадает с шифрованием.
pub struct Rc4 {
    key: Vec<u8>,
    state: Mutex<Option<Rc4State>>,
}

impl Rc4 {
    pub fn new() -> Self {
        Self {
            key: Vec::new(),
            state: Mutex::new(None),
        }
    }

    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let mut rc4 = Self::new();
        rc4.set_key(key)?;
        Ok(rc4)
    }

    /// Возвращает гамму к началу (повторная инициализация тем же ключом).
    pub fn reset(&self) -> Result<(), CipherError> {
        if self.key.is_empty() {
            return Err(CipherError::KeyNotSet("RC4"));
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = Some(Rc4State::new(&self.key));
        Ok(())
    }

    /// XOR данных произвольной длины с продолжением гаммы.
    pub fn apply_keystream(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = guard.as_mut().ok_or(CipherError::KeyNotSet("RC4"))?;
        Ok(data.iter().map(|&b| b ^ state.next_byte()).collect())
    }
}

impl Default for Rc4 {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherAlgorithm for Rc4 {
    fn block_size(&self) -> usize {
        1
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        CipherError::check_block(block, 1)?;
        self.apply_keystream(block)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt(block)
    }

    fn is_keystream(&self) -> bool {
        true
    }
}

impl SymmetricCipher for Rc4 {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        if key.is_empty() || key.len() > 256 {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "RC4",
                expected: "1..=256",
                actual: key.len(),
            });
        }
        self.key = key.to_vec();
        self.reset()
    }
}
