use crate::crypto::error::CipherError;

/// Общий интерфейс блочного шифра, от которого зависят режимы шифрования.
///
/// После установки ключа экземпляр используется только на чтение, поэтому
/// один шифр можно вызывать из нескольких потоков одновременно.
pub trait CipherAlgorithm: Send + Sync {
    fn block_size(&self) -> usize;
    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError>;
    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Шифр с изменяемой гаммой: результат зависит от предыдущих вызовов.
    /// Такие шифры не используются в блочных режимах.
    fn is_keystream(&self) -> bool {
        false
    }
}

pub trait SymmetricCipher: CipherAlgorithm {
    /// Проверяет длину ключа и строит расписание раундовых ключей.
    /// Ключ копируется, дальнейшие изменения исходного буфера ни на что не влияют.
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError>;
}

/// Блочный шифр, который можно создать уже с ключом для одного вызова.
/// Используется, когда один шифр служит примитивом внутри другого (DEAL).
pub trait BlockCipherAdapter: Send + Sync {
    fn block_size(&self) -> usize;
    fn key_size(&self) -> usize;
    fn keyed(&self, key: &[u8]) -> Result<Box<dyn CipherAlgorithm>, CipherError>;

    fn encrypt_block(&self, block: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.keyed(key)?.encrypt(block)
    }

    fn decrypt_block(&self, block: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.keyed(key)?.decrypt(block)
    }
}

impl<T: CipherAlgorithm + ?Sized> CipherAlgorithm for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }
    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(block)
    }
    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(block)
    }
    fn is_keystream(&self) -> bool {
        (**self).is_keystream()
    }
}
