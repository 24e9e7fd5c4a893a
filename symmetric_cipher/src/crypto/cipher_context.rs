use crate::crypto::cipher_io::{
    aligned_chunk_size, finish_output, join_error, partial_path, read_chunk,
};
use crate::crypto::cipher_mode::{CipherModeContext, ModeState};
use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::cipher_types::{CipherMode, Direction, PaddingMode};
use crate::crypto::error::CipherError;
use crate::crypto::padding::Padding;
use crate::crypto::rc4::Rc4;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};

// Размер порции при обработке файлов по умолчанию
const CHUNK_SIZE: usize = 1024 * 1024;
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Блочный шифр + режим + набивка.
///
/// Шифры с гаммой (RC4) отвергаются при создании: для них есть
/// [`StreamCipherContext`].
#[derive(Clone)]
pub struct SymmetricContext {
    cipher_mode: CipherModeContext,
    padding: Padding,
    chunk_size: usize,
}

impl SymmetricContext {
    /// Устанавливает ключ и собирает контекст.
    pub fn new<C>(
        mut algorithm: C,
        key: &[u8],
        mode: CipherMode,
        padding: PaddingMode,
        iv: Option<Vec<u8>>,
    ) -> Result<Self, CipherError>
    where
        C: SymmetricCipher + 'static,
    {
        algorithm.set_key(key)?;
        Self::from_keyed(Arc::new(algorithm), mode, padding, iv)
    }

    /// Контекст поверх уже готового шифра.
    pub fn from_keyed(
        algorithm: Arc<dyn CipherAlgorithm>,
        mode: CipherMode,
        padding: PaddingMode,
        iv: Option<Vec<u8>>,
    ) -> Result<Self, CipherError> {
        let algorithm_block_size = algorithm.block_size();
        let padding = Padding::new(padding, algorithm_block_size)?;
        let cipher_mode = CipherModeContext::new(mode, algorithm, iv)?;
        let chunk_size = aligned_chunk_size(algorithm_block_size, CHUNK_SIZE);
        Ok(Self {
            cipher_mode,
            padding,
            chunk_size,
        })
    }

    /// Размер порции при обработке файлов; округляется вниз до кратного блоку.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = aligned_chunk_size(self.cipher_mode.block_size(), chunk_size);
        self
    }

    pub fn iv(&self) -> &[u8] {
        self.cipher_mode.iv()
    }

    pub fn mode(&self) -> CipherMode {
        self.cipher_mode.mode()
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding.mode()
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.cipher_mode.encrypt(&self.padding.apply(data))
    }

    /// Шифротекст некратной длины отвергается до расшифрования.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        let plain = self.cipher_mode.decrypt(data)?;
        Ok(self.padding.remove(&plain))
    }

    pub async fn encrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ContextError> {
        self.process_file(input.as_ref(), output.as_ref(), Direction::Encrypt)
            .await
    }

    pub async fn decrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ContextError> {
        self.process_file(input.as_ref(), output.as_ref(), Direction::Decrypt)
            .await
    }

    /// Файл читается порциями кратной блоку длины. Следующая порция читается
    /// заранее, чтобы набивка касалась только последней.
    ///
    /// Результат пишется во временный файл рядом с `output` и появляется под
    /// своим именем только целиком; при ошибке `output` не создаётся.
    async fn process_file(
        &self,
        input: &Path,
        output: &Path,
        direction: Direction,
    ) -> Result<(), ContextError> {
        if direction == Direction::Decrypt {
            let length = tokio::fs::metadata(input).await?.len() as usize;
            let block_size = self.cipher_mode.block_size();
            if length % block_size != 0 {
                return Err(CipherError::UnalignedData { length, block_size }.into());
            }
        }

        let partial = partial_path(output);
        let result = self.write_file(input, &partial, direction).await;
        let total = finish_output(result, &partial, output).await?;

        log::debug!(
            "{:?} {:?}: wrote {} bytes to {}",
            self.mode(),
            direction,
            total,
            output.display()
        );
        Ok(())
    }

    async fn write_file(
        &self,
        input: &Path,
        output: &Path,
        direction: Direction,
    ) -> Result<usize, ContextError> {
        let mut reader = BufReader::new(File::open(input).await?);
        let mut writer = BufWriter::new(File::create(output).await?);
        let chunk_size = self.chunk_size;

        let mut state = self.cipher_mode.start();
        let mut current = read_chunk(&mut reader, chunk_size).await?;
        let mut total = 0usize;

        loop {
            let next = read_chunk(&mut reader, chunk_size).await?;
            let is_last = next.is_empty();

            let this = self.clone();
            let (processed, new_state) = tokio::task::spawn_blocking(move || {
                this.process_chunk(current, state, direction, is_last)
            })
            .await
            .map_err(join_error)??;

            writer.write_all(&processed).await?;
            total += processed.len();
            state = new_state;

            if is_last {
                break;
            }
            current = next;
        }

        writer.flush().await?;
        Ok(total)
    }

    fn process_chunk(
        &self,
        chunk: Vec<u8>,
        mut state: ModeState,
        direction: Direction,
        is_last: bool,
    ) -> Result<(Vec<u8>, ModeState), CipherError> {
        let output = match direction {
            Direction::Encrypt => {
                let data = if is_last { self.padding.apply(&chunk) } else { chunk };
                self.cipher_mode.encrypt_chunk(&mut state, &data)?
            }
            Direction::Decrypt => {
                let plain = self.cipher_mode.decrypt_chunk(&mut state, &chunk)?;
                if is_last { self.padding.remove(&plain) } else { plain }
            }
        };
        Ok((output, state))
    }
}

/// RC4 над байтами и файлами. Каждая операция начинает гамму заново.
pub struct StreamCipherContext {
    cipher: Rc4,
}

impl StreamCipherContext {
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self {
            cipher: Rc4::with_key(key)?,
        })
    }

    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.cipher.reset()?;
        self.cipher.apply_keystream(data)
    }

    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt(data)
    }

    pub async fn encrypt_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ContextError> {
        self.process_file(input.as_ref(), output.as_ref()).await
    }

    pub async fn decrypt_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ContextError> {
        self.process_file(input.as_ref(), output.as_ref()).await
    }

    async fn process_file(&mut self, input: &Path, output: &Path) -> Result<(), ContextError> {
        self.cipher.reset()?;

        let partial = partial_path(output);
        let result = self.write_file(input, &partial).await;
        finish_output(result, &partial, output).await
    }

    async fn write_file(&self, input: &Path, output: &Path) -> Result<(), ContextError> {
        let mut reader = BufReader::new(File::open(input).await?);
        let mut writer = BufWriter::new(File::create(output).await?);

        loop {
            let chunk = read_chunk(&mut reader, STREAM_CHUNK_SIZE).await?;
            if chunk.is_empty() {
                break;
            }
            writer.write_all(&self.cipher.apply_keystream(&chunk)?).await?;
        }

        writer.flush().await?;
        Ok(())
    }
}
