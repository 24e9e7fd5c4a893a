use crate::crypto::cipher_traits::CipherAlgorithm;
use crate::crypto::cipher_types::{CipherMode, Direction};
use crate::crypto::error::CipherError;
use crate::crypto::utils::{add_by_delta, add_to_counter, xor_bytes};
use rand::RngCore;
use rayon::prelude::*;
use std::sync::Arc;

// Меньше этого числа блоков rayon не используется
const PARALLEL_THRESHOLD_BLOCKS: usize = 64;

/// Текущее значение регистра режима между вызовами.
///
/// CBC/CFB: последний блок шифротекста, PCBC: `K ^ P` последнего блока,
/// OFB: последний выход шифра, CTR/RandomDelta: следующий счётчик.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    register: Vec<u8>,
}

impl ModeState {
    pub fn register(&self) -> &[u8] {
        &self.register
    }
}

/// Режим шифрования поверх одного блочного шифра.
///
/// Принимает данные, уже выровненные по размеру блока; набивка выполняется
/// уровнем выше.
#[derive(Clone)]
pub struct CipherModeContext {
    mode: CipherMode,
    algorithm: Arc<dyn CipherAlgorithm>,
    iv: Vec<u8>,
    delta: Vec<u8>,
}

impl CipherModeContext {
    pub fn new(
        mode: CipherMode,
        algorithm: Arc<dyn CipherAlgorithm>,
        iv: Option<Vec<u8>>,
    ) -> Result<Self, CipherError> {
        Self::with_rng(mode, algorithm, iv, &mut rand::rng())
    }

    /// Как [`CipherModeContext::new`], IV для RandomDelta генерируется из `rng`.
    pub fn with_rng<R: RngCore + ?Sized>(
        mode: CipherMode,
        algorithm: Arc<dyn CipherAlgorithm>,
        iv: Option<Vec<u8>>,
        rng: &mut R,
    ) -> Result<Self, CipherError> {
        if algorithm.is_keystream() {
            return Err(CipherError::KeystreamCipher);
        }

        let block_size = algorithm.block_size();
        // при блоке в 1 байт приращение Δ пустое и счётчик стоит на месте
        if mode == CipherMode::RandomDelta && block_size < 2 {
            return Err(CipherError::InvalidBlockSize {
                algorithm: "RandomDelta",
                expected: "at least 2",
                actual: block_size,
            });
        }

        let iv = match iv {
            Some(iv) if mode != CipherMode::ECB && iv.len() != block_size => {
                return Err(CipherError::InvalidIvLength {
                    expected: block_size,
                    actual: iv.len(),
                });
            }
            Some(iv) => iv,
            None if mode.requires_iv() => return Err(CipherError::MissingIv(mode)),
            None if mode == CipherMode::RandomDelta => {
                let mut iv = vec![0u8; block_size];
                rng.fill_bytes(&mut iv);
                log::debug!("RandomDelta: generated {block_size}-byte IV");
                iv
            }
            None => Vec::new(),
        };

        let delta = if mode == CipherMode::RandomDelta {
            iv[block_size - block_size / 2..].to_vec()
        } else {
            Vec::new()
        };

        Ok(Self {
            mode,
            algorithm,
            iv,
            delta,
        })
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    /// Вектор инициализации (пустой для ECB без IV).
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Начальное состояние потока.
    pub fn start(&self) -> ModeState {
        ModeState {
            register: self.iv.clone(),
        }
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt_chunk(&mut self.start(), data)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.decrypt_chunk(&mut self.start(), data)
    }

    /// Шифрует очередную порцию потока. При ошибке состояние не меняется.
    pub fn encrypt_chunk(
        &self,
        state: &mut ModeState,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.process_chunk(state, data, Direction::Encrypt)
    }

    pub fn decrypt_chunk(
        &self,
        state: &mut ModeState,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.process_chunk(state, data, Direction::Decrypt)
    }

    fn process_chunk(
        &self,
        state: &mut ModeState,
        data: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, CipherError> {
        let block_size = self.block_size();
        if data.len() % block_size != 0 {
            return Err(CipherError::UnalignedData {
                length: data.len(),
                block_size,
            });
        }
        if data.is_empty() {
            return Ok(Vec::new());
        }

        log::trace!(
            "{:?} {:?}: {} blocks",
            self.mode,
            direction,
            data.len() / block_size
        );

        let (output, register) = match (self.mode, direction) {
            (CipherMode::ECB, Direction::Encrypt) => {
                (self.map_blocks(data, |_, block| self.algorithm.encrypt(block))?, None)
            }
            (CipherMode::ECB, Direction::Decrypt) => {
                (self.map_blocks(data, |_, block| self.algorithm.decrypt(block))?, None)
            }
            (CipherMode::CBC, Direction::Encrypt) => self.chain(state, data, |s, p| {
                let k = self.algorithm.encrypt(&xor_bytes(p, s))?;
                Ok((k.clone(), k))
            })?,
            (CipherMode::CBC, Direction::Decrypt) => {
                let output = self.map_blocks(data, |i, block| {
                    let prev = self.previous_block(state, data, i);
                    Ok(xor_bytes(&self.algorithm.decrypt(block)?, prev))
                })?;
                (output, Some(last_block(data, block_size)))
            }
            (CipherMode::PCBC, Direction::Encrypt) => self.chain(state, data, |s, p| {
                let k = self.algorithm.encrypt(&xor_bytes(p, s))?;
                let next = xor_bytes(&k, p);
                Ok((k, next))
            })?,
            (CipherMode::PCBC, Direction::Decrypt) => self.chain(state, data, |s, k| {
                let p = xor_bytes(&self.algorithm.decrypt(k)?, s);
                let next = xor_bytes(k, &p);
                Ok((p, next))
            })?,
            (CipherMode::CFB, Direction::Encrypt) => self.chain(state, data, |s, p| {
                let k = xor_bytes(&self.algorithm.encrypt(s)?, p);
                Ok((k.clone(), k))
            })?,
            (CipherMode::CFB, Direction::Decrypt) => {
                let output = self.map_blocks(data, |i, block| {
                    let prev = self.previous_block(state, data, i);
                    Ok(xor_bytes(&self.algorithm.encrypt(prev)?, block))
                })?;
                (output, Some(last_block(data, block_size)))
            }
            (CipherMode::OFB, _) => self.chain(state, data, |s, block| {
                let gamma = self.algorithm.encrypt(s)?;
                Ok((xor_bytes(&gamma, block), gamma))
            })?,
            (CipherMode::CTR, _) => {
                let base = &state.register;
                let output = self.map_blocks(data, |i, block| {
                    let mut counter = base.clone();
                    add_to_counter(&mut counter, i as u64);
                    Ok(xor_bytes(&self.algorithm.encrypt(&counter)?, block))
                })?;
                let mut next = base.clone();
                add_to_counter(&mut next, (data.len() / block_size) as u64);
                (output, Some(next))
            }
            (CipherMode::RandomDelta, _) => {
                // счётчики считаются заранее, блоки обрабатываются независимо
                let mut counters = Vec::with_capacity(data.len() / block_size + 1);
                counters.push(state.register.clone());
                for _ in 0..data.len() / block_size {
                    let next = add_by_delta(&counters[counters.len() - 1], &self.delta);
                    counters.push(next);
                }

                let output = self.map_blocks(data, |i, block| match direction {
                    Direction::Encrypt => self.algorithm.encrypt(&xor_bytes(block, &counters[i])),
                    Direction::Decrypt => {
                        Ok(xor_bytes(&self.algorithm.decrypt(block)?, &counters[i]))
                    }
                })?;
                (output, counters.pop())
            }
        };

        if let Some(register) = register {
            state.register = register;
        }
        Ok(output)
    }

    /// Независимая обработка блоков с сохранением порядка.
    fn map_blocks<F>(&self, data: &[u8], f: F) -> Result<Vec<u8>, CipherError>
    where
        F: Fn(usize, &[u8]) -> Result<Vec<u8>, CipherError> + Sync + Send,
    {
        let block_size = self.block_size();
        let blocks: Vec<Vec<u8>> = if data.len() / block_size < PARALLEL_THRESHOLD_BLOCKS {
            data.chunks(block_size)
                .enumerate()
                .map(|(i, block)| f(i, block))
                .collect::<Result<_, _>>()?
        } else {
            data.par_chunks(block_size)
                .enumerate()
                .map(|(i, block)| f(i, block))
                .collect::<Result<_, _>>()?
        };
        Ok(blocks.concat())
    }

    /// Последовательная обработка: `f(register, block) -> (output, next_register)`.
    fn chain<F>(
        &self,
        state: &ModeState,
        data: &[u8],
        mut f: F,
    ) -> Result<(Vec<u8>, Option<Vec<u8>>), CipherError>
    where
        F: FnMut(&[u8], &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError>,
    {
        let mut register = state.register.clone();
        let mut output = Vec::with_capacity(data.len());
        for block in data.chunks(self.block_size()) {
            let (out, next) = f(&register, block)?;
            output.extend_from_slice(&out);
            register = next;
        }
        Ok((output, Some(register)))
    }

    #[inline]
    fn previous_block<'a>(&self, state: &'a ModeState, data: &'a [u8], i: usize) -> &'a [u8] {
        let block_size = self.block_size();
        if i == 0 {
            &state.register
        } else {
            &data[(i - 1) * block_size..i * block_size]
        }
    }
}

#[inline]
fn last_block(data: &[u8], block_size: usize) -> Vec<u8> {
    data[data.len() - block_size..].to_vec()
}
