use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::error::CipherError;

const NUM_ROUNDS: usize = 8;
const SCRAMBLE_PASSES: usize = 8;

/// Раундовый ключ FROG.
struct FrogRound {
    xor_mask: Vec<u8>,
    subst: [u8; 256],
    inv_subst: [u8; 256],
    bomb_perm: Vec<u8>,
}

impl FrogRound {
    fn from_slice(chunk: &[u8], block_size: usize) -> Self {
        let (xor_mask, rest) = chunk.split_at(block_size);
        let (subst_raw, bomb_raw) = rest.split_at(256);

        let mut subst = [0u8; 256];
        subst.copy_from_slice(subst_raw);
        make_permutation(&mut subst);

        let mut bomb_perm = bomb_raw.to_vec();
        make_permutation(&mut bomb_perm);

        let mut inv_subst = [0u8; 256];
        for (i, &s) in subst.iter().enumerate() {
            inv_subst[s as usize] = i as u8;
        }

        Self {
            xor_mask: xor_mask.to_vec(),
            subst,
            inv_subst,
            bomb_perm,
        }
    }
}

/// Превращает массив в перестановку чисел `0..len`: значение берётся по
/// модулю длины, повтор сдвигается на следующую свободную позицию.
fn make_permutation(array: &mut [u8]) {
    let size = array.len();
    let mut present = vec![false; size];

    for value in array.iter_mut() {
        let mut v = *value as usize % size;
        while present[v] {
            v = (v + 1) % size;
        }
        present[v] = true;
        *value = v as u8;
    }
}

/// FROG: блок 8..=128 байт, ключ 5..=125 байт, 8 раундов.
///
/// Каждый раунд: XOR с маской, затем для каждой позиции подстановка и,
/// если бомба указывает на другую позицию, XOR с байтом этой позиции.
pub struct Frog {
    block_size: usize,
    rounds: Option<Vec<FrogRound>>,
}

impl Frog {
    pub fn new(block_size: usize) -> Result<Self, CipherError> {
        if !(8..=128).contains(&block_size) {
            return Err(CipherError::InvalidBlockSize {
                algorithm: "FROG",
                expected: "8..=128",
                actual: block_size,
            });
        }
        Ok(Self {
            block_size,
            rounds: None,
        })
    }

    /// Внутренний ключ: размножение пользовательского ключа и перемешивание
    /// накапливающей суммой с обменом позиций.
    fn generate_key_schedule(&self, key: &[u8]) -> Vec<FrogRound> {
        let round_len = 2 * self.block_size + 256;
        let total = NUM_ROUNDS * round_len;

        let mut buffer: Vec<u8> = key.iter().copied().cycle().take(total).collect();

        let mut processed = 0usize;
        let mut last = 0usize;
        let mut k = 0usize;
        for _ in 0..SCRAMBLE_PASSES {
            for j in 0..total {
                processed = (processed + buffer[j] as usize + last) & 0xFF;
                buffer[j] = processed as u8;
                if j < total - 1 {
                    k = (k + buffer[j] as usize) % total;
                    buffer.swap(j, k);
                }
                last = buffer[j] as usize;
            }
        }

        buffer
            .chunks_exact(round_len)
            .map(|chunk| FrogRound::from_slice(chunk, self.block_size))
            .collect()
    }

    fn rounds(&self, block: &[u8]) -> Result<&[FrogRound], CipherError> {
        let rounds = self.rounds.as_deref().ok_or(CipherError::KeyNotSet("FROG"))?;
        CipherError::check_block(block, self.block_size)?;
        Ok(rounds)
    }
}

impl CipherAlgorithm for Frog {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let rounds = self.rounds(block)?;
        let mut result = block.to_vec();

        for round in rounds {
            for (b, m) in result.iter_mut().zip(&round.xor_mask) {
                *b ^= m;
            }
            for i in 0..self.block_size {
                result[i] = round.subst[result[i] as usize];
                let target = round.bomb_perm[i] as usize;
                if target != i {
                    result[i] ^= result[target];
                }
            }
        }

        Ok(result)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let rounds = self.rounds(block)?;
        let mut result = block.to_vec();

        for round in rounds.iter().rev() {
            for i in (0..self.block_size).rev() {
                let target = round.bomb_perm[i] as usize;
                if target != i {
                    result[i] ^= result[target];
                }
                result[i] = round.inv_subst[result[i] as usize];
            }
            for (b, m) in result.iter_mut().zip(&round.xor_mask) {
                *b ^= m;
            }
        }

        Ok(result)
    }
}

impl SymmetricCipher for Frog {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        if !(5..=125).contains(&key.len()) {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "FROG",
                expected: "5..=125",
                actual: key.len(),
            });
        }
        self.rounds = Some(self.generate_key_schedule(key));
        log::debug!("FROG: key schedule built for {}-byte blocks", self.block_size);
        Ok(())
    }
}
