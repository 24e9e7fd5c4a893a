pub use crate::crypto::cipher_types::Direction;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::CipherError;
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::xor_bytes;
use std::sync::Arc;

pub type SharedKeyExpansion<R> = Arc<dyn KeyExpansion<RoundKey = R> + Send + Sync>;
pub type SharedTransformation<R> = Arc<dyn EncryptionTransformation<RoundKey = R> + Send + Sync>;

/// Обобщённая сеть Фейстеля.
///
/// Раунд шифрования: `L' = R`, `R' = L ^ F(R, k_r)`, ключи по возрастанию.
/// Расшифрование выполняет обратный раунд с ключами по убыванию.
/// При `swap_output` половины на выходе меняются местами (как в DES перед IP^-1).
pub struct FeistelNetwork<R> {
    algorithm: &'static str,
    num_rounds: usize,
    swap_output: bool,
    key_expansion: SharedKeyExpansion<R>,
    transformation: SharedTransformation<R>,
    round_keys: Option<Vec<R>>,
}

impl<R> FeistelNetwork<R> {
    pub fn new(
        algorithm: &'static str,
        num_rounds: usize,
        swap_output: bool,
        key_expansion: SharedKeyExpansion<R>,
        transformation: SharedTransformation<R>,
    ) -> Self {
        Self {
            algorithm,
            num_rounds,
            swap_output,
            key_expansion,
            transformation,
            round_keys: None,
        }
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    pub fn is_keyed(&self) -> bool {
        self.round_keys.is_some()
    }

    /// Строит расписание ключей; число раундовых ключей должно совпасть с числом раундов.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        let round_keys = self.key_expansion.generate_round_keys(key)?;
        if round_keys.len() != self.num_rounds {
            return Err(CipherError::InvalidRoundCount {
                algorithm: self.algorithm,
                expected: self.num_rounds,
                actual: round_keys.len(),
            });
        }
        log::debug!("{}: derived {} round keys", self.algorithm, round_keys.len());
        self.round_keys = Some(round_keys);
        Ok(())
    }

    pub fn process_rounds(
        &self,
        block: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, CipherError> {
        let round_keys = self
            .round_keys
            .as_ref()
            .ok_or(CipherError::KeyNotSet(self.algorithm))?;

        if block.len() % 2 != 0 {
            return Err(CipherError::InvalidBlockSize {
                algorithm: self.algorithm,
                expected: "even length",
                actual: block.len(),
            });
        }

        let (first, second) = block.split_at(block.len() / 2);

        match direction {
            Direction::Encrypt => {
                let mut left = first.to_vec();
                let mut right = second.to_vec();

                for round_key in round_keys {
                    let feistel_out = self.transformation.transform(&right, round_key)?;
                    let new_right = xor_bytes(&left, &feistel_out);
                    left = right;
                    right = new_right;
                }

                Ok(self.join(left, right))
            }
            Direction::Decrypt => {
                let (mut left, mut right) = if self.swap_output {
                    (second.to_vec(), first.to_vec())
                } else {
                    (first.to_vec(), second.to_vec())
                };

                for round_key in round_keys.iter().rev() {
                    let feistel_out = self.transformation.transform(&left, round_key)?;
                    let new_left = xor_bytes(&right, &feistel_out);
                    right = left;
                    left = new_left;
                }

                Ok([left, right].concat())
            }
        }
    }

    fn join(&self, left: Vec<u8>, right: Vec<u8>) -> Vec<u8> {
        if self.swap_output {
            [right, left].concat()
        } else {
            [left, right].concat()
        }
    }
}
