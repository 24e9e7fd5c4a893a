use crate::error::RijndaelError;
use crate::gf::{Gf256, irreducible_moduli};
use crate::rijndael::key_schedule::RijndaelKeyExpansion;
use crate::rijndael::sbox::RijndaelSBox;
use std::sync::Arc;
use symmetric_cipher::crypto::key_expansion::KeyExpansion;
use symmetric_cipher::{CipherAlgorithm, CipherError, SymmetricCipher};

/// Rijndael с блоком 128, 192 или 256 бит и произвольным неприводимым модулем.
///
/// Состояние хранится по столбцам: байт `i` блока: строка `i % 4`, столбец `i / 4`.
/// С модулем 0x1B и блоком 128 бит совпадает с AES.
pub struct Rijndael {
    nb: usize,
    field: Gf256,
    sbox: Arc<RijndaelSBox>,
    key_expansion: RijndaelKeyExpansion,
    round_keys: Option<Vec<Vec<u8>>>,
}

impl Rijndael {
    pub fn new(block_bits: usize, modulus: u8) -> Result<Self, RijndaelError> {
        if !matches!(block_bits, 128 | 192 | 256) {
            return Err(RijndaelError::UnsupportedBlockBits(block_bits));
        }

        let field = Gf256::new(modulus)?;
        log::debug!("Rijndael: {block_bits}-bit block, modulus 0x1{modulus:02X}");
        Ok(Self::from_field(block_bits / 32, field))
    }

    /// AES: блок 128 бит, модуль 0x1B.
    pub fn aes() -> Self {
        Self::from_field(4, Gf256::aes())
    }

    fn from_field(nb: usize, field: Gf256) -> Self {
        let sbox = Arc::new(RijndaelSBox::new(field));
        Self {
            nb,
            field,
            key_expansion: RijndaelKeyExpansion::new(nb, field, sbox.clone()),
            sbox,
            round_keys: None,
        }
    }

    pub fn with_key(block_bits: usize, modulus: u8, key: &[u8]) -> Result<Self, RijndaelError> {
        let mut cipher = Self::new(block_bits, modulus)?;
        cipher.set_key(key)?;
        Ok(cipher)
    }

    /// Младшие байты всех неприводимых полиномов степени 8.
    pub fn available_moduli() -> Vec<u8> {
        irreducible_moduli()
    }

    pub fn modulus(&self) -> u8 {
        self.field.modulus()
    }

    /// Число раундов; известно только после установки ключа.
    pub fn num_rounds(&self) -> Option<usize> {
        self.round_keys.as_ref().map(|keys| keys.len() - 1)
    }

    fn round_keys(&self) -> Result<&[Vec<u8>], CipherError> {
        self.round_keys
            .as_deref()
            .ok_or(CipherError::KeyNotSet("Rijndael"))
    }

    fn encrypt_state(&self, state: &mut [u8], round_keys: &[Vec<u8>]) {
        let nr = round_keys.len() - 1;

        add_round_key(state, &round_keys[0]);
        for round_key in &round_keys[1..nr] {
            self.sub_bytes(state);
            self.shift_rows(state, false);
            self.mix_columns(state, &MIX);
            add_round_key(state, round_key);
        }
        self.sub_bytes(state);
        self.shift_rows(state, false);
        add_round_key(state, &round_keys[nr]);
    }

    fn decrypt_state(&self, state: &mut [u8], round_keys: &[Vec<u8>]) {
        let nr = round_keys.len() - 1;

        add_round_key(state, &round_keys[nr]);
        for round_key in round_keys[1..nr].iter().rev() {
            self.shift_rows(state, true);
            self.inv_sub_bytes(state);
            add_round_key(state, round_key);
            self.mix_columns(state, &INV_MIX);
        }
        self.shift_rows(state, true);
        self.inv_sub_bytes(state);
        add_round_key(state, &round_keys[0]);
    }

    fn sub_bytes(&self, state: &mut [u8]) {
        state.iter_mut().for_each(|b| *b = self.sbox.substitute(*b));
    }

    fn inv_sub_bytes(&self, state: &mut [u8]) {
        state.iter_mut().for_each(|b| *b = self.sbox.inverse_substitute(*b));
    }

    /// Строка `r` сдвигается влево на C_r столбцов (вправо при `inverse`).
    fn shift_rows(&self, state: &mut [u8], inverse: bool) {
        let nb = self.nb;
        let offsets: [usize; 4] = if nb == 8 { [0, 1, 3, 4] } else { [0, 1, 2, 3] };
        let original = state.to_vec();

        for (row, &offset) in offsets.iter().enumerate().skip(1) {
            for col in 0..nb {
                let source = if inverse {
                    (col + nb - offset) % nb
                } else {
                    (col + offset) % nb
                };
                state[col * 4 + row] = original[source * 4 + row];
            }
        }
    }

    /// Умножение каждого столбца на циркулянтную матрицу с первой строкой `coeffs`.
    fn mix_columns(&self, state: &mut [u8], coeffs: &[u8; 4]) {
        for column in state.chunks_exact_mut(4) {
            let a = [column[0], column[1], column[2], column[3]];
            for (row, out) in column.iter_mut().enumerate() {
                *out = (0..4).fold(0u8, |acc, k| {
                    acc ^ self.field.mul(coeffs[(k + 4 - row) % 4], a[k])
                });
            }
        }
    }
}

/// a(x) = 03x^3 + 01x^2 + 01x + 02
const MIX: [u8; 4] = [0x02, 0x03, 0x01, 0x01];
/// a^-1(x) = 0Bx^3 + 0Dx^2 + 09x + 0E
const INV_MIX: [u8; 4] = [0x0E, 0x0B, 0x0D, 0x09];

fn add_round_key(state: &mut [u8], round_key: &[u8]) {
    state
        .iter_mut()
        .zip(round_key)
        .for_each(|(s, k)| *s ^= k);
}

impl Default for Rijndael {
    fn default() -> Self {
        Self::aes()
    }
}

impl CipherAlgorithm for Rijndael {
    fn block_size(&self) -> usize {
        self.nb * 4
    }

    fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let round_keys = self.round_keys()?;
        CipherError::check_block(block, self.block_size())?;

        let mut state = block.to_vec();
        self.encrypt_state(&mut state, round_keys);
        Ok(state)
    }

    fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let round_keys = self.round_keys()?;
        CipherError::check_block(block, self.block_size())?;

        let mut state = block.to_vec();
        self.decrypt_state(&mut state, round_keys);
        Ok(state)
    }
}

impl SymmetricCipher for Rijndael {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        let round_keys = self.key_expansion.generate_round_keys(key)?;
        log::debug!("Rijndael: {} rounds for {}-byte key", round_keys.len() - 1, key.len());
        self.round_keys = Some(round_keys);
        Ok(())
    }
}
