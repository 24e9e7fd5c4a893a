use crate::gf::Gf256;
use crate::rijndael::sbox::RijndaelSBox;
use std::sync::Arc;
use symmetric_cipher::CipherError;
use symmetric_cipher::crypto::key_expansion::KeyExpansion;

/// Число раундов: max(Nb, Nk) + 6.
pub fn rounds_for(nb: usize, nk: usize) -> usize {
    nb.max(nk) + 6
}

/// Расписание ключей Rijndael для блока из `nb` 32-битных слов.
///
/// Слова big-endian: байт 0 слова старший. Каждый раундовый ключ: `4 * nb` байт.
pub struct RijndaelKeyExpansion {
    nb: usize,
    field: Gf256,
    sbox: Arc<RijndaelSBox>,
}

impl RijndaelKeyExpansion {
    pub fn new(nb: usize, field: Gf256, sbox: Arc<RijndaelSBox>) -> Self {
        Self { nb, field, sbox }
    }

    fn sub_word(&self, word: [u8; 4]) -> [u8; 4] {
        word.map(|b| self.sbox.substitute(b))
    }
}

impl KeyExpansion for RijndaelKeyExpansion {
    type RoundKey = Vec<u8>;

    fn generate_round_keys(&self, key: &[u8]) -> Result<Vec<Vec<u8>>, CipherError> {
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "Rijndael",
                expected: "16, 24 or 32",
                actual: key.len(),
            });
        }

        let nk = key.len() / 4;
        let total_words = self.nb * (rounds_for(self.nb, nk) + 1);

        let mut words: Vec<[u8; 4]> = key
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();

        // Rcon[i] = x^(i-1), считается в том же поле
        let mut rcon = 1u8;
        for i in nk..total_words {
            let mut temp = words[i - 1];
            if i % nk == 0 {
                temp.rotate_left(1);
                temp = self.sub_word(temp);
                temp[0] ^= rcon;
                rcon = self.field.mul(rcon, 2);
            } else if nk > 6 && i % nk == 4 {
                temp = self.sub_word(temp);
            }

            let prev = words[i - nk];
            words.push([
                prev[0] ^ temp[0],
                prev[1] ^ temp[1],
                prev[2] ^ temp[2],
                prev[3] ^ temp[3],
            ]);
        }

        Ok(words.chunks(self.nb).map(|round| round.concat()).collect())
    }
}
