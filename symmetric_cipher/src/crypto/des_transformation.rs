use crate::crypto::des_tables::{E, P, S_BOXES};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::CipherError;
use crate::crypto::utils::{permute_bits, xor_bytes, BitOrder, IndexBase};
use bitvec::prelude::*;

/// Раундовая функция DES: E -> XOR с подключом -> S-блоки -> P.
pub struct DesTransformation;

impl EncryptionTransformation for DesTransformation {
    type RoundKey = Vec<u8>;

    fn transform(&self, r_block: &[u8], round_key: &Vec<u8>) -> Result<Vec<u8>, CipherError> {
        CipherError::check_block(r_block, 4)?;
        if round_key.len() != 6 {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "DES round",
                expected: "6",
                actual: round_key.len(),
            });
        }

        // 1. Expansion
        let expanded = permute_bits(r_block, &E, BitOrder::MsbFirst, IndexBase::One)?;

        // 2. XOR
        let mixed = xor_bytes(&expanded, round_key);

        // 3. S-boxes: крайние биты шестёрки: строка, средние четыре: столбец
        let mut s_result = [0u8; 4];
        for (box_i, six) in mixed.view_bits::<Msb0>().chunks(6).enumerate() {
            let row = ((six[0] as usize) << 1) | six[5] as usize;
            let col = six[1..5]
                .iter()
                .by_vals()
                .fold(0usize, |acc, bit| (acc << 1) | bit as usize);
            let s_val = S_BOXES[box_i][row * 16 + col];
            s_result[box_i / 2] |= if box_i % 2 == 0 { s_val << 4 } else { s_val };
        }

        // 4. P-permutation
        permute_bits(&s_result, &P, BitOrder::MsbFirst, IndexBase::One)
    }
}
