use crate::crypto::des_tables::{KEY_SHIFTS, PC1, PC2};
use crate::crypto::error::CipherError;
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{permute_bits, BitOrder, IndexBase};
use bitvec::prelude::*;

/// Расписание ключей DES: PC-1, сдвиги половин C и D, PC-2.
pub struct DesKeyExpansion;

impl KeyExpansion for DesKeyExpansion {
    type RoundKey = Vec<u8>;

    fn generate_round_keys(&self, key: &[u8]) -> Result<Vec<Vec<u8>>, CipherError> {
        if key.len() != 8 {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "DES",
                expected: "8",
                actual: key.len(),
            });
        }

        // 1) PC-1: 64 бита -> 56 бит (7 байт)
        let permuted = permute_bits(key, &PC1, BitOrder::MsbFirst, IndexBase::One)?;
        let bits = permuted.view_bits::<Msb0>();

        // 2) половины C и D по 28 бит
        let mut c: BitVec<u8, Msb0> = bits[..28].iter().by_vals().collect();
        let mut d: BitVec<u8, Msb0> = bits[28..56].iter().by_vals().collect();

        // 3) сдвиг, склейка, PC-2
        let mut round_keys = Vec::with_capacity(KEY_SHIFTS.len());
        for &shift in &KEY_SHIFTS {
            c.rotate_left(shift as usize);
            d.rotate_left(shift as usize);

            let mut cd: BitVec<u8, Msb0> = BitVec::with_capacity(56);
            cd.extend(c.iter().by_vals());
            cd.extend(d.iter().by_vals());

            let subkey = permute_bits(cd.as_raw_slice(), &PC2, BitOrder::MsbFirst, IndexBase::One)?;
            round_keys.push(subkey);
        }

        Ok(round_keys)
    }
}
