use aes::{Aes128, Aes192, Aes256};
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use hex_literal::hex;
use quickcheck::quickcheck;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rijndael::gf::AES_MODULUS;
use rijndael::{GfError, Rijndael, RijndaelError};
use symmetric_cipher::{
    CipherAlgorithm, CipherError, CipherMode, PaddingMode, SymmetricCipher, SymmetricContext,
};
use tempfile::tempdir;

const FIPS_PLAINTEXT: [u8; 16] = hex!("00112233445566778899aabbccddeeff");

fn sequential_key(len: usize) -> Vec<u8> {
    (0..len as u8).collect()
}

fn reference_encrypt(key: &[u8], block: &[u8]) -> Vec<u8> {
    let mut buf = GenericArray::clone_from_slice(block);
    match key.len() {
        16 => Aes128::new_from_slice(key).unwrap().encrypt_block(&mut buf),
        24 => Aes192::new_from_slice(key).unwrap().encrypt_block(&mut buf),
        _ => Aes256::new_from_slice(key).unwrap().encrypt_block(&mut buf),
    }
    buf.to_vec()
}

fn reference_decrypt(key: &[u8], block: &[u8]) -> Vec<u8> {
    let mut buf = GenericArray::clone_from_slice(block);
    match key.len() {
        16 => Aes128::new_from_slice(key).unwrap().decrypt_block(&mut buf),
        24 => Aes192::new_from_slice(key).unwrap().decrypt_block(&mut buf),
        _ => Aes256::new_from_slice(key).unwrap().decrypt_block(&mut buf),
    }
    buf.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fips197_appendix_b() {
        let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
        let cipher = Rijndael::with_key(128, AES_MODULUS, &key).unwrap();
        let ct = cipher.encrypt(&hex!("3243f6a8885a308d313198a2e0370734")).unwrap();
        assert_eq!(ct, hex!("3925841d02dc09fbdc118597196a0b32"));
    }

    #[test]
    fn test_fips197_appendix_c() {
        let vectors: [(usize, [u8; 16]); 3] = [
            (16, hex!("69c4e0d86a7b0430d8cdb78070b4c55a")),
            (24, hex!("dda97ca4864cdfe06eaf70a0ec0d7191")),
            (32, hex!("8ea2b7ca516745bfeafc49904b496089")),
        ];

        for (key_len, expected) in vectors {
            let cipher = Rijndael::with_key(128, AES_MODULUS, &sequential_key(key_len)).unwrap();
            let ct = cipher.encrypt(&FIPS_PLAINTEXT).unwrap();
            assert_eq!(ct, expected, "key length {key_len}");
            assert_eq!(cipher.decrypt(&ct).unwrap(), FIPS_PLAINTEXT);
        }
    }

    #[test]
    fn test_matches_reference_aes() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for key_len in [16, 24, 32] {
            for _ in 0..20 {
                let mut key = vec![0u8; key_len];
                let mut block = [0u8; 16];
                rng.fill(&mut key[..]);
                rng.fill(&mut block);

                let cipher = Rijndael::with_key(128, AES_MODULUS, &key).unwrap();
                let ct = cipher.encrypt(&block).unwrap();
                assert_eq!(ct, reference_encrypt(&key, &block));
                assert_eq!(cipher.decrypt(&ct).unwrap(), reference_decrypt(&key, &ct));
            }
        }
    }

    #[test]
    fn test_default_is_aes() {
        let mut cipher = Rijndael::default();
        assert_eq!(cipher.block_size(), 16);
        assert_eq!(cipher.modulus(), AES_MODULUS);
        cipher.set_key(&sequential_key(16)).unwrap();
        assert_eq!(
            cipher.encrypt(&FIPS_PLAINTEXT).unwrap(),
            hex!("69c4e0d86a7b0430d8cdb78070b4c55a")
        );
    }

    #[test]
    fn test_wide_blocks_roundtrip() {
        for block_bits in [192, 256] {
            for key_len in [16, 24, 32] {
                let cipher =
                    Rijndael::with_key(block_bits, AES_MODULUS, &sequential_key(key_len)).unwrap();
                let block: Vec<u8> = (0..block_bits / 8).map(|i| (i * 7) as u8).collect();

                let ct = cipher.encrypt(&block).unwrap();
                assert_eq!(ct.len(), block.len());
                assert_ne!(ct, block);
                assert_eq!(cipher.decrypt(&ct).unwrap(), block);
            }
        }
    }

    #[test]
    fn test_round_counts() {
        let cases = [
            (128, 16, 10),
            (128, 24, 12),
            (128, 32, 14),
            (192, 16, 12),
            (256, 16, 14),
            (256, 24, 14),
        ];
        for (block_bits, key_len, rounds) in cases {
            let cipher = Rijndael::with_key(block_bits, AES_MODULUS, &vec![0; key_len]).unwrap();
            assert_eq!(cipher.num_rounds(), Some(rounds));
        }
        assert_eq!(Rijndael::aes().num_rounds(), None);
    }

    #[test]
    fn test_every_modulus_roundtrip() {
        let key = sequential_key(16);
        let reference = Rijndael::with_key(128, AES_MODULUS, &key)
            .unwrap()
            .encrypt(&FIPS_PLAINTEXT)
            .unwrap();

        let moduli = Rijndael::available_moduli();
        assert_eq!(moduli.len(), 30);
        for modulus in moduli {
            let cipher = Rijndael::with_key(128, modulus, &key).unwrap();
            let ct = cipher.encrypt(&FIPS_PLAINTEXT).unwrap();
            assert_eq!(cipher.decrypt(&ct).unwrap(), FIPS_PLAINTEXT, "modulus {modulus:#04x}");
            if modulus != AES_MODULUS {
                assert_ne!(ct, reference, "modulus {modulus:#04x}");
            }
        }
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Rijndael::new(100, AES_MODULUS),
            Err(RijndaelError::UnsupportedBlockBits(100))
        ));
        assert!(matches!(
            Rijndael::new(128, 0x00),
            Err(RijndaelError::Field(GfError::ReducibleModulus(0x00)))
        ));
        assert!(matches!(
            Rijndael::with_key(128, AES_MODULUS, &[0; 10]),
            Err(RijndaelError::Cipher(CipherError::InvalidKeyLength { actual: 10, .. }))
        ));
    }

    #[test]
    fn test_use_errors() {
        let cipher = Rijndael::aes();
        assert_eq!(cipher.encrypt(&[0; 16]), Err(CipherError::KeyNotSet("Rijndael")));

        let cipher = Rijndael::with_key(192, AES_MODULUS, &[1; 16]).unwrap();
        assert_eq!(
            cipher.decrypt(&[0; 16]),
            Err(CipherError::BlockLengthMismatch {
                expected: 24,
                actual: 16
            })
        );
    }

    #[test]
    fn test_all_modes_and_paddings() {
        let message = b"Rijndael works with every mode of operation, even with odd lengths!";
        for block_bits in [128, 256] {
            let block_size = block_bits / 8;
            for mode in CipherMode::ALL {
                for padding in PaddingMode::ALL {
                    let cipher = Rijndael::new(block_bits, 0x1D).unwrap();
                    let iv = Some(vec![3; block_size]);
                    let ctx = SymmetricContext::new(cipher, &[9; 32], mode, padding, iv).unwrap();

                    let ct = ctx.encrypt(message).unwrap();
                    assert_eq!(ct.len() % block_size, 0);
                    assert_eq!(
                        ctx.decrypt(&ct).unwrap(),
                        message,
                        "{mode:?} {padding:?} {block_bits}"
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plain.bin");
        let encrypted = dir.path().join("plain.enc");
        let decrypted = dir.path().join("plain.dec");

        let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        tokio::fs::write(&input, &data).await.unwrap();

        let ctx = SymmetricContext::new(
            Rijndael::new(192, AES_MODULUS).unwrap(),
            &[5; 24],
            CipherMode::CTR,
            PaddingMode::PKCS7,
            Some(vec![0; 24]),
        )
        .unwrap()
        .with_chunk_size(1000);

        ctx.encrypt_file(&input, &encrypted).await.unwrap();
        assert_eq!(tokio::fs::read(&encrypted).await.unwrap(), ctx.encrypt(&data).unwrap());

        ctx.decrypt_file(&encrypted, &decrypted).await.unwrap();
        assert_eq!(tokio::fs::read(&decrypted).await.unwrap(), data);
    }

    quickcheck! {
        fn prop_roundtrip_256_block(seed: u64, modulus_index: usize) -> bool {
            let moduli = Rijndael::available_moduli();
            let modulus = moduli[modulus_index % moduli.len()];

            let mut rng = StdRng::seed_from_u64(seed);
            let mut key = [0u8; 32];
            let mut block = [0u8; 32];
            rng.fill(&mut key);
            rng.fill(&mut block);

            let cipher = Rijndael::with_key(256, modulus, &key).unwrap();
            cipher.decrypt(&cipher.encrypt(&block).unwrap()).unwrap() == block
        }
    }
}
