#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use std::sync::Arc;
    use symmetric_cipher::crypto::des::Des;
    use symmetric_cipher::crypto::des_key_expansion::DesKeyExpansion;
    use symmetric_cipher::crypto::des_transformation::DesTransformation;
    use symmetric_cipher::crypto::triple_des::{TripleDes, TripleDesKeying};
    use symmetric_cipher::crypto::utils::extend_key_with_parity;
    use symmetric_cipher::{CipherAlgorithm, CipherError, SymmetricCipher};

    #[test]
    fn test_des_known_vector() {
        let key = hex!("13 34 57 79 9B BC DF F1");
        let plaintext = hex!("01 23 45 67 89 AB CD EF");
        let expected_ciphertext = hex!("85 E8 13 54 0F 0A B4 05");

        let mut des = Des::with_components(Arc::new(DesKeyExpansion), Arc::new(DesTransformation));
        des.set_key(&key).unwrap();

        let ciphertext = des.encrypt(&plaintext).unwrap();
        assert_eq!(ciphertext, expected_ciphertext);

        let decrypted = des.decrypt(&ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_des_now_is_t() {
        let des = Des::with_key(&hex!("0123456789ABCDEF")).unwrap();
        assert_eq!(des.encrypt(b"Now is t").unwrap(), hex!("3FA40E8A984D4815"));
    }

    #[test]
    fn test_des_parity_bits_ignored() {
        let key = hex!("13 34 57 79 9B BC DF F1");
        let flipped: Vec<u8> = key.iter().map(|b| b ^ 0x01).collect();
        let plaintext = hex!("01 23 45 67 89 AB CD EF");

        let a = Des::with_key(&key).unwrap().encrypt(&plaintext).unwrap();
        let b = Des::with_key(&flipped).unwrap().encrypt(&plaintext).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_des_seven_byte_key() {
        let short_key = hex!("12 34 56 78 9A BC DE");
        let full_key = extend_key_with_parity(&short_key).unwrap();
        assert_eq!(full_key.len(), 8);
        // у каждого байта нечётное число единиц
        assert!(full_key.iter().all(|b| b.count_ones() % 2 == 1));

        let block = *b"8 bytes!";
        let a = Des::with_key(&short_key).unwrap();
        let b = Des::with_key(&full_key).unwrap();
        assert_eq!(a.encrypt(&block).unwrap(), b.encrypt(&block).unwrap());
        assert_eq!(a.decrypt(&a.encrypt(&block).unwrap()).unwrap(), block);
    }

    #[test]
    fn test_des_errors() {
        let mut des = Des::new();
        assert_eq!(des.encrypt(&[0u8; 8]), Err(CipherError::KeyNotSet("DES")));
        assert!(matches!(
            des.set_key(&[0u8; 9]),
            Err(CipherError::InvalidKeyLength { actual: 9, .. })
        ));

        des.set_key(b"12345678").unwrap();
        assert_eq!(
            des.encrypt(&[0u8; 7]),
            Err(CipherError::BlockLengthMismatch { expected: 8, actual: 7 })
        );
        assert!(des.decrypt(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_des_roundtrip_many_blocks() {
        let des = Des::with_key(b"secret!!").unwrap();
        for seed in 0u8..32 {
            let block: Vec<u8> = (0..8)
                .map(|i| seed.wrapping_mul(31).wrapping_add(i * 17))
                .collect();
            let encrypted = des.encrypt(&block).unwrap();
            assert_ne!(encrypted, block);
            assert_eq!(des.decrypt(&encrypted).unwrap(), block);
        }
    }

    #[test]
    fn test_triple_des_with_equal_keys_is_des() {
        let key = hex!("0123456789ABCDEF");
        let triple_key = [key, key, key].concat();
        let block = hex!("4E6F772069732074");

        let des = Des::with_key(&key).unwrap();
        let tdes = TripleDes::with_key(&triple_key).unwrap();
        assert_eq!(tdes.keying(), TripleDesKeying::ThreeKey);
        assert_eq!(tdes.encrypt(&block).unwrap(), des.encrypt(&block).unwrap());
    }

    #[test]
    fn test_triple_des_two_key_matches_three_key() {
        let k1 = hex!("0123456789ABCDEF");
        let k2 = hex!("FEDCBA9876543210");
        let block = *b"TripleDS";

        let two = TripleDes::with_key(&[k1, k2].concat()).unwrap();
        let three = TripleDes::with_key(&[k1, k2, k1].concat()).unwrap();
        assert_eq!(two.keying(), TripleDesKeying::TwoKey);

        let c = two.encrypt(&block).unwrap();
        assert_eq!(c, three.encrypt(&block).unwrap());
        assert_eq!(two.decrypt(&c).unwrap(), block);
    }

    #[test]
    fn test_triple_des_key_lengths() {
        let mut tdes = TripleDes::new(TripleDesKeying::ThreeKey);
        assert!(tdes.encrypt(&[0u8; 8]).is_err());
        assert!(tdes.set_key(&[1u8; 21]).is_ok());
        assert!(tdes.set_key(&[1u8; 24]).is_ok());
        assert!(tdes.set_key(&[1u8; 16]).is_err());

        let mut tdes = TripleDes::new(TripleDesKeying::TwoKey);
        assert!(tdes.set_key(&[1u8; 14]).is_ok());
        assert!(tdes.set_key(&[1u8; 16]).is_ok());
        assert!(tdes.set_key(&[1u8; 24]).is_err());
    }
}
