#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use symmetric_cipher::crypto::rc4::Rc4;
    use symmetric_cipher::{CipherAlgorithm, CipherError, SymmetricCipher};

    #[test]
    fn test_rc4_vectors() {
        let rc4 = Rc4::with_key(b"Secret").unwrap();
        assert_eq!(
            rc4.apply_keystream(b"Attack at dawn").unwrap(),
            hex!("45A01F645FC35B383552544B9BF5")
        );
    }

    #[test]
    fn test_rc4_decrypt_equals_encrypt_after_rekey() {
        let message = b"stream cipher message of arbitrary length";
        let mut rc4 = Rc4::new();
        rc4.set_key(b"k3y").unwrap();
        let encrypted = rc4.apply_keystream(message).unwrap();

        rc4.set_key(b"k3y").unwrap();
        assert_eq!(rc4.apply_keystream(&encrypted).unwrap(), message.to_vec());

        rc4.reset().unwrap();
        let per_byte: Vec<u8> = encrypted
            .iter()
            .flat_map(|b| rc4.decrypt(&[*b]).unwrap())
            .collect();
        assert_eq!(per_byte, message.to_vec());
    }

    #[test]
    fn test_rc4_capability_block_is_one_byte() {
        let rc4 = Rc4::with_key(b"key").unwrap();
        assert_eq!(rc4.block_size(), 1);
        assert_eq!(
            rc4.encrypt(&[1, 2]),
            Err(CipherError::BlockLengthMismatch { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_rc4_key_errors() {
        let mut rc4 = Rc4::new();
        assert_eq!(rc4.apply_keystream(b"x"), Err(CipherError::KeyNotSet("RC4")));
        assert_eq!(rc4.reset(), Err(CipherError::KeyNotSet("RC4")));
        assert!(rc4.set_key(&[]).is_err());
        assert!(rc4.set_key(&[0u8; 257]).is_err());
        assert!(rc4.set_key(&[0u8; 256]).is_ok());
    }
}
