#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use symmetric_cipher::crypto::deal::Deal;
    use symmetric_cipher::crypto::deal_key_expansion::DealKeySize;
    use symmetric_cipher::{BlockCipherAdapter, CipherAlgorithm, CipherError, SymmetricCipher};

    fn sample_key(len: usize) -> Vec<u8> {
        (0..len as u8).map(|i| i.wrapping_mul(37).wrapping_add(5)).collect()
    }

    #[test]
    fn test_deal_roundtrip_all_sizes() {
        let block: Vec<u8> = (0u8..16).collect();
        for key_size in [DealKeySize::Deal128, DealKeySize::Deal192, DealKeySize::Deal256] {
            let mut deal = Deal::new(key_size);
            deal.set_key(&sample_key(key_size.bytes())).unwrap();
            assert_eq!(deal.block_size(), 16);

            let encrypted = deal.encrypt(&block).unwrap();
            assert_ne!(encrypted, block);
            assert_eq!(deal.decrypt(&encrypted).unwrap(), block, "{key_size:?}");
        }
    }

    #[test]
    fn test_deal_round_counts() {
        assert_eq!(Deal::new(DealKeySize::Deal128).num_rounds(), 6);
        assert_eq!(Deal::new(DealKeySize::Deal192).num_rounds(), 6);
        assert_eq!(Deal::new(DealKeySize::Deal256).num_rounds(), 8);
    }

    #[test]
    fn test_deal_key_sensitivity() {
        let block = [0xA5u8; 16];
        let mut other_key = sample_key(16);
        other_key[15] ^= 0x80;

        let a = Deal::with_key(&sample_key(16)).unwrap();
        let b = Deal::with_key(&other_key).unwrap();
        assert_ne!(a.encrypt(&block).unwrap(), b.encrypt(&block).unwrap());
    }

    #[test]
    fn test_deal_invalid_key() {
        assert!(matches!(
            DealKeySize::from_bytes(20),
            Err(CipherError::InvalidKeyLength { actual: 20, .. })
        ));
        let mut deal = Deal::new(DealKeySize::Deal192);
        assert!(deal.set_key(&sample_key(16)).is_err());
        assert_eq!(deal.encrypt(&[0u8; 16]), Err(CipherError::KeyNotSet("DEAL")));
    }

    #[test]
    fn test_deal_block_length() {
        let deal = Deal::with_key(&sample_key(32)).unwrap();
        assert_eq!(deal.key_size(), DealKeySize::Deal256);
        assert_eq!(
            deal.encrypt(&[0u8; 8]),
            Err(CipherError::BlockLengthMismatch { expected: 16, actual: 8 })
        );
    }

    /// Простейший "шифр" для проверки внедрения внутреннего примитива.
    struct XorCipher {
        key: Vec<u8>,
    }

    impl CipherAlgorithm for XorCipher {
        fn block_size(&self) -> usize {
            4
        }
        fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
            CipherError::check_block(block, 4)?;
            Ok(block.iter().zip(&self.key).map(|(b, k)| b ^ k).collect())
        }
        fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
            self.encrypt(block)
        }
    }

    struct XorAdapter;

    impl BlockCipherAdapter for XorAdapter {
        fn block_size(&self) -> usize {
            4
        }
        fn key_size(&self) -> usize {
            4
        }
        fn keyed(&self, key: &[u8]) -> Result<Box<dyn CipherAlgorithm>, CipherError> {
            Ok(Box::new(XorCipher { key: key.to_vec() }))
        }
    }

    #[test]
    fn test_deal_with_injected_adapter() {
        let mut deal = Deal::with_adapter(DealKeySize::Deal128, Arc::new(XorAdapter));
        assert_eq!(deal.block_size(), 8);
        deal.set_key(&sample_key(16)).unwrap();

        let block = *b"injected";
        let encrypted = deal.encrypt(&block).unwrap();
        assert_eq!(deal.decrypt(&encrypted).unwrap(), block);
    }
}
