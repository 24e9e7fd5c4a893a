use crate::crypto::cipher_types::PaddingMode;
use crate::crypto::error::CipherError;
use rand::RngCore;

/// Набивка до размера блока.
///
/// Данные, уже кратные размеру блока (в том числе пустые), не дополняются:
/// лишний блок набивки не добавляется. При сообщении кратной длины снятие
/// набивки может срезать "хвост" самих данных (особенно для `Zeros`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    mode: PaddingMode,
    block_size: usize,
}

impl Padding {
    pub fn new(mode: PaddingMode, block_size: usize) -> Result<Self, CipherError> {
        if !(1..=256).contains(&block_size) {
            return Err(CipherError::InvalidBlockSize {
                algorithm: "padding",
                expected: "1..=256",
                actual: block_size,
            });
        }
        Ok(Self { mode, block_size })
    }

    pub fn mode(&self) -> PaddingMode {
        self.mode
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        self.apply_with_rng(data, &mut rand::rng())
    }

    /// То же, что [`Padding::apply`], но случайные байты ISO 10126 берутся из `rng`.
    pub fn apply_with_rng<R: RngCore + ?Sized>(&self, data: &[u8], rng: &mut R) -> Vec<u8> {
        let rem = data.len() % self.block_size;
        if rem == 0 {
            return data.to_vec();
        }

        let delta = self.block_size - rem;
        let mut result = Vec::with_capacity(data.len() + delta);
        result.extend_from_slice(data);

        match self.mode {
            PaddingMode::Zeros => result.resize(data.len() + delta, 0),
            PaddingMode::ANSI_X923 => {
                result.resize(data.len() + delta - 1, 0);
                result.push(delta as u8);
            }
            PaddingMode::PKCS7 => result.resize(data.len() + delta, delta as u8),
            PaddingMode::ISO10126 => {
                let mut random = vec![0u8; delta - 1];
                rng.fill_bytes(&mut random);
                result.extend_from_slice(&random);
                result.push(delta as u8);
            }
        }

        result
    }

    /// Снятие набивки в мягком режиме: если набивка не прошла проверку,
    /// данные возвращаются без изменений.
    pub fn remove(&self, data: &[u8]) -> Vec<u8> {
        match self.remove_checked(data) {
            Ok(stripped) => stripped,
            Err(err) => {
                log::debug!("{:?}: padding left in place ({err})", self.mode);
                data.to_vec()
            }
        }
    }

    /// Строгое снятие набивки: некорректная набивка: ошибка.
    ///
    /// Пустые данные возвращаются как есть, некратная длина даёт `UnalignedData`.
    pub fn remove_checked(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if data.len() % self.block_size != 0 {
            return Err(CipherError::UnalignedData {
                length: data.len(),
                block_size: self.block_size,
            });
        }

        if self.mode == PaddingMode::Zeros {
            let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            return Ok(data[..end].to_vec());
        }

        let pad = data[data.len() - 1] as usize;
        if pad == 0 || pad > self.block_size || pad > data.len() {
            return Err(CipherError::InvalidPadding);
        }

        let (body, tail) = data.split_at(data.len() - pad);
        let valid = match self.mode {
            PaddingMode::ANSI_X923 => tail[..pad - 1].iter().all(|&b| b == 0),
            PaddingMode::PKCS7 => tail.iter().all(|&b| b as usize == pad),
            PaddingMode::ISO10126 | PaddingMode::Zeros => true,
        };

        if valid {
            Ok(body.to_vec())
        } else {
            Err(CipherError::InvalidPadding)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_apply_schemes() {
        let data = [1u8, 2, 3];
        let zeros = Padding::new(PaddingMode::Zeros, 8).unwrap();
        assert_eq!(zeros.apply(&data), vec![1, 2, 3, 0, 0, 0, 0, 0]);

        let x923 = Padding::new(PaddingMode::ANSI_X923, 8).unwrap();
        assert_eq!(x923.apply(&data), vec![1, 2, 3, 0, 0, 0, 0, 5]);

        let pkcs7 = Padding::new(PaddingMode::PKCS7, 8).unwrap();
        assert_eq!(pkcs7.apply(&data), vec![1, 2, 3, 5, 5, 5, 5, 5]);

        let iso = Padding::new(PaddingMode::ISO10126, 8).unwrap();
        let padded = iso.apply_with_rng(&data, &mut StdRng::seed_from_u64(7));
        assert_eq!(padded.len(), 8);
        assert_eq!(&padded[..3], &data);
        assert_eq!(padded[7], 5);
    }

    #[test]
    fn test_aligned_data_untouched() {
        for mode in PaddingMode::ALL {
            let padding = Padding::new(mode, 8).unwrap();
            assert_eq!(padding.apply(&[7u8; 16]), vec![7u8; 16]);
            assert!(padding.apply(&[]).is_empty());
        }
    }

    #[test]
    fn test_remove_roundtrip() {
        let data = b"hello world";
        for mode in PaddingMode::ALL {
            let padding = Padding::new(mode, 16).unwrap();
            let padded = padding.apply(data);
            assert_eq!(padded.len(), 16);
            assert_eq!(padding.remove(&padded), data.to_vec(), "{mode:?}");
        }
    }

    #[test]
    fn test_remove_invalid_is_noop() {
        let pkcs7 = Padding::new(PaddingMode::PKCS7, 8).unwrap();
        let broken = [1u8, 2, 3, 4, 5, 9, 3, 3];
        assert_eq!(pkcs7.remove(&broken), broken.to_vec());
        assert_eq!(pkcs7.remove_checked(&broken), Err(CipherError::InvalidPadding));

        let x923 = Padding::new(PaddingMode::ANSI_X923, 8).unwrap();
        let broken = [1u8, 2, 3, 4, 5, 1, 0, 3];
        assert_eq!(x923.remove(&broken), broken.to_vec());

        // длина набивки больше блока
        let big = [0u8, 0, 0, 0, 0, 0, 0, 9];
        assert_eq!(pkcs7.remove(&big), big.to_vec());
    }

    #[test]
    fn test_remove_unaligned_or_empty() {
        let pkcs7 = Padding::new(PaddingMode::PKCS7, 8).unwrap();
        assert_eq!(pkcs7.remove(&[1, 2, 3]), vec![1, 2, 3]);
        assert!(pkcs7.remove_checked(&[1, 2, 3]).is_err());
        assert!(pkcs7.remove(&[]).is_empty());
    }

    #[test]
    fn test_zeros_strips_trailing_data_zeros() {
        let zeros = Padding::new(PaddingMode::Zeros, 4).unwrap();
        let padded = zeros.apply(&[1, 0, 0]);
        assert_eq!(padded, vec![1, 0, 0, 0]);
        assert_eq!(zeros.remove(&padded), vec![1]);
    }

    #[test]
    fn test_invalid_block_size() {
        assert!(Padding::new(PaddingMode::PKCS7, 0).is_err());
        assert!(Padding::new(PaddingMode::PKCS7, 257).is_err());
    }
}
