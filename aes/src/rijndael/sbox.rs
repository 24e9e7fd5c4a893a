use crate::gf::Gf256;

const AFFINE_CONSTANT: u8 = 0x63;
const INVERSE_AFFINE_CONSTANT: u8 = 0x05;

/// S-блок Rijndael для заданного поля: обращение в GF(2^8) и аффинное
/// преобразование над GF(2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RijndaelSBox {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl RijndaelSBox {
    pub fn new(field: Gf256) -> Self {
        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];

        for x in 0..=u8::MAX {
            // у нуля обратного нет, по соглашению он отображается в ноль
            let inv = field.inverse(x).unwrap_or(0);
            forward[x as usize] = affine(inv);
            inverse[x as usize] = field.inverse(inverse_affine(x)).unwrap_or(0);
        }

        Self { forward, inverse }
    }

    #[inline]
    pub fn substitute(&self, byte: u8) -> u8 {
        self.forward[byte as usize]
    }

    #[inline]
    pub fn inverse_substitute(&self, byte: u8) -> u8 {
        self.inverse[byte as usize]
    }

    pub fn forward_table(&self) -> &[u8; 256] {
        &self.forward
    }

    pub fn inverse_table(&self) -> &[u8; 256] {
        &self.inverse
    }
}

impl Default for RijndaelSBox {
    fn default() -> Self {
        Self::new(Gf256::aes())
    }
}

/// b_i ^ b_{i+4} ^ b_{i+5} ^ b_{i+6} ^ b_{i+7} ^ c_i (индексы по модулю 8)
fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ AFFINE_CONSTANT
}

fn inverse_affine(b: u8) -> u8 {
    b.rotate_left(1) ^ b.rotate_left(3) ^ b.rotate_left(6) ^ INVERSE_AFFINE_CONSTANT
}
