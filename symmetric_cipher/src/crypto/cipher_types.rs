/// Режим шифрования (mode of operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    ECB,
    CBC,
    PCBC,
    CFB,
    OFB,
    CTR,
    RandomDelta,
}

impl CipherMode {
    pub const ALL: [CipherMode; 7] = [
        CipherMode::ECB,
        CipherMode::CBC,
        CipherMode::PCBC,
        CipherMode::CFB,
        CipherMode::OFB,
        CipherMode::CTR,
        CipherMode::RandomDelta,
    ];

    /// Нужен ли режиму вектор инициализации от вызывающей стороны.
    /// RandomDelta генерирует IV сам, если его не передали.
    pub fn requires_iv(self) -> bool {
        !matches!(self, CipherMode::ECB | CipherMode::RandomDelta)
    }

    /// Можно ли шифровать блоки независимо друг от друга.
    pub fn parallel_encrypt(self) -> bool {
        matches!(self, CipherMode::ECB | CipherMode::CTR | CipherMode::RandomDelta)
    }

    /// Можно ли расшифровывать блоки независимо: для CBC и CFB состояние
    /// блока `i`: это уже известный шифротекст блока `i - 1`.
    pub fn parallel_decrypt(self) -> bool {
        self.parallel_encrypt() || matches!(self, CipherMode::CBC | CipherMode::CFB)
    }
}

/// Схема набивки до размера блока.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddingMode {
    Zeros,
    ANSI_X923,
    PKCS7,
    ISO10126,
}

impl PaddingMode {
    pub const ALL: [PaddingMode; 4] = [
        PaddingMode::Zeros,
        PaddingMode::ANSI_X923,
        PaddingMode::PKCS7,
        PaddingMode::ISO10126,
    ];
}

/// Направление обработки данных.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}
