use crate::crypto::error::CipherError;
use bitvec::prelude::*;

/// Порядок нумерации битов внутри байта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Бит 0: старший бит первого байта (нумерация таблиц FIPS 46-3).
    MsbFirst,
    /// Бит 0: младший бит первого байта.
    LsbFirst,
}

/// С какого числа начинается нумерация позиций в таблице перестановки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

impl IndexBase {
    fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

/// Перестановка битов по таблице.
///
/// Бит `i` результата берётся из позиции `table[i]` входа. Длина результата:
/// `table.len()` битов, округлённая вверх до целых байтов.
pub fn permute_bits(
    input: &[u8],
    table: &[u8],
    order: BitOrder,
    base: IndexBase,
) -> Result<Vec<u8>, CipherError> {
    let bit_count = input.len() * 8;
    let mut output = vec![0u8; table.len().div_ceil(8)];

    for (i, &pos) in table.iter().enumerate() {
        let source = (pos as usize)
            .checked_sub(base.offset())
            .filter(|&p| p < bit_count)
            .ok_or(CipherError::BitIndexOutOfRange {
                index: pos as usize,
                bits: bit_count,
            })?;
        set_bit(&mut output, i, get_bit(input, source, order)?, order)?;
    }

    Ok(output)
}

fn check_bit_index(data: &[u8], index: usize) -> Result<(), CipherError> {
    let bits = data.len() * 8;
    if index >= bits {
        return Err(CipherError::BitIndexOutOfRange { index, bits });
    }
    Ok(())
}

/// Значение бита с номером `index`.
pub fn get_bit(data: &[u8], index: usize, order: BitOrder) -> Result<bool, CipherError> {
    check_bit_index(data, index)?;
    Ok(match order {
        BitOrder::MsbFirst => data.view_bits::<Msb0>()[index],
        BitOrder::LsbFirst => data.view_bits::<Lsb0>()[index],
    })
}

pub fn set_bit(
    data: &mut [u8],
    index: usize,
    value: bool,
    order: BitOrder,
) -> Result<(), CipherError> {
    check_bit_index(data, index)?;
    match order {
        BitOrder::MsbFirst => data.view_bits_mut::<Msb0>().set(index, value),
        BitOrder::LsbFirst => data.view_bits_mut::<Lsb0>().set(index, value),
    }
    Ok(())
}

/// XOR двух последовательностей с выравниванием по правому краю.
///
/// Короткий операнд дополняется нулями слева, длина результата равна длине
/// длинного операнда (как при XOR двух big-endian чисел).
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let offset = long.len() - short.len();

    let mut result = long.to_vec();
    for (dst, &src) in result[offset..].iter_mut().zip(short) {
        *dst ^= src;
    }
    result
}

/// Инкремент big-endian счётчика с переносом; переполнение заворачивается в ноль.
pub fn increment_counter(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        let (res, overflow) = byte.overflowing_add(1);
        *byte = res;
        if !overflow {
            break;
        }
    }
}

/// Прибавляет `value` к big-endian счётчику (CTR: счётчик блока `i` = IV + i).
pub fn add_to_counter(counter: &mut [u8], value: u64) {
    let mut carry = value as u128;
    for byte in counter.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = *byte as u128 + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
}

/// Сложение счётчика с более коротким `delta`: младшие байты складываются
/// побайтно, перенос уходит в старшие байты счётчика.
pub fn add_by_delta(counter: &[u8], delta: &[u8]) -> Vec<u8> {
    let mut result = counter.to_vec();
    let mut delta_bytes = delta.iter().rev();
    let mut carry = 0u16;

    for byte in result.iter_mut().rev() {
        let d = delta_bytes.next().copied();
        if d.is_none() && carry == 0 {
            break;
        }
        let sum = *byte as u16 + d.unwrap_or(0) as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }

    result
}

/// Расширение 56-битного ключа DES до 64 бит с битами нечётности.
///
/// Каждые 7 бит ключа становятся старшими битами очередного байта, младший
/// бит выставляется так, чтобы число единиц в байте было нечётным.
/// 8-байтовый ключ возвращается без изменений.
pub fn extend_key_with_parity(key: &[u8]) -> Result<Vec<u8>, CipherError> {
    match key.len() {
        8 => Ok(key.to_vec()),
        7 => Ok(key
            .view_bits::<Msb0>()
            .chunks(7)
            .map(|chunk| {
                let byte = chunk
                    .iter()
                    .by_vals()
                    .fold(0u8, |acc, bit| (acc << 1) | bit as u8)
                    << 1;
                if byte.count_ones() % 2 == 0 {
                    byte | 1
                } else {
                    byte
                }
            })
            .collect()),
        actual => Err(CipherError::InvalidKeyLength {
            algorithm: "DES",
            expected: "7 or 8",
            actual,
        }),
    }
}
