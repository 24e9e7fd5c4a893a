//! Полиномы над GF(2) хранятся как битовые маски: бит `i`: коэффициент при x^i.

use crate::error::GfError;
use crate::gf::irreducible::is_irreducible;

/// Сложение в GF(2^8): XOR.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Умножение "русского крестьянина" с редукцией по модулю.
/// Модуль не проверяется.
pub fn multiply_unchecked(mut a: u8, mut b: u8, modulus: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        if b & 1 != 0 {
            p ^= a;
        }
        let high_bit = a & 0x80 != 0;
        a <<= 1;
        if high_bit {
            a ^= modulus;
        }
        b >>= 1;
    }
    p
}

/// Умножение в GF(2^8) с проверкой неприводимости модуля.
pub fn multiply(a: u8, b: u8, modulus: u8) -> Result<u8, GfError> {
    check_modulus(modulus)?;
    Ok(multiply_unchecked(a, b, modulus))
}

/// Обратный элемент расширенным алгоритмом Евклида.
pub fn inverse(a: u8, modulus: u8) -> Result<u8, GfError> {
    check_modulus(modulus)?;

    let (mut r0, mut r1) = (0x100 | modulus as u64, a as u64);
    let (mut t0, mut t1) = (0u64, 1u64);

    while r1 != 0 {
        let (q, rem) = divmod_nonzero(r0, r1);
        let t_next = t0 ^ poly_mul(q, t1);
        r0 = r1;
        r1 = rem;
        t0 = t1;
        t1 = t_next;
    }

    if r0 != 1 {
        return Err(GfError::NotInvertible {
            element: a,
            modulus,
        });
    }
    Ok((t0 & 0xFF) as u8)
}

/// Степень полинома; у нулевого полинома степени нет.
#[inline]
pub fn degree(poly: u64) -> Option<u32> {
    (poly != 0).then(|| 63 - poly.leading_zeros())
}

/// Умножение полиномов без редукции. Старшие биты за пределами u64 теряются.
pub fn poly_mul(mut a: u64, mut b: u64) -> u64 {
    let mut result = 0u64;
    while b != 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        a <<= 1;
        b >>= 1;
    }
    result
}

/// Деление полиномов с остатком: (частное, остаток).
pub fn poly_divmod(dividend: u64, divisor: u64) -> Result<(u64, u64), GfError> {
    if divisor == 0 {
        return Err(GfError::DivisionByZero);
    }
    Ok(divmod_nonzero(dividend, divisor))
}

pub(crate) fn divmod_nonzero(mut dividend: u64, divisor: u64) -> (u64, u64) {
    let divisor_degree = 63 - divisor.leading_zeros();
    let mut quotient = 0u64;

    while let Some(d) = degree(dividend) {
        if d < divisor_degree {
            break;
        }
        let shift = d - divisor_degree;
        quotient ^= 1 << shift;
        dividend ^= divisor << shift;
    }

    (quotient, dividend)
}

fn check_modulus(modulus: u8) -> Result<(), GfError> {
    if is_irreducible(modulus) {
        Ok(())
    } else {
        Err(GfError::ReducibleModulus(modulus))
    }
}
