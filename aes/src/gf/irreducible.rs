use crate::gf::arithmetic::{degree, divmod_nonzero};

/// Неприводим ли `x^8 + modulus` над GF(2).
///
/// Достаточно проверить делители степени 1..=4; чётные делители (кратные x)
/// отсекаются проверкой младшего бита.
pub fn is_irreducible(modulus: u8) -> bool {
    is_irreducible_poly(0x100 | modulus as u64)
}

fn is_irreducible_poly(poly: u64) -> bool {
    let Some(deg) = degree(poly) else {
        return false;
    };
    if poly & 1 == 0 {
        return false;
    }

    let limit = 1u64 << (deg / 2 + 1);
    (3..limit)
        .step_by(2)
        .all(|d| divmod_nonzero(poly, d).1 != 0)
}

/// Все допустимые модули (младшие байты) неприводимых полиномов степени 8.
pub fn irreducible_moduli() -> Vec<u8> {
    (0..=u8::MAX).filter(|&m| is_irreducible(m)).collect()
}

/// Разложение полинома над GF(2) на неприводимые множители пробным делением.
///
/// Множители идут по возрастанию, повторяются с кратностью; `0` и `1`
/// возвращаются как есть.
pub fn factorize(mut poly: u64) -> Vec<u64> {
    if poly <= 1 {
        return vec![poly];
    }

    let mut factors = Vec::new();
    while poly & 1 == 0 {
        factors.push(0b10);
        poly >>= 1;
    }

    let mut divisor = 3u64;
    while poly != 1 {
        let (Some(poly_deg), Some(div_deg)) = (degree(poly), degree(divisor)) else {
            break;
        };
        if div_deg * 2 > poly_deg {
            factors.push(poly);
            break;
        }

        let (quotient, remainder) = divmod_nonzero(poly, divisor);
        if remainder == 0 {
            factors.push(divisor);
            poly = quotient;
        } else {
            divisor += 2;
        }
    }

    factors
}
