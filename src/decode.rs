//! Base-N decoding of share values into exact integers.
//!
//! Share values arrive as digit strings in any radix from 2 to 36. Letters
//! extend the digit set past 9 and are accepted in either case. Decoding is
//! exact: the result is a [`BigInt`] of whatever size the string demands.

use num_bigint::BigInt;
use num_traits::Num;

use crate::constants::{MAX_BASE, MIN_BASE};
use crate::error::{Error, Result};

fn check_base(base: u32) -> Result<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(Error::InvalidBase(base.to_string()))
    }
}

/// Decodes `value` as an unsigned integer written in `base`.
///
/// The string must be non-empty and consist only of digits valid in `base`.
/// Signs, whitespace and separators are rejected rather than skipped.
///
/// # Examples
///
/// ```rust
/// use polysecret::decode::decode;
/// use num_bigint::BigInt;
///
/// assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
/// assert_eq!(decode("fF", 16).unwrap(), BigInt::from(255));
/// assert!(decode("12", 37).is_err());
/// ```
pub fn decode(value: &str, base: u32) -> Result<BigInt> {
    check_base(base)?;

    let invalid = || Error::InvalidDigit {
        value: value.to_string(),
        base,
    };

    // from_str_radix tolerates a leading '+' and '_' separators, so the digit
    // set is checked up front
    if value.is_empty() || !value.chars().all(|c| c.is_digit(base)) {
        return Err(invalid());
    }

    BigInt::from_str_radix(value, base).map_err(|_| invalid())
}

/// Writes `n` in `base` using lowercase letters for digits above 9.
pub fn encode(n: &BigInt, base: u32) -> Result<String> {
    check_base(base)?;
    Ok(n.to_str_radix(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_decode_reference_shares() {
        assert_eq!(decode("4", 10).unwrap(), BigInt::from(4));
        assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode("12", 10).unwrap(), BigInt::from(12));
        assert_eq!(decode("213", 4).unwrap(), BigInt::from(39));
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(decode("zz", 36).unwrap(), BigInt::from(36 * 36 - 1));
        assert_eq!(decode("ZZ", 36).unwrap(), decode("zZ", 36).unwrap());
        assert_eq!(decode("DeadBeef", 16).unwrap(), BigInt::from(0xdeadbeef_u64));
    }

    #[test]
    fn test_invalid_base() {
        for base in [0, 1, 37, 100] {
            let err = decode("1", base).unwrap_err();
            assert_eq!(err, Error::InvalidBase(base.to_string()));
        }
    }

    #[test]
    fn test_invalid_digits() {
        let cases = [
            ("2", 2),
            ("19a", 10),
            ("g", 16),
            ("", 10),
            (" 12", 10),
            ("12 ", 10),
            ("+12", 10),
            ("-12", 10),
            ("1_000", 10),
        ];
        for (value, base) in cases {
            assert_eq!(
                decode(value, base),
                Err(Error::InvalidDigit {
                    value: value.to_string(),
                    base
                }),
                "value {value:?} base {base}"
            );
        }
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(decode("000", 7).unwrap(), BigInt::from(0));
        assert_eq!(decode("0010", 2).unwrap(), BigInt::from(2));
    }

    #[test]
    fn test_beyond_double_precision() {
        // 2^53 + 1 is the first integer an f64 cannot hold
        let n = (BigInt::from(1) << 53usize) + BigInt::from(1);
        assert_eq!(decode("9007199254740993", 10).unwrap(), n);

        let huge = BigInt::from(u128::MAX) * BigInt::from(u128::MAX);
        for base in MIN_BASE..=MAX_BASE {
            let encoded = encode(&huge, base).unwrap();
            assert_eq!(decode(&encoded, base).unwrap(), huge);
            assert_eq!(decode(&encoded.to_uppercase(), base).unwrap(), huge);
        }
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let base = rng.gen_range(MIN_BASE..=MAX_BASE);
            let n = BigInt::from(rng.gen::<u128>()) << rng.gen_range(0..64usize);
            assert_eq!(decode(&encode(&n, base).unwrap(), base).unwrap(), n);
        }
    }
}
