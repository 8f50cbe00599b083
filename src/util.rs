//! serde helpers that write big numbers as decimal strings, so JSON readers
//! never round them through a double

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::Serializer;

pub fn bigint_str<S>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(n)
}

pub fn opt_bigint_str<S>(n: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match n {
        Some(n) => serializer.collect_str(n),
        None => serializer.serialize_none(),
    }
}

/// Integral rationals are written without a denominator (`"3"`), others as
/// `"numer/denom"`.
pub fn rational_str<S>(r: &BigRational, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(r)
}
