use num_bigint::BigInt;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::decode::decode;
use crate::error::{Error, Result};
use crate::sss::Point;

/// One share as it arrives: an index and a value written in `base`.
///
/// # Fields
///
/// * `index` - The share's position in the scheme, also its abscissa.
/// * `base` - Radix of `value`, expected in `2..=36`.
/// * `value` - The encoded share value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub index: u64,
    pub base: u32,
    pub value: String,
}

impl Share {
    pub fn new(index: u64, base: u32, value: impl Into<String>) -> Self {
        Share {
            index,
            base,
            value: value.into(),
        }
    }

    /// Decodes the value into the point `(index, value)`.
    pub fn decode(&self) -> Result<Point> {
        Ok(Point {
            x: BigInt::from(self.index),
            y: decode(&self.value, self.base)?,
        })
    }

    /// Reads a `{ "base": "<decimal>", "value": "<digits>" }` entry.
    fn from_entry(index: u64, entry: &Value) -> Result<Self> {
        let entry = entry
            .as_object()
            .ok_or_else(|| Error::malformed(format!("share {index} must be an object")))?;

        let base = match entry.get("base") {
            Some(Value::String(s)) => {
                let base = decode(s, 10).map_err(|_| Error::InvalidBase(s.clone()))?;
                u32::try_from(&base).map_err(|_| Error::InvalidBase(s.clone()))?
            }
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|b| u32::try_from(b).ok())
                .ok_or_else(|| Error::InvalidBase(n.to_string()))?,
            Some(_) => {
                return Err(Error::malformed(format!(
                    "share {index}: base must be a decimal string"
                )))
            }
            None => return Err(Error::malformed(format!("share {index}: missing base"))),
        };

        let value = match entry.get("value") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(Error::malformed(format!(
                    "share {index}: value must be a string"
                )))
            }
            None => return Err(Error::malformed(format!("share {index}: missing value"))),
        };

        Ok(Share { index, base, value })
    }
}

/// A decoded set of shares together with its declared scheme parameters.
///
/// `points` keeps the order the shares were supplied in; reconstruction uses
/// the first `k` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareSet {
    /// Declared total number of shares.
    pub n: usize,
    /// Declared reconstruction threshold.
    pub k: usize,
    pub points: Vec<Point>,
}

impl ShareSet {
    /// Decodes `shares` into a share set.
    ///
    /// # Errors
    ///
    /// * `MalformedTestCase` if `k` is zero, an index repeats, or fewer than
    ///   `k` shares are present.
    /// * `InvalidBase` / `InvalidDigit` if any share fails to decode.
    pub fn from_shares(n: usize, k: usize, shares: &[Share]) -> Result<Self> {
        if k == 0 {
            return Err(Error::malformed("threshold k must be at least 1"));
        }

        let mut seen = HashSet::with_capacity(shares.len());
        for share in shares {
            if !seen.insert(share.index) {
                return Err(Error::malformed(format!(
                    "duplicate share index {}",
                    share.index
                )));
            }
        }

        let points = shares
            .iter()
            .map(Share::decode)
            .collect::<Result<Vec<Point>>>()?;

        if points.len() < k {
            return Err(Error::malformed(format!(
                "need at least {k} shares, found {}",
                points.len()
            )));
        }

        if points.len() != n {
            warn!(
                "declared n = {} but {} shares are present",
                n,
                points.len()
            );
        }

        Ok(ShareSet { n, k, points })
    }

    pub fn degree(&self) -> usize {
        self.k - 1
    }
}

/// Reads a test case record:
///
/// ```json
/// {
///   "keys": { "n": 4, "k": 3 },
///   "1": { "base": "10", "value": "4" },
///   "2": { "base": "2", "value": "111" }
/// }
/// ```
///
/// Keys that are not positive integers (other than `keys`) are ignored.
impl TryFrom<&Value> for ShareSet {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| Error::malformed("test case must be a JSON object"))?;

        let keys = record
            .get("keys")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::malformed("missing \"keys\" object"))?;
        let n = read_count(keys, "n")?;
        let k = read_count(keys, "k")?;
        debug!("test case n = {}, k = {}", n, k);

        let mut shares = Vec::new();
        for (key, entry) in record {
            if key == "keys" {
                continue;
            }
            let index = match read_index(key, entry)? {
                Some(index) => index,
                None => {
                    debug!("skipping non-share key {:?}", key);
                    continue;
                }
            };
            shares.push(Share::from_entry(index, entry)?);
        }

        ShareSet::from_shares(n, k, &shares)
    }
}

/// Share indices are plain decimal digits. A key of any other form that
/// carries a share entry is an error rather than something to drop.
fn read_index(key: &str, entry: &Value) -> Result<Option<u64>> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        return match key.parse::<u64>() {
            Ok(0) => Err(Error::malformed("share index must be positive")),
            Ok(index) => Ok(Some(index)),
            Err(_) => Err(Error::malformed(format!("share index {key} is out of range"))),
        };
    }

    let looks_like_share = entry
        .as_object()
        .map_or(false, |e| e.contains_key("base") || e.contains_key("value"));
    if looks_like_share {
        return Err(Error::malformed(format!(
            "share key {key:?} is not a positive decimal index"
        )));
    }
    Ok(None)
}

fn read_count(keys: &Map<String, Value>, name: &str) -> Result<usize> {
    let invalid = || Error::malformed(format!("keys.{name} must be a non-negative integer"));

    match keys.get(name) {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(invalid),
        Some(Value::String(s)) => s.parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => Err(Error::malformed(format!("missing keys.{name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference_case() -> Value {
        json!({
            "keys": { "n": 4, "k": 3 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "2", "value": "111" },
            "3": { "base": "10", "value": "12" },
            "6": { "base": "4", "value": "213" }
        })
    }

    #[test]
    fn test_parse_reference_case() -> Result<()> {
        let set = ShareSet::try_from(&reference_case())?;

        assert_eq!(set.n, 4);
        assert_eq!(set.k, 3);
        assert_eq!(set.degree(), 2);
        assert_eq!(
            set.points,
            vec![
                Point::new(1, 4),
                Point::new(2, 7),
                Point::new(3, 12),
                Point::new(6, 39)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_points_keep_input_order() -> Result<()> {
        let case = json!({
            "keys": { "n": 3, "k": 2 },
            "10": { "base": "10", "value": "5" },
            "2": { "base": "16", "value": "ff" },
            "7": { "base": "8", "value": "17" }
        });
        let set = ShareSet::try_from(&case)?;
        let xs: Vec<BigInt> = set.points.iter().map(|p| p.x.clone()).collect();

        assert_eq!(xs, vec![BigInt::from(10), BigInt::from(2), BigInt::from(7)]);
        assert_eq!(set.points[1].y, BigInt::from(255));
        Ok(())
    }

    #[test]
    fn test_counts_as_strings_and_numeric_base() -> Result<()> {
        let case = json!({
            "keys": { "n": "2", "k": "1" },
            "1": { "base": 36, "value": "Z" },
            "comment": "ignored"
        });
        let set = ShareSet::try_from(&case)?;

        assert_eq!((set.n, set.k), (2, 1));
        assert_eq!(set.points, vec![Point::new(1, 35)]);
        Ok(())
    }

    #[test]
    fn test_missing_keys() {
        let cases = [
            json!({ "1": { "base": "10", "value": "4" } }),
            json!({ "keys": { "k": 1 }, "1": { "base": "10", "value": "4" } }),
            json!({ "keys": { "n": 1 }, "1": { "base": "10", "value": "4" } }),
            json!({ "keys": { "n": -1, "k": 1 } }),
            json!([1, 2, 3]),
        ];
        for case in &cases {
            let err = ShareSet::try_from(case).unwrap_err();
            assert!(
                matches!(err, Error::MalformedTestCase(_)),
                "{case} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_too_few_shares() {
        let case = json!({
            "keys": { "n": 4, "k": 3 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "2", "value": "111" }
        });
        assert_eq!(
            ShareSet::try_from(&case),
            Err(Error::MalformedTestCase(
                "need at least 3 shares, found 2".to_string()
            ))
        );
    }

    #[test]
    fn test_zero_threshold() {
        let case = json!({ "keys": { "n": 1, "k": 0 }, "1": { "base": "10", "value": "4" } });
        assert!(matches!(
            ShareSet::try_from(&case),
            Err(Error::MalformedTestCase(_))
        ));
    }

    #[test]
    fn test_bad_share_entries() {
        let bad_base = json!({ "keys": { "n": 1, "k": 1 }, "1": { "base": "37", "value": "4" } });
        assert_eq!(
            ShareSet::try_from(&bad_base),
            Err(Error::InvalidBase("37".to_string()))
        );

        let huge_base = json!({
            "keys": { "n": 1, "k": 1 },
            "1": { "base": "99999999999999999999", "value": "4" }
        });
        assert_eq!(
            ShareSet::try_from(&huge_base),
            Err(Error::InvalidBase("99999999999999999999".to_string()))
        );

        let word_base = json!({ "keys": { "n": 1, "k": 1 }, "1": { "base": "ten", "value": "4" } });
        assert_eq!(
            ShareSet::try_from(&word_base),
            Err(Error::InvalidBase("ten".to_string()))
        );

        let bad_digit = json!({ "keys": { "n": 1, "k": 1 }, "1": { "base": "2", "value": "102" } });
        assert_eq!(
            ShareSet::try_from(&bad_digit),
            Err(Error::InvalidDigit {
                value: "102".to_string(),
                base: 2
            })
        );

        let no_value = json!({ "keys": { "n": 1, "k": 1 }, "1": { "base": "2" } });
        assert!(matches!(
            ShareSet::try_from(&no_value),
            Err(Error::MalformedTestCase(_))
        ));

        let numeric_value = json!({ "keys": { "n": 1, "k": 1 }, "1": { "base": "10", "value": 4 } });
        assert!(matches!(
            ShareSet::try_from(&numeric_value),
            Err(Error::MalformedTestCase(_))
        ));

        let zero_index = json!({ "keys": { "n": 1, "k": 1 }, "0": { "base": "10", "value": "4" } });
        assert!(matches!(
            ShareSet::try_from(&zero_index),
            Err(Error::MalformedTestCase(_))
        ));
    }

    #[test]
    fn test_signed_or_odd_share_keys_rejected() {
        let keys = ["+1", "-3", " 2", "1.0", "0x2", "99999999999999999999"];
        for key in keys {
            let mut case = json!({
                "keys": { "n": 3, "k": 2 },
                "1": { "base": "10", "value": "4" },
                "2": { "base": "2", "value": "111" }
            });
            case[key] = json!({ "base": "10", "value": "12" });

            let err = ShareSet::try_from(&case).unwrap_err();
            assert!(
                matches!(err, Error::MalformedTestCase(_)),
                "key {key:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_non_share_keys_still_skipped() -> Result<()> {
        let case = json!({
            "keys": { "n": 2, "k": 2 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "2", "value": "111" },
            "-note": "scratch",
            "meta": { "author": "dealer" }
        });
        assert_eq!(ShareSet::try_from(&case)?.points.len(), 2);
        Ok(())
    }

    #[test]
    fn test_duplicate_indices_rejected() {
        let shares = [
            Share::new(1, 10, "4"),
            Share::new(2, 2, "111"),
            Share::new(1, 10, "4"),
        ];
        assert_eq!(
            ShareSet::from_shares(3, 2, &shares),
            Err(Error::MalformedTestCase(
                "duplicate share index 1".to_string()
            ))
        );
    }

    #[test]
    fn test_share_decode() -> Result<()> {
        assert_eq!(Share::new(6, 4, "213").decode()?, Point::new(6, 39));
        assert!(Share::new(6, 1, "0").decode().is_err());
        Ok(())
    }
}
