use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::util::bigint_str;

/// A decoded share: `x` is the share index, `y` the decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    #[serde(serialize_with = "bigint_str")]
    pub x: BigInt,
    #[serde(serialize_with = "bigint_str")]
    pub y: BigInt,
}

impl Point {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// The Lagrange form of the unique polynomial of degree `len - 1` through a
/// set of points with distinct abscissae.
///
/// Each basis weight's denominator `Π_{j≠i} (x_i − x_j)` depends only on the
/// points, so it is computed once here and reused for every evaluation. The
/// reconstructor and the cross-validator both evaluate through this type,
/// which guarantees they are looking at the same polynomial.
#[derive(Debug, Clone, PartialEq)]
pub struct LagrangeBasis {
    points: Vec<Point>,
    denominators: Vec<BigInt>,
}

impl LagrangeBasis {
    /// Builds the basis for `points`.
    ///
    /// # Errors
    ///
    /// * `InsufficientPoints` if `points` is empty.
    /// * `DuplicateAbscissa` if two points share an `x`; interpolation through
    ///   them is undefined.
    pub fn new(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientPoints {
                required: 1,
                available: 0,
            });
        }

        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                if a.x == b.x {
                    return Err(Error::DuplicateAbscissa {
                        x: a.x.clone(),
                        first: i,
                        second: j,
                    });
                }
            }
        }

        let denominators = points
            .iter()
            .enumerate()
            .map(|(i, a)| {
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| i != j)
                    .fold(BigInt::from(1), |acc, (_, b)| acc * (&a.x - &b.x))
            })
            .collect();

        Ok(LagrangeBasis {
            points: points.to_vec(),
            denominators,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// Evaluates the polynomial at `x` exactly:
    ///
    /// ```text
    /// P(x) = Σ y_i · Π_{j≠i} (x − x_j) / (x_i − x_j)
    /// ```
    ///
    /// Every term is reduced by its GCD as it is added, so the result is the
    /// canonical fraction.
    pub fn evaluate(&self, x: &BigInt) -> BigRational {
        let mut value = BigRational::zero();

        for (i, (a, denominator)) in self.points.iter().zip(&self.denominators).enumerate() {
            let numerator = self
                .points
                .iter()
                .enumerate()
                .filter(|&(j, _)| i != j)
                .fold(a.y.clone(), |acc, (_, b)| acc * (x - &b.x));

            if numerator.is_zero() {
                continue;
            }
            value += BigRational::new(numerator, denominator.clone());
        }

        value
    }
}

/// Outcome of a successful reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionResult {
    /// `P(0)`, the constant term of the interpolating polynomial.
    pub secret: BigInt,
    /// The `k` points the polynomial was interpolated through.
    pub basis_points: Vec<Point>,
    /// `k - 1`.
    pub degree: usize,
}

/// Evaluates the polynomial through `points` at `x`.
///
/// # Examples
///
/// ```rust
/// use polysecret::sss::{interpolate, Point};
/// use num_bigint::BigInt;
/// use num_rational::BigRational;
///
/// // the line through (1, 2) and (3, 6) is y = 2x
/// let points = [Point::new(1, 2), Point::new(3, 6)];
/// let y = interpolate(&points, &BigInt::from(10)).unwrap();
/// assert_eq!(y, BigRational::from_integer(BigInt::from(20)));
/// ```
pub fn interpolate(points: &[Point], x: &BigInt) -> Result<BigRational> {
    Ok(LagrangeBasis::new(points)?.evaluate(x))
}

/// Recovers the secret from the first `k` of `points`.
///
/// The basis is always the first `k` points in the order given; the remaining
/// points play no part here and are checked afterwards by
/// [`crate::validate::validate`].
///
/// # Errors
///
/// * `InsufficientPoints` unless `points.len() >= k >= 1`.
/// * `DuplicateAbscissa` if two basis points share an `x`.
/// * `ReconstructionInconsistency` if `P(0)` is not an integer. The fraction is
///   reported rather than rounded.
///
/// # Examples
///
/// ```rust
/// use polysecret::sss::{reconstruct, Point};
/// use num_bigint::BigInt;
///
/// // f(x) = x^2 + 3
/// let points = vec![Point::new(1, 4), Point::new(2, 7), Point::new(3, 12), Point::new(6, 39)];
/// let result = reconstruct(&points, 3).unwrap();
/// assert_eq!(result.secret, BigInt::from(3));
/// assert_eq!(result.degree, 2);
/// ```
pub fn reconstruct(points: &[Point], k: usize) -> Result<ReconstructionResult> {
    if k == 0 || points.len() < k {
        return Err(Error::InsufficientPoints {
            required: k,
            available: points.len(),
        });
    }

    let basis = LagrangeBasis::new(&points[..k])?;
    let at_zero = basis.evaluate(&BigInt::zero());
    if !at_zero.is_integer() {
        return Err(Error::ReconstructionInconsistency(at_zero));
    }

    Ok(ReconstructionResult {
        secret: at_zero.to_integer(),
        degree: basis.degree(),
        basis_points: basis.points,
    })
}
