//! Cross-validation of a share set against its reconstructed polynomial.
//!
//! Every supplied point, basis points included, is run back through the
//! polynomial defined by the basis and compared with its recorded value.
//! Disagreement is data, not an error: the report says which shares do not
//! fit and leaves the verdict to the caller.

use num_rational::BigRational;
use num_traits::Signed;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::sss::{LagrangeBasis, Point};
use crate::util::rational_str;

/// How one point compares with the reconstructed polynomial.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCheck {
    pub point: Point,
    #[serde(serialize_with = "rational_str")]
    pub predicted_y: BigRational,
    #[serde(serialize_with = "rational_str")]
    pub absolute_difference: BigRational,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// One entry per validated point, in the order they were supplied.
    pub per_point_results: Vec<PointCheck>,
    pub all_valid: bool,
    pub tolerance: f64,
}

impl ValidationReport {
    /// Points whose recorded value the polynomial does not reproduce.
    pub fn mismatches(&self) -> impl Iterator<Item = &PointCheck> {
        self.per_point_results.iter().filter(|c| !c.within_tolerance)
    }
}

/// Checks every point in `all_points` against the polynomial through
/// `basis_points`.
///
/// A point passes when `|P(x) − y| <= tolerance`. The comparison is exact:
/// `tolerance` is converted to the rational it represents, so with the
/// default epsilon only shares that lie exactly on the polynomial pass.
/// An infinite tolerance accepts everything.
///
/// # Errors
///
/// * `InvalidTolerance` if `tolerance` is negative or NaN.
/// * `InsufficientPoints` if `basis_points` is empty.
/// * `DuplicateAbscissa` if two basis points share an `x`.
pub fn validate(
    all_points: &[Point],
    basis_points: &[Point],
    tolerance: f64,
) -> Result<ValidationReport> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(Error::InvalidTolerance(tolerance));
    }
    // None only for +inf at this point
    let bound = BigRational::from_float(tolerance);

    let basis = LagrangeBasis::new(basis_points)?;

    let per_point_results: Vec<PointCheck> = all_points
        .iter()
        .map(|point| {
            let predicted_y = basis.evaluate(&point.x);
            let absolute_difference =
                (&predicted_y - BigRational::from_integer(point.y.clone())).abs();
            let within_tolerance = bound
                .as_ref()
                .map_or(true, |bound| &absolute_difference <= bound);

            PointCheck {
                point: point.clone(),
                predicted_y,
                absolute_difference,
                within_tolerance,
            }
        })
        .collect();

    Ok(ValidationReport {
        all_valid: per_point_results.iter().all(|c| c.within_tolerance),
        per_point_results,
        tolerance,
    })
}
