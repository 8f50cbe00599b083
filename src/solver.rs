//! The solve boundary: input record in, output record out.
//!
//! [`solve_share_set`] runs the typed pipeline and propagates errors with `?`.
//! [`solve`] and [`solve_batch`] sit on top of it and never fail: every error
//! is folded into a `success: false` record, and a bad entry in a batch does
//! not disturb its siblings.

use num_bigint::BigInt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::DEFAULT_TOLERANCE;
use crate::error::{Error, ErrorKind, Result};
use crate::share::ShareSet;
use crate::sss::{reconstruct, Point, ReconstructionResult};
use crate::util::opt_bigint_str;
use crate::validate::{validate, ValidationReport};

/// Per-call parameters of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Largest `|P(x) − y|` a share may show and still count as consistent.
    pub tolerance: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Everything a successful solve produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub share_set: ShareSet,
    pub reconstruction: ReconstructionResult,
    pub validation: ValidationReport,
}

/// Reconstructs the secret of `share_set` and cross-validates every share.
///
/// Shares that do not fit the polynomial do not make this fail; they show up
/// in [`Solution::validation`].
pub fn solve_share_set(share_set: ShareSet, options: &SolveOptions) -> Result<Solution> {
    let reconstruction = reconstruct(&share_set.points, share_set.k)?;
    let validation = validate(
        &share_set.points,
        &reconstruction.basis_points,
        options.tolerance,
    )?;

    for check in validation.mismatches() {
        warn!(
            "share at x = {} is off the polynomial: recorded {}, predicted {}",
            check.point.x, check.point.y, check.predicted_y
        );
    }

    Ok(Solution {
        share_set,
        reconstruction,
        validation,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Parameters {
    pub n: usize,
    pub k: usize,
    pub degree: usize,
}

/// The output record of one solve.
///
/// On success every field but `error`/`errorKind` is set; on failure only
/// those two are.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveOutput {
    pub success: bool,
    #[serde(serialize_with = "opt_bigint_str")]
    pub secret: Option<BigInt>,
    pub points: Option<Vec<Point>>,
    pub parameters: Option<Parameters>,
    pub validation: Option<ValidationReport>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl From<Solution> for SolveOutput {
    fn from(solution: Solution) -> Self {
        let Solution {
            share_set,
            reconstruction,
            validation,
        } = solution;

        SolveOutput {
            success: true,
            secret: Some(reconstruction.secret),
            parameters: Some(Parameters {
                n: share_set.n,
                k: share_set.k,
                degree: reconstruction.degree,
            }),
            points: Some(share_set.points),
            validation: Some(validation),
            error: None,
            error_kind: None,
        }
    }
}

impl From<&Error> for SolveOutput {
    fn from(err: &Error) -> Self {
        SolveOutput {
            success: false,
            secret: None,
            points: None,
            parameters: None,
            validation: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }
}

impl From<Result<Solution>> for SolveOutput {
    fn from(result: Result<Solution>) -> Self {
        match result {
            Ok(solution) => solution.into(),
            Err(err) => (&err).into(),
        }
    }
}

/// Solves one input record.
///
/// # Examples
///
/// ```rust
/// use polysecret::solver::{solve, SolveOptions};
/// use num_bigint::BigInt;
/// use serde_json::json;
///
/// let case = json!({
///     "keys": { "n": 4, "k": 3 },
///     "1": { "base": "10", "value": "4" },
///     "2": { "base": "2", "value": "111" },
///     "3": { "base": "10", "value": "12" },
///     "6": { "base": "4", "value": "213" }
/// });
/// let output = solve(&case, &SolveOptions::default());
/// assert!(output.success);
/// assert_eq!(output.secret, Some(BigInt::from(3)));
/// ```
pub fn solve(input: &Value, options: &SolveOptions) -> SolveOutput {
    let result = ShareSet::try_from(input).and_then(|set| solve_share_set(set, options));
    if let Err(err) = &result {
        debug!("solve failed: {}", err);
    }
    result.into()
}

/// One record of a batch, tagged with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    #[serde(flatten)]
    pub output: SolveOutput,
}

/// Solves every record in `inputs`, in order. Failures stay in their own
/// entry.
pub fn solve_batch(inputs: &[Value], options: &SolveOptions) -> Vec<BatchEntry> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let output = solve(input, options);
            if let Some(err) = &output.error {
                warn!("test case {} failed: {}", index, err);
            }
            BatchEntry { index, output }
        })
        .collect()
}
