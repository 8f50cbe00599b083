//! # Threshold Secret Recovery over Exact Arithmetic
//!
//! This library recovers the secret behind a `(k, n)` threshold sharing
//! scheme from its shares, and checks every share it was given against the
//! recovered polynomial.
//!
//! ## The Mathematics
//!
//! A dealer picks a polynomial of degree `k-1` whose constant term is the
//! secret:
//!
//! ```ignore
//! f(x) = a0 + a1*x + a2*x^2 + ... + a(k-1)*x^(k-1)
//! ```
//!
//! and hands out the points `(i, f(i))`. Any `k` of them pin down `f`
//! uniquely, and Lagrange interpolation at `x = 0` gives back `a0`:
//!
//! ```ignore
//! f(0) = Σ y_i · Π_{j≠i} (0 − x_j) / (x_i − x_j)
//! ```
//!
//! The shares here live in the plain integers, not in a finite field, so the
//! basis weights are fractions. Every step is carried out over
//! arbitrary-precision rationals; a secret that does not come out as an
//! integer is reported as an inconsistency instead of being rounded.
//!
//! ## Shares
//!
//! Each share value is written in its own radix between 2 and 36, and is
//! decoded exactly no matter how many digits it has.
//!
//! ## Usage
//!
//! ```rust
//! use polysecret::solver::{solve, SolveOptions};
//! use serde_json::json;
//!
//! let case = json!({
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" },
//!     "3": { "base": "10", "value": "12" },
//!     "6": { "base": "4", "value": "213" }
//! });
//!
//! let output = solve(&case, &SolveOptions::default());
//! assert!(output.success);
//! assert_eq!(output.secret.unwrap().to_string(), "3");
//! assert!(output.validation.unwrap().all_valid);
//! ```
//!
//! ## Known limitation
//!
//! The first `k` shares in input order always form the interpolation basis.
//! If one of them is corrupted the secret is wrong, and the validation
//! report flags the other shares as mismatches; no attempt is made to find a
//! consistent subset.
//!
//! ## Modules
//!
//! - `decode`: base-N decoding of share values.
//! - `sss`: Lagrange interpolation and secret reconstruction.
//! - `validate`: cross-validation of shares against the polynomial.
//! - `share`: share records and share-set parsing.
//! - `solver`: the solve and batch-solve entry points.
//! - `config`: configuration for the command-line solver.

/// Constants shared across the crate.
pub mod constants;

/// The `config` module loads solver settings from defaults, a `conf.toml`
/// file and the environment.
pub mod config;

/// The `decode` module turns a digit string in any base from 2 to 36 into an
/// exact integer.
pub mod decode;

/// The `error` module defines the error taxonomy of a solve and the
/// `ErrorKind` tags callers can branch on.
pub mod error;

/// The `share` module defines shares as they arrive and parses an input
/// record into a decoded `ShareSet`.
pub mod share;

/// The `solver` module is the boundary of the crate: it runs the whole
/// pipeline and turns every outcome, including errors, into an output record.
pub mod solver;

/// The `sss` module holds the interpolation core: points, the Lagrange
/// basis, and reconstruction of the secret at `x = 0`.
pub mod sss;

/// The `validate` module re-evaluates the reconstructed polynomial at every
/// share and reports which ones agree.
pub mod validate;

mod util;
