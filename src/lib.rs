//! # `utastar` – Ordinal regression via UTASTAR
//!
//! Fits an additive, piecewise-linear utility model to a user-supplied
//! ranking of alternatives across several criteria, using the UTASTAR
//! method: build a basis matrix from per-criterion breakpoints, assemble a
//! linear program enforcing the user's preference order up to a tolerance,
//! minimize total ranking error, and (when the optimum is degenerate)
//! average a family of post-optimality solutions.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`interval`] | [`Interval`]/[`Subinterval`]: a criterion's domain cut into pieces |
//! | [`criterion`] | [`Criterion`]/[`CriteriaSet`]: basis-coefficient rows from raw values |
//! | [`problem`] | [`AlternativeInput`]/[`CriterionConfig`]: turning a raw table into a [`criterion::CriteriaSet`] + basis matrix |
//! | [`lp`] | the pluggable [`lp::LpSolver`] contract, its `minilp` adapter, and LP assembly |
//! | `postopt` | resolving a degenerate primary optimum via per-criterion secondary LPs |
//! | [`result`] | [`UtastarSolution`]/[`TableRow`]/[`DegeneracyInfo`]: the fitted model |
//! | [`solve`] | [`UtastarProblem`]/[`UtastarProblemBuilder`] and the top-level [`solve`](solve::solve) entry point |
//! | [`error`] | [`UtastarError`], the crate-wide error type |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use utastar::{solve, AlternativeInput, CriterionConfig};
//!
//! let table = vec![
//!     AlternativeInput::new("car", 3, vec![30.0, 40.0, 0.0]),
//!     AlternativeInput::new("bus", 2, vec![16.0, 25.0, 1.0]),
//!     AlternativeInput::new("bike", 1, vec![2.0, 10.0, 3.0]),
//! ];
//! let criteria = vec![
//!     CriterionConfig::new("price", false, 2),
//!     CriterionConfig::new("duration", false, 3),
//!     CriterionConfig::new("comfort", true, 3),
//! ];
//!
//! let solution = solve(table, criteria)?;
//! assert_eq!(solution.table[0].name, "bike");
//! # Ok::<(), utastar::UtastarError>(())
//! ```

pub mod criterion;
pub mod error;
pub mod interval;
pub mod lp;
pub mod problem;
pub mod result;
pub mod solve;

mod kendall;
mod postopt;

pub use criterion::{Criterion, CriteriaSet};
pub use error::UtastarError;
pub use interval::{Direction, Interval, Subinterval};
pub use lp::{LpOutcome, LpSolver, MinilpSolver};
pub use problem::{AlternativeInput, CriterionConfig};
pub use result::{DegeneracyInfo, TableRow, UtastarSolution};
pub use solve::{solve, UtastarProblem, UtastarProblemBuilder, UtastarProblemBuilderError};
