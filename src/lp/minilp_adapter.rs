//! The one built-in [`LpSolver`] adapter, over the pure-Rust `minilp` crate.

use minilp::{ComparisonOp, OptimizationDirection, Problem};
use ndarray::{Array1, Array2};
use tracing::warn;

use super::solver::{LpOutcome, LpSolver};

/// Wraps `minilp`'s simplex solver behind the crate's solver contract.
///
/// `minilp` builds problems column-at-a-time (`add_var` then
/// `add_constraint`), unlike the dense `(A_ub, b_ub, A_eq, b_eq)` matrices
/// this crate assembles, so this adapter's job is purely translation: one
/// variable per column of `c`, bounded `[0, inf)`, one
/// constraint per row of `A_ub`/`A_eq`. Zero coefficients are skipped since
/// the basis matrices this crate builds are typically sparse.
#[derive(Debug, Clone, Default)]
pub struct MinilpSolver;

impl MinilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MinilpSolver {
    fn solve(
        &self,
        c: &Array1<f64>,
        a_ub: &Array2<f64>,
        b_ub: &Array1<f64>,
        a_eq: &Array2<f64>,
        b_eq: &Array1<f64>,
    ) -> LpOutcome {
        let n = c.len();
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<_> = c
            .iter()
            .map(|&coeff| problem.add_var(coeff, (0.0, f64::INFINITY)))
            .collect();

        for (row, &rhs) in a_ub.outer_iter().zip(b_ub.iter()) {
            let terms: Vec<_> = vars
                .iter()
                .copied()
                .zip(row.iter().copied())
                .filter(|&(_, coeff)| coeff != 0.0)
                .collect();
            problem.add_constraint(terms, ComparisonOp::Le, rhs);
        }
        for (row, &rhs) in a_eq.outer_iter().zip(b_eq.iter()) {
            let terms: Vec<_> = vars
                .iter()
                .copied()
                .zip(row.iter().copied())
                .filter(|&(_, coeff)| coeff != 0.0)
                .collect();
            problem.add_constraint(terms, ComparisonOp::Eq, rhs);
        }

        match problem.solve() {
            Ok(solution) => {
                let x = Array1::from_iter(vars.iter().map(|&v| solution[v]));
                LpOutcome {
                    success: true,
                    x,
                    fun: solution.objective(),
                    message: "optimal".to_string(),
                }
            }
            Err(err) => {
                warn!(%err, "linear program solve failed");
                LpOutcome {
                    success: false,
                    x: Array1::zeros(n),
                    fun: f64::NAN,
                    message: err.to_string(),
                }
            }
        }
    }
}
