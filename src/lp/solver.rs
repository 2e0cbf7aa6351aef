//! The pluggable LP solver contract.

use ndarray::{Array1, Array2};

/// What a solver reports back: `minimize c·x subject to A_ub x <= b_ub,
/// A_eq x = b_eq, x >= 0`.
#[derive(Debug, Clone)]
pub struct LpOutcome {
    pub success: bool,
    pub x: Array1<f64>,
    pub fun: f64,
    pub message: String,
}

/// Any solver satisfying this contract is acceptable (revised simplex,
/// interior-point, ...); the core does not depend on solver-internal types
/// beyond this shape.
pub trait LpSolver {
    #[allow(clippy::too_many_arguments)]
    fn solve(
        &self,
        c: &Array1<f64>,
        a_ub: &Array2<f64>,
        b_ub: &Array1<f64>,
        a_eq: &Array2<f64>,
        b_eq: &Array1<f64>,
    ) -> LpOutcome;
}
