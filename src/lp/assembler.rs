//! # `lp::assembler` – Building the fitting LP's matrices
//!
//! Turns the basis matrix `U` and the user ranking into the difference
//! matrix `D`, the error-coupling matrix `E`, and the
//! `(A_ub, b_ub, A_eq, b_eq)` shared by the primary LP and every
//! post-optimality LP.

use ndarray::{Array1, Array2, Axis};

/// `A_ub`/`b_ub`/`A_eq`/`b_eq` common to the primary LP and every
/// per-criterion post-optimality LP: the successive-rank preference rows
/// plus `sum(w) = 1`. Post-optimality appends one more `A_ub` row on top of
/// this (the epsilon-neighbourhood constraint).
pub(crate) struct BaseConstraints {
    pub a_ub: Array2<f64>,
    pub b_ub: Array1<f64>,
    pub a_eq: Array2<f64>,
    pub b_eq: Array1<f64>,
}

/// `D`, shape `(M-1) x T`: row `i` is `U_i - U_{i+1}`.
pub(crate) fn difference_matrix(basis: &Array2<f64>) -> Array2<f64> {
    let m = basis.nrows();
    let t = basis.ncols();
    let mut d = Array2::zeros((m - 1, t));
    for i in 0..m - 1 {
        let diff = &basis.row(i) - &basis.row(i + 1);
        d.row_mut(i).assign(&diff);
    }
    d
}

/// `E`, shape `(M-1) x 2M`: row `i` carries `+1,-1,-1,+1` in columns
/// `(2i, 2i+1, 2i+2, 2i+3)`, the signed-error coupling between alternatives
/// `i` and `i+1`.
pub(crate) fn error_matrix(m: usize) -> Array2<f64> {
    let mut e = Array2::zeros((m - 1, 2 * m));
    for i in 0..m - 1 {
        e[[i, 2 * i]] = 1.0;
        e[[i, 2 * i + 1]] = -1.0;
        e[[i, 2 * i + 2]] = -1.0;
        e[[i, 2 * i + 3]] = 1.0;
    }
    e
}

fn stack_rows(rows: Vec<Array1<f64>>, ncols: usize) -> Array2<f64> {
    if rows.is_empty() {
        return Array2::zeros((0, ncols));
    }
    let views: Vec<_> = rows.iter().map(|r| r.view().insert_axis(Axis(0))).collect();
    ndarray::concatenate(Axis(0), &views).expect("rows share width")
}

/// Builds the shared constraint set from `D`, `E` and the
/// ranks of the successively-compared alternatives. Ranks must be in the
/// same (ascending) order as the rows of `D`/`E`.
///
/// Strict-preference rows come in as `(D_i|E_i) x >= delta`; since the
/// solver contract only accepts `<=`, they are negated on the way in
/// (`-(D_i|E_i) x <= -delta`) rather than via a later batch negation, so
/// every row this function returns is already in its final, correct sign.
pub(crate) fn base_constraints(
    d: &Array2<f64>,
    e: &Array2<f64>,
    ranks: &[u32],
    delta: f64,
    t: usize,
    m: usize,
) -> BaseConstraints {
    let width = t + 2 * m;
    let combined = ndarray::concatenate(Axis(1), &[d.view(), e.view()]).expect("matching rows");

    let mut ub_rows = Vec::new();
    let mut ub_rhs = Vec::new();
    let mut eq_rows = Vec::new();
    let mut eq_rhs = Vec::new();

    for i in 0..m - 1 {
        let row = combined.row(i).to_owned();
        if ranks[i] < ranks[i + 1] {
            ub_rows.push(-row);
            ub_rhs.push(-delta);
        } else {
            eq_rows.push(row);
            eq_rhs.push(0.0);
        }
    }

    let mut sum_w = Array1::<f64>::zeros(width);
    sum_w.slice_mut(ndarray::s![0..t]).fill(1.0);
    eq_rows.push(sum_w);
    eq_rhs.push(1.0);

    BaseConstraints {
        a_ub: stack_rows(ub_rows, width),
        b_ub: Array1::from(ub_rhs),
        a_eq: stack_rows(eq_rows, width),
        b_eq: Array1::from(eq_rhs),
    }
}

/// Objective for the primary LP: zero on the w-part, one on the
/// error part — minimize the sum of all signed fitting errors.
pub(crate) fn primary_objective(t: usize, m: usize) -> Array1<f64> {
    let mut c = Array1::<f64>::zeros(t + 2 * m);
    c.slice_mut(ndarray::s![t..t + 2 * m]).fill(1.0);
    c
}
