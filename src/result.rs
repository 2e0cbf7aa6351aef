//! # `result` – Assembling a usable model from a solved LP
//!
//! Packages a `w`-vector and error-vector into weights, partial utilities,
//! the Utilities-annotated sorted table, and Kendall's τ, and
//! exposes [`UtastarSolution::score`] for scoring alternatives outside the
//! original table.

use std::collections::HashMap;

use ndarray::{Array1, Array2, s};
use ordered_float::OrderedFloat;

use crate::criterion::CriteriaSet;
use crate::error::UtastarError;
use crate::kendall::rank_utility_tau;
use crate::problem::AlternativeInput;

/// One row of the Utilities-annotated, utility-sorted result table.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub name: String,
    pub rank: u32,
    pub values: Vec<f64>,
    pub utility: f64,
}

/// The primary LP solution and the C post-optimality solutions that fed
/// into a degenerate fit's averaged `w`/errors.
#[derive(Debug, Clone)]
pub struct DegeneracyInfo {
    pub first_sol: Box<UtastarSolution>,
    pub sa_sol: Vec<UtastarSolution>,
}

/// A fitted UTASTAR model: weights, marginal values, partial utilities,
/// residual errors, the τ-statistic, and the scored/sorted table.
#[derive(Debug, Clone)]
pub struct UtastarSolution {
    pub criteria: CriteriaSet,
    /// Full length-`T` weight vector, concatenated in criterion order.
    pub w: Array1<f64>,
    /// Per-criterion slice of `w` (the marginal weights `w_ij`).
    pub w_values: HashMap<String, Vec<f64>>,
    /// Per-criterion cumulative sum of `w_values`, i.e. the marginal
    /// utility at each breakpoint.
    pub partial_util: HashMap<String, Vec<f64>>,
    /// Per-criterion total weight (`partial_util[crit]`'s last element).
    pub weights: HashMap<String, f64>,
    /// Length-`2M` vector of `(sigma+, sigma-)` pairs, one pair per
    /// alternative, interleaved.
    pub errors: Array1<f64>,
    /// Kendall's τ between the user ranking and the utility-induced one.
    pub tau: f64,
    /// Alternatives with their fitted Utilities column attached, sorted
    /// descending by utility.
    pub table: Vec<TableRow>,
    /// Present only when the primary LP's optimum was degenerate and
    /// post-optimality averaging ran.
    pub degeneracy: Option<DegeneracyInfo>,
}

impl UtastarSolution {
    /// Scores an alternative not in the original table:
    /// rebuilds its basis row from the stored criteria and takes the dot
    /// product with `w`.
    pub fn score(&self, values: &[f64]) -> Result<f64, UtastarError> {
        let row = self.criteria.basis_row(values)?;
        Ok(row.dot(&self.w))
    }
}

pub(crate) fn assemble(
    criteria: &CriteriaSet,
    sorted_table: &[AlternativeInput],
    basis_matrix: &Array2<f64>,
    w: &Array1<f64>,
    errors: &Array1<f64>,
    degeneracy: Option<DegeneracyInfo>,
) -> UtastarSolution {
    let mut w_values = HashMap::with_capacity(criteria.len());
    let mut partial_util = HashMap::with_capacity(criteria.len());
    let mut weights = HashMap::with_capacity(criteria.len());

    for (criterion, (start, len)) in criteria.iter().zip(criteria.offsets()) {
        let slice = w.slice(s![start..start + len]).to_vec();
        let mut cumulative = 0.0;
        let partial: Vec<f64> = slice
            .iter()
            .map(|&wv| {
                cumulative += wv;
                cumulative
            })
            .collect();
        weights.insert(criterion.name().to_string(), cumulative);
        partial_util.insert(criterion.name().to_string(), partial);
        w_values.insert(criterion.name().to_string(), slice);
    }

    let utilities: Vec<f64> = basis_matrix.outer_iter().map(|row| row.dot(w)).collect();
    let ranks: Vec<u32> = sorted_table.iter().map(|row| row.rank).collect();
    let tau = rank_utility_tau(&ranks, &utilities);

    let mut table: Vec<TableRow> = sorted_table
        .iter()
        .zip(utilities.iter())
        .map(|(row, &utility)| TableRow {
            name: row.name.clone(),
            rank: row.rank,
            values: row.values.clone(),
            utility,
        })
        .collect();
    table.sort_by_key(|row| std::cmp::Reverse(OrderedFloat(row.utility)));

    UtastarSolution {
        criteria: criteria.clone(),
        w: w.clone(),
        w_values,
        partial_util,
        weights,
        errors: errors.clone(),
        tau,
        table,
        degeneracy,
    }
}
