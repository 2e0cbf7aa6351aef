//! # `problem` – Turning a table into criteria and a basis matrix
//!
//! This is the UTASTAR problem builder: given the raw
//! alternatives table and a per-criterion monotonicity/split configuration,
//! it sorts the table by user rank, builds one [`Interval`]-backed
//! [`Criterion`] per column, and assembles the `M x T` basis matrix `U`.

use ndarray::Array2;

use crate::criterion::{Criterion, CriteriaSet};
use crate::error::UtastarError;
use crate::interval::Interval;

/// One row of the input table: an alternative's name, the user's integer
/// rank (1 = most preferred), and its raw values in criterion-column order.
#[derive(Debug, Clone)]
pub struct AlternativeInput {
    pub name: String,
    pub rank: u32,
    pub values: Vec<f64>,
}

impl AlternativeInput {
    pub fn new(name: impl Into<String>, rank: u32, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            rank,
            values,
        }
    }
}

/// Monotonicity and split count for one criterion column.
///
/// Kept as a `Vec` rather than a name-keyed map because criterion column
/// order is significant: it must match the order of values in every
/// [`AlternativeInput::values`].
#[derive(Debug, Clone)]
pub struct CriterionConfig {
    pub name: String,
    /// `true` ⇒ larger raw value is better, `false` ⇒ smaller is better.
    pub ascending: bool,
    pub splits: usize,
}

impl CriterionConfig {
    pub fn new(name: impl Into<String>, ascending: bool, splits: usize) -> Self {
        Self {
            name: name.into(),
            ascending,
            splits,
        }
    }
}

/// The result of building a problem: the criteria, the table sorted by
/// ascending rank, and the `M x T` basis matrix in the same row order.
pub(crate) struct ProblemData {
    pub criteria: CriteriaSet,
    pub sorted_table: Vec<AlternativeInput>,
    pub basis_matrix: Array2<f64>,
}

pub(crate) fn build_problem(
    table: &[AlternativeInput],
    configs: &[CriterionConfig],
) -> Result<ProblemData, UtastarError> {
    if table.len() < 2 {
        return Err(UtastarError::InvalidConfig(
            "at least two alternatives are required".to_string(),
        ));
    }
    if configs.is_empty() {
        return Err(UtastarError::InvalidConfig(
            "at least one criterion is required".to_string(),
        ));
    }
    for cfg in configs {
        if cfg.splits == 0 {
            return Err(UtastarError::InvalidConfig(format!(
                "criterion '{}' must have a positive number of subintervals",
                cfg.name
            )));
        }
    }
    for row in table {
        if row.values.len() != configs.len() {
            return Err(UtastarError::InvalidConfig(format!(
                "alternative '{}' has {} values, expected {}",
                row.name,
                row.values.len(),
                configs.len()
            )));
        }
    }

    let mut sorted_table = table.to_vec();
    sorted_table.sort_by_key(|row| row.rank);

    let mut criteria = Vec::with_capacity(configs.len());
    for (j, cfg) in configs.iter().enumerate() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in &sorted_table {
            let v = row.values[j];
            if !v.is_finite() || v < 0.0 {
                return Err(UtastarError::InvalidValue(format!(
                    "criterion '{}' value {v} on alternative '{}' must be a non-negative finite number",
                    cfg.name, row.name
                )));
            }
            min = min.min(v);
            max = max.max(v);
        }
        let (left, right) = if cfg.ascending { (min, max) } else { (max, min) };
        let interval = Interval::new(left, right, cfg.splits)?;
        criteria.push(Criterion::new(cfg.name.clone(), interval));
    }
    let criteria = CriteriaSet::new(criteria);

    let t = criteria.total_len();
    let mut basis_matrix = Array2::<f64>::zeros((sorted_table.len(), t));
    for (i, row) in sorted_table.iter().enumerate() {
        let basis_row = criteria.basis_row(&row.values)?;
        basis_matrix.row_mut(i).assign(&basis_row);
    }

    Ok(ProblemData {
        criteria,
        sorted_table,
        basis_matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_table_by_rank_ascending() {
        let table = vec![
            AlternativeInput::new("B", 2, vec![0.0]),
            AlternativeInput::new("A", 1, vec![2.0]),
        ];
        let configs = vec![CriterionConfig::new("c", true, 2)];
        let data = build_problem(&table, &configs).unwrap();
        assert_eq!(data.sorted_table[0].name, "A");
        assert_eq!(data.sorted_table[1].name, "B");
    }

    #[test]
    fn public_transport_breakpoints_match_canonical_case() {
        let table = vec![
            AlternativeInput::new("car", 3, vec![30.0, 40.0, 0.0]),
            AlternativeInput::new("bus", 2, vec![16.0, 25.0, 1.0]),
            AlternativeInput::new("bike", 1, vec![2.0, 10.0, 3.0]),
        ];

        let configs = vec![
            CriterionConfig::new("price", false, 2),
            CriterionConfig::new("duration", false, 3),
            CriterionConfig::new("comfort", true, 3),
        ];
        let data = build_problem(&table, &configs).unwrap();
        let price = data.criteria.get_by_name("price").unwrap();
        let duration = data.criteria.get_by_name("duration").unwrap();
        let comfort = data.criteria.get_by_name("comfort").unwrap();
        assert_eq!(price.interval().breakpoints(), &[30.0, 16.0, 2.0]);
        assert_eq!(duration.interval().breakpoints(), &[40.0, 30.0, 20.0, 10.0]);
        assert_eq!(comfort.interval().breakpoints(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_mismatched_row_width_and_degenerate_sizes() {
        let configs = vec![CriterionConfig::new("c", true, 2)];
        let too_few = vec![AlternativeInput::new("A", 1, vec![1.0])];
        assert!(build_problem(&too_few, &configs).is_err());

        let mismatched = vec![
            AlternativeInput::new("A", 1, vec![1.0, 2.0]),
            AlternativeInput::new("B", 2, vec![1.0]),
        ];
        assert!(build_problem(&mismatched, &configs).is_err());

        assert!(build_problem(&mismatched, &[]).is_err());
    }
}
