//! # `criterion` – Named intervals and their basis coefficients
//!
//! A [`Criterion`] pairs a name with an [`Interval`] and knows how to turn a
//! raw alternative value into the row of piecewise-linear basis coefficients
//! (the β-vector) that the fitting LP is built from.
//! [`CriteriaSet`] is the ordered collection of criteria that make up a
//! problem, and is where per-criterion indicator vectors (used by the
//! post-optimality objective) come from.

use ndarray::{Array1, s};

use crate::error::UtastarError;
use crate::interval::Interval;

/// Name + domain of one evaluation axis.
#[derive(Debug, Clone)]
pub struct Criterion {
    name: String,
    interval: Interval,
}

impl Criterion {
    pub fn new(name: impl Into<String>, interval: Interval) -> Self {
        Self {
            name: name.into(),
            interval,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Number of subintervals, i.e. the width of this criterion's slice of
    /// the basis vector.
    pub fn len(&self) -> usize {
        self.interval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interval.is_empty()
    }

    /// Computes the β-vector for a raw value.
    ///
    /// Tie-break rule: a value exactly on a subinterval's `right` edge is
    /// treated as belonging to that subinterval (β[k]=1, later entries 0),
    /// never as the `left` edge of the next one, so the result is identical
    /// whichever way a breakpoint value is reached.
    pub fn basis(&self, value: f64) -> Result<Array1<f64>, UtastarError> {
        if !value.is_finite() {
            return Err(UtastarError::InvalidValue(format!(
                "value for criterion '{}' must be a finite number, got {value}",
                self.name
            )));
        }
        if value < 0.0 {
            return Err(UtastarError::InvalidValue(format!(
                "value for criterion '{}' must be non-negative, got {value}",
                self.name
            )));
        }

        let n = self.interval.len();
        let mut beta = vec![0.0; n];

        for (index, sub) in self.interval.iter().enumerate() {
            if index == 0 && (value - sub.left()).abs() <= 1e-9 {
                // Value sits on the worst endpoint of the whole interval.
                return Ok(Array1::from(beta));
            }
            if sub.isedge(value) {
                beta.iter_mut().take(index + 1).for_each(|w| *w = 1.0);
                return Ok(Array1::from(beta));
            }
            if sub.contains(value) {
                beta.iter_mut().take(index).for_each(|w| *w = 1.0);
                beta[index] = (value - sub.left()) / (sub.right() - sub.left());
                return Ok(Array1::from(beta));
            }
        }

        Err(UtastarError::InvalidValue(format!(
            "value {value} for criterion '{}' lies outside its interval [{}, {}]",
            self.name,
            self.interval.left(),
            self.interval.right()
        )))
    }
}

/// Ordered collection of [`Criterion`]s; total basis length `T = sum(Nj)`.
#[derive(Debug, Clone)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.criteria.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Criterion> {
        self.criteria.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name() == name)
    }

    /// `T`, the concatenated length of every criterion's basis slice.
    pub fn total_len(&self) -> usize {
        self.criteria.iter().map(Criterion::len).sum()
    }

    /// `(start, len)` of each criterion's slice within a length-`T` vector,
    /// in criterion order.
    pub fn offsets(&self) -> Vec<(usize, usize)> {
        let mut offset = 0;
        self.criteria
            .iter()
            .map(|c| {
                let start = offset;
                offset += c.len();
                (start, c.len())
            })
            .collect()
    }

    /// Concatenates per-criterion β-vectors into one alternative basis row
    /// into one alternative basis row.
    pub fn basis_row(&self, values: &[f64]) -> Result<Array1<f64>, UtastarError> {
        if values.len() != self.criteria.len() {
            return Err(UtastarError::InvalidConfig(format!(
                "expected {} criterion values, got {}",
                self.criteria.len(),
                values.len()
            )));
        }
        let mut row = Vec::with_capacity(self.total_len());
        for (criterion, &value) in self.criteria.iter().zip(values) {
            row.extend(criterion.basis(value)?.into_iter());
        }
        Ok(Array1::from(row))
    }

    /// Indicator-coefficient vector for criterion `index`: ones across that
    /// criterion's slice, zeros elsewhere. Used as the base of the
    /// post-optimality objective.
    pub fn indicator(&self, index: usize) -> Array1<f64> {
        let mut out = Array1::<f64>::zeros(self.total_len());
        if let Some((start, len)) = self.offsets().get(index).copied() {
            out.slice_mut(s![start..start + len]).fill(1.0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn ascending_criterion(name: &str, min: f64, max: f64, splits: usize) -> Criterion {
        Criterion::new(name, Interval::new(min, max, splits).unwrap())
    }

    #[test]
    fn worst_endpoint_is_all_zero_best_endpoint_is_all_one() {
        let c = ascending_criterion("c", 0.0, 2.0, 2);
        assert_eq!(c.basis(0.0).unwrap().to_vec(), vec![0.0, 0.0]);
        assert_eq!(c.basis(2.0).unwrap().to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn interior_value_is_partially_fractional() {
        let c = ascending_criterion("c", 0.0, 2.0, 2);
        // subintervals: [0,1], [1,2]; value 0.5 is halfway through the first.
        let beta = c.basis(0.5).unwrap();
        assert_eq!(beta.to_vec(), vec![0.5, 0.0]);
    }

    #[test]
    fn breakpoint_tie_break_matches_right_edge_not_left_edge_of_next() {
        let c = ascending_criterion("c", 0.0, 3.0, 3);
        // value 1.0 is the right edge of subinterval 0 *and* the left edge
        // of subinterval 1; it must read as [1,0,0], not [1,1,0] or partial.
        assert_eq!(c.basis(1.0).unwrap().to_vec(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn descending_criterion_worst_is_max_best_is_min() {
        // price: descending, left=max=30 (worst), right=min=2 (best)
        let price = Criterion::new("price", Interval::new(30.0, 2.0, 2).unwrap());
        assert_eq!(price.basis(30.0).unwrap().to_vec(), vec![0.0, 0.0]);
        assert_eq!(price.basis(2.0).unwrap().to_vec(), vec![1.0, 1.0]);
        assert_eq!(price.basis(16.0).unwrap().to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let c = ascending_criterion("c", 0.0, 2.0, 2);
        assert!(c.basis(-1.0).is_err());
        assert!(c.basis(f64::NAN).is_err());
        assert!(c.basis(f64::INFINITY).is_err());
    }

    #[test]
    fn criteria_set_indicator_isolates_one_criterion() {
        let set = CriteriaSet::new(vec![
            ascending_criterion("a", 0.0, 1.0, 2),
            ascending_criterion("b", 0.0, 1.0, 3),
        ]);
        assert_eq!(set.total_len(), 5);
        assert_eq!(set.indicator(0).to_vec(), vec![1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(set.indicator(1).to_vec(), vec![0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn basis_row_concatenates_in_criterion_order() {
        let set = CriteriaSet::new(vec![
            ascending_criterion("a", 0.0, 2.0, 2),
            ascending_criterion("b", 0.0, 2.0, 2),
        ]);
        let row = set.basis_row(&[2.0, 0.0]).unwrap();
        assert_eq!(row.to_vec(), vec![1.0, 1.0, 0.0, 0.0]);
    }
}
