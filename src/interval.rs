//! # `interval` – A criterion's domain, cut into pieces
//!
//! [`Subinterval`] and [`Interval`] model the piecewise-linear basis a
//! criterion's marginal utility is built from. They are
//! independent value types: an `Interval` *has* a sequence of
//! `Subinterval`s, it is not a specialized one.

use crate::error::UtastarError;

/// Breakpoints are produced by evenly dividing a range that need not divide
/// exactly (e.g. 3 subintervals over a range of 10), so edge comparisons use
/// an absolute tolerance rather than exact equality.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Which way "better" points, after the endpoints have been oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A closed numeric segment with a direction.
///
/// Invariant: `left != right` (within tolerance). `contains`/`isedge` are
/// oriented by `direction`, so membership tests read the same regardless of
/// whether `left < right` or the reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subinterval {
    left: f64,
    right: f64,
    direction: Direction,
    tolerance: f64,
}

impl Subinterval {
    pub fn new(left: f64, right: f64) -> Result<Self, UtastarError> {
        Self::with_tolerance(left, right, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(left: f64, right: f64, tolerance: f64) -> Result<Self, UtastarError> {
        if (left - right).abs() <= tolerance {
            return Err(UtastarError::InvalidConfig(format!(
                "subinterval edges cannot be equal (left={left}, right={right})"
            )));
        }
        let direction = if right > left {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        Ok(Self {
            left,
            right,
            direction,
            tolerance,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Inclusive membership test, oriented by `direction`.
    pub fn contains(&self, value: f64) -> bool {
        match self.direction {
            Direction::Ascending => {
                value >= self.left - self.tolerance && value <= self.right + self.tolerance
            }
            Direction::Descending => {
                value <= self.left + self.tolerance && value >= self.right - self.tolerance
            }
        }
    }

    /// True iff `value` equals either endpoint, within tolerance.
    pub fn isedge(&self, value: f64) -> bool {
        (value - self.left).abs() <= self.tolerance || (value - self.right).abs() <= self.tolerance
    }
}

/// A criterion's full domain, split into `N` adjacent [`Subinterval`]s.
///
/// Invariants: `N >= 1`; consecutive subintervals share an endpoint; every
/// subinterval shares the interval's overall direction.
#[derive(Debug, Clone)]
pub struct Interval {
    left: f64,
    right: f64,
    direction: Direction,
    breakpoints: Vec<f64>,
    subintervals: Vec<Subinterval>,
}

impl Interval {
    pub fn new(left: f64, right: f64, num_subintervals: usize) -> Result<Self, UtastarError> {
        Self::with_tolerance(left, right, num_subintervals, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(
        left: f64,
        right: f64,
        num_subintervals: usize,
        tolerance: f64,
    ) -> Result<Self, UtastarError> {
        if num_subintervals == 0 {
            return Err(UtastarError::InvalidConfig(
                "number of subintervals must be positive".to_string(),
            ));
        }
        if (left - right).abs() <= tolerance {
            return Err(UtastarError::InvalidConfig(format!(
                "interval edges cannot be equal (left={left}, right={right})"
            )));
        }

        let n = num_subintervals;
        let step = (right - left) / n as f64;
        let breakpoints: Vec<f64> = (0..=n).map(|i| left + step * i as f64).collect();

        let direction = if right > left {
            Direction::Ascending
        } else {
            Direction::Descending
        };

        let subintervals = breakpoints
            .windows(2)
            .map(|w| Subinterval::with_tolerance(w[0], w[1], tolerance))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            left,
            right,
            direction,
            breakpoints,
            subintervals,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.subintervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subintervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subinterval> {
        self.subintervals.iter()
    }
}

impl<'a> IntoIterator for &'a Interval {
    type Item = &'a Subinterval;
    type IntoIter = std::slice::Iter<'a, Subinterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.subintervals.iter()
    }
}
