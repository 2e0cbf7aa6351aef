//! # `postopt` – Resolving degenerate optima
//!
//! When the primary LP's optimal value is (numerically) zero, the user
//! ranking is exactly reproducible and the fit is underdetermined: many
//! `w`-vectors achieve the same zero error. This engine resolves the
//! ambiguity by, for each criterion, maximizing that
//! criterion's total weight subject to staying within an `epsilon`
//! neighbourhood of the primary optimum, then average the weight- and
//! error-vectors of whichever of those `C` LPs actually solved.
//!
//! The `C` secondary LPs don't depend on each other's results, so they are
//! solved with `rayon` rather than sequentially.

use ndarray::{Array1, Array2, Axis, s};
use rayon::prelude::*;
use tracing::warn;

use crate::criterion::CriteriaSet;
use crate::lp::assembler::BaseConstraints;
use crate::lp::solver::LpSolver;

/// Optimal values below this magnitude are treated as numerically zero.
pub const DEGENERACY_TOLERANCE: f64 = 1e-7;

/// Outcome of resolving the primary LP's solution: the final `w` and error
/// vectors, plus — only when post-optimality actually ran and at least one
/// secondary LP succeeded — the raw primary solution and the raw successful
/// secondary solutions, for the caller to package as `first_sol`/`sa_sol`.
pub(crate) struct PostOptOutcome {
    pub w: Array1<f64>,
    pub errors: Array1<f64>,
    pub degeneracy: Option<(Array1<f64>, Vec<Array1<f64>>)>,
}

fn split(x: &Array1<f64>, t: usize) -> (Array1<f64>, Array1<f64>) {
    (x.slice(s![0..t]).to_owned(), x.slice(s![t..]).to_owned())
}

fn append_row(a: &Array2<f64>, row: &Array1<f64>) -> Array2<f64> {
    let row_view = row.view().insert_axis(Axis(0));
    ndarray::concatenate(Axis(0), &[a.view(), row_view]).expect("matching width")
}

fn append_value(b: &Array1<f64>, value: f64) -> Array1<f64> {
    let mut values = b.to_vec();
    values.push(value);
    Array1::from(values)
}

pub(crate) fn resolve(
    solver: &dyn LpSolver,
    criteria: &CriteriaSet,
    base: &BaseConstraints,
    t: usize,
    m: usize,
    primary_x: &Array1<f64>,
    primary_fun: f64,
    epsilon: f64,
) -> PostOptOutcome {
    if primary_fun.abs() > DEGENERACY_TOLERANCE {
        let (w, errors) = split(primary_x, t);
        return PostOptOutcome {
            w,
            errors,
            degeneracy: None,
        };
    }

    // sum(errors) <= F* + epsilon, staying within the primary's neighbourhood.
    let mut epsilon_row = Array1::<f64>::zeros(t + 2 * m);
    epsilon_row.slice_mut(s![t..t + 2 * m]).fill(1.0);
    let a_ub = append_row(&base.a_ub, &epsilon_row);
    let b_ub = append_value(&base.b_ub, primary_fun + epsilon);

    let successes: Vec<Array1<f64>> = (0..criteria.len())
        .into_par_iter()
        .filter_map(|j| {
            let indicator = criteria.indicator(j);
            let mut c = Array1::<f64>::zeros(t + 2 * m);
            // maximize criterion j's weight == minimize its negation
            c.slice_mut(s![0..t]).assign(&(-&indicator));

            let outcome = solver.solve(&c, &a_ub, &b_ub, &base.a_eq, &base.b_eq);
            if outcome.success {
                Some(outcome.x)
            } else {
                let name = criteria.get(j).map(|c| c.name()).unwrap_or("?");
                warn!(
                    criterion = name,
                    message = %outcome.message,
                    "secondary post-optimality LP failed; omitting from the average"
                );
                None
            }
        })
        .collect();

    if successes.is_empty() {
        warn!("all secondary post-optimality LPs failed; falling back to the primary LP solution");
        let (w, errors) = split(primary_x, t);
        return PostOptOutcome {
            w,
            errors,
            degeneracy: None,
        };
    }

    let count = successes.len() as f64;
    let mut sum = Array1::<f64>::zeros(t + 2 * m);
    for x in &successes {
        sum += x;
    }
    let average = sum / count;
    let (w, errors) = split(&average, t);

    PostOptOutcome {
        w,
        errors,
        degeneracy: Some((primary_x.clone(), successes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::criterion::Criterion;
    use ndarray::array;

    struct StubSolver {
        responses: std::sync::Mutex<Vec<crate::lp::solver::LpOutcome>>,
    }

    impl LpSolver for StubSolver {
        fn solve(
            &self,
            _c: &Array1<f64>,
            _a_ub: &Array2<f64>,
            _b_ub: &Array1<f64>,
            _a_eq: &Array2<f64>,
            _b_eq: &Array1<f64>,
        ) -> crate::lp::solver::LpOutcome {
            self.responses.lock().unwrap().pop().expect("stub exhausted")
        }
    }

    fn two_criteria() -> CriteriaSet {
        CriteriaSet::new(vec![
            Criterion::new("a", Interval::new(0.0, 1.0, 1).unwrap()),
            Criterion::new("b", Interval::new(0.0, 1.0, 1).unwrap()),
        ])
    }

    fn dummy_base() -> BaseConstraints {
        BaseConstraints {
            a_ub: Array2::zeros((0, 2)),
            b_ub: Array1::zeros(0),
            a_eq: Array2::zeros((0, 2)),
            b_eq: Array1::zeros(0),
        }
    }

    #[test]
    fn non_degenerate_optimum_skips_post_optimality() {
        let criteria = two_criteria();
        let base = dummy_base();
        let solver = StubSolver {
            responses: std::sync::Mutex::new(vec![]),
        };
        let primary_x = array![0.5, 0.5];
        let outcome = resolve(&solver, &criteria, &base, 2, 0, &primary_x, 1.0, 0.01);
        assert!(outcome.degeneracy.is_none());
        assert_eq!(outcome.w.to_vec(), vec![0.5, 0.5]);
    }

    #[test]
    fn all_secondary_failures_fall_back_to_primary() {
        let criteria = two_criteria();
        let base = dummy_base();
        let solver = StubSolver {
            responses: std::sync::Mutex::new(vec![
                crate::lp::solver::LpOutcome {
                    success: false,
                    x: Array1::zeros(2),
                    fun: f64::NAN,
                    message: "infeasible".into(),
                };
                2
            ]),
        };
        let primary_x = array![0.3, 0.7];
        let outcome = resolve(&solver, &criteria, &base, 2, 0, &primary_x, 0.0, 0.01);
        assert!(outcome.degeneracy.is_none());
        assert_eq!(outcome.w.to_vec(), vec![0.3, 0.7]);
    }
}
