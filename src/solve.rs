//! # `solve` – Top-level orchestration
//!
//! Wires [`crate::problem`], [`crate::lp`] and [`crate::postopt`] into the
//! one pipeline: build the problem, assemble the LP,
//! solve it, resolve degeneracy, assemble the result. [`UtastarProblem`] is
//! built via [`UtastarProblemBuilder`], mirroring the owned,
//! validated builder style used throughout this crate's lineage.

use derive_builder::Builder;

use crate::error::UtastarError;
use crate::lp::assembler::{base_constraints, difference_matrix, error_matrix, primary_objective};
use crate::lp::solver::LpSolver;
use crate::lp::minilp_adapter::MinilpSolver;
use crate::problem::{build_problem, AlternativeInput, CriterionConfig};
use crate::result::{self, UtastarSolution};

fn default_solver() -> Box<dyn LpSolver> {
    Box::new(MinilpSolver::new())
}

/// A configured UTASTAR fit, ready to [`UtastarProblem::solve`].
///
/// Built with [`UtastarProblemBuilder`]; `delta` and `epsilon` default to
/// small positive constants (`delta = 0.01`,
/// `epsilon = 0.01`), and `solver` defaults to [`MinilpSolver`].
#[derive(Builder)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct UtastarProblem {
    table: Vec<AlternativeInput>,
    criteria: Vec<CriterionConfig>,
    #[builder(default = "0.01")]
    delta: f64,
    #[builder(default = "0.01")]
    epsilon: f64,
    #[builder(default = "default_solver()")]
    solver: Box<dyn LpSolver>,
}

impl UtastarProblemBuilder {
    fn validate(&self) -> Result<(), UtastarProblemBuilderError> {
        if let Some(table) = &self.table {
            if table.len() < 2 {
                return Err(UtastarProblemBuilderError::ValidationError(
                    "at least two alternatives are required".to_string(),
                ));
            }
        }
        if let Some(criteria) = &self.criteria {
            if criteria.is_empty() {
                return Err(UtastarProblemBuilderError::ValidationError(
                    "at least one criterion is required".to_string(),
                ));
            }
            for cfg in criteria {
                if cfg.splits == 0 {
                    return Err(UtastarProblemBuilderError::ValidationError(format!(
                        "criterion '{}' must have a positive number of subintervals",
                        cfg.name
                    )));
                }
            }
        }
        if let Some(delta) = self.delta {
            if delta <= 0.0 {
                return Err(UtastarProblemBuilderError::ValidationError(
                    "delta must be positive".to_string(),
                ));
            }
        }
        if let Some(epsilon) = self.epsilon {
            if epsilon <= 0.0 {
                return Err(UtastarProblemBuilderError::ValidationError(
                    "epsilon must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl UtastarProblem {
    /// Runs the full pipeline: build the problem, assemble and
    /// solve the primary LP, resolve post-optimality if the optimum is
    /// degenerate, and assemble the final [`UtastarSolution`].
    pub fn solve(&self) -> Result<UtastarSolution, UtastarError> {
        let data = build_problem(&self.table, &self.criteria)?;
        let ranks: Vec<u32> = data.sorted_table.iter().map(|row| row.rank).collect();
        let m = data.sorted_table.len();
        let t = data.criteria.total_len();

        let d = difference_matrix(&data.basis_matrix);
        let e = error_matrix(m);
        let base = base_constraints(&d, &e, &ranks, self.delta, t, m);
        let objective = primary_objective(t, m);

        let primary = self
            .solver
            .solve(&objective, &base.a_ub, &base.b_ub, &base.a_eq, &base.b_eq);
        if !primary.success {
            return Err(UtastarError::LinearProgramError(primary.message));
        }

        let outcome = crate::postopt::resolve(
            self.solver.as_ref(),
            &data.criteria,
            &base,
            t,
            m,
            &primary.x,
            primary.fun,
            self.epsilon,
        );

        let degeneracy = outcome.degeneracy.map(|(primary_x, successes)| {
            let (primary_w, primary_errors) = (
                primary_x.slice(ndarray::s![0..t]).to_owned(),
                primary_x.slice(ndarray::s![t..]).to_owned(),
            );
            let first_sol = Box::new(result::assemble(
                &data.criteria,
                &data.sorted_table,
                &data.basis_matrix,
                &primary_w,
                &primary_errors,
                None,
            ));
            let sa_sol = successes
                .iter()
                .map(|x| {
                    let w = x.slice(ndarray::s![0..t]).to_owned();
                    let errors = x.slice(ndarray::s![t..]).to_owned();
                    result::assemble(
                        &data.criteria,
                        &data.sorted_table,
                        &data.basis_matrix,
                        &w,
                        &errors,
                        None,
                    )
                })
                .collect();
            crate::result::DegeneracyInfo { first_sol, sa_sol }
        });

        Ok(result::assemble(
            &data.criteria,
            &data.sorted_table,
            &data.basis_matrix,
            &outcome.w,
            &outcome.errors,
            degeneracy,
        ))
    }
}

/// Convenience entry point: fits a model with the default
/// [`MinilpSolver`] and the suggested `delta`/`epsilon` defaults.
pub fn solve(
    table: Vec<AlternativeInput>,
    criteria: Vec<CriterionConfig>,
) -> Result<UtastarSolution, UtastarError> {
    let problem = UtastarProblemBuilder::default()
        .table(table)
        .criteria(criteria)
        .build()?;
    problem.solve()
}
