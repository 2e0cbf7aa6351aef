//! End-to-end fitting scenarios, one per boundary case this crate commits to.

use ndarray::{Array1, Array2};
use rstest::rstest;

use utastar::{solve, AlternativeInput, CriterionConfig, LpOutcome, LpSolver, UtastarError, UtastarProblemBuilder};

fn public_transport_table() -> Vec<AlternativeInput> {
    vec![
        AlternativeInput::new("car", 3, vec![30.0, 40.0, 0.0]),
        AlternativeInput::new("bus", 2, vec![16.0, 25.0, 1.0]),
        AlternativeInput::new("bike", 1, vec![2.0, 10.0, 3.0]),
    ]
}

fn public_transport_criteria() -> Vec<CriterionConfig> {
    vec![
        CriterionConfig::new("price", false, 2),
        CriterionConfig::new("duration", false, 3),
        CriterionConfig::new("comfort", true, 3),
    ]
}

#[test]
fn single_ascending_criterion_two_alternatives() {
    let table = vec![
        AlternativeInput::new("best", 1, vec![2.0]),
        AlternativeInput::new("worst", 2, vec![0.0]),
    ];
    let criteria = vec![CriterionConfig::new("c", true, 2)];

    let solution = solve(table, criteria).expect("two monotone alternatives always fit");
    assert_eq!(solution.table[0].name, "best");
    assert_eq!(solution.table[1].name, "worst");
    assert!(solution.table[0].utility > solution.table[1].utility);
    assert!((solution.tau - 1.0).abs() < 1e-9);
}

#[test]
fn indifference_pair_keeps_tied_ranks_equal() {
    let table = vec![
        AlternativeInput::new("top", 1, vec![2.0]),
        AlternativeInput::new("tied-a", 2, vec![1.0]),
        AlternativeInput::new("tied-b", 2, vec![0.9]),
    ];
    let criteria = vec![CriterionConfig::new("c", true, 4)];

    let solution = solve(table, criteria).expect("indifference pairs are a supported shape");
    let tied: Vec<&str> = solution
        .table
        .iter()
        .filter(|row| row.rank == 2)
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(tied.len(), 2);
    let (a, b) = (
        solution.table.iter().find(|r| r.name == "tied-a").unwrap(),
        solution.table.iter().find(|r| r.name == "tied-b").unwrap(),
    );
    assert!((a.utility - b.utility).abs() < 1e-6);
}

#[test]
fn descending_criterion_orients_worst_to_max() {
    let table = vec![
        AlternativeInput::new("cheap", 1, vec![2.0]),
        AlternativeInput::new("costly", 2, vec![30.0]),
    ];
    let criteria = vec![CriterionConfig::new("price", false, 2)];

    let solution = solve(table, criteria).unwrap();
    let price = solution.criteria.get_by_name("price").unwrap();
    assert_eq!(price.interval().left(), 30.0);
    assert_eq!(price.interval().right(), 2.0);
    assert_eq!(solution.table[0].name, "cheap");
}

#[test]
fn degenerate_optimum_populates_post_optimality_solutions() {
    // A single strictly monotone criterion over more than two alternatives
    // reproduces the user's order exactly, so the primary LP's optimum is
    // numerically zero and the fit is underdetermined.
    let table = vec![
        AlternativeInput::new("a", 1, vec![3.0]),
        AlternativeInput::new("b", 2, vec![2.0]),
        AlternativeInput::new("c", 3, vec![1.0]),
        AlternativeInput::new("d", 4, vec![0.0]),
    ];
    let criteria = vec![CriterionConfig::new("c", true, 4)];

    let solution = solve(table, criteria).unwrap();
    let degeneracy = solution
        .degeneracy
        .as_ref()
        .expect("a single perfectly-monotone criterion is the degenerate case");
    assert_eq!(degeneracy.first_sol.table.len(), 4);
    assert_eq!(degeneracy.sa_sol.len(), 1);
    assert!(degeneracy.sa_sol[0].degeneracy.is_none());
}

#[rstest]
#[case("price", vec![30.0, 16.0, 2.0])]
#[case("duration", vec![40.0, 30.0, 20.0, 10.0])]
#[case("comfort", vec![0.0, 1.0, 2.0, 3.0])]
fn public_transport_breakpoints_are_exact(#[case] name: &str, #[case] expected: Vec<f64>) {
    let solution = solve(public_transport_table(), public_transport_criteria()).unwrap();
    let criterion = solution.criteria.get_by_name(name).unwrap();
    assert_eq!(criterion.interval().breakpoints(), expected.as_slice());
}

#[test]
fn public_transport_scores_match_fitted_utilities() {
    let solution = solve(public_transport_table(), public_transport_criteria()).unwrap();
    for row in &solution.table {
        let scored = solution.score(&row.values).unwrap();
        assert!((scored - row.utility).abs() < 1e-9);
    }
}

struct AlwaysFailsSolver;

impl LpSolver for AlwaysFailsSolver {
    fn solve(
        &self,
        c: &Array1<f64>,
        _a_ub: &Array2<f64>,
        _b_ub: &Array1<f64>,
        _a_eq: &Array2<f64>,
        _b_eq: &Array1<f64>,
    ) -> LpOutcome {
        LpOutcome {
            success: false,
            x: Array1::zeros(c.len()),
            fun: f64::NAN,
            message: "simulated infeasible problem".to_string(),
        }
    }
}

#[test]
fn primary_solver_failure_surfaces_linear_program_error() {
    let problem = UtastarProblemBuilder::default()
        .table(public_transport_table())
        .criteria(public_transport_criteria())
        .solver(Box::new(AlwaysFailsSolver))
        .build()
        .unwrap();

    match problem.solve() {
        Err(UtastarError::LinearProgramError(message)) => {
            assert!(message.contains("simulated"));
        }
        other => panic!("expected LinearProgramError, got {other:?}"),
    }
}
