mod common;

use std::time::Duration;

use common::{diet, Script, ScriptedProblem};
use glpk_core::{
    BoundKind, ColumnKind, Direction, Error, FileFormat, MessageLevel, Problem, SolveOptions,
    Status, StatusOrigin,
};

fn loaded(kind: ColumnKind, script: Script) -> Problem<ScriptedProblem> {
    let mut problem = Problem::from_native(ScriptedProblem::new(script));
    problem.load_problem(&diet(kind)).expect("valid problem");
    problem
}

fn native(problem: &Problem<ScriptedProblem>) -> &ScriptedProblem {
    problem.as_native().expect("live problem")
}

#[test]
fn continuous_problem_skips_integer_phase() {
    let mut problem = loaded(
        ColumnKind::Continuous,
        Script {
            lp_status: 5,
            lp_objective: 31.2,
            mip_status: 42,
            ..Script::default()
        },
    );
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.objective_value, 31.2);
    assert_eq!(result.row_primal, vec![0., 1., 2.]);
    assert_eq!(result.col_primal, vec![0.5, 1.5]);
    assert_eq!(result.row_dual, Some(vec![0., -1., -2.]));
    assert_eq!(result.col_dual, Some(vec![0., -1.]));
    assert!(!result.is_integer());
    assert!(native(&problem).called("simplex"));
    assert!(!native(&problem).called("intopt"));
}

#[test]
fn integer_problem_runs_both_phases() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 5,
            mip_status: 5,
            lp_objective: 31.2,
            mip_objective: 32.,
            ..Script::default()
        },
    );
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.objective_value, 32.);
    assert_eq!(result.row_primal, vec![0., 10., 20.]);
    assert_eq!(result.col_primal, vec![0., 1.]);
    assert_eq!(result.row_dual, None);
    assert_eq!(result.col_dual, None);
    assert!(result.is_integer());
    let calls = &native(&problem).calls;
    let simplex = calls.iter().position(|c| c == "simplex").unwrap();
    let intopt = calls.iter().position(|c| c == "intopt").unwrap();
    assert!(simplex < intopt);
}

#[test]
fn binary_columns_count_as_integer() {
    let mut problem = loaded(
        ColumnKind::Binary,
        Script {
            lp_status: 5,
            mip_status: 2,
            ..Script::default()
        },
    );
    assert_eq!(problem.num_integer_cols(), Ok(2));
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::Feasible);
    assert!(native(&problem).called("intopt"));
}

#[test]
fn integer_return_code_takes_precedence() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 5,
            intopt_return: 9,
            mip_status: 2,
            ..Script::default()
        },
    );
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::TimeLimitReached);
}

#[test]
fn root_relaxation_status_falls_back_to_first_phase() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 4,
            intopt_return: 12,
            mip_status: 1,
            ..Script::default()
        },
    );
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::NoFeasible);
}

#[test]
fn simplex_failure_is_reported_for_continuous_problems() {
    let mut problem = loaded(
        ColumnKind::Continuous,
        Script {
            simplex_return: 8,
            lp_status: 2,
            ..Script::default()
        },
    );
    let result = problem.solve(&SolveOptions::default()).unwrap();
    assert_eq!(result.status, Status::IterationLimitReached);
}

#[test]
fn unknown_status_code_is_an_error() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 5,
            mip_status: 99,
            ..Script::default()
        },
    );
    assert_eq!(
        problem.solve(&SolveOptions::default()),
        Err(Error::UnknownStatusCode {
            code: 99,
            origin: StatusOrigin::SolutionStatus
        })
    );
}

#[test]
fn both_phases_get_the_full_time_limit() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 5,
            mip_status: 5,
            ..Script::default()
        },
    );
    let options = SolveOptions::default()
        .with_message_level(MessageLevel::All)
        .with_time_limit(Duration::from_micros(1));
    problem.solve(&options).unwrap();
    let params = &native(&problem).phase_params;
    assert_eq!(params.len(), 2);
    for p in params {
        assert_eq!(p.time_limit_ms, Some(1));
        assert_eq!(p.message_level, 3);
    }
}

#[test]
fn one_microsecond_becomes_one_millisecond() {
    let mut problem = loaded(
        ColumnKind::Integer,
        Script {
            lp_status: 5,
            intopt_return: 9,
            mip_status: 1,
            ..Script::default()
        },
    );
    let options = SolveOptions::default().with_time_limit_secs(0.000001);
    let result = problem.solve(&options).unwrap();
    assert_eq!(result.status, Status::TimeLimitReached);
    for p in &native(&problem).phase_params {
        assert_eq!(p.time_limit_ms, Some(1));
    }
}

#[test]
fn no_time_limit_by_default() {
    let mut problem = loaded(
        ColumnKind::Continuous,
        Script {
            lp_status: 5,
            ..Script::default()
        },
    );
    problem.solve(&SolveOptions::default()).unwrap();
    let params = &native(&problem).phase_params;
    assert_eq!(params[0].time_limit_ms, None);
    assert_eq!(params[0].message_level, 0);
}

#[test]
fn loading_classifies_bounds() {
    let mut data = diet(ColumnKind::Continuous);
    data.direction = Direction::Maximize;
    data.column_lower = vec![f64::NEG_INFINITY, 2.];
    data.column_upper = vec![f64::INFINITY, 2.];
    data.row_lower = vec![f64::NEG_INFINITY, 1., 0.];
    data.row_upper = vec![5., 3., f64::INFINITY];
    let mut problem = Problem::from_native(ScriptedProblem::default());
    problem.load_problem(&data).unwrap();

    let native = native(&problem);
    assert_eq!(native.direction, 2);
    assert_eq!(native.col_bounds[0].0, BoundKind::Free.code());
    assert_eq!(native.col_bounds[1], (BoundKind::Fixed.code(), 2., 2.));
    assert_eq!(native.row_bounds[0].0, BoundKind::UpperBounded.code());
    assert_eq!(native.row_bounds[1].0, BoundKind::DoubleBounded.code());
    assert_eq!(native.row_bounds[2].0, BoundKind::LowerBounded.code());
}

#[test]
fn loading_replaces_previous_content() {
    let mut problem = loaded(ColumnKind::Integer, Script::default());
    problem
        .load_problem(&diet(ColumnKind::Continuous))
        .unwrap();
    assert_eq!(problem.num_rows(), Ok(3));
    assert_eq!(problem.num_cols(), Ok(2));
    assert_eq!(problem.num_integer_cols(), Ok(0));
}

#[test]
fn invalid_data_leaves_problem_untouched() {
    let mut problem = loaded(ColumnKind::Integer, Script::default());
    let calls_before = native(&problem).calls.len();

    let mut data = diet(ColumnKind::Continuous);
    data.objective.pop();
    let err = problem.load_problem(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong size for objective (given 1, expected 2)"
    );
    assert_eq!(native(&problem).calls.len(), calls_before);
    assert_eq!(problem.num_integer_cols(), Ok(2));
}

#[test]
fn freed_problem_rejects_every_operation() {
    let mut problem = loaded(ColumnKind::Continuous, Script::default());
    problem.free();
    assert!(problem.is_freed());
    problem.free();
    assert!(problem.is_freed());

    let err = problem.solve(&SolveOptions::default()).unwrap_err();
    assert_eq!(err, Error::UseAfterFree);
    assert_eq!(err.to_string(), "can't use freed problem");
    assert_eq!(
        problem.load_problem(&diet(ColumnKind::Continuous)),
        Err(Error::UseAfterFree)
    );
    assert_eq!(
        problem.read_from("model.lp", FileFormat::Lp),
        Err(Error::UseAfterFree)
    );
    assert_eq!(
        problem.write_to("model.lp", FileFormat::Lp),
        Err(Error::UseAfterFree)
    );
    assert_eq!(problem.num_rows(), Err(Error::UseAfterFree));
    assert!(problem.as_native().is_none());
}

#[test]
fn freed_check_comes_before_validation() {
    let mut problem = Problem::from_native(ScriptedProblem::default());
    problem.free();
    let mut data = diet(ColumnKind::Continuous);
    data.values.clear();
    assert_eq!(problem.load_problem(&data), Err(Error::UseAfterFree));
}

#[test]
fn failed_read_erases_the_problem() {
    let mut problem = loaded(
        ColumnKind::Continuous,
        Script {
            read_return: 1,
            ..Script::default()
        },
    );
    assert_eq!(
        problem.read_from("missing.mps", FileFormat::MPS),
        Err(Error::Format {
            operation: "read",
            code: 1
        })
    );
    assert_eq!(problem.num_rows(), Ok(0));
    assert_eq!(native(&problem).calls.last().map(String::as_str), Some("erase"));
}

#[test]
fn failed_write_is_reported() {
    let problem = loaded(
        ColumnKind::Continuous,
        Script {
            write_return: 3,
            ..Script::default()
        },
    );
    assert_eq!(
        problem.write_to("out.lp", FileFormat::Lp),
        Err(Error::Format {
            operation: "write",
            code: 3
        })
    );
}

#[test]
fn clones_are_independent() {
    let problem = loaded(ColumnKind::Continuous, Script::default());
    let mut copy = problem.clone();
    copy.free();
    assert!(!problem.is_freed());
    assert_eq!(problem.num_rows(), Ok(3));
}
