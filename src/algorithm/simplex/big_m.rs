//! # The Big-M method
//!
//! Extends the core simplex method to problems with `>=` and `=` constraints. Every such
//! constraint receives an artificial variable which is charged a penalty `M` in the objective,
//! where `M` dominates every legitimate coefficient in the problem. At an optimum of the
//! penalized problem all artificial variables are out of the basis exactly when the original
//! problem is feasible.
use log::debug;

use crate::algorithm::{SolveError, SolveOptions};
use crate::algorithm::simplex::{extract_solution, primal, PrimalResult};
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::elements::{ConstraintType, LinearProgramType, Objective};
use crate::data::linear_program::general_form::GeneralForm;

/// Scale factor of the penalty relative to the largest input magnitude.
const PENALTY_FACTOR: f64 = 1e6;

/// Solve a linear program with any mix of `<=`, `>=` and `=` constraints.
///
/// # Arguments
///
/// * `program`: Linear program in general form. Rows with a negative right-hand side are negated
///   (flipping their relation) before the tableau is built.
/// * `options`: Tolerance and pivot cap.
///
/// # Return value
///
/// The optimum, infeasibility or unboundedness of the original problem, or the error that
/// stopped the solve. An artificial variable remaining basic at a positive value overrides the
/// tableau's own optimum: the original problem is infeasible.
pub fn solve<PR: PivotRule>(
    program: &GeneralForm,
    options: &SolveOptions,
) -> Result<LinearProgramType, SolveError> {
    let mut tableau = penalized_tableau(program);
    debug!(
        "big-M: {} variables, {} constraints",
        program.nr_variables(), program.nr_constraints(),
    );

    match primal::<PR>(&mut tableau, options)? {
        PrimalResult::Optimal => {
            if tableau.has_artificial_at_positive_level(options.tolerance) {
                debug!("big-M: artificial variable basic at positive level");
                Ok(LinearProgramType::Infeasible)
            } else {
                Ok(LinearProgramType::FiniteOptimum(extract_solution(&tableau, program)))
            }
        },
        // An improving ray never increases a penalized variable, so with an artificial still at
        // a positive level no feasible point was reached and the original problem is infeasible.
        PrimalResult::Unbounded => {
            if tableau.has_artificial_at_positive_level(options.tolerance) {
                Ok(LinearProgramType::Infeasible)
            } else {
                Ok(LinearProgramType::Unbounded)
            }
        },
    }
}

/// The penalty coefficient for a problem.
///
/// `1e6` times the largest absolute value among the cost coefficients, constraint coefficients
/// and right-hand sides, and at least `1e6`. Large enough to dominate any legitimate reduced
/// cost, small enough to leave `f64` precision to work with.
fn penalty(program: &GeneralForm) -> f64 {
    let largest = program.cost_coefficients().iter()
        .chain(program.right_hand_sides())
        .map(|value| value.abs())
        .chain((0..program.nr_constraints()).flat_map(|i| {
            program.constraints().row(i).map(|value| value.abs())
        }))
        .fold(1_f64, f64::max);

    PENALTY_FACTOR * largest
}

/// Build the penalized tableau.
///
/// Per constraint type: `<=` gets a slack, `>=` a surplus and an artificial, `=` only an
/// artificial. The slack or artificial of each row forms the initial basis. The objective row is
/// reduced against the basic artificial rows so that every basic column starts at relative cost
/// zero.
fn penalized_tableau(program: &GeneralForm) -> Tableau {
    let nr_variables = program.nr_variables();
    let nr_constraints = program.nr_constraints();

    // Negative right-hand sides are eliminated up front by negating the row, so the initial
    // basis is feasible.
    let mut rows = (0..nr_constraints)
        .map(|i| program.constraints().row(i).copied().collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let mut right_hand_sides = program.right_hand_sides().to_vec();
    let mut constraint_types = program.constraint_types().to_vec();
    for i in 0..nr_constraints {
        if right_hand_sides[i] < 0_f64 {
            for coefficient in rows[i].iter_mut() {
                *coefficient = -*coefficient;
            }
            right_hand_sides[i] = -right_hand_sides[i];
            constraint_types[i] = match constraint_types[i] {
                ConstraintType::Less => ConstraintType::Greater,
                ConstraintType::Greater => ConstraintType::Less,
                ConstraintType::Equal => ConstraintType::Equal,
            };
        }
    }

    let nr_slack = constraint_types.iter()
        .filter(|&&relation| relation != ConstraintType::Equal)
        .count();
    let nr_artificial = constraint_types.iter()
        .filter(|&&relation| relation != ConstraintType::Less)
        .count();
    let nr_columns = nr_variables + nr_slack + nr_artificial + 1;

    let sign = match program.objective() {
        Objective::Maximize => 1_f64,
        Objective::Minimize => -1_f64,
    };
    let big_m = penalty(program);

    let mut matrix = DenseMatrix::zeros(nr_constraints + 1, nr_columns);
    let mut basis = vec![0; nr_constraints];
    let mut next_slack = nr_variables;
    let mut next_artificial = nr_variables + nr_slack;
    let mut artificial_rows = Vec::with_capacity(nr_artificial);

    for i in 0..nr_constraints {
        for (j, &coefficient) in rows[i].iter().enumerate() {
            matrix.set(i, j, coefficient);
        }
        matrix.set(i, nr_columns - 1, right_hand_sides[i]);

        match constraint_types[i] {
            ConstraintType::Less => {
                matrix.set(i, next_slack, 1_f64);
                basis[i] = next_slack;
                next_slack += 1;
            },
            ConstraintType::Greater => {
                matrix.set(i, next_slack, -1_f64);
                next_slack += 1;
                matrix.set(i, next_artificial, 1_f64);
                basis[i] = next_artificial;
                next_artificial += 1;
                artificial_rows.push(i);
            },
            ConstraintType::Equal => {
                matrix.set(i, next_artificial, 1_f64);
                basis[i] = next_artificial;
                next_artificial += 1;
                artificial_rows.push(i);
            },
        }
    }

    for (j, &cost) in program.cost_coefficients().iter().enumerate() {
        matrix.set(nr_constraints, j, -sign * cost);
    }
    for j in (nr_variables + nr_slack)..(nr_columns - 1) {
        matrix.set(nr_constraints, j, big_m);
    }
    // Reduce the objective row against each basic artificial so those columns start at zero
    // relative cost.
    for &i in &artificial_rows {
        matrix.mul_add_rows(i, nr_constraints, -big_m);
    }

    Tableau::new(matrix, basis, nr_variables, nr_slack, nr_artificial)
}
