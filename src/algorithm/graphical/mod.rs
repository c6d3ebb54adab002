//! # The graphical method
//!
//! Exact corner-point enumeration for linear programs in two variables. Candidate vertices are
//! the pairwise intersections of all constraint boundary lines and the two axes; the optimum of
//! a bounded feasible problem is attained at one of them. The method is independent of the
//! simplex machinery, which makes it a useful cross-check in tests.
use itertools::Itertools;
use log::debug;

use crate::algorithm::{SolveError, SolveOptions};
use crate::algorithm::utilities::is_zero;
use crate::data::error::InvalidInput;
use crate::data::linear_program::elements::{LinearProgramType, Objective};
use crate::data::linear_program::general_form::GeneralForm;
use crate::data::linear_program::solution::Solution;

/// How far along the improving direction the unboundedness probe is placed.
const PROBE_DISTANCE: f64 = 1e6;

/// Solve a two-variable linear program by corner-point enumeration.
///
/// # Arguments
///
/// * `program`: Linear program with exactly two decision variables; any constraint types.
/// * `options`: The tolerance absorbs float round-off in the feasibility filter, scaled by the
///   largest magnitude in the problem.
///
/// # Return value
///
/// The optimum over all feasible vertices, `Infeasible` when no vertex survives the filter, or
/// `Unbounded` when a far probe along the improving objective direction is feasible.
/// Unboundedness detection is best-effort: a feasible region that is unbounded only in
/// non-improving directions is reported through its finite optimum.
pub fn solve(
    program: &GeneralForm,
    options: &SolveOptions,
) -> Result<LinearProgramType, SolveError> {
    if program.nr_variables() != 2 {
        return Err(SolveError::InvalidInput(InvalidInput::VariableCount {
            expected: 2,
            found: program.nr_variables(),
        }));
    }

    let tolerance = feasibility_tolerance(program, options);

    // Boundary lines a x1 + b x2 = c: one per constraint, plus both axes.
    let mut lines = (0..program.nr_constraints())
        .map(|i| {
            let row = program.constraints().row(i).copied().collect::<Vec<_>>();
            (row[0], row[1], program.right_hand_sides()[i])
        })
        .collect::<Vec<_>>();
    lines.push((1_f64, 0_f64, 0_f64));
    lines.push((0_f64, 1_f64, 0_f64));

    let mut best: Option<(f64, [f64; 2])> = None;
    let mut nr_feasible = 0;
    for (&left, &right) in lines.iter().tuple_combinations() {
        let Some(vertex) = intersection(left, right, options.tolerance) else {
            continue;
        };
        if !program.is_feasible_point(&vertex, tolerance) {
            continue;
        }
        nr_feasible += 1;

        let value = program.evaluate(&vertex);
        // Strict improvement only: ties keep the first vertex found in enumeration order.
        let replace = match best {
            Some((best_value, _)) => match program.objective() {
                Objective::Maximize => value > best_value + options.tolerance,
                Objective::Minimize => value < best_value - options.tolerance,
            },
            None => true,
        };
        if replace {
            best = Some((value, [vertex[0], vertex[1]]));
        }
    }
    debug!("graphical: {} feasible vertices", nr_feasible);

    let Some((value, vertex)) = best else {
        return Ok(LinearProgramType::Infeasible);
    };

    if is_unbounded_from(program, &vertex, value, tolerance) {
        return Ok(LinearProgramType::Unbounded);
    }

    Ok(LinearProgramType::FiniteOptimum(Solution::new(value, vertex.to_vec())))
}

/// Intersection point of two boundary lines, if they are not (nearly) parallel.
fn intersection(
    (a1, b1, c1): (f64, f64, f64),
    (a2, b2, c2): (f64, f64, f64),
    tolerance: f64,
) -> Option<[f64; 2]> {
    let determinant = a1 * b2 - a2 * b1;
    if is_zero(determinant, tolerance) {
        return None;
    }

    Some([
        (c1 * b2 - c2 * b1) / determinant,
        (a1 * c2 - a2 * c1) / determinant,
    ])
}

/// Probe a far point along the improving objective direction.
///
/// The probe is clamped to the non-negative orthant. If it is feasible and strictly better than
/// the best vertex, the objective improves without limit along that ray.
fn is_unbounded_from(
    program: &GeneralForm,
    vertex: &[f64; 2],
    value: f64,
    tolerance: f64,
) -> bool {
    let costs = program.cost_coefficients();
    let sign = match program.objective() {
        Objective::Maximize => 1_f64,
        Objective::Minimize => -1_f64,
    };

    let probe = [
        (vertex[0] + sign * costs[0] * PROBE_DISTANCE).max(0_f64),
        (vertex[1] + sign * costs[1] * PROBE_DISTANCE).max(0_f64),
    ];
    if probe == *vertex {
        return false;
    }

    // The probe sits far out, so the feasibility tolerance is scaled up accordingly.
    if !program.is_feasible_point(&probe, tolerance * PROBE_DISTANCE) {
        return false;
    }

    let probe_value = program.evaluate(&probe);
    match program.objective() {
        Objective::Maximize => probe_value > value + tolerance,
        Objective::Minimize => probe_value < value - tolerance,
    }
}

/// The base tolerance scaled by the largest magnitude in the problem.
fn feasibility_tolerance(program: &GeneralForm, options: &SolveOptions) -> f64 {
    let largest = program.cost_coefficients().iter()
        .chain(program.right_hand_sides())
        .map(|value| value.abs())
        .chain((0..program.nr_constraints()).flat_map(|i| {
            program.constraints().row(i).map(|value| value.abs())
        }))
        .fold(1_f64, f64::max);

    options.tolerance * largest
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::{SolveError, SolveOptions};
    use crate::algorithm::graphical::solve;
    use crate::algorithm::simplex;
    use crate::algorithm::simplex::strategy::pivot_rule::MostNegative;
    use crate::data::error::InvalidInput;
    use crate::data::linear_program::elements::{ConstraintType, LinearProgramType, Objective};
    use crate::data::linear_program::general_form::GeneralForm;
    use crate::tests::problem_1;

    #[test]
    fn production_planning_problem() {
        let program = problem_1::linear_program();
        let solution = solve(&program, &SolveOptions::default()).unwrap()
            .into_solution().unwrap();

        assert_relative_eq!(solution.objective_value, 38_f64 / 3_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[0], 10_f64 / 3_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[1], 4_f64 / 3_f64, max_relative = 1e-9);
    }

    #[test]
    fn matches_simplex() {
        let program = problem_1::linear_program();
        let options = SolveOptions::default();

        let by_enumeration = solve(&program, &options).unwrap().into_solution().unwrap();
        let by_pivoting = simplex::solve::<MostNegative>(&program, &options).unwrap()
            .into_solution().unwrap();

        assert_relative_eq!(
            by_enumeration.objective_value,
            by_pivoting.objective_value,
            max_relative = 1e-9,
        );
    }

    #[test]
    fn equality_constraint() {
        // minimize 2x + 3y subject to x + y = 4, x <= 3.
        let program = GeneralForm::new(
            Objective::Minimize,
            vec![2_f64, 3_f64],
            vec![vec![1_f64, 1_f64], vec![1_f64, 0_f64]],
            vec![ConstraintType::Equal, ConstraintType::Less],
            vec![4_f64, 3_f64],
        ).unwrap();
        let solution = solve(&program, &SolveOptions::default()).unwrap()
            .into_solution().unwrap();

        assert_relative_eq!(solution.objective_value, 9_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[0], 3_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[1], 1_f64, max_relative = 1e-9);
    }

    #[test]
    fn infeasible() {
        let program = GeneralForm::new(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64], vec![1_f64, 1_f64]],
            vec![ConstraintType::Less, ConstraintType::Greater],
            vec![1_f64, 3_f64],
        ).unwrap();
        let result = solve(&program, &SolveOptions::default()).unwrap();

        assert_eq!(result, LinearProgramType::Infeasible);
    }

    #[test]
    fn unbounded() {
        let program = GeneralForm::new(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64]],
            vec![ConstraintType::Greater],
            vec![1_f64],
        ).unwrap();
        let result = solve(&program, &SolveOptions::default()).unwrap();

        assert_eq!(result, LinearProgramType::Unbounded);
    }

    #[test]
    fn rejects_other_variable_counts() {
        let program = GeneralForm::standard_form(
            Objective::Maximize,
            vec![1_f64, 1_f64, 1_f64],
            vec![vec![1_f64, 1_f64, 1_f64]],
            vec![1_f64],
        ).unwrap();
        let result = solve(&program, &SolveOptions::default());

        assert_eq!(result, Err(SolveError::InvalidInput(InvalidInput::VariableCount {
            expected: 2,
            found: 3,
        })));
    }
}
