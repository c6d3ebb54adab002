//! # The primal simplex method
//!
//! Tableau-based primal simplex for standard-form linear programs: all constraints of the `<=`
//! type with non-negative right-hand sides, all variables non-negative. Problems with `>=` or
//! `=` constraints go through the [`big_m`] extension, which reuses the pivot loop of this
//! module on an augmented tableau.
use log::{debug, trace};

use crate::algorithm::{SolveError, SolveOptions};
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::error::InvalidInput;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::elements::{LinearProgramType, Objective};
use crate::data::linear_program::general_form::GeneralForm;
use crate::data::linear_program::solution::Solution;

pub mod big_m;
pub mod strategy;
pub mod tableau;

/// Solve a standard-form linear program to optimality.
///
/// Minimization is handled by negating the objective internally; the reported optimum is in
/// terms of the original problem.
///
/// # Arguments
///
/// * `program`: Linear program with only `<=` constraints and non-negative right-hand sides.
/// * `options`: Tolerance and pivot cap.
///
/// # Return value
///
/// Whether the problem has a finite optimum or is unbounded, or the error that stopped the
/// solve. Standard-form problems always have the all-slack basic feasible solution, so
/// infeasibility cannot occur here.
pub fn solve<PR: PivotRule>(
    program: &GeneralForm,
    options: &SolveOptions,
) -> Result<LinearProgramType, SolveError> {
    if !program.is_standard_form() {
        return Err(SolveError::InvalidInput(InvalidInput::NotStandardForm(
            "only <= constraints with non-negative right-hand sides",
        )));
    }

    let mut tableau = standard_form_tableau(program);
    debug!(
        "simplex: {} variables, {} constraints",
        program.nr_variables(), program.nr_constraints(),
    );

    match primal::<PR>(&mut tableau, options)? {
        PrimalResult::Optimal => Ok(LinearProgramType::FiniteOptimum(
            extract_solution(&tableau, program),
        )),
        PrimalResult::Unbounded => Ok(LinearProgramType::Unbounded),
    }
}

/// Outcome of the primal pivot loop on a feasible tableau.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum PrimalResult {
    /// No non-basic column can improve the objective.
    Optimal,
    /// An improving column without positive entries was found.
    Unbounded,
}

/// Reduces the cost of the basic feasible solution to the optimum.
///
/// While calling this method, the tableau needs to be in a basic feasible solution state: a
/// valid basis and non-negative constraint values.
pub(crate) fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    options: &SolveOptions,
) -> Result<PrimalResult, SolveError> {
    let mut rule = PR::new();
    let mut pivots = 0;
    loop {
        match rule.select_pivot_column(tableau, options.tolerance) {
            Some(column) => match tableau.select_pivot_row(column, options.tolerance) {
                Some(row) => {
                    if pivots == options.max_pivots {
                        return Err(SolveError::PivotLimit(pivots));
                    }
                    pivots += 1;
                    trace!(
                        "pivot {}: column {} enters on row {}, objective {}",
                        pivots, column, row, tableau.objective_function_value(),
                    );
                    tableau.bring_into_basis(column, row);
                },
                None => {
                    debug!("simplex: unbounded after {} pivots", pivots);
                    break Ok(PrimalResult::Unbounded);
                },
            },
            None => {
                debug!(
                    "simplex: optimal after {} pivots, objective {}",
                    pivots, tableau.objective_function_value(),
                );
                break Ok(PrimalResult::Optimal);
            },
        }
    }
}

/// Read the solution for the original problem out of an optimal tableau.
///
/// The objective value is recomputed from the extracted variable values, which keeps it exact
/// with respect to what is reported and independent of any penalty terms on the tableau.
pub(crate) fn extract_solution(tableau: &Tableau, program: &GeneralForm) -> Solution {
    let values = tableau.decision_values();
    let objective_value = program.evaluate(&values);
    Solution::new(objective_value, values)
}

/// Build the initial tableau for a standard-form program.
///
/// One slack variable per constraint; the slack block is the identity and forms the initial
/// basis. The objective row carries the negated (maximization) costs, so a negative entry marks
/// an improving column.
fn standard_form_tableau(program: &GeneralForm) -> Tableau {
    let nr_variables = program.nr_variables();
    let nr_constraints = program.nr_constraints();
    let nr_columns = nr_variables + nr_constraints + 1;

    let sign = match program.objective() {
        Objective::Maximize => 1_f64,
        Objective::Minimize => -1_f64,
    };

    let mut matrix = DenseMatrix::zeros(nr_constraints + 1, nr_columns);
    for i in 0..nr_constraints {
        for (j, &coefficient) in program.constraints().row(i).enumerate() {
            matrix.set(i, j, coefficient);
        }
        matrix.set(i, nr_variables + i, 1_f64);
        matrix.set(i, nr_columns - 1, program.right_hand_sides()[i]);
    }
    for (j, &cost) in program.cost_coefficients().iter().enumerate() {
        matrix.set(nr_constraints, j, -sign * cost);
    }

    let basis = (nr_variables..nr_variables + nr_constraints).collect();
    Tableau::new(matrix, basis, nr_variables, nr_constraints, 0)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::{SolveError, SolveOptions};
    use crate::algorithm::simplex::solve;
    use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, MostNegative};
    use crate::data::error::InvalidInput;
    use crate::data::linear_program::elements::LinearProgramType;
    use crate::data::linear_program::general_form::GeneralForm;
    use crate::tests::problem_1;

    #[test]
    fn production_planning_problem() {
        let program = problem_1::linear_program();
        let result = solve::<MostNegative>(&program, &SolveOptions::default()).unwrap();

        let solution = result.into_solution().unwrap();
        assert_relative_eq!(solution.objective_value, 38_f64 / 3_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[0], 10_f64 / 3_f64, max_relative = 1e-9);
        assert_relative_eq!(solution.variable_values[1], 4_f64 / 3_f64, max_relative = 1e-9);
    }

    #[test]
    fn pivot_rules_agree() {
        let program = problem_1::linear_program();
        let options = SolveOptions::default();

        let most_negative = solve::<MostNegative>(&program, &options).unwrap()
            .into_solution().unwrap();
        let first_profitable = solve::<FirstProfitable>(&program, &options).unwrap()
            .into_solution().unwrap();
        assert_relative_eq!(
            most_negative.objective_value,
            first_profitable.objective_value,
            max_relative = 1e-9,
        );
    }

    #[test]
    fn minimization() {
        use crate::data::linear_program::elements::Objective;

        // Minimizing the negated objective of problem 1 mirrors its optimum.
        let program = GeneralForm::standard_form(
            Objective::Minimize,
            vec![-3_f64, -2_f64],
            vec![vec![2_f64, 1_f64], vec![1_f64, 2_f64]],
            vec![8_f64, 6_f64],
        ).unwrap();
        let solution = solve::<MostNegative>(&program, &SolveOptions::default()).unwrap()
            .into_solution().unwrap();

        assert_relative_eq!(solution.objective_value, -38_f64 / 3_f64, max_relative = 1e-9);
    }

    #[test]
    fn unbounded() {
        use crate::data::linear_program::elements::Objective;

        let program = GeneralForm::standard_form(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![-1_f64, 1_f64]],
            vec![1_f64],
        ).unwrap();
        let result = solve::<MostNegative>(&program, &SolveOptions::default()).unwrap();

        assert_eq!(result, LinearProgramType::Unbounded);
    }

    #[test]
    fn rejects_non_standard_form() {
        use crate::data::linear_program::elements::{ConstraintType, Objective};

        let program = GeneralForm::new(
            Objective::Maximize,
            vec![1_f64],
            vec![vec![1_f64]],
            vec![ConstraintType::Greater],
            vec![1_f64],
        ).unwrap();
        let result = solve::<MostNegative>(&program, &SolveOptions::default());

        assert!(matches!(
            result,
            Err(SolveError::InvalidInput(InvalidInput::NotStandardForm(_))),
        ));
    }

    #[test]
    fn pivot_cap() {
        let program = problem_1::linear_program();
        let options = SolveOptions::default().with_max_pivots(1);
        let result = solve::<MostNegative>(&program, &options);

        assert_eq!(result, Err(SolveError::PivotLimit(1)));
    }
}
