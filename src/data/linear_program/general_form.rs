//! # General form linear programs
//!
//! A `GeneralForm` describes a linear program as a caller would state it: an objective direction,
//! cost coefficients, and a row of coefficients with a relation and a right-hand side per
//! constraint. Decision variables are implicitly non-negative.
use crate::data::error::InvalidInput;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::elements::{BoundDirection, ConstraintType, Objective};

/// A linear program in general form.
///
/// Constructed immutably from caller input and validated eagerly; solvers never mutate an
/// instance. Branch and bound derives sub-problems through `with_variable_bound`, which clones.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralForm {
    /// Direction of optimization.
    objective: Objective,
    /// Coefficient of each decision variable in the objective function.
    cost_coefficients: Vec<f64>,
    /// Constraint coefficients, one row per constraint.
    constraints: DenseMatrix,
    /// Relation between each constraint row and its right-hand side.
    constraint_types: Vec<ConstraintType>,
    /// Constraint values.
    right_hand_sides: Vec<f64>,
}

impl GeneralForm {
    /// Create a new linear program, validating the dimensions and values of all input.
    ///
    /// # Arguments
    ///
    /// * `objective`: Whether to maximize or minimize the objective function.
    /// * `cost_coefficients`: One value per decision variable; determines the variable count.
    /// * `rows`: Constraint coefficients, each row as long as `cost_coefficients`.
    /// * `constraint_types`: Relation per constraint row.
    /// * `right_hand_sides`: Constraint value per constraint row.
    ///
    /// # Return value
    ///
    /// The validated program, or the first `InvalidInput` encountered.
    pub fn new(
        objective: Objective,
        cost_coefficients: Vec<f64>,
        rows: Vec<Vec<f64>>,
        constraint_types: Vec<ConstraintType>,
        right_hand_sides: Vec<f64>,
    ) -> Result<Self, InvalidInput> {
        if cost_coefficients.is_empty() {
            return Err(InvalidInput::Empty("no decision variables"));
        }
        if rows.is_empty() {
            return Err(InvalidInput::Empty("no constraints"));
        }

        let nr_variables = cost_coefficients.len();
        for row in &rows {
            if row.len() != nr_variables {
                return Err(InvalidInput::DimensionMismatch {
                    quantity: "constraint row",
                    expected: nr_variables,
                    found: row.len(),
                });
            }
        }
        if constraint_types.len() != rows.len() {
            return Err(InvalidInput::DimensionMismatch {
                quantity: "constraint types",
                expected: rows.len(),
                found: constraint_types.len(),
            });
        }
        if right_hand_sides.len() != rows.len() {
            return Err(InvalidInput::DimensionMismatch {
                quantity: "right-hand sides",
                expected: rows.len(),
                found: right_hand_sides.len(),
            });
        }

        let all_finite = cost_coefficients.iter()
            .chain(rows.iter().flatten())
            .chain(right_hand_sides.iter())
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(InvalidInput::NonFinite("problem coefficient"));
        }

        Ok(Self {
            objective,
            cost_coefficients,
            constraints: DenseMatrix::from_rows(rows),
            constraint_types,
            right_hand_sides,
        })
    }

    /// Create a standard-form program: all constraints of the `<=` type.
    ///
    /// This is the input shape the core simplex method accepts directly.
    pub fn standard_form(
        objective: Objective,
        cost_coefficients: Vec<f64>,
        rows: Vec<Vec<f64>>,
        right_hand_sides: Vec<f64>,
    ) -> Result<Self, InvalidInput> {
        let constraint_types = vec![ConstraintType::Less; rows.len()];
        Self::new(objective, cost_coefficients, rows, constraint_types, right_hand_sides)
    }

    /// Whether all constraints are `<=` with a non-negative right-hand side.
    pub fn is_standard_form(&self) -> bool {
        self.constraint_types.iter().all(|&relation| relation == ConstraintType::Less)
            && self.right_hand_sides.iter().all(|&value| value >= 0_f64)
    }

    /// Derive the sub-problem with an extra bound on a single variable.
    ///
    /// # Arguments
    ///
    /// * `variable`: Index of the variable to bound.
    /// * `direction`: `Lower` adds `x_variable >= bound`, `Upper` adds `x_variable <= bound`.
    /// * `bound`: Value of the bound.
    ///
    /// # Return value
    ///
    /// A clone of this program with one extra constraint row.
    pub fn with_variable_bound(&self, variable: usize, direction: BoundDirection, bound: f64) -> Self {
        debug_assert!(variable < self.nr_variables());

        let mut row = vec![0_f64; self.nr_variables()];
        row[variable] = 1_f64;

        let mut derived = self.clone();
        derived.constraints.push_row(row);
        derived.constraint_types.push(match direction {
            BoundDirection::Lower => ConstraintType::Greater,
            BoundDirection::Upper => ConstraintType::Less,
        });
        derived.right_hand_sides.push(bound);
        derived
    }

    /// Value of the objective function at a point.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.nr_variables());

        self.cost_coefficients.iter()
            .zip(values)
            .map(|(coefficient, value)| coefficient * value)
            .sum()
    }

    /// Whether a point satisfies all constraints and the non-negativity of the variables.
    ///
    /// # Arguments
    ///
    /// * `values`: One value per decision variable.
    /// * `tolerance`: Absolute slack permitted on each relation, absorbing float round-off.
    pub fn is_feasible_point(&self, values: &[f64], tolerance: f64) -> bool {
        debug_assert_eq!(values.len(), self.nr_variables());

        if values.iter().any(|&value| value < -tolerance) {
            return false;
        }

        (0..self.nr_constraints()).all(|i| {
            let activity: f64 = self.constraints.row(i)
                .zip(values)
                .map(|(coefficient, value)| coefficient * value)
                .sum();
            let rhs = self.right_hand_sides[i];
            match self.constraint_types[i] {
                ConstraintType::Less => activity <= rhs + tolerance,
                ConstraintType::Greater => activity >= rhs - tolerance,
                ConstraintType::Equal => (activity - rhs).abs() <= tolerance,
            }
        })
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Coefficients of the objective function.
    pub fn cost_coefficients(&self) -> &[f64] {
        &self.cost_coefficients
    }

    /// The constraint coefficient matrix.
    pub fn constraints(&self) -> &DenseMatrix {
        &self.constraints
    }

    /// Relation per constraint row.
    pub fn constraint_types(&self) -> &[ConstraintType] {
        &self.constraint_types
    }

    /// Constraint values.
    pub fn right_hand_sides(&self) -> &[f64] {
        &self.right_hand_sides
    }

    /// Number of decision variables.
    pub fn nr_variables(&self) -> usize {
        self.cost_coefficients.len()
    }

    /// Number of constraints.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.nr_rows()
    }
}
