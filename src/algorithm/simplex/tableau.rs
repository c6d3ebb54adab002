//! # Data structures for Simplex
//!
//! Contains the simplex tableau and the elementary operations which can be performed upon it.
//! The tableau is dense: the objective row is the last row, the right-hand side the last column.
use crate::data::linear_algebra::matrix::DenseMatrix;

/// The most high-level data structure that is used by the simplex method: the simplex tableau.
///
/// It owns the matrix of the problem relative to the current basis, and the mapping describing
/// that basis. The problem it was built from is always a maximization; minimized problems are
/// negated by the constructors and negated back on extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    /// Matrix of size (nr_constraints + 1) x (nr_columns + 1).
    ///
    /// The last row holds the reduced costs and, in its last entry, the current objective value.
    /// This attribute changes with a basis change.
    matrix: DenseMatrix,
    /// Maps the rows to the column containing its pivot.
    ///
    /// This attribute changes with a basis change.
    basis: Vec<usize>,
    /// Number of decision variables of the original problem.
    nr_decision: usize,
    /// Number of slack and surplus columns.
    nr_slack: usize,
    /// Number of artificial columns. Zero unless built through the Big-M path.
    nr_artificial: usize,
}

impl Tableau {
    /// Create a tableau from prepared rows.
    ///
    /// # Arguments
    ///
    /// * `matrix`: Full tableau matrix, objective row last, right-hand side column last. All
    ///   constraint rows need a non-negative right-hand side.
    /// * `basis`: Column of the basic variable per constraint row; the corresponding sub-matrix
    ///   needs to be the identity.
    /// * `nr_decision`, `nr_slack`, `nr_artificial`: Column counts per variable group, in column
    ///   order.
    pub(crate) fn new(
        matrix: DenseMatrix,
        basis: Vec<usize>,
        nr_decision: usize,
        nr_slack: usize,
        nr_artificial: usize,
    ) -> Self {
        debug_assert_eq!(matrix.nr_rows(), basis.len() + 1);
        debug_assert_eq!(matrix.nr_columns(), nr_decision + nr_slack + nr_artificial + 1);
        debug_assert!((0..basis.len()).all(|i| matrix.get(i, matrix.nr_columns() - 1) >= 0_f64));

        Self { matrix, basis, nr_decision, nr_slack, nr_artificial }
    }

    /// Calculates the relative cost of a column.
    ///
    /// A negative value signals that bringing the column into the basis improves the objective.
    pub fn relative_cost(&self, j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.matrix.get(self.nr_rows(), j)
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, j: usize) -> bool {
        debug_assert!(j < self.nr_columns());

        self.basis.contains(&j)
    }

    /// Determine the row to pivot on, given the entering column.
    ///
    /// This is the row with the minimal ratio between the constraint value and the positive
    /// entries of the column. Ties are broken by the smallest row index, which prevents cycling
    /// on degenerate tableaus.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the problem is unbounded in this direction.
    pub fn select_pivot_row(&self, pivot_column: usize, tolerance: f64) -> Option<usize> {
        debug_assert!(pivot_column < self.nr_columns());

        let mut minimum: Option<(usize, f64)> = None;
        for row in 0..self.nr_rows() {
            let coefficient = self.matrix.get(row, pivot_column);
            if coefficient > tolerance {
                let ratio = self.constraint_value(row) / coefficient;
                match minimum {
                    Some((_, minimum_ratio)) if ratio >= minimum_ratio => {},
                    _ => minimum = Some((row, ratio)),
                }
            }
        }

        minimum.map(|(row, _)| row)
    }

    /// Brings a column into the basis.
    ///
    /// Normalizes the pivot row and eliminates the entering column from all other rows, the
    /// objective row included.
    pub fn bring_into_basis(&mut self, pivot_column: usize, pivot_row: usize) {
        debug_assert!(pivot_column < self.nr_columns());
        debug_assert!(pivot_row < self.nr_rows());
        debug_assert!(self.matrix.get(pivot_row, pivot_column).abs() > 0_f64);

        let pivot_value = self.matrix.get(pivot_row, pivot_column);
        self.matrix.multiply_row(pivot_row, 1_f64 / pivot_value);
        // The division can leave the pivot at 1 +- epsilon; pin it.
        self.matrix.set(pivot_row, pivot_column, 1_f64);

        for row in 0..self.matrix.nr_rows() {
            if row != pivot_row {
                let factor = self.matrix.get(row, pivot_column);
                if factor != 0_f64 {
                    self.matrix.mul_add_rows(pivot_row, row, -factor);
                    self.matrix.set(row, pivot_column, 0_f64);
                }
            }
        }

        self.basis[pivot_row] = pivot_column;
    }

    /// Get the current constraint value of a row.
    pub fn constraint_value(&self, row: usize) -> f64 {
        debug_assert!(row < self.nr_rows());

        self.matrix.get(row, self.nr_columns())
    }

    /// Get the cost of the current solution.
    ///
    /// This is the value of the maximization the tableau was normalized to; callers that
    /// negated a minimization negate this value back.
    pub fn objective_function_value(&self) -> f64 {
        self.matrix.get(self.nr_rows(), self.nr_columns())
    }

    /// Values of the decision variables in the current basic solution.
    ///
    /// Slack, surplus and artificial values are discarded.
    pub fn decision_values(&self) -> Vec<f64> {
        let mut values = vec![0_f64; self.nr_decision];
        for (row, &column) in self.basis.iter().enumerate() {
            if column < self.nr_decision {
                values[column] = self.constraint_value(row);
            }
        }
        values
    }

    /// Whether any artificial variable is in the basis at a value above `tolerance`.
    ///
    /// For a feasible problem, all artificial variables are driven out of the basis (or to zero)
    /// at optimality of the penalized problem.
    pub fn has_artificial_at_positive_level(&self, tolerance: f64) -> bool {
        let artificial_start = self.nr_decision + self.nr_slack;
        self.basis.iter()
            .enumerate()
            .any(|(row, &column)| {
                column >= artificial_start && self.constraint_value(row) > tolerance
            })
    }

    /// Number of constraint rows.
    pub fn nr_rows(&self) -> usize {
        self.basis.len()
    }

    /// Number of variable columns, the right-hand side excluded.
    pub fn nr_columns(&self) -> usize {
        self.nr_decision + self.nr_slack + self.nr_artificial
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::algorithm::simplex::tableau::Tableau;

    /// max 3x + 2y s.t. 2x + y <= 8, x + 2y <= 6.
    fn tableau() -> Tableau {
        let matrix = DenseMatrix::from_rows(vec![
            vec![2_f64, 1_f64, 1_f64, 0_f64, 8_f64],
            vec![1_f64, 2_f64, 0_f64, 1_f64, 6_f64],
            vec![-3_f64, -2_f64, 0_f64, 0_f64, 0_f64],
        ]);
        Tableau::new(matrix, vec![2, 3], 2, 2, 0)
    }

    #[test]
    fn initial_state() {
        let tableau = tableau();
        assert_eq!(tableau.relative_cost(0), -3_f64);
        assert_eq!(tableau.objective_function_value(), 0_f64);
        assert!(tableau.is_in_basis(2));
        assert!(!tableau.is_in_basis(0));
        assert_eq!(tableau.decision_values(), vec![0_f64, 0_f64]);
    }

    #[test]
    fn select_pivot_row() {
        let tableau = tableau();
        // Ratios 8 / 2 = 4 and 6 / 1 = 6.
        assert_eq!(tableau.select_pivot_row(0, 1e-9), Some(0));
        // Ratios 8 / 1 = 8 and 6 / 2 = 3.
        assert_eq!(tableau.select_pivot_row(1, 1e-9), Some(1));
    }

    #[test]
    fn bring_into_basis() {
        let mut tableau = tableau();
        tableau.bring_into_basis(0, 0);

        assert!(tableau.is_in_basis(0));
        assert!(!tableau.is_in_basis(2));
        assert_eq!(tableau.objective_function_value(), 12_f64);
        assert_eq!(tableau.decision_values(), vec![4_f64, 0_f64]);
        // The second constraint keeps a non-negative right-hand side.
        assert_eq!(tableau.constraint_value(1), 2_f64);
    }

    #[test]
    fn unbounded_direction() {
        let matrix = DenseMatrix::from_rows(vec![
            vec![-1_f64, 1_f64, 1_f64, 0_f64, 1_f64],
            vec![-2_f64, 0_f64, 0_f64, 1_f64, 2_f64],
            vec![-1_f64, -1_f64, 0_f64, 0_f64, 0_f64],
        ]);
        let tableau = Tableau::new(matrix, vec![2, 3], 2, 2, 0);

        assert_eq!(tableau.select_pivot_row(0, 1e-9), None);
    }
}
