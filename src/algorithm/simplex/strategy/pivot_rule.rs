//! # Pivot rules
//!
//! Strategies for choosing the column entering the basis. Both rules provided here are
//! deterministic; combined with the smallest-row-index tie-break of the ratio test this keeps
//! every run reproducible and free of cycling.
use crate::algorithm::simplex::tableau::Tableau;

/// Deciding how to pivot.
///
/// During the simplex method, one needs to decide which column enters the basis on each
/// iteration. The pivot rule describes that behavior.
///
/// Once the column has been selected, the row is found through the minimum-ratio test. That
/// decision is made independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal simplex method.
    ///
    /// # Return value
    ///
    /// Index of a non-basic column with a reduced cost below `-tolerance`, or `None` if no such
    /// column exists and the tableau is optimal.
    fn select_pivot_column(&mut self, tableau: &Tableau, tolerance: f64) -> Option<usize>;
}

/// Simply pivot on the first column which has a negative relative cost.
///
/// Also known as Bland's rule; guarantees termination even on degenerate problems.
pub struct FirstProfitable;

impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_pivot_column(&mut self, tableau: &Tableau, tolerance: f64) -> Option<usize> {
        (0..tableau.nr_columns())
            .filter(|&column| !tableau.is_in_basis(column))
            .find(|&column| tableau.relative_cost(column) < -tolerance)
    }
}

/// Pivot on the column which has the most negative relative cost.
///
/// The default rule. Ties are broken by the smallest column index, so the selection is
/// deterministic.
pub struct MostNegative;

impl PivotRule for MostNegative {
    fn new() -> Self {
        Self
    }

    fn select_pivot_column(&mut self, tableau: &Tableau, tolerance: f64) -> Option<usize> {
        let mut smallest: Option<(usize, f64)> = None;
        for column in 0..tableau.nr_columns() {
            if tableau.is_in_basis(column) {
                continue;
            }
            let cost = tableau.relative_cost(column);
            if cost < -tolerance {
                match smallest {
                    Some((_, existing)) if cost >= existing => {},
                    _ => smallest = Some((column, cost)),
                }
            }
        }

        smallest.map(|(column, _)| column)
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, MostNegative, PivotRule};
    use crate::algorithm::simplex::tableau::Tableau;
    use crate::data::linear_algebra::matrix::DenseMatrix;

    fn tableau() -> Tableau {
        let matrix = DenseMatrix::from_rows(vec![
            vec![2_f64, 1_f64, 1_f64, 0_f64, 8_f64],
            vec![1_f64, 2_f64, 0_f64, 1_f64, 6_f64],
            vec![-2_f64, -3_f64, 0_f64, 0_f64, 0_f64],
        ]);
        Tableau::new(matrix, vec![2, 3], 2, 2, 0)
    }

    #[test]
    fn find_profitable_column() {
        let mut rule = FirstProfitable::new();
        assert_eq!(rule.select_pivot_column(&tableau(), 1e-9), Some(0));

        let mut rule = MostNegative::new();
        assert_eq!(rule.select_pivot_column(&tableau(), 1e-9), Some(1));
    }

    #[test]
    fn optimal_tableau_has_no_candidate() {
        let matrix = DenseMatrix::from_rows(vec![
            vec![1_f64, 1_f64, 0_f64, 4_f64],
            vec![0_f64, 1_f64, 1_f64, 2_f64],
            vec![0_f64, 2_f64, 0_f64, 12_f64],
        ]);
        let tableau = Tableau::new(matrix, vec![0, 2], 2, 1, 0);

        let mut rule = MostNegative::new();
        assert_eq!(rule.select_pivot_column(&tableau, 1e-9), None);
        let mut rule = FirstProfitable::new();
        assert_eq!(rule.select_pivot_column(&tableau, 1e-9), None);
    }
}
