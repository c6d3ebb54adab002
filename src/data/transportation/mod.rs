//! # Transportation problems
//!
//! A transportation problem ships units from sources to destinations at a cost per unit per
//! route. The model here covers the problem description, balancing of unequal supply and demand
//! through a zero-cost dummy line, and the allocation matrices the solvers produce.
use crate::data::error::InvalidInput;
use crate::data::linear_algebra::matrix::DenseMatrix;

/// A transportation problem: a cost matrix with a supply per row and a demand per column.
///
/// Validated at construction; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationProblem {
    /// Cost per unit shipped, sources as rows and destinations as columns.
    costs: DenseMatrix,
    /// Units available per source.
    supply: Vec<f64>,
    /// Units required per destination.
    demand: Vec<f64>,
}

/// Which dummy line was inserted to balance a problem, if any.
///
/// The dummy participates in solving but is trimmed from reported allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// The problem was balanced as provided.
    None,
    /// A zero-cost source row absorbing excess demand.
    Source,
    /// A zero-cost destination column absorbing excess supply.
    Destination,
}

impl TransportationProblem {
    /// Create a new transportation problem, validating dimensions and signs.
    ///
    /// # Arguments
    ///
    /// * `costs`: m x n cost matrix, all values non-negative.
    /// * `supply`: m non-negative values.
    /// * `demand`: n non-negative values.
    pub fn new(
        costs: Vec<Vec<f64>>,
        supply: Vec<f64>,
        demand: Vec<f64>,
    ) -> Result<Self, InvalidInput> {
        if costs.is_empty() || costs[0].is_empty() {
            return Err(InvalidInput::Empty("no sources or no destinations"));
        }

        let nr_destinations = costs[0].len();
        for row in &costs {
            if row.len() != nr_destinations {
                return Err(InvalidInput::DimensionMismatch {
                    quantity: "cost row",
                    expected: nr_destinations,
                    found: row.len(),
                });
            }
        }
        if supply.len() != costs.len() {
            return Err(InvalidInput::DimensionMismatch {
                quantity: "supply",
                expected: costs.len(),
                found: supply.len(),
            });
        }
        if demand.len() != nr_destinations {
            return Err(InvalidInput::DimensionMismatch {
                quantity: "demand",
                expected: nr_destinations,
                found: demand.len(),
            });
        }

        let all_finite = costs.iter().flatten()
            .chain(supply.iter())
            .chain(demand.iter())
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(InvalidInput::NonFinite("cost, supply or demand"));
        }
        if costs.iter().flatten().any(|&value| value < 0_f64) {
            return Err(InvalidInput::Negative("cost"));
        }
        if supply.iter().any(|&value| value < 0_f64) {
            return Err(InvalidInput::Negative("supply"));
        }
        if demand.iter().any(|&value| value < 0_f64) {
            return Err(InvalidInput::Negative("demand"));
        }

        Ok(Self { costs: DenseMatrix::from_rows(costs), supply, demand })
    }

    /// Whether total supply equals total demand.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.total_supply() - self.total_demand()).abs() <= tolerance
    }

    /// The balanced equivalent of this problem.
    ///
    /// Unequal totals are reconciled by appending a zero-cost dummy source or destination
    /// carrying the shortfall. Balanced problems are returned as-is.
    ///
    /// # Return value
    ///
    /// The balanced problem and which dummy line was inserted.
    pub fn balanced(&self, tolerance: f64) -> (Self, Dummy) {
        let shortfall = self.total_supply() - self.total_demand();
        if shortfall.abs() <= tolerance {
            return (self.clone(), Dummy::None);
        }

        let mut balanced = self.clone();
        if shortfall > 0_f64 {
            // Excess supply flows to a dummy destination.
            balanced.costs.push_column(vec![0_f64; balanced.costs.nr_rows()]);
            balanced.demand.push(shortfall);
            (balanced, Dummy::Destination)
        } else {
            balanced.costs.push_row(vec![0_f64; balanced.costs.nr_columns()]);
            balanced.supply.push(-shortfall);
            (balanced, Dummy::Source)
        }
    }

    /// Cost per unit shipped, sources as rows and destinations as columns.
    pub fn costs(&self) -> &DenseMatrix {
        &self.costs
    }

    /// Units available per source.
    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    /// Units required per destination.
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Sum of all supply.
    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    /// Sum of all demand.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Number of sources.
    pub fn nr_sources(&self) -> usize {
        self.costs.nr_rows()
    }

    /// Number of destinations.
    pub fn nr_destinations(&self) -> usize {
        self.costs.nr_columns()
    }
}

/// An allocation of shipments for a transportation problem.
///
/// Next to the shipped quantities the basic cells are tracked explicitly: a basic feasible
/// solution to an m x n problem has exactly m + n - 1 of them, some possibly at a degenerate
/// zero allocation. The improvement loop needs those zero cells to keep its potentials solvable.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Units shipped per route.
    quantities: DenseMatrix,
    /// Cells in the current basis, in the order they entered it.
    basic: Vec<(usize, usize)>,
}

impl Allocation {
    /// Create a new `Allocation` instance.
    pub fn new(quantities: DenseMatrix, basic: Vec<(usize, usize)>) -> Self {
        debug_assert!(basic.iter().all(|&(i, j)| {
            i < quantities.nr_rows() && j < quantities.nr_columns()
        }));

        Self { quantities, basic }
    }

    /// Units shipped per route.
    pub fn quantities(&self) -> &DenseMatrix {
        &self.quantities
    }

    /// Cells in the current basis.
    pub fn basic(&self) -> &[(usize, usize)] {
        &self.basic
    }

    /// Total cost of this allocation under the provided cost matrix.
    pub fn total_cost(&self, costs: &DenseMatrix) -> f64 {
        debug_assert_eq!(costs.nr_rows(), self.quantities.nr_rows());
        debug_assert_eq!(costs.nr_columns(), self.quantities.nr_columns());

        self.basic.iter()
            .map(|&(i, j)| costs.get(i, j) * self.quantities.get(i, j))
            .sum()
    }

    /// Units leaving each source.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.quantities.nr_rows()).map(|i| self.quantities.row_sum(i)).collect()
    }

    /// Units arriving at each destination.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.quantities.nr_columns()).map(|j| self.quantities.column_sum(j)).collect()
    }

    /// All routes with a positive shipment, as (source, destination, quantity).
    pub fn shipments(&self) -> Vec<(usize, usize, f64)> {
        let mut routes = self.basic.iter()
            .map(|&(i, j)| (i, j, self.quantities.get(i, j)))
            .filter(|&(_, _, quantity)| quantity > 0_f64)
            .collect::<Vec<_>>();
        routes.sort_by_key(|&(i, j, _)| (i, j));
        routes
    }

    /// Remove the dummy line, if one was inserted during balancing.
    pub(crate) fn without_dummy(self, dummy: Dummy) -> Self {
        let mut data = self.quantities.into_data();
        let (nr_rows, nr_columns) = match dummy {
            Dummy::None => return Self {
                quantities: DenseMatrix::from_rows(data),
                basic: self.basic,
            },
            Dummy::Source => {
                data.pop();
                (data.len(), data[0].len())
            },
            Dummy::Destination => {
                for row in data.iter_mut() {
                    row.pop();
                }
                (data.len(), data[0].len())
            },
        };

        let basic = self.basic.into_iter()
            .filter(|&(i, j)| i < nr_rows && j < nr_columns)
            .collect();
        Self {
            quantities: DenseMatrix::from_rows(data),
            basic,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::error::InvalidInput;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::transportation::{Allocation, Dummy, TransportationProblem};

    #[test]
    fn validation() {
        let result = TransportationProblem::new(
            vec![vec![1_f64, 2_f64], vec![3_f64]],
            vec![1_f64, 1_f64],
            vec![1_f64, 1_f64],
        );
        assert!(matches!(result, Err(InvalidInput::DimensionMismatch { .. })));

        let result = TransportationProblem::new(
            vec![vec![1_f64, 2_f64]],
            vec![-1_f64],
            vec![1_f64, 1_f64],
        );
        assert_eq!(result, Err(InvalidInput::Negative("supply")));

        let result = TransportationProblem::new(
            vec![vec![1_f64, -2_f64]],
            vec![1_f64],
            vec![1_f64, 1_f64],
        );
        assert_eq!(result, Err(InvalidInput::Negative("cost")));
    }

    #[test]
    fn balancing() {
        let problem = TransportationProblem::new(
            vec![vec![1_f64, 2_f64], vec![3_f64, 4_f64]],
            vec![20_f64, 30_f64],
            vec![10_f64, 25_f64],
        ).unwrap();
        assert!(!problem.is_balanced(1e-9));

        let (balanced, dummy) = problem.balanced(1e-9);
        assert_eq!(dummy, Dummy::Destination);
        assert_eq!(balanced.nr_destinations(), 3);
        assert_eq!(balanced.demand()[2], 15_f64);
        assert_eq!(balanced.costs().get(1, 2), 0_f64);
        assert!(balanced.is_balanced(1e-9));

        let problem = TransportationProblem::new(
            vec![vec![1_f64, 2_f64]],
            vec![10_f64],
            vec![10_f64, 5_f64],
        ).unwrap();
        let (balanced, dummy) = problem.balanced(1e-9);
        assert_eq!(dummy, Dummy::Source);
        assert_eq!(balanced.nr_sources(), 2);
        assert_eq!(balanced.supply()[1], 5_f64);
    }

    #[test]
    fn allocation_properties() {
        let quantities = DenseMatrix::from_rows(vec![
            vec![10_f64, 0_f64],
            vec![5_f64, 25_f64],
        ]);
        let allocation = Allocation::new(quantities, vec![(0, 0), (1, 0), (1, 1)]);

        let costs = DenseMatrix::from_rows(vec![
            vec![4_f64, 6_f64],
            vec![6_f64, 5_f64],
        ]);
        assert_eq!(allocation.total_cost(&costs), 10_f64 * 4_f64 + 5_f64 * 6_f64 + 25_f64 * 5_f64);
        assert_eq!(allocation.row_sums(), vec![10_f64, 30_f64]);
        assert_eq!(allocation.column_sums(), vec![15_f64, 25_f64]);
        assert_eq!(allocation.shipments(), vec![(0, 0, 10_f64), (1, 0, 5_f64), (1, 1, 25_f64)]);
    }

    #[test]
    fn dummy_trimming() {
        let quantities = DenseMatrix::from_rows(vec![
            vec![10_f64, 5_f64],
            vec![0_f64, 15_f64],
        ]);
        let allocation = Allocation::new(quantities, vec![(0, 0), (0, 1), (1, 1)]);

        let trimmed = allocation.without_dummy(Dummy::Destination);
        assert_eq!(trimmed.quantities().nr_columns(), 1);
        assert_eq!(trimmed.basic(), &[(0, 0)]);

        let quantities = DenseMatrix::from_rows(vec![
            vec![10_f64, 5_f64],
            vec![0_f64, 15_f64],
        ]);
        let allocation = Allocation::new(quantities, vec![(0, 0), (0, 1), (1, 1)]);
        let trimmed = allocation.without_dummy(Dummy::Source);
        assert_eq!(trimmed.quantities().nr_rows(), 1);
        assert_eq!(trimmed.basic(), &[(0, 0), (0, 1)]);
    }
}
