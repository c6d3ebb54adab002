//! # Initial basic feasible solutions
//!
//! The three classic builders differ only in which cell they allocate to next; the surrounding
//! loop is shared. Each step allocates `min(remaining supply, remaining demand)` at the selected
//! cell and then retires exactly one line (row or column). Retiring one line per step is what
//! guarantees exactly m + n - 1 basic cells on a balanced problem, degenerate zero allocations
//! included, which is the basis size the improvement loop requires.
use itertools::iproduct;
use log::debug;

use crate::algorithm::transportation::InitialMethod;
use crate::algorithm::utilities::is_zero;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::transportation::{Allocation, TransportationProblem};

/// Progress of a builder over a balanced problem.
///
/// Selection rules only see uncovered lines: rows and columns that have not been retired yet.
pub(crate) struct Progress<'a> {
    costs: &'a DenseMatrix,
    supply: Vec<f64>,
    demand: Vec<f64>,
    row_covered: Vec<bool>,
    column_covered: Vec<bool>,
}

impl Progress<'_> {
    fn uncovered_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.supply.len()).filter(|&i| !self.row_covered[i])
    }

    fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.demand.len()).filter(|&j| !self.column_covered[j])
    }

    fn uncovered_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        iproduct!(0..self.supply.len(), 0..self.demand.len())
            .filter(|&(i, j)| !self.row_covered[i] && !self.column_covered[j])
    }

    /// The two smallest uncovered costs of a line determine its Vogel penalty; a line with a
    /// single uncovered cost left has that cost as its penalty.
    fn penalty(&self, costs: impl Iterator<Item = f64>) -> Option<f64> {
        let mut smallest: Option<f64> = None;
        let mut second: Option<f64> = None;
        for cost in costs {
            match smallest {
                Some(value) if cost >= value => match second {
                    Some(other) if cost >= other => {},
                    _ => second = Some(cost),
                },
                _ => {
                    second = smallest;
                    smallest = Some(cost);
                }
            }
        }

        match (smallest, second) {
            (Some(value), Some(other)) => Some(other - value),
            (Some(value), None) => Some(value),
            (None, _) => None,
        }
    }
}

/// Deciding where to allocate next.
pub(crate) trait CellSelector {
    /// Create a new instance.
    fn new() -> Self;

    /// The uncovered cell to allocate at.
    ///
    /// Only called while at least one row and one column are uncovered.
    fn select(&mut self, progress: &Progress) -> (usize, usize);
}

/// Allocate at the top-left uncovered cell.
///
/// The northwest corner rule ignores costs entirely; it is the cheapest builder and the weakest
/// starting point.
pub(crate) struct NorthwestCorner;

impl CellSelector for NorthwestCorner {
    fn new() -> Self {
        Self
    }

    fn select(&mut self, progress: &Progress) -> (usize, usize) {
        let row = progress.uncovered_rows().next();
        let column = progress.uncovered_columns().next();
        match (row, column) {
            (Some(i), Some(j)) => (i, j),
            _ => unreachable!("selection requires an uncovered row and column"),
        }
    }
}

/// Allocate at the uncovered cell with the globally minimal cost.
///
/// Ties are broken by the smallest row, then column index; the row-major scan takes care of
/// that because only strictly cheaper cells replace the current choice.
pub(crate) struct LeastCost;

impl CellSelector for LeastCost {
    fn new() -> Self {
        Self
    }

    fn select(&mut self, progress: &Progress) -> (usize, usize) {
        let mut best: Option<((usize, usize), f64)> = None;
        for (i, j) in progress.uncovered_cells() {
            let cost = progress.costs.get(i, j);
            match best {
                Some((_, existing)) if cost >= existing => {},
                _ => best = Some(((i, j), cost)),
            }
        }

        match best {
            Some((cell, _)) => cell,
            None => unreachable!("selection requires an uncovered cell"),
        }
    }
}

/// Vogel's approximation: allocate where skipping the cheapest option would hurt most.
///
/// Per uncovered line the penalty is the difference between its two smallest uncovered costs.
/// The line with the maximum penalty is selected (ties: rows before columns, then the smallest
/// index) and within it the minimum-cost uncovered cell receives the allocation.
pub(crate) struct VogelApproximation;

impl CellSelector for VogelApproximation {
    fn new() -> Self {
        Self
    }

    fn select(&mut self, progress: &Progress) -> (usize, usize) {
        // (penalty, row?) per line; rows first so that on equal penalties a row wins.
        let mut best: Option<(f64, bool, usize)> = None;
        for i in progress.uncovered_rows() {
            let costs = progress.uncovered_columns().map(|j| progress.costs.get(i, j));
            if let Some(penalty) = progress.penalty(costs) {
                match best {
                    Some((existing, _, _)) if penalty <= existing => {},
                    _ => best = Some((penalty, true, i)),
                }
            }
        }
        for j in progress.uncovered_columns() {
            let costs = progress.uncovered_rows().map(|i| progress.costs.get(i, j));
            if let Some(penalty) = progress.penalty(costs) {
                match best {
                    Some((existing, _, _)) if penalty <= existing => {},
                    _ => best = Some((penalty, false, j)),
                }
            }
        }

        let cheapest_in = |cells: &mut dyn Iterator<Item = (usize, usize)>| -> Option<(usize, usize)> {
            let mut best: Option<((usize, usize), f64)> = None;
            for (i, j) in cells {
                let cost = progress.costs.get(i, j);
                match best {
                    Some((_, existing)) if cost >= existing => {},
                    _ => best = Some(((i, j), cost)),
                }
            }
            best.map(|(cell, _)| cell)
        };

        let cell = match best {
            Some((_, true, i)) => {
                cheapest_in(&mut progress.uncovered_columns().map(|j| (i, j)))
            },
            Some((_, false, j)) => {
                cheapest_in(&mut progress.uncovered_rows().map(|i| (i, j)))
            },
            None => None,
        };

        match cell {
            Some(cell) => cell,
            None => unreachable!("selection requires an uncovered cell"),
        }
    }
}

/// Build an initial basic feasible solution for a balanced problem.
///
/// # Arguments
///
/// * `problem`: A balanced transportation problem.
/// * `method`: Which selection rule drives the allocation order.
/// * `tolerance`: Absolute tolerance deciding when a line counts as exhausted.
///
/// # Return value
///
/// An allocation with exactly m + n - 1 basic cells forming a spanning, cycle-free structure.
pub(crate) fn build(
    problem: &TransportationProblem,
    method: InitialMethod,
    tolerance: f64,
) -> Allocation {
    match method {
        InitialMethod::NorthwestCorner => drive::<NorthwestCorner>(problem, tolerance),
        InitialMethod::LeastCost => drive::<LeastCost>(problem, tolerance),
        InitialMethod::Vogel => drive::<VogelApproximation>(problem, tolerance),
    }
}

fn drive<S: CellSelector>(problem: &TransportationProblem, tolerance: f64) -> Allocation {
    debug_assert!(problem.is_balanced(tolerance));

    let nr_sources = problem.nr_sources();
    let nr_destinations = problem.nr_destinations();
    let mut progress = Progress {
        costs: problem.costs(),
        supply: problem.supply().to_vec(),
        demand: problem.demand().to_vec(),
        row_covered: vec![false; nr_sources],
        column_covered: vec![false; nr_destinations],
    };

    let mut quantities = DenseMatrix::zeros(nr_sources, nr_destinations);
    let mut basic = Vec::with_capacity(nr_sources + nr_destinations - 1);
    let mut selector = S::new();

    while progress.uncovered_rows().next().is_some()
        && progress.uncovered_columns().next().is_some()
    {
        let (i, j) = selector.select(&progress);
        debug_assert!(!progress.row_covered[i] && !progress.column_covered[j]);

        let quantity = progress.supply[i].min(progress.demand[j]);
        quantities.set(i, j, quantity);
        basic.push((i, j));
        progress.supply[i] -= quantity;
        progress.demand[j] -= quantity;

        // Exactly one line is retired per allocation. On simultaneous exhaustion the row is
        // preferred, leaving a zero-demand column to pick up a degenerate zero allocation
        // later; the last uncovered row is the exception, because in a balanced problem all
        // remaining demand is zero at that point and retiring the row would end the loop with
        // too few basic cells.
        let supply_exhausted = is_zero(progress.supply[i], tolerance);
        let last_row = progress.uncovered_rows().count() == 1;
        if supply_exhausted && (progress.demand[j] > tolerance || !last_row) {
            progress.row_covered[i] = true;
        } else {
            progress.column_covered[j] = true;
        }
    }

    debug!(
        "initial solution: {} basic cells for {} x {} problem",
        basic.len(), nr_sources, nr_destinations,
    );
    debug_assert_eq!(basic.len(), nr_sources + nr_destinations - 1);
    Allocation::new(quantities, basic)
}
