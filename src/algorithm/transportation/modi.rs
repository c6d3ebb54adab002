//! # The MODI optimality-improvement loop
//!
//! The modified-distribution method turns any basic feasible solution into an optimal one. The
//! basic cells of an m x n allocation form a spanning tree over the m row nodes and n column
//! nodes; from that tree the row and column potentials follow, and with them the opportunity
//! cost of every non-basic cell. A negative opportunity cost admits an improving reallocation
//! around the unique basic-cell loop through that cell.
use itertools::iproduct;
use log::{debug, trace};

use crate::algorithm::{SolveError, SolveOptions};
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::transportation::{Allocation, TransportationProblem};

/// Improve a basic feasible solution to optimality.
///
/// # Arguments
///
/// * `problem`: A balanced transportation problem (obtain one through
///   [`TransportationProblem::balanced`]).
/// * `allocation`: A basic feasible solution for `problem`, as produced by one of the initial
///   solution builders. A deficient basis is repaired by inserting degenerate zero cells before
///   the first improvement step.
/// * `options`: Tolerance and the improvement step cap.
///
/// # Return value
///
/// The optimal allocation: every non-basic cell has a non-negative opportunity cost, and the
/// total cost never exceeds that of the provided starting solution.
pub fn optimize(
    problem: &TransportationProblem,
    allocation: Allocation,
    options: &SolveOptions,
) -> Result<Allocation, SolveError> {
    debug_assert!(problem.is_balanced(options.tolerance));

    let nr_sources = problem.nr_sources();
    let nr_destinations = problem.nr_destinations();
    let costs = problem.costs();

    let mut quantities = allocation.quantities().clone();
    let mut basic = allocation.basic().to_vec();
    repair_basis(&mut basic, nr_sources, nr_destinations);

    let mut steps = 0;
    loop {
        let (u, v) = potentials(costs, &basic, nr_sources, nr_destinations);

        // Entering cell: the most negative opportunity cost, ties resolved by the row-major
        // scan order.
        let mut entering: Option<((usize, usize), f64)> = None;
        for (i, j) in iproduct!(0..nr_sources, 0..nr_destinations) {
            if basic.contains(&(i, j)) {
                continue;
            }
            let opportunity_cost = costs.get(i, j) - u[i] - v[j];
            if opportunity_cost < -options.tolerance {
                match entering {
                    Some((_, existing)) if opportunity_cost >= existing => {},
                    _ => entering = Some(((i, j), opportunity_cost)),
                }
            }
        }

        let Some(((enter_row, enter_column), opportunity_cost)) = entering else {
            debug!("modi: optimal after {} improvement steps", steps);
            return Ok(Allocation::new(quantities, basic));
        };
        if steps == options.max_improvements {
            return Err(SolveError::ImprovementLimit(steps));
        }
        steps += 1;

        // The loop through the entering cell: the cell itself plus the tree path from its row
        // to its column. Signs alternate around the loop, starting with '+' at the entering
        // cell.
        let path = tree_path(&basic, nr_sources, nr_destinations, enter_row, enter_column);
        let mut cells = Vec::with_capacity(1 + path.len());
        cells.push((enter_row, enter_column));
        cells.extend(path);
        debug_assert_eq!(cells.len() % 2, 0);

        let mut leaving: Option<(usize, f64)> = None;
        for (position, &(i, j)) in cells.iter().enumerate().skip(1).step_by(2) {
            let quantity = quantities.get(i, j);
            match leaving {
                Some((_, minimum)) if quantity >= minimum => {},
                _ => leaving = Some((position, quantity)),
            }
        }
        let (leaving_position, shift) = match leaving {
            Some(found) => found,
            // A loop alternates, so it always contains at least one '-' cell.
            None => unreachable!("basic-cell loop without a leaving candidate"),
        };

        trace!(
            "modi step {}: ({}, {}) enters at opportunity cost {}, shifting {}",
            steps, enter_row, enter_column, opportunity_cost, shift,
        );

        for (position, &(i, j)) in cells.iter().enumerate() {
            let current = quantities.get(i, j);
            if position % 2 == 0 {
                quantities.set(i, j, current + shift);
            } else {
                quantities.set(i, j, current - shift);
            }
        }
        let leaving_cell = cells[leaving_position];
        quantities.set(leaving_cell.0, leaving_cell.1, 0_f64);
        basic.retain(|&cell| cell != leaving_cell);
        basic.push((enter_row, enter_column));
    }
}

/// Row and column potentials for a spanning basis.
///
/// Fixes `u[0] = 0` and propagates `u_i + v_j = cost_ij` over the basic cells by traversing the
/// basis tree outward from row 0.
fn potentials(
    costs: &DenseMatrix,
    basic: &[(usize, usize)],
    nr_sources: usize,
    nr_destinations: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut u = vec![None; nr_sources];
    let mut v = vec![None; nr_destinations];
    u[0] = Some(0_f64);

    // Node identifiers: rows are 0..m, columns are m..m+n.
    let mut queue = vec![0];
    while let Some(node) = queue.pop() {
        for &(i, j) in basic {
            if node < nr_sources && i == node && v[j].is_none() {
                v[j] = Some(costs.get(i, j) - u[i].unwrap());
                queue.push(nr_sources + j);
            } else if node >= nr_sources && j == node - nr_sources && u[i].is_none() {
                u[i] = Some(costs.get(i, j) - v[j].unwrap());
                queue.push(i);
            }
        }
    }

    debug_assert!(u.iter().all(Option::is_some));
    debug_assert!(v.iter().all(Option::is_some));
    (
        u.into_iter().map(|value| value.unwrap_or(0_f64)).collect(),
        v.into_iter().map(|value| value.unwrap_or(0_f64)).collect(),
    )
}

/// The basic cells on the tree path from a row node to a column node.
///
/// The basis is a spanning tree, so the path exists and is unique. Cells are returned in path
/// order starting at the row side, which is exactly the '-', '+', ..., '-' alternation the
/// reallocation needs after the entering cell.
fn tree_path(
    basic: &[(usize, usize)],
    nr_sources: usize,
    nr_destinations: usize,
    from_row: usize,
    to_column: usize,
) -> Vec<(usize, usize)> {
    let target = nr_sources + to_column;
    let mut parent: Vec<Option<(usize, (usize, usize))>> = vec![None; nr_sources + nr_destinations];
    let mut visited = vec![false; parent.len()];
    visited[from_row] = true;
    let mut queue = std::collections::VecDeque::from([from_row]);

    while let Some(node) = queue.pop_front() {
        if node == target {
            break;
        }
        for &(i, j) in basic {
            let (a, b) = (i, nr_sources + j);
            let next = if a == node { Some(b) } else if b == node { Some(a) } else { None };
            if let Some(next) = next {
                if !visited[next] {
                    visited[next] = true;
                    parent[next] = Some((node, (i, j)));
                    queue.push_back(next);
                }
            }
        }
    }

    let mut path = Vec::new();
    let mut node = target;
    while node != from_row {
        let (previous, cell) = match parent[node] {
            Some(found) => found,
            // The basis spans all nodes, so the target is always reached.
            None => unreachable!("no path through the basis tree"),
        };
        path.push(cell);
        node = previous;
    }
    path.reverse();
    path
}

/// Make the basic set a spanning tree of the row/column node graph.
///
/// Cells that would close a cycle are dropped, then zero-allocation cells are inserted in
/// row-major order at positions that join two distinct components, until exactly m + n - 1
/// cells remain. The builders of this crate always deliver a spanning basis, but a caller may
/// hand `optimize` an arbitrary one.
fn repair_basis(basic: &mut Vec<(usize, usize)>, nr_sources: usize, nr_destinations: usize) {
    let mut components = UnionFind::new(nr_sources + nr_destinations);

    basic.retain(|&(i, j)| components.union(i, nr_sources + j));

    if basic.len() < nr_sources + nr_destinations - 1 {
        for (i, j) in iproduct!(0..nr_sources, 0..nr_destinations) {
            if components.union(i, nr_sources + j) {
                basic.push((i, j));
                if basic.len() == nr_sources + nr_destinations - 1 {
                    break;
                }
            }
        }
    }

    debug_assert_eq!(basic.len(), nr_sources + nr_destinations - 1);
}

/// Disjoint sets over node indices, with path halving.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self { parent: (0..size).collect() }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Join the sets of two nodes. Returns whether they were distinct.
    fn union(&mut self, left: usize, right: usize) -> bool {
        let left = self.find(left);
        let right = self.find(right);
        if left == right {
            return false;
        }
        self.parent[left] = right;
        true
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::SolveOptions;
    use crate::algorithm::transportation::initial::build;
    use crate::algorithm::transportation::InitialMethod;
    use crate::algorithm::transportation::modi::{optimize, potentials, repair_basis};
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::transportation::Allocation;
    use crate::tests::problem_2;

    #[test]
    fn improves_northwest_corner_solution() {
        let problem = problem_2::transportation_problem();
        let initial = build(&problem, InitialMethod::NorthwestCorner, 1e-9);
        let initial_cost = initial.total_cost(problem.costs());

        let optimal = optimize(&problem, initial, &SolveOptions::default()).unwrap();
        let optimal_cost = optimal.total_cost(problem.costs());

        assert_eq!(optimal_cost, 380_f64);
        assert!(optimal_cost <= initial_cost);
        assert_eq!(optimal.row_sums(), problem.supply());
        assert_eq!(optimal.column_sums(), problem.demand());
    }

    #[test]
    fn recognizes_optimal_input() {
        let problem = problem_2::transportation_problem();
        let initial = build(&problem, InitialMethod::Vogel, 1e-9);

        let optimal = optimize(&problem, initial.clone(), &SolveOptions::default()).unwrap();
        assert_eq!(optimal.total_cost(problem.costs()), initial.total_cost(problem.costs()));
    }

    #[test]
    fn no_negative_opportunity_cost_remains() {
        let problem = problem_2::transportation_problem();
        let initial = build(&problem, InitialMethod::NorthwestCorner, 1e-9);
        let optimal = optimize(&problem, initial, &SolveOptions::default()).unwrap();

        let (u, v) = potentials(
            problem.costs(),
            optimal.basic(),
            problem.nr_sources(),
            problem.nr_destinations(),
        );
        for i in 0..problem.nr_sources() {
            for j in 0..problem.nr_destinations() {
                if !optimal.basic().contains(&(i, j)) {
                    assert!(problem.costs().get(i, j) - u[i] - v[j] >= -1e-9);
                }
            }
        }
    }

    #[test]
    fn handles_degenerate_basis() {
        let problem = problem_2::degenerate_transportation_problem();
        let initial = build(&problem, InitialMethod::NorthwestCorner, 1e-9);
        let optimal = optimize(&problem, initial, &SolveOptions::default()).unwrap();

        assert_eq!(optimal.row_sums(), problem.supply());
        assert_eq!(optimal.column_sums(), problem.demand());
        // Diagonal costs are cheapest, so the identity allocation is optimal.
        assert_eq!(optimal.total_cost(problem.costs()), 1_f64 * 10_f64 + 4_f64 * 20_f64);
    }

    #[test]
    fn repairs_deficient_basis() {
        // Two positive cells only; the spanning basis needs 3.
        let quantities = DenseMatrix::from_rows(vec![
            vec![10_f64, 0_f64],
            vec![0_f64, 20_f64],
        ]);
        let allocation = Allocation::new(quantities, vec![(0, 0), (1, 1)]);
        let mut basic = allocation.basic().to_vec();
        repair_basis(&mut basic, 2, 2);

        assert_eq!(basic.len(), 3);
        // The first row-major independent cell is inserted.
        assert!(basic.contains(&(0, 1)));

        let problem = problem_2::degenerate_transportation_problem();
        let optimal = optimize(&problem, allocation, &SolveOptions::default()).unwrap();
        assert_eq!(optimal.row_sums(), problem.supply());
        assert_eq!(optimal.column_sums(), problem.demand());
    }
}
