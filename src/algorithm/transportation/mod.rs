//! # Transportation solving
//!
//! Initial basic feasible solutions through the northwest corner rule, the least cost method or
//! Vogel's approximation, and optimality through the MODI improvement loop. Unbalanced problems
//! are balanced with a zero-cost dummy line before solving; the dummy never appears in reported
//! allocations.
use std::str::FromStr;

use enum_map::{enum_map, Enum, EnumMap};

use crate::algorithm::{SolveError, SolveOptions};
use crate::data::error::InvalidInput;
use crate::data::transportation::{Allocation, TransportationProblem};

pub(crate) mod initial;
pub mod modi;

pub use modi::optimize;

/// The initial-solution builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum InitialMethod {
    /// Allocate at the top-left uncovered cell; ignores costs.
    NorthwestCorner,
    /// Allocate at the globally cheapest uncovered cell.
    LeastCost,
    /// Allocate by largest regret between the two cheapest options per line.
    Vogel,
}

/// A caller-selected solution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Only build an initial basic feasible solution.
    Initial(InitialMethod),
    /// Build an initial solution with Vogel's approximation, then improve it to optimality.
    Modi,
}

impl FromStr for Method {
    type Err = InvalidInput;

    /// Parse the method names used by callers: `NWCR`, `LCM`, `VAM` or `MODI`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "NWCR" => Ok(Method::Initial(InitialMethod::NorthwestCorner)),
            "LCM" => Ok(Method::Initial(InitialMethod::LeastCost)),
            "VAM" => Ok(Method::Initial(InitialMethod::Vogel)),
            "MODI" => Ok(Method::Modi),
            other => Err(InvalidInput::UnknownMethod(other.to_string())),
        }
    }
}

/// Solve a transportation problem with the selected method.
///
/// # Arguments
///
/// * `problem`: Any transportation problem; balancing happens here.
/// * `method`: An initial-solution builder, or [`Method::Modi`] for a proven-optimal
///   allocation.
/// * `options`: Tolerance and the improvement step cap.
///
/// # Return value
///
/// The allocation in the dimensions of the original problem. Row sums never exceed the supply,
/// column sums never exceed the demand, and exactly `min(total supply, total demand)` units are
/// shipped.
pub fn solve(
    problem: &TransportationProblem,
    method: Method,
    options: &SolveOptions,
) -> Result<Allocation, SolveError> {
    let (balanced, dummy) = problem.balanced(options.tolerance);

    let allocation = match method {
        Method::Initial(builder) => initial::build(&balanced, builder, options.tolerance),
        Method::Modi => {
            let start = initial::build(&balanced, InitialMethod::Vogel, options.tolerance);
            modi::optimize(&balanced, start, options)?
        },
    };

    Ok(allocation.without_dummy(dummy))
}

/// Total cost of each initial-solution builder on a problem.
///
/// The comparison callers usually want to present: how far each heuristic lands from the
/// optimum. Costs are computed against the original cost matrix, dummy lines excluded.
pub fn initial_costs(
    problem: &TransportationProblem,
    options: &SolveOptions,
) -> EnumMap<InitialMethod, f64> {
    let cost_of = |method| {
        let (balanced, dummy) = problem.balanced(options.tolerance);
        let allocation = initial::build(&balanced, method, options.tolerance).without_dummy(dummy);
        allocation.total_cost(problem.costs())
    };

    enum_map! {
        InitialMethod::NorthwestCorner => cost_of(InitialMethod::NorthwestCorner),
        InitialMethod::LeastCost       => cost_of(InitialMethod::LeastCost),
        InitialMethod::Vogel           => cost_of(InitialMethod::Vogel),
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use crate::algorithm::SolveOptions;
    use crate::algorithm::transportation::{initial_costs, solve, InitialMethod, Method};
    use crate::data::error::InvalidInput;
    use crate::tests::problem_2;

    #[test]
    fn method_names() {
        assert_eq!(
            Method::from_str("NWCR"),
            Ok(Method::Initial(InitialMethod::NorthwestCorner)),
        );
        assert_eq!(Method::from_str("LCM"), Ok(Method::Initial(InitialMethod::LeastCost)));
        assert_eq!(Method::from_str("VAM"), Ok(Method::Initial(InitialMethod::Vogel)));
        assert_eq!(Method::from_str("MODI"), Ok(Method::Modi));
        assert_eq!(
            Method::from_str("nwcr"),
            Err(InvalidInput::UnknownMethod("nwcr".to_string())),
        );
    }

    #[test]
    fn modi_never_loses_to_a_builder() {
        let problem = problem_2::transportation_problem();
        let options = SolveOptions::default();

        let optimal = solve(&problem, Method::Modi, &options).unwrap();
        let optimal_cost = optimal.total_cost(problem.costs());

        for (_, cost) in initial_costs(&problem, &options) {
            assert!(optimal_cost <= cost);
        }
        assert_eq!(optimal_cost, 380_f64);
    }

    #[test]
    fn builder_cost_comparison() {
        let problem = problem_2::transportation_problem();
        let costs = initial_costs(&problem, &SolveOptions::default());

        assert_eq!(costs[InitialMethod::NorthwestCorner], 410_f64);
        assert_eq!(costs[InitialMethod::LeastCost], 380_f64);
        assert_eq!(costs[InitialMethod::Vogel], 380_f64);
    }

    #[test]
    fn unbalanced_problem_gets_a_dummy() {
        let problem = problem_2::unbalanced_transportation_problem();
        let allocation = solve(
            &problem,
            Method::Initial(InitialMethod::NorthwestCorner),
            &SolveOptions::default(),
        ).unwrap();

        // Reported in the original dimensions.
        assert_eq!(allocation.quantities().nr_rows(), problem.nr_sources());
        assert_eq!(allocation.quantities().nr_columns(), problem.nr_destinations());

        // All demand is met; the excess supply stays unshipped.
        assert_eq!(allocation.column_sums(), problem.demand());
        let shipped: f64 = allocation.row_sums().iter().sum();
        assert_eq!(shipped, problem.total_demand());
        for (i, &row_total) in allocation.row_sums().iter().enumerate() {
            assert!(row_total <= problem.supply()[i]);
        }
    }
}
