//! # Branch and bound
//!
//! Solves linear programs in which every variable is restricted to non-negative integers. Each
//! node of the search is a sub-problem: the original program with accumulated variable bound
//! rows. Relaxations are solved through the Big-M path, because branching introduces `>=` bound
//! rows even when the original problem is in standard form.
//!
//! Branching is on the first fractional variable, and the floor child is explored first; both
//! choices are deterministic. The incumbent only improves, and nodes whose relaxation cannot
//! beat it are pruned.
use log::{debug, trace};

use crate::algorithm::{SolveError, SolveOptions};
use crate::algorithm::simplex::big_m;
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::utilities::{is_integral, round_all};
use crate::data::linear_program::elements::{BoundDirection, LinearProgramType, Objective};
use crate::data::linear_program::general_form::GeneralForm;
use crate::data::linear_program::solution::Solution;

/// Solve a linear program over the non-negative integers.
///
/// # Arguments
///
/// * `program`: Linear program in general form; the integrality of all variables is implied.
/// * `options`: Tolerance, pivot cap per relaxation and the node cap over the whole search.
///
/// # Return value
///
/// The best integer solution found with proof of optimality, `Infeasible` if no integer point
/// satisfies the constraints, or `Unbounded` if the root relaxation is unbounded. Exceeding the
/// node cap is an error: the search was cut off, so no claim about the remaining nodes is
/// possible.
pub fn solve<PR: PivotRule>(
    program: &GeneralForm,
    options: &SolveOptions,
) -> Result<LinearProgramType, SolveError> {
    let mut frontier = vec![program.clone()];
    let mut incumbent: Option<Solution> = None;
    let mut nodes = 0;

    while let Some(node) = frontier.pop() {
        if nodes == options.max_nodes {
            return Err(SolveError::NodeLimit(nodes));
        }
        nodes += 1;

        let relaxation = match big_m::solve::<PR>(&node, options)? {
            LinearProgramType::FiniteOptimum(solution) => solution,
            LinearProgramType::Infeasible => {
                trace!("node {}: relaxation infeasible, pruned", nodes);
                continue;
            },
            LinearProgramType::Unbounded => {
                if nodes == 1 {
                    debug!("root relaxation unbounded");
                    return Ok(LinearProgramType::Unbounded);
                }
                // Bound rows only restrict the root relaxation further; an unbounded child can
                // not contribute a better incumbent than the root already allows.
                continue;
            },
        };

        if let Some(best) = &incumbent {
            if !improves(relaxation.objective_value, best.objective_value, program.objective(), options.tolerance) {
                trace!(
                    "node {}: bound {} does not beat incumbent {}, pruned",
                    nodes, relaxation.objective_value, best.objective_value,
                );
                continue;
            }
        }

        match first_fractional(&relaxation.variable_values, options.tolerance) {
            None => {
                let mut values = relaxation.variable_values;
                round_all(&mut values);
                let candidate = Solution::new(program.evaluate(&values), values);
                trace!("node {}: integer candidate {}", nodes, candidate.objective_value);
                let accept = match &incumbent {
                    Some(best) => improves(
                        candidate.objective_value,
                        best.objective_value,
                        program.objective(),
                        options.tolerance,
                    ),
                    None => true,
                };
                if accept {
                    incumbent = Some(candidate);
                }
            },
            Some((variable, value)) => {
                let floor = value.floor();
                trace!(
                    "node {}: branching on variable {} at {}",
                    nodes, variable, value,
                );
                // Depth first, floor child first: it is pushed last.
                frontier.push(node.with_variable_bound(variable, BoundDirection::Lower, floor + 1_f64));
                frontier.push(node.with_variable_bound(variable, BoundDirection::Upper, floor));
            },
        }
    }

    debug!("branch and bound: explored {} nodes", nodes);
    Ok(match incumbent {
        Some(solution) => LinearProgramType::FiniteOptimum(solution),
        None => LinearProgramType::Infeasible,
    })
}

/// Whether `candidate` is strictly better than `best` for the given objective direction.
fn improves(candidate: f64, best: f64, objective: Objective, tolerance: f64) -> bool {
    match objective {
        Objective::Maximize => candidate > best + tolerance,
        Objective::Minimize => candidate < best - tolerance,
    }
}

/// The first variable with a fractional value, and that value.
fn first_fractional(values: &[f64], tolerance: f64) -> Option<(usize, f64)> {
    values.iter()
        .enumerate()
        .find(|&(_, &value)| !is_integral(value, tolerance))
        .map(|(variable, &value)| (variable, value))
}
