use log::{debug, trace, warn};
use thiserror::Error;

use crate::problem::{LpProblem, ProblemError};
use crate::solution::{Analysis, ReducedCost, ShadowPrice, Solution};
use crate::tableau::Tableau;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Problem is unbounded: variable column {column} can grow without limit")]
    Unbounded { column: usize },
    #[error("Simplex did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },
    #[error("Constraint {row} has negative right-hand side {rhs}; the slack basis is infeasible")]
    InfeasibleStart { row: usize, rhs: f64 },
    #[error("Tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
    #[error("Invalid problem: {0}")]
    InvalidProblem(#[from] ProblemError),
}

/// Single-phase primal simplex solver for `max c·x, A x <= b, x >= 0` with `b >= 0`
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem, starting from the all-slack basis
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, SolveError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolveError::InvalidTolerance(self.tolerance));
        }
        problem.validate()?;

        let negative_rhs = problem.constraints.iter().enumerate().find(|(_, c)| c.rhs < 0.0);
        if let Some((row, c)) = negative_rhs {
            debug!("rejecting constraint {} with rhs {}", c.name, c.rhs);
            return Err(SolveError::InfeasibleStart { row, rhs: c.rhs });
        }

        debug!(
            "solving LP with {} variables and {} constraints",
            problem.num_variables(),
            problem.num_constraints()
        );

        let mut tableau = Tableau::new(problem);
        let iterations = self.optimize(&mut tableau)?;

        let values = tableau.values();
        let objective_value = tableau.objective_value();
        debug!("optimal after {iterations} pivots, objective {objective_value}");

        let analysis = self.analyze(&tableau, problem, &values);

        Ok(Solution {
            values,
            objective_value,
            iterations,
            analysis,
        })
    }

    /// Pivot until the objective row is non-negative; returns the pivot count
    fn optimize(&self, tableau: &mut Tableau) -> Result<usize, SolveError> {
        let mut iterations = 0;

        loop {
            let Some(pivot_col) = tableau.entering_column(self.tolerance) else {
                return Ok(iterations);
            };
            let Some(pivot_row) = tableau.leaving_row(pivot_col, self.tolerance) else {
                debug!("column {pivot_col} has no positive entry, problem is unbounded");
                return Err(SolveError::Unbounded { column: pivot_col });
            };

            if iterations == self.max_iterations {
                warn!("iteration limit {} reached before optimality", self.max_iterations);
                return Err(SolveError::DidNotConverge { iterations });
            }

            trace!("pivot {iterations}: row {pivot_row}, column {pivot_col}");
            tableau.pivot(pivot_row, pivot_col);
            // pivot columns are written exactly, so basic columns stay exact unit vectors
            debug_assert!(tableau.is_canonical(0.0), "basis lost canonical form");
            iterations += 1;
        }
    }

    fn analyze(&self, tableau: &Tableau, problem: &LpProblem, values: &[f64]) -> Analysis {
        let n_vars = problem.num_variables();
        let obj_row = tableau.objective_row();

        // Row 0 under slack i is the dual value of constraint i
        let shadow_prices = problem
            .constraints
            .iter()
            .enumerate()
            .map(|(i, c)| ShadowPrice {
                constraint: c.name.clone(),
                value: obj_row[n_vars + i],
            })
            .collect();

        let reduced_costs = problem
            .variables
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let is_basic = tableau.basis().contains(&j);
                ReducedCost {
                    variable: name.clone(),
                    value: values[j],
                    reduced_cost: if is_basic { 0.0 } else { obj_row[j] },
                    is_basic,
                }
            })
            .collect();

        let slacks = problem.slacks(values);
        let binding_constraints = problem
            .constraints
            .iter()
            .zip(&slacks)
            .filter(|(c, s)| s.abs() <= self.tolerance * c.rhs.abs().max(1.0))
            .map(|(c, _)| c.name.clone())
            .collect();

        Analysis {
            shadow_prices,
            reduced_costs,
            slacks,
            binding_constraints,
        }
    }
}

/// Maximize `c·x` subject to `A x <= b`, `x >= 0` with default solver settings.
///
/// Returns the optimal `(x, z)`.
pub fn solve(c: &[f64], a: &[Vec<f64>], b: &[f64]) -> Result<(Vec<f64>, f64), SolveError> {
    let problem = LpProblem::from_dense(c, a, b)?;
    Ok(Solver::new().solve(&problem)?.into_parts())
}
