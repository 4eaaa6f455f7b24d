mod matrix;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use matrix::DenseMatrix;
pub use problem::{Constraint, LpProblem, ProblemError};
pub use simplex::{solve, SolveError, Solver};
pub use solution::{Analysis, ReducedCost, ShadowPrice, Solution};
