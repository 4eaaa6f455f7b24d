use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Objective has {found} coefficients but the problem has {expected} variables")]
    ObjectiveLength { expected: usize, found: usize },
    #[error("Constraint {name} has {found} coefficients but the problem has {expected} variables")]
    ConstraintLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Constraint matrix has {rows} rows but {rhs} right-hand sides")]
    RowCount { rows: usize, rhs: usize },
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}

/// A linear program in standard form:
/// maximize `c·x` subject to `A x <= b`, `x >= 0`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective coefficients `c`, one per variable
    pub objective: Vec<f64>,
    /// Rows of `A x <= b`
    pub constraints: Vec<Constraint>,
}

/// One row `a·x <= rhs`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Right-hand side value
    pub rhs: f64,
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: vec![0.0; n],
            constraints: Vec::new(),
        }
    }

    /// Build from the dense triple `(c, A, b)`.
    ///
    /// Variables are named `x1..xn` and constraints `c1..cm`. `A` and `b` must
    /// have the same number of rows; row lengths are checked by
    /// [`LpProblem::validate`].
    pub fn from_dense(c: &[f64], a: &[Vec<f64>], b: &[f64]) -> Result<Self, ProblemError> {
        if a.len() != b.len() {
            return Err(ProblemError::RowCount {
                rows: a.len(),
                rhs: b.len(),
            });
        }

        let variables = (1..=c.len()).map(|j| format!("x{j}")).collect();
        let mut problem = Self::new(variables);
        problem.set_objective(c.to_vec());
        for (i, (row, &rhs)) in a.iter().zip(b).enumerate() {
            problem.add_constraint(format!("c{}", i + 1), row.clone(), rhs);
        }
        Ok(problem)
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>) {
        self.objective = coefficients;
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check that every row matches the variable count and all data is finite
    pub fn validate(&self) -> Result<(), ProblemError> {
        let n = self.num_variables();

        if self.objective.len() != n {
            return Err(ProblemError::ObjectiveLength {
                expected: n,
                found: self.objective.len(),
            });
        }
        if self.objective.iter().any(|v| !v.is_finite()) {
            return Err(ProblemError::NonFinite("objective".to_string()));
        }

        for c in &self.constraints {
            if c.coefficients.len() != n {
                return Err(ProblemError::ConstraintLength {
                    name: c.name.clone(),
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|v| !v.is_finite()) {
                return Err(ProblemError::NonFinite(format!("constraint {}", c.name)));
            }
        }

        Ok(())
    }

    /// Objective value `c·x`
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.iter().zip(values).map(|(c, x)| c * x).sum()
    }

    /// `b_i - a_i·x` for every constraint
    pub fn slacks(&self, values: &[f64]) -> Vec<f64> {
        self.constraints
            .iter()
            .map(|c| {
                let lhs: f64 = c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum();
                c.rhs - lhs
            })
            .collect()
    }

    /// Largest violation of `A x <= b` or `x >= 0`; zero when `values` is feasible
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let rows = self.slacks(values).into_iter().map(|s| -s);
        let bounds = values.iter().map(|&x| -x);
        rows.chain(bounds).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dense_names() {
        let a = [vec![1.0, 2.0], vec![2.0, 1.0]];
        let problem = LpProblem::from_dense(&[2.0, 3.0], &a, &[8.0, 6.0]).unwrap();
        assert_eq!(problem.variables, vec!["x1", "x2"]);
        assert_eq!(problem.num_constraints(), 2);
        assert_eq!(problem.constraints[1].name, "c2");
        assert_eq!(problem.constraints[1].rhs, 6.0);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_objective_length() {
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![1.0]);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::ObjectiveLength { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_constraint_length() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0]);
        problem.add_constraint("wide", vec![1.0, 1.0], 4.0);
        let err = problem.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Constraint wide has 2 coefficients but the problem has 1 variables"
        );
    }

    #[test]
    fn test_from_dense_row_count() {
        let err = LpProblem::from_dense(&[1.0], &[vec![1.0]], &[2.0, -5.0]).unwrap_err();
        assert_eq!(err, ProblemError::RowCount { rows: 1, rhs: 2 });

        let err = LpProblem::from_dense(&[1.0], &[vec![1.0], vec![2.0]], &[2.0]).unwrap_err();
        assert_eq!(err, ProblemError::RowCount { rows: 2, rhs: 1 });
    }

    #[test]
    fn test_validate_non_finite() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0]);
        problem.add_constraint("cap", vec![1.0], f64::NAN);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::NonFinite("constraint cap".to_string()))
        );
    }

    #[test]
    fn test_slacks_and_violation() {
        let a = [vec![1.0, 1.0], vec![1.0, 0.0]];
        let problem = LpProblem::from_dense(&[1.0, 1.0], &a, &[4.0, 3.0]).unwrap();
        assert_eq!(problem.slacks(&[1.0, 2.0]), vec![1.0, 2.0]);
        assert_eq!(problem.max_violation(&[1.0, 2.0]), 0.0);
        assert_eq!(problem.max_violation(&[4.0, 1.0]), 1.0);
        assert_eq!(problem.max_violation(&[0.0, -0.5]), 0.5);
        assert_eq!(problem.objective_value(&[1.0, 2.0]), 3.0);
    }
}
