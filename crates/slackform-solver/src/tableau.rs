use crate::matrix::DenseMatrix;
use crate::problem::LpProblem;

/// Dense simplex tableau with one slack column per constraint.
///
/// Layout, for `n` variables and `m` constraints:
/// - row 0 is the objective row: `-c` in columns `[0, n)`, running objective in the RHS column
/// - rows `1..=m` hold `A`, an `m x m` identity for the slacks, then `b`
///
/// `basis[i]` is the column basic in row `i + 1`.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    data: DenseMatrix,
    basis: Vec<usize>,
    n_vars: usize,
    n_constraints: usize,
    /// Largest `|c_j|`; reduced costs are compared against the tolerance at this scale
    objective_scale: f64,
}

impl Tableau {
    /// Expects a validated problem
    pub fn new(problem: &LpProblem) -> Self {
        let n = problem.num_variables();
        let m = problem.num_constraints();
        let mut data = DenseMatrix::zeros(m + 1, n + m + 1);

        // Maximize c·x == minimize -c·x, so optimality is "row 0 >= 0"
        for (j, &coef) in problem.objective.iter().enumerate() {
            data[(0, j)] = -coef;
        }

        for (i, c) in problem.constraints.iter().enumerate() {
            let row = data.row_mut(i + 1);
            row[..n].copy_from_slice(&c.coefficients);
            row[n + i] = 1.0;
            row[n + m] = c.rhs;
        }

        Self {
            data,
            basis: (n..n + m).collect(),
            n_vars: n,
            n_constraints: m,
            objective_scale: problem.objective.iter().fold(0.0_f64, |acc, c| acc.max(c.abs())),
        }
    }

    fn rhs_col(&self) -> usize {
        self.n_vars + self.n_constraints
    }

    /// Column with the most negative objective-row entry, or `None` when optimal.
    ///
    /// `tolerance` is relative to the largest objective coefficient.
    pub fn entering_column(&self, tolerance: f64) -> Option<usize> {
        let (col, value) = self.data.argmin_in_row(0, 0..self.rhs_col())?;
        if value >= -tolerance * self.objective_scale {
            None
        } else {
            Some(col)
        }
    }

    /// Minimum-ratio row for `col`, or `None` when no row bounds the column.
    ///
    /// Only rows with a strictly positive entry in `col` are eligible, where
    /// entries within `tolerance` of zero relative to the column's largest
    /// magnitude count as zero. Ties go to the lowest row.
    pub fn leaving_row(&self, col: usize, tolerance: f64) -> Option<usize> {
        let rhs_col = self.rhs_col();
        let threshold = tolerance * self.column_scale(col);
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 1..=self.n_constraints {
            let val = self.data[(i, col)];
            if val > threshold && val > 0.0 {
                let ratio = self.data[(i, rhs_col)] / val;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    fn column_scale(&self, col: usize) -> f64 {
        (1..=self.n_constraints).fold(0.0_f64, |acc, i| acc.max(self.data[(i, col)].abs()))
    }

    pub fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[(row, col)];
        self.data.scale_row(row, 1.0 / pivot_val);
        // pv * (1 / pv) is not always exactly 1
        self.data[(row, col)] = 1.0;

        for i in 0..self.data.rows() {
            if i != row {
                let factor = self.data[(i, col)];
                if factor != 0.0 {
                    self.data.sub_scaled_row(i, row, factor);
                    self.data[(i, col)] = 0.0;
                }
            }
        }

        self.basis[row - 1] = col;
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn objective_row(&self) -> &[f64] {
        &self.data.row(0)[..self.rhs_col()]
    }

    /// Current values of the original variables
    pub fn values(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        let mut values = vec![0.0; self.n_vars];
        for (i, &basic) in self.basis.iter().enumerate() {
            if basic < self.n_vars {
                values[basic] = self.data[(i + 1, rhs_col)];
            }
        }
        values
    }

    /// Objective value carried in row 0; the `-c` sign convention cancels out through pivoting
    pub fn objective_value(&self) -> f64 {
        self.data[(0, self.rhs_col())]
    }

    /// Every basic column is a unit vector with its 1 in the row it is basic in
    pub fn is_canonical(&self, tolerance: f64) -> bool {
        self.basis.iter().enumerate().all(|(i, &col)| {
            (0..self.data.rows()).all(|r| {
                let expected = if r == i + 1 { 1.0 } else { 0.0 };
                (self.data[(r, col)] - expected).abs() <= tolerance
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tableau(c: &[f64], a: &[Vec<f64>], b: &[f64]) -> Tableau {
        Tableau::new(&LpProblem::from_dense(c, a, b).unwrap())
    }

    fn example() -> Tableau {
        tableau(&[2.0, 3.0], &[vec![1.0, 2.0], vec![2.0, 1.0]], &[8.0, 6.0])
    }

    #[test]
    fn test_initial_layout() {
        let t = example();
        assert_eq!(t.data.rows(), 3);
        assert_eq!(t.data.cols(), 5);
        assert_eq!(t.data.row(0), &[-2.0, -3.0, 0.0, 0.0, 0.0]);
        assert_eq!(t.data.row(1), &[1.0, 2.0, 1.0, 0.0, 8.0]);
        assert_eq!(t.data.row(2), &[2.0, 1.0, 0.0, 1.0, 6.0]);
        assert_eq!(t.basis(), &[2, 3]);
        assert!(t.is_canonical(1e-12));
        assert_eq!(t.values(), vec![0.0, 0.0]);
        assert_eq!(t.objective_value(), 0.0);
    }

    #[test]
    fn test_first_pivot_choice() {
        let t = example();
        let col = t.entering_column(1e-9).unwrap();
        assert_eq!(col, 1, "most negative reduced cost is -3 in column 1");
        // ratios 8/2 = 4 and 6/1 = 6
        assert_eq!(t.leaving_row(col, 1e-9), Some(1));
    }

    #[test]
    fn test_pivot_keeps_canonical_form() {
        let mut t = example();
        t.pivot(1, 1);
        assert_eq!(t.basis(), &[1, 3]);
        assert!(t.is_canonical(1e-12));
        assert!((t.objective_value() - 12.0).abs() < 1e-12);
        assert_eq!(t.values(), vec![0.0, 4.0]);
    }

    #[test]
    fn test_leaving_row_tie_goes_to_lowest_row() {
        let t = tableau(&[1.0], &[vec![2.0], vec![1.0], vec![1.0]], &[4.0, 2.0, 2.0]);
        assert_eq!(t.leaving_row(0, 1e-9), Some(1));
    }

    #[test]
    fn test_leaving_row_ignores_non_positive_entries() {
        let t = tableau(&[1.0, 1.0], &[vec![-1.0, 1.0], vec![0.0, 1.0]], &[1.0, 5.0]);
        assert_eq!(t.leaving_row(0, 1e-9), None);
        assert_eq!(t.leaving_row(1, 1e-9), Some(1));
    }

    #[test]
    fn test_entering_column_none_when_optimal() {
        let t = tableau(&[-1.0, 0.0], &[vec![1.0, 1.0]], &[3.0]);
        assert_eq!(t.entering_column(1e-9), None);
    }

    #[test]
    fn test_pivot_column_is_exact_for_inexact_reciprocal() {
        // 49 * (1 / 49) rounds to 0.9999999999999999
        let mut t = tableau(&[1e12], &[vec![49.0]], &[1.0]);
        t.pivot(1, 0);
        assert_eq!(t.data[(1, 0)], 1.0);
        assert_eq!(t.data[(0, 0)], 0.0);
        assert!(t.is_canonical(0.0));
        assert_eq!(t.entering_column(1e-9), None);
    }

    #[test]
    fn test_tiny_entries_are_eligible() {
        let t = tableau(&[1e-10], &[vec![1e-10]], &[1.0]);
        assert_eq!(t.entering_column(1e-9), Some(0));
        assert_eq!(t.leaving_row(0, 1e-9), Some(1));
    }

    #[test]
    fn test_noise_relative_to_column_is_ignored() {
        let t = tableau(&[1.0], &[vec![1e-15], vec![-1.0]], &[1.0, 1.0]);
        assert_eq!(t.leaving_row(0, 1e-9), None);
    }
}
