/// The result of solving an LP problem to optimality
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Optimal values for each variable
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective_value: f64,
    /// Number of pivots performed
    pub iterations: usize,
    /// Detailed analysis
    pub analysis: Analysis,
}

/// Dual and slack information read off the final tableau
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Shadow prices (dual values) for each constraint.
    /// Indicates how much the objective would improve per unit of extra RHS.
    pub shadow_prices: Vec<ShadowPrice>,

    /// Reduced costs for each variable.
    /// For non-basic variables, how much the objective coefficient must grow to enter the basis.
    pub reduced_costs: Vec<ReducedCost>,

    /// Unused capacity `b_i - a_i·x` per constraint
    pub slacks: Vec<f64>,

    /// Which constraints are binding (tight) at optimum
    pub binding_constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowPrice {
    /// Constraint name
    pub constraint: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReducedCost {
    /// Variable name
    pub variable: String,
    /// Current value in solution
    pub value: f64,
    pub reduced_cost: f64,
    /// Is this variable in the basis?
    pub is_basic: bool,
}

impl Solution {
    /// `(x, z)` pair
    pub fn into_parts(self) -> (Vec<f64>, f64) {
        (self.values, self.objective_value)
    }
}
