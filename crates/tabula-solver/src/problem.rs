use crate::error::InputError;
use crate::tableau::{Tableau, check_entries};

/// A maximization problem over "<=" constraints with non-negative variables
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Objective coefficients as stated in the model (maximize)
    pub objective: Vec<f64>,
    /// One coefficient row per constraint
    pub constraints: Vec<Vec<f64>>,
    /// Constraint bounds, one per constraint
    pub rhs: Vec<f64>,
}

impl Problem {
    pub fn new(objective: Vec<f64>, constraints: Vec<Vec<f64>>, rhs: Vec<f64>) -> Self {
        Self {
            objective,
            constraints,
            rhs,
        }
    }

    /// Append a constraint row with its bound
    pub fn add_constraint(&mut self, coefficients: Vec<f64>, rhs: f64) {
        self.constraints.push(coefficients);
        self.rhs.push(rhs);
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.objective.is_empty() {
            return Err(InputError::NoVariables);
        }
        for (i, row) in self.constraints.iter().enumerate() {
            if row.len() != self.objective.len() {
                return Err(InputError::ConstraintLength {
                    row: i + 1,
                    expected: self.objective.len(),
                    found: row.len(),
                });
            }
        }
        if self.rhs.len() != self.constraints.len() {
            return Err(InputError::RhsLength {
                expected: self.constraints.len(),
                found: self.rhs.len(),
            });
        }
        check_entries(&self.objective, &self.constraints, 0.0, &self.rhs)
    }

    /// Initial tableau: objective negated, 0 prepended to the right-hand side
    pub fn tableau(&self) -> Result<Tableau, InputError> {
        self.validate()?;

        let objective_row: Vec<f64> = self.objective.iter().map(|c| -c).collect();
        let rhs: Vec<f64> = std::iter::once(0.0).chain(self.rhs.iter().copied()).collect();

        Tableau::new(&objective_row, &self.constraints, &rhs)
    }
}
