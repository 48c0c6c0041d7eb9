use std::collections::BTreeMap;

use crate::error::SolveError;
use crate::trace::Trace;

/// The result of running the simplex engine
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: Status,
    /// Optimal objective value, present only when optimal
    pub z: Option<f64>,
    /// Decision variable values by name, present only when optimal
    pub variables: Option<BTreeMap<String, f64>>,
    /// Pivots performed
    pub iterations: usize,
    /// Per-step snapshots
    pub trace: Trace,
    #[cfg_attr(feature = "serde", serde(skip))]
    error: Option<SolveError>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// An optimal solution was found
    Optimal,
    /// The objective can grow without limit
    Unbounded,
    /// The iteration cap was reached first
    IterationLimit,
}

impl Solution {
    pub fn optimal(z: f64, variables: BTreeMap<String, f64>, iterations: usize, trace: Trace) -> Self {
        Self {
            status: Status::Optimal,
            z: Some(z),
            variables: Some(variables),
            iterations,
            trace,
            error: None,
        }
    }

    pub fn unbounded(column: impl Into<String>, iterations: usize, trace: Trace) -> Self {
        Self {
            status: Status::Unbounded,
            z: None,
            variables: None,
            iterations,
            trace,
            error: Some(SolveError::Unbounded { column: column.into() }),
        }
    }

    pub fn iteration_limit(limit: usize, iterations: usize, trace: Trace) -> Self {
        Self {
            status: Status::IterationLimit,
            z: None,
            variables: None,
            iterations,
            trace,
            error: Some(SolveError::IterationLimitExceeded { limit }),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }

    /// The terminal error for non-optimal outcomes
    pub fn error(&self) -> Option<&SolveError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<Solution, SolveError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Final answer as `Z MAX = ...` followed by the decision variables
    pub fn summary(&self) -> String {
        match (&self.z, &self.variables, &self.error) {
            (Some(z), Some(vars), _) => {
                let mut names: Vec<&String> = vars.keys().collect();
                // x2 before x10
                names.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
                let values: Vec<String> = names.iter().map(|name| format!("{} = {}", name, vars[*name])).collect();
                format!("Z MAX = {}\n{}", z, values.join(", "))
            }
            (_, _, Some(err)) => err.to_string(),
            _ => String::new(),
        }
    }
}
