use tracing::{debug, info, trace};

use crate::classify::VariableClassifier;
use crate::error::SolveError;
use crate::pivot::pivot;
use crate::problem::Problem;
use crate::selector::{PivotSelector, Selection};
use crate::solution::{Solution, Status};
use crate::tableau::Tableau;
use crate::trace::{Trace, TraceRecord};

/// Engine states. `Optimal`, `Unbounded` and `IterationLimitExceeded` are terminal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Initial,
    Checking,
    Pivoting,
    Optimal,
    Unbounded,
    IterationLimitExceeded,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Optimal | State::Unbounded | State::IterationLimitExceeded)
    }
}

/// Simplex engine for canonical-form maximization tableaus
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
    /// Keep per-step records in the returned solution
    trace: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-9,
            trace: true,
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

    /// Negative or non-finite values leave the tolerance unchanged
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        if tol.is_finite() && tol >= 0.0 {
            self.tolerance = tol;
        }
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve a problem given in the external `{ objective, constraints, rhs }` form.
    ///
    /// Only shape errors are returned as `Err`; unboundedness and the
    /// iteration cap are reported through [`Solution::status`].
    pub fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        let tableau = problem.tableau()?;
        debug!(
            vars = tableau.num_structural(),
            constraints = tableau.num_constraints(),
            "built initial tableau"
        );
        Ok(self.solve_tableau(tableau))
    }

    /// Run the pivoting loop from an existing tableau until it terminates
    pub fn solve_tableau(&self, tableau: Tableau) -> Solution {
        self.steps(tableau).finish()
    }

    /// Lazy, restartable view of the pivoting loop: one record per examined tableau
    pub fn steps(&self, tableau: Tableau) -> Steps {
        Steps {
            tableau,
            state: State::Initial,
            iterations: 0,
            pending: None,
            selector: PivotSelector::new(self.tolerance),
            classifier: VariableClassifier::new(self.tolerance),
            max_iterations: self.max_iterations,
            unbounded_column: None,
            capture: self.trace,
        }
    }
}

/// Iterator driving the engine state machine.
///
/// Cloning a `Steps` captures the current tableau, so a clone replays the
/// remaining records from the same point. Iterating always yields full
/// records; the solver's trace setting only applies to [`Steps::finish`].
#[derive(Debug, Clone)]
pub struct Steps {
    tableau: Tableau,
    state: State,
    iterations: usize,
    pending: Option<(usize, usize)>,
    selector: PivotSelector,
    classifier: VariableClassifier,
    max_iterations: usize,
    unbounded_column: Option<String>,
    capture: bool,
}

/// State entered after checking a tableau, with the pivot chosen on it
type Transition = (State, Option<(usize, usize)>);

impl Steps {
    pub fn state(&self) -> State {
        self.state
    }

    /// Pivots performed so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn into_tableau(self) -> Tableau {
        self.tableau
    }

    /// Run to termination and assemble the final answer.
    ///
    /// The trace holds the records produced from here on; records already
    /// taken through the iterator are not repeated. With tracing disabled no
    /// records are built at all.
    pub fn finish(mut self) -> Solution {
        let records = if self.capture {
            self.by_ref().collect()
        } else {
            while self.advance().is_some() {}
            Vec::new()
        };
        let trace = Trace::new(records);

        let status = match self.state {
            State::Optimal => Status::Optimal,
            State::Unbounded => Status::Unbounded,
            _ => Status::IterationLimit,
        };

        match status {
            Status::Optimal => {
                let classification = self.classifier.classify(&self.tableau);
                Solution::optimal(
                    self.tableau.objective_value(),
                    classification.structural_values(),
                    self.iterations,
                    trace,
                )
            }
            Status::Unbounded => {
                let column = self.unbounded_column.unwrap_or_default();
                Solution::unbounded(column, self.iterations, trace)
            }
            Status::IterationLimit => Solution::iteration_limit(self.max_iterations, self.iterations, trace),
        }
    }

    fn record(&self, state: State, pivot_at: Option<(usize, usize)>) -> TraceRecord {
        let classification = self.classifier.classify(&self.tableau);
        let entering_column = match (state, pivot_at) {
            (_, Some((column, _))) => Some(column),
            (State::Unbounded, None) => self.selector.entering_column(&self.tableau),
            _ => None,
        };
        let leaving_row = pivot_at.map(|(_, row)| row);
        let leaving = leaving_row.and_then(|r| {
            classification
                .basic
                .iter()
                .find(|v| v.row == Some(r))
                .map(|v| v.name.clone())
        });

        TraceRecord {
            step: self.iterations,
            state,
            entering_column,
            entering: entering_column.map(|j| self.tableau.column(j).name.clone()),
            leaving_row,
            leaving,
            pivot_element: pivot_at.map(|(column, row)| self.tableau.get(row, column)),
            z: self.tableau.objective_value(),
            classification,
            tableau: self.tableau.clone(),
        }
    }
}

impl Steps {
    /// Step the state machine to the next checked tableau without building a record
    fn advance(&mut self) -> Option<Transition> {
        loop {
            match self.state {
                State::Initial => {
                    self.state = State::Checking;
                }
                State::Checking => {
                    trace!(step = self.iterations, "tableau\n{}", self.tableau);
                    match self.selector.select(&self.tableau) {
                        Selection::Optimal => {
                            self.state = State::Optimal;
                            info!(iterations = self.iterations, z = self.tableau.objective_value(), "optimal");
                            return Some((State::Optimal, None));
                        }
                        Selection::Unbounded { column } => {
                            self.state = State::Unbounded;
                            let name = self.tableau.column(column).name.clone();
                            info!(iterations = self.iterations, column = %name, "unbounded");
                            self.unbounded_column = Some(name);
                            return Some((State::Unbounded, None));
                        }
                        Selection::Pivot { .. } if self.iterations >= self.max_iterations => {
                            self.state = State::IterationLimitExceeded;
                            info!(limit = self.max_iterations, "iteration limit exceeded");
                            return Some((State::IterationLimitExceeded, None));
                        }
                        Selection::Pivot { column, row } => {
                            self.state = State::Pivoting;
                            self.pending = Some((column, row));
                            debug!(
                                step = self.iterations,
                                column = %self.tableau.column(column).name,
                                row,
                                z = self.tableau.objective_value(),
                                "selected pivot"
                            );
                            return Some((State::Pivoting, Some((column, row))));
                        }
                    }
                }
                State::Pivoting => {
                    if let Some((column, row)) = self.pending.take() {
                        pivot(&mut self.tableau, row, column);
                        self.iterations += 1;
                    }
                    self.state = State::Checking;
                }
                State::Optimal | State::Unbounded | State::IterationLimitExceeded => return None,
            }
        }
    }
}

impl Iterator for Steps {
    type Item = TraceRecord;

    fn next(&mut self) -> Option<TraceRecord> {
        let (state, pivot_at) = self.advance()?;
        Some(self.record(state, pivot_at))
    }
}
