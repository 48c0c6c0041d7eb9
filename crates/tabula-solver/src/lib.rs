mod classify;
mod engine;
mod error;
mod pivot;
mod problem;
mod selector;
mod solution;
mod tableau;
mod trace;

pub use classify::{Classification, VariableClassifier, VariableValue};
pub use engine::{Solver, State, Steps};
pub use error::{InputError, SolveError};
pub use pivot::pivot;
pub use problem::Problem;
pub use selector::{PivotSelector, Selection};
pub use solution::{Solution, Status};
pub use tableau::{Column, ColumnKind, Tableau};
pub use trace::{Trace, TraceRecord};
