use thiserror::Error;

/// Shape problems found while validating solver input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Constraint {row} has {found} coefficients, expected {expected}")]
    ConstraintLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Right-hand side has {found} entries, expected {expected}")]
    RhsLength { expected: usize, found: usize },
    #[error("Constraint {row} has a negative right-hand side")]
    NegativeRhs { row: usize },
    #[error("Problem has no decision variables")]
    NoVariables,
    #[error("Non-finite coefficient at row {row}, column {col}")]
    NonFinite { row: usize, col: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("Problem is unbounded: column {column} has no positive entry")]
    Unbounded { column: String },
    #[error("Iteration limit of {limit} exceeded before reaching optimality")]
    IterationLimitExceeded { limit: usize },
}
