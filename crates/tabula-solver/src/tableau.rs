use std::fmt;

use crate::error::InputError;

/// Whether a tableau column belongs to a decision variable or a slack
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Structural,
    Slack,
}

/// Entry of the column table built once at construction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub kind: ColumnKind,
    /// 1-based index within its kind (`x1`, `xf1`, ...)
    pub index: usize,
    pub name: String,
}

impl Column {
    fn structural(index: usize) -> Self {
        Self {
            kind: ColumnKind::Structural,
            index,
            name: format!("x{}", index),
        }
    }

    fn slack(index: usize) -> Self {
        Self {
            kind: ColumnKind::Slack,
            index,
            name: format!("xf{}", index),
        }
    }
}

/// Dense simplex tableau.
///
/// Row 0 is the objective row, rows `1..rows()` are constraints. Columns are
/// stored as structural variables, then slack variables, then the right-hand
/// side. The `Z` column (1 on the objective row, 0 elsewhere) never changes
/// under pivoting and is only materialized when the tableau is displayed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    columns: Vec<Column>,
    n_vars: usize,
    n_slack: usize,
}

impl Tableau {
    /// Build the initial tableau.
    ///
    /// `objective_row` is stored as given, so maximization coefficients must
    /// already be negated. `rhs` carries one entry for the objective row
    /// (normally 0) followed by one bound per constraint.
    pub fn new(objective_row: &[f64], constraints: &[Vec<f64>], rhs: &[f64]) -> Result<Self, InputError> {
        let n_vars = objective_row.len();
        let n_constraints = constraints.len();

        if n_vars == 0 {
            return Err(InputError::NoVariables);
        }
        for (i, row) in constraints.iter().enumerate() {
            if row.len() != n_vars {
                return Err(InputError::ConstraintLength {
                    row: i + 1,
                    expected: n_vars,
                    found: row.len(),
                });
            }
        }
        if rhs.len() != n_constraints + 1 {
            return Err(InputError::RhsLength {
                expected: n_constraints + 1,
                found: rhs.len(),
            });
        }
        check_entries(objective_row, constraints, rhs[0], &rhs[1..])?;

        let total_cols = n_vars + n_constraints + 1;
        let mut data = Vec::with_capacity(n_constraints + 1);

        let mut objective = vec![0.0; total_cols];
        objective[..n_vars].copy_from_slice(objective_row);
        objective[total_cols - 1] = rhs[0];
        data.push(objective);

        for (i, coefficients) in constraints.iter().enumerate() {
            let mut row = vec![0.0; total_cols];
            row[..n_vars].copy_from_slice(coefficients);
            row[n_vars + i] = 1.0;
            row[total_cols - 1] = rhs[i + 1];
            data.push(row);
        }

        let columns = (1..=n_vars)
            .map(Column::structural)
            .chain((1..=n_constraints).map(Column::slack))
            .collect();

        Ok(Self {
            data,
            columns,
            n_vars,
            n_slack: n_constraints,
        })
    }

    /// Number of rows, objective row included
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Number of stored columns, right-hand side included
    pub fn cols(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn rhs_col(&self) -> usize {
        self.columns.len()
    }

    pub fn num_structural(&self) -> usize {
        self.n_vars
    }

    pub fn num_slack(&self) -> usize {
        self.n_slack
    }

    pub fn num_constraints(&self) -> usize {
        self.data.len() - 1
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.rhs_col()]
    }

    /// Column table entry for a variable column
    pub fn column(&self, col: usize) -> &Column {
        &self.columns[col]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Current value of `Z`, read from the objective row's right-hand side
    pub fn objective_value(&self) -> f64 {
        self.rhs(0)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.data
    }
}

/// Entry checks shared by every way of building a tableau: finite
/// coefficients and non-negative constraint bounds, so the slack basis is
/// feasible from the start. Shapes must already match.
pub(crate) fn check_entries(
    objective_row: &[f64],
    constraints: &[Vec<f64>],
    objective_rhs: f64,
    bounds: &[f64],
) -> Result<(), InputError> {
    let rhs_col = objective_row.len() + constraints.len();
    let rows = std::iter::once(objective_row).chain(constraints.iter().map(Vec::as_slice));
    let rhs = std::iter::once(&objective_rhs).chain(bounds);

    for (i, (row, &b)) in rows.zip(rhs).enumerate() {
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFinite { row: i, col: j });
        }
        if !b.is_finite() {
            return Err(InputError::NonFinite { row: i, col: rhs_col });
        }
        if i > 0 && b < 0.0 {
            return Err(InputError::NegativeRhs { row: i });
        }
    }
    Ok(())
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = std::iter::once("Z")
            .chain(self.columns.iter().map(|c| c.name.as_str()))
            .chain(std::iter::once("b"))
            .map(|name| format!("{:>8}", name))
            .collect();
        writeln!(f, "{}", header.join(" "))?;

        for (i, row) in self.data.iter().enumerate() {
            let z = if i == 0 { 1.0 } else { 0.0 };
            let cells: Vec<String> = std::iter::once(z)
                .chain(row.iter().copied())
                .map(|v| format!("{:>8.2}", v))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_appends_slack_identity() {
        let tableau = Tableau::new(&[-5.0, -2.0], &[vec![2.0, 1.0], vec![10.0, 12.0]], &[0.0, 6.0, 60.0]).unwrap();

        assert_eq!(tableau.rows(), 3);
        assert_eq!(tableau.cols(), 5);
        assert_eq!(tableau.row(0), &[-5.0, -2.0, 0.0, 0.0, 0.0]);
        assert_eq!(tableau.row(1), &[2.0, 1.0, 1.0, 0.0, 6.0]);
        assert_eq!(tableau.row(2), &[10.0, 12.0, 0.0, 1.0, 60.0]);
        assert_eq!(tableau.objective_value(), 0.0);
    }

    #[test]
    fn test_column_table_names() {
        let tableau = Tableau::new(&[-1.0, -1.0, -1.0], &[vec![1.0, 1.0, 1.0]], &[0.0, 4.0]).unwrap();
        let names: Vec<&str> = tableau.columns().iter().map(|c| c.name.as_str()).collect();

        // Three structural variables but a single slack: no half-split naming
        assert_eq!(names, vec!["x1", "x2", "x3", "xf1"]);
        assert_eq!(tableau.column(3).kind, ColumnKind::Slack);
        assert_eq!(tableau.column(2).index, 3);
    }

    #[test]
    fn test_rejects_ragged_constraint() {
        let err = Tableau::new(&[-1.0, -1.0], &[vec![1.0, 1.0], vec![1.0]], &[0.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            InputError::ConstraintLength {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_rejects_short_rhs() {
        let err = Tableau::new(&[-1.0], &[vec![1.0]], &[4.0]).unwrap_err();
        assert_eq!(err, InputError::RhsLength { expected: 2, found: 1 });
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert_eq!(Tableau::new(&[], &[], &[0.0]).unwrap_err(), InputError::NoVariables);

        let err = Tableau::new(&[-1.0], &[vec![f64::NAN]], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, InputError::NonFinite { row: 1, col: 0 });

        let err = Tableau::new(&[-1.0], &[vec![1.0]], &[0.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err, InputError::NonFinite { row: 1, col: 2 });
    }

    #[test]
    fn test_rejects_negative_bound() {
        // x1 <= -1 with x1 >= 0 has no feasible point
        let err = Tableau::new(&[-1.0], &[vec![1.0]], &[0.0, -1.0]).unwrap_err();
        assert_eq!(err, InputError::NegativeRhs { row: 1 });

        // the objective row's right-hand side is the starting Z, not a bound
        let tableau = Tableau::new(&[-1.0], &[vec![1.0]], &[-2.0, 3.0]).unwrap();
        assert_eq!(tableau.objective_value(), -2.0);
    }

    #[test]
    fn test_display_includes_z_column() {
        let tableau = Tableau::new(&[-3.0], &[vec![1.0]], &[0.0, 4.0]).unwrap();
        let text = tableau.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "       Z       x1      xf1        b");
        assert_eq!(lines[1], "    1.00    -3.00     0.00     0.00");
        assert_eq!(lines[2], "    0.00     1.00     1.00     4.00");
    }
}
