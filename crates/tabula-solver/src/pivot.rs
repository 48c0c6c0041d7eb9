use crate::tableau::Tableau;

/// Gauss-Jordan step: make `column` a unit column with its 1 on `row`.
///
/// Every stored column is rewritten, right-hand side included. Returns the
/// pivot element that was divided out.
pub fn pivot(tableau: &mut Tableau, row: usize, column: usize) -> f64 {
    let rows = tableau.rows_mut();
    let pivot_val = rows[row][column];

    let pivot_row: Vec<f64> = rows[row].iter().map(|v| v / pivot_val).collect();

    for (i, current) in rows.iter_mut().enumerate() {
        if i == row {
            continue;
        }
        let coefficient = -current[column];
        if coefficient == 0.0 {
            continue;
        }
        for (value, p) in current.iter_mut().zip(&pivot_row) {
            *value += coefficient * p;
        }
    }
    rows[row] = pivot_row;

    pivot_val
}
