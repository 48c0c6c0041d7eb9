use crate::tableau::Tableau;

/// Outcome of one pivot selection round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No objective-row entry is negative
    Optimal,
    /// Entering column and leaving row
    Pivot { column: usize, row: usize },
    /// The entering column has no positive entry below the objective row
    Unbounded { column: usize },
}

/// Chooses entering and leaving variables for the maximization tableau
#[derive(Debug, Clone, Copy)]
pub struct PivotSelector {
    tolerance: f64,
}

impl PivotSelector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn is_optimal(&self, tableau: &Tableau) -> bool {
        self.entering_column(tableau).is_none()
    }

    /// Most negative objective-row entry. Strict comparison keeps the lowest
    /// index on ties.
    pub fn entering_column(&self, tableau: &Tableau) -> Option<usize> {
        let objective = &tableau.row(0)[..tableau.rhs_col()];

        let mut min_val = -self.tolerance;
        let mut min_col = None;
        for (j, &value) in objective.iter().enumerate() {
            if value < min_val {
                min_val = value;
                min_col = Some(j);
            }
        }
        min_col
    }

    /// Minimum-ratio test over constraint rows. Entries at or below the
    /// tolerance never become pivots.
    pub fn leaving_row(&self, tableau: &Tableau, column: usize) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 1..tableau.rows() {
            let value = tableau.get(i, column);
            if value > self.tolerance {
                let ratio = tableau.rhs(i) / value;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }
        min_row
    }

    pub fn select(&self, tableau: &Tableau) -> Selection {
        let Some(column) = self.entering_column(tableau) else {
            return Selection::Optimal;
        };
        match self.leaving_row(tableau, column) {
            Some(row) => Selection::Pivot { column, row },
            None => Selection::Unbounded { column },
        }
    }
}
