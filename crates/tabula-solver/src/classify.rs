use std::collections::BTreeMap;

use crate::tableau::{ColumnKind, Tableau};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValue {
    pub name: String,
    pub kind: ColumnKind,
    pub value: f64,
    /// Row holding the 1 of a basic variable's unit column
    pub row: Option<usize>,
}

/// Basic and non-basic variables of one tableau, in column order
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub basic: Vec<VariableValue>,
    pub non_basic: Vec<VariableValue>,
}

impl Classification {
    /// Values of the decision variables only, keyed by name
    pub fn structural_values(&self) -> BTreeMap<String, f64> {
        self.basic
            .iter()
            .chain(&self.non_basic)
            .filter(|v| v.kind == ColumnKind::Structural)
            .map(|v| (v.name.clone(), v.value))
            .collect()
    }

    pub fn is_basic(&self, name: &str) -> bool {
        self.basic.iter().any(|v| v.name == name)
    }
}

/// Reads the current basic solution off the tableau columns
#[derive(Debug, Clone, Copy)]
pub struct VariableClassifier {
    tolerance: f64,
}

impl VariableClassifier {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Row holding the single 1 when `col` is a unit column, objective row included
    pub fn unit_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let mut unit_row = None;
        for i in 0..tableau.rows() {
            let value = tableau.get(i, col);
            if (value - 1.0).abs() <= self.tolerance {
                if unit_row.is_some() {
                    return None;
                }
                unit_row = Some(i);
            } else if value.abs() > self.tolerance {
                return None;
            }
        }
        unit_row
    }

    pub fn classify(&self, tableau: &Tableau) -> Classification {
        let mut result = Classification::default();
        // Identical columns can both look like unit columns; a row hosts one basic variable
        let mut claimed = vec![false; tableau.rows()];

        for (col, column) in tableau.columns().iter().enumerate() {
            let row = self
                .unit_row(tableau, col)
                .filter(|&r| r > 0 && !claimed[r]);

            match row {
                Some(r) => {
                    claimed[r] = true;
                    result.basic.push(VariableValue {
                        name: column.name.clone(),
                        kind: column.kind,
                        value: tableau.rhs(r),
                        row: Some(r),
                    });
                }
                None => result.non_basic.push(VariableValue {
                    name: column.name.clone(),
                    kind: column.kind,
                    value: 0.0,
                    row: None,
                }),
            }
        }

        result
    }
}
