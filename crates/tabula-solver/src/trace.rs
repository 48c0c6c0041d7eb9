use std::fmt;

use crate::classify::{Classification, VariableValue};
use crate::engine::State;
use crate::tableau::Tableau;

/// Snapshot of one examined tableau and the decision taken on it
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    /// Pivots performed before this tableau (0 for the initial one)
    pub step: usize,
    /// State the engine moved to after checking this tableau
    pub state: State,
    pub tableau: Tableau,
    pub entering_column: Option<usize>,
    pub entering: Option<String>,
    pub leaving_row: Option<usize>,
    /// Basic variable leaving through `leaving_row`
    pub leaving: Option<String>,
    pub pivot_element: Option<f64>,
    pub classification: Classification,
    pub z: f64,
}

/// Ordered step log of one solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    records: Vec<TraceRecord>,
}

impl Trace {
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.last()
    }

    /// Human readable step log
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceRecord;
    type IntoIter = std::slice::Iter<'a, TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_record(out, self)
    }
}

fn render_record(out: &mut fmt::Formatter<'_>, record: &TraceRecord) -> fmt::Result {
    let kind = if record.step == 0 { "initial" } else { "iteration" };
    writeln!(out, "Step {} ({})", record.step + 1, kind)?;
    writeln!(out)?;
    write!(out, "{}", record.tableau)?;
    writeln!(out)?;

    if let Some(entering) = &record.entering {
        writeln!(out, "Entering column: {}", entering)?;
    }
    if let (Some(row), Some(leaving)) = (record.leaving_row, &record.leaving) {
        writeln!(out, "Leaving row: {} ({})", row, leaving)?;
    }
    if let Some(element) = record.pivot_element {
        writeln!(out, "Pivot element: {}", element)?;
    }

    writeln!(out, "Basic variables:")?;
    write_values(out, &record.classification.basic)?;
    writeln!(out, "Non-basic variables:")?;
    write_values(out, &record.classification.non_basic)?;
    writeln!(out, "Z = {}", record.z)?;
    writeln!(out, "Optimal? {}", record.state == State::Optimal)?;

    match record.state {
        State::Optimal => writeln!(out, "Optimal solution found")?,
        State::Unbounded => writeln!(
            out,
            "Problem is unbounded: column {} has no positive entry",
            record.entering.as_deref().unwrap_or("?")
        )?,
        State::IterationLimitExceeded => writeln!(out, "Iteration limit reached")?,
        _ => {}
    }
    writeln!(out, "-------------------------------")
}

fn write_values(out: &mut fmt::Formatter<'_>, values: &[VariableValue]) -> fmt::Result {
    for v in values {
        writeln!(out, "  {} = {}", v.name, v.value)?;
    }
    Ok(())
}
