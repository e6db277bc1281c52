//! Attribute-table seam and vote tallies
//!
//! Each shape is joined to the attribute-table row `record_number - 1`.
//! The table itself (a `.dbf` file in practice) is read by an external
//! collaborator behind [`AttributeTable`]; this module only reads fields.
//!
//! Election tables end in three vote-count columns, one per candidate.
//! [`VoteTally`] reads those for the selected row, or sums them over the
//! whole table when nothing is selected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of trailing vote-count columns in an election table.
pub const VOTE_FIELDS: usize = 3;

/// Column holding a region's map identifier.
pub const REGION_ID_COLUMN: usize = 1;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Integer value, accepting whole floats and numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.trim()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// Read access to a tabular attribute source.
pub trait AttributeTable {
    fn row_count(&self) -> usize;

    fn field_count(&self) -> usize;

    /// Value at `(row, column)`, `None` when out of range.
    fn field(&self, row: usize, column: usize) -> Option<&FieldValue>;

    fn field_name(&self, _column: usize) -> Option<&str> {
        None
    }
}

/// Attribute row joined to `record_number`, `None` for non-positive numbers.
pub fn row_for_record(record_number: i32) -> Option<usize> {
    usize::try_from(record_number).ok()?.checked_sub(1)
}

/// A table held in memory, row-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryTable {
    field_names: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl InMemoryTable {
    pub fn new(field_names: Vec<String>) -> Self {
        Self {
            field_names,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<FieldValue>) {
        self.rows.push(row);
    }

    pub fn with_row(mut self, row: Vec<FieldValue>) -> Self {
        self.push_row(row);
        self
    }
}

impl AttributeTable for InMemoryTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn field_count(&self) -> usize {
        self.field_names.len()
    }

    fn field(&self, row: usize, column: usize) -> Option<&FieldValue> {
        self.rows.get(row)?.get(column)
    }

    fn field_name(&self, column: usize) -> Option<&str> {
        self.field_names.get(column).map(String::as_str)
    }
}

/// Vote counts of the three candidates of one row or of a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    counts: [i64; VOTE_FIELDS],
}

impl VoteTally {
    pub fn new(counts: [i64; VOTE_FIELDS]) -> Self {
        Self { counts }
    }

    /// The trailing vote columns of `row`; `None` if any is missing or not numeric.
    pub fn from_row<T: AttributeTable + ?Sized>(table: &T, row: usize) -> Option<Self> {
        let first = table.field_count().checked_sub(VOTE_FIELDS)?;
        let mut counts = [0; VOTE_FIELDS];
        for (i, count) in counts.iter_mut().enumerate() {
            *count = table.field(row, first + i)?.as_i64()?;
        }
        Some(Self { counts })
    }

    /// Sum over every row; rows without readable vote columns are skipped.
    pub fn for_table<T: AttributeTable + ?Sized>(table: &T) -> Self {
        let mut tally = Self::default();
        for row in 0..table.row_count() {
            match Self::from_row(table, row) {
                Some(row_tally) => tally.add(&row_tally),
                None => tracing::warn!(row, "Row has no readable vote counts"),
            }
        }
        tally
    }

    /// Tally of the selected row, or of the whole table when nothing is selected.
    pub fn for_selection<T: AttributeTable + ?Sized>(table: &T, selected_row: Option<usize>) -> Option<Self> {
        match selected_row {
            Some(row) => Self::from_row(table, row),
            None => Some(Self::for_table(table)),
        }
    }

    pub fn add(&mut self, other: &VoteTally) {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
    }

    pub fn counts(&self) -> [i64; VOTE_FIELDS] {
        self.counts
    }

    pub fn total(&self) -> i64 {
        self.counts.iter().sum()
    }

    /// Share of the total per candidate in percent; all zero when nobody voted.
    pub fn percentages(&self) -> [f64; VOTE_FIELDS] {
        let total = self.total();
        if total == 0 {
            return [0.0; VOTE_FIELDS];
        }
        self.counts.map(|c| c as f64 * 100.0 / total as f64)
    }

    /// Candidate indices by descending votes; ties keep column order.
    pub fn ranked(&self) -> [usize; VOTE_FIELDS] {
        let mut order = [0, 1, 2];
        order.sort_by(|a, b| self.counts[*b].cmp(&self.counts[*a]));
        order
    }

    /// Candidate with strictly the most votes, `None` on a tie for first.
    pub fn winner(&self) -> Option<usize> {
        let [first, second, _] = self.ranked();
        (self.counts[first] > self.counts[second]).then_some(first)
    }
}
