//! Single-pass iteration over one column of a row buffer.

use super::errors::{AnalyzerError, AnalyzerResult};

/// An ordered sequence of string fields.
///
/// Implemented for the common owned and borrowed row shapes so callers can
/// hand their existing buffers to the analyzers without copying.
pub trait Row {
    /// Returns the number of fields in the row.
    fn field_count(&self) -> usize;

    /// Returns the field at `index`, or `None` when the row is too short.
    fn field(&self, index: usize) -> Option<&str>;
}

impl<S: AsRef<str>> Row for [S] {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> Row for Vec<S> {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>, const N: usize> Row for [S; N] {
    fn field_count(&self) -> usize {
        N
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

/// One `(value, label)` pair produced by [`ColumnIter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnEntry<'a> {
    /// Raw field of the target column.
    pub value: &'a str,
    /// Raw field of the label column.
    pub label: &'a str,
}

/// Lazy iterator over the target column of a row buffer.
///
/// Holds a shared reference to the rows plus the two column indices. The
/// iterator is finite and single-pass; build a new one from the same rows to
/// run another analysis. Rows must not be mutated while an iterator exists,
/// which the borrow enforces.
#[derive(Debug, Clone)]
pub struct ColumnIter<'a, R> {
    rows: std::slice::Iter<'a, R>,
    label: usize,
    column: usize,
}

impl<'a, R: Row> ColumnIter<'a, R> {
    /// Creates an iterator over `column`, pairing each value with the field
    /// at `label`.
    ///
    /// Every row is checked up front; the first row with fewer than
    /// `max(column, label) + 1` fields yields [`AnalyzerError::RowTooShort`].
    pub fn new(rows: &'a [R], label: usize, column: usize) -> AnalyzerResult<Self> {
        let required = column.max(label) + 1;
        if let Some((row, short)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.field_count() < required)
        {
            return Err(AnalyzerError::row_too_short(
                row,
                required,
                short.field_count(),
            ));
        }
        Ok(Self {
            rows: rows.iter(),
            label,
            column,
        })
    }

    /// Returns the label column index.
    pub fn label_index(&self) -> usize {
        self.label
    }

    /// Returns the target column index.
    pub fn column_index(&self) -> usize {
        self.column
    }
}

impl<'a, R: Row> Iterator for ColumnIter<'a, R> {
    type Item = ColumnEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        // Field counts were validated in `new`.
        let value = row.field(self.column).unwrap_or_default();
        let label = row.field(self.label).unwrap_or_default();
        Some(ColumnEntry { value, label })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<R: Row> ExactSizeIterator for ColumnIter<'_, R> {}

impl<R: Row> std::iter::FusedIterator for ColumnIter<'_, R> {}
