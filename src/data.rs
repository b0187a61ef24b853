//! Attribute-indexed data access for layers.
//!
//! A layer exposes its dataset through [`DataSource`]: a label, an optional
//! parent (for subsets), the ordered component labels, and one [`Column`]
//! per attribute. [`DataTable`] is the in-memory implementation hosts
//! snapshot into at export time.

use std::fmt;

use crate::color::format_number;
use crate::error::{Error, Result};

/// Values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Numeric values; NaN marks missing entries.
    Numeric(Vec<f64>),
    /// Text (categorical) values.
    Text(Vec<String>),
}

/// A flat column with a logical shape (row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    values: ColumnValues,
    shape: Vec<usize>,
}

impl Column {
    /// One-dimensional numeric column.
    #[must_use]
    pub fn numeric(values: Vec<f64>) -> Self {
        let shape = vec![values.len()];
        Self { values: ColumnValues::Numeric(values), shape }
    }

    /// One-dimensional text column.
    #[must_use]
    pub fn text<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let shape = vec![values.len()];
        Self { values: ColumnValues::Text(values), shape }
    }

    /// Reinterpret the column with an N-dimensional shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the shape does not cover the values exactly.
    pub fn with_shape(mut self, shape: Vec<usize>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != self.len() {
            return Err(Error::ShapeMismatch { expected: shape, found: vec![self.len()] });
        }
        self.shape = shape;
        Ok(self)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    /// Whether the column has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Underlying values.
    #[must_use]
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Numeric view, if the column is numeric.
    #[must_use]
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }

    /// Display string for element `i`, as shown in hover text.
    #[must_use]
    pub fn display_value(&self, i: usize) -> String {
        match &self.values {
            ColumnValues::Numeric(v) => v.get(i).map_or_else(String::new, |x| format_number(*x)),
            ColumnValues::Text(v) => v.get(i).cloned().unwrap_or_default(),
        }
    }

    /// Elements where `mask` is true, flattened to one dimension.
    #[must_use]
    pub fn filtered(&self, mask: &[bool]) -> Column {
        match &self.values {
            ColumnValues::Numeric(v) => Column::numeric(select(v, mask)),
            ColumnValues::Text(v) => Column::text(select(v, mask)),
        }
    }
}

/// Keep the elements of `values` whose mask entry is true.
pub(crate) fn select<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    values.iter().zip(mask).filter(|(_, keep)| **keep).map(|(v, _)| v.clone()).collect()
}

/// Row-major 2D array of image values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Wrap row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when `values` is not `rows × cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(Error::ShapeMismatch { expected: vec![rows, cols], found: vec![values.len()] });
        }
        Ok(Self { rows, cols, values })
    }

    /// Grid filled with one value.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self { rows, cols, values: vec![value; rows * cols] }
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Flat row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Apply `f` to every element.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self { rows: self.rows, cols: self.cols, values: self.values.iter().map(|&v| f(v)).collect() }
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                values.push(self.values[r * self.cols + c]);
            }
        }
        Self { rows: self.cols, cols: self.rows, values }
    }

    /// Nested rows, the shape heatmap traces take.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.values.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

/// Attribute-indexed access to one layer's dataset.
pub trait DataSource: fmt::Debug + Send + Sync {
    /// Display label of the dataset or subset.
    fn label(&self) -> &str;

    /// Label of the parent dataset when this source is a subset.
    fn parent_label(&self) -> Option<&str>;

    /// Ordered component (attribute) labels.
    fn components(&self) -> Vec<&str>;

    /// Column for an attribute label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleAttribute`] when the attribute is unknown
    /// to this source.
    fn column(&self, attribute: &str) -> Result<&Column>;

    /// Whether this source is a subset of another dataset.
    fn is_subset(&self) -> bool {
        self.parent_label().is_some()
    }

    /// Label of the dataset this source belongs to (itself, or its parent).
    fn dataset_label(&self) -> &str {
        self.parent_label().unwrap_or_else(|| self.label())
    }

    /// Numeric column for an attribute label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleAttribute`] when the attribute is missing
    /// or not numeric.
    fn numeric(&self, attribute: &str) -> Result<&[f64]> {
        self.column(attribute)?.as_numeric().ok_or_else(|| {
            Error::IncompatibleAttribute(format!("{attribute} is not numeric"))
        })
    }
}

/// In-memory columnar dataset.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    label: String,
    parent: Option<String>,
    columns: Vec<(String, Column)>,
}

impl DataTable {
    /// Create an empty dataset.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), parent: None, columns: Vec::new() }
    }

    /// Create a subset view labelled `label` of the dataset `parent`.
    #[must_use]
    pub fn subset(label: impl Into<String>, parent: impl Into<String>) -> Self {
        Self { label: label.into(), parent: Some(parent.into()), columns: Vec::new() }
    }

    /// Add or replace a column.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.insert(name, column);
        self
    }

    /// Add or replace a numeric column.
    #[must_use]
    pub fn with_numeric(self, name: impl Into<String>, values: &[f64]) -> Self {
        self.with_column(name, Column::numeric(values.to_vec()))
    }

    /// Add or replace a column in place.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = column;
        } else {
            self.columns.push((name, column));
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }
}

impl DataSource for DataTable {
    fn label(&self) -> &str {
        &self.label
    }

    fn parent_label(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    fn components(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn column(&self, attribute: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, column)| column)
            .ok_or_else(|| Error::IncompatibleAttribute(attribute.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::new("d1")
            .with_numeric("x", &[1.0, 2.0, 3.0])
            .with_column("name", Column::text(["a", "b", "c"]))
    }

    #[test]
    fn test_table_lookup() {
        let t = table();
        assert_eq!(t.label(), "d1");
        assert_eq!(t.components(), vec!["x", "name"]);
        assert_eq!(t.numeric("x").unwrap(), &[1.0, 2.0, 3.0]);
        assert!(!t.is_subset());
        assert_eq!(t.dataset_label(), "d1");
    }

    #[test]
    fn test_missing_and_non_numeric_attributes() {
        let t = table();
        assert!(matches!(t.column("z"), Err(Error::IncompatibleAttribute(_))));
        assert!(matches!(t.numeric("name"), Err(Error::IncompatibleAttribute(_))));
    }

    #[test]
    fn test_subset_labels() {
        let s = DataTable::subset("bright", "d1");
        assert!(s.is_subset());
        assert_eq!(s.dataset_label(), "d1");
    }

    #[test]
    fn test_insert_replaces() {
        let mut t = table();
        t.insert("x", Column::numeric(vec![9.0]));
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.numeric("x").unwrap(), &[9.0]);
    }

    #[test]
    fn test_with_shape() {
        let c = Column::numeric(vec![0.0; 6]).with_shape(vec![2, 3]).unwrap();
        assert_eq!(c.shape(), &[2, 3]);
        assert!(Column::numeric(vec![0.0; 5]).with_shape(vec![2, 3]).is_err());
    }

    #[test]
    fn test_grid() {
        let g = Grid::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(g.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = g.transposed();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_rows()[0], vec![1.0, 4.0]);
        assert_eq!(g.map(|v| v * 2.0).values()[5], 12.0);
        assert!(Grid::new(2, 2, vec![0.0]).is_err());
        assert_eq!(Grid::filled(1, 2, 1.0).values(), &[1.0, 1.0]);
    }

    #[test]
    fn test_filtered_and_display() {
        let c = Column::numeric(vec![1.5, 2.0, 3.0]);
        let kept = c.filtered(&[true, false, true]);
        assert_eq!(kept.as_numeric().unwrap(), &[1.5, 3.0]);
        assert_eq!(kept.display_value(0), "1.5");
        assert_eq!(kept.display_value(1), "3");
        let text = Column::text(["a", "b"]).filtered(&[false, true]);
        assert_eq!(text.display_value(0), "b");
    }
}
