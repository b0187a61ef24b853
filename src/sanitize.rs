//! Row alignment for co-dependent arrays.
//!
//! Every trace is built from several arrays that describe the same points
//! (positions, color values, sizes, error magnitudes). A [`Mask`] computed
//! once must be applied to all of them so their indices stay aligned.

use crate::data::{select, Column};
use crate::error::{Error, Result};

/// Row selection shared by the arrays of one trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Vec<bool>);

impl Mask {
    /// Mask selecting every one of `len` rows.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self(vec![true; len])
    }

    /// Wrap explicit flags.
    #[must_use]
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Total number of rows the mask covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mask covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|keep| **keep).count()
    }

    /// Raw flags.
    #[must_use]
    pub fn flags(&self) -> &[bool] {
        &self.0
    }

    /// Logical AND with another mask of the same length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when lengths differ.
    pub fn and(&mut self, other: &Mask) -> Result<()> {
        if other.len() != self.len() {
            return Err(Error::ShapeMismatch { expected: vec![self.len()], found: vec![other.len()] });
        }
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a &= *b;
        }
        Ok(())
    }

    /// Selected numeric values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when `values` is not covered by the mask.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.check(values.len())?;
        Ok(select(values, &self.0))
    }

    /// Selected elements of a column, flattened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the column is not covered by the mask.
    pub fn apply_column(&self, column: &Column) -> Result<Column> {
        self.check(column.len())?;
        Ok(column.filtered(&self.0))
    }

    /// Original row indices of the selected rows.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.0.iter().enumerate().filter(|(_, keep)| **keep).map(|(i, _)| i).collect()
    }

    fn check(&self, len: usize) -> Result<()> {
        if len == self.len() {
            Ok(())
        } else {
            Err(Error::ShapeMismatch { expected: vec![self.len()], found: vec![len] })
        }
    }
}

/// Mask of rows that are not NaN in any numeric column.
///
/// Text columns impose no constraint. All columns must share the shape of
/// the first one; the returned columns are filtered and flattened.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when shapes disagree.
pub fn sanitize(columns: &[&Column]) -> Result<(Mask, Vec<Column>)> {
    let Some(first) = columns.first() else {
        return Ok((Mask::all(0), Vec::new()));
    };

    let mut flags = vec![true; first.len()];
    for column in columns {
        if column.shape() != first.shape() {
            return Err(Error::ShapeMismatch {
                expected: first.shape().to_vec(),
                found: column.shape().to_vec(),
            });
        }
        if let Some(values) = column.as_numeric() {
            for (keep, v) in flags.iter_mut().zip(values) {
                *keep &= !v.is_nan();
            }
        }
    }

    let mask = Mask(flags);
    let sanitized = columns.iter().map(|c| c.filtered(mask.flags())).collect();
    Ok((mask, sanitized))
}

/// [`sanitize`] over plain numeric slices.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when lengths disagree.
pub fn sanitize_values(arrays: &[&[f64]]) -> Result<(Mask, Vec<Vec<f64>>)> {
    let Some(first) = arrays.first() else {
        return Ok((Mask::all(0), Vec::new()));
    };
    let mut flags = vec![true; first.len()];
    for array in arrays {
        if array.len() != first.len() {
            return Err(Error::ShapeMismatch { expected: vec![first.len()], found: vec![array.len()] });
        }
        for (keep, v) in flags.iter_mut().zip(array.iter()) {
            *keep &= !v.is_nan();
        }
    }
    let mask = Mask(flags);
    let sanitized = arrays.iter().map(|a| select(a, mask.flags())).collect();
    Ok((mask, sanitized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_nan_rows_everywhere() {
        let x = Column::numeric(vec![1.0, f64::NAN, 3.0]);
        let y = Column::numeric(vec![4.0, 5.0, 6.0]);
        let (mask, out) = sanitize(&[&x, &y]).unwrap();
        assert_eq!(mask.flags(), &[true, false, true]);
        assert_eq!(out[0].as_numeric().unwrap(), &[1.0, 3.0]);
        assert_eq!(out[1].as_numeric().unwrap(), &[4.0, 6.0]);
    }

    #[test]
    fn test_text_columns_are_exempt() {
        let x = Column::numeric(vec![1.0, 2.0]);
        let labels = Column::text(["nan", "b"]);
        let (mask, out) = sanitize(&[&x, &labels]).unwrap();
        assert_eq!(mask.count(), 2);
        assert_eq!(out[1].display_value(0), "nan");
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let x = Column::numeric(vec![1.0, 2.0]);
        let y = Column::numeric(vec![1.0, 2.0, 3.0]);
        assert!(matches!(sanitize(&[&x, &y]), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_multidimensional_input_is_flattened() {
        let a = Column::numeric(vec![1.0, f64::NAN, 3.0, 4.0]).with_shape(vec![2, 2]).unwrap();
        let (mask, out) = sanitize(&[&a]).unwrap();
        assert_eq!(mask.count(), 3);
        assert_eq!(out[0].shape(), &[3]);
    }

    #[test]
    fn test_mask_and_and_apply() {
        let mut m = Mask::from_flags(vec![true, true, false]);
        m.and(&Mask::from_flags(vec![false, true, true])).unwrap();
        assert_eq!(m.indices(), vec![1]);
        assert_eq!(m.apply(&[7.0, 8.0, 9.0]).unwrap(), vec![8.0]);
        assert!(m.apply(&[1.0]).is_err());
        assert!(m.and(&Mask::all(2)).is_err());
    }

    #[test]
    fn test_sanitize_values() {
        let (mask, out) = sanitize_values(&[&[1.0, 2.0, f64::NAN], &[f64::NAN, 1.0, 1.0]]).unwrap();
        assert_eq!(mask.count(), 1);
        assert_eq!(out, vec![vec![2.0], vec![1.0]]);
        assert!(sanitize_values(&[&[1.0], &[1.0, 2.0]]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn maybe_nan() -> impl Strategy<Value = f64> {
        prop_oneof![3 => -1e6f64..1e6, 1 => Just(f64::NAN)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// k NaN rows among n leave exactly n - k selected rows.
        #[test]
        fn prop_mask_counts_non_nan_rows(values in prop::collection::vec(maybe_nan(), 0..200)) {
            let nan_count = values.iter().filter(|v| v.is_nan()).count();
            let column = Column::numeric(values.clone());
            let (mask, out) = sanitize(&[&column]).unwrap();
            prop_assert_eq!(mask.count(), values.len() - nan_count);
            prop_assert_eq!(out[0].len(), mask.count());
        }

        /// Re-applying the mask to the inputs reproduces the sanitized output.
        #[test]
        fn prop_mask_reapplication_is_idempotent(
            rows in prop::collection::vec((maybe_nan(), maybe_nan()), 0..100)
        ) {
            let x: Vec<f64> = rows.iter().map(|r| r.0).collect();
            let y: Vec<f64> = rows.iter().map(|r| r.1).collect();
            let (mask, out) = sanitize_values(&[&x, &y]).unwrap();
            let again_x = mask.apply(&x).unwrap();
            let again_y = mask.apply(&y).unwrap();
            prop_assert_eq!(&again_x, &out[0]);
            prop_assert_eq!(&again_y, &out[1]);
            prop_assert!(again_x.iter().chain(&again_y).all(|v| !v.is_nan()));
        }
    }
}
