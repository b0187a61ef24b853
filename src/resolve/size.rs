//! Marker size resolution.

use crate::error::Result;
use crate::sanitize::Mask;
use crate::scale::{LinearScale, Scale};
use crate::schema::SizeSpec;
use crate::state::{LayerState, SizeConfig, SizeMode};

/// Largest linear-mode marker for scatter plots (before scaling).
pub const SCATTER_BASE_SIZE: f64 = 30.0;

/// Largest linear-mode marker for scatter overlays on images.
pub const IMAGE_OVERLAY_BASE_SIZE: f64 = 25.0;

/// Smallest linear-mode marker as a fraction of the largest.
const MIN_SIZE_FRACTION: f64 = 0.05;

/// Size of every selected point of `layer`.
///
/// # Errors
///
/// Returns [`crate::Error::IncompatibleAttribute`] when the size attribute
/// is missing, or [`crate::Error::ShapeMismatch`] when the mask does not
/// cover it.
pub fn size_info(layer: &LayerState, mask: &Mask, base: f64) -> Result<SizeSpec> {
    match &layer.size.mode {
        SizeMode::Fixed => Ok(SizeSpec::Single(fixed_size(&layer.size))),
        SizeMode::Linear(linear) => {
            let values = mask.apply(layer.data.numeric(&linear.attribute)?)?;
            Ok(SizeSpec::PerPoint(linear_sizes(
                &values,
                linear.vmin,
                linear.vmax,
                base * layer.size.scaling,
            )))
        }
    }
}

/// Fixed marker size: `size × scaling`.
#[must_use]
pub fn fixed_size(config: &SizeConfig) -> f64 {
    config.size * config.scaling
}

/// Map values into `[0.05·max_size, max_size]`, NaN results becoming zero.
///
/// Values are normalized over `[vmin, vmax]` and clipped to the unit
/// interval first, so the output is non-decreasing in the input.
#[must_use]
pub fn linear_sizes(values: &[f64], vmin: f64, vmax: f64, max_size: f64) -> Vec<f64> {
    let norm = LinearScale::unit(vmin, vmax);
    values
        .iter()
        .map(|&v| {
            let t = norm.scale(v);
            if t.is_nan() {
                return 0.0;
            }
            let t = t.clamp(0.0, 1.0);
            (t * (1.0 - MIN_SIZE_FRACTION) + MIN_SIZE_FRACTION) * max_size
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::state::LinearSize;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn test_fixed_size_is_size_times_scaling() {
        let config = SizeConfig { size: 4.0, scaling: 2.5, mode: SizeMode::Fixed };
        assert_relative_eq!(fixed_size(&config), 10.0);
    }

    #[test]
    fn test_linear_sizes_bounds() {
        let sizes = linear_sizes(&[-5.0, 0.0, 5.0, 10.0, 50.0], 0.0, 10.0, 30.0);
        assert_relative_eq!(sizes[0], 1.5);
        assert_relative_eq!(sizes[1], 1.5);
        assert_relative_eq!(sizes[2], 15.75);
        assert_relative_eq!(sizes[3], 30.0);
        assert_relative_eq!(sizes[4], 30.0);
    }

    #[test]
    fn test_degenerate_interval_zeroes_sizes() {
        let sizes = linear_sizes(&[1.0, 1.0], 1.0, 1.0, 30.0);
        assert_eq!(sizes, vec![0.0, 0.0]);
        assert_eq!(linear_sizes(&[f64::NAN], 0.0, 1.0, 30.0), vec![0.0]);
    }

    #[test]
    fn test_size_info_applies_base_and_scaling() {
        let data = DataTable::new("d").with_numeric("s", &[0.0, 1.0, 2.0]);
        let layer = LayerState::new(1, Arc::new(data)).with_size(SizeConfig {
            size: 5.0,
            scaling: 2.0,
            mode: SizeMode::Linear(LinearSize { attribute: "s".into(), vmin: 0.0, vmax: 2.0 }),
        });
        let info = size_info(&layer, &Mask::from_flags(vec![false, true, true]), SCATTER_BASE_SIZE).unwrap();
        assert_relative_eq!(info.at(1).unwrap(), 60.0);
        assert_eq!(info.at(2), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Linear sizes are monotone and bounded by the reserved range.
        #[test]
        fn prop_linear_sizes_monotone_and_bounded(
            mut values in prop::collection::vec(-100.0f64..100.0, 1..100),
            vmin in -50.0f64..0.0,
            width in 0.1f64..100.0,
            scaling in 0.1f64..4.0,
        ) {
            values.sort_by(f64::total_cmp);
            let max_size = SCATTER_BASE_SIZE * scaling;
            let sizes = linear_sizes(&values, vmin, vmin + width, max_size);
            for pair in sizes.windows(2) {
                prop_assert!(pair[0] <= pair[1] + 1e-9);
            }
            for s in sizes {
                prop_assert!(s >= 0.05 * max_size - 1e-9);
                prop_assert!(s <= max_size + 1e-9);
            }
        }
    }
}
