//! Property tests for the resolvers and the sanitizer.
//!
//! Run: cargo test --test property_test

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use proptest::prelude::*;

use trueno_plotspec::resolve::{linear_colors, linear_sizes};
use trueno_plotspec::sanitize::sanitize_values;
use trueno_plotspec::scale::Colormap;

fn maybe_nan() -> impl Strategy<Value = f64> {
    prop_oneof![4 => -1e6f64..1e6, 1 => Just(f64::NAN)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn sanitize_keeps_rows_without_nan(rows in prop::collection::vec((maybe_nan(), maybe_nan()), 0..64)) {
        let (a, b): (Vec<f64>, Vec<f64>) = rows.iter().copied().unzip();
        let nan_rows = rows.iter().filter(|(x, y)| x.is_nan() || y.is_nan()).count();

        let (mask, clean) = sanitize_values(&[a.as_slice(), b.as_slice()]).unwrap();
        prop_assert_eq!(mask.count(), rows.len() - nan_rows);
        prop_assert_eq!(clean[0].len(), mask.count());

        let (again, twice) = sanitize_values(&[clean[0].as_slice(), clean[1].as_slice()]).unwrap();
        prop_assert_eq!(again.count(), again.len());
        prop_assert_eq!(&twice, &clean);
        prop_assert_eq!(mask.apply(&a).unwrap(), clean[0].clone());
    }

    #[test]
    fn reversed_bounds_equal_reversed_colormap(
        values in prop::collection::vec(-10.0f64..20.0, 1..32),
        lo in -5.0f64..0.0,
        width in 0.5f64..10.0,
    ) {
        let hi = lo + width;
        let cmap = Colormap::viridis();
        prop_assert_eq!(
            linear_colors(&values, &cmap, hi, lo),
            linear_colors(&values, &cmap.reversed(), lo, hi)
        );
    }

    #[test]
    fn linear_sizes_monotone_and_bounded(
        mut values in prop::collection::vec(-100.0f64..100.0, 1..32),
        vmin in -50.0f64..0.0,
        width in 1.0f64..50.0,
        scaling in 0.1f64..4.0,
    ) {
        values.sort_by(f64::total_cmp);
        let max_size = 30.0 * scaling;
        let sizes = linear_sizes(&values, vmin, vmin + width, max_size);
        prop_assert!(sizes.windows(2).all(|w| w[1] >= w[0]));
        for s in sizes {
            prop_assert!(s >= 0.05 * max_size - 1e-9);
            prop_assert!(s <= max_size + 1e-9);
        }
    }
}

#[test]
fn degenerate_size_interval() {
    // Only the value sitting on the interval is undefined (0/0).
    let sizes = linear_sizes(&[1.0, 3.0, 5.0], 3.0, 3.0, 30.0);
    assert_relative_eq!(sizes[0], 1.5);
    assert_eq!(sizes[1], 0.0);
    assert_relative_eq!(sizes[2], 30.0);
}
