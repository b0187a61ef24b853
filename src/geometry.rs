//! Geometric helpers shared by the 3D builders.

use crate::error::{Error, Result};
use crate::sanitize::Mask;

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Extent {
    /// Create an extent.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed width (`max - min`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `v` lies within the closed interval. NaN is never contained.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Axis-aligned box used to clip 3D points to the displayed ranges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// X range.
    pub x: Extent,
    /// Y range.
    pub y: Extent,
    /// Z range.
    pub z: Extent,
}

impl BoundingBox {
    /// Create a bounding box.
    #[must_use]
    pub const fn new(x: Extent, y: Extent, z: Extent) -> Self {
        Self { x, y, z }
    }

    /// Whether a point lies inside the box (faces included).
    #[must_use]
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.x.contains(x) && self.y.contains(y) && self.z.contains(z)
    }

    /// Mask of points inside the box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the coordinate arrays differ in length.
    pub fn mask(&self, x: &[f64], y: &[f64], z: &[f64]) -> Result<Mask> {
        if y.len() != x.len() || z.len() != x.len() {
            let found = if y.len() == x.len() { z.len() } else { y.len() };
            return Err(Error::ShapeMismatch { expected: vec![x.len()], found: vec![found] });
        }
        let flags = x
            .iter()
            .zip(y)
            .zip(z)
            .map(|((&x, &y), &z)| self.contains(x, y, z))
            .collect();
        Ok(Mask::from_flags(flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        let e = Extent::new(0.0, 1.0);
        BoundingBox::new(e, e, e)
    }

    #[test]
    fn test_extent() {
        let e = Extent::new(2.0, 5.0);
        assert!((e.width() - 3.0).abs() < f64::EPSILON);
        assert!(e.contains(2.0));
        assert!(e.contains(5.0));
        assert!(!e.contains(5.1));
        assert!(!e.contains(f64::NAN));
    }

    #[test]
    fn test_bbox_mask() {
        let bbox = unit_box();
        let mask = bbox
            .mask(&[0.5, 1.5, 1.0, 0.2], &[0.5, 0.5, 1.0, -0.1], &[0.5, 0.5, 0.0, 0.3])
            .unwrap();
        assert_eq!(mask.flags(), &[true, false, true, false]);
    }

    #[test]
    fn test_bbox_mask_length_mismatch() {
        assert!(unit_box().mask(&[0.5], &[0.5, 0.5], &[0.5]).is_err());
    }
}
