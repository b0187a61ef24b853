//! Fixed-resolution sampling of volumetric data.
//!
//! Hosts rasterize a layer onto a regular grid whose bounds are requested
//! in `(z, y, x)` order; the resulting [`Cube`] is indexed `[z][y][x]`.
//! [`VolumeSampler`] turns such a cube back into flat position/value
//! arrays in the x/y/z order the volume trace expects.

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::state::{Axis, ViewerState};

/// Dense `[z][y][x]` scalar cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    shape: [usize; 3],
    values: Vec<f64>,
}

impl Cube {
    /// Wrap `nz × ny × nx` values, x varying fastest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the length does not match.
    pub fn new(shape: [usize; 3], values: Vec<f64>) -> Result<Self> {
        if values.len() != shape.iter().product::<usize>() {
            return Err(Error::ShapeMismatch { expected: shape.to_vec(), found: vec![values.len()] });
        }
        Ok(Self { shape, values })
    }

    /// `[nz, ny, nx]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Flat values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `[z][y][x]`.
    #[must_use]
    pub fn get(&self, z: usize, y: usize, x: usize) -> Option<f64> {
        let [nz, ny, nx] = self.shape;
        if z >= nz || y >= ny || x >= nx {
            return None;
        }
        self.values.get((z * ny + y) * nx + x).copied()
    }

    /// Elementwise product, used to restrict a cube to a subset mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the shapes differ.
    pub fn multiply(&self, other: &Cube) -> Result<Cube> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch { expected: self.shape.to_vec(), found: other.shape.to_vec() });
        }
        let values = self.values.iter().zip(&other.values).map(|(a, b)| a * b).collect();
        Ok(Cube { shape: self.shape, values })
    }

    /// Smallest finite value.
    #[must_use]
    pub fn min_finite(&self) -> Option<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).reduce(f64::min)
    }

    /// Replace NaN with one unit below the smallest finite value and return
    /// that sentinel. An all-NaN cube uses `-1`.
    pub fn fill_nan(&mut self) -> f64 {
        let sentinel = self.min_finite().map_or(-1.0, |min| min - 1.0);
        for v in &mut self.values {
            if v.is_nan() {
                *v = sentinel;
            }
        }
        sentinel
    }
}

/// Bounds and sample count along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleAxis {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Number of cells.
    pub count: usize,
}

impl SampleAxis {
    /// Cell centers.
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        let step = (self.max - self.min) / self.count as f64;
        (0..self.count).map(|i| self.min + step * (i as f64 + 0.5)).collect()
    }
}

/// Flattened samples of a cube.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VolumeSamples {
    /// X positions.
    pub x: Vec<f64>,
    /// Y positions.
    pub y: Vec<f64>,
    /// Z positions.
    pub z: Vec<f64>,
    /// Cube values.
    pub value: Vec<f64>,
}

impl VolumeSamples {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether no sample survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Regular grid over the viewer's displayed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSampler {
    x: SampleAxis,
    y: SampleAxis,
    z: SampleAxis,
}

impl VolumeSampler {
    /// Grid over the viewer ranges at each axis' resolution.
    #[must_use]
    pub fn new(viewer: &ViewerState) -> Self {
        let axis = |a: Axis| {
            let state = viewer.axis(a);
            SampleAxis { min: state.min, max: state.max, count: state.resolution }
        };
        Self { x: axis(Axis::X), y: axis(Axis::Y), z: axis(Axis::Z) }
    }

    /// Bounds in the `(z, y, x)` order hosts rasterize with.
    #[must_use]
    pub fn bounds(&self) -> [SampleAxis; 3] {
        [self.z, self.y, self.x]
    }

    /// Cube shape `[nz, ny, nx]` the sampler expects.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        [self.z.count, self.y.count, self.x.count]
    }

    /// Cell-centred samples of `cube` inside `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the cube was not rasterized on
    /// this grid.
    pub fn sample(&self, cube: &Cube, bbox: &BoundingBox) -> Result<VolumeSamples> {
        if cube.shape() != self.shape() {
            return Err(Error::ShapeMismatch { expected: self.shape().to_vec(), found: cube.shape().to_vec() });
        }
        let (xs, ys, zs) = (self.x.centers(), self.y.centers(), self.z.centers());
        let mut out = VolumeSamples::default();
        let mut values = cube.values().iter();
        for &z in &zs {
            for &y in &ys {
                for &x in &xs {
                    let Some(&value) = values.next() else { continue };
                    if bbox.contains(x, y, z) {
                        out.x.push(x);
                        out.y.push(y);
                        out.z.push(z);
                        out.value.push(value);
                    }
                }
            }
        }
        Ok(out)
    }
}
