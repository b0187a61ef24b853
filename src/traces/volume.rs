//! Volume rendering as isosurface traces.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::resolve::{fixed_color, rgb_string};
use crate::sampling::{Cube, VolumeSampler};
use crate::schema::{Caps, ColorScale, Surface, TraceKind, TraceSpec, ZData};
use crate::state::{LayerState, ViewerState};
use crate::style::StyleContext;
use crate::traces::layer_name;

/// Default number of isosurfaces per volume.
pub const DEFAULT_ISOSURFACE_COUNT: usize = 5;

/// Stops of the eased colorscale.
pub const EASING_STOPS: usize = 11;

/// Export options for volume layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeOptions {
    /// Isosurfaces drawn per layer.
    pub isosurface_count: usize,
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self { isosurface_count: DEFAULT_ISOSURFACE_COUNT }
    }
}

/// A volumetric layer rasterized on the sampler's grid.
#[derive(Debug, Clone)]
pub struct VolumeLayer {
    /// Layer state.
    pub layer: LayerState,
    /// Values on the grid.
    pub cube: Cube,
    /// Membership cube of a subset (1 inside, 0 outside).
    pub subset_mask: Option<Cube>,
    /// Lowest isosurface value.
    pub vmin: f64,
    /// Highest isosurface value.
    pub vmax: f64,
}

impl VolumeLayer {
    /// A data layer.
    #[must_use]
    pub fn new(layer: LayerState, cube: Cube, vmin: f64, vmax: f64) -> Self {
        Self { layer, cube, subset_mask: None, vmin, vmax }
    }

    /// A subset of `parent`: the parent's values under `mask`, with the
    /// parent's isosurface range.
    #[must_use]
    pub fn subset(layer: LayerState, parent: &VolumeLayer, mask: Cube) -> Self {
        Self {
            layer,
            cube: parent.cube.clone(),
            subset_mask: Some(mask),
            vmin: parent.vmin,
            vmax: parent.vmax,
        }
    }

    /// Values with the subset mask applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the mask is on another grid.
    pub fn masked_cube(&self) -> Result<Cube> {
        match &self.subset_mask {
            Some(mask) => mask.multiply(&self.cube),
            None => Ok(self.cube.clone()),
        }
    }
}

/// Colorscale from `background` to `color` and the matching opacity
/// scale, both eased by a fourth root so faint values stay visible.
#[must_use]
pub fn eased_colorscale(background: Rgba, color: Rgba) -> (ColorScale, Vec<(f64, f64)>) {
    let bg = background.to_fractions();
    let fg = color.to_fractions();
    let last = (EASING_STOPS - 1) as f64;
    (0..EASING_STOPS)
        .map(|i| {
            let t = i as f64 / last;
            let eased = t.powf(0.25);
            let mut mix = [0.0; 4];
            for c in 0..3 {
                mix[c] = bg[c] + (fg[c] - bg[c]) * eased;
            }
            ((t, rgb_string(mix)), (t, eased))
        })
        .unzip()
}

/// The isosurface trace of one volume layer.
///
/// # Errors
///
/// Returns [`Error::EmptyData`] when no sample lies inside the displayed
/// box, [`Error::ShapeMismatch`] when the cube is not on the sampler's
/// grid, and [`Error::InvalidColor`] for an unparseable color.
pub fn traces_for_layer(
    viewer: &ViewerState,
    volume: &VolumeLayer,
    sampler: &VolumeSampler,
    style: &StyleContext,
    options: VolumeOptions,
    add_data_label: bool,
) -> Result<Vec<TraceSpec>> {
    let mut cube = volume.masked_cube()?;
    let sentinel = cube.fill_nan();
    let samples = sampler.sample(&cube, &viewer.bounding_box())?;
    if samples.is_empty() {
        return Err(Error::EmptyData);
    }
    tracing::debug!(layer = volume.layer.label(), samples = samples.len(), sentinel, "sampled volume");

    let color: Rgba = fixed_color(&volume.layer.color).parse()?;
    let (colorscale, opacityscale) = eased_colorscale(style.background_rgba()?, color);

    let trace = TraceSpec {
        z: Some(ZData::Points(samples.z)),
        value: Some(samples.value),
        isomin: Some(volume.vmin),
        isomax: Some(volume.vmax),
        opacity: Some(volume.layer.alpha),
        surface: Some(Surface { count: options.isosurface_count }),
        colorscale: Some(colorscale),
        opacityscale: Some(opacityscale),
        showscale: Some(false),
        caps: Some(Caps::hidden()),
        ..TraceSpec::new(TraceKind::Volume)
            .xy(samples.x, samples.y)
            .name(layer_name(&volume.layer, add_data_label))
            .legend(&volume.layer.legend_group(), true)
            .skip_hover()
    };
    Ok(vec![trace])
}
