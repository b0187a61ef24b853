//! Image viewer traces.
//!
//! An image scene draws in a fixed order: background fill, image layers
//! (or one composite image), subset overlays, scatter overlays, and finally
//! an invisible anchor that makes the secondary axes appear.

use crate::data::Grid;
use crate::error::{Error, Result};
use crate::resolve::{
    color_info, fixed_color, hover_info, rgb_string, rgba_string, size_info, IMAGE_OVERLAY_BASE_SIZE,
};
use crate::sanitize::sanitize_values;
use crate::scale::{Colormap, ImageStretch, Stretch};
use crate::schema::{ColorScale, LineSpec, Marker, MarkerLine, TraceKind, TraceSpec, ZData};
use crate::state::{LayerState, TickOverride, ViewerState};
use crate::traces::{layer_name, skip_layer_local};

/// Control points of an image layer's colorscale.
pub const COLORSCALE_SAMPLES: usize = 60;

/// Opacity of subset overlays relative to the layer alpha.
const SUBSET_ALPHA: f64 = 0.5;

/// A scalar image layer with its display pipeline.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    /// Layer state (label, alpha, zorder).
    pub layer: LayerState,
    /// Image values, already sliced and oriented by the host.
    pub values: Grid,
    /// Colormap.
    pub cmap: Colormap,
    /// Value shown at the bottom of the colormap.
    pub vmin: f64,
    /// Value shown at the top of the colormap.
    pub vmax: f64,
    /// Contrast of the contrast/bias stretch.
    pub contrast: f64,
    /// Bias of the contrast/bias stretch.
    pub bias: f64,
    /// Final stretch.
    pub stretch: Stretch,
}

impl ImageLayer {
    /// Linear display of `values` between `vmin` and `vmax`.
    #[must_use]
    pub fn new(layer: LayerState, values: Grid, cmap: Colormap, vmin: f64, vmax: f64) -> Self {
        Self { layer, values, cmap, vmin, vmax, contrast: 1.0, bias: 0.5, stretch: Stretch::Linear }
    }

    /// Set contrast, bias and stretch.
    #[must_use]
    pub fn with_stretch(mut self, contrast: f64, bias: f64, stretch: Stretch) -> Self {
        self.contrast = contrast;
        self.bias = bias;
        self.stretch = stretch;
        self
    }

    fn pipeline(&self) -> ImageStretch {
        ImageStretch::new(self.vmin, self.vmax, self.contrast, self.bias, self.stretch)
    }
}

/// A subset drawn over the image.
#[derive(Debug, Clone)]
pub enum SubsetOverlay {
    /// Subset selecting a single pixel; `None` when the subset does not
    /// resolve to a pixel of the displayed slice.
    Pixel {
        /// Subset layer.
        layer: LayerState,
        /// Pixel position in data coordinates.
        position: Option<(f64, f64)>,
    },
    /// Any other subset, rasterized by the host at the image resolution.
    Region {
        /// Subset layer.
        layer: LayerState,
        /// Membership buffer, nonzero inside the subset.
        mask: Grid,
    },
}

impl SubsetOverlay {
    /// Layer of the overlay.
    #[must_use]
    pub fn layer(&self) -> &LayerState {
        match self {
            SubsetOverlay::Pixel { layer, .. } | SubsetOverlay::Region { layer, .. } => layer,
        }
    }
}

/// Composite of every image layer, as RGBA fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    rows: usize,
    cols: usize,
    pixels: Vec<[f64; 4]>,
}

impl RgbaImage {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when `pixels` is not `rows × cols`,
    /// and [`Error::EmptyData`] for an empty image.
    pub fn new(rows: usize, cols: usize, pixels: Vec<[f64; 4]>) -> Result<Self> {
        if pixels.len() != rows * cols {
            return Err(Error::ShapeMismatch { expected: vec![rows, cols], found: vec![pixels.len()] });
        }
        if pixels.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self { rows, cols, pixels })
    }

    /// Top-left pixel.
    #[must_use]
    pub fn first_pixel(&self) -> [f64; 4] {
        self.pixels.first().copied().unwrap_or_default()
    }

    /// Rows of `[r, g, b, a]` with 0-255 color channels and alpha kept
    /// as a fraction.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<[f64; 4]>> {
        self.pixels
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|&[r, g, b, a]| [r * 255.0, g * 255.0, b * 255.0, a]).collect())
            .collect()
    }
}

/// How image layers are colored.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageColorMode {
    /// Each layer through its own colormap, stacked over a white fill.
    #[default]
    Colormaps,
    /// One flat color per layer, blended by the host into a composite.
    OneColorPerLayer(RgbaImage),
}

/// Everything an image viewer shows.
#[derive(Debug, Clone, Default)]
pub struct ImageScene {
    /// Coloring of image layers.
    pub color_mode: ImageColorMode,
    /// `(rows, cols)` of the reference data slice.
    pub shape: (usize, usize),
    /// Scalar image layers.
    pub images: Vec<ImageLayer>,
    /// Subset overlays.
    pub subsets: Vec<SubsetOverlay>,
    /// Scatter layers drawn over the image.
    pub scatters: Vec<LayerState>,
    /// Ticks of a secondary x axis along the top.
    pub secondary_x: Option<TickOverride>,
    /// Ticks of a secondary y axis along the right.
    pub secondary_y: Option<TickOverride>,
}

impl ImageScene {
    /// Empty scene over a `(rows, cols)` reference slice.
    #[must_use]
    pub fn new(shape: (usize, usize)) -> Self {
        Self { shape, ..Self::default() }
    }

    /// Add an image layer.
    #[must_use]
    pub fn with_image(mut self, image: ImageLayer) -> Self {
        self.images.push(image);
        self
    }

    /// Add a subset overlay.
    #[must_use]
    pub fn with_subset(mut self, subset: SubsetOverlay) -> Self {
        self.subsets.push(subset);
        self
    }

    /// Add a scatter overlay.
    #[must_use]
    pub fn with_scatter(mut self, layer: LayerState) -> Self {
        self.scatters.push(layer);
        self
    }

    /// Set the color mode.
    #[must_use]
    pub fn with_color_mode(mut self, mode: ImageColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Request secondary axes.
    #[must_use]
    pub fn with_secondary_axes(mut self, x: Option<TickOverride>, y: Option<TickOverride>) -> Self {
        self.secondary_x = x;
        self.secondary_y = y;
        self
    }

    /// Plot background: white under colormaps, otherwise the composite's
    /// top-left pixel.
    #[must_use]
    pub fn background_color(&self) -> String {
        match &self.color_mode {
            ImageColorMode::Colormaps => "rgba(255,255,255,1)".to_string(),
            ImageColorMode::OneColorPerLayer(composite) => rgba_string(composite.first_pixel()),
        }
    }
}

fn flat_heatmap(shape: (usize, usize), color: &str) -> TraceSpec {
    let (rows, cols) = shape;
    TraceSpec {
        z: Some(ZData::Grid(Grid::filled(rows, cols, 1.0).to_rows())),
        colorscale: Some(vec![(0.0, color.to_string()), (1.0, color.to_string())]),
        showscale: Some(false),
        ..TraceSpec::new(TraceKind::Heatmap).skip_hover()
    }
}

/// Opaque white heatmap under colormapped layers.
#[must_use]
pub fn background_trace(shape: (usize, usize)) -> TraceSpec {
    TraceSpec { opacity: Some(1.0), ..flat_heatmap(shape, "rgb(255,255,255)") }
}

/// Mapped `[zmin, zmax]` and the colorscale of an image layer.
///
/// `vmin > vmax` reverses the colormap. The colorscale samples the
/// colormap at [`COLORSCALE_SAMPLES`] points between the mapped bounds.
#[must_use]
pub fn colorscale(image: &ImageLayer) -> ([f64; 2], ColorScale) {
    let (cmap, bounds) = if image.vmin > image.vmax {
        (image.cmap.reversed(), [image.vmax, image.vmin])
    } else {
        (image.cmap.clone(), [image.vmin, image.vmax])
    };
    let pipeline = image.pipeline();
    let mapped = bounds.map(|b| pipeline.apply(b));

    let last = (COLORSCALE_SAMPLES - 1) as f64;
    let colors: Vec<String> = (0..COLORSCALE_SAMPLES)
        .map(|i| {
            let t = i as f64 / last;
            rgb_string(cmap.map(mapped[0] + (mapped[1] - mapped[0]) * t))
        })
        .collect();

    let mut scale = Vec::with_capacity(COLORSCALE_SAMPLES + 2);
    scale.push((0.0, colors[0].clone()));
    scale.extend(colors.iter().enumerate().map(|(i, c)| (i as f64 / last, c.clone())));
    scale.push((1.0, colors[COLORSCALE_SAMPLES - 1].clone()));
    (mapped, scale)
}

/// Heatmap of one colormapped image layer.
#[must_use]
pub fn image_layer_trace(image: &ImageLayer) -> TraceSpec {
    let pipeline = image.pipeline();
    let z = image.values.map(|v| {
        let mapped = pipeline.apply(v);
        if mapped.is_nan() {
            0.0
        } else {
            mapped
        }
    });
    let ([zmin, zmax], colorscale) = self::colorscale(image);
    TraceSpec {
        z: Some(ZData::Grid(z.to_rows())),
        colorscale: Some(colorscale),
        zmin: Some(zmin),
        zmax: Some(zmax),
        showscale: Some(false),
        opacity: Some(image.layer.alpha),
        xaxis: Some("x".to_string()),
        yaxis: Some("y".to_string()),
        ..TraceSpec::new(TraceKind::Heatmap)
            .name(image.layer.label())
            .legend(&image.layer.legend_group(), true)
            .skip_hover()
    }
}

/// RGBA image trace of the host's composite.
#[must_use]
pub fn composite_trace(composite: &RgbaImage) -> TraceSpec {
    TraceSpec {
        z: Some(ZData::Rgba(composite.to_rows())),
        opacity: Some(1.0),
        ..TraceSpec::new(TraceKind::Image).skip_hover()
    }
}

/// Crosshair through a selected pixel: a vertical and a horizontal line
/// spanning the viewer, one legend entry for both.
#[must_use]
pub fn pixel_subset_traces(viewer: &ViewerState, layer: &LayerState, (px, py): (f64, f64)) -> Vec<TraceSpec> {
    let color = fixed_color(&layer.color);
    let group = layer.legend_group();
    let line = |x: Vec<f64>, y: Vec<f64>, show: bool| TraceSpec {
        opacity: Some(layer.alpha * SUBSET_ALPHA),
        ..TraceSpec::new(TraceKind::Scatter)
            .xy(x, y)
            .mode("lines")
            .name(layer.label())
            .line(LineSpec { color: Some(color.clone()), ..LineSpec::default() })
            .legend(&group, show)
    };
    let (x, y) = (&viewer.axes.x, &viewer.axes.y);
    vec![line(vec![px, px], vec![y.min, y.max], true), line(vec![x.min, x.max], vec![py, py], false)]
}

/// Heatmap tinting the pixels of a rasterized subset.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] when the layer color cannot be parsed.
pub fn region_subset_trace(layer: &LayerState, mask: &Grid) -> Result<TraceSpec> {
    let color: crate::color::Rgba = fixed_color(&layer.color).parse()?;
    let inside = mask.map(|v| if v.is_finite() && v != 0.0 { 1.0 } else { 0.0 });
    Ok(TraceSpec {
        z: Some(ZData::Grid(inside.to_rows())),
        colorscale: Some(vec![(0.0, "rgba(0,0,0,0)".to_string()), (1.0, color.to_css_rgb())]),
        showscale: Some(false),
        opacity: Some(layer.alpha * SUBSET_ALPHA),
        xaxis: Some("x".to_string()),
        yaxis: Some("y".to_string()),
        ..TraceSpec::new(TraceKind::Heatmap).name(layer.label()).legend(&layer.legend_group(), true).skip_hover()
    })
}

/// Marker trace of a scatter layer drawn over the image.
///
/// # Errors
///
/// Returns [`Error::IncompatibleAttribute`] when a position, color, size
/// or hover attribute is missing.
pub fn scatter_overlay_traces(viewer: &ViewerState, layer: &LayerState, add_data_label: bool) -> Result<Vec<TraceSpec>> {
    let x = layer.data.numeric(&viewer.axes.x.attribute)?;
    let y = layer.data.numeric(&viewer.axes.y.attribute)?;
    let (mask, mut xy) = sanitize_values(&[x, y])?;
    let (y, x) = (xy.pop().unwrap_or_default(), xy.pop().unwrap_or_default());

    let marker = Marker {
        color: Some(color_info(layer, &mask)?),
        size: Some(size_info(layer, &mask, IMAGE_OVERLAY_BASE_SIZE)?),
        opacity: Some(layer.alpha),
        line: Some(MarkerLine { width: 0.0, color: None }),
        ..Marker::default()
    };
    let hover = hover_info(layer, &mask)?;
    Ok(vec![TraceSpec {
        hoverinfo: Some(hover.hoverinfo),
        hovertext: hover.hovertext,
        xaxis: Some("x".to_string()),
        yaxis: Some("y".to_string()),
        ..TraceSpec::new(TraceKind::Scatter)
            .xy(x, y)
            .mode("markers")
            .name(layer_name(layer, add_data_label))
            .marker(marker)
            .legend(&layer.legend_group(), true)
    }])
}

/// Transparent heatmap bound to the secondary axes so they render.
#[must_use]
pub fn secondary_anchor_trace(shape: (usize, usize), secondary_x: bool, secondary_y: bool) -> TraceSpec {
    TraceSpec {
        opacity: Some(0.0),
        xaxis: Some(if secondary_x { "x2" } else { "x" }.to_string()),
        yaxis: Some(if secondary_y { "y2" } else { "y" }.to_string()),
        ..flat_heatmap(shape, "rgb(0,0,0)")
    }
}

fn by_zorder<'a, T>(items: &'a [T], layer: impl Fn(&T) -> &LayerState) -> Vec<&'a T> {
    let mut kept: Vec<&T> = items.iter().filter(|item| layer(item).is_exported()).collect();
    kept.sort_by_key(|item| layer(item).zorder);
    kept
}

/// All traces of an image scene, in draw order.
///
/// Only visible, enabled layers are drawn, each group in zorder. A layer
/// that cannot be drawn is skipped without affecting the others.
///
/// # Errors
///
/// Propagates errors that are not local to one layer.
pub fn traces(viewer: &ViewerState, scene: &ImageScene, add_data_label: bool) -> Result<Vec<TraceSpec>> {
    let mut traces = Vec::new();

    match &scene.color_mode {
        ImageColorMode::Colormaps => {
            traces.push(background_trace(scene.shape));
            for image in by_zorder(&scene.images, |i| &i.layer) {
                traces.push(image_layer_trace(image));
            }
        }
        ImageColorMode::OneColorPerLayer(composite) => traces.push(composite_trace(composite)),
    }

    for subset in by_zorder(&scene.subsets, SubsetOverlay::layer) {
        match subset {
            SubsetOverlay::Pixel { layer, position: Some(position) } => {
                traces.extend(pixel_subset_traces(viewer, layer, *position));
            }
            SubsetOverlay::Pixel { layer, position: None } => {
                tracing::debug!(layer = layer.label(), "pixel subset outside the displayed slice");
            }
            SubsetOverlay::Region { layer, mask } => {
                let built = region_subset_trace(layer, mask).map(|t| vec![t]);
                traces.extend(skip_layer_local(layer, built)?);
            }
        }
    }

    for layer in by_zorder(&scene.scatters, |l| l) {
        traces.extend(skip_layer_local(layer, scatter_overlay_traces(viewer, layer, add_data_label))?);
    }

    if scene.secondary_x.is_some() || scene.secondary_y.is_some() {
        traces.push(secondary_anchor_trace(scene.shape, scene.secondary_x.is_some(), scene.secondary_y.is_some()));
    }
    Ok(traces)
}
