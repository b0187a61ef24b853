//! Layout specifications for every projection family.
//!
//! All layouts share the same frame: uniform margins, a fixed export width,
//! and a height that preserves the source canvas aspect ratio.

mod geo;

pub use geo::{
    angle_ticks_text, axis_label_annotations, graticule_traces, lat_ticks, lon_ticks,
    GRATICULE_TICKS, LAT_TICK_STEP, LON_TICK_STEP,
};

use crate::axis::AxisBuilder;
use crate::schema::{
    Camera, CameraProjection, GeoAxisSpec, GeoProjectionSpec, GeoSpec, LayoutSpec, Margin,
    PolarSpec, SceneSpec, Vec3,
};
use crate::state::{Axis, CanvasSize, GeoProjection, Projection, TickOverride, ViewerState};
use crate::style::StyleContext;

/// Width of every exported chart, in pixels.
pub const EXPORT_WIDTH: f64 = 1200.0;
/// Margin on every side, in pixels.
pub const MARGIN: f64 = 50.0;
/// Up direction of the 3D camera.
pub const CAMERA_UP: &str = "+z";

/// Parse a `"+z"`-style direction into a unit vector.
///
/// Anything that does not match `[+-][xyz]` yields the zero vector.
#[must_use]
pub fn camera_up(direction: &str) -> Vec3 {
    let mut chars = direction.chars();
    let sign = match chars.next() {
        Some('+') => 1.0,
        Some('-') => -1.0,
        _ => return Vec3::new(0.0, 0.0, 0.0),
    };
    match chars.next() {
        Some('x') => Vec3::new(sign, 0.0, 0.0),
        Some('y') => Vec3::new(0.0, sign, 0.0),
        Some('z') => Vec3::new(0.0, 0.0, sign),
        _ => Vec3::new(0.0, 0.0, 0.0),
    }
}

/// Builds layout specifications for one viewer.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder<'a> {
    viewer: &'a ViewerState,
    style: &'a StyleContext,
    canvas: CanvasSize,
}

impl<'a> LayoutBuilder<'a> {
    /// Create a builder over a viewer snapshot and its canvas size.
    #[must_use]
    pub fn new(viewer: &'a ViewerState, style: &'a StyleContext, canvas: CanvasSize) -> Self {
        Self { viewer, style, canvas }
    }

    fn axes(&self) -> AxisBuilder<'a> {
        AxisBuilder::new(self.viewer, self.style)
    }

    /// Export height preserving the canvas aspect ratio.
    #[must_use]
    pub fn height(&self) -> f64 {
        let ratio = self.canvas.height / self.canvas.width;
        if ratio.is_finite() && ratio > 0.0 {
            EXPORT_WIDTH * ratio
        } else {
            tracing::warn!(width = self.canvas.width, height = self.canvas.height, "degenerate canvas size");
            EXPORT_WIDTH
        }
    }

    /// Frame shared by every 2D layout.
    #[must_use]
    pub fn base(&self) -> LayoutSpec {
        LayoutSpec {
            margin: Some(Margin::uniform(MARGIN)),
            width: Some(EXPORT_WIDTH),
            height: Some(self.height()),
            paper_bgcolor: Some(self.style.background.clone()),
            plot_bgcolor: Some(self.style.background.clone()),
            ..LayoutSpec::default()
        }
    }

    /// Layout matching the viewer's projection.
    #[must_use]
    pub fn for_viewer(&self) -> LayoutSpec {
        match self.viewer.projection {
            Projection::Rectilinear => self.rectilinear(),
            Projection::Polar => self.polar(),
            Projection::Geographic(projection) => self.geographic(projection),
            Projection::Scene3d => self.scene(),
        }
    }

    /// Cartesian x/y layout.
    #[must_use]
    pub fn rectilinear(&self) -> LayoutSpec {
        let axes = self.axes();
        LayoutSpec {
            xaxis: Some(axes.rectilinear(Axis::X)),
            yaxis: Some(axes.rectilinear(Axis::Y)),
            ..self.base()
        }
    }

    /// Overlaid, gap-free bars.
    #[must_use]
    pub fn histogram(&self) -> LayoutSpec {
        LayoutSpec {
            barmode: Some("overlay".to_string()),
            bargap: Some(0.0),
            ..self.rectilinear()
        }
    }

    /// Dendrogram: leaves have no natural x scale, so the x axis is hidden.
    #[must_use]
    pub fn dendrogram(&self) -> LayoutSpec {
        LayoutSpec { xaxis: Some(self.axes().hidden(Axis::X)), ..self.rectilinear() }
    }

    /// Angle/radius layout.
    #[must_use]
    pub fn polar(&self) -> LayoutSpec {
        let axes = self.axes();
        LayoutSpec {
            polar: Some(PolarSpec {
                angularaxis: axes.angular(),
                radialaxis: axes.radial(),
                bgcolor: Some(self.style.background.clone()),
            }),
            ..self.base()
        }
    }

    /// Map layout with the default map chrome turned off.
    ///
    /// Native lon/lat grids are off as well; the only graticule is the
    /// tick-label traces from [`graticule_traces`].
    #[must_use]
    pub fn geographic(&self, projection: GeoProjection) -> LayoutSpec {
        let fg = Some(self.style.foreground.clone());
        LayoutSpec {
            geo: Some(GeoSpec {
                projection: GeoProjectionSpec { kind: projection.schema_name().to_string() },
                showland: false,
                showcoastlines: false,
                showlakes: false,
                lonaxis: GeoAxisSpec { showgrid: false, dtick: LON_TICK_STEP, gridcolor: None },
                lataxis: GeoAxisSpec { showgrid: false, dtick: LAT_TICK_STEP, gridcolor: None },
                bgcolor: Some(self.style.background.clone()),
                framecolor: fg,
            }),
            annotations: axis_label_annotations(self.viewer, self.style),
            ..self.base()
        }
    }

    /// Scene aspect ratio, relative to the x extent.
    ///
    /// Native-aspect viewers use the data extents; otherwise the axes form
    /// an equal cube. Each component is scaled by the axis stretch.
    #[must_use]
    pub fn aspect_ratio(&self) -> Vec3 {
        let axes = &self.viewer.axes;
        let (w, h, d) = if self.viewer.native_aspect {
            (axes.x.max - axes.x.min, axes.y.max - axes.y.min, axes.z.max - axes.z.min)
        } else {
            (EXPORT_WIDTH, EXPORT_WIDTH, EXPORT_WIDTH)
        };
        Vec3::new(axes.x.stretch, h / w * axes.y.stretch, d / w * axes.z.stretch)
    }

    /// 3D scene layout.
    #[must_use]
    pub fn scene(&self) -> LayoutSpec {
        let axes = self.axes();
        let projection = if self.viewer.perspective { "perspective" } else { "orthographic" };
        LayoutSpec {
            margin: Some(Margin::uniform(MARGIN)),
            width: Some(EXPORT_WIDTH),
            paper_bgcolor: Some(self.style.background.clone()),
            scene: Some(SceneSpec {
                xaxis: axes.scene(Axis::X),
                yaxis: axes.scene(Axis::Y),
                zaxis: axes.scene(Axis::Z),
                camera: Camera {
                    projection: CameraProjection { kind: projection.to_string() },
                    up: camera_up(CAMERA_UP),
                },
                aspectmode: "manual".to_string(),
                aspectratio: self.aspect_ratio(),
                bgcolor: Some(self.style.background.clone()),
            }),
            ..LayoutSpec::default()
        }
    }

    /// Image layout: reference ticks, optional top/right secondary axes,
    /// and the given plot background.
    #[must_use]
    pub fn image(
        &self,
        plot_background: String,
        secondary_x: Option<&TickOverride>,
        secondary_y: Option<&TickOverride>,
    ) -> LayoutSpec {
        let axes = self.axes();
        LayoutSpec {
            plot_bgcolor: Some(plot_background),
            showlegend: Some(true),
            xaxis: Some(axes.image(Axis::X, None)),
            yaxis: Some(axes.image(Axis::Y, None)),
            xaxis2: secondary_x.map(|t| axes.image(Axis::X, Some(t))),
            yaxis2: secondary_y.map(|t| axes.image(Axis::Y, Some(t))),
            ..self.base()
        }
    }
}
