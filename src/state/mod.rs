//! Snapshot of the host viewer's configuration.
//!
//! [`ViewerState`] holds axis and view settings; [`LayerState`] holds one
//! layer's data reference and style. Both are read-only inputs to every
//! builder.

mod layer;
mod viewer;

pub use layer::{
    ColorMode, ColoringStrategy, ErrorBarConfig, LayerId, LayerState, LineConfig, LineStyle,
    LinearColor, LinearSize, MarkerGeometry, SizeConfig, SizeMode, VectorAnchor, VectorConfig,
    VectorMode,
};
pub use viewer::{
    AngleUnit, Axis, AxisState, CanvasSize, GeoProjection, PerAxis, Projection, TickOverride,
    ViewerState,
};
