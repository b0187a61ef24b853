//! Output records of the charting schema.
//!
//! Field names are the schema's own keys, so they serialize directly.
//! Unset optional keys are omitted from the JSON document.

mod axis;
#[allow(missing_docs)]
mod layout;
#[allow(missing_docs)]
mod trace;

pub use axis::{AxisSpec, Font, MinorTicks, Title};
pub use layout::{
    Annotation, Camera, CameraProjection, GeoAxisSpec, GeoProjectionSpec, GeoSpec, LayoutSpec,
    Margin, PolarSpec, SceneSpec, Vec3,
};
pub use trace::{
    CapShow, Caps, ColorScale, ColorSpec, ErrorBar, LineSpec, Marker, MarkerLine, SizeSpec,
    Surface, TraceKind, TraceSpec, ZData,
};
