//! # Trueno-PlotSpec
//!
//! Synthesizes declarative chart specifications (traces plus a layout) from
//! the configuration of an interactive data viewer.
//!
//! The host viewer hands over a snapshot of its state ([`state::ViewerState`])
//! and one [`state::LayerState`] per layer; the builders return plain records
//! ([`schema::TraceSpec`], [`schema::LayoutSpec`]) that serialize to the
//! charting library's JSON vocabulary. Colors, marker sizes, axis scaling,
//! vector fields and volumes keep the look of the original viewer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trueno_plotspec::prelude::*;
//!
//! let data = Arc::new(DataTable::new("stars").with_numeric("ra", &[1.0, 2.0]).with_numeric("dec", &[3.0, 4.0]));
//! let viewer = ViewerState::rectilinear(AxisState::new("ra", 0.0, 5.0), AxisState::new("dec", 0.0, 5.0));
//! let layers = vec![LayerState::new(1, data).with_color("#1f77b4")];
//!
//! let figure = scatter2d_figure(&viewer, &layers, &StyleContext::light(), CanvasSize::default())?;
//! println!("{}", figure.to_json()?);
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml`: load [`style::StyleContext`] from YAML documents
//!
//! ## Logging
//!
//! Builders emit `tracing` events (`debug` per layer, `warn` for skipped
//! layers and degenerate values). Install a subscriber in the host to see
//! them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and parsing.
pub mod color;

/// Extents and bounding boxes.
pub mod geometry;

/// Colormaps, linear scales and image stretches.
pub mod scale;

/// Attribute-indexed data sources.
pub mod data;

/// Row masks over co-dependent arrays.
pub mod sanitize;

/// Fixed-resolution sampling of volumetric data.
pub mod sampling;

// ============================================================================
// Input State
// ============================================================================

/// Viewer and layer snapshots.
pub mod state;

/// Global style defaults.
pub mod style;

// ============================================================================
// Synthesis
// ============================================================================

/// Color, size and hover resolution.
pub mod resolve;

/// Per-axis specifications.
pub mod axis;

/// Chart layouts.
pub mod layout;

/// Trace builders per chart family.
pub mod traces;

/// Figure assembly and JSON output.
pub mod export;

/// Output records.
pub mod schema;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-plotspec operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use trueno_plotspec::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::data::{DataSource, DataTable, Grid};
    pub use crate::error::{Error, Result};
    pub use crate::export::{
        dendrogram_figure, dotplot_figure, histogram_figure, image_figure, profile_figure,
        scatter2d_figure, scatter3d_figure, volume_figure, Figure,
    };
    pub use crate::layout::LayoutBuilder;
    pub use crate::sampling::Cube;
    pub use crate::scale::{Colormap, Stretch};
    pub use crate::schema::{AxisSpec, LayoutSpec, TraceKind, TraceSpec};
    pub use crate::state::{
        AxisState, CanvasSize, ColorMode, LayerState, Projection, SizeConfig, VectorConfig,
        ViewerState,
    };
    pub use crate::style::StyleContext;
    pub use crate::traces::dendrogram::TreeLayout;
    pub use crate::traces::histogram::Histogram;
    pub use crate::traces::image::{ImageLayer, ImageScene};
    pub use crate::traces::profile::Profile;
    pub use crate::traces::volume::{VolumeLayer, VolumeOptions};
}
