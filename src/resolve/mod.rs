//! Per-point visual channels derived from a layer's style.
//!
//! Every resolver takes the trace's sanitization [`Mask`](crate::sanitize::Mask)
//! so its output stays index-aligned with the surviving positions.

mod color;
mod hover;
mod size;

pub use color::{color_info, fixed_color, linear_colors, rgb_string, rgba_string, with_opacity};
pub use hover::{hover_info, HoverInfo};
pub use size::{fixed_size, linear_sizes, size_info, IMAGE_OVERLAY_BASE_SIZE, SCATTER_BASE_SIZE};
