//! Nine-patch image generation for droidtools.
//!
//! This crate provides:
//! - Guide extraction from nine-patch SVG sources
//! - Scaling of guides to a target export size
//! - Framing and guide drawing on the exported PNG

#![warn(missing_docs)]

mod error;
pub mod ninepatch;
pub mod svg;

pub use error::{NinePatchError, Result};
pub use ninepatch::{draw_guides, extend_border, generate, InkscapeExporter, SvgExporter};
pub use svg::{parse_guide, Guide, GuideKind, ScaledSvg, Svg};
