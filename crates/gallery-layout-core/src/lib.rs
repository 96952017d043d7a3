//! Core library for justified image-gallery rows.
//!
//! - Row breaking: cheapest path through a boundary graph built from image aspect ratios
//! - Placement: gap-aware positions for every image inside a fixed-width container
//! - Data model is serde-serializable; JSON exporters are provided here, file output lives in the CLI crate.
//!
//! Quick example:
//! ```
//! use gallery_layout_core::{ImageBox, LayoutConfig, layout_gallery};
//! # fn main() -> gallery_layout_core::Result<()> {
//! let images = vec![
//!     ImageBox::new("wide.jpg", 2000.0, 1000.0),
//!     ImageBox::new("square.jpg", 1000.0, 1000.0),
//!     ImageBox::new("tall.jpg", 800.0, 1000.0),
//! ];
//! let cfg = LayoutConfig { viewport_width: 1000.0, ..Default::default() };
//! let layout = layout_gallery(&images, &cfg)?;
//! assert_eq!(layout.placements.len(), 3);
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod packer;

pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use packer::{RowPacker, pack_rows, validate_items};

/// Convenience prelude for common types and functions.
/// Importing `gallery_layout_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{LayoutConfig, LayoutConfigBuilder};
    pub use crate::error::{LayoutError, Result};
    pub use crate::model::{
        Dimensions, GalleryLayout, ImageBox, LayoutStats, Partition, Placement, RowMetrics,
    };
    pub use crate::packer::trace::{TraceSink, TracingSink};
    pub use crate::{
        RowPacker, layout_gallery, layout_partition, pack_rows, to_json_array, to_json_hash,
    };
}
