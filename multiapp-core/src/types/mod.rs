//! Core data types shared across the multiapp workspace.
//!
//! - [`PackageId`]: the key that ties catalog entries and instances together.
//! - [`geometry`]: integer [`Point`], [`Size`] and [`Rect`] for panel placement.

pub mod geometry;
pub mod package_id;

pub use geometry::{Point, Rect, Size};
pub use package_id::PackageId;
