//! Geometry types produced by property converters.
//!
//! Canonical space:
//! - Logical points
//! - Origin top-left
//! - +X right, +Y down

mod edges;
mod rect;
mod vec2;

pub use edges::Edges;
pub use rect::Rect;
pub use vec2::Vec2;
