//! Color representation for view properties.
//!
//! Colors are straight (non-premultiplied) RGBA in `[0, 1]`; views store them
//! as declared and leave compositing to whoever draws them.

pub mod color;

pub use color::Color;
