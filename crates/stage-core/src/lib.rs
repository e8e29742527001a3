//! Stage core crate.
//!
//! Value primitives that property converters produce (geometry and color)
//! and the process-wide logger setup used by hosts.

pub mod coords;
pub mod logging;
pub mod paint;
