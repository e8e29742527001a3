//! Stock view classes and their property bindings.

pub mod button;
pub mod container;
pub mod control;
pub mod label;
pub mod stack;
pub mod text_field;

pub use button::Button;
pub use container::Container;
pub use control::Control;
pub use label::{Label, TextAlignment};
pub use stack::{Stack, StackAlignment, StackDirection};
pub use text_field::TextField;

use crate::registrar::PropertyRegistrar;

/// Registers every stock class and its converters with `registrar`.
///
/// Superclasses go first so a subclass can override a property they
/// declare.
pub fn load_defaults(registrar: &mut PropertyRegistrar) {
    container::register(registrar);
    control::register(registrar);
    label::register(registrar);
    button::register(registrar);
    stack::register(registrar);
    text_field::register(registrar);
}
