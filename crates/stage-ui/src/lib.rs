//! Stage UI: realizes compiled stage definitions into live view trees.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`view`] | `View`, `ViewClass`, `ViewRef`, class-chain downcasts |
//! | [`registrar`] | `PropertyRegistrar`: class registry and per-class property tables |
//! | [`registration`] | `PropertyRegistration`, the typed `Properties` handle |
//! | [`converter`] | `Converter`, `ConverterBuilder`, and the two-valued `Pass` |
//! | [`scan`] | value scanners for colors, geometry, fonts, and enums |
//! | [`definition`] | `Definition`: a document plus the registrar it resolves against |
//! | [`context`] | `LiveContext`, `BindingMutator`, `ViewMapping` |
//! | [`factory`] | `DefinitionFactory` and the `ErrorListener`s |
//! | [`widgets`] | stock classes: `Container`, `Control`, `Label`, `Button`, `Stack`, `TextField` |
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stage_ui::prelude::*;
//!
//! let src = "Main:\n  Greeting\n\nGreeting:\n  .class = Label\n  .text = Hello #{name}\n";
//! let definition = DefinitionFactory::new().build_str(src, "inline").unwrap();
//!
//! let data = BTreeMap::from([("name".to_string(), "World".to_string())]);
//! let mut context = definition.load_templated("Main", data).unwrap();
//! context.attach(view_ref(Container::default())).unwrap();
//!
//! let text = context.with_view::<Label, _>("Greeting", |l| l.text.clone()).unwrap();
//! assert_eq!(text, "Hello World");
//!
//! context.update(|m| m.set("name", "Mars")).unwrap();
//! let text = context.with_view::<Label, _>("Greeting", |l| l.text.clone()).unwrap();
//! assert_eq!(text, "Hello Mars");
//! ```
//!
//! # Custom views
//!
//! Implement [`View`](view::View) and [`ViewClass`](view::ViewClass), embed
//! the superclass, and register the class and its properties through
//! [`DefinitionFactory::register_types`](factory::DefinitionFactory::register_types).

pub mod context;
pub mod converter;
pub mod definition;
pub mod factory;
pub mod registrar;
pub mod registration;
pub mod scan;
pub mod view;
pub mod widgets;

/// The types a host needs to compile, realize, and extend definitions.
pub mod prelude {
    pub use crate::context::{BindingMutator, LiveContext, LiveState, Mapper, ViewMapping};
    pub use crate::converter::Pass;
    pub use crate::definition::Definition;
    pub use crate::factory::{DefinitionFactory, ErrorListener, ErrorLog, LogErrorListener};
    pub use crate::registrar::PropertyRegistrar;
    pub use crate::registration::Properties;
    pub use crate::scan::{EnumScanner, FontSpec};
    pub use crate::view::{downcast_mut, downcast_ref, view_ref, View, ViewClass, ViewRef};
    pub use crate::widgets::{
        Button, Container, Control, Label, Stack, StackAlignment, StackDirection, TextAlignment, TextField,
    };

    pub use stage_core::coords::{Edges, Rect, Vec2};
    pub use stage_core::paint::Color;
    pub use stage_dsl::{Result, Scanner, StageError};
}
