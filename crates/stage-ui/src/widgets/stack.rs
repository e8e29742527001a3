use std::any::Any;

use stage_core::coords::Edges;
use stage_dsl::{Result, Scanner};

use crate::registrar::PropertyRegistrar;
use crate::scan::EnumScanner;
use crate::view::{View, ViewClass};

use super::container::Container;

// ── Enums ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackDirection {
    Horizontal,
    #[default]
    Vertical,
}

/// Which edges of the cross axis children are pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackAlignment {
    First,
    Last,
    #[default]
    Both,
    Neither,
}

pub fn scan_direction(s: &mut Scanner<'_>) -> Result<StackDirection> {
    EnumScanner::new("StackDirection", &[
        ("horizontal", StackDirection::Horizontal),
        ("vertical",   StackDirection::Vertical),
    ])
    .scan(s)
}

pub fn scan_alignment(s: &mut Scanner<'_>) -> Result<StackAlignment> {
    EnumScanner::new("StackAlignment", &[
        ("first",   StackAlignment::First),
        ("last",    StackAlignment::Last),
        ("both",    StackAlignment::Both),
        ("neither", StackAlignment::Neither),
    ])
    .scan(s)
}

// ── Stack ─────────────────────────────────────────────────────────────────

/// Container that lines its subviews up along one axis.
///
/// Only the configuration is held here; positioning is left to the host.
#[derive(Default)]
pub struct Stack {
    pub base:          Container,
    pub direction:     StackDirection,
    pub alignment:     StackAlignment,
    pub spacing:       f32,
    pub content_inset: Edges,
}

impl ViewClass for Stack {
    const CLASS: &'static str = "Stack";
    const SUPERCLASS: Option<&'static str> = Some(Container::CLASS);
}

impl View for Stack {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn as_class(&self, class: &str) -> Option<&dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.base.as_class(class) }
    }

    fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.base.as_class_mut(class) }
    }

    fn container(&self) -> &Container {
        &self.base
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.base
    }

    fn summary(&self) -> String {
        format!(
            "{} {:?} spacing={} align={:?}",
            self.base.describe(),
            self.direction,
            self.spacing,
            self.alignment
        )
    }
}

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_class::<Stack>();
    registrar.register_properties::<Stack>(|props| {
        props.register_edges("contentInset").apply(|s, v| s.content_inset = v);
        props.register_float("spacing").apply(|s, v| s.spacing = v.max(0.0));
        props.register("stackingAlignment", scan_alignment).apply(|s, v| s.alignment = v);
        props.register("stackingDirection", scan_direction).apply(|s, v| s.direction = v);
    });
}
