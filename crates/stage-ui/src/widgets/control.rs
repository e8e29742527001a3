use std::any::Any;

use crate::registrar::PropertyRegistrar;
use crate::view::{View, ViewClass};

use super::container::Container;

/// Shared state of interactive views. Registered as abstract: definitions
/// cannot instantiate it directly.
pub struct Control {
    pub base:     Container,
    pub enabled:  bool,
    pub selected: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self { base: Container::default(), enabled: true, selected: false }
    }
}

impl ViewClass for Control {
    const CLASS: &'static str = "Control";
    const SUPERCLASS: Option<&'static str> = Some(Container::CLASS);
}

impl View for Control {
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
        let mut out = self.base.describe();
        if !self.enabled {
            out.push_str(" disabled");
        }
        if self.selected {
            out.push_str(" selected");
        }
        out
    }
}

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_abstract(Control::CLASS, Control::SUPERCLASS);
    registrar.register_properties::<Control>(|props| {
        props.register_bool("enabled").apply(|c, v| c.enabled = v);
        props.register_bool("selected").apply(|c, v| c.selected = v);
    });
}
