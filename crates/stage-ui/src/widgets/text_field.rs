use std::any::Any;

use stage_core::paint::Color;

use crate::context::LiveContext;
use crate::registrar::PropertyRegistrar;
use crate::scan::{scan_font, FontSpec};
use crate::view::{View, ViewClass};

use super::container::Container;
use super::control::Control;
use super::label::{scan_text_alignment, TextAlignment};

/// Single-line editable text.
pub struct TextField {
    pub control:                 Control,
    pub text:                    String,
    pub placeholder:             String,
    pub font:                    FontSpec,
    pub text_color:              Color,
    pub alignment:               TextAlignment,
    pub secure:                  bool,
    pub clears_on_begin_editing: bool,
    /// Name of the bound view shown above the keyboard.
    pub accessory_view:          Option<String>,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            control:                 Control::default(),
            text:                    String::new(),
            placeholder:             String::new(),
            font:                    FontSpec::default(),
            text_color:              Color::BLACK,
            alignment:               TextAlignment::default(),
            secure:                  false,
            clears_on_begin_editing: false,
            accessory_view:          None,
        }
    }
}

impl ViewClass for TextField {
    const CLASS: &'static str = "TextField";
    const SUPERCLASS: Option<&'static str> = Some(Control::CLASS);
}

impl View for TextField {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn as_class(&self, class: &str) -> Option<&dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.control.as_class(class) }
    }

    fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.control.as_class_mut(class) }
    }

    fn container(&self) -> &Container {
        self.control.container()
    }

    fn container_mut(&mut self) -> &mut Container {
        self.control.container_mut()
    }

    fn summary(&self) -> String {
        let shown = if self.secure { "•".repeat(self.text.chars().count()) } else { self.text.clone() };
        let mut out = format!("{} text={shown:?} placeholder={:?}", self.control.summary(), self.placeholder);
        if let Some(name) = &self.accessory_view {
            out.push_str(&format!(" accessory={name}"));
        }
        out
    }
}

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_class::<TextField>();
    registrar.register_properties::<TextField>(|props| {
        props.register_text("text").apply(|t, v| t.text = v);
        props.register_text("placeholder").apply(|t, v| t.placeholder = v);
        props.register("font", scan_font).apply(|t, v| t.font = v);
        props.register_color("textColor").apply(|t, v| t.text_color = v);
        props.register("textAlignment", scan_text_alignment).apply(|t, v| t.alignment = v);
        props.register_bool("secureTextEntry").apply(|t, v| t.secure = v);
        props.register_bool("clearsOnBeginEditing").apply(|t, v| t.clears_on_begin_editing = v);
        props
            .register("inputAccessoryView", |s| s.scan_identifier().map(str::to_string))
            .apply_attached(attach_accessory);
    });
}

fn attach_accessory(field: &mut TextField, name: String, context: &LiveContext) -> stage_dsl::Result<()> {
    if context.lookup(&name).is_err() {
        log::warn!("inputAccessoryView: no view named '{name}'; leaving it unset");
        return Ok(());
    }
    field.accessory_view = Some(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_text_is_masked_in_summary() {
        let field = TextField { text: "hunter2".into(), secure: true, ..TextField::default() };
        let summary = field.summary();
        assert!(summary.contains("•••••••"), "{summary}");
        assert!(!summary.contains("hunter2"));
    }
}
