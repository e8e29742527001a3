use std::any::Any;

use stage_core::coords::Edges;
use stage_core::paint::Color;

use crate::registrar::PropertyRegistrar;
use crate::view::{View, ViewClass};

use super::container::Container;
use super::label::Label;

/// A label with per-state titles and colors.
///
/// Declared `text` goes to the normal-state title, which the embedded label
/// mirrors.
#[derive(Default)]
pub struct Button {
    pub label:                Label,
    pub title:                String,
    pub highlight_title:      Option<String>,
    pub highlight_text_color: Option<Color>,
    pub highlight_background: Option<Color>,
    pub content_insets:       Edges,
    pub underline:            bool,
}

impl Button {
    pub fn set_title(&mut self, title: String) {
        self.label.text = title.clone();
        self.title = title;
    }
}

impl ViewClass for Button {
    const CLASS: &'static str = "Button";
    const SUPERCLASS: Option<&'static str> = Some(Label::CLASS);
}

impl View for Button {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn as_class(&self, class: &str) -> Option<&dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.label.as_class(class) }
    }

    fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
        if class == Self::CLASS { Some(self) } else { self.label.as_class_mut(class) }
    }

    fn container(&self) -> &Container {
        self.label.container()
    }

    fn container_mut(&mut self) -> &mut Container {
        self.label.container_mut()
    }

    fn summary(&self) -> String {
        let mut out = format!("{} title={:?}", self.label.base.describe(), self.title);
        if let Some(t) = &self.highlight_title {
            out.push_str(&format!(" highlight={t:?}"));
        }
        if self.underline {
            out.push_str(" underline");
        }
        out
    }
}

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_class::<Button>();
    registrar.register_properties::<Button>(|props| {
        props.register("text", |s| Ok(s.text().trim().to_string())).apply(Button::set_title);
        props
            .register("highlightText", |s| Ok(s.text().trim().to_string()))
            .apply(|b, v| b.highlight_title = Some(v));
        props.register_color("highlightTextColor").apply(|b, v| b.highlight_text_color = Some(v));
        props.register_color("highlightBackgroundColor").apply(|b, v| b.highlight_background = Some(v));
        props.register_edges("contentEdgeInsets").apply(|b, v| b.content_insets = v);
        props.register_bool("underlineText").apply(|b, v| b.underline = v);
    });
}
