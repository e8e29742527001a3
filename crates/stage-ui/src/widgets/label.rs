use std::any::Any;

use stage_core::paint::Color;
use stage_dsl::{Result, Scanner};

use crate::registrar::PropertyRegistrar;
use crate::scan::{scan_font, EnumScanner, FontSpec};
use crate::view::{View, ViewClass};

use super::container::Container;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

pub fn scan_text_alignment(s: &mut Scanner<'_>) -> Result<TextAlignment> {
    EnumScanner::new("TextAlignment", &[
        ("natural",   TextAlignment::Natural),
        ("left",      TextAlignment::Left),
        ("center",    TextAlignment::Center),
        ("right",     TextAlignment::Right),
        ("justified", TextAlignment::Justified),
    ])
    .scan(s)
}

/// Read-only text.
pub struct Label {
    pub base:            Container,
    pub text:            String,
    pub font:            FontSpec,
    pub text_color:      Color,
    pub alignment:       TextAlignment,
    /// `0` means unlimited.
    pub number_of_lines: i64,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            base:            Container::default(),
            text:            String::new(),
            font:            FontSpec::default(),
            text_color:      Color::BLACK,
            alignment:       TextAlignment::default(),
            number_of_lines: 1,
        }
    }
}

impl ViewClass for Label {
    const CLASS: &'static str = "Label";
    const SUPERCLASS: Option<&'static str> = Some(Container::CLASS);
}

impl View for Label {
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
            "{} text={:?} font=\"{}\" color={}",
            self.base.describe(),
            self.text,
            self.font,
            self.text_color.to_hex()
        )
    }
}

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_class::<Label>();
    registrar.register_properties::<Label>(|props| {
        props.register("text", |s| Ok(s.text().trim().to_string())).apply(|l, v| l.text = v);
        props.register("font", scan_font).apply(|l, v| l.font = v);
        props.register_color("textColor").apply(|l, v| l.text_color = v);
        props.register("textAlignment", scan_text_alignment).apply(|l, v| l.alignment = v);
        props.register_int("numberOfLines").apply(|l, v| l.number_of_lines = v.max(0));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_words() {
        let mut s = Scanner::new("Center", 1);
        assert_eq!(scan_text_alignment(&mut s).unwrap(), TextAlignment::Center);
        assert!(scan_text_alignment(&mut Scanner::new("middle", 1)).is_err());
    }

    #[test]
    fn summary_mentions_text_and_font() {
        let label = Label { text: "Hi".into(), ..Label::default() };
        let summary = label.summary();
        assert!(summary.contains("text=\"Hi\""));
        assert!(summary.contains("font=\"14 system\""));
    }
}
