use indexmap::IndexMap;
use stage_core::coords::{Edges, Rect, Vec2};
use stage_core::paint::Color;
use stage_dsl::{Result, Scanner};

use crate::converter::{Converter, ConverterBuilder, Pass};
use crate::scan;
use crate::view::{downcast_mut, View, ViewClass};

// ── PropertyRegistration ──────────────────────────────────────────────────

/// Property name → converter table for one view class.
#[derive(Clone, Default)]
pub struct PropertyRegistration {
    class:      String,
    converters: IndexMap<String, Converter>,
}

impl PropertyRegistration {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), converters: IndexMap::new() }
    }

    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[inline]
    pub fn contains(&self, property: &str) -> bool {
        self.converters.contains_key(property)
    }

    #[inline]
    pub fn converter(&self, property: &str) -> Option<&Converter> {
        self.converters.get(property)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub(crate) fn converters_mut(&mut self) -> &mut IndexMap<String, Converter> {
        &mut self.converters
    }

    /// Runs the converter for `property` if this table has one.
    /// `Ok(false)` means the property is not declared here.
    pub fn receive(&self, property: &str, scanner: &mut Scanner<'_>, view: &mut dyn View, pass: Pass<'_>) -> Result<bool> {
        match self.converters.get(property) {
            Some(converter) => converter.execute(scanner, view, pass).map(|()| true),
            None => Ok(false),
        }
    }
}

// ── Properties ────────────────────────────────────────────────────────────

/// Typed handle on the table for view class `V`.
pub struct Properties<'r, V> {
    table:   &'r mut PropertyRegistration,
    _marker: std::marker::PhantomData<fn() -> V>,
}

impl<'r, V: ViewClass> Properties<'r, V> {
    pub(crate) fn new(table: &'r mut PropertyRegistration) -> Self {
        Self { table, _marker: std::marker::PhantomData }
    }

    /// Starts a converter for `name`; chain `.apply(..)` and/or
    /// `.apply_attached(..)` to install it.
    pub fn register<T: 'static>(
        &mut self,
        name: &str,
        scan: impl Fn(&mut Scanner<'_>) -> Result<T> + 'static,
    ) -> ConverterBuilder<'_, T, V> {
        ConverterBuilder::new(self.table, name, scan, downcast_mut::<V>)
    }

    pub fn register_bool(&mut self, name: &str) -> ConverterBuilder<'_, bool, V> {
        self.register(name, |s| s.scan_bool())
    }

    pub fn register_float(&mut self, name: &str) -> ConverterBuilder<'_, f32, V> {
        self.register(name, |s| s.scan_float())
    }

    pub fn register_int(&mut self, name: &str) -> ConverterBuilder<'_, i64, V> {
        self.register(name, |s| s.scan_int())
    }

    pub fn register_color(&mut self, name: &str) -> ConverterBuilder<'_, Color, V> {
        self.register(name, scan::scan_color)
    }

    /// Whole value with each line trimmed, lines joined by `\n`.
    pub fn register_text(&mut self, name: &str) -> ConverterBuilder<'_, String, V> {
        self.register(name, |s| Ok(s.lines_trimmed().join("\n")))
    }

    pub fn register_point(&mut self, name: &str) -> ConverterBuilder<'_, Vec2, V> {
        self.register(name, scan::scan_point)
    }

    pub fn register_size(&mut self, name: &str) -> ConverterBuilder<'_, Vec2, V> {
        self.register(name, scan::scan_size)
    }

    pub fn register_rect(&mut self, name: &str) -> ConverterBuilder<'_, Rect, V> {
        self.register(name, scan::scan_rect)
    }

    pub fn register_edges(&mut self, name: &str) -> ConverterBuilder<'_, Edges, V> {
        self.register(name, scan::scan_edges)
    }
}
