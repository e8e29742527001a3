use std::any::Any;

use stage_core::coords::{Edges, Rect};
use stage_core::paint::Color;

use crate::context::LiveContext;
use crate::registrar::PropertyRegistrar;
use crate::view::{View, ViewClass, ViewRef};

/// Base view: a frame plus the appearance every view shares, and the list
/// of attached subviews.
///
/// All properties are optional; a default `Container` is an empty, fully
/// opaque, visible box at the origin.
pub struct Container {
    pub frame:           Rect,
    pub padding:         Edges,
    pub background:      Option<Color>,
    pub tint:            Option<Color>,
    pub border_color:    Option<Color>,
    pub border_width:    f32,
    pub corner_radius:   f32,
    pub alpha:           f32,
    pub hidden:          bool,
    pub clips_to_bounds: bool,
    pub interactive:     bool,
    subviews:            Vec<ViewRef>,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            frame:           Rect::default(),
            padding:         Edges::default(),
            background:      None,
            tint:            None,
            border_color:    None,
            border_width:    0.0,
            corner_radius:   0.0,
            alpha:           1.0,
            hidden:          false,
            clips_to_bounds: false,
            interactive:     true,
            subviews:        Vec::new(),
        }
    }
}

impl Container {
    pub fn add_subview(&mut self, view: ViewRef) {
        self.subviews.push(view);
    }

    #[inline]
    pub fn subviews(&self) -> &[ViewRef] {
        &self.subviews
    }

    /// Frame followed by every property that differs from the default.
    pub fn describe(&self) -> String {
        let f = self.frame;
        let mut parts = vec![format!(
            "frame=({}, {}, {}, {})",
            f.origin.x, f.origin.y, f.size.x, f.size.y
        )];
        if let Some(c) = self.background {
            parts.push(format!("background={}", c.to_hex()));
        }
        if let Some(c) = self.tint {
            parts.push(format!("tint={}", c.to_hex()));
        }
        if let Some(c) = self.border_color {
            parts.push(format!("border={} {}", self.border_width, c.to_hex()));
        }
        if self.corner_radius > 0.0 {
            parts.push(format!("radius={}", self.corner_radius));
        }
        if self.padding != Edges::default() {
            let p = self.padding;
            parts.push(format!("padding=({}, {}, {}, {})", p.top, p.left, p.bottom, p.right));
        }
        if self.alpha < 1.0 {
            parts.push(format!("alpha={}", self.alpha));
        }
        if self.hidden {
            parts.push("hidden".to_string());
        }
        if self.clips_to_bounds {
            parts.push("clips".to_string());
        }
        if !self.interactive {
            parts.push("non-interactive".to_string());
        }
        parts.join(" ")
    }
}

impl ViewClass for Container {
    const CLASS: &'static str = "Container";
    const SUPERCLASS: Option<&'static str> = None;
}

impl View for Container {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn as_class(&self, class: &str) -> Option<&dyn Any> {
        (class == Self::CLASS).then_some(self as &dyn Any)
    }

    fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
        (class == Self::CLASS).then_some(self as &mut dyn Any)
    }

    fn container(&self) -> &Container {
        self
    }

    fn container_mut(&mut self) -> &mut Container {
        self
    }
}

// ── Bindings ──────────────────────────────────────────────────────────────

pub(crate) fn register(registrar: &mut PropertyRegistrar) {
    registrar.register_properties::<Container>(|props| {
        props.register_float("alpha").apply(|c, v| c.alpha = v.clamp(0.0, 1.0));
        props.register_float("opacity").apply(|c, v| c.alpha = v.clamp(0.0, 1.0));

        props.register_color("backgroundColor").apply(|c, v| c.background = Some(v));
        props.register_color("tintColor").apply(|c, v| c.tint = Some(v));
        props.register_color("borderColor").apply(|c, v| c.border_color = Some(v));
        props.register_float("borderRadius").apply(|c, v| c.corner_radius = v.max(0.0));
        props.register_float("borderWidth").apply(|c, v| c.border_width = v.max(0.0));

        props.register_bool("clipsToBounds").apply(|c, v| c.clips_to_bounds = v);
        props.register_bool("hidden").apply(|c, v| c.hidden = v);
        props.register_bool("userInteractionEnabled").apply(|c, v| c.interactive = v);

        // Geometry
        props.register_rect("frame").apply(|c, v| c.frame = v);
        props.register_point("origin").apply(|c, v| c.frame.origin = v);
        props.register_size("size").apply(|c, v| c.frame = c.frame.with_size(v));
        props.register_edges("padding").apply(|c, v| c.padding = v);

        props
            .register("matchSize", |s| s.scan_identifier().map(str::to_string))
            .apply_attached(match_size);
    });
}

/// Copies the frame size of the named view, once the tree is attached.
fn match_size(container: &mut Container, source: String, context: &LiveContext) -> stage_dsl::Result<()> {
    let view = context.lookup(&source)?;
    let Ok(other) = view.try_borrow() else {
        log::warn!("matchSize: '{source}' is the view being configured; ignoring");
        return Ok(());
    };
    container.frame = container.frame.with_size(other.container().frame.size);
    Ok(())
}
