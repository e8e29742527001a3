//! Typed value scanners used by the default bindings.

use stage_core::coords::{Edges, Rect, Vec2};
use stage_core::paint::Color;
use stage_dsl::{Result, Scanner};

// ── Colors ────────────────────────────────────────────────────────────────

/// `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)` with
/// channels `0..=255` and alpha `0..=1`, or a named color.
pub fn scan_color(s: &mut Scanner<'_>) -> Result<Color> {
    if s.scan_literal("#") {
        let hex = s.scan_chars(|c| c.is_ascii_hexdigit()).map_err(|_| s.error("hex color digits"))?;
        return Color::from_hex(hex).ok_or_else(|| s.error("a 3, 6 or 8 digit hex color"));
    }
    if s.scan_literal("rgba") {
        return scan_rgb_channels(s, 4, "color format rgba(R, G, B, A)");
    }
    if s.scan_literal("rgb") {
        return scan_rgb_channels(s, 3, "color format rgb(R, G, B)");
    }
    let name = s.scan_identifier().map_err(|_| s.error("a color"))?;
    Color::named(name).ok_or_else(|| s.error("a known color name"))
}

fn scan_rgb_channels(s: &mut Scanner<'_>, arity: usize, expected: &str) -> Result<Color> {
    let dims = s.scan_bracketed_list("(", ")", Scanner::scan_number)?;
    let channel = |v: f64| (0.0..256.0).contains(&v).then_some(v as u8);
    match dims.as_slice() {
        [r, g, b, rest @ ..] if rest.len() + 3 == arity => {
            let (Some(r), Some(g), Some(b)) = (channel(*r), channel(*g), channel(*b)) else {
                return Err(s.error(expected));
            };
            let alpha = match rest {
                [] => 1.0,
                [a] if (0.0..=1.0).contains(a) => *a as f32,
                _ => return Err(s.error(expected)),
            };
            Ok(Color::from_srgb_u8(r, g, b, 255).with_alpha(alpha))
        }
        _ => Err(s.error(expected)),
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────

fn scan_braced<T>(s: &mut Scanner<'_>, build: fn(&[f32]) -> Option<T>, expected: &str) -> Result<T> {
    let dims = s.scan_bracketed_list("{", "}", Scanner::scan_float)?;
    build(&dims).ok_or_else(|| s.error(expected))
}

/// `{x, y}`
pub fn scan_point(s: &mut Scanner<'_>) -> Result<Vec2> {
    scan_braced(s, Vec2::from_slice, "point in format {x, y}")
}

/// `{width, height}`
pub fn scan_size(s: &mut Scanner<'_>) -> Result<Vec2> {
    scan_braced(s, Vec2::from_slice, "size in format {width, height}")
}

/// `{x, y, width, height}`
pub fn scan_rect(s: &mut Scanner<'_>) -> Result<Rect> {
    scan_braced(s, Rect::from_slice, "rect in format {x, y, width, height}")
}

/// `{top, left, bottom, right}`
pub fn scan_edges(s: &mut Scanner<'_>) -> Result<Edges> {
    scan_braced(s, Edges::from_slice, "edge insets in format {top, left, bottom, right}")
}

// ── Fonts ─────────────────────────────────────────────────────────────────

/// Point size used when a font spec leaves it out.
pub const DEFAULT_POINT_SIZE: f32 = 14.0;

/// Family and size. Nothing here resolves the family against real fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size:   f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { family: None, size: DEFAULT_POINT_SIZE }
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.family {
            Some(family) => write!(f, "{} {}", self.size, family),
            None => write!(f, "{} system", self.size),
        }
    }
}

/// `14 Menlo`, `Menlo 14`, `Menlo`, or `14`.
pub fn scan_font(s: &mut Scanner<'_>) -> Result<FontSpec> {
    let mut spec = FontSpec::default();
    if let Ok(size) = s.scan_float() {
        spec.size = size;
    }
    if !s.is_at_end() {
        let family = s.scan_up_to_chars(char::is_whitespace)?;
        spec.family = Some(family.to_string());
        if !s.is_at_end() {
            spec.size = s.scan_float()?;
        }
    }
    if !s.is_at_end() {
        return Err(s.error("font in format '<size> <family>'"));
    }
    if spec.size <= 0.0 {
        return Err(s.error("a positive font size"));
    }
    Ok(spec)
}

// ── Enums ─────────────────────────────────────────────────────────────────

/// Maps lowercase words to values of `T`.
///
/// Matching ignores ASCII case. Failures list every accepted word.
#[derive(Debug, Clone)]
pub struct EnumScanner<T: Copy> {
    type_name: &'static str,
    values:    Vec<(&'static str, T)>,
}

impl<T: Copy> EnumScanner<T> {
    pub fn new(type_name: &'static str, values: &[(&'static str, T)]) -> Self {
        debug_assert!(
            values.iter().all(|(k, _)| k.to_ascii_lowercase() == *k && k.trim() == *k),
            "enum words must be lowercase and trimmed"
        );
        Self { type_name, values: values.to_vec() }
    }

    pub fn scan(&self, s: &mut Scanner<'_>) -> Result<T> {
        let word = s.scan_identifier().map_err(|_| self.error(s))?;
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(word))
            .map(|(_, v)| *v)
            .ok_or_else(|| self.error(s))
    }

    fn error(&self, s: &Scanner<'_>) -> stage_dsl::StageError {
        let words: Vec<&str> = self.values.iter().map(|(k, _)| *k).collect();
        stage_dsl::StageError::unrecognized(
            format!(
                "Unrecognized value '{}' for {}. Possible values: {}",
                s.text().trim(),
                self.type_name,
                words.join(", ")
            ),
            s.line(),
        )
    }
}
