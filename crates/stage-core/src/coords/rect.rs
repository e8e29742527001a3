use super::Vec2;

/// Axis-aligned rectangle in logical points (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Builds a rect from a scanned `{x, y, width, height}` list.
    #[inline]
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x, y, w, h] => Some(Self::new(*x, *y, *w, *h)),
            _ => None,
        }
    }

    #[inline]
    pub fn with_size(self, size: Vec2) -> Self {
        Self { size, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── from_slice ────────────────────────────────────────────────────────

    #[test]
    fn from_slice_four_values() {
        assert_eq!(Rect::from_slice(&[1.0, 2.0, 3.0, 4.0]), Some(r(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn from_slice_wrong_arity() {
        assert_eq!(Rect::from_slice(&[1.0, 2.0, 3.0]), None);
    }

    // ── with_size ─────────────────────────────────────────────────────────

    #[test]
    fn with_size_keeps_origin() {
        assert_eq!(r(5.0, 6.0, 1.0, 1.0).with_size(Vec2::new(8.0, 9.0)), r(5.0, 6.0, 8.0, 9.0));
    }
}
