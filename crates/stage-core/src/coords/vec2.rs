/// 2D vector in logical points. Used both as a point (`{x, y}`) and as a
/// size (`{width, height}`).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Builds a vector from the first two entries of a scanned list.
    ///
    /// Returns `None` unless `values` holds exactly two numbers.
    #[inline]
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x, y] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_two_values() {
        assert_eq!(Vec2::from_slice(&[1.0, 2.0]), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(Vec2::from_slice(&[1.0]), None);
        assert_eq!(Vec2::from_slice(&[1.0, 2.0, 3.0]), None);
    }
}
