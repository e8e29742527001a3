/// Insets on all four sides (content insets, margins).
///
/// Declared in the DSL as `{ top, left, bottom, right }`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Edges {
    #[inline]
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Builds insets from a scanned `{top, left, bottom, right}` list.
    #[inline]
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [top, left, bottom, right] => Some(Self::new(*top, *left, *bottom, *right)),
            _ => None,
        }
    }
}
