/// Straight-alpha RGBA color, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// CSS-style names understood by [`Color::named`].
const NAMED: &[(&str, [u8; 4])] = &[
    ("black",     [0x00, 0x00, 0x00, 0xff]),
    ("blue",      [0x00, 0x00, 0xff, 0xff]),
    ("brown",     [0x99, 0x66, 0x33, 0xff]),
    ("clear",     [0x00, 0x00, 0x00, 0x00]),
    ("cyan",      [0x00, 0xff, 0xff, 0xff]),
    ("darkgray",  [0x55, 0x55, 0x55, 0xff]),
    ("gray",      [0x80, 0x80, 0x80, 0xff]),
    ("green",     [0x00, 0xff, 0x00, 0xff]),
    ("lightgray", [0xaa, 0xaa, 0xaa, 0xff]),
    ("magenta",   [0xff, 0x00, 0xff, 0xff]),
    ("orange",    [0xff, 0x80, 0x00, 0xff]),
    ("purple",    [0x80, 0x00, 0x80, 0xff]),
    ("red",       [0xff, 0x00, 0x00, 0xff]),
    ("white",     [0xff, 0xff, 0xff, 0xff]),
    ("yellow",    [0xff, 0xff, 0x00, 0xff]),
];

impl Color {
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Parses `rgb`, `rrggbb` or `rrggbbaa` hex digits. A leading `#` is optional.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
                Some(Self::from_srgb_u8(nib(0)?, nib(1)?, nib(2)?, 0xff))
            }
            6 => Some(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, 0xff)),
            8 => Some(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Looks up a color by name, ignoring ASCII case.
    pub fn named(name: &str) -> Option<Self> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, [r, g, b, a])| Self::from_srgb_u8(*r, *g, *b, *a))
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// `#rrggbbaa` rendering used in view summaries.
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b), q(self.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_three_digits_expand() {
        assert_eq!(Color::from_hex("#f00"), Some(Color::from_srgb_u8(255, 0, 0, 255)));
    }

    #[test]
    fn hex_six_and_eight_digits() {
        assert_eq!(Color::from_hex("336699"), Some(Color::from_srgb_u8(0x33, 0x66, 0x99, 0xff)));
        assert_eq!(Color::from_hex("#33669980"), Some(Color::from_srgb_u8(0x33, 0x66, 0x99, 0x80)));
    }

    #[test]
    fn hex_rejects_garbage() {
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn named_is_case_insensitive() {
        assert_eq!(Color::named("Red"), Some(Color::from_srgb_u8(255, 0, 0, 255)));
        assert_eq!(Color::named("clear"), Some(Color::CLEAR));
        assert_eq!(Color::named("chartreuse"), None);
    }

    #[test]
    fn to_hex_round_trips_bytes() {
        assert_eq!(Color::from_srgb_u8(0x12, 0x34, 0x56, 0x78).to_hex(), "#12345678");
    }
}
