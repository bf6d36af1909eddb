//! Colour type and parsing helpers.

pub use image::Rgba;

/// An 8-bit RGBA colour, the pixel type of the canvas.
pub type Color = Rgba<u8>;

pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Build an opaque colour from RGB components.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgba([r, g, b, 255])
}

/// Parse a hex colour string: `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

/// Format a colour as `#rrggbb`, appending alpha only when not opaque.
pub fn to_hex(color: Color) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_and_rgba() {
        assert_eq!(parse_hex_color("#ff8000"), Some(rgb(255, 128, 0)));
        assert_eq!(parse_hex_color("00ff0080"), Some(Rgba([0, 255, 0, 128])));
        assert_eq!(parse_hex_color(" #000000 "), Some(BLACK));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex(rgb(1, 2, 255)), "#0102ff");
        assert_eq!(to_hex(TRANSPARENT), "#00000000");
    }
}
