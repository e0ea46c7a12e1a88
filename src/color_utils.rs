//! Color helpers for marker rendering.
//!
//! Colors are stored on annotations as `#RRGGBB` strings.

/// Marker colors for severity scores 1 (minor) to 4 (severe).
pub const SEVERITY_COLORS: [[u8; 3]; 4] = [
    [52, 199, 89],
    [255, 204, 0],
    [255, 149, 0],
    [255, 59, 48],
];

/// Parse a `#RRGGBB` (or `RRGGBB`) color.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Format an RGB color as lowercase `#rrggbb`.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Color for a severity score, or None if the score is outside the scale.
pub fn severity_color(score: u32) -> Option<String> {
    let index = usize::try_from(score).ok()?.checked_sub(1)?;
    SEVERITY_COLORS.get(index).map(|rgb| to_hex(*rgb))
}
