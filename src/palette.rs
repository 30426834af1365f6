//! Tile colours for front ends.
//!
//! Each tile value from 2 to 2048 has its own background and text colour; anything
//! larger shares the "beyond" style and empty cells use a flat colour of their own.

/// Colour of the board behind the cells.
pub const BOARD_BACKGROUND: &str = "#92877d";

/// Background and text colour for one cell, as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub const EMPTY_STYLE: TileStyle = TileStyle {
    background: "#9e948a",
    foreground: "#9e948a",
};

pub const BEYOND_STYLE: TileStyle = TileStyle {
    background: "#3c3a32",
    foreground: "#f9f6f2",
};

const DARK_TEXT: &str = "#776e65";
const LIGHT_TEXT: &str = "#f9f6f2";

/// Returns the style for a cell holding `value`.
///
/// # Examples
/// ```
/// use tile2048::palette::{tile_style, BEYOND_STYLE, EMPTY_STYLE};
/// assert_eq!(tile_style(0), EMPTY_STYLE);
/// assert_eq!(tile_style(2).background, "#eee4da");
/// assert_eq!(tile_style(8192), BEYOND_STYLE);
/// ```
pub fn tile_style(value: u32) -> TileStyle {
    let (background, foreground) = match value {
        0 => return EMPTY_STYLE,
        2 => ("#eee4da", DARK_TEXT),
        4 => ("#ede0c8", DARK_TEXT),
        8 => ("#f2b179", LIGHT_TEXT),
        16 => ("#f59563", LIGHT_TEXT),
        32 => ("#f67c5f", LIGHT_TEXT),
        64 => ("#f65e3b", LIGHT_TEXT),
        128 => ("#edcf72", LIGHT_TEXT),
        256 => ("#edcc61", LIGHT_TEXT),
        512 => ("#edc850", LIGHT_TEXT),
        1024 => ("#edc53f", LIGHT_TEXT),
        2048 => ("#edc22e", LIGHT_TEXT),
        _ => return BEYOND_STYLE,
    };
    TileStyle {
        background,
        foreground,
    }
}

/// Parses a `#rrggbb` colour into its red, green and blue components.
///
/// Returns `None` for anything that is not a `#` followed by six hex digits.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
