//! Block and field colours, plus the colour-picker palette grid

use std::fmt;

use serde::Deserialize;

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour(u32);

/// Saturation used when deriving a block colour from a hue
const HUE_SATURATION: f64 = 0.45;
/// Value used when deriving a block colour from a hue
const HUE_VALUE: f64 = 0.65;

impl Colour {
    pub const BLACK: Colour = Colour(0x000000);
    pub const WHITE: Colour = Colour(0xffffff);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Colour(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Build from a packed `0xRRGGBB` value; any alpha byte is dropped
    pub fn from_packed(rgb: u32) -> Self {
        Colour(rgb & 0x00ff_ffff)
    }

    pub fn packed(&self) -> u32 {
        self.0
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Colour),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Colour)
            }
            _ => None,
        }
    }

    /// Derive a block colour from a hue in degrees
    pub fn from_hue(hue: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = HUE_VALUE * HUE_SATURATION;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = HUE_VALUE - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Colour::from_rgb(channel(r), channel(g), channel(b))
    }

    /// CSS hex notation
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

/// A colour as written in a workspace description: hex string or hue number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColourSpec {
    Hue(f64),
    Hex(String),
}

impl ColourSpec {
    pub fn resolve(&self) -> Option<Colour> {
        match self {
            ColourSpec::Hue(hue) => Some(Colour::from_hue(*hue)),
            ColourSpec::Hex(hex) => Colour::parse_hex(hex),
        }
    }
}

pub const PALETTE_COLUMNS: usize = 7;
pub const PALETTE_ROWS: usize = 10;
pub const PALETTE_CELL_WIDTH: i32 = 50;
pub const PALETTE_CELL_HEIGHT: i32 = 50;

/// Colour-picker palette, one row per hue family from light to dark
pub const PALETTE: [u32; PALETTE_COLUMNS * PALETTE_ROWS] = [
    // grays
    0xffffff, 0xcccccc, 0xc0c0c0, 0x999999, 0x666666, 0x333333, 0x000000,
    // reds
    0xffcccc, 0xff6666, 0xff0000, 0xcc0000, 0x990000, 0x660000, 0x330000,
    // oranges
    0xffcc99, 0xff9966, 0xff9900, 0xff6600, 0xcc6600, 0x993300, 0x663300,
    // yellows
    0xffff99, 0xffff66, 0xffcc66, 0xffcc33, 0xcc9933, 0x996633, 0x663333,
    // olives
    0xffffcc, 0xffff33, 0xffff00, 0xffcc00, 0x999900, 0x666600, 0x333300,
    // greens
    0x99ff99, 0x66ff99, 0x33ff33, 0x33cc00, 0x009900, 0x006600, 0x003300,
    // turquoises
    0x99ffff, 0x33ffff, 0x66cccc, 0x00cccc, 0x339999, 0x336666, 0x003333,
    // blues
    0xccffff, 0x66ffff, 0x33ccff, 0x3366ff, 0x3333ff, 0x000099, 0x000066,
    // purples
    0xccccff, 0x9999ff, 0x6666cc, 0x6633ff, 0x6600cc, 0x333399, 0x330099,
    // violets
    0xffccff, 0xff99ff, 0xcc66cc, 0xcc33cc, 0x993399, 0x663366, 0x330033,
];

/// Pixel size of the whole palette grid
pub fn palette_size() -> (i32, i32) {
    (
        PALETTE_CELL_WIDTH * PALETTE_COLUMNS as i32,
        PALETTE_CELL_HEIGHT * PALETTE_ROWS as i32,
    )
}

/// Palette index of the cell under a point, clamped to the grid
pub fn palette_index_at(x: i32, y: i32) -> usize {
    let column = (x.max(0) / PALETTE_CELL_WIDTH) as usize;
    let row = (y.max(0) / PALETTE_CELL_HEIGHT) as usize;
    column.min(PALETTE_COLUMNS - 1) + row.min(PALETTE_ROWS - 1) * PALETTE_COLUMNS
}

/// Colour of the cell under a point
pub fn palette_colour_at(x: i32, y: i32) -> Colour {
    Colour::from_packed(PALETTE[palette_index_at(x, y)])
}
