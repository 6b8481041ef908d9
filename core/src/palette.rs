//! The fixed display palette and nearest-color matching.
//!
//! The panel runs at 4 bits per pixel, so every palette holds exactly 16
//! entries and pixel data stores positions into that table.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Number of palette entries. Hardware bit depth, not a tunable.
pub const PALETTE_SIZE: usize = 16;

/// An ordered set of displayable colors. Order is significant: the
/// position of an entry is the index stored in pixel data.
pub type Palette = [Rgb888; PALETTE_SIZE];

/// Index of the dark entry every palette variant keeps at position zero.
pub const DARK_INDEX: u8 = 0;

/// Index of the light entry in the fallback palette.
pub const LIGHT_INDEX: u8 = 1;

/// Palette used for every successfully acquired frame.
pub const FIXED: Palette = [
    Rgb888::new(0, 0, 0),       // Black
    Rgb888::new(128, 128, 128), // Gray
    Rgb888::new(255, 255, 255), // White
    Rgb888::new(255, 0, 0),     // Red
    Rgb888::new(0, 255, 0),     // Green
    Rgb888::new(0, 0, 255),     // Blue
    Rgb888::new(255, 255, 0),   // Yellow
    Rgb888::new(0, 255, 255),   // Cyan
    Rgb888::new(255, 0, 255),   // Magenta
    Rgb888::new(128, 0, 0),     // Dark Red
    Rgb888::new(0, 128, 0),     // Dark Green
    Rgb888::new(0, 0, 128),     // Dark Blue
    Rgb888::new(128, 128, 0),   // Olive
    Rgb888::new(0, 128, 128),   // Teal
    Rgb888::new(128, 0, 128),   // Purple
    Rgb888::new(192, 192, 192), // Silver
];

/// Palette paired with the checkerboard shown when acquisition keeps
/// failing: black at [`DARK_INDEX`], white at [`LIGHT_INDEX`], black
/// padding up to the fixed length.
pub const fn fallback() -> Palette {
    let mut palette = [Rgb888::new(0, 0, 0); PALETTE_SIZE];
    palette[LIGHT_INDEX as usize] = Rgb888::new(255, 255, 255);
    palette
}

/// Index of the palette entry closest to `color` by squared channel
/// distance. Exact ties resolve to the lowest index.
pub fn nearest(palette: &Palette, color: Rgb888) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;
    for (index, entry) in palette.iter().enumerate() {
        let distance = distance_sq(*entry, color);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }
    best_index
}

fn distance_sq(a: Rgb888, b: Rgb888) -> u32 {
    let dr = i32::from(a.r()) - i32::from(b.r());
    let dg = i32::from(a.g()) - i32::from(b.g());
    let db = i32::from(a.b()) - i32::from(b.b());
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_entries_match_themselves() {
        for (index, entry) in FIXED.iter().enumerate() {
            assert_eq!(nearest(&FIXED, *entry), index as u8);
        }
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        // (64, 64, 64) is equidistant between black (index 0) and
        // gray (index 1); the lower index must win.
        assert_eq!(nearest(&FIXED, Rgb888::new(64, 64, 64)), 0);
    }

    #[test]
    fn result_always_in_range() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let index = nearest(&FIXED, Rgb888::new(r as u8, g as u8, b as u8));
                    assert!((index as usize) < PALETTE_SIZE);
                }
            }
        }
    }

    #[test]
    fn fallback_reserves_dark_and_light() {
        let palette = fallback();
        assert_eq!(palette[DARK_INDEX as usize], Rgb888::new(0, 0, 0));
        assert_eq!(palette[LIGHT_INDEX as usize], Rgb888::new(255, 255, 255));
        for entry in &palette[2..] {
            assert_eq!(*entry, Rgb888::new(0, 0, 0));
        }
    }

    #[test]
    fn fixed_palette_keeps_dark_at_zero() {
        assert_eq!(FIXED[DARK_INDEX as usize], Rgb888::new(0, 0, 0));
    }
}
