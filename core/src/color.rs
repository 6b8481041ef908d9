//! RGB565 sample expansion and brightness scaling.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Expand a packed RGB565 sample to 8-bit channels.
///
/// Each field is rescaled with truncating integer math, so a full field
/// maps to 255 and an empty one to 0.
pub fn unpack(sample: u16) -> Rgb888 {
    let red = (sample >> 11) & 0x1f;
    let green = (sample >> 5) & 0x3f;
    let blue = sample & 0x1f;
    Rgb888::new(
        (red * 255 / 31) as u8,
        (green * 255 / 63) as u8,
        (blue * 255 / 31) as u8,
    )
}

/// Multiply each channel by `factor`, truncating toward zero.
///
/// Channels saturate at 255, so factors above 1.0 cannot leave the
/// 8-bit range.
pub fn scale(color: Rgb888, factor: f32) -> Rgb888 {
    Rgb888::new(
        (f32::from(color.r()) * factor) as u8,
        (f32::from(color.g()) * factor) as u8,
        (f32::from(color.b()) * factor) as u8,
    )
}
