//! RGB565 to palette-index conversion.

use alloc::vec::Vec;

use crate::color;
use crate::frame::{IndexedImage, RawImage};
use crate::palette::{self, Palette};

/// Map every sample of `image` to its nearest palette entry.
///
/// Samples are unpacked to 8-bit channels and dimmed by `brightness`
/// before matching; output dimensions equal input dimensions. Takes the
/// raw image by value: the 16-bit sample buffer is gone once this
/// returns, leaving only the one-byte-per-pixel result.
pub fn quantize(image: RawImage, palette: &Palette, brightness: f32) -> IndexedImage {
    let mut indices = Vec::with_capacity(image.width() * image.height());
    for sample in image.pixels() {
        let color = color::scale(color::unpack(*sample), brightness);
        indices.push(palette::nearest(palette, color));
    }
    IndexedImage::new(image.width(), image.height(), indices)
}
