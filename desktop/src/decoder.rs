use catmatrix_core::frame::RawImage;
use catmatrix_core::source::{DecodeError, ImageDecoder};
use image::{ImageError, ImageFormat};

/// JPEG decoding via the `image` crate, packed down to the RGB565
/// samples the appliance's hardware decoder produces.
pub struct JpegDecoder;

impl ImageDecoder for JpegDecoder {
    fn decode(&mut self, data: &[u8]) -> Result<RawImage, DecodeError> {
        let decoded =
            image::load_from_memory_with_format(data, ImageFormat::Jpeg).map_err(map_error)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let samples = rgb
            .pixels()
            .map(|pixel| pack565(pixel.0[0], pixel.0[1], pixel.0[2]))
            .collect();
        Ok(RawImage::new(width as usize, height as usize, samples))
    }
}

fn map_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::Unsupported,
        _ => DecodeError::Malformed,
    }
}

fn pack565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3)
}
