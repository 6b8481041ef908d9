//! The capabilities the pipeline consumes: transport and decoding.
//!
//! The appliance backs these with its network stack and hardware JPEG
//! decoder, the desktop build with std sockets and a software decoder,
//! tests with canned fixtures.

use alloc::vec::Vec;

use crate::frame::RawImage;

/// Transport failure while fetching image bytes. The retry policy treats
/// every variant the same; they stay apart for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    /// No response within the transport's deadline.
    Timeout,
    /// Connection failed: DNS, refused, reset.
    Connection,
    /// The server answered with a non-2xx status.
    Status(u16),
}

/// The fetched bytes are not a decodable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed or truncated bitstream.
    Malformed,
    /// Well-formed but using features the decoder lacks.
    Unsupported,
}

/// Produces candidate image bytes, typically via HTTP GET against an
/// endpoint templated with the wanted dimensions.
pub trait ImageSource {
    fn fetch(&mut self, width: usize, height: usize) -> Result<Vec<u8>, FetchError>;
}

/// Turns an image byte stream into a grid of RGB565 samples.
pub trait ImageDecoder {
    fn decode(&mut self, data: &[u8]) -> Result<RawImage, DecodeError>;
}
