//! The output boundary of the pipeline.

use crate::frame::Frame;

/// Renders one finished frame. Implementations draw synchronously; the
/// frame's grid dimensions always equal the panel resolution.
pub trait FrameSink {
    fn show(&mut self, frame: &Frame);
}
