//! Bounded-retry image acquisition.
//!
//! One [`Pipeline::acquire`] call runs fetch, decode, quantize and (when
//! the decoded resolution differs from the panel) resample, retrying a
//! configured number of times before degrading to a deterministic
//! checkerboard. Callers always get a complete target-resolution frame.

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::Config;
use crate::frame::{Frame, IndexedImage};
use crate::palette::{self, Palette};
use crate::quantize;
use crate::resize::{NearestNeighbor, Resample};
use crate::source::{DecodeError, FetchError, ImageDecoder, ImageSource};

/// JPEG end-of-image marker, appended when the server truncated it away.
const JPEG_EOI: [u8; 2] = [0xff, 0xd9];

/// Why a single acquisition attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptError {
    Fetch(FetchError),
    Decode(DecodeError),
}

impl From<FetchError> for AttemptError {
    fn from(err: FetchError) -> Self {
        AttemptError::Fetch(err)
    }
}

impl From<DecodeError> for AttemptError {
    fn from(err: DecodeError) -> Self {
        AttemptError::Decode(err)
    }
}

/// Retry progress of one [`Pipeline::acquire`] call.
enum State {
    /// Running the zero-based attempt.
    Attempt(u32),
    /// Budget burned; produce the fallback frame.
    Exhausted,
}

/// Anything that can produce the next frame to show.
pub trait Acquire {
    fn acquire(&mut self) -> Frame;
}

/// The acquisition pipeline over injected transport, decode, delay and
/// resampling capabilities.
pub struct Pipeline<S, D, T, R = NearestNeighbor> {
    source: S,
    decoder: D,
    delay: T,
    resampler: R,
    config: Config,
    palette: Palette,
}

impl<S, D, T> Pipeline<S, D, T>
where
    S: ImageSource,
    D: ImageDecoder,
    T: DelayNs,
{
    pub fn new(source: S, decoder: D, delay: T, config: Config) -> Self {
        Self::with_resampler(source, decoder, delay, NearestNeighbor, config)
    }
}

impl<S, D, T, R> Pipeline<S, D, T, R>
where
    S: ImageSource,
    D: ImageDecoder,
    T: DelayNs,
    R: Resample,
{
    pub fn with_resampler(source: S, decoder: D, delay: T, resampler: R, config: Config) -> Self {
        Pipeline {
            source,
            decoder,
            delay,
            resampler,
            config,
            palette: palette::FIXED,
        }
    }

    /// Produce the next frame.
    ///
    /// Runs up to `config.attempts` fetch/decode passes, sleeping
    /// `config.retry_delay_ms` after each failure. Returns either a full
    /// target-resolution frame over the fixed palette or, once the
    /// budget is gone, the checkerboard fallback. Never anything
    /// partial.
    pub fn acquire(&mut self) -> Frame {
        let mut state = if self.config.attempts == 0 {
            State::Exhausted
        } else {
            State::Attempt(0)
        };
        loop {
            state = match state {
                State::Attempt(attempt) => match self.attempt() {
                    Ok(frame) => return frame,
                    Err(err) => {
                        warn!("attempt {} failed: {:?}", attempt + 1, err);
                        self.delay.delay_ms(self.config.retry_delay_ms);
                        if attempt + 1 < self.config.attempts {
                            State::Attempt(attempt + 1)
                        } else {
                            State::Exhausted
                        }
                    }
                },
                State::Exhausted => {
                    info!("acquisition exhausted, using fallback pattern");
                    return fallback_frame(self.config.width, self.config.height);
                }
            };
        }
    }

    fn attempt(&mut self) -> Result<Frame, AttemptError> {
        let mut data = self
            .source
            .fetch(self.config.width, self.config.height)?;
        if !data.ends_with(&JPEG_EOI) {
            data.extend_from_slice(&JPEG_EOI);
        }
        let raw = self.decoder.decode(&data)?;
        drop(data);

        let indexed = quantize::quantize(raw, &self.palette, self.config.brightness);
        let indexed =
            if indexed.width() == self.config.width && indexed.height() == self.config.height {
                indexed
            } else {
                self.resampler
                    .resize(indexed, self.config.width, self.config.height)
            };
        Ok(Frame {
            palette: self.palette,
            image: indexed,
        })
    }
}

impl<S, D, T, R> Acquire for Pipeline<S, D, T, R>
where
    S: ImageSource,
    D: ImageDecoder,
    T: DelayNs,
    R: Resample,
{
    fn acquire(&mut self) -> Frame {
        Pipeline::acquire(self)
    }
}

/// The deterministic substitute frame: index 1 where `x + y` is odd,
/// index 0 elsewhere, over the black/white fallback palette.
pub fn fallback_frame(width: usize, height: usize) -> Frame {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(if (x + y) % 2 == 1 { 1 } else { 0 });
        }
    }
    Frame {
        palette: palette::fallback(),
        image: IndexedImage::new(width, height, pixels),
    }
}
