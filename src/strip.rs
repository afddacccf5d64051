//! Pixel sink
//!
//! Effects draw into a [`PixelSink`]: whole-strip fills, single pixel
//! writes and an explicit flush. [`PixelStrip`] implements it with a fixed
//! frame buffer and hands complete frames to an [`OutputDriver`], so the
//! driver never sees a partially drawn frame.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::config::ConfigError;

/// Destination of effect frames
pub trait PixelSink {
    /// Number of addressable pixels
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set every pixel to `color`
    fn fill(&mut self, color: Rgb);

    /// Set one pixel, out of range indices are ignored
    fn set(&mut self, index: usize, color: Rgb);

    /// Push the drawn frame to the hardware
    fn flush(&mut self);
}

/// Frame buffer in front of an output driver
///
/// `MAX_LEDS` bounds the buffer, the actual pixel count is chosen at startup.
pub struct PixelStrip<D: OutputDriver, const MAX_LEDS: usize> {
    driver: D,
    frame: [Rgb; MAX_LEDS],
    len: usize,
}

impl<D: OutputDriver, const MAX_LEDS: usize> PixelStrip<D, MAX_LEDS> {
    /// Create a strip driving the first `len` pixels of the buffer
    pub fn new(driver: D, len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::ZeroPixelCount);
        }
        if len > MAX_LEDS {
            return Err(ConfigError::TooManyPixels {
                requested: len,
                max: MAX_LEDS,
            });
        }
        Ok(Self {
            driver,
            frame: [BLACK; MAX_LEDS],
            len,
        })
    }

    /// Current contents of the frame buffer
    pub fn pixels(&self) -> &[Rgb] {
        &self.frame[..self.len]
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: OutputDriver, const MAX_LEDS: usize> PixelSink for PixelStrip<D, MAX_LEDS> {
    fn len(&self) -> usize {
        self.len
    }

    fn fill(&mut self, color: Rgb) {
        for pixel in &mut self.frame[..self.len] {
            *pixel = color;
        }
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.frame[..self.len].get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) {
        self.driver.write(&self.frame[..self.len]);
    }
}

/// [`OutputDriver`] over any `smart-leds` writer
///
/// Write errors are dropped: a frame that fails to reach the strip is
/// replaced by the next one a tick later.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn write(&mut self, colors: &[Rgb]) {
        let result = self.writer.write(colors.iter().copied());
        #[cfg(feature = "esp32-log")]
        if result.is_err() {
            println!("[SmartLedsOutput.write] dropped frame of {} pixels", colors.len());
        }
        #[cfg(not(feature = "esp32-log"))]
        let _ = result;
    }
}
