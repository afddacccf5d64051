//! Startup configuration
//!
//! All parameters are plain data with defaults matching the stock lamp:
//! a 30 pixel strip, a 50 ms button cadence and a 10 ms blink cadence.
//! Each component validates its own part when it is constructed, so a bad
//! configuration is rejected before anything renders.

use core::fmt;

use embassy_time::Duration;

use crate::effect::{DEFAULT_EFFECTS, EffectKind};
use crate::state::BrightnessRange;

/// Default gesture window capacity (samples)
pub const DEFAULT_WINDOW: usize = 10;

/// Default number of pixels on the strip
pub const DEFAULT_PIXEL_COUNT: usize = 30;

/// Button sampling cadence
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Cadence used while a hold is in progress
pub const DEFAULT_HOLD_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Poll cadence of static color effects
pub const DEFAULT_STATIC_INTERVAL: Duration = Duration::from_millis(50);

/// Render cadence of the ambient blink effect
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(10);

/// Number of ticks from black to the target color (and back)
pub const DEFAULT_FADE_STEPS: u16 = 33;

/// Upper bound (exclusive) of the random pause before a pixel fades in
pub const DEFAULT_MAX_WAIT_TICKS: u32 = 200;

pub const DEFAULT_BRIGHTNESS_MIN: u16 = 50;
pub const DEFAULT_BRIGHTNESS_MAX: u16 = 1000;
pub const DEFAULT_BRIGHTNESS: u16 = 100;
pub const DEFAULT_BRIGHTNESS_STEP: i16 = 20;

/// Configuration error reported at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The strip must have at least one pixel
    ZeroPixelCount,
    /// The strip is larger than the frame buffer
    TooManyPixels { requested: usize, max: usize },
    /// The gesture window must hold at least one sample
    ZeroWindowCapacity,
    /// The effect list is empty
    NoEffects,
    /// The initial effect does not exist
    InitialEffectOutOfRange { index: usize, total: usize },
    /// `min` must be strictly below `max`
    InvalidBrightnessRange { min: u16, max: u16 },
    /// The initial brightness must lie strictly inside the range
    InitialBrightnessOutOfRange { brightness: u16, min: u16, max: u16 },
    /// A zero step would make holds do nothing
    ZeroBrightnessStep,
    /// The fade must take at least one tick
    ZeroFadeSteps,
    /// Task cadences must be non-zero
    ZeroInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPixelCount => write!(f, "pixel count must be non-zero"),
            Self::TooManyPixels { requested, max } => {
                write!(f, "pixel count {requested} exceeds frame buffer of {max}")
            }
            Self::ZeroWindowCapacity => write!(f, "gesture window capacity must be non-zero"),
            Self::NoEffects => write!(f, "effect list is empty"),
            Self::InitialEffectOutOfRange { index, total } => {
                write!(f, "initial effect {index} is out of range (total {total})")
            }
            Self::InvalidBrightnessRange { min, max } => {
                write!(f, "brightness range ({min}, {max}) is empty")
            }
            Self::InitialBrightnessOutOfRange {
                brightness,
                min,
                max,
            } => write!(f, "initial brightness {brightness} is outside ({min}, {max})"),
            Self::ZeroBrightnessStep => write!(f, "brightness step must be non-zero"),
            Self::ZeroFadeSteps => write!(f, "fade step count must be non-zero"),
            Self::ZeroInterval => write!(f, "task interval must be non-zero"),
        }
    }
}

/// Gesture recognition parameters
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Delay between two button samples
    pub sample_interval: Duration,
    /// Delay between two hold ticks
    pub hold_poll_interval: Duration,
    /// Click count reported as a single click
    pub single_click_count: u8,
    /// Click count reported as a double click
    pub double_click_count: u8,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            hold_poll_interval: DEFAULT_HOLD_POLL_INTERVAL,
            single_click_count: 1,
            double_click_count: 2,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval.as_ticks() == 0 || self.hold_poll_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Brightness parameters
#[derive(Debug, Clone, Copy)]
pub struct BrightnessConfig {
    /// Open interval the brightness must stay in
    pub range: BrightnessRange,
    /// Brightness at startup
    pub initial: u16,
    /// Change applied per hold tick, the sign flips after every hold
    pub step: i16,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            range: BrightnessRange::new(DEFAULT_BRIGHTNESS_MIN, DEFAULT_BRIGHTNESS_MAX),
            initial: DEFAULT_BRIGHTNESS,
            step: DEFAULT_BRIGHTNESS_STEP,
        }
    }
}

impl BrightnessConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.range.min(), self.range.max());
        if min >= max {
            return Err(ConfigError::InvalidBrightnessRange { min, max });
        }
        if !self.range.contains(self.initial) {
            return Err(ConfigError::InitialBrightnessOutOfRange {
                brightness: self.initial,
                min,
                max,
            });
        }
        if self.step == 0 {
            return Err(ConfigError::ZeroBrightnessStep);
        }
        Ok(())
    }
}

/// Ambient blink parameters
#[derive(Debug, Clone, Copy)]
pub struct BlinkConfig {
    /// Render cadence
    pub interval: Duration,
    /// Ticks per half fade
    pub fade_steps: u16,
    /// Exclusive bound of the random pause before each fade
    pub max_wait_ticks: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_BLINK_INTERVAL,
            fade_steps: DEFAULT_FADE_STEPS,
            max_wait_ticks: DEFAULT_MAX_WAIT_TICKS,
        }
    }
}

impl BlinkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.fade_steps == 0 {
            return Err(ConfigError::ZeroFadeSteps);
        }
        Ok(())
    }
}

/// Configuration for the lamp
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Number of pixels actually driven
    pub pixel_count: usize,
    /// Ordered effect list, cycled by clicks
    pub effects: &'static [EffectKind],
    /// Effect rendering at startup
    pub initial_effect: usize,
    pub gesture: GestureConfig,
    pub brightness: BrightnessConfig,
    pub blink: BlinkConfig,
    /// Poll cadence of static color effects
    pub static_interval: Duration,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            pixel_count: DEFAULT_PIXEL_COUNT,
            effects: DEFAULT_EFFECTS,
            initial_effect: 0,
            gesture: GestureConfig::default(),
            brightness: BrightnessConfig::default(),
            blink: BlinkConfig::default(),
            static_interval: DEFAULT_STATIC_INTERVAL,
        }
    }
}

impl LampConfig {
    /// Validate the effect list and the effect cadences
    pub fn validate_effects(&self) -> Result<(), ConfigError> {
        if self.effects.is_empty() {
            return Err(ConfigError::NoEffects);
        }
        if self.initial_effect >= self.effects.len() {
            return Err(ConfigError::InitialEffectOutOfRange {
                index: self.initial_effect,
                total: self.effects.len(),
            });
        }
        if self.static_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        self.blink.validate()
    }
}
