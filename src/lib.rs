#![no_std]

pub mod cadence;
pub mod color;
pub mod config;
pub mod effect;
pub mod gesture;
pub mod lamp;
pub mod random;
pub mod scheduler;
pub mod state;
pub mod strip;

pub use config::{BlinkConfig, BrightnessConfig, ConfigError, GestureConfig, LampConfig};
pub use effect::{DEFAULT_EFFECTS, EffectKind, EffectSlot};
pub use gesture::{GestureEngine, GestureEvent, GestureWindow};
pub use lamp::{Lamp, LampTick};
pub use random::{RandomSource, SplitMixRandom};
pub use scheduler::EffectScheduler;
pub use state::{BrightnessRange, EffectState, SchedulerCommand, dispatch};
pub use strip::{PixelSink, PixelStrip, SmartLedsOutput};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The lamp is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Momentary pushbutton
pub trait ButtonInput {
    /// Current level, `true` while the button is held down
    fn is_pressed(&mut self) -> bool;
}
