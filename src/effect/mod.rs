//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait.
//!
//! An effect instance remembers the index it was launched for. It keeps
//! rendering while that index is active and retires itself on the first
//! tick after it is not, leaving the sink blank or fully written.

mod ambient_blink;
mod static_color;

use embassy_time::Duration;

pub use ambient_blink::{AmbientBlinkEffect, FIXED_POINT_FACTOR, PixelFade};
pub use static_color::StaticColorEffect;

use crate::color::{AMBER, BLUE, GREEN, MAGENTA, RED, Rgb, scale_intensity};
use crate::config::BlinkConfig;
use crate::random::RandomSource;
use crate::state::EffectState;
use crate::strip::PixelSink;

const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_AMBIENT_BLINK: &str = "ambient_blink";

/// Effect list of the stock lamp
pub const DEFAULT_EFFECTS: &[EffectKind] = &[
    EffectKind::AmbientBlink,
    EffectKind::StaticColor(RED),
    EffectKind::StaticColor(GREEN),
    EffectKind::StaticColor(BLUE),
    EffectKind::StaticColor(MAGENTA),
    EffectKind::StaticColor(AMBER),
];

/// Outcome of an effect tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    /// The effect noticed it is no longer active and exited
    Finished,
}

/// Everything an effect may touch during a tick
pub struct EffectContext<'a, S: PixelSink, R: RandomSource> {
    pub sink: &'a mut S,
    pub rng: &'a mut R,
    pub state: &'a EffectState,
}

impl<S: PixelSink, R: RandomSource> EffectContext<'_, S, R> {
    pub const fn is_active(&self, index: usize) -> bool {
        self.state.is_active(index)
    }

    /// Scale a color by the current brightness
    pub const fn scale(&self, color: Rgb) -> Rgb {
        scale_intensity(color, self.state.brightness(), self.state.range().max())
    }
}

pub trait Effect {
    /// Position in the effect list this instance renders for
    fn index(&self) -> usize;

    /// Delay between two ticks
    fn interval(&self) -> Duration;

    /// Called once when the effect is launched, before the first tick
    fn start<S: PixelSink, R: RandomSource>(&mut self, _ctx: &mut EffectContext<'_, S, R>) {}

    /// Render a single frame, or retire if the effect is no longer active
    fn tick<S: PixelSink, R: RandomSource>(
        &mut self,
        ctx: &mut EffectContext<'_, S, R>,
    ) -> TaskStatus;

    /// Reset effect state
    fn reset(&mut self) {}
}

/// Effect shapes that can be placed in the effect list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Whole strip in one color
    StaticColor(Rgb),
    /// Pixels fading in and out at random
    AmbientBlink,
}

impl EffectKind {
    pub fn to_slot<const MAX_LEDS: usize>(
        self,
        index: usize,
        static_interval: Duration,
        blink: &BlinkConfig,
    ) -> EffectSlot<MAX_LEDS> {
        match self {
            Self::StaticColor(color) => {
                EffectSlot::Static(StaticColorEffect::new(index, color, static_interval))
            }
            Self::AmbientBlink => EffectSlot::AmbientBlink(AmbientBlinkEffect::new(index, *blink)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StaticColor(_) => EFFECT_NAME_STATIC,
            Self::AmbientBlink => EFFECT_NAME_AMBIENT_BLINK,
        }
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot<const MAX_LEDS: usize> {
    Static(StaticColorEffect),
    AmbientBlink(AmbientBlinkEffect<MAX_LEDS>),
}

impl<const MAX_LEDS: usize> EffectSlot<MAX_LEDS> {
    pub fn index(&self) -> usize {
        match self {
            Self::Static(effect) => effect.index(),
            Self::AmbientBlink(effect) => effect.index(),
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Self::Static(effect) => effect.interval(),
            Self::AmbientBlink(effect) => effect.interval(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Static(effect) => EffectKind::StaticColor(effect.color()),
            Self::AmbientBlink(_) => EffectKind::AmbientBlink,
        }
    }

    /// Check if this instance is the one allowed to render
    pub fn is_rendering(&self, state: &EffectState) -> bool {
        state.is_active(self.index())
    }

    pub fn start<S: PixelSink, R: RandomSource>(&mut self, ctx: &mut EffectContext<'_, S, R>) {
        match self {
            Self::Static(effect) => effect.start(ctx),
            Self::AmbientBlink(effect) => effect.start(ctx),
        }
    }

    pub fn tick<S: PixelSink, R: RandomSource>(
        &mut self,
        ctx: &mut EffectContext<'_, S, R>,
    ) -> TaskStatus {
        match self {
            Self::Static(effect) => effect.tick(ctx),
            Self::AmbientBlink(effect) => effect.tick(ctx),
        }
    }

    /// Reset the effect state
    pub fn reset(&mut self) {
        match self {
            Self::Static(effect) => Effect::reset(effect),
            Self::AmbientBlink(effect) => Effect::reset(effect),
        }
    }
}
