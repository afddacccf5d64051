//! Ambient blink effect
//!
//! Every pixel independently waits a random number of ticks, fades up to a
//! random color, fades back to black and starts over. Pixels drift out of
//! sync quickly, giving a calm twinkle.
//!
//! Fades run in fixed point (`FIXED_POINT_FACTOR`) so the per-tick step of
//! dim channels does not truncate to zero.

use embassy_time::Duration;
use heapless::Vec;

use super::{Effect, EffectContext, TaskStatus};
use crate::color::{BLACK, Rgb};
use crate::config::BlinkConfig;
use crate::random::RandomSource;
use crate::strip::PixelSink;

/// Fixed point multiplier for fade arithmetic
pub const FIXED_POINT_FACTOR: i32 = 100;

/// Exclusive bound of a random channel value
const CHANNEL_BOUND: u32 = 255;

/// Fade state of one pixel
#[derive(Debug, Clone, Default)]
pub struct PixelFade {
    target: [i32; 3],
    current: [i32; 3],
    steps: [i32; 3],
    phase: u32,
    wait_ticks: u32,
}

impl PixelFade {
    pub fn new<R: RandomSource>(rng: &mut R, config: &BlinkConfig) -> Self {
        let mut fade = Self::default();
        fade.reinit(rng, config);
        fade
    }

    /// Start a new cycle from black with a random target and pause
    #[allow(clippy::cast_possible_wrap)]
    pub fn reinit<R: RandomSource>(&mut self, rng: &mut R, config: &BlinkConfig) {
        let fade_steps = i32::from(config.fade_steps.max(1));
        let channels = self
            .target
            .iter_mut()
            .zip(&mut self.current)
            .zip(&mut self.steps);
        for ((target, current), step) in channels {
            *target = rng.random_bounded(CHANNEL_BOUND) as i32 * FIXED_POINT_FACTOR;
            *current = 0;
            *step = *target / fade_steps;
        }
        self.phase = 0;
        self.wait_ticks = rng.random_bounded(config.max_wait_ticks);
    }

    /// Advance the fade by one tick and return the unscaled color
    pub fn advance<R: RandomSource>(&mut self, rng: &mut R, config: &BlinkConfig) -> Rgb {
        if self.wait_ticks > 0 {
            self.wait_ticks -= 1;
            return self.color();
        }

        let fade_steps = u32::from(config.fade_steps);
        if self.phase == fade_steps {
            for step in &mut self.steps {
                *step = -*step;
            }
        } else if self.phase == 2 * fade_steps {
            self.reinit(rng, config);
            return self.color();
        }

        for (current, step) in self.current.iter_mut().zip(self.steps) {
            *current += step;
        }
        self.phase += 1;
        self.color()
    }

    /// Color currently shown, before brightness scaling
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color(&self) -> Rgb {
        let channel = |value: i32| (value / FIXED_POINT_FACTOR).clamp(0, 255) as u8;
        Rgb {
            r: channel(self.current[0]),
            g: channel(self.current[1]),
            b: channel(self.current[2]),
        }
    }

    pub const fn target(&self) -> [i32; 3] {
        self.target
    }

    /// Fixed point channel values
    pub const fn current(&self) -> [i32; 3] {
        self.current
    }

    pub const fn steps(&self) -> [i32; 3] {
        self.steps
    }

    /// Ticks advanced in the current fade cycle
    pub const fn phase(&self) -> u32 {
        self.phase
    }

    pub const fn wait_ticks(&self) -> u32 {
        self.wait_ticks
    }
}

/// Randomized ambient blink over the whole strip
#[derive(Debug, Clone)]
pub struct AmbientBlinkEffect<const MAX_LEDS: usize> {
    index: usize,
    config: BlinkConfig,
    pixels: Vec<PixelFade, MAX_LEDS>,
}

impl<const MAX_LEDS: usize> AmbientBlinkEffect<MAX_LEDS> {
    pub const fn new(index: usize, config: BlinkConfig) -> Self {
        Self {
            index,
            config,
            pixels: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &[PixelFade] {
        &self.pixels
    }
}

impl<const MAX_LEDS: usize> Effect for AmbientBlinkEffect<MAX_LEDS> {
    fn index(&self) -> usize {
        self.index
    }

    fn interval(&self) -> Duration {
        self.config.interval
    }

    fn start<S: PixelSink, R: RandomSource>(&mut self, ctx: &mut EffectContext<'_, S, R>) {
        ctx.sink.fill(BLACK);
        ctx.sink.flush();

        self.pixels.clear();
        for _ in 0..ctx.sink.len().min(MAX_LEDS) {
            // Bounded by MAX_LEDS above
            let _ = self.pixels.push(PixelFade::new(ctx.rng, &self.config));
        }
    }

    fn tick<S: PixelSink, R: RandomSource>(
        &mut self,
        ctx: &mut EffectContext<'_, S, R>,
    ) -> TaskStatus {
        if !ctx.is_active(self.index) {
            ctx.sink.fill(BLACK);
            ctx.sink.flush();
            return TaskStatus::Finished;
        }

        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let color = pixel.advance(ctx.rng, &self.config);
            let color = ctx.scale(color);
            ctx.sink.set(i, color);
        }
        ctx.sink.flush();
        TaskStatus::Running
    }

    fn reset(&mut self) {
        self.pixels.clear();
    }
}
