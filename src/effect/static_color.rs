//! Static color fill effect
//!
//! Fills all LEDs with a single solid color. The strip is only rewritten
//! when the brightness differs from the one last applied.

use embassy_time::Duration;

use super::{Effect, EffectContext, TaskStatus};
use crate::color::Rgb;
use crate::random::RandomSource;
use crate::strip::PixelSink;

/// Static color effect - fills all LEDs with one color
#[derive(Debug, Clone)]
pub struct StaticColorEffect {
    index: usize,
    color: Rgb,
    interval: Duration,
    /// Brightness of the last written frame
    applied_brightness: Option<u16>,
}

impl StaticColorEffect {
    pub const fn new(index: usize, color: Rgb, interval: Duration) -> Self {
        Self {
            index,
            color,
            interval,
            applied_brightness: None,
        }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl Effect for StaticColorEffect {
    fn index(&self) -> usize {
        self.index
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn tick<S: PixelSink, R: RandomSource>(
        &mut self,
        ctx: &mut EffectContext<'_, S, R>,
    ) -> TaskStatus {
        if !ctx.is_active(self.index) {
            return TaskStatus::Finished;
        }

        let brightness = ctx.state.brightness();
        if self.applied_brightness != Some(brightness) {
            self.applied_brightness = Some(brightness);
            let color = ctx.scale(self.color);
            ctx.sink.fill(color);
            ctx.sink.flush();
        }
        TaskStatus::Running
    }

    fn reset(&mut self) {
        self.applied_brightness = None;
    }
}
