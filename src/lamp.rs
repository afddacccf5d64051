//! Top-level cooperative loop
//!
//! The lamp polls a fixed set of tasks from one loop: the gesture task and
//! the running effect tasks. Each task has its own cadence; [`Lamp::poll`]
//! runs whatever is due and reports when it wants to be called again.
//!
//! # Usage
//!
//! ```ignore
//! let rng = SplitMixRandom::from_instant(Instant::now());
//! let mut lamp: Lamp<_, _, _, 60> =
//!     Lamp::new(driver, button, rng, &LampConfig::default(), Instant::now())?;
//!
//! loop {
//!     let tick = lamp.poll(Instant::now());
//!     sleep(tick.sleep_duration);
//! }
//! ```

use embassy_time::{Duration, Instant, Timer};
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::cadence::{Cadence, sleep_until};
use crate::config::{ConfigError, DEFAULT_WINDOW, LampConfig};
use crate::gesture::{GestureEngine, GestureEvent};
use crate::random::RandomSource;
use crate::scheduler::EffectScheduler;
use crate::state::EffectState;
use crate::strip::PixelStrip;
use crate::{ButtonInput, OutputDriver};

/// Result of a lamp poll
#[derive(Debug, Clone, Copy)]
pub struct LampTick {
    /// Gesture classified during this poll
    pub gesture: Option<GestureEvent>,
    /// The deadline of the earliest task
    pub next_deadline: Instant,
    /// How long to wait until the next poll (may be zero if behind schedule)
    pub sleep_duration: Duration,
}

/// Button-driven lamp
///
/// `MAX_LEDS` bounds the frame buffer, `WINDOW` is the gesture window
/// capacity in samples.
pub struct Lamp<
    D: OutputDriver,
    B: ButtonInput,
    R: RandomSource,
    const MAX_LEDS: usize,
    const WINDOW: usize = DEFAULT_WINDOW,
> {
    strip: PixelStrip<D, MAX_LEDS>,
    button: B,
    rng: R,
    gesture: GestureEngine<WINDOW>,
    gesture_cadence: Cadence,
    scheduler: EffectScheduler<MAX_LEDS>,
}

impl<D, B, R, const MAX_LEDS: usize, const WINDOW: usize> Lamp<D, B, R, MAX_LEDS, WINDOW>
where
    D: OutputDriver,
    B: ButtonInput,
    R: RandomSource,
{
    /// Validate `config` and launch the initial effect
    pub fn new(
        driver: D,
        button: B,
        mut rng: R,
        config: &LampConfig,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        let mut strip = PixelStrip::new(driver, config.pixel_count)?;
        let gesture = GestureEngine::new(config.gesture)?;
        let mut scheduler = EffectScheduler::new(config)?;
        scheduler.launch_active(now, &mut strip, &mut rng);

        Ok(Self {
            strip,
            button,
            rng,
            gesture_cadence: Cadence::after(now, gesture.next_interval()),
            gesture,
            scheduler,
        })
    }

    /// Run every task that is due
    ///
    /// The gesture task goes first, so effects ticking in the same poll
    /// already see the state it changed.
    pub fn poll(&mut self, now: Instant) -> LampTick {
        let mut gesture = None;
        if self.gesture_cadence.is_due(now) {
            let pressed = self.button.is_pressed();
            gesture = self.gesture.poll(pressed);
            if let Some(event) = gesture {
                let command = self
                    .scheduler
                    .handle(event, now, &mut self.strip, &mut self.rng);
                #[cfg(feature = "esp32-log")]
                println!("[Lamp.poll] {} -> {:?}", event.as_str(), command);
                #[cfg(not(feature = "esp32-log"))]
                let _ = command;
            }
            self.gesture_cadence
                .advance(self.gesture.next_interval(), now);
        }

        self.scheduler.tick(now, &mut self.strip, &mut self.rng);

        let next_deadline = self
            .scheduler
            .next_deadline()
            .map_or(self.gesture_cadence.deadline(), |deadline| {
                deadline.min(self.gesture_cadence.deadline())
            });

        LampTick {
            gesture,
            next_deadline,
            sleep_duration: sleep_until(next_deadline, now),
        }
    }

    /// Drive the lamp on the embassy time driver, never returns
    pub async fn run(&mut self) {
        loop {
            let tick = self.poll(Instant::now());
            Timer::at(tick.next_deadline).await;
        }
    }

    pub const fn state(&self) -> &EffectState {
        self.scheduler.state()
    }

    pub const fn scheduler(&self) -> &EffectScheduler<MAX_LEDS> {
        &self.scheduler
    }

    pub const fn gesture(&self) -> &GestureEngine<WINDOW> {
        &self.gesture
    }

    pub const fn strip(&self) -> &PixelStrip<D, MAX_LEDS> {
        &self.strip
    }

    pub const fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }
}
