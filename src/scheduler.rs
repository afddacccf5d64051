//! Effect task scheduling
//!
//! The scheduler owns the [`EffectState`] and a small set of running effect
//! tasks. Switching effects never cancels a task: before the new effect
//! starts, the outgoing one gets one more tick, sees that its index is no
//! longer active and retires itself, leaving the sink blank or fully written.
//!
//! Tasks are keyed by effect index, so at most one task can match the
//! active index and render at any time.

use embassy_time::{Duration, Instant};
#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::cadence::Cadence;
use crate::config::{BlinkConfig, ConfigError, LampConfig};
use crate::effect::{EffectContext, EffectKind, EffectSlot, TaskStatus};
use crate::gesture::GestureEvent;
use crate::random::RandomSource;
use crate::state::{EffectState, SchedulerCommand, dispatch};
use crate::strip::PixelSink;

/// Running task capacity
///
/// Stale tasks retire before the next effect starts, so only the active
/// effect keeps a task.
pub const MAX_EFFECT_TASKS: usize = 1;

/// Effect instance with its next deadline
#[derive(Debug, Clone)]
pub struct EffectTask<const MAX_LEDS: usize> {
    slot: EffectSlot<MAX_LEDS>,
    cadence: Cadence,
}

impl<const MAX_LEDS: usize> EffectTask<MAX_LEDS> {
    pub const fn slot(&self) -> &EffectSlot<MAX_LEDS> {
        &self.slot
    }

    pub const fn deadline(&self) -> Instant {
        self.cadence.deadline()
    }
}

/// Runs exactly one effect at a time
pub struct EffectScheduler<const MAX_LEDS: usize> {
    state: EffectState,
    effects: &'static [EffectKind],
    static_interval: Duration,
    blink: BlinkConfig,
    tasks: Vec<EffectTask<MAX_LEDS>, MAX_EFFECT_TASKS>,
}

impl<const MAX_LEDS: usize> EffectScheduler<MAX_LEDS> {
    /// Create a scheduler without launching anything
    pub fn new(config: &LampConfig) -> Result<Self, ConfigError> {
        config.validate_effects()?;
        let state = EffectState::new(
            config.effects.len(),
            config.initial_effect,
            &config.brightness,
        )?;

        Ok(Self {
            state,
            effects: config.effects,
            static_interval: config.static_interval,
            blink: config.blink,
            tasks: Vec::new(),
        })
    }

    pub const fn state(&self) -> &EffectState {
        &self.state
    }

    pub fn tasks(&self) -> &[EffectTask<MAX_LEDS>] {
        &self.tasks
    }

    /// Indices of the tasks currently allowed to render
    pub fn rendering(&self) -> impl Iterator<Item = usize> + '_ {
        self.tasks
            .iter()
            .filter(|task| task.slot.is_rendering(&self.state))
            .map(|task| task.slot.index())
    }

    /// Earliest deadline among running tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(EffectTask::deadline).min()
    }

    /// Apply a gesture and launch the effect it selects, if any
    pub fn handle<S: PixelSink, R: RandomSource>(
        &mut self,
        event: GestureEvent,
        now: Instant,
        sink: &mut S,
        rng: &mut R,
    ) -> SchedulerCommand {
        let command = dispatch(event, &mut self.state);
        if let SchedulerCommand::Restart(index) = command {
            self.launch(index, now, sink, rng);
        }
        command
    }

    /// Launch the effect at the active index
    pub fn launch_active<S: PixelSink, R: RandomSource>(
        &mut self,
        now: Instant,
        sink: &mut S,
        rng: &mut R,
    ) {
        self.launch(self.state.active_index(), now, sink, rng);
    }

    /// Launch the effect at `index`
    ///
    /// Every task whose index is no longer active gets its retirement tick
    /// first, so nothing stale can write after the new effect has drawn. A
    /// task already running for `index` is restarted in place.
    fn launch<S: PixelSink, R: RandomSource>(
        &mut self,
        index: usize,
        now: Instant,
        sink: &mut S,
        rng: &mut R,
    ) {
        debug_assert!(index < self.effects.len(), "effect index out of range");
        let Some(&kind) = self.effects.get(index) else {
            return;
        };
        let mut ctx = EffectContext {
            sink,
            rng,
            state: &self.state,
        };

        #[cfg(feature = "esp32-log")]
        println!("[EffectScheduler.launch] effect {} ({})", index, kind.as_str());

        self.tasks.retain_mut(|task| {
            if task.slot.is_rendering(ctx.state) {
                return true;
            }
            let retired = task.slot.tick(&mut ctx) == TaskStatus::Finished;
            #[cfg(feature = "esp32-log")]
            if retired {
                println!("[EffectScheduler.launch] effect {} retired", task.slot.index());
            }
            !retired
        });

        if let Some(task) = self.tasks.iter_mut().find(|task| task.slot.index() == index) {
            task.slot.reset();
            task.slot.start(&mut ctx);
            task.cadence = Cadence::after(now, task.slot.interval());
            return;
        }

        let mut slot = kind.to_slot(index, self.static_interval, &self.blink);
        slot.start(&mut ctx);
        let cadence = Cadence::after(now, slot.interval());
        // Only the active index survives the retirement pass, so there is room
        let _ = self.tasks.push(EffectTask { slot, cadence });
    }

    /// Run every task whose deadline has passed
    pub fn tick<S: PixelSink, R: RandomSource>(&mut self, now: Instant, sink: &mut S, rng: &mut R) {
        let mut ctx = EffectContext {
            sink,
            rng,
            state: &self.state,
        };

        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            if !task.cadence.is_due(now) {
                i += 1;
                continue;
            }

            match task.slot.tick(&mut ctx) {
                TaskStatus::Running => {
                    task.cadence.advance(task.slot.interval(), now);
                    i += 1;
                }
                TaskStatus::Finished => {
                    #[cfg(feature = "esp32-log")]
                    println!("[EffectScheduler.tick] effect {} retired", task.slot.index());
                    self.tasks.remove(i);
                }
            }
        }
    }
}
