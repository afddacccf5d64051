//! Effect selection and brightness state
//!
//! Gestures are turned into state changes by [`dispatch`], a pure function
//! over [`EffectState`]. The returned [`SchedulerCommand`] tells the
//! scheduler whether a new effect task has to be launched.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{BrightnessConfig, ConfigError};
use crate::gesture::GestureEvent;

/// Open brightness interval `(min, max)`
///
/// `max` doubles as the divisor when scaling colors, so a brightness just
/// below `max` is almost full intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    min: u16,
    max: u16,
}

impl BrightnessRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub const fn min(self) -> u16 {
        self.min
    }

    pub const fn max(self) -> u16 {
        self.max
    }

    /// Check if `value` lies strictly between the bounds
    pub const fn contains(self, value: u16) -> bool {
        self.min < value && value < self.max
    }
}

/// What the scheduler has to do after a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Nothing to launch, running effects pick up the new state on their own
    Keep,
    /// Launch the effect at this index
    Restart(usize),
}

/// Active effect index and brightness
#[derive(Debug, Clone)]
pub struct EffectState {
    active_index: usize,
    total_effects: usize,
    brightness: u16,
    brightness_step: i16,
    range: BrightnessRange,
}

impl EffectState {
    pub fn new(
        total_effects: usize,
        initial_index: usize,
        brightness: &BrightnessConfig,
    ) -> Result<Self, ConfigError> {
        if total_effects == 0 {
            return Err(ConfigError::NoEffects);
        }
        if initial_index >= total_effects {
            return Err(ConfigError::InitialEffectOutOfRange {
                index: initial_index,
                total: total_effects,
            });
        }
        brightness.validate()?;

        Ok(Self {
            active_index: initial_index,
            total_effects,
            brightness: brightness.initial,
            brightness_step: brightness.step,
            range: brightness.range,
        })
    }

    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    pub const fn total_effects(&self) -> usize {
        self.total_effects
    }

    pub const fn brightness(&self) -> u16 {
        self.brightness
    }

    /// Step the next hold tick will apply
    pub const fn brightness_step(&self) -> i16 {
        self.brightness_step
    }

    pub const fn range(&self) -> BrightnessRange {
        self.range
    }

    /// Check if the effect at `index` is allowed to render
    pub const fn is_active(&self, index: usize) -> bool {
        self.active_index == index
    }

    /// Move to the next effect, wrapping around
    pub fn on_single_click(&mut self) -> usize {
        self.active_index = (self.active_index + 1) % self.total_effects;
        self.active_index
    }

    /// Move to the previous effect, wrapping around
    pub fn on_double_click(&mut self) -> usize {
        self.active_index = (self.active_index + self.total_effects - 1) % self.total_effects;
        self.active_index
    }

    /// Handle one hold tick
    ///
    /// While pressed, one step is applied unless it would leave the range;
    /// the value then holds where it is. The release tick applies nothing
    /// and reverses the direction for the next hold.
    ///
    /// Returns `true` if the brightness changed.
    pub fn on_hold_tick(&mut self, released: bool) -> bool {
        if released {
            self.brightness_step = self.brightness_step.saturating_neg();
            return false;
        }

        let next = i32::from(self.brightness) + i32::from(self.brightness_step);
        match u16::try_from(next) {
            Ok(next) if self.range.contains(next) => {
                self.brightness = next;
                true
            }
            _ => false,
        }
    }
}

/// Apply a gesture to the state
pub fn dispatch(event: GestureEvent, state: &mut EffectState) -> SchedulerCommand {
    match event {
        GestureEvent::SingleClick => SchedulerCommand::Restart(state.on_single_click()),
        GestureEvent::DoubleClick => SchedulerCommand::Restart(state.on_double_click()),
        GestureEvent::Hold { released } => {
            let changed = state.on_hold_tick(released);
            #[cfg(feature = "esp32-log")]
            if changed {
                println!("[dispatch] brightness is now {}", state.brightness());
            }
            #[cfg(not(feature = "esp32-log"))]
            let _ = changed;
            SchedulerCommand::Keep
        }
    }
}
