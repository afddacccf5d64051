//! Button gesture recognition
//!
//! The engine is sampled on a fixed cadence. A window of samples starts
//! with the first press; once it is full it is classified:
//!
//! - every sample pressed: a hold, reported on every tick until release
//! - one click: [`GestureEvent::SingleClick`]
//! - two clicks: [`GestureEvent::DoubleClick`]
//! - anything else is treated as bounce and dropped
//!
//! With the default 50 ms cadence and 10 samples the window spans 500 ms,
//! which is also the double click timeout.

mod window;

use embassy_time::Duration;
#[cfg(feature = "esp32-log")]
use esp_println::println;

pub use window::GestureWindow;

use crate::config::{ConfigError, GestureConfig};

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    SingleClick,
    DoubleClick,
    /// Hold tick, `released` is set exactly once at the end of a hold
    Hold { released: bool },
}

impl GestureEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleClick => "single_click",
            Self::DoubleClick => "double_click",
            Self::Hold { released: false } => "hold",
            Self::Hold { released: true } => "hold_release",
        }
    }
}

/// Count clicks in a window
///
/// The first sample always counts as a click since it started the window;
/// every later released-to-pressed transition adds one.
pub fn count_clicks(samples: &[bool]) -> usize {
    if samples.is_empty() {
        return 0;
    }
    1 + samples
        .windows(2)
        .filter(|pair| pair[1] && !pair[0])
        .count()
}

/// Classify a full window that is not a hold
pub fn classify_clicks(samples: &[bool], config: &GestureConfig) -> Option<GestureEvent> {
    let clicks = count_clicks(samples);
    if clicks == usize::from(config.single_click_count) {
        Some(GestureEvent::SingleClick)
    } else if clicks == usize::from(config.double_click_count) {
        Some(GestureEvent::DoubleClick)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Filling the window
    Sampling,
    /// Every sample of the last window was pressed, waiting for release
    Holding,
}

/// Gesture state machine
///
/// `N` is the window capacity in samples.
#[derive(Debug, Clone)]
pub struct GestureEngine<const N: usize> {
    config: GestureConfig,
    window: GestureWindow<N>,
    phase: Phase,
}

impl<const N: usize> GestureEngine<N> {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        if N == 0 {
            return Err(ConfigError::ZeroWindowCapacity);
        }
        config.validate()?;

        Ok(Self {
            config,
            window: GestureWindow::new(),
            phase: Phase::Sampling,
        })
    }

    /// Process one button sample
    ///
    /// Call once per [`next_interval`](Self::next_interval).
    pub fn poll(&mut self, pressed: bool) -> Option<GestureEvent> {
        match self.phase {
            Phase::Sampling => self.sample(pressed),
            Phase::Holding => {
                if pressed {
                    Some(GestureEvent::Hold { released: false })
                } else {
                    self.phase = Phase::Sampling;
                    Some(GestureEvent::Hold { released: true })
                }
            }
        }
    }

    fn sample(&mut self, pressed: bool) -> Option<GestureEvent> {
        if !self.window.record(pressed) {
            return None;
        }

        let event = if self.window.all_pressed() {
            // The last sample was pressed, so the hold starts on this tick
            self.phase = Phase::Holding;
            Some(GestureEvent::Hold { released: false })
        } else {
            classify_clicks(self.window.samples(), &self.config)
        };

        #[cfg(feature = "esp32-log")]
        match event {
            Some(event) => println!("[GestureEngine.poll] {}", event.as_str()),
            None => println!(
                "[GestureEngine.poll] dropped window with {} clicks",
                count_clicks(self.window.samples())
            ),
        }

        self.window.reset();
        event
    }

    /// Delay until the next sample is due
    pub const fn next_interval(&self) -> Duration {
        match self.phase {
            Phase::Sampling => self.config.sample_interval,
            Phase::Holding => self.config.hold_poll_interval,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.phase == Phase::Holding
    }

    pub const fn window(&self) -> &GestureWindow<N> {
        &self.window
    }

    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Forget any partial window or hold in progress
    pub fn reset(&mut self) {
        self.window.reset();
        self.phase = Phase::Sampling;
    }
}
