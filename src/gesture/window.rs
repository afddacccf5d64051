use heapless::Vec;

/// Fixed-capacity history of button samples
///
/// Filling starts with the first pressed sample: until then samples are
/// counted but not stored, so idle noise never produces a window.
#[derive(Debug, Clone, Default)]
pub struct GestureWindow<const N: usize> {
    samples: Vec<bool, N>,
    successes: u32,
}

impl<const N: usize> GestureWindow<N> {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
            successes: 0,
        }
    }

    /// Record one sample
    ///
    /// Returns `true` once the window is full.
    pub fn record(&mut self, pressed: bool) -> bool {
        self.successes = self.successes.saturating_add(u32::from(pressed));
        if self.successes > 0 {
            // Capacity is checked first, the push cannot fail
            if !self.samples.is_full() {
                let _ = self.samples.push(pressed);
            }
        }
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pressed samples seen since the window started
    pub const fn successes(&self) -> u32 {
        self.successes
    }

    pub fn samples(&self) -> &[bool] {
        &self.samples
    }

    /// Check if the window is full and every sample is pressed
    pub fn all_pressed(&self) -> bool {
        self.is_full() && self.samples.iter().all(|&pressed| pressed)
    }

    /// Drop all samples and start over
    pub fn reset(&mut self) {
        self.samples.clear();
        self.successes = 0;
    }
}
