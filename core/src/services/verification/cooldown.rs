//! Resend cooldown counter

/// Seconds remaining until a resend is permitted
///
/// `generation` changes on every restart so a clock started for an earlier
/// send can recognize that it has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownTimer {
    duration: u32,
    remaining: u32,
    generation: u64,
}

impl CooldownTimer {
    /// Idle timer that restarts at `duration` seconds
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: 0,
            generation: 0,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Reset to the full duration, returning the new generation
    pub fn restart(&mut self) -> u64 {
        self.remaining = self.duration;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Advance one second, floored at zero
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Drop any remaining time and invalidate running clocks
    pub fn stop(&mut self) {
        self.remaining = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}
