//! The single per-turn clock
//!
//! One clock owns both the turn countdown and the charge ramp. Deriving
//! the charge power from the same advance call as the countdown means the
//! two can never disagree about how much of the turn has elapsed.

use serde::{Deserialize, Serialize};

/// Countdown and charge state for the current turn.
///
/// The clock only moves when the controller ticks it, which it does in
/// live phases. It never fires callbacks; the controller reads
/// [`expired`](TurnClock::expired) after each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnClock {
    turn_duration: f32,
    remaining: f32,
    /// Seconds the charge input has been held, or `None` when not charging
    charge_elapsed: Option<f32>,
}

impl TurnClock {
    /// A fresh clock with the full turn duration remaining
    pub fn new(turn_duration: f32) -> Self {
        Self {
            turn_duration,
            remaining: turn_duration,
            charge_elapsed: None,
        }
    }

    /// Advance the countdown (and the charge ramp, if charging) by `dt`
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
        if let Some(elapsed) = self.charge_elapsed.as_mut() {
            *elapsed += dt;
        }
    }

    /// Whether the countdown has run out
    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Remaining time, exact
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Remaining whole seconds for display, rounded up so the readout
    /// only shows 00 at the instant the turn actually ends
    pub fn countdown_seconds(&self) -> u32 {
        self.remaining.ceil() as u32
    }

    /// Two-digit zero-padded countdown readout
    pub fn display(&self) -> String {
        format!("{:02}", self.countdown_seconds())
    }

    /// Begin the charge ramp
    pub fn start_charge(&mut self) {
        self.charge_elapsed = Some(0.0);
    }

    /// End the charge ramp, returning how long it ran
    pub fn end_charge(&mut self) -> Option<f32> {
        self.charge_elapsed.take()
    }

    /// Whether the charge ramp is running
    pub fn charging(&self) -> bool {
        self.charge_elapsed.is_some()
    }

    /// Current charge power: elapsed hold time times `rate`, capped at
    /// `max_power`. Zero when not charging.
    pub fn charge_power(&self, rate: f32, max_power: f32) -> f32 {
        match self.charge_elapsed {
            Some(elapsed) => (elapsed * rate).min(max_power),
            None => 0.0,
        }
    }

    /// Reset to a full turn for the next actor
    pub fn reset(&mut self) {
        self.remaining = self.turn_duration;
        self.charge_elapsed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_countdown_runs_and_expires() {
        let mut clock = TurnClock::new(2.0);
        assert!(!clock.expired());
        clock.tick(1.5);
        assert!(!clock.expired());
        clock.tick(1.0);
        assert!(clock.expired());
        assert_relative_eq!(clock.remaining(), 0.0);
    }

    #[test]
    fn test_display_rounds_up() {
        let mut clock = TurnClock::new(30.0);
        assert_eq!(clock.display(), "30");
        clock.tick(0.1);
        assert_eq!(clock.display(), "30", "29.9s still reads as 30");
        clock.tick(25.0);
        assert_eq!(clock.display(), "05", "zero-padded below ten");
        clock.tick(10.0);
        assert_eq!(clock.display(), "00");
    }

    #[test]
    fn test_charge_ramps_with_the_same_ticks() {
        let mut clock = TurnClock::new(30.0);
        assert_relative_eq!(clock.charge_power(5.0, 10.0), 0.0);

        clock.start_charge();
        clock.tick(1.0);
        assert_relative_eq!(clock.charge_power(5.0, 10.0), 5.0);

        // Caps at max power no matter how long the hold runs
        clock.tick(10.0);
        assert_relative_eq!(clock.charge_power(5.0, 10.0), 10.0);

        let held = clock.end_charge();
        assert_relative_eq!(held.unwrap(), 11.0);
        assert!(!clock.charging());
    }

    #[test]
    fn test_reset_restores_full_turn() {
        let mut clock = TurnClock::new(30.0);
        clock.start_charge();
        clock.tick(12.0);
        clock.reset();
        assert_relative_eq!(clock.remaining(), 30.0);
        assert!(!clock.charging());
    }
}
