//! Input intents and per-axis flag state

use serde::{Deserialize, Serialize};

/// Discrete action intents exposed to the input layer.
///
/// All intents carry press/release semantics except the camera toggles,
/// which are edge-triggered (only the press matters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Walk along the facing direction
    MoveForward,
    /// Walk against the facing direction
    MoveBackward,
    /// Yaw left
    TurnLeft,
    /// Yaw right
    TurnRight,
    /// Raise the aim (aim view only)
    AimUp,
    /// Lower the aim (aim view only)
    AimDown,
    /// Toggle the detached top-down camera
    ToggleGlobalCamera,
    /// Toggle the first-person aim view
    ToggleAimCamera,
    /// Start building charge power (aim view only)
    BeginCharge,
    /// Release the shot
    EndCharge,
}

/// Press/release state accompanying an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Key went down
    Pressed,
    /// Key came up
    Released,
}

/// One input axis with two opposing directions.
///
/// Both directions may be held at once; the one pressed most recently
/// wins, and releasing it hands control back to the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisPair {
    positive: bool,
    negative: bool,
    /// True when the positive direction was pressed after the negative one
    positive_latest: bool,
}

impl AxisPair {
    /// Record a press or release of one direction
    pub fn apply(&mut self, positive: bool, state: KeyState) {
        let held = state == KeyState::Pressed;
        if positive {
            self.positive = held;
        } else {
            self.negative = held;
        }
        if held {
            self.positive_latest = positive;
        }
    }

    /// Net direction this frame: +1, -1, or 0
    pub fn direction(&self) -> f32 {
        match (self.positive, self.negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            (true, true) => {
                if self.positive_latest {
                    1.0
                } else {
                    -1.0
                }
            }
            (false, false) => 0.0,
        }
    }

    /// Whether either direction is held
    pub fn any_held(&self) -> bool {
        self.positive || self.negative
    }

    /// Release both directions
    pub fn clear(&mut self) {
        self.positive = false;
        self.negative = false;
    }
}

/// All intent flags and pending edges, written by the input layer and
/// consumed by the controller each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentState {
    /// Forward (+) / backward (-) movement
    pub longitudinal: AxisPair,
    /// Turn left (+) / right (-)
    pub steering: AxisPair,
    /// Aim up (+) / down (-)
    pub pitch: AxisPair,
    /// Charge input currently held
    pub charge_held: bool,
    /// Charge press edge, pending consumption
    pub charge_pressed: bool,
    /// Charge release edge, pending consumption
    pub charge_released: bool,
    /// Global camera toggle edge, pending consumption
    pub toggle_global: bool,
    /// Aim camera toggle edge, pending consumption
    pub toggle_aim: bool,
}

impl IntentState {
    /// Record one intent from the input layer
    pub fn apply(&mut self, intent: Intent, state: KeyState) {
        match intent {
            Intent::MoveForward => self.longitudinal.apply(true, state),
            Intent::MoveBackward => self.longitudinal.apply(false, state),
            Intent::TurnLeft => self.steering.apply(true, state),
            Intent::TurnRight => self.steering.apply(false, state),
            Intent::AimUp => self.pitch.apply(true, state),
            Intent::AimDown => self.pitch.apply(false, state),
            Intent::BeginCharge => {
                if state == KeyState::Pressed && !self.charge_held {
                    self.charge_held = true;
                    self.charge_pressed = true;
                }
            }
            Intent::EndCharge => {
                if state == KeyState::Pressed && self.charge_held {
                    self.charge_held = false;
                    self.charge_released = true;
                }
            }
            Intent::ToggleGlobalCamera => {
                if state == KeyState::Pressed {
                    self.toggle_global = true;
                }
            }
            Intent::ToggleAimCamera => {
                if state == KeyState::Pressed {
                    self.toggle_aim = true;
                }
            }
        }
    }

    /// Clear the movement flags (aim-view entry freezes walking)
    pub fn clear_movement(&mut self) {
        self.longitudinal.clear();
    }

    /// Clear everything, including pending edges (turn end)
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Consume the pending charge press edge
    pub fn take_charge_pressed(&mut self) -> bool {
        std::mem::take(&mut self.charge_pressed)
    }

    /// Consume the pending charge release edge
    pub fn take_charge_released(&mut self) -> bool {
        std::mem::take(&mut self.charge_released)
    }

    /// Consume the pending global camera toggle
    pub fn take_toggle_global(&mut self) -> bool {
        std::mem::take(&mut self.toggle_global)
    }

    /// Consume the pending aim camera toggle
    pub fn take_toggle_aim(&mut self) -> bool {
        std::mem::take(&mut self.toggle_aim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_direction() {
        let mut axis = AxisPair::default();
        axis.apply(true, KeyState::Pressed);
        assert_eq!(axis.direction(), 1.0);
        axis.apply(true, KeyState::Released);
        assert_eq!(axis.direction(), 0.0);
    }

    #[test]
    fn test_last_pressed_wins() {
        let mut axis = AxisPair::default();
        axis.apply(true, KeyState::Pressed);
        axis.apply(false, KeyState::Pressed);
        assert_eq!(axis.direction(), -1.0, "later press takes the axis");

        // Releasing the winner resumes the older hold
        axis.apply(false, KeyState::Released);
        assert_eq!(axis.direction(), 1.0);
    }

    #[test]
    fn test_charge_edges_consume_once() {
        let mut intents = IntentState::default();
        intents.apply(Intent::BeginCharge, KeyState::Pressed);
        assert!(intents.take_charge_pressed());
        assert!(!intents.take_charge_pressed());

        // A release without a prior press produces no edge
        let mut intents = IntentState::default();
        intents.apply(Intent::EndCharge, KeyState::Pressed);
        assert!(!intents.take_charge_released());
    }

    #[test]
    fn test_repeat_presses_do_not_stack_edges() {
        let mut intents = IntentState::default();
        intents.apply(Intent::BeginCharge, KeyState::Pressed);
        intents.apply(Intent::BeginCharge, KeyState::Pressed);
        assert!(intents.take_charge_pressed());
        assert!(!intents.take_charge_pressed());
    }

    #[test]
    fn test_clear_movement_keeps_steering() {
        let mut intents = IntentState::default();
        intents.apply(Intent::MoveForward, KeyState::Pressed);
        intents.apply(Intent::TurnLeft, KeyState::Pressed);
        intents.clear_movement();
        assert_eq!(intents.longitudinal.direction(), 0.0);
        assert_eq!(intents.steering.direction(), 1.0);
    }
}
