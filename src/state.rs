//! Rotor positions as a value.
//!
//! [`MachineState`] is the triple of offsets that changes on every
//! keystroke. Its transitions are pure functions, so a caller can predict
//! the next positions (or the next output) without touching a machine.

use std::fmt;

use crate::alphabet;
use crate::config::RotorOrder;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::{Direction, RotorBank, RotorId, ROTOR_SLOTS};

/// Offsets of the left, middle and right wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MachineState {
    offsets: [u8; ROTOR_SLOTS],
}

impl MachineState {
    /// Creates a state from raw offsets, each taken modulo 26.
    pub fn new(offsets: [u8; ROTOR_SLOTS]) -> Self {
        MachineState {
            offsets: offsets.map(|o| o % alphabet::LETTERS),
        }
    }

    /// Parses a three letter key such as `"AAA"` (any case).
    ///
    /// # Returns
    /// `None` unless `key` is exactly three letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineState;
    ///
    /// let state = MachineState::from_key("adu").unwrap();
    /// assert_eq!(state.offsets(), [0, 3, 20]);
    /// assert!(MachineState::from_key("AB").is_none());
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        let positions = alphabet::positions(key)?;
        let offsets: [u8; ROTOR_SLOTS] = positions.try_into().ok()?;
        Some(MachineState { offsets })
    }

    /// Returns the offsets, left to right.
    pub fn offsets(&self) -> [u8; ROTOR_SLOTS] {
        self.offsets
    }

    /// Returns the window letters, left to right.
    pub fn key(&self) -> String {
        self.offsets.iter().map(|&o| alphabet::letter_at(o)).collect()
    }

    /// Returns the state after one keystroke under `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{MachineState, RotorOrder};
    ///
    /// let order = RotorOrder::default();
    /// let state = MachineState::from_key("ADV").unwrap().advanced(&order);
    /// assert_eq!(state.key(), "AEW");
    /// assert_eq!(state.advanced(&order).key(), "BFX");
    /// ```
    pub fn advanced(self, order: &RotorOrder) -> Self {
        let mut bank = RotorBank::assemble(order.models(), self.offsets);
        bank.step(RotorId::RIGHT);
        MachineState {
            offsets: bank.offsets(),
        }
    }

    /// Returns the substitution of `position` (taken modulo 26) with the
    /// wheels held at this state. No stepping happens.
    pub fn encode(self, order: &RotorOrder, plugboard: &Plugboard, position: u8) -> u8 {
        let bank = RotorBank::assemble(order.models(), self.offsets);
        signal_path(&bank, plugboard, &Reflector::new(), position)
    }
}

impl From<[u8; ROTOR_SLOTS]> for MachineState {
    fn from(offsets: [u8; ROTOR_SLOTS]) -> Self {
        Self::new(offsets)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Plugboard, wheels, reflector, wheels, plugboard.
pub(crate) fn signal_path(
    bank: &RotorBank,
    plugboard: &Plugboard,
    reflector: &Reflector,
    position: u8,
) -> u8 {
    let signal = plugboard.swap_position(position);
    let signal = bank.encode(signal, Direction::Forward);
    let signal = reflector.reflect(signal);
    let signal = bank.encode(signal, Direction::Backward);
    plugboard.swap_position(signal)
}
