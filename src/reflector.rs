//! Reflector: the fixed wheel that sends the signal back through the rotors.

use std::fmt;

use crate::alphabet;
use crate::wiring::REFLECTOR_B;

/// Fixed involutive substitution between the forward and return passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reflector {
    wiring: &'static str,
}

impl Default for Reflector {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflector {
    /// Creates the UKW-B reflector.
    pub fn new() -> Self {
        Reflector {
            wiring: REFLECTOR_B,
        }
    }

    /// Returns the wiring table.
    pub fn wiring(&self) -> &'static str {
        self.wiring
    }

    /// Reflects an alphabet position, taken modulo 26.
    pub fn reflect(&self, position: u8) -> u8 {
        self.wiring.as_bytes()[(position % alphabet::LETTERS) as usize] - b'A'
    }

    /// Reflects a letter, ignoring case.
    ///
    /// # Returns
    /// `None` if `letter` is not a letter.
    pub fn reflect_letter(&self, letter: char) -> Option<char> {
        alphabet::position_of(letter).map(|p| alphabet::letter_at(self.reflect(p)))
    }
}

impl fmt::Display for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflector wiring: \n{}", self.wiring)
    }
}
