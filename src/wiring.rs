//! Historical wiring tables.
//!
//! Forward tables map the contact entered on the keyboard side of a wheel
//! to the contact leaving towards the reflector. Backward tables are their
//! inverses and carry the signal on its way back to the lamps.

use std::fmt;
use std::str::FromStr;

use crate::alphabet;
use crate::error::EnigmaError;

/// Wiring of the UKW-B reflector.
pub const REFLECTOR_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

/// Supported rotor models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RotorModel {
    /// Wheel I, notch at Q.
    I,
    /// Wheel II, notch at E.
    II,
    /// Wheel III, notch at V.
    III,
    /// Wheel V, notch at Z.
    V,
}

/// A rotor's pair of substitution alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorWiring {
    /// Keyboard to reflector direction.
    pub forward: &'static str,
    /// Reflector to keyboard direction.
    pub backward: &'static str,
}

impl RotorWiring {
    /// Looks up the forward table at `position`, taken modulo 26.
    pub fn forward_position(&self, position: u8) -> u8 {
        self.forward.as_bytes()[(position % alphabet::LETTERS) as usize] - b'A'
    }

    /// Looks up the backward table at `position`, taken modulo 26.
    pub fn backward_position(&self, position: u8) -> u8 {
        self.backward.as_bytes()[(position % alphabet::LETTERS) as usize] - b'A'
    }
}

impl fmt::Display for RotorWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forward: {}, backward: {}", self.forward, self.backward)
    }
}

const WIRING_I: RotorWiring = RotorWiring {
    forward: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
    backward: "UWYGADFPVZBECKMTHXSLRINQOJ",
};

const WIRING_II: RotorWiring = RotorWiring {
    forward: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
    backward: "AJPCZWRLFBDKOTYUQGENHXMIVS",
};

const WIRING_III: RotorWiring = RotorWiring {
    forward: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
    backward: "TAGBPCSDQEUFVNZHYIXJWLRKOM",
};

const WIRING_V: RotorWiring = RotorWiring {
    forward: "VZBRGITYUPSDNHLXAWMJQOFECK",
    backward: "QCYLXWENFTZOSMVJUDKGIARPHB",
};

impl RotorModel {
    /// Every supported model.
    pub const ALL: [RotorModel; 4] = [RotorModel::I, RotorModel::II, RotorModel::III, RotorModel::V];

    /// Returns the wiring tables of this model.
    pub fn wiring(self) -> RotorWiring {
        match self {
            RotorModel::I => WIRING_I,
            RotorModel::II => WIRING_II,
            RotorModel::III => WIRING_III,
            RotorModel::V => WIRING_V,
        }
    }

    /// Returns the window letter at which this wheel carries its neighbour.
    pub fn notch(self) -> char {
        match self {
            RotorModel::I => 'Q',
            RotorModel::II => 'E',
            RotorModel::III => 'V',
            RotorModel::V => 'Z',
        }
    }

    /// Returns the notch as an alphabet position.
    pub fn notch_position(self) -> u8 {
        self.notch() as u8 - b'A'
    }

    /// Returns the roman-numeral identifier.
    pub fn name(self) -> &'static str {
        match self {
            RotorModel::I => "I",
            RotorModel::II => "II",
            RotorModel::III => "III",
            RotorModel::V => "V",
        }
    }
}

impl fmt::Display for RotorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotorModel {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RotorModel::ALL
            .into_iter()
            .find(|model| model.name() == s)
            .ok_or_else(|| EnigmaError::UnknownRotor(s.to_string()))
    }
}
