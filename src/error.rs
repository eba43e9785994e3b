//! Error types for the Enigma machine.

use thiserror::Error;

use crate::wiring::RotorModel;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced by the Enigma machine.
///
/// Configuration errors are fatal to the construction attempt that raised
/// them. Every other variant leaves the machine exactly as it was, so a
/// running session can report the message and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Rotor identifier is not one of the supported models.
    #[error("Unknown rotor model '{0}'. Supported models are I, II, III and V.")]
    UnknownRotor(String),
    /// Rotor order does not name exactly three rotors.
    #[error("Exactly three rotors are required, got {0}.")]
    RotorCount(usize),
    /// The same rotor model was chosen for more than one slot.
    #[error("Rotor {0} can only be used once.")]
    DuplicateRotor(RotorModel),
    /// Starting position passed at construction is not valid.
    #[error("Invalid starting position '{0}'. Use letters A-Z.")]
    InvalidStartPosition(String),
    /// Keystroke input is not a single letter.
    #[error("Please provide a letter in a-zA-Z.")]
    InvalidLetter(String),
    /// Position key is not three letters.
    #[error("Please provide a three letter position key such as AAA.")]
    InvalidPositionKey(String),
    /// Plug pair is not two distinct letters.
    #[error("Invalid plug pair '{0}'. Use two different letters such as AB.")]
    InvalidPlugPair(String),
    /// Letter would be plugged into more than one cable.
    #[error("Letter {0} is already used by another plug pair.")]
    PlugConflict(char),
    /// Plugboard would hold more than the allowed number of pairs.
    #[error("Only a maximum of 6 swaps is allowed.")]
    TooManyPlugs(usize),
}

impl EnigmaError {
    /// Returns `true` if the failed call left the machine usable and the
    /// caller may simply try again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EnigmaError::UnknownRotor(_)
                | EnigmaError::RotorCount(_)
                | EnigmaError::DuplicateRotor(_)
                | EnigmaError::InvalidStartPosition(_)
        )
    }
}
