//! Letter-exact simulation of the three-rotor Enigma I cipher machine.
//!
//! The machine combines a plugboard, three interchangeable wheels chosen
//! from models I, II, III and V, and the UKW-B reflector. Its output matches
//! the historical device, including the double-stepping of the middle wheel.
//!
//! # Architecture
//!
//! ```text
//! Rotor       (wired wheel with an offset and links to its neighbours)
//!     ↕ linked by RotorId (next / prev) inside a three-slot RotorBank
//! Machine     (plugboard → R → M → L → reflector → L → M → R → plugboard)
//!     ↕ snapshot / restore
//! MachineState (three offsets with pure step and encode transitions)
//! ```
//!
//! # Examples
//!
//! Encipher with one machine and decipher with another set up the same way:
//!
//! ```
//! use enigma::Machine;
//!
//! let mut encoder = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ"]).unwrap();
//! let cipher = encoder.encipher("HELLO WORLD");
//!
//! let mut decoder = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ"]).unwrap();
//! assert_eq!(decoder.decipher(&cipher), "HELLO WORLD");
//! ```
//!
//! Reconfiguration errors are recoverable and leave the machine untouched:
//!
//! ```
//! use enigma::Machine;
//!
//! let mut machine = Machine::default();
//! let err = machine.set_rotor_position("AB").unwrap_err();
//! assert!(err.is_recoverable());
//! assert_eq!(machine.key(), "AAA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod wiring;

mod config;
mod machine;
mod plugboard;
mod reflector;
mod rotor;
mod state;

pub use config::{MachineConfig, RotorOrder};
pub use error::{EnigmaError, Result};
pub use machine::Machine;
pub use plugboard::{Plugboard, MAX_PLUG_PAIRS};
pub use reflector::Reflector;
pub use rotor::{Direction, Rotor, RotorId, ROTOR_SLOTS};
pub use state::MachineState;
pub use wiring::{RotorModel, RotorWiring};
