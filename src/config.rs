//! Machine configuration values.
//!
//! [`MachineConfig`] is the plain, serde-friendly description of a key
//! setting. [`RotorOrder`] is its validated rotor selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, Result};
use crate::rotor::ROTOR_SLOTS;
use crate::wiring::RotorModel;

/// Three distinct rotor models, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorOrder([RotorModel; ROTOR_SLOTS]);

impl Default for RotorOrder {
    fn default() -> Self {
        RotorOrder([RotorModel::I, RotorModel::II, RotorModel::III])
    }
}

impl RotorOrder {
    /// Validates a selection of models, left to right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotor`] if a model is used twice.
    pub fn new(models: [RotorModel; ROTOR_SLOTS]) -> Result<Self> {
        for (i, model) in models.iter().enumerate() {
            if models[..i].contains(model) {
                return Err(EnigmaError::DuplicateRotor(*model));
            }
        }
        Ok(RotorOrder(models))
    }

    /// Parses rotor identifiers such as `["I", "II", "III"]`.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCount`] unless exactly three identifiers are given.
    /// - [`EnigmaError::UnknownRotor`] for an unsupported identifier.
    /// - [`EnigmaError::DuplicateRotor`] if a model is used twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{RotorModel, RotorOrder};
    ///
    /// let order = RotorOrder::parse(&["V", "I", "III"]).unwrap();
    /// assert_eq!(order.left(), RotorModel::V);
    ///
    /// assert!(RotorOrder::parse(&["I", "II", "IV"]).is_err());
    /// assert!(RotorOrder::parse(&["I", "II"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(identifiers: &[S]) -> Result<Self> {
        if identifiers.len() != ROTOR_SLOTS {
            return Err(EnigmaError::RotorCount(identifiers.len()));
        }
        let mut models = [RotorModel::I; ROTOR_SLOTS];
        for (slot, id) in models.iter_mut().zip(identifiers) {
            *slot = id.as_ref().parse()?;
        }
        Self::new(models)
    }

    /// Returns the models, left to right.
    pub fn models(&self) -> [RotorModel; ROTOR_SLOTS] {
        self.0
    }

    /// Returns the leftmost model.
    pub fn left(&self) -> RotorModel {
        self.0[0]
    }

    /// Returns the middle model.
    pub fn middle(&self) -> RotorModel {
        self.0[1]
    }

    /// Returns the rightmost model.
    pub fn right(&self) -> RotorModel {
        self.0[2]
    }

    /// Returns the roman-numeral identifiers, left to right.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|m| m.name()).collect()
    }
}

impl fmt::Display for RotorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" "))
    }
}

/// Key setting supplied by the caller.
///
/// Missing fields fall back to the defaults: rotors `I II III`, key `AAA`,
/// no plugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Rotor identifiers, left to right.
    pub rotor_order: Vec<String>,
    /// Starting window letters, left to right.
    pub key: String,
    /// Plug pairs such as `"AB"`.
    pub plugs: Vec<String>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            rotor_order: RotorOrder::default()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            key: "AAA".to_string(),
            plugs: Vec::new(),
        }
    }
}

impl MachineConfig {
    /// Validates the rotor selection.
    pub fn rotor_order(&self) -> Result<RotorOrder> {
        RotorOrder::parse(self.rotor_order.as_slice())
    }
}
