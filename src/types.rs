//! This module defines the core data structures shared by the loader and the simulator:
//! the machine description, its transition rules, and the error types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::Rule;

/// The blank symbol. An empty right half of the tape reads as this symbol, and description
/// files use it to read or write a blank cell.
pub const BLANK_SYMBOL: char = '_';
/// The default bound on configuration expansions for a single run.
pub const DEFAULT_MAX_STEPS: usize = 100;

/// An immutable description of a single-tape, possibly nondeterministic, Turing machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Machine {
    /// Display label of the machine.
    pub name: String,
    /// Declared control states.
    pub states: Vec<String>,
    /// Symbols allowed in the input string.
    pub input_alphabet: Vec<char>,
    /// Symbols allowed on the tape, including the blank.
    pub tape_alphabet: Vec<char>,
    pub start_state: String,
    pub accept_state: String,
    pub reject_state: String,
    /// Transition rules in declaration order. Several rules may share the same
    /// `(state, read)` pair, which makes the machine nondeterministic.
    pub transitions: Vec<Transition>,
}

impl Machine {
    /// Returns every rule applicable in `state` while reading `symbol`, in declaration order.
    pub fn transitions_for<'a>(
        &'a self,
        state: &'a str,
        symbol: char,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions
            .iter()
            .filter(move |t| t.state == state && t.read == symbol)
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_state == state
    }

    pub fn is_rejecting(&self, state: &str) -> bool {
        self.reject_state == state
    }

    /// Checks that no `(state, read)` pair has more than one rule.
    pub fn is_deterministic(&self) -> bool {
        let mut seen = HashSet::new();
        self.transitions
            .iter()
            .all(|t| seen.insert((t.state.as_str(), t.read)))
    }
}

/// A single transition rule: `(state, read) -> (next_state, write, direction)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: String,
    pub read: char,
    pub next_state: String,
    pub write: char,
    pub direction: Direction,
}

/// Represents the possible directions the head can move after writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// Represents various errors that can occur while loading a machine description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The description text does not have the expected line/field structure.
    #[error("Malformed description: {0}")]
    MalformedDescription(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error related to reading a description file.
    #[error("File error: {0}")]
    FileError(String),
}
