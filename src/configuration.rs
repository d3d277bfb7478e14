//! Instantaneous snapshots of one computation branch.

use crate::types::{Direction, Transition, BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A configuration splits the tape around the head.
///
/// `left` holds the symbols strictly left of the head. `right` holds the symbol under the
/// head followed by everything to its right; an empty `right` means the head rests on an
/// implicit blank. Equality and hashing are structural, which is what the simulator relies
/// on to avoid exploring the same configuration twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    pub left: String,
    pub state: String,
    pub right: String,
}

impl Configuration {
    /// The starting configuration: head on the first input symbol, nothing to its left.
    pub fn initial(start_state: &str, input: &str) -> Self {
        Self {
            left: String::new(),
            state: start_state.to_string(),
            right: input.to_string(),
        }
    }

    /// Returns the symbol under the head.
    pub fn head(&self) -> char {
        self.right.chars().next().unwrap_or(BLANK_SYMBOL)
    }

    /// The part of the tape right of the head.
    pub fn rest(&self) -> &str {
        let mut chars = self.right.chars();
        chars.next();
        chars.as_str()
    }

    /// Builds the successor produced by `transition`: the head cell is overwritten with the
    /// written symbol, then the head moves.
    ///
    /// Moving left from the leftmost cell leaves the head where it is.
    pub fn apply(&self, transition: &Transition) -> Self {
        let rest = self.rest();

        let (left, right) = match transition.direction {
            Direction::Right => {
                let mut left = self.left.clone();
                left.push(transition.write);
                (left, rest.to_string())
            }
            Direction::Left => {
                let mut left = self.left.clone();
                let mut right = String::with_capacity(rest.len() + 2);
                if let Some(previous) = left.pop() {
                    right.push(previous);
                }
                right.push(transition.write);
                right.push_str(rest);
                (left, right)
            }
        };

        Self {
            left,
            state: transition.next_state.clone(),
            right,
        }
    }
}

impl fmt::Display for Configuration {
    /// Renders `<left>[<state>]<head><rest>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]{}{}",
            self.left,
            self.state,
            self.head(),
            self.rest()
        )
    }
}
