//! This crate traces single-tape, possibly nondeterministic, Turing machines.
//! It includes modules for loading machine descriptions, exploring every computation branch
//! breadth-first, and reporting the verdict together with the level that produced it.

pub mod configuration;
pub mod loader;
pub mod parser;
pub mod report;
pub mod simulator;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `Configuration` struct from the configuration module.
pub use configuration::Configuration;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the report types from the report module.
pub use report::{Report, StopReason, Verdict};
/// Re-exports the `Simulator` struct and the `run` shortcut from the simulator module.
pub use simulator::{run, Simulator};
/// Re-exports the machine description types from the types module.
pub use types::{
    Direction, Machine, Transition, TuringMachineError, BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
