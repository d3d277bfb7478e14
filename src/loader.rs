//! This module provides the `MachineLoader` struct, responsible for loading machine
//! descriptions from files and strings.

use crate::parser::parse;
use crate::types::{Machine, TuringMachineError};
use std::fs;
use std::path::Path;

/// `MachineLoader` is a utility struct for loading machine descriptions.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::MalformedDescription)` if the content is not a valid description.
    pub fn load_machine(path: &Path) -> Result<Machine, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let machine = parse(&content)?;
        log::debug!(
            "loaded machine '{}' from {} ({} transitions)",
            machine.name,
            path.display(),
            machine.transitions.len()
        );

        Ok(machine)
    }

    /// Loads a machine description from the provided string content.
    pub fn load_machine_from_string(content: &str) -> Result<Machine, TuringMachineError> {
        parse(content)
    }
}
