//! The outcome of a simulation run and its console/JSON presentation.

use crate::configuration::Configuration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// A configuration in the accept state was reached.
    Accepted,
    /// A configuration in the reject state was reached.
    Rejected,
    /// Every branch died out, or the step bound was hit.
    Stopped,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verdict::Accepted => "accepted",
            Verdict::Rejected => "rejected",
            Verdict::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Why a run ended with `Verdict::Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No configuration of the last level produced an unvisited successor.
    NoValidPaths,
    /// The expansion counter reached the configured bound.
    StepLimit,
}

/// Everything a run reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the simulated machine.
    pub machine: String,
    /// The input string the run started from.
    pub input: String,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    /// Number of configurations inspected, including the deciding one.
    pub transitions: usize,
    /// Breadth-first level of `frontier`, i.e. the number of transitions applied to reach it.
    pub depth: usize,
    /// All configurations of the level at which the run ended, in generation order.
    pub frontier: Vec<Configuration>,
    /// Chain of configurations from the initial one to the accepting or rejecting one.
    /// Empty when the run stopped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Configuration>,
}

impl Report {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Renders the reported frontier, one configuration per line.
    pub fn render_frontier(&self) -> String {
        render(&self.frontier)
    }

    /// Renders the witness path, one configuration per line.
    pub fn render_path(&self) -> String {
        render(&self.path)
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn render(configurations: &[Configuration]) -> String {
    configurations
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Machine: {}", self.machine)?;
        writeln!(f, "Initial string: {}", self.input)?;

        match self.verdict {
            Verdict::Accepted => {
                writeln!(f, "String accepted in {} transitions.", self.transitions)?
            }
            Verdict::Rejected => {
                writeln!(f, "String rejected in {} transitions.", self.transitions)?
            }
            Verdict::Stopped => {
                if self.stop_reason == Some(StopReason::NoValidPaths) {
                    writeln!(f, "No valid paths found. Halting.")?;
                }
                writeln!(f, "Execution stopped after {} transitions.", self.transitions)?
            }
        }

        for configuration in &self.frontier {
            writeln!(f, "{configuration}")?;
        }

        write!(f, "String {}: {}", self.input, self.verdict)
    }
}
