//! This module defines the `Simulator`, which explores every computation branch of a
//! (possibly nondeterministic) machine in breadth-first order.
//!
//! Each level of the search holds the configurations reachable after exactly `k` transitions.
//! Levels are scanned in generation order and the first configuration found in the accept or
//! reject state decides the run. A configuration is enqueued at most once over the whole run.

use crate::configuration::Configuration;
use crate::report::{Report, StopReason, Verdict};
use crate::types::{Machine, DEFAULT_MAX_STEPS};
use std::collections::{HashSet, VecDeque};

/// Runs `machine` on `input` with a bound of `max_steps` inspected configurations.
pub fn run(machine: &Machine, input: &str, max_steps: usize) -> Report {
    Simulator::new(machine).with_max_steps(max_steps).run(input)
}

/// Breadth-first simulator over the configurations of a machine.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    machine: &'a Machine,
    max_steps: usize,
}

/// How a run ended. Decided outcomes carry the index of the deciding node.
enum Outcome {
    Accepted(usize),
    Rejected(usize),
    Stopped(StopReason),
    Exhausted,
}

/// An enqueued configuration and the node it was generated from.
#[derive(Debug)]
struct Node {
    config: Configuration,
    parent: Option<usize>,
}

/// Per-run search state: the visited set, the queue of levels, and the expansion counter.
#[derive(Debug)]
struct Search {
    nodes: Vec<Node>,
    visited: HashSet<Configuration>,
    levels: VecDeque<Vec<usize>>,
    expansions: usize,
    depth: usize,
}

impl Search {
    fn new(initial: Configuration) -> Self {
        let mut visited = HashSet::new();
        visited.insert(initial.clone());

        Self {
            nodes: vec![Node {
                config: initial,
                parent: None,
            }],
            visited,
            levels: VecDeque::from([vec![0]]),
            expansions: 0,
            depth: 0,
        }
    }

    /// Records `config` unless an equal configuration was enqueued before.
    fn enqueue(&mut self, config: Configuration, parent: usize) -> Option<usize> {
        if self.visited.contains(&config) {
            return None;
        }

        self.visited.insert(config.clone());
        self.nodes.push(Node {
            config,
            parent: Some(parent),
        });

        Some(self.nodes.len() - 1)
    }

    /// Follows parent links back to the initial configuration.
    fn path(&self, id: usize) -> Vec<Configuration> {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(id) = current {
            path.push(self.nodes[id].config.clone());
            current = self.nodes[id].parent;
        }

        path.reverse();
        path
    }

    fn configurations(&self, level: &[usize]) -> Vec<Configuration> {
        level
            .iter()
            .map(|&id| self.nodes[id].config.clone())
            .collect()
    }
}

impl<'a> Simulator<'a> {
    /// Creates a simulator bounded by `DEFAULT_MAX_STEPS`.
    pub fn new(machine: &'a Machine) -> Self {
        Self {
            machine,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the bound on inspected configurations.
    ///
    /// The bound is checked once a whole level has been scanned, so a wide level may
    /// overshoot it.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn machine(&self) -> &Machine {
        self.machine
    }

    /// Explores the machine on `input` until a configuration accepts or rejects, every
    /// branch dies out, or the step bound is reached.
    pub fn run(&self, input: &str) -> Report {
        let machine = self.machine;
        let mut search = Search::new(Configuration::initial(&machine.start_state, input));

        while let Some(level) = search.levels.pop_front() {
            log::debug!(
                "level {}: {} configuration(s), {} inspected so far",
                search.depth,
                level.len(),
                search.expansions
            );

            let mut next = Vec::new();

            for &id in &level {
                search.expansions += 1;
                let config = &search.nodes[id].config;

                if machine.is_accepting(&config.state) {
                    return self.finish(&search, input, &level, Outcome::Accepted(id));
                }

                if machine.is_rejecting(&config.state) {
                    return self.finish(&search, input, &level, Outcome::Rejected(id));
                }

                let successors: Vec<Configuration> = machine
                    .transitions_for(&config.state, config.head())
                    .map(|t| config.apply(t))
                    .collect();

                for successor in successors {
                    log::trace!("{} -> {}", search.nodes[id].config, successor);

                    if let Some(child) = search.enqueue(successor, id) {
                        next.push(child);
                    }
                }
            }

            if next.is_empty() {
                return self.finish(
                    &search,
                    input,
                    &level,
                    Outcome::Stopped(StopReason::NoValidPaths),
                );
            }

            if search.expansions >= self.max_steps {
                return self.finish(
                    &search,
                    input,
                    &level,
                    Outcome::Stopped(StopReason::StepLimit),
                );
            }

            search.levels.push_back(next);
            search.depth += 1;
        }

        // Not reachable: an empty next level ends the run above.
        self.finish(&search, input, &[], Outcome::Exhausted)
    }

    fn finish(&self, search: &Search, input: &str, level: &[usize], outcome: Outcome) -> Report {
        let (verdict, stop_reason, path) = match outcome {
            Outcome::Accepted(id) => (Verdict::Accepted, None, search.path(id)),
            Outcome::Rejected(id) => (Verdict::Rejected, None, search.path(id)),
            Outcome::Stopped(reason) => (Verdict::Stopped, Some(reason), Vec::new()),
            Outcome::Exhausted => (Verdict::Rejected, None, Vec::new()),
        };

        log::info!(
            "'{}' on '{}': {} after {} transitions (depth {}, {} configurations visited)",
            self.machine.name,
            input,
            verdict,
            search.expansions,
            search.depth,
            search.visited.len()
        );

        Report {
            machine: self.machine.name.clone(),
            input: input.to_string(),
            verdict,
            stop_reason,
            transitions: search.expansions,
            depth: search.depth,
            frontier: search.configurations(level),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use std::collections::HashSet;

    fn machine(text: &str) -> Machine {
        parse(text).unwrap()
    }

    fn unary() -> Machine {
        machine(include_str!("../machines/unary-increment.csv"))
    }

    fn only_a() -> Machine {
        machine(include_str!("../machines/only-a.csv"))
    }

    fn rendered(configurations: &[Configuration]) -> Vec<String> {
        configurations.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_unary_increment_accepts() {
        let report = run(&unary(), "00", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Accepted);
        // Three transitions applied, four configurations inspected.
        assert_eq!(report.depth, 3);
        assert_eq!(report.transitions, 4);
        assert_eq!(rendered(&report.frontier), vec!["001[qacc]_"]);

        let last = report.frontier.last().unwrap();
        assert_eq!(last.state, "qacc");
        assert_eq!(last.left, "001");
    }

    #[test]
    fn test_empty_input_reads_blank() {
        let report = run(&unary(), "", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.transitions, 2);
        assert_eq!(rendered(&report.frontier), vec!["1[qacc]_"]);
    }

    #[test]
    fn test_no_matching_rule_stops_immediately() {
        let report = run(&only_a(), "c", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Stopped);
        assert_eq!(report.stop_reason, Some(StopReason::NoValidPaths));
        assert_eq!(report.transitions, 1);
        assert_eq!(rendered(&report.frontier), vec!["[q0]c"]);
        assert!(report.path.is_empty());
    }

    #[test]
    fn test_reject_state() {
        let report = run(&only_a(), "aab", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Rejected);
        assert_eq!(report.transitions, 4);
        assert_eq!(rendered(&report.frontier), vec!["aab[qrej]_"]);
    }

    #[test]
    fn test_step_limit_stops_before_accepting() {
        // "aaaa" needs six inspections to reach the accept state.
        let report = run(&only_a(), "aaaa", 5);

        assert_eq!(report.verdict, Verdict::Stopped);
        assert_eq!(report.stop_reason, Some(StopReason::StepLimit));
        assert_eq!(report.transitions, 5);
        assert_eq!(report.depth, 4);
        assert_eq!(rendered(&report.frontier), vec!["aaaa[q0]_"]);

        let report = run(&only_a(), "aaaa", 6);
        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.transitions, 6);
    }

    #[test]
    fn test_nondeterministic_branch_accepts_before_loop() {
        let m = machine(include_str!("../machines/guess-or-loop.csv"));
        let report = run(&m, "a", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.transitions, 5);
        assert_eq!(report.depth, 2);
        assert_eq!(
            rendered(&report.frontier),
            vec!["a_[qloop]_", "a_[qacc]_"]
        );
        assert_eq!(
            rendered(&report.path),
            vec!["[q0]a", "a[q1]_", "a_[qacc]_"]
        );
    }

    #[test]
    fn test_transition_count_matches_scan_position() {
        let m = machine(include_str!("../machines/guess-or-loop.csv"));
        let report = run(&m, "a", DEFAULT_MAX_STEPS);

        // One configuration at depth 0, two at depth 1, then the second of depth 2.
        let position = report
            .frontier
            .iter()
            .position(|c| m.is_accepting(&c.state))
            .unwrap();
        assert_eq!(report.transitions, 1 + 2 + position + 1);
    }

    #[test]
    fn test_first_scanned_terminal_configuration_wins() {
        let reject_first = "tie\nq0,qa,qr\na\na,_\nq0\nqa\nqr\nq0,a,qr,a,R\nq0,a,qa,a,R\n";
        let accept_first = "tie\nq0,qa,qr\na\na,_\nq0\nqa\nqr\nq0,a,qa,a,R\nq0,a,qr,a,R\n";

        let report = run(&machine(reject_first), "a", DEFAULT_MAX_STEPS);
        assert_eq!(report.verdict, Verdict::Rejected);
        assert_eq!(report.transitions, 2);
        assert_eq!(rendered(&report.frontier), vec!["a[qr]_", "a[qa]_"]);

        let report = run(&machine(accept_first), "a", DEFAULT_MAX_STEPS);
        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.transitions, 2);
    }

    #[test]
    fn test_start_state_accepting() {
        let m = machine("m\nqa,qr\na\na,_\nqa\nqa\nqr\n");
        let report = run(&m, "a", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.transitions, 1);
        assert_eq!(report.depth, 0);
        assert_eq!(rendered(&report.path), vec!["[qa]a"]);
    }

    #[test]
    fn test_revisited_configuration_is_not_enqueued() {
        // q1 moves left back onto a configuration seen one level earlier.
        let m = machine(include_str!("../machines/bounce.csv"));
        let report = run(&m, "a", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Stopped);
        assert_eq!(report.stop_reason, Some(StopReason::NoValidPaths));
        assert_eq!(report.transitions, 4);
        assert_eq!(report.depth, 3);
        assert_eq!(
            report.frontier,
            vec![Configuration {
                left: "a".into(),
                state: "q1".into(),
                right: "_".into(),
            }]
        );
    }

    #[test]
    fn test_non_halting_machine_hits_step_limit() {
        let m = machine("runaway\nq0,qa,qr\n\n_\nq0\nqa\nqr\nq0,_,q0,_,R\n");
        let report = run(&m, "", DEFAULT_MAX_STEPS);

        assert_eq!(report.verdict, Verdict::Stopped);
        assert_eq!(report.stop_reason, Some(StopReason::StepLimit));
        assert_eq!(report.transitions, DEFAULT_MAX_STEPS);
        assert_eq!(report.depth, DEFAULT_MAX_STEPS - 1);
    }

    #[test]
    fn test_runs_are_repeatable() {
        let m = machine(include_str!("../machines/guess-or-loop.csv"));
        let simulator = Simulator::new(&m).with_max_steps(50);

        assert_eq!(simulator.run("a"), simulator.run("a"));
        assert_eq!(simulator.run("aa"), simulator.run("aa"));
    }

    #[test]
    fn test_path_ends_in_deciding_configuration() {
        let report = run(&only_a(), "aab", DEFAULT_MAX_STEPS);

        assert_eq!(report.path.len(), report.depth + 1);
        assert_eq!(report.path.first().unwrap().to_string(), "[q0]aab");
        assert_eq!(report.path.last().unwrap().state, "qrej");
    }

    #[test]
    fn test_search_enqueues_each_configuration_once() {
        let initial = Configuration::initial("q0", "a");
        let mut search = Search::new(initial.clone());
        let successor = Configuration {
            left: "a".into(),
            state: "q1".into(),
            right: String::new(),
        };

        assert_eq!(search.enqueue(initial, 0), None);
        assert_eq!(search.enqueue(successor.clone(), 0), Some(1));
        assert_eq!(search.enqueue(successor, 0), None);
        assert_eq!(search.visited.len(), 2);
    }

    #[test]
    fn test_frontiers_never_repeat_configurations() {
        let m = machine(
            "fan\nq0,qa,qr\na\na,_\nq0\nqa\nqr\nq0,a,q0,a,R\nq0,a,q0,a,R\nq0,_,q0,_,L\nq0,a,q0,a,L\n",
        );

        for steps in 1..30 {
            let report = run(&m, "aa", steps);
            let unique: HashSet<_> = report.frontier.iter().collect();
            assert_eq!(unique.len(), report.frontier.len());
            assert_ne!(report.verdict, Verdict::Accepted);
        }
    }

    #[test]
    fn test_simulator_accessors() {
        let m = unary();
        let simulator = Simulator::new(&m);

        assert_eq!(simulator.max_steps(), DEFAULT_MAX_STEPS);
        assert_eq!(simulator.clone().with_max_steps(7).max_steps(), 7);
        assert_eq!(simulator.machine().name, "Unary increment");
    }
}
