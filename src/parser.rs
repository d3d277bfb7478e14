//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//!
//! The grammar in `grammar.pest` only splits the text into lines and comma separated fields.
//! The structure (seven header lines followed by five-field transitions) is enforced here so
//! that every problem is reported with the line and column it was found at.

use crate::types::{Direction, Machine, Transition, TuringMachineError};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Position, Span,
};
use pest_derive::Parser as PestParser;

/// Number of header lines preceding the transitions.
const HEADER_LINES: usize = 7;
/// Number of fields in a transition line.
const TRANSITION_FIELDS: usize = 5;

/// Derives a `PestParser` for the description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Parses the given input string into a `Machine`.
///
/// The first seven lines are, in order: name, states, input alphabet, tape alphabet, start
/// state, accept state and reject state. Every following non-blank line is a transition
/// `state,read,next_state,write,direction`.
///
/// No semantic checks are made: transitions may reference undeclared states or symbols.
///
/// # Returns
///
/// * `Ok(Machine)` if the input has the expected structure.
/// * `Err(TuringMachineError::MalformedDescription)` otherwise.
pub fn parse(input: &str) -> Result<Machine, TuringMachineError> {
    let root = DescriptionParser::parse(Rule::description, input)
        .map_err(|e| TuringMachineError::MalformedDescription(Box::new(e)))?
        .next()
        .ok_or_else(|| position_error("Empty description", Position::from_start(input)))?;

    let end = root.as_span().end_pos();
    let mut lines: Vec<Pair<Rule>> = root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::line)
        .collect();

    // Trailing blank lines do not count towards the header.
    while lines.last().is_some_and(is_blank) {
        lines.pop();
    }

    if lines.len() < HEADER_LINES {
        return Err(position_error(
            &format!(
                "Expected {HEADER_LINES} header lines, found {}",
                lines.len()
            ),
            end,
        ));
    }

    let transition_lines = lines.split_off(HEADER_LINES);
    let header = lines;

    let transitions = transition_lines
        .into_iter()
        .filter(|p| !is_blank(p))
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Machine {
        name: parse_text(&header[0]),
        states: parse_list(&header[1]),
        input_alphabet: parse_alphabet(&header[2])?,
        tape_alphabet: parse_alphabet(&header[3])?,
        start_state: parse_text(&header[4]),
        accept_state: parse_text(&header[5]),
        reject_state: parse_text(&header[6]),
        transitions,
    })
}

/// Parses a transition line from a `Pair<Rule::line>`.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let span = pair.as_span();
    let fields: Vec<Pair<Rule>> = pair.into_inner().collect();

    let [state, read, next_state, write, direction] =
        <[Pair<Rule>; TRANSITION_FIELDS]>::try_from(fields).map_err(|fields| {
            parse_error(
                &format!(
                    "Expected {TRANSITION_FIELDS} comma-separated fields, found {}",
                    fields.len()
                ),
                span,
            )
        })?;

    Ok(Transition {
        state: parse_text(&state),
        read: parse_symbol(&read)?,
        next_state: parse_text(&next_state),
        write: parse_symbol(&write)?,
        direction: parse_direction(&direction)?,
    })
}

/// Parses a head movement token.
///
/// Supports '<' or 'L' for Left and '>' or 'R' for Right, letters in either case.
fn parse_direction(pair: &Pair<Rule>) -> Result<Direction, TuringMachineError> {
    match pair.as_str().trim() {
        "<" | "L" | "l" => Ok(Direction::Left),
        ">" | "R" | "r" => Ok(Direction::Right),
        other => Err(parse_error(
            &format!("Unsupported direction: {other}"),
            pair.as_span(),
        )),
    }
}

/// Parses a field that must hold exactly one character.
fn parse_symbol(pair: &Pair<Rule>) -> Result<char, TuringMachineError> {
    let text = pair.as_str().trim();
    let mut chars = text.chars();

    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(parse_error(
            &format!("Expected a single-character symbol, found '{text}'"),
            pair.as_span(),
        )),
    }
}

/// Parses a comma separated list of symbols, dropping empty items.
fn parse_alphabet(pair: &Pair<Rule>) -> Result<Vec<char>, TuringMachineError> {
    pair.clone()
        .into_inner()
        .filter(|field| !field.as_str().trim().is_empty())
        .map(|field| parse_symbol(&field))
        .collect()
}

/// Parses a comma separated list of names, dropping empty items.
fn parse_list(pair: &Pair<Rule>) -> Vec<String> {
    pair.clone()
        .into_inner()
        .map(|field| field.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Returns the whole text of a line or field, trimmed.
fn parse_text(pair: &Pair<Rule>) -> String {
    pair.as_str().trim().to_string()
}

fn is_blank(pair: &Pair<Rule>) -> bool {
    pair.as_str().trim().is_empty()
}

/// Creates a `TuringMachineError::MalformedDescription` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::MalformedDescription(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Creates a `TuringMachineError::MalformedDescription` pointing at a single position.
fn position_error(msg: &str, pos: Position) -> TuringMachineError {
    TuringMachineError::MalformedDescription(Box::new(Error::new_from_pos(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        pos,
    )))
}
