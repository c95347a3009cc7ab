//! Parsing of one terminal line into a wizard input.
//!
//! `phone=9876543210` submits a field, `;` separates fields and a dotted key
//! such as `profile.email=a@b.in` builds a nested object. Lines starting with
//! `:` are commands.

use std::collections::BTreeMap;

use gs_core::{FieldValue, FormAccumulator};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Partial update for the current step. Empty means "continue".
    Submit(FormAccumulator),
    Back,
    GoTo(String),
    Resend,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected `field=value`, got `{0}`")]
    MissingValue(String),

    #[error("empty field name in `{0}`")]
    EmptyKey(String),

    #[error("`{field}` is both a value and a group")]
    Conflict { field: String },

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`:{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl InputError {
    pub fn message_key(&self) -> &'static str {
        match self {
            InputError::UnknownCommand(_) => "error.unknown_command",
            _ => "error.parse",
        }
    }
}

pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    match line.strip_prefix(':') {
        Some(command) => parse_command(command.trim()),
        None => parse_fields(line).map(Input::Submit),
    }
}

fn parse_command(command: &str) -> Result<Input, InputError> {
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };
    match name {
        "back" | "b" => Ok(Input::Back),
        "goto" | "g" if argument.is_empty() => Err(InputError::MissingArgument("goto")),
        "goto" | "g" => Ok(Input::GoTo(argument.to_ascii_lowercase())),
        "resend" => Ok(Input::Resend),
        "reset" => Ok(Input::Reset),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

fn parse_fields(line: &str) -> Result<FormAccumulator, InputError> {
    let mut root: BTreeMap<String, FieldValue> = BTreeMap::new();
    for pair in line.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| InputError::MissingValue(pair.to_string()))?;
        let path: Vec<&str> = key.trim().split('.').map(str::trim).collect();
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(InputError::EmptyKey(pair.to_string()));
        }
        insert(&mut root, &path, value.trim())?;
    }

    Ok(root
        .into_iter()
        .fold(FormAccumulator::new(), |acc, (key, value)| acc.with(key, value)))
}

fn insert(
    map: &mut BTreeMap<String, FieldValue>,
    path: &[&str],
    value: &str,
) -> Result<(), InputError> {
    let (head, rest) = match path {
        [head] => {
            map.insert((*head).to_string(), FieldValue::from(value));
            return Ok(());
        }
        [head, rest @ ..] => (*head, rest),
        [] => return Ok(()),
    };

    let entry = map
        .entry(head.to_string())
        .or_insert_with(|| FieldValue::Object(BTreeMap::new()));
    match entry {
        FieldValue::Object(inner) => insert(inner, rest, value),
        _ => Err(InputError::Conflict {
            field: head.to_string(),
        }),
    }
}
