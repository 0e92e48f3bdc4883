// completion.rs

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::cell::RefCell;

use crate::parser::COMMAND_NAMES;

/// Completes command names in the first word and object names after it.
pub struct SceneCompleter {
    object_names: RefCell<Vec<String>>,
}

impl SceneCompleter {
    pub fn new() -> Self {
        Self {
            object_names: RefCell::new(vec![]),
        }
    }

    /// Refreshed by the REPL after every command, since the editor owns us.
    pub fn set_object_names(&self, names: Vec<String>) {
        *self.object_names.borrow_mut() = names;
    }

    /// Start of the word under the cursor and the sorted, deduplicated
    /// candidates for it.
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|&(_, c)| c.is_whitespace() || c == ';')
            .map_or(0, |(i, c)| i + c.len_utf8());
        let prefix = &head[start..];
        let first_word = head[..start]
            .rsplit(';')
            .next()
            .map_or(true, |stage| stage.trim().is_empty());

        let mut names: Vec<String> = if first_word {
            COMMAND_NAMES
                .iter()
                .filter(|name| name.starts_with(prefix))
                .map(|name| name.to_string())
                .collect()
        } else {
            self.object_names
                .borrow()
                .iter()
                .filter(|name| name.starts_with(prefix))
                .cloned()
                .collect()
        };
        names.sort();
        names.dedup();
        (start, names)
    }
}

impl Default for SceneCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for SceneCompleter {
    type Candidate = Pair;
    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, names) = self.candidates(line, pos);
        let completions = names
            .into_iter()
            .map(|n| Pair {
                replacement: format!("{} ", n),
                display: n,
            })
            .collect();
        Ok((start, completions))
    }
}

impl Hinter for SceneCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for SceneCompleter {}

impl Validator for SceneCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for SceneCompleter {}
