// error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}: command not found")]
    UnknownCommand(String),
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("{command}: unexpected argument '{arg}'")]
    UnexpectedArgument { command: &'static str, arg: String },
    #[error("exit: {0}: numeric argument required")]
    InvalidExitCode(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("{0}: no such object")]
    NoSuchObject(String),
    #[error("{0}: object already exists")]
    DuplicateObject(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: unrecognised value '{value}' (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}
