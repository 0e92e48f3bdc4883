// parser.rs

use crate::error::CommandError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Spawn(Vec<String>),
    Destroy(Vec<String>),
    Select(Vec<String>),
    Back,
    Forward,
    History,
    List,
    Selection,
    Help,
    Exit(i32),
}

pub const COMMAND_NAMES: &[&str] = &[
    "back", "destroy", "exit", "forward", "help", "history", "ls", "select", "selection", "spawn",
];

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = split_words(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name.as_str() {
        "spawn" => Command::Spawn(at_least_one("spawn", args)?),
        "destroy" => Command::Destroy(at_least_one("destroy", args)?),
        "select" => Command::Select(args.to_vec()),
        "back" | "b" => no_args("back", args, Command::Back)?,
        "forward" | "f" => no_args("forward", args, Command::Forward)?,
        "history" => no_args("history", args, Command::History)?,
        "ls" => no_args("ls", args, Command::List)?,
        "selection" => no_args("selection", args, Command::Selection)?,
        "help" => no_args("help", args, Command::Help)?,
        "exit" => match args {
            [] => Command::Exit(0),
            [code] => Command::Exit(
                code.parse()
                    .map_err(|_| CommandError::InvalidExitCode(code.clone()))?,
            ),
            [_, extra, ..] => {
                return Err(CommandError::UnexpectedArgument {
                    command: "exit",
                    arg: extra.clone(),
                })
            }
        },
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn at_least_one(command: &'static str, args: &[String]) -> Result<Vec<String>, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(args.to_vec())
}

fn no_args(command: &'static str, args: &[String], parsed: Command) -> Result<Command, CommandError> {
    match args.first() {
        Some(arg) => Err(CommandError::UnexpectedArgument {
            command,
            arg: arg.clone(),
        }),
        None => Ok(parsed),
    }
}

/// Splits a command line into words. Single and double quotes group words,
/// a backslash escapes the next character outside single quotes, and an
/// unquoted `#` at the start of a word comments out the rest of the line.
pub fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    enum State {
        Normal,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut cur = String::new();
    // Distinguishes an empty quoted word ('') from no word at all.
    let mut in_word = false;
    let mut state = State::Normal;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\'' => {
                    state = State::Single;
                    in_word = true;
                }
                '"' => {
                    state = State::Double;
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        cur.push(next);
                        in_word = true;
                    }
                }
                '#' if !in_word => break,
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut cur));
                        in_word = false;
                    }
                }
                _ => {
                    cur.push(ch);
                    in_word = true;
                }
            },
            State::Single => match ch {
                '\'' => state = State::Normal,
                _ => cur.push(ch),
            },
            State::Double => match ch {
                '"' => state = State::Normal,
                '\\' => match chars.peek() {
                    Some(&(next @ ('\\' | '"'))) => {
                        cur.push(next);
                        chars.next();
                    }
                    _ => cur.push('\\'),
                },
                _ => cur.push(ch),
            },
        }
    }

    if !matches!(state, State::Normal) {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_word {
        words.push(cur);
    }
    Ok(words)
}
