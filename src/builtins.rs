// builtins.rs

use std::io::{self, Write};

use itertools::Itertools;
use log::debug;

use crate::error::CommandError;
use crate::navigator::Navigator;
use crate::parser::Command;
use crate::scene::{describe, ObjectRef, Scene};

pub type SceneNavigator = Navigator<ObjectRef, Scene>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

const HELP: &[&str] = &[
    "spawn <name>...     create objects",
    "destroy <name>...   destroy objects",
    "select [<name>...]  replace the selection",
    "back, b             go back to the previous selection",
    "forward, f          go forward to the next selection",
    "history             list the selection history",
    "ls                  list objects (* = selected)",
    "selection           print the current selection",
    "exit [code]         quit",
];

pub fn run_builtin<W: Write>(
    command: Command,
    nav: &mut SceneNavigator,
    out: &mut W,
) -> Result<Flow, CommandError> {
    match command {
        Command::Spawn(names) => {
            for name in &names {
                nav.host_mut().spawn(name)?;
            }
        }
        Command::Destroy(names) => {
            let mut narrowed = false;
            let mut first_err = None;
            for name in &names {
                match nav.host_mut().destroy(name) {
                    Ok(changed) => narrowed |= changed,
                    Err(err) => {
                        first_err.get_or_insert(err);
                    }
                }
            }
            // Destroying selected objects changes the selection like any
            // other edit would, even when some names were unknown.
            if narrowed {
                let selection = nav.host().selection();
                nav.notify_selection_changed(selection);
            }
            if let Some(err) = first_err {
                return Err(err);
            }
        }
        Command::Select(names) => {
            let selection = nav.host_mut().select(names.as_slice())?;
            nav.notify_selection_changed(selection);
        }
        Command::Back => {
            if !nav.back() {
                debug!("back: nothing to select");
            }
            print_selection(nav.host(), out)?;
        }
        Command::Forward => {
            if !nav.forward() {
                debug!("forward: nothing to select");
            }
            print_selection(nav.host(), out)?;
        }
        Command::History => print_history(nav, out)?,
        Command::List => {
            for name in nav.host().object_names() {
                let marker = if nav.host().is_selected(&name) { '*' } else { ' ' };
                emit(out, format!("{} {}", marker, name))?;
            }
        }
        Command::Selection => print_selection(nav.host(), out)?,
        Command::Help => {
            for line in HELP {
                emit(out, line)?;
            }
        }
        Command::Exit(code) => return Ok(Flow::Exit(code)),
    }
    Ok(Flow::Continue)
}

fn print_selection<W: Write>(scene: &Scene, out: &mut W) -> io::Result<()> {
    let names = scene.selected_names();
    if names.is_empty() {
        emit(out, "selection: (none)")
    } else {
        emit(out, format!("selection: {}", names.join(" ")))
    }
}

fn print_history<W: Write>(nav: &SceneNavigator, out: &mut W) -> io::Result<()> {
    let history = nav.history();
    for (i, entry) in history.entries().iter().enumerate() {
        let marker = if history.cursor() == Some(i) { '>' } else { ' ' };
        let items = if entry.items().is_empty() {
            "(empty)".to_string()
        } else {
            entry.items().iter().map(describe).join(", ")
        };
        emit(out, format!("{} {:>3}  {}", marker, i + 1, items))?;
    }
    Ok(())
}

/// Writes one line; a closed pipe on the other end is not an error.
fn emit<W: Write, S: AsRef<str>>(out: &mut W, line: S) -> io::Result<()> {
    match writeln!(out, "{}", line.as_ref()) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
