// repl.rs

use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use log::{debug, log, warn, Level};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::builtins::{Flow, SceneNavigator};
use crate::completion::SceneCompleter;
use crate::config::ReplConfig;
use crate::navigator::Navigator;
use crate::pipeline::execute_pipeline;
use crate::scene::Scene;

/// A fresh session over an empty scene. The starting selection is reported
/// once, as a host does when it first hooks up the navigator.
pub fn new_session() -> SceneNavigator {
    let mut nav = Navigator::new(Scene::new());
    let initial = nav.host().selection();
    nav.notify_selection_changed(initial);
    nav
}

/// Runs each line of `input` as a command line. Returns the exit code
/// requested by `exit`, or 0 at end of input. The first failing line aborts.
pub fn run_script<R: BufRead, W: Write>(
    input: R,
    nav: &mut SceneNavigator,
    out: &mut W,
) -> anyhow::Result<i32> {
    for (n, line) in input.lines().enumerate() {
        let line = line.context("failed to read script")?;
        let flow = execute_pipeline(&line, nav, out).with_context(|| format!("line {}", n + 1))?;
        if let Flow::Exit(code) = flow {
            return Ok(code);
        }
    }
    Ok(0)
}

/// A missing history file is the normal first run. Anything else means the
/// file exists but could not be read.
fn history_load_level(err: &ReadlineError) -> Level {
    match err {
        ReadlineError::Io(e) if e.kind() == io::ErrorKind::NotFound => Level::Debug,
        _ => Level::Warn,
    }
}

pub fn start_repl(config: &ReplConfig) -> anyhow::Result<i32> {
    let mut rl: Editor<SceneCompleter, DefaultHistory> =
        Editor::with_config(config.editor_config()).context("failed to create line editor")?;
    rl.set_helper(Some(SceneCompleter::new()));
    if let Some(histfile) = &config.histfile {
        if let Err(err) = rl.load_history(histfile) {
            log!(
                history_load_level(&err),
                "no line history loaded from {}: {}",
                histfile.display(),
                err
            );
        }
    }

    let mut nav = new_session();
    let mut stdout = io::stdout();
    let code = loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(err) = rl.add_history_entry(line.as_str()) {
                    debug!("could not record line in history: {}", err);
                }
                match execute_pipeline(&line, &mut nav, &mut stdout) {
                    Ok(Flow::Exit(code)) => break code,
                    Ok(Flow::Continue) => {}
                    Err(err) => eprintln!("{}", err),
                }
                stdout.flush().ok();
                if let Some(helper) = rl.helper() {
                    helper.set_object_names(nav.host().object_names());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break 0,
            Err(err) => return Err(err).context("failed to read line"),
        }
    };

    if let Some(histfile) = &config.histfile {
        if let Err(err) = rl.save_history(histfile) {
            warn!("could not save line history to {}: {}", histfile.display(), err);
        }
    }
    Ok(code)
}
