// pipeline.rs

use std::io::Write;

use crate::builtins::{run_builtin, Flow, SceneNavigator};
use crate::error::CommandError;
use crate::parser::parse_command;

/// Runs every `;`-separated command on the line, in order. Stops at the
/// first error or at `exit`.
pub fn execute_pipeline<W: Write>(
    input: &str,
    nav: &mut SceneNavigator,
    out: &mut W,
) -> Result<Flow, CommandError> {
    for stage in split_stages(input) {
        let Some(command) = parse_command(stage)? else {
            continue;
        };
        if let Flow::Exit(code) = run_builtin(command, nav, out)? {
            return Ok(Flow::Exit(code));
        }
    }
    Ok(Flow::Continue)
}

/// Splits on `;` outside quotes. Quotes are left in place for the parser.
fn split_stages(input: &str) -> Vec<&str> {
    let mut stages = vec![];
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut word_start = true;
    let mut last = 0;
    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        let quoted = in_single || in_double;
        match c {
            '\\' if !in_single => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            // A comment swallows any `;` after it.
            '#' if !quoted && word_start => break,
            ';' if !quoted => {
                stages.push(&input[last..i]);
                last = i + 1;
            }
            _ => {}
        }
        word_start = !quoted && (c.is_whitespace() || c == ';');
    }
    stages.push(&input[last..]);
    stages
}
