use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use selection_history::config::ReplConfig;
use selection_history::repl::{new_session, run_script, start_repl};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("SELHIST_LOG", "warn")).init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("selhist: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("cannot open script {}", path))?;
            let mut nav = new_session();
            run_script(BufReader::new(file), &mut nav, &mut io::stdout())
        }
        None => {
            let config = ReplConfig::from_env().context("invalid configuration")?;
            start_repl(&config)
        }
    }
}
