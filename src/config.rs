// config.rs

use std::path::PathBuf;

use rustyline::{CompletionType, Config, EditMode};

use crate::error::ConfigError;

pub const PROMPT_VAR: &str = "SELHIST_PROMPT";
pub const HISTFILE_VAR: &str = "HISTFILE";
pub const EDIT_MODE_VAR: &str = "SELHIST_EDIT_MODE";
pub const COMPLETION_VAR: &str = "SELHIST_COMPLETION";

/// Settings for the interactive session, read from the environment.
#[derive(Clone, Debug)]
pub struct ReplConfig {
    pub prompt: String,
    /// Line history is loaded from and saved to this file when set.
    pub histfile: Option<PathBuf>,
    pub edit_mode: EditMode,
    pub completion_type: CompletionType,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
            histfile: None,
            edit_mode: EditMode::Emacs,
            completion_type: CompletionType::List,
        }
    }
}

impl ReplConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }
        config.histfile = lookup(HISTFILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        if let Some(mode) = lookup(EDIT_MODE_VAR) {
            config.edit_mode = match mode.to_ascii_lowercase().as_str() {
                "emacs" => EditMode::Emacs,
                "vi" => EditMode::Vi,
                _ => return Err(invalid(EDIT_MODE_VAR, mode, "emacs, vi")),
            };
        }
        if let Some(kind) = lookup(COMPLETION_VAR) {
            config.completion_type = match kind.to_ascii_lowercase().as_str() {
                "list" => CompletionType::List,
                "circular" => CompletionType::Circular,
                _ => return Err(invalid(COMPLETION_VAR, kind, "list, circular")),
            };
        }
        Ok(config)
    }

    pub fn editor_config(&self) -> Config {
        Config::builder()
            .completion_type(self.completion_type)
            .edit_mode(self.edit_mode)
            .auto_add_history(false)
            .build()
    }
}

fn invalid(var: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value,
        expected,
    }
}
