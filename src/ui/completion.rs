//! Shell completion generation for apicatalog

use clap::{Command, CommandFactory};
use clap_complete::{Generator, Shell, generate};

use crate::ui::cli::Cli;

/// Generate shell completions for the given shell
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    generate(
        generator,
        app,
        app.get_name().to_string(),
        &mut std::io::stdout(),
    );
}

/// Completion script for `shell` as a string
pub fn completion_script(shell: Shell) -> Result<String, String> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, name, &mut buf);

    String::from_utf8(buf).map_err(|e| format!("Failed to generate completion script: {e}"))
}
