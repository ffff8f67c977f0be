//! User interface and interaction
//!
//! This module handles the command-line interface, terminal output,
//! progress indication, shell completion and the interactive blueprint wizard.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;
pub mod progress;
pub mod wizard;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use color::{Colors, colorize};
pub use completion::print_completions;
pub use progress::ProgressReporter;
pub use wizard::BlueprintWizard;
