//! Engine module: CLI, output and progress around the traversal

pub mod arg_parser;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use arg_parser::{Cli, Commands};
pub use cli::{handle_run, list_resource, walk_types};
pub use output::RecordWriter;
pub use progress::RecordCounter;
