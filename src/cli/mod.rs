pub mod args;
pub mod commands;
pub mod report;

pub use args::CliArgs;
pub use commands::handle_commands;
pub use report::{render_json, ConsoleReport};
