mod cli;

pub use cli::{format_finding, print_summary, CliReporter};
