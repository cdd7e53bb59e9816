pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, DoctorArgs, InitArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter};
