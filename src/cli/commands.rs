use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Dev-loop scaffolding generator for JVM microservices
#[derive(Parser, Debug)]
#[command(
    name = "javelin",
    about = "Dev-loop scaffolding generator for JVM microservices",
    version,
    author,
    long_about = "javelin inspects a project directory, detects the JVM framework and the \
                  backing services it depends on, and generates the Dockerfile, Compose \
                  file and Tiltfile for a local development loop."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the framework and backing services of a project",
        long_about = "Inspects build descriptors, config files and sources to decide which \
                      framework a project uses and which backing services it needs.\n\n\
                      Examples:\n  \
                      javelin detect\n  \
                      javelin detect /path/to/project\n  \
                      javelin detect --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Discover microservices under a directory tree",
        long_about = "Recursively looks for service roots (build descriptors, Dockerfiles, \
                      framework config) and lists them.\n\n\
                      Examples:\n  \
                      javelin scan\n  \
                      javelin scan /path/to/monorepo --depth 4 --classify"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Generate dev-loop scaffolding for a project",
        long_about = "Runs detection, writes javelin.yaml plus the Dockerfile, \
                      docker-compose.yml and Tiltfile for the detected stack."
    )]
    Init(InitArgs),

    #[command(about = "Check that the external tools the dev loop needs are installed")]
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Root directory to scan (defaults to current directory)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        default_value = "3",
        value_name = "DEPTH",
        help = "Maximum directory depth, in path segments relative to the root"
    )]
    pub depth: usize,

    #[arg(long, help = "Also run framework classification on every discovered service")]
    pub classify: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'n',
        long,
        value_name = "NAME",
        help = "Service name (defaults to the directory name)"
    )]
    pub name: Option<String>,

    #[arg(long, help = "Overwrite existing scaffolding files")]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoctorArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
