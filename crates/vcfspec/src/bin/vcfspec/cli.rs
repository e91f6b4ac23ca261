//! vcfspec cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; vcfspec ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a tfvars file into a bring-up spec
    ///
    /// Reads from stdin unless an input file is given
    Convert(ConvertCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct ConvertCommand {
    /// tfvars file to read
    pub input: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Override built-in defaults with a YAML or JSON file
    #[clap(long = "defaults")]
    pub defaults: Option<PathBuf>,

    /// Exit with an error if parsing produced any diagnostics
    ///
    /// The document is still written.
    #[clap(long = "deny-warnings")]
    pub deny_warnings: bool,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[clap(short = 'o', long = "output")]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// Parsed variables, reads from stdin unless an input file is given
    Variables { input: Option<PathBuf> },
    /// Effective defaults as YAML
    Defaults {
        #[clap(long = "defaults")]
        defaults: Option<PathBuf>,
    },
}
