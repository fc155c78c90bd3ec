use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the jstype binary.
#[derive(Parser, Debug)]
#[command(
    name = "jstype",
    version,
    about = "JSType: a lightweight type checker for JavaScript"
)]
pub struct CliArgs {
    /// Files or directories to check.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Also track unannotated declarations, using the type of their initializer.
    #[arg(long)]
    pub infer: bool,

    /// Show detailed type information and a line for every file.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write a JSON report of every checked file to this path.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Colorize output (default: when stdout is a terminal).
    #[arg(long, overrides_with = "no_pretty")]
    pub pretty: bool,

    /// Never colorize output.
    #[arg(long = "no-pretty", overrides_with = "pretty")]
    pub no_pretty: bool,

    /// Path to a jstype.json config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File extensions to check in directories (comma separated).
    #[arg(long = "ext", value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,
}

impl CliArgs {
    /// `Some` when colour was forced on or off on the command line.
    pub fn pretty_override(&self) -> Option<bool> {
        if self.pretty {
            Some(true)
        } else if self.no_pretty {
            Some(false)
        } else {
            None
        }
    }
}
