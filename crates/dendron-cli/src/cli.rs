//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dendron",
    version,
    about = "Parse, interpret and compile Dendron prefix programs; assemble and run Soros code"
)]
pub struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        long_help = "Raise log verbosity: -v info, -vv debug, -vvv trace. RUST_LOG overrides."
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a program given as tokens, or read tokens from stdin.
    Run {
        #[command(flatten)]
        options: RunOptions,
        /// Program tokens. With none, stdin is read until EOF or a `.` line.
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Run built-in sample programs START..=END.
    Sample {
        #[command(flatten)]
        options: RunOptions,
        start: usize,
        end: Option<usize>,
    },
    /// List the built-in sample programs.
    List,
    /// Run every file in a directory as a token program.
    Dir {
        #[command(flatten)]
        options: RunOptions,
        path: PathBuf,
    },
    /// Assemble Soros code from a file (or stdin) and execute it.
    Soros { file: Option<PathBuf> },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Also assemble and execute the compiled code.
    #[arg(short = 'x', long = "execute")]
    pub execute: bool,
}
