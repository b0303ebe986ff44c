// Command line front end: feeds token programs to the Dendron pipeline and
// Soros assembly to the machine. All language work happens in the libraries.

use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use log::error;

mod cli;
mod driver;
mod samples;

use cli::{Cli, Command, RunOptions};
use driver::{Console, RunError, SEPARATOR};

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match dispatch(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            eprintln!("dendron: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when at least one program failed but the batch went on.
fn dispatch(command: Command) -> Result<bool, RunError> {
    let mut out = Console(io::stdout().lock());
    match command {
        Command::Run { options, tokens } => {
            let tokens = if tokens.is_empty() {
                driver::read_tokens(io::stdin().lock())?
            } else {
                tokens
            };
            Ok(report(driver::run_program(&tokens, options, &mut out)))
        }
        Command::Sample {
            options,
            start,
            end,
        } => run_samples(start, end.unwrap_or(start), options, &mut out),
        Command::List => {
            for (index, tokens) in samples::SAMPLES.iter().enumerate() {
                writeln!(out, "{index:>3}  {}", tokens.join(" "))?;
            }
            Ok(true)
        }
        Command::Dir { options, path } => {
            let mut all_ok = true;
            for (name, tokens) in driver::read_dir_programs(&path)? {
                writeln!(out, "\nTest File {name}:\n")?;
                all_ok &= report(driver::run_program(&tokens, options, &mut out));
                writeln!(out, "\n{SEPARATOR}")?;
            }
            Ok(all_ok)
        }
        Command::Soros { file } => {
            let mut warnings = Console(io::stderr().lock());
            match file {
                Some(path) => {
                    let reader = BufReader::new(File::open(path)?);
                    driver::run_assembly(reader, &mut out, &mut warnings)?;
                }
                None => driver::run_assembly(io::stdin().lock(), &mut out, &mut warnings)?,
            }
            Ok(true)
        }
    }
}

fn run_samples<W: Write>(
    start: usize,
    end: usize,
    options: RunOptions,
    out: &mut W,
) -> Result<bool, RunError> {
    let count = samples::SAMPLES.len();
    for index in [start, end] {
        if index >= count {
            return Err(RunError::NoSuchSample(index, count));
        }
    }
    let mut all_ok = true;
    for index in start..=end {
        let Some(tokens) = samples::sample(index) else {
            return Err(RunError::NoSuchSample(index, count));
        };
        writeln!(out, "TEST #{index}\n")?;
        all_ok &= report(driver::run_program(tokens, options, out));
        writeln!(out, "\n{SEPARATOR}")?;
    }
    Ok(all_ok)
}

/// Prints a failed program's error; the output it produced so far stays.
fn report(result: Result<(), RunError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("{err}");
            eprintln!("dendron: {err}");
            false
        }
    }
}

#[cfg(test)]
mod test;
