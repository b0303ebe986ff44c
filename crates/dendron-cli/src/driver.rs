use std::fmt::{self, Write};
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use dendron::{codegen, interpret, parse, round_trip, DendronError};
use log::{debug, info};
use soros::assembler::{AssemblerError, Assembler, LineStatus};
use soros::{DefaultMachine, MachineError};
use thiserror_no_std::Error;

use crate::cli::RunOptions;

pub const SEPARATOR: &str =
    "___________________________________________________________________________";

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Dendron(#[from] DendronError),
    #[error(transparent)]
    Assembler(#[from] AssemblerError),
    #[error(transparent)]
    Machine(#[from] MachineError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("could not write output")]
    Output,
    #[error("sample {0} does not exist, there are {1}")]
    NoSuchSample(usize, usize),
}

impl From<fmt::Error> for RunError {
    fn from(_: fmt::Error) -> Self {
        RunError::Output
    }
}

/// `fmt::Write` over an `io::Write`, so library output streams straight to
/// the terminal and survives a later failure.
pub struct Console<W: io::Write>(pub W);

impl<W: io::Write> Write for Console<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Display, interpret and compile one program. Stops at the first failing
/// stage.
pub fn run_program<S, W>(tokens: &[S], options: RunOptions, out: &mut W) -> Result<(), RunError>
where
    S: AsRef<str>,
    W: Write,
{
    let program = parse(tokens)?;
    info!("parsed {} actions from {} tokens", program.len(), tokens.len());

    writeln!(out, "The Program, with expressions in infix notation:")?;
    writeln!(out)?;
    write!(out, "{program}")?;
    writeln!(out)?;

    writeln!(out, "Interpreting the parse tree...")?;
    let symbols = interpret(&program, out)?;
    writeln!(out, "Interpretation complete.")?;
    writeln!(out)?;
    writeln!(out, "Symbol Table Contents")?;
    writeln!(out, "========================")?;
    write!(out, "{symbols}")?;
    writeln!(out)?;

    codegen::compile(&program, out)?;

    if options.execute {
        writeln!(out)?;
        writeln!(out, "Executing compiled code...")?;
        let outcome = round_trip(&program, out)?;
        outcome.report(out)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Whitespace separated tokens from `reader`, up to EOF or a line holding
/// only `.`.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<String>, RunError> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim() == "." {
            break;
        }
        tokens.extend(line.split_whitespace().map(String::from));
    }
    debug!("read {} tokens", tokens.len());
    Ok(tokens)
}

/// Every regular file in `dir`, sorted by name, as a token list.
pub fn read_dir_programs(dir: &Path) -> Result<Vec<(String, Vec<String>)>, RunError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut programs = Vec::new();
    for path in paths {
        let text = fs::read_to_string(&path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        programs.push((name, text.split_whitespace().map(String::from).collect()));
    }
    Ok(programs)
}

/// Assemble Soros text line by line and execute it, then print the machine
/// report. Skipped lines go to `warnings`.
pub fn run_assembly<R, W, E>(reader: R, out: &mut W, warnings: &mut E) -> Result<(), RunError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut assembler = Assembler::new();
    for line in reader.lines() {
        if assembler.add_line(&line?)? == LineStatus::Finished {
            break;
        }
    }
    let assembly = assembler.finish();
    for warning in &assembly.warnings {
        writeln!(warnings, "{warning}")?;
    }

    writeln!(out, "Executing compiled code...")?;
    let mut machine = DefaultMachine::new();
    let outcome = machine.execute(&assembly.instructions, out)?;
    outcome.report(out)?;
    writeln!(out)?;
    Ok(())
}
