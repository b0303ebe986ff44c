use super::*;
use crate::driver::{read_tokens, run_assembly, run_program};

use clap::CommandFactory;
use dendron::DendronError;
use soros::MachineError;

fn run(tokens: &[&str], execute: bool) -> (Result<(), RunError>, String) {
    let mut out = String::new();
    let result = run_program(tokens, RunOptions { execute }, &mut out);
    (result, out)
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn parses_arguments() {
    let cli = Cli::try_parse_from(["dendron", "-vv", "run", "-x", "#", "-", "5", "-2"]).unwrap();
    assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    match cli.command {
        Command::Run { options, tokens } => {
            assert!(options.execute);
            assert_eq!(tokens, ["#", "-", "5", "-2"]);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["dendron", "sample", "3", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Sample {
            start: 3,
            end: Some(5),
            ..
        }
    ));
}

#[test]
fn full_program_run() {
    let (result, out) = run(&[":=", "a", "3", "#", "+", "a", "4"], true);
    result.unwrap();
    let expected = "\
The Program, with expressions in infix notation:

a := 3
Print ( a + 4 )

Interpreting the parse tree...
=== 7
Interpretation complete.

Symbol Table Contents
========================
a :   3

PUSH 3
STORE a
LOAD a
PUSH 4
ADD
PRINT

Executing compiled code...
=== 7
Soros: execution ended with 0 items left on the stack.

a :   3

";
    assert_eq!(out, expected);
}

#[test]
fn failing_interpretation_keeps_display() {
    let (result, out) = run(&["#", "/", "5", "0"], false);
    assert!(matches!(
        result,
        Err(RunError::Dendron(DendronError::DivideByZero))
    ));
    assert!(out.contains("Print ( 5 / 0 )"));
    assert!(out.ends_with("Interpreting the parse tree...\n"));
}

#[test]
fn parse_failure_prints_nothing() {
    let (result, out) = run(&[":=", "x", "9", ":="], false);
    assert!(matches!(result, Err(RunError::Dendron(DendronError::PrematureEnd))));
    assert_eq!(out, "");
}

#[test]
fn good_samples_pass_and_bad_samples_fail() {
    let mut out = String::new();
    assert!(run_samples(0, 12, RunOptions { execute: true }, &mut out).unwrap());
    for index in 13..samples::SAMPLES.len() {
        let mut out = String::new();
        assert!(!run_samples(index, index, RunOptions::default(), &mut out).unwrap());
    }
    let mut out = String::new();
    assert!(matches!(
        run_samples(0, samples::SAMPLES.len(), RunOptions::default(), &mut out),
        Err(RunError::NoSuchSample(_, _))
    ));
}

#[test]
fn reads_tokens_until_sentinel() {
    let input = "  := x\n 9  # x\n.\n# y\n";
    let tokens = read_tokens(input.as_bytes()).unwrap();
    assert_eq!(tokens, [":=", "x", "9", "#", "x"]);
}

#[test]
fn executes_assembly_text() {
    let input = "PUSH 2\nSTORE a\nLOAD a\nFROB\nLOAD a\nMUL\nPRINT\n.\nPRINT\n";
    let mut out = String::new();
    let mut warnings = String::new();
    run_assembly(input.as_bytes(), &mut out, &mut warnings).unwrap();
    assert_eq!(warnings, "line 4: illegal assembly instr FROB\n");
    assert_eq!(
        out,
        "Executing compiled code...\n=== 4\nSoros: execution ended with 0 items left on the stack.\n\na :   2\n\n"
    );
}

#[test]
fn assembly_runtime_errors_surface() {
    let mut out = String::new();
    let mut warnings = String::new();
    let err = run_assembly("LOAD nobody\n".as_bytes(), &mut out, &mut warnings).unwrap_err();
    assert!(matches!(
        err,
        RunError::Machine(MachineError::Uninitialized(ref name)) if name == "nobody"
    ));
}
