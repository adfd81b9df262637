extern crate ansi_term;
extern crate linefeed;

use crate::mach::{Outcome, Runtime};
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::fs;
use std::process::exit;

pub fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => {
            if let Err(error) = repl() {
                eprintln!("{}", error);
                exit(74);
            }
        }
        2 => run_file(&args[1]),
        _ => {
            eprintln!("USAGE: lox [script]");
            exit(64);
        }
    }
}

fn repl() -> std::io::Result<()> {
    let interface = Interface::new("lox")?;
    interface.set_prompt("> ")?;
    let mut runtime = Runtime::default();
    loop {
        let string = match interface.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if string.trim().is_empty() {
            continue;
        }
        report(runtime.interpret(&string));
        interface.add_history_unique(string);
    }
    Ok(())
}

fn run_file(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}: {}", path, error);
            exit(74);
        }
    };
    match Runtime::default().interpret(&source) {
        outcome @ Outcome::CompileError(_) => {
            report(outcome);
            exit(65);
        }
        outcome @ Outcome::RuntimeError(_) => {
            report(outcome);
            exit(70);
        }
        outcome => report(outcome),
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Ok(val) => println!("{}", val),
        Outcome::CompileError(errors) => {
            for error in errors.iter() {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
            }
        }
        Outcome::RuntimeError(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
        }
    }
}
