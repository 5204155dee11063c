//! Command-line front end: batch evaluation of one argument or an interactive loop.

use crate::evaluator::Calculator;
use crate::lexer::{count_lex_errors, format_lex_errors};
use log::debug;
use std::io::{self, BufRead, Write};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_EVALUATION_ERROR: i32 = 1;
pub const EXIT_LEX_ERROR: i32 = 2;
pub const EXIT_USAGE: i32 = 64;
pub const EXIT_IO_ERROR: i32 = 74;

const PROGRAM: &str = env!("CARGO_PKG_NAME");
const PROMPT: &str = ">> ";

/// `major.minor` of the package version.
pub fn version() -> String {
    format!(
        "{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR")
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    MachineVersion,
    Evaluate(String),
    Interactive,
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Ok(Command::Interactive);
    };
    if let Some(extra) = args.next() {
        return Err(format!(
            "unexpected argument '{extra}', quote the expression to pass it as one argument"
        ));
    }

    Ok(match first.as_str() {
        "-h" | "--help" => Command::Help,
        "-v" | "--version" => Command::Version,
        "__VERSION__" => Command::MachineVersion,
        _ => Command::Evaluate(first),
    })
}

pub fn usage() -> String {
    format!(
        "{PROGRAM} [expression]\n\
         {PROGRAM} {{-v|-h|__VERSION__}}\n  \
         -v, --version    print program version and exit\n      \
         __VERSION__  output version in specific format\n  \
         -h, --help       print this help page and exit"
    )
}

/// Runs the front end and returns the process exit status.
pub fn run<I, R, W, E>(args: I, input: R, mut out: W, mut err: E) -> i32
where
    I: IntoIterator<Item = String>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let calculator = Calculator::new();
    let result = match parse_args(args) {
        Ok(command) => execute(&calculator, command, input, &mut out, &mut err),
        Err(message) => writeln!(err, "{message}\n{}", usage()).map(|_| EXIT_USAGE),
    };

    result.unwrap_or_else(|error| {
        let _ = writeln!(err, "I/O error: {error}");
        EXIT_IO_ERROR
    })
}

fn execute<R: BufRead, W: Write, E: Write>(
    calculator: &Calculator,
    command: Command,
    input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<i32> {
    debug!("Running command {:?}", command);
    match command {
        Command::Help => {
            writeln!(out, "{}", usage())?;
            Ok(EXIT_SUCCESS)
        }
        Command::Version => {
            writeln!(out, "VERSION: {}", version())?;
            Ok(EXIT_SUCCESS)
        }
        Command::MachineVersion => {
            writeln!(out, "{}", version())?;
            Ok(EXIT_SUCCESS)
        }
        Command::Evaluate(expression) => evaluate_line(calculator, &expression, out, err),
        Command::Interactive => interactive(calculator, input, out, err),
    }
}

fn interactive<R: BufRead, W: Write, E: Write>(
    calculator: &Calculator,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<i32> {
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(EXIT_SUCCESS);
        }

        let expression = line.trim();
        match expression {
            "q" | "exit" => return Ok(EXIT_SUCCESS),
            "" => continue,
            _ => {
                evaluate_line(calculator, expression, out, err)?;
            }
        }
    }
}

/// Evaluates one expression, printing the value or its diagnostics.
fn evaluate_line<W: Write, E: Write>(
    calculator: &Calculator,
    expression: &str,
    out: &mut W,
    err: &mut E,
) -> io::Result<i32> {
    let tokens = calculator.lex(expression);
    let lex_errors = count_lex_errors(&tokens);
    if lex_errors > 0 {
        for message in format_lex_errors(&tokens) {
            writeln!(out, "TOKEN ERROR: {message}")?;
        }
        writeln!(out, "{lex_errors} error(s) occurred in <expression>")?;
        return Ok(EXIT_LEX_ERROR);
    }

    match calculator.evaluate_tokens(&tokens) {
        Ok(value) => {
            writeln!(out, "{value}")?;
            Ok(EXIT_SUCCESS)
        }
        Err(diagnostics) => {
            writeln!(err, "Input had errors, no value returned")?;
            for message in diagnostics.messages() {
                writeln!(err, "Error: {message}")?;
            }
            Ok(EXIT_EVALUATION_ERROR)
        }
    }
}
