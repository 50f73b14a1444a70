//! Terminal driver for the dual calculator.
//!
//! This is a thin shell over the library: it parses arguments, loads the
//! configuration, installs tracing, and feeds whitespace-separated tokens to
//! [`handle_command`]. After every input line it prints the focused
//! calculator's process expression and result.
//!
//! # Usage
//!
//! ```text
//! keypad-calc [--config FILE] [--json] [TOKENS...]
//! ```
//!
//! Tokens come from the arguments, or from stdin line by line when none are
//! given.
//!
//! # Tokens
//!
//! - `0`-`9`, `.`, `+ − × ÷` (or `- * x /`), `=`, `C`, `±`, `%`, `⌫`/`del`
//! - runs of symbols such as `12+3=`
//! - `tab`: switch focus between the left and right calculator
//! - `>>` / `<<`: copy the left result to the right, or the right to the left

#![allow(clippy::multiple_crate_versions)]

use keypad_calc::{handle_command, initialize, CalcError, Command, Config, DualCalculator, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: keypad-calc [--config FILE] [--json] [TOKENS...]";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    tokens: Vec<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CalcError::Config(format!("--config needs a file\n{USAGE}")))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--json" => parsed.json = true,
            "-h" | "--help" => return Err(CalcError::Config(USAGE.to_string())),
            _ => parsed.tokens.push(arg),
        }
    }
    Ok(parsed)
}

fn apply_line<W: Write>(calc: &mut DualCalculator, line: &str, out: &mut W) -> Result<()> {
    for token in line.split_whitespace() {
        let Some(commands) = Command::parse(token) else {
            tracing::warn!(token, "unknown token ignored");
            writeln!(out, "? {token}")?;
            continue;
        };
        for command in &commands {
            if !handle_command(calc, command) {
                writeln!(out, "! {token} refused")?;
            }
        }
    }

    let side = calc.focus();
    let engine = calc.engine(side);
    writeln!(out, "[{side}] {}", engine.process())?;
    writeln!(out, "[{side}] = {}", engine.result())?;
    Ok(())
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    keypad_calc::observability::init_tracing(&config)?;

    let _span = tracing::info_span!("session", json = args.json).entered();
    let mut calc = initialize(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.tokens.is_empty() {
        for line in io::stdin().lock().lines() {
            apply_line(&mut calc, &line?, &mut out)?;
        }
    } else {
        apply_line(&mut calc, &args.tokens.join(" "), &mut out)?;
    }

    if args.json {
        serde_json::to_writer_pretty(&mut out, &calc.snapshot()).map_err(io::Error::from)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("keypad-calc: {e}");
            ExitCode::FAILURE
        }
    }
}
