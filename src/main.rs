//! Command-line front end: `enigma <config> [input] [output]`.
//!
//! Reads the machine configuration, then processes setting and message
//! lines from `input` (standard input by default), writing converted
//! messages to `output` (standard output by default).

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, LevelFilter};

use enigma::{MachineConfig, MessageProcessor};

#[derive(Parser)]
#[command(name = "enigma", version, about = "Rotor cipher machine simulator")]
struct Cli {
    /// Machine configuration file.
    config: PathBuf,
    /// File of setting and message lines; standard input if omitted.
    input: Option<PathBuf>,
    /// File for converted messages; standard output if omitted.
    output: Option<PathBuf>,
    /// Log stepping and setting details.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match process(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn process(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.config)
        .with_context(|| format!("could not open {}", cli.config.display()))?;
    let mut machine = MachineConfig::parse(&text)?.build()?;
    debug!("loaded configuration from {}", cli.config.display());

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut processor = MessageProcessor::new(&mut machine);
    for line in input.lines() {
        let line = line.context("could not read input")?;
        if let Some(converted) = processor.line(&line)? {
            writeln!(output, "{}", converted)?;
        }
    }
    processor.finish()?;
    output.flush()?;
    Ok(())
}
