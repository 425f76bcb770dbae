#![forbid(unsafe_code)]

//! Render a JSON table description to stdout.
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG`
//! (e.g. `RUST_LOG=tessera_table=debug`).

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use tessera::{BorderChars, TableSpec};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Config {
    input: Option<PathBuf>,
    preset: Option<BorderChars>,
}

fn print_usage() {
    eprintln!(
        "Usage: tessera [--preset <name>] [file]\n\
         \n\
         Reads a JSON table description from <file>, or stdin when omitted or `-`,\n\
         and prints the rendered table.\n\
         \n\
         Presets: single, rounded, double, heavy, ascii, none\n\
         \n\
         Example:\n\
           echo '{{\"rows\": [[\"a\", \"b\"]], \"border\": true}}' | tessera --preset rounded"
    );
}

fn parse_args() -> Result<Config, String> {
    let mut args = env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut preset: Option<BorderChars> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preset" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--preset requires a value".to_string())?;
                preset = Some(
                    BorderChars::preset(&value)
                        .ok_or_else(|| format!("unknown preset `{value}`"))?,
                );
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-" => input = None,
            _ if arg.starts_with('-') => return Err(format!("unknown option `{arg}`")),
            _ => {
                if input.is_some() {
                    return Err("only one input file is accepted".to_string());
                }
                input = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(Config { input, preset })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = parse_args().inspect_err(|_| {
        print_usage();
    })?;

    let json = read_input(cfg.input.as_ref()).map_err(tessera::Error::from)?;
    let mut spec = TableSpec::from_json(&json).map_err(tessera::Error::from)?;
    if let Some(chars) = cfg.preset {
        debug!("border preset overrides spec glyphs");
        spec.chars = Some(chars);
    }

    let rendered = tessera::render_spec(spec)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("tessera error: {err}");
        std::process::exit(1);
    }
}
