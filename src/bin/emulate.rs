use std::{io, path::PathBuf, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mips_lite::emulate::{self, Config, DisplayOptions};

/// Run a MIPS program written as one hexadecimal instruction per line
#[derive(Parser, Debug)]
#[command(name = "emulate")]
struct Args {
    /// Hex file with one instruction word per line
    path: PathBuf,

    /// Print the final state as a single array line
    #[arg(short = 'a', long = "array")]
    array: bool,

    /// Execute one instruction at a time, waiting for Enter between steps
    #[arg(short = 's', long = "step")]
    step: bool,

    /// Print register values in hexadecimal
    #[arg(short = 'x', long = "hex")]
    hex: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            path: args.path,
            step_mode: args.step,
            display: DisplayOptions {
                as_array: args.array,
                as_hex: args.hex,
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = emulate::run(&args.into()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
