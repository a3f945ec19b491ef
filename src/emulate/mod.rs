mod decode;
mod encode;
mod execute;
mod fetch;
mod state;
mod utils;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use nom::combinator::all_consuming;
use tracing::{debug, info};

use crate::{constants::*, parse::hex_word, types::*};

pub use decode::{build_executable, classify, decode_fields, resolve_name};
pub use execute::execute;
pub use fetch::fetch;
pub use state::{DisplayOptions, EmulatorState};
pub use utils::extract_bits;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    /// Pause after every instruction and print the machine state
    pub step_mode: bool,
    pub display: DisplayOptions,
}

// Parses a program written as one hexadecimal instruction word per line. Blank lines are
// skipped.
pub fn load_program(source: &str) -> Result<Vec<u32>> {
    let mut program = Vec::new();

    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (_, word) = all_consuming(hex_word)(line).map_err(|e| {
            let reason = match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => {
                    e.context().unwrap_or("invalid hexadecimal value").to_string()
                }
                nom::Err::Incomplete(_) => "incomplete input".to_string(),
            };
            EmulatorError::MalformedHexLine {
                line: index + 1,
                text: line.to_string(),
                reason,
            }
        })?;

        if program.len() == MAX_INSTRUCTIONS {
            return Err(EmulatorError::TooManyInstructions {
                limit: MAX_INSTRUCTIONS,
            });
        }
        program.push(word);
    }

    Ok(program)
}

// Runs until the PC walks off the end of the program. There are no branches, so every
// instruction runs exactly once, in order.
pub fn execute_all<R: BufRead, W: Write>(
    program: &[u32],
    state: &mut EmulatorState,
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        if !state.is_pc_aligned() {
            return Err(EmulatorError::MisalignedPc { pc: state.pc });
        }

        let word = match fetch(program, state.pc) {
            Some(word) => word,
            None => break,
        };

        let unit = build_executable(word)?;
        debug!(pc = state.pc, "executing 0x{:08x}: {}", word, unit);

        if config.step_mode {
            writeln!(output, "0x{:08x}: {}", state.pc, unit)?;
        }

        execute(unit, &mut state.registers, &mut state.pc);

        if config.step_mode {
            state.write_state(output, config.display)?;
            wait_for_step(input, output)?;
        }
    }

    Ok(())
}

// Blocks until a line is entered. Once input is exhausted the remaining steps run straight
// through.
fn wait_for_step<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "Press Enter to step...")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    writeln!(output)
}

pub fn run(config: &Config) -> Result<()> {
    let source = fs::read_to_string(&config.path)?;
    let program = load_program(&source)?;
    info!(
        path = %config.path.display(),
        instructions = program.len(),
        "loaded program"
    );

    let mut state = EmulatorState::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    execute_all(&program, &mut state, config, &mut stdin.lock(), &mut output)?;
    info!(pc = state.pc, "program finished");

    state.write_state(&mut output, config.display)?;
    Ok(())
}
