//! Decoder and interpreter for a small MIPS subset.
//!
//! Instructions are 32-bit words in one of two formats:
//!
//! ```text
//! [opcode:6 | rs:5 | rt:5 | rd:5 | shamt:5 | funct:6]   register format (opcode == 0)
//! [opcode:6 | rs:5 | rt:5 | immediate:16          ]   immediate format
//! ```
//!
//! Register-format instructions are told apart by `funct`, immediate-format ones by `opcode`.
//! Supported operations are sll, sra, add, sub, and, or, nor, addi, andi and ori. There are no
//! branches, loads or stores, so the PC only ever moves forward by one word.
//!
//! ```
//! use mips_lite::{build_executable, execute};
//!
//! let mut registers = [0; 32];
//! let mut pc = 0;
//! registers[5] = 3;
//!
//! // addi $15, $5, 17
//! let unit = build_executable(0x20af_0011).unwrap();
//! execute(unit, &mut registers, &mut pc);
//!
//! assert_eq!(registers[15], 20);
//! assert_eq!(pc, 4);
//! ```

pub mod constants;
pub mod emulate;
pub mod parse;
pub mod types;

pub use emulate::{build_executable, execute};
