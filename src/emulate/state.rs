use std::io::{self, Write};

use crate::constants::*;
use crate::types::RegisterFile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Print everything as one `[r0, ..., r31, pc]` line instead of a table
    pub as_array: bool,
    pub as_hex: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorState {
    pub registers: RegisterFile,
    pub pc: u32,
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorState {
    pub fn new() -> Self {
        EmulatorState {
            registers: [0; NUM_REGS],
            pc: INITIAL_PC,
        }
    }

    pub fn reg(&self, index: usize) -> i32 {
        self.registers[index]
    }

    pub fn is_pc_aligned(&self) -> bool {
        self.pc % BYTES_IN_WORD == 0
    }

    pub fn write_state<W: Write>(&self, out: &mut W, options: DisplayOptions) -> io::Result<()> {
        if options.as_array {
            self.write_array(out, options.as_hex)
        } else {
            self.write_table(out, options.as_hex)
        }
    }

    fn write_array<W: Write>(&self, out: &mut W, as_hex: bool) -> io::Result<()> {
        let values: Vec<String> = self
            .registers
            .iter()
            .map(|&contents| format_value(contents as u32, contents, as_hex))
            .chain(std::iter::once(format_value(self.pc, self.pc, as_hex)))
            .collect();
        writeln!(out, "[{}]", values.join(", "))
    }

    fn write_table<W: Write>(&self, out: &mut W, as_hex: bool) -> io::Result<()> {
        writeln!(out, "Registers:")?;
        for (index, &contents) in self.registers.iter().enumerate() {
            writeln!(
                out,
                "${: <2} (${: <4}): {: >11}",
                index,
                REG_NAMES[index],
                format_value(contents as u32, contents, as_hex)
            )?;
        }
        writeln!(
            out,
            "PC         : {: >11}",
            format_value(self.pc, self.pc, as_hex)
        )
    }
}

// Hex output shows the raw bit pattern, so negative registers appear in two's complement
fn format_value<T: std::fmt::Display>(bits: u32, value: T, as_hex: bool) -> String {
    if as_hex {
        format!("0x{:0>8x}", bits)
    } else {
        value.to_string()
    }
}
