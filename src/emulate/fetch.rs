use std::convert::TryFrom;

use crate::constants::BYTES_IN_WORD;

/// Returns the word the PC points at, or `None` once the PC has run past the end of the program.
pub fn fetch(program: &[u32], pc: u32) -> Option<u32> {
    let index = usize::try_from(pc / BYTES_IN_WORD).ok()?;
    program.get(index).copied()
}
