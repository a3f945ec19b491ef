use crate::{constants::InstructionField, types::DecodeError};

/// Selects bits `high..=low` of `word`, so that bit `low` becomes the least significant bit of
/// the result. Both ends are inclusive and 0-indexed from the least significant bit.
///
/// Requests with `high < low` or `high > 31` are rejected rather than silently wrapped.
pub fn extract_bits(word: u32, high: u32, low: u32) -> Result<u32, DecodeError> {
    if high > 31 || low > high {
        return Err(DecodeError::MalformedFieldRange { high, low });
    }
    Ok(InstructionField { high, low }.extract(word))
}
