use std::result;

use num_traits::FromPrimitive;

use crate::{constants::*, types::*};

// Decoding runs in three independent steps over the same word:
// 1. classify the format from the opcode
// 2. pull the operand fields for that format
// 3. resolve the operation from the opcode (immediate) or function code (register)
//
// None of them keep any state between words.

pub fn classify(word: u32) -> InstructionFormat {
    if OPCODE.extract(word) == REGISTER_FORMAT_OPCODE {
        InstructionFormat::Register
    } else {
        InstructionFormat::Immediate
    }
}

pub fn decode_fields(word: u32) -> DecodedFields {
    // Every field is at most 16 bits wide, so these casts never truncate
    match classify(word) {
        InstructionFormat::Register => DecodedFields::Register(RegisterFields {
            rs: RS.extract(word) as u8,
            rt: RT.extract(word) as u8,
            rd: RD.extract(word) as u8,
            shamt: SHAMT.extract(word) as u8,
        }),
        InstructionFormat::Immediate => DecodedFields::Immediate(ImmediateFields {
            rs: RS.extract(word) as u8,
            rt: RT.extract(word) as u8,
            immediate: IMMEDIATE.extract(word) as u16,
        }),
    }
}

pub fn resolve_name(word: u32) -> result::Result<Operation, DecodeError> {
    let operation = match classify(word) {
        InstructionFormat::Register => {
            RegisterOpcode::from_u32(FUNCT.extract(word)).map(Operation::Register)
        }
        InstructionFormat::Immediate => {
            ImmediateOpcode::from_u32(OPCODE.extract(word)).map(Operation::Immediate)
        }
    };

    operation.ok_or(DecodeError::UnrecognizedEncoding { word })
}

pub fn build_executable(word: u32) -> result::Result<ExecutableUnit, DecodeError> {
    let operation = resolve_name(word)?;
    ExecutableUnit::new(operation, decode_fields(word))
}
