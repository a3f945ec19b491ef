use std::{fmt, io, result};

use enum_primitive_derive::Primitive;
use thiserror::Error;

use crate::constants::NUM_REGS;

pub type Result<T> = result::Result<T, EmulatorError>;

pub type RegisterFile = [i32; NUM_REGS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionFormat {
    Register,
    Immediate,
}

/// Operand fields of a register-format word. Each is 5 bits wide; `execute` only looks at the
/// low 5 bits of a hand-built value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFields {
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateFields {
    /// 5-bit register indices, as in `RegisterFields`
    pub rs: u8,
    pub rt: u8,
    /// Raw 16-bit pattern, as it appears in the instruction word
    pub immediate: u16,
}

impl ImmediateFields {
    /// The immediate as a two's-complement value, for arithmetic.
    pub fn sign_extended(&self) -> i32 {
        i32::from(self.immediate as i16)
    }

    /// The immediate with zeroes in the upper half, for bitwise masking.
    pub fn zero_extended(&self) -> i32 {
        i32::from(self.immediate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedFields {
    Register(RegisterFields),
    Immediate(ImmediateFields),
}

impl DecodedFields {
    pub fn format(&self) -> InstructionFormat {
        match self {
            DecodedFields::Register(_) => InstructionFormat::Register,
            DecodedFields::Immediate(_) => InstructionFormat::Immediate,
        }
    }
}

// Discriminants are the function code (bits 5-0) of the instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Primitive)]
pub enum RegisterOpcode {
    Sll = 0b000000,
    Sra = 0b000011,
    Add = 0b100000,
    Sub = 0b100010,
    And = 0b100100,
    Or = 0b100101,
    Nor = 0b100111,
}

// Discriminants are the opcode (bits 31-26) of the instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Primitive)]
pub enum ImmediateOpcode {
    Addi = 0b001000,
    Andi = 0b001100,
    Ori = 0b001101,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register(RegisterOpcode),
    Immediate(ImmediateOpcode),
}

impl Operation {
    pub fn format(&self) -> InstructionFormat {
        match self {
            Operation::Register(_) => InstructionFormat::Register,
            Operation::Immediate(_) => InstructionFormat::Immediate,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Register(RegisterOpcode::Sll) => "sll",
            Operation::Register(RegisterOpcode::Sra) => "sra",
            Operation::Register(RegisterOpcode::Add) => "add",
            Operation::Register(RegisterOpcode::Sub) => "sub",
            Operation::Register(RegisterOpcode::And) => "and",
            Operation::Register(RegisterOpcode::Or) => "or",
            Operation::Register(RegisterOpcode::Nor) => "nor",
            Operation::Immediate(ImmediateOpcode::Addi) => "addi",
            Operation::Immediate(ImmediateOpcode::Andi) => "andi",
            Operation::Immediate(ImmediateOpcode::Ori) => "ori",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded instruction, ready to be executed once.
///
/// The operation and its fields always share a format, so the execution engine never has to
/// deal with e.g. an `addi` carrying register-format fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableUnit {
    Register {
        opcode: RegisterOpcode,
        fields: RegisterFields,
    },
    Immediate {
        opcode: ImmediateOpcode,
        fields: ImmediateFields,
    },
}

impl ExecutableUnit {
    pub fn new(operation: Operation, fields: DecodedFields) -> result::Result<Self, DecodeError> {
        match (operation, fields) {
            (Operation::Register(opcode), DecodedFields::Register(fields)) => {
                Ok(ExecutableUnit::Register { opcode, fields })
            }
            (Operation::Immediate(opcode), DecodedFields::Immediate(fields)) => {
                Ok(ExecutableUnit::Immediate { opcode, fields })
            }
            _ => Err(DecodeError::FormatMismatch {
                operation,
                format: fields.format(),
            }),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ExecutableUnit::Register { opcode, .. } => Operation::Register(*opcode),
            ExecutableUnit::Immediate { opcode, .. } => Operation::Immediate(*opcode),
        }
    }

    pub fn fields(&self) -> DecodedFields {
        match self {
            ExecutableUnit::Register { fields, .. } => DecodedFields::Register(*fields),
            ExecutableUnit::Immediate { fields, .. } => DecodedFields::Immediate(*fields),
        }
    }
}

// Disassembly, eg: "add $3, $1, $2", "sll $8, $9, 5", "ori $17, $9, 0x000c"
impl fmt::Display for ExecutableUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.operation();
        match self {
            ExecutableUnit::Register {
                opcode: RegisterOpcode::Sll,
                fields,
            }
            | ExecutableUnit::Register {
                opcode: RegisterOpcode::Sra,
                fields,
            } => write!(
                f,
                "{} ${}, ${}, {}",
                mnemonic, fields.rd, fields.rt, fields.shamt
            ),
            ExecutableUnit::Register { fields, .. } => write!(
                f,
                "{} ${}, ${}, ${}",
                mnemonic, fields.rd, fields.rs, fields.rt
            ),
            ExecutableUnit::Immediate {
                opcode: ImmediateOpcode::Addi,
                fields,
            } => write!(
                f,
                "{} ${}, ${}, {}",
                mnemonic,
                fields.rt,
                fields.rs,
                fields.sign_extended()
            ),
            ExecutableUnit::Immediate { fields, .. } => write!(
                f,
                "{} ${}, ${}, 0x{:04x}",
                mnemonic, fields.rt, fields.rs, fields.immediate
            ),
        }
    }
}

/// Errors raised while turning a word into an executable unit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized instruction encoding 0x{word:08x}")]
    UnrecognizedEncoding { word: u32 },

    #[error("malformed bit range {high}..={low}")]
    MalformedFieldRange { high: u32, low: u32 },

    #[error("operation {operation} cannot take {format:?}-format fields")]
    FormatMismatch {
        operation: Operation,
        format: InstructionFormat,
    },
}

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("line {line}: '{text}' is not a hexadecimal instruction ({reason})")]
    MalformedHexLine {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("program has more than {limit} instructions")]
    TooManyInstructions { limit: usize },

    #[error("program counter 0x{pc:08x} is not word aligned")]
    MisalignedPc { pc: u32 },
}
