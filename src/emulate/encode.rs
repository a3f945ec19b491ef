use crate::{constants::*, types::*};

impl ExecutableUnit {
    /// Assembles this unit back into its instruction word.
    pub fn encode(&self) -> u32 {
        match *self {
            ExecutableUnit::Register { opcode, fields } => encode_register(opcode, fields),
            ExecutableUnit::Immediate { opcode, fields } => encode_immediate(opcode, fields),
        }
    }
}

fn encode_register(opcode: RegisterOpcode, fields: RegisterFields) -> u32 {
    let RegisterFields { rs, rt, rd, shamt } = fields;

    OPCODE.place(REGISTER_FORMAT_OPCODE)
        | RS.place(u32::from(rs))
        | RT.place(u32::from(rt))
        | RD.place(u32::from(rd))
        | SHAMT.place(u32::from(shamt))
        | FUNCT.place(opcode as u32)
}

fn encode_immediate(opcode: ImmediateOpcode, fields: ImmediateFields) -> u32 {
    let ImmediateFields { rs, rt, immediate } = fields;

    OPCODE.place(opcode as u32)
        | RS.place(u32::from(rs))
        | RT.place(u32::from(rt))
        | IMMEDIATE.place(u32::from(immediate))
}
