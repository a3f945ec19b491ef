use crate::{
    constants::{BYTES_IN_WORD, NUM_REGS},
    types::*,
};

/// Applies `unit` to the register file, then moves the PC on to the next instruction.
///
/// Operands are read before the destination is written, so an instruction may use its
/// destination register as a source. There is no control flow, so the PC always advances by one
/// word.
pub fn execute(unit: ExecutableUnit, registers: &mut RegisterFile, pc: &mut u32) {
    match unit {
        ExecutableUnit::Register { opcode, fields } => execute_register(registers, opcode, fields),
        ExecutableUnit::Immediate { opcode, fields } => {
            execute_immediate(registers, opcode, fields)
        }
    }

    *pc = pc.wrapping_add(BYTES_IN_WORD);
}

fn execute_register(registers: &mut RegisterFile, opcode: RegisterOpcode, instr: RegisterFields) {
    let RegisterFields { rs, rt, rd, shamt } = instr;

    // Get operands
    let rs = registers[index(rs)];
    let rt = registers[index(rt)];
    let shamt = u32::from(shamt);

    // Perform operation, the shifts only use the low 5 bits of shamt
    let result = match opcode {
        RegisterOpcode::Sll => (rt as u32).wrapping_shl(shamt) as i32,
        RegisterOpcode::Sra => rt.wrapping_shr(shamt),
        RegisterOpcode::Add => rt.wrapping_add(rs),
        RegisterOpcode::Sub => rs.wrapping_sub(rt),
        RegisterOpcode::And => rt & rs,
        RegisterOpcode::Or => rt | rs,
        RegisterOpcode::Nor => !(rt | rs),
    };

    // Save result
    registers[index(rd)] = result;
}

fn execute_immediate(
    registers: &mut RegisterFile,
    opcode: ImmediateOpcode,
    instr: ImmediateFields,
) {
    let rs = registers[index(instr.rs)];

    // Only the arithmetic immediate is sign extended
    let result = match opcode {
        ImmediateOpcode::Addi => rs.wrapping_add(instr.sign_extended()),
        ImmediateOpcode::Andi => rs & instr.zero_extended(),
        ImmediateOpcode::Ori => rs | instr.zero_extended(),
    };

    registers[index(instr.rt)] = result;
}

// Register fields are 5 bits wide, anything above that is ignored
fn index(register: u8) -> usize {
    usize::from(register) % NUM_REGS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_unit(opcode: RegisterOpcode, rs: u8, rt: u8, rd: u8, shamt: u8) -> ExecutableUnit {
        ExecutableUnit::Register {
            opcode,
            fields: RegisterFields { rs, rt, rd, shamt },
        }
    }

    fn immediate_unit(opcode: ImmediateOpcode, rs: u8, rt: u8, immediate: u16) -> ExecutableUnit {
        ExecutableUnit::Immediate {
            opcode,
            fields: ImmediateFields { rs, rt, immediate },
        }
    }

    #[test]
    fn test_sll() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[2] = 4;

        execute(register_unit(RegisterOpcode::Sll, 0, 2, 3, 2), &mut registers, &mut pc);

        assert_eq!(registers[3], 16);
        assert_eq!(pc, 4);
    }

    #[test]
    fn test_sll_is_logical() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[2] = 0x4000_0001;

        execute(register_unit(RegisterOpcode::Sll, 0, 2, 3, 1), &mut registers, &mut pc);
        assert_eq!(registers[3] as u32, 0x8000_0002);

        execute(register_unit(RegisterOpcode::Sll, 0, 3, 4, 31), &mut registers, &mut pc);
        assert_eq!(registers[4], 0);
    }

    #[test]
    fn test_sra_preserves_sign() {
        let mut pc = 4;
        let mut registers = [0; NUM_REGS];
        registers[3] = -64;

        execute(register_unit(RegisterOpcode::Sra, 0, 3, 4, 2), &mut registers, &mut pc);

        assert_eq!(registers[4], -16);
        assert_eq!(pc, 8);
    }

    #[test]
    fn test_sra_positive() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[8] = 60;

        execute(register_unit(RegisterOpcode::Sra, 0, 8, 8, 2), &mut registers, &mut pc);

        assert_eq!(registers[8], 15);
    }

    #[test]
    fn test_add() {
        let mut pc = 8;
        let mut registers = [0; NUM_REGS];
        registers[4] = 3;
        registers[5] = 5;

        execute(register_unit(RegisterOpcode::Add, 4, 5, 6, 0), &mut registers, &mut pc);

        assert_eq!(registers[6], 8);
        assert_eq!(pc, 12);
    }

    #[test]
    fn test_add_wraps_on_overflow() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[1] = i32::MAX;
        registers[2] = 1;

        execute(register_unit(RegisterOpcode::Add, 1, 2, 3, 0), &mut registers, &mut pc);

        assert_eq!(registers[3], i32::MIN);
        assert_eq!(pc, 4);
    }

    #[test]
    fn test_sub_operand_order() {
        let mut pc = 12;
        let mut registers = [0; NUM_REGS];
        registers[7] = 12;
        registers[8] = 5;

        execute(register_unit(RegisterOpcode::Sub, 7, 8, 9, 0), &mut registers, &mut pc);

        assert_eq!(registers[9], 7);
        assert_eq!(pc, 16);
    }

    #[test]
    fn test_sub_wraps_on_overflow() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[1] = i32::MIN;
        registers[2] = 1;

        execute(register_unit(RegisterOpcode::Sub, 1, 2, 3, 0), &mut registers, &mut pc);

        assert_eq!(registers[3], i32::MAX);
    }

    #[test]
    fn test_and() {
        let mut pc = 16;
        let mut registers = [0; NUM_REGS];
        registers[12] = 0xf0f0;
        registers[11] = 0xff00;

        execute(register_unit(RegisterOpcode::And, 12, 11, 10, 0), &mut registers, &mut pc);

        assert_eq!(registers[10], 0xf000);
        assert_eq!(pc, 20);
    }

    #[test]
    fn test_or() {
        let mut pc = 20;
        let mut registers = [0; NUM_REGS];
        registers[17] = 0xf0f0;
        registers[9] = 0xff00;

        execute(register_unit(RegisterOpcode::Or, 17, 9, 31, 0), &mut registers, &mut pc);

        assert_eq!(registers[31], 0xfff0);
        assert_eq!(pc, 24);
    }

    #[test]
    fn test_nor() {
        let mut pc = 24;
        let mut registers = [0; NUM_REGS];
        registers[9] = 0xf0f0;
        registers[6] = 0xff00;

        execute(register_unit(RegisterOpcode::Nor, 9, 6, 3, 0), &mut registers, &mut pc);

        // The upper half of both operands is zero, so it comes out as all ones
        assert_eq!(registers[3] as u32, 0xffff_000f);
        assert_eq!(pc, 28);
    }

    #[test]
    fn test_addi() {
        let mut pc = 28;
        let mut registers = [0; NUM_REGS];
        registers[5] = 3;

        execute(immediate_unit(ImmediateOpcode::Addi, 5, 15, 17), &mut registers, &mut pc);

        assert_eq!(registers[15], 20);
        assert_eq!(pc, 32);
    }

    #[test]
    fn test_addi_sign_extends() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[5] = 3;

        execute(immediate_unit(ImmediateOpcode::Addi, 5, 6, 0xffff), &mut registers, &mut pc);
        assert_eq!(registers[6], 2);

        execute(immediate_unit(ImmediateOpcode::Addi, 0, 7, 0x8000), &mut registers, &mut pc);
        assert_eq!(registers[7], -32768);
    }

    #[test]
    fn test_andi() {
        let mut pc = 32;
        let mut registers = [0; NUM_REGS];
        registers[12] = 0xf0f0;

        execute(immediate_unit(ImmediateOpcode::Andi, 12, 16, 0xff00), &mut registers, &mut pc);

        assert_eq!(registers[16], 0xf000);
        assert_eq!(pc, 36);
    }

    #[test]
    fn test_andi_does_not_sign_extend() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[1] = -1;

        execute(immediate_unit(ImmediateOpcode::Andi, 1, 2, 0xff00), &mut registers, &mut pc);

        assert_eq!(registers[2], 0xff00);
    }

    #[test]
    fn test_ori() {
        let mut pc = 36;
        let mut registers = [0; NUM_REGS];
        registers[30] = 0xf0f0;

        execute(immediate_unit(ImmediateOpcode::Ori, 30, 29, 0x7f00), &mut registers, &mut pc);

        assert_eq!(registers[29], 0xfff0);
        assert_eq!(pc, 40);
    }

    #[test]
    fn test_ori_does_not_sign_extend() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[30] = 0xf0f0;

        execute(immediate_unit(ImmediateOpcode::Ori, 30, 29, 0xff00), &mut registers, &mut pc);

        assert_eq!(registers[29], 0xfff0);
        assert!(registers[29] > 0);
    }

    #[test]
    fn test_operands_read_before_write() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[4] = 10;
        registers[5] = 3;

        // sub $4, $4, $5
        execute(register_unit(RegisterOpcode::Sub, 4, 5, 4, 0), &mut registers, &mut pc);
        assert_eq!(registers[4], 7);

        // addi $4, $4, 1
        execute(immediate_unit(ImmediateOpcode::Addi, 4, 4, 1), &mut registers, &mut pc);
        assert_eq!(registers[4], 8);
        assert_eq!(pc, 8);
    }

    #[test]
    fn test_register_zero_is_writable() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];

        execute(immediate_unit(ImmediateOpcode::Addi, 0, 0, 5), &mut registers, &mut pc);

        assert_eq!(registers[0], 5);
    }

    #[test]
    fn test_add_zero_registers() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];

        execute(register_unit(RegisterOpcode::Add, 0, 0, 0, 0), &mut registers, &mut pc);

        assert_eq!(registers, [0; NUM_REGS]);
        assert_eq!(pc, 4);
    }

    #[test]
    fn test_shift_amount_uses_low_five_bits() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[9] = -8;

        // 33 & 0x1f == 1
        execute(register_unit(RegisterOpcode::Sll, 0, 9, 8, 33), &mut registers, &mut pc);
        assert_eq!(registers[8], -16);

        execute(register_unit(RegisterOpcode::Sra, 0, 9, 10, 32), &mut registers, &mut pc);
        assert_eq!(registers[10], -8);
        assert_eq!(pc, 8);
    }

    #[test]
    fn test_register_index_uses_low_five_bits() {
        let mut pc = 0;
        let mut registers = [0; NUM_REGS];
        registers[8] = 3;

        // 40 & 0x1f == 8 and 41 & 0x1f == 9
        execute(immediate_unit(ImmediateOpcode::Addi, 40, 41, 4), &mut registers, &mut pc);
        assert_eq!(registers[9], 7);

        // 42 & 0x1f == 10
        execute(register_unit(RegisterOpcode::Add, 40, 41, 42, 0), &mut registers, &mut pc);
        assert_eq!(registers[10], 10);
        assert_eq!(pc, 8);
    }
}
