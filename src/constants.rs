pub const NUM_REGS: usize = 32;
pub const BYTES_IN_WORD: u32 = 4;
pub const INITIAL_PC: u32 = 0;
pub const MAX_INSTRUCTIONS: usize = 1000;

// Register names, indexed by register number
pub const REG_NAMES: [&str; NUM_REGS] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

// Instruction Fields

/// An inclusive range of bits within an instruction word, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionField {
    pub high: u32,
    pub low: u32,
}

impl InstructionField {
    pub const fn new(high: u32, low: u32) -> Self {
        // Evaluated at compile time for the constants below
        assert!(high < 32 && low <= high, "malformed instruction field");
        InstructionField { high, low }
    }

    pub const fn size(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Reads this field out of `word`, right-aligned.
    pub const fn extract(&self, word: u32) -> u32 {
        (word >> self.low) & mask(self.size())
    }

    /// Places `value` into this field's position, truncating it to the field width.
    pub const fn place(&self, value: u32) -> u32 {
        (value & mask(self.size())) << self.low
    }
}

// Common instruction fields
pub const OPCODE: InstructionField = InstructionField::new(31, 26);
pub const RS: InstructionField = InstructionField::new(25, 21);
pub const RT: InstructionField = InstructionField::new(20, 16);

// Register-format fields
pub const RD: InstructionField = InstructionField::new(15, 11);
pub const SHAMT: InstructionField = InstructionField::new(10, 6);
pub const FUNCT: InstructionField = InstructionField::new(5, 0);

// Immediate-format fields
pub const IMMEDIATE: InstructionField = InstructionField::new(15, 0);

// Every register-format instruction shares this opcode
pub const REGISTER_FORMAT_OPCODE: u32 = 0b000000;

// Bitmasking
pub const fn mask(size: u32) -> u32 {
    if size >= 32 {
        u32::MAX
    } else {
        (1 << size) - 1
    }
}
