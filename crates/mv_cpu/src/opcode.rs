//! Instruction table: opcode bytes, operand schemas, encoded lengths.

/// Operation selected by the first byte of an instruction.
///
/// Operand bytes follow the opcode at `pc+1` and `pc+2`; whether a byte is a
/// register selector or an immediate literal is fixed per opcode. Immediate
/// literals are unsigned bytes zero-extended into 64-bit arithmetic, never
/// sign-extended; jump targets are zero-extended absolute addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    AddImm = 0x00, // reg += literal
    AddReg = 0x01, // reg1 += reg2
    Inc = 0x10,    // reg += 1
    Dec = 0x20,    // reg -= 1
    SubImm = 0x30, // reg -= literal
    SubReg = 0x31, // reg1 -= reg2
    MovImm = 0x40, // reg := literal
    MovReg = 0x41, // reg1 := reg2
    Jmp = 0x50,    // pc := literal
    CmpImm = 0x60, // zf := reg == literal
    CmpReg = 0x61, // zf := reg1 == reg2
    Jz = 0x70,     // zf ? pc := literal : pc += 2
}

impl Opcode {
    /// Encoded instruction length in bytes, opcode byte included.
    pub fn encoded_len(self) -> u64 {
        match self {
            Opcode::Inc | Opcode::Dec | Opcode::Jmp | Opcode::Jz => 2,
            _ => 3,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::AddImm | Opcode::AddReg => "ADD",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::SubImm | Opcode::SubReg => "SUB",
            Opcode::MovImm | Opcode::MovReg => "MOV",
            Opcode::Jmp => "JMP",
            Opcode::CmpImm | Opcode::CmpReg => "CMP",
            Opcode::Jz => "JZ",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match v {
            0x00 => AddImm,
            0x01 => AddReg,
            0x10 => Inc,
            0x20 => Dec,
            0x30 => SubImm,
            0x31 => SubReg,
            0x40 => MovImm,
            0x41 => MovReg,
            0x50 => Jmp,
            0x60 => CmpImm,
            0x61 => CmpReg,
            0x70 => Jz,
            _ => return Err(()),
        })
    }
}
