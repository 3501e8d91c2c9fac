use std::fmt;

use super::regs::{Cond, Reg16, Reg8};

/// 8-bit ALU operation selected by bits 5..3 of the `0x80..=0xBF` block and
/// the `xx110` immediate forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

/// Rotate/shift operation in the first quarter of the CB table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// Memory operand of the `LD (rr),A` / `LD A,(rr)` family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    Bc,
    De,
    HlInc,
    HlDec,
}

impl Indirect {
    #[inline]
    const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => Indirect::Bc,
            1 => Indirect::De,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indirect::Bc => "(BC)",
            Indirect::De => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        };
        f.write_str(name)
    }
}

/// Operation tag stored in the opcode tables.
///
/// Every opcode value decodes to exactly one tag; unassigned values decode to
/// `Invalid`. Operand fields are already resolved, so execution never looks
/// at the raw opcode bits again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    // Loads.
    Ld { dst: Reg8, src: Reg8 },
    LdImm8(Reg8),
    LdImm16(Reg16),
    LdIndirectA(Indirect),
    LdAIndirect(Indirect),
    LdAbsSp,
    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdAbsA,
    LdAAbs,
    LdSpHl,
    LdHlSpImm,

    // Arithmetic.
    Inc8(Reg8),
    Dec8(Reg8),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
    AddSpImm,
    Alu { op: AluOp, src: Reg8 },
    AluImm(AluOp),
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    // Control flow.
    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    RetCond(Cond),
    Reti,
    Rst(u8),
    Push(Reg16),
    Pop(Reg16),

    // CB group.
    PrefixCb,
    Shift { op: ShiftOp, target: Reg8 },
    Bit { bit: u8, target: Reg8 },
    Res { bit: u8, target: Reg8 },
    Set { bit: u8, target: Reg8 },

    /// Opcode hole; executes as a no-op trap.
    Invalid(u8),
}

/// One slot of an opcode table.
///
/// `cycles` is the base cost in T-cycles. For conditional control flow it is
/// the cost of the untaken path; the taken path adds its delta at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub cycles: u32,
    pub op: Op,
}

impl OpcodeEntry {
    const fn new(cycles: u32, op: Op) -> Self {
        Self { cycles, op }
    }
}

/// Additional T-cycles charged when a conditional branch is taken.
pub(super) const JR_TAKEN_EXTRA: u32 = 4;
pub(super) const JP_TAKEN_EXTRA: u32 = 4;
pub(super) const CALL_TAKEN_EXTRA: u32 = 12;
pub(super) const RET_TAKEN_EXTRA: u32 = 12;

/// Decoded primary and CB opcode tables for one CPU instance.
#[derive(Clone, Debug)]
pub struct OpcodeTable {
    primary: [OpcodeEntry; 256],
    cb: [OpcodeEntry; 256],
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    pub fn new() -> Self {
        Self {
            primary: std::array::from_fn(|i| decode_primary(i as u8)),
            cb: std::array::from_fn(|i| decode_cb(i as u8)),
        }
    }

    #[inline]
    pub fn primary(&self, opcode: u8) -> OpcodeEntry {
        self.primary[opcode as usize]
    }

    /// CB-prefixed entries. Cycles exclude the 4 T-cycles already charged by
    /// the `0xCB` prefix entry.
    #[inline]
    pub fn cb(&self, opcode: u8) -> OpcodeEntry {
        self.cb[opcode as usize]
    }
}

fn decode_primary(opcode: u8) -> OpcodeEntry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let e = OpcodeEntry::new;
    match x {
        0 => match z {
            0 => match y {
                0 => e(4, Op::Nop),
                1 => e(20, Op::LdAbsSp),
                2 => e(4, Op::Stop),
                3 => e(12, Op::Jr),
                _ => e(8, Op::JrCond(Cond::from_code(y - 4))),
            },
            1 => {
                if q == 0 {
                    e(12, Op::LdImm16(Reg16::from_rp(p)))
                } else {
                    e(8, Op::AddHl(Reg16::from_rp(p)))
                }
            }
            2 => {
                if q == 0 {
                    e(8, Op::LdIndirectA(Indirect::from_code(p)))
                } else {
                    e(8, Op::LdAIndirect(Indirect::from_code(p)))
                }
            }
            3 => {
                if q == 0 {
                    e(8, Op::Inc16(Reg16::from_rp(p)))
                } else {
                    e(8, Op::Dec16(Reg16::from_rp(p)))
                }
            }
            4 | 5 => {
                let reg = Reg8::from_code(y);
                let cycles = if reg.is_indirect() { 12 } else { 4 };
                if z == 4 {
                    e(cycles, Op::Inc8(reg))
                } else {
                    e(cycles, Op::Dec8(reg))
                }
            }
            6 => {
                let reg = Reg8::from_code(y);
                e(if reg.is_indirect() { 12 } else { 8 }, Op::LdImm8(reg))
            }
            _ => match y {
                0 => e(4, Op::Rlca),
                1 => e(4, Op::Rrca),
                2 => e(4, Op::Rla),
                3 => e(4, Op::Rra),
                4 => e(4, Op::Daa),
                5 => e(4, Op::Cpl),
                6 => e(4, Op::Scf),
                _ => e(4, Op::Ccf),
            },
        },
        1 => {
            if opcode == 0x76 {
                return e(4, Op::Halt);
            }
            let dst = Reg8::from_code(y);
            let src = Reg8::from_code(z);
            let cycles = if dst.is_indirect() || src.is_indirect() { 8 } else { 4 };
            e(cycles, Op::Ld { dst, src })
        }
        2 => {
            let src = Reg8::from_code(z);
            let cycles = if src.is_indirect() { 8 } else { 4 };
            e(cycles, Op::Alu { op: AluOp::from_code(y), src })
        }
        _ => match opcode {
            0xC0 | 0xC8 | 0xD0 | 0xD8 => e(8, Op::RetCond(Cond::from_code(y))),
            0xE0 => e(12, Op::LdhImmA),
            0xE8 => e(16, Op::AddSpImm),
            0xF0 => e(12, Op::LdhAImm),
            0xF8 => e(12, Op::LdHlSpImm),

            0xC1 | 0xD1 | 0xE1 | 0xF1 => e(12, Op::Pop(Reg16::from_rp2(p))),
            0xC9 => e(16, Op::Ret),
            0xD9 => e(16, Op::Reti),
            0xE9 => e(4, Op::JpHl),
            0xF9 => e(8, Op::LdSpHl),

            0xC2 | 0xCA | 0xD2 | 0xDA => e(12, Op::JpCond(Cond::from_code(y))),
            0xE2 => e(8, Op::LdhCA),
            0xEA => e(16, Op::LdAbsA),
            0xF2 => e(8, Op::LdhAC),
            0xFA => e(16, Op::LdAAbs),

            0xC3 => e(16, Op::Jp),
            0xCB => e(4, Op::PrefixCb),
            0xF3 => e(4, Op::Di),
            0xFB => e(4, Op::Ei),

            0xC4 | 0xCC | 0xD4 | 0xDC => e(12, Op::CallCond(Cond::from_code(y))),

            0xC5 | 0xD5 | 0xE5 | 0xF5 => e(16, Op::Push(Reg16::from_rp2(p))),
            0xCD => e(24, Op::Call),

            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                e(8, Op::AluImm(AluOp::from_code(y)))
            }

            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => e(16, Op::Rst(opcode & 0x38)),

            // D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD.
            _ => e(4, Op::Invalid(opcode)),
        },
    }
}

fn decode_cb(opcode: u8) -> OpcodeEntry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let target = Reg8::from_code(opcode);
    let indirect = target.is_indirect();

    // Totals are 8 T-cycles for registers and 16 for (HL) read-modify-write,
    // 12 for BIT n,(HL); the prefix fetch already paid 4.
    let rmw = if indirect { 12 } else { 4 };
    let op = match x {
        0 => Op::Shift { op: ShiftOp::from_code(y), target },
        1 => Op::Bit { bit: y, target },
        2 => Op::Res { bit: y, target },
        _ => Op::Set { bit: y, target },
    };
    let cycles = match op {
        Op::Bit { .. } if indirect => 8,
        _ => rmw,
    };
    OpcodeEntry::new(cycles, op)
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Nop => f.write_str("NOP"),
            Op::Stop => f.write_str("STOP"),
            Op::Halt => f.write_str("HALT"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::Ld { dst, src } => write!(f, "LD {dst},{src}"),
            Op::LdImm8(reg) => write!(f, "LD {reg},d8"),
            Op::LdImm16(reg) => write!(f, "LD {reg},d16"),
            Op::LdIndirectA(ind) => write!(f, "LD {ind},A"),
            Op::LdAIndirect(ind) => write!(f, "LD A,{ind}"),
            Op::LdAbsSp => f.write_str("LD (a16),SP"),
            Op::LdhImmA => f.write_str("LDH (a8),A"),
            Op::LdhAImm => f.write_str("LDH A,(a8)"),
            Op::LdhCA => f.write_str("LD (C),A"),
            Op::LdhAC => f.write_str("LD A,(C)"),
            Op::LdAbsA => f.write_str("LD (a16),A"),
            Op::LdAAbs => f.write_str("LD A,(a16)"),
            Op::LdSpHl => f.write_str("LD SP,HL"),
            Op::LdHlSpImm => f.write_str("LD HL,SP+r8"),
            Op::Inc8(reg) => write!(f, "INC {reg}"),
            Op::Dec8(reg) => write!(f, "DEC {reg}"),
            Op::Inc16(reg) => write!(f, "INC {reg}"),
            Op::Dec16(reg) => write!(f, "DEC {reg}"),
            Op::AddHl(reg) => write!(f, "ADD HL,{reg}"),
            Op::AddSpImm => f.write_str("ADD SP,r8"),
            Op::Alu { op, src } => write!(f, "{}{src}", op.mnemonic()),
            Op::AluImm(op) => write!(f, "{}d8", op.mnemonic()),
            Op::Rlca => f.write_str("RLCA"),
            Op::Rrca => f.write_str("RRCA"),
            Op::Rla => f.write_str("RLA"),
            Op::Rra => f.write_str("RRA"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),
            Op::Jr => f.write_str("JR r8"),
            Op::JrCond(cc) => write!(f, "JR {cc},r8"),
            Op::Jp => f.write_str("JP a16"),
            Op::JpCond(cc) => write!(f, "JP {cc},a16"),
            Op::JpHl => f.write_str("JP (HL)"),
            Op::Call => f.write_str("CALL a16"),
            Op::CallCond(cc) => write!(f, "CALL {cc},a16"),
            Op::Ret => f.write_str("RET"),
            Op::RetCond(cc) => write!(f, "RET {cc}"),
            Op::Reti => f.write_str("RETI"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Op::Push(reg) => write!(f, "PUSH {reg}"),
            Op::Pop(reg) => write!(f, "POP {reg}"),
            Op::PrefixCb => f.write_str("PREFIX CB"),
            Op::Shift { op, target } => {
                let name = match op {
                    ShiftOp::Rlc => "RLC",
                    ShiftOp::Rrc => "RRC",
                    ShiftOp::Rl => "RL",
                    ShiftOp::Rr => "RR",
                    ShiftOp::Sla => "SLA",
                    ShiftOp::Sra => "SRA",
                    ShiftOp::Swap => "SWAP",
                    ShiftOp::Srl => "SRL",
                };
                write!(f, "{name} {target}")
            }
            Op::Bit { bit, target } => write!(f, "BIT {bit},{target}"),
            Op::Res { bit, target } => write!(f, "RES {bit},{target}"),
            Op::Set { bit, target } => write!(f, "SET {bit},{target}"),
            Op::Invalid(opcode) => write!(f, "INVALID ${opcode:02X}"),
        }
    }
}
