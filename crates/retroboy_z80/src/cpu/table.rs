use std::fmt;

use super::regs::{Cond, IndexMode, Reg16, Reg8};

/// 8-bit ALU operation selected by bits 5..3.
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
    /// Undocumented: shift left, bit 0 set.
    Sll,
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
            6 => ShiftOp::Sll,
            _ => ShiftOp::Srl,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Sll => "SLL",
            ShiftOp::Srl => "SRL",
        }
    }
}

/// Block instruction family in the `ED A0..BB` quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockOp {
    Ld,
    Cp,
    In,
    Out,
}

/// Operation tag stored in the opcode tables.
///
/// Operands naming HL, H, L or `(HL)` are redirected at execution time when
/// an index prefix is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Halt,
    Di,
    Ei,

    // Loads and exchanges.
    Ld { dst: Reg8, src: Reg8 },
    LdImm8(Reg8),
    LdImm16(Reg16),
    LdBcA,
    LdDeA,
    LdABc,
    LdADe,
    LdAbsA,
    LdAAbs,
    LdAbsHl,
    LdHlAbs,
    LdSpHl,
    ExAfAf,
    Exx,
    ExDeHl,
    ExSpHl,

    // Arithmetic.
    Inc8(Reg8),
    Dec8(Reg8),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
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
    Djnz,
    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    RetCond(Cond),
    Rst(u8),
    Push(Reg16),
    Pop(Reg16),

    // Ports.
    OutImmA,
    InAImm,

    // Prefixes.
    PrefixCb,
    PrefixEd,
    PrefixIx,
    PrefixIy,
    /// `DD CB` / `FD CB`: displacement and opcode follow.
    PrefixIndexCb,

    // CB group.
    Shift { op: ShiftOp, target: Reg8 },
    Bit { bit: u8, target: Reg8 },
    Res { bit: u8, target: Reg8 },
    Set { bit: u8, target: Reg8 },

    // Indexed CB group. `copy` is the register that also receives the
    // result (undocumented forms).
    IndexShift { op: ShiftOp, copy: Option<Reg8> },
    IndexBit(u8),
    IndexRes { bit: u8, copy: Option<Reg8> },
    IndexSet { bit: u8, copy: Option<Reg8> },

    // ED group.
    /// `IN r,(C)`; `None` is the flags-only `IN (C)`.
    InC(Option<Reg8>),
    /// `OUT (C),r`; `None` is `OUT (C),0`.
    OutC(Option<Reg8>),
    SbcHl(Reg16),
    AdcHl(Reg16),
    LdAbsRp(Reg16),
    LdRpAbs(Reg16),
    Neg,
    Retn,
    Reti,
    Im(u8),
    LdIA,
    LdRA,
    LdAI,
    LdAR,
    Rrd,
    Rld,
    Block { op: BlockOp, increment: bool, repeat: bool },

    /// Opcode hole; executes as a no-op trap.
    Invalid(u8),
}

impl Op {
    /// Mnemonic as executed under `mode`.
    pub fn mnemonic(self, mode: IndexMode) -> Mnemonic {
        Mnemonic { op: self, mode }
    }
}

/// One slot of an opcode table.
///
/// `cycles` is the base cost in T-cycles. For conditional control flow and
/// repeating block instructions it is the cost of the path that falls
/// through; the other path adds its delta at runtime.
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

/// Additional T-cycles charged on the taken/repeating path.
pub(super) const JR_TAKEN_EXTRA: u32 = 5;
pub(super) const DJNZ_TAKEN_EXTRA: u32 = 5;
pub(super) const JP_TAKEN_EXTRA: u32 = 0;
pub(super) const CALL_TAKEN_EXTRA: u32 = 7;
pub(super) const RET_TAKEN_EXTRA: u32 = 6;
pub(super) const BLOCK_REPEAT_EXTRA: u32 = 5;

/// Decoded opcode tables for one CPU instance.
///
/// Prefix entries carry the prefix fetch cost; entries in the secondary
/// tables carry the remainder.
#[derive(Clone, Debug)]
pub struct OpcodeTable {
    primary: [OpcodeEntry; 256],
    cb: [OpcodeEntry; 256],
    ed: [OpcodeEntry; 256],
    index: [OpcodeEntry; 256],
    index_cb: [OpcodeEntry; 256],
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
            ed: std::array::from_fn(|i| decode_ed(i as u8)),
            index: std::array::from_fn(|i| decode_index(i as u8)),
            index_cb: std::array::from_fn(|i| decode_index_cb(i as u8)),
        }
    }

    #[inline]
    pub fn primary(&self, opcode: u8) -> OpcodeEntry {
        self.primary[opcode as usize]
    }

    #[inline]
    pub fn cb(&self, opcode: u8) -> OpcodeEntry {
        self.cb[opcode as usize]
    }

    #[inline]
    pub fn ed(&self, opcode: u8) -> OpcodeEntry {
        self.ed[opcode as usize]
    }

    /// Entries following a DD or FD prefix.
    #[inline]
    pub fn index(&self, opcode: u8) -> OpcodeEntry {
        self.index[opcode as usize]
    }

    /// Entries for `DD CB d op` / `FD CB d op`, keyed by the final opcode.
    #[inline]
    pub fn index_cb(&self, opcode: u8) -> OpcodeEntry {
        self.index_cb[opcode as usize]
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
                1 => e(4, Op::ExAfAf),
                2 => e(8, Op::Djnz),
                3 => e(12, Op::Jr),
                _ => e(7, Op::JrCond(Cond::from_code(y - 4))),
            },
            1 => {
                if q == 0 {
                    e(10, Op::LdImm16(Reg16::from_rp(p)))
                } else {
                    e(11, Op::AddHl(Reg16::from_rp(p)))
                }
            }
            2 => match (q, p) {
                (0, 0) => e(7, Op::LdBcA),
                (0, 1) => e(7, Op::LdDeA),
                (0, 2) => e(16, Op::LdAbsHl),
                (0, _) => e(13, Op::LdAbsA),
                (_, 0) => e(7, Op::LdABc),
                (_, 1) => e(7, Op::LdADe),
                (_, 2) => e(16, Op::LdHlAbs),
                _ => e(13, Op::LdAAbs),
            },
            3 => {
                if q == 0 {
                    e(6, Op::Inc16(Reg16::from_rp(p)))
                } else {
                    e(6, Op::Dec16(Reg16::from_rp(p)))
                }
            }
            4 | 5 => {
                let reg = Reg8::from_code(y);
                let cycles = if reg.is_indirect() { 11 } else { 4 };
                if z == 4 {
                    e(cycles, Op::Inc8(reg))
                } else {
                    e(cycles, Op::Dec8(reg))
                }
            }
            6 => {
                let reg = Reg8::from_code(y);
                e(if reg.is_indirect() { 10 } else { 7 }, Op::LdImm8(reg))
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
            let cycles = if dst.is_indirect() || src.is_indirect() { 7 } else { 4 };
            e(cycles, Op::Ld { dst, src })
        }
        2 => {
            let src = Reg8::from_code(z);
            let cycles = if src.is_indirect() { 7 } else { 4 };
            e(cycles, Op::Alu { op: AluOp::from_code(y), src })
        }
        _ => match z {
            0 => e(5, Op::RetCond(Cond::from_code(y))),
            1 => match (q, p) {
                (0, _) => e(10, Op::Pop(Reg16::from_rp2(p))),
                (_, 0) => e(10, Op::Ret),
                (_, 1) => e(4, Op::Exx),
                (_, 2) => e(4, Op::JpHl),
                _ => e(6, Op::LdSpHl),
            },
            2 => e(10, Op::JpCond(Cond::from_code(y))),
            3 => match y {
                0 => e(10, Op::Jp),
                1 => e(4, Op::PrefixCb),
                2 => e(11, Op::OutImmA),
                3 => e(11, Op::InAImm),
                4 => e(19, Op::ExSpHl),
                5 => e(4, Op::ExDeHl),
                6 => e(4, Op::Di),
                _ => e(4, Op::Ei),
            },
            4 => e(10, Op::CallCond(Cond::from_code(y))),
            5 => match (q, p) {
                (0, _) => e(11, Op::Push(Reg16::from_rp2(p))),
                (_, 0) => e(17, Op::Call),
                (_, 1) => e(4, Op::PrefixIx),
                (_, 2) => e(4, Op::PrefixEd),
                _ => e(4, Op::PrefixIy),
            },
            6 => e(7, Op::AluImm(AluOp::from_code(y))),
            _ => e(11, Op::Rst(opcode & 0x38)),
        },
    }
}

fn decode_cb(opcode: u8) -> OpcodeEntry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let target = Reg8::from_code(opcode);
    let indirect = target.is_indirect();

    // Totals are 8 T-cycles for registers, 15 for (HL) read-modify-write
    // and 12 for BIT n,(HL); the prefix fetch already paid 4.
    let op = match x {
        0 => Op::Shift { op: ShiftOp::from_code(y), target },
        1 => Op::Bit { bit: y, target },
        2 => Op::Res { bit: y, target },
        _ => Op::Set { bit: y, target },
    };
    let cycles = match op {
        _ if !indirect => 4,
        Op::Bit { .. } => 8,
        _ => 11,
    };
    OpcodeEntry::new(cycles, op)
}

fn decode_ed(opcode: u8) -> OpcodeEntry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let e = OpcodeEntry::new;
    match x {
        1 => match z {
            0 => {
                let reg = (y != 6).then(|| Reg8::from_code(y));
                e(8, Op::InC(reg))
            }
            1 => {
                let reg = (y != 6).then(|| Reg8::from_code(y));
                e(8, Op::OutC(reg))
            }
            2 => {
                if q == 0 {
                    e(11, Op::SbcHl(Reg16::from_rp(p)))
                } else {
                    e(11, Op::AdcHl(Reg16::from_rp(p)))
                }
            }
            3 => {
                if q == 0 {
                    e(16, Op::LdAbsRp(Reg16::from_rp(p)))
                } else {
                    e(16, Op::LdRpAbs(Reg16::from_rp(p)))
                }
            }
            4 => e(4, Op::Neg),
            5 => {
                if y == 1 {
                    e(10, Op::Reti)
                } else {
                    e(10, Op::Retn)
                }
            }
            6 => {
                let mode = match y & 0x03 {
                    2 => 1,
                    3 => 2,
                    _ => 0,
                };
                e(4, Op::Im(mode))
            }
            _ => match y {
                0 => e(5, Op::LdIA),
                1 => e(5, Op::LdRA),
                2 => e(5, Op::LdAI),
                3 => e(5, Op::LdAR),
                4 => e(14, Op::Rrd),
                5 => e(14, Op::Rld),
                _ => e(4, Op::Invalid(opcode)),
            },
        },
        2 if z <= 3 && y >= 4 => {
            let op = match z {
                0 => BlockOp::Ld,
                1 => BlockOp::Cp,
                2 => BlockOp::In,
                _ => BlockOp::Out,
            };
            e(
                12,
                Op::Block {
                    op,
                    increment: (y & 0x01) == 0,
                    repeat: y >= 6,
                },
            )
        }
        _ => e(4, Op::Invalid(opcode)),
    }
}

/// Entries after DD/FD. Opcodes touching HL, H, L or (HL) get the indexed
/// cost; the rest run unprefixed, so the prefix just adds its 4 T-cycles.
fn decode_index(opcode: u8) -> OpcodeEntry {
    let e = OpcodeEntry::new;
    match opcode {
        0xDD => return e(4, Op::PrefixIx),
        0xFD => return e(4, Op::PrefixIy),
        0xED => return e(4, Op::PrefixEd),
        0xCB => return e(0, Op::PrefixIndexCb),
        _ => {}
    }

    let base = decode_primary(opcode);
    let cycles = match base.op {
        Op::LdImm16(Reg16::HL) => 10,
        Op::AddHl(_) => 11,
        Op::LdAbsHl | Op::LdHlAbs => 16,
        Op::Inc16(Reg16::HL) | Op::Dec16(Reg16::HL) => 6,
        Op::Inc8(Reg8::HlIndirect) | Op::Dec8(Reg8::HlIndirect) => 19,
        Op::Inc8(Reg8::H | Reg8::L) | Op::Dec8(Reg8::H | Reg8::L) => 4,
        Op::LdImm8(Reg8::HlIndirect) => 15,
        Op::LdImm8(Reg8::H | Reg8::L) => 7,
        Op::Ld { dst, src } if dst.is_indirect() || src.is_indirect() => 15,
        Op::Ld { dst, src } if dst.uses_hl() || src.uses_hl() => 4,
        Op::Alu { src: Reg8::HlIndirect, .. } => 15,
        Op::Alu { src: Reg8::H | Reg8::L, .. } => 4,
        Op::Pop(Reg16::HL) => 10,
        Op::Push(Reg16::HL) => 11,
        Op::ExSpHl => 19,
        Op::JpHl => 4,
        Op::LdSpHl => 6,
        _ => return base,
    };
    e(cycles, base.op)
}

fn decode_index_cb(opcode: u8) -> OpcodeEntry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    // Register codes other than 6 also receive the result.
    let copy = (z != 6).then(|| Reg8::from_code(z));

    // Totals are 23 T-cycles (20 for BIT); DD/FD already paid 4.
    match x {
        0 => OpcodeEntry::new(19, Op::IndexShift { op: ShiftOp::from_code(y), copy }),
        1 => OpcodeEntry::new(16, Op::IndexBit(y)),
        2 => OpcodeEntry::new(19, Op::IndexRes { bit: y, copy }),
        _ => OpcodeEntry::new(19, Op::IndexSet { bit: y, copy }),
    }
}

/// Display adapter printing an `Op` with index-mode register names.
#[derive(Clone, Copy, Debug)]
pub struct Mnemonic {
    op: Op,
    mode: IndexMode,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mnemonic(IndexMode::Hl), f)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mode;
        let r = |reg: Reg8| m.reg8(reg, false);
        let hl = m.reg16(Reg16::HL);
        match self.op {
            Op::Nop => f.write_str("NOP"),
            Op::Halt => f.write_str("HALT"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::Ld { dst, src } => {
                let plain = dst.is_indirect() || src.is_indirect();
                write!(f, "LD {},{}", m.reg8(dst, plain), m.reg8(src, plain))
            }
            Op::LdImm8(reg) => write!(f, "LD {},n", r(reg)),
            Op::LdImm16(reg) => write!(f, "LD {},nn", m.reg16(reg)),
            Op::LdBcA => f.write_str("LD (BC),A"),
            Op::LdDeA => f.write_str("LD (DE),A"),
            Op::LdABc => f.write_str("LD A,(BC)"),
            Op::LdADe => f.write_str("LD A,(DE)"),
            Op::LdAbsA => f.write_str("LD (nn),A"),
            Op::LdAAbs => f.write_str("LD A,(nn)"),
            Op::LdAbsHl => write!(f, "LD (nn),{hl}"),
            Op::LdHlAbs => write!(f, "LD {hl},(nn)"),
            Op::LdSpHl => write!(f, "LD SP,{hl}"),
            Op::ExAfAf => f.write_str("EX AF,AF'"),
            Op::Exx => f.write_str("EXX"),
            Op::ExDeHl => f.write_str("EX DE,HL"),
            Op::ExSpHl => write!(f, "EX (SP),{hl}"),
            Op::Inc8(reg) => write!(f, "INC {}", r(reg)),
            Op::Dec8(reg) => write!(f, "DEC {}", r(reg)),
            Op::Inc16(reg) => write!(f, "INC {}", m.reg16(reg)),
            Op::Dec16(reg) => write!(f, "DEC {}", m.reg16(reg)),
            Op::AddHl(reg) => write!(f, "ADD {hl},{}", m.reg16(reg)),
            Op::Alu { op, src } => write!(f, "{}{}", op.mnemonic(), r(src)),
            Op::AluImm(op) => write!(f, "{}n", op.mnemonic()),
            Op::Rlca => f.write_str("RLCA"),
            Op::Rrca => f.write_str("RRCA"),
            Op::Rla => f.write_str("RLA"),
            Op::Rra => f.write_str("RRA"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),
            Op::Djnz => f.write_str("DJNZ e"),
            Op::Jr => f.write_str("JR e"),
            Op::JrCond(cc) => write!(f, "JR {cc},e"),
            Op::Jp => f.write_str("JP nn"),
            Op::JpCond(cc) => write!(f, "JP {cc},nn"),
            Op::JpHl => write!(f, "JP ({hl})"),
            Op::Call => f.write_str("CALL nn"),
            Op::CallCond(cc) => write!(f, "CALL {cc},nn"),
            Op::Ret => f.write_str("RET"),
            Op::RetCond(cc) => write!(f, "RET {cc}"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Op::Push(reg) => write!(f, "PUSH {}", m.reg16(reg)),
            Op::Pop(reg) => write!(f, "POP {}", m.reg16(reg)),
            Op::OutImmA => f.write_str("OUT (n),A"),
            Op::InAImm => f.write_str("IN A,(n)"),
            Op::PrefixCb => f.write_str("PREFIX CB"),
            Op::PrefixEd => f.write_str("PREFIX ED"),
            Op::PrefixIx => f.write_str("PREFIX DD"),
            Op::PrefixIy => f.write_str("PREFIX FD"),
            Op::PrefixIndexCb => f.write_str("PREFIX CB"),
            Op::Shift { op, target } => write!(f, "{} {}", op.mnemonic(), r(target)),
            Op::Bit { bit, target } => write!(f, "BIT {bit},{}", r(target)),
            Op::Res { bit, target } => write!(f, "RES {bit},{}", r(target)),
            Op::Set { bit, target } => write!(f, "SET {bit},{}", r(target)),
            Op::IndexShift { op, copy } => {
                write!(f, "{} {}", op.mnemonic(), m.indirect())?;
                write_copy(f, copy)
            }
            Op::IndexBit(bit) => write!(f, "BIT {bit},{}", m.indirect()),
            Op::IndexRes { bit, copy } => {
                write!(f, "RES {bit},{}", m.indirect())?;
                write_copy(f, copy)
            }
            Op::IndexSet { bit, copy } => {
                write!(f, "SET {bit},{}", m.indirect())?;
                write_copy(f, copy)
            }
            Op::InC(Some(reg)) => write!(f, "IN {},(C)", IndexMode::Hl.reg8(reg, true)),
            Op::InC(None) => f.write_str("IN (C)"),
            Op::OutC(Some(reg)) => write!(f, "OUT (C),{}", IndexMode::Hl.reg8(reg, true)),
            Op::OutC(None) => f.write_str("OUT (C),0"),
            Op::SbcHl(reg) => write!(f, "SBC HL,{}", IndexMode::Hl.reg16(reg)),
            Op::AdcHl(reg) => write!(f, "ADC HL,{}", IndexMode::Hl.reg16(reg)),
            Op::LdAbsRp(reg) => write!(f, "LD (nn),{}", IndexMode::Hl.reg16(reg)),
            Op::LdRpAbs(reg) => write!(f, "LD {},(nn)", IndexMode::Hl.reg16(reg)),
            Op::Neg => f.write_str("NEG"),
            Op::Retn => f.write_str("RETN"),
            Op::Reti => f.write_str("RETI"),
            Op::Im(mode) => write!(f, "IM {mode}"),
            Op::LdIA => f.write_str("LD I,A"),
            Op::LdRA => f.write_str("LD R,A"),
            Op::LdAI => f.write_str("LD A,I"),
            Op::LdAR => f.write_str("LD A,R"),
            Op::Rrd => f.write_str("RRD"),
            Op::Rld => f.write_str("RLD"),
            Op::Block { op, increment, repeat } => {
                let name = match (op, increment, repeat) {
                    (BlockOp::Ld, true, false) => "LDI",
                    (BlockOp::Ld, false, false) => "LDD",
                    (BlockOp::Ld, true, true) => "LDIR",
                    (BlockOp::Ld, false, true) => "LDDR",
                    (BlockOp::Cp, true, false) => "CPI",
                    (BlockOp::Cp, false, false) => "CPD",
                    (BlockOp::Cp, true, true) => "CPIR",
                    (BlockOp::Cp, false, true) => "CPDR",
                    (BlockOp::In, true, false) => "INI",
                    (BlockOp::In, false, false) => "IND",
                    (BlockOp::In, true, true) => "INIR",
                    (BlockOp::In, false, true) => "INDR",
                    (BlockOp::Out, true, false) => "OUTI",
                    (BlockOp::Out, false, false) => "OUTD",
                    (BlockOp::Out, true, true) => "OTIR",
                    (BlockOp::Out, false, true) => "OTDR",
                };
                f.write_str(name)
            }
            Op::Invalid(opcode) => write!(f, "INVALID ${opcode:02X}"),
        }
    }
}

fn write_copy(f: &mut fmt::Formatter<'_>, copy: Option<Reg8>) -> fmt::Result {
    match copy {
        Some(reg) => write!(f, ",{}", IndexMode::Hl.reg8(reg, true)),
        None => Ok(()),
    }
}
