use std::fmt;

/// Z80 register file.
///
/// Pairs are composed big-endian: the first-named register of a pair lives
/// in the upper byte (`B` in `BC`, `A` in `AF`). The alternate set is only
/// reachable through the exchange instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub ix: u16,
    pub iy: u16,
    pub sp: u16,
    pub pc: u16,
    /// Interrupt vector base used by IM 2.
    pub i: u8,
    /// Memory refresh counter. The low 7 bits count opcode fetches.
    pub r: u8,
    pub alt: AltRegisters,
}

/// Alternate register set (A'F' B'C' D'E' H'L').
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AltRegisters {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
}

/// Bits of F that always read as zero (the undocumented copies of result
/// bits 3 and 5).
pub const F_UNUSED_MASK: u8 = 0x28;

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & !F_UNUSED_MASK])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f & !F_UNUSED_MASK;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    #[inline]
    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
            Reg16::AF => self.af(),
        }
    }

    #[inline]
    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
            Reg16::AF => self.set_af(value),
        }
    }

    /// EX AF,AF'.
    pub fn swap_af(&mut self) {
        std::mem::swap(&mut self.a, &mut self.alt.a);
        std::mem::swap(&mut self.f, &mut self.alt.f);
        self.f &= !F_UNUSED_MASK;
        self.alt.f &= !F_UNUSED_MASK;
    }

    /// EXX: swap BC, DE and HL with their alternates.
    pub fn exx(&mut self) {
        std::mem::swap(&mut self.b, &mut self.alt.b);
        std::mem::swap(&mut self.c, &mut self.alt.c);
        std::mem::swap(&mut self.d, &mut self.alt.d);
        std::mem::swap(&mut self.e, &mut self.alt.e);
        std::mem::swap(&mut self.h, &mut self.alt.h);
        std::mem::swap(&mut self.l, &mut self.alt.l);
    }

    /// Advance R after an opcode fetch; bit 7 is left alone.
    #[inline]
    pub fn bump_r(&mut self) {
        self.r = (self.r & 0x80) | (self.r.wrapping_add(1) & 0x7F);
    }
}

/// Flag bits in the F register.
///
/// - bit 7: S (sign)
/// - bit 6: Z (zero)
/// - bit 4: H (half carry)
/// - bit 2: P/V (parity / overflow)
/// - bit 1: N (subtract)
/// - bit 0: C (carry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    S = 7,
    Z = 6,
    H = 4,
    PV = 2,
    N = 1,
    C = 0,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// 8-bit operand selected by a 3-bit register code.
///
/// Code 6 addresses memory through HL, or through `IX+d`/`IY+d` under an
/// index prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Reg8 {
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => Reg8::B,
            1 => Reg8::C,
            2 => Reg8::D,
            3 => Reg8::E,
            4 => Reg8::H,
            5 => Reg8::L,
            6 => Reg8::HlIndirect,
            _ => Reg8::A,
        }
    }

    #[inline]
    pub const fn is_indirect(self) -> bool {
        matches!(self, Reg8::HlIndirect)
    }

    /// H, L or (HL): the operands an index prefix redirects.
    #[inline]
    pub const fn uses_hl(self) -> bool {
        matches!(self, Reg8::H | Reg8::L | Reg8::HlIndirect)
    }
}

/// 16-bit register pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
    AF,
}

impl Reg16 {
    /// `rp` field (`BC, DE, HL, SP`).
    #[inline]
    pub const fn from_rp(code: u8) -> Self {
        match code & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::SP,
        }
    }

    /// `rp2` field used by PUSH/POP (`BC, DE, HL, AF`).
    #[inline]
    pub const fn from_rp2(code: u8) -> Self {
        match code & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::AF,
        }
    }
}

/// Which register an index prefix substitutes for HL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    #[default]
    Hl,
    Ix,
    Iy,
}

impl IndexMode {
    fn pair_name(self) -> &'static str {
        match self {
            IndexMode::Hl => "HL",
            IndexMode::Ix => "IX",
            IndexMode::Iy => "IY",
        }
    }

    /// Display adapter for an 8-bit operand under this mode. `plain_hl`
    /// keeps H and L unmapped (instructions that also use `(IX+d)`).
    pub(crate) fn reg8(self, reg: Reg8, plain_hl: bool) -> impl fmt::Display {
        RegName8 {
            reg,
            mode: self,
            plain_hl,
        }
    }

    pub(crate) fn reg16(self, reg: Reg16) -> &'static str {
        match reg {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => self.pair_name(),
            Reg16::SP => "SP",
            Reg16::AF => "AF",
        }
    }

    pub(crate) fn indirect(self) -> &'static str {
        match self {
            IndexMode::Hl => "(HL)",
            IndexMode::Ix => "(IX+d)",
            IndexMode::Iy => "(IY+d)",
        }
    }
}

struct RegName8 {
    reg: Reg8,
    mode: IndexMode,
    plain_hl: bool,
}

impl fmt::Display for RegName8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.plain_hl {
            IndexMode::Hl
        } else {
            self.mode
        };
        let name = match (self.reg, mode) {
            (Reg8::B, _) => "B",
            (Reg8::C, _) => "C",
            (Reg8::D, _) => "D",
            (Reg8::E, _) => "E",
            (Reg8::H, IndexMode::Hl) => "H",
            (Reg8::H, IndexMode::Ix) => "IXH",
            (Reg8::H, IndexMode::Iy) => "IYH",
            (Reg8::L, IndexMode::Hl) => "L",
            (Reg8::L, IndexMode::Ix) => "IXL",
            (Reg8::L, IndexMode::Iy) => "IYL",
            (Reg8::HlIndirect, _) => self.mode.indirect(),
            (Reg8::A, _) => "A",
        };
        f.write_str(name)
    }
}

/// Branch condition encoded in bits 5..3 of conditional opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Nz,
    Z,
    Nc,
    C,
    /// Parity odd (P/V clear).
    Po,
    /// Parity even (P/V set).
    Pe,
    /// Sign positive.
    P,
    /// Sign negative.
    M,
}

impl Cond {
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => Cond::Nz,
            1 => Cond::Z,
            2 => Cond::Nc,
            3 => Cond::C,
            4 => Cond::Po,
            5 => Cond::Pe,
            6 => Cond::P,
            _ => Cond::M,
        }
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::Nz => "NZ",
            Cond::Z => "Z",
            Cond::Nc => "NC",
            Cond::C => "C",
            Cond::Po => "PO",
            Cond::Pe => "PE",
            Cond::P => "P",
            Cond::M => "M",
        };
        f.write_str(name)
    }
}
