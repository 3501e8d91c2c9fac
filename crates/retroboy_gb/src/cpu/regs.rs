use std::fmt;

/// Registers for the Game Boy CPU (LR35902 / SM83).
///
/// Pairs are composed big-endian: the first-named register of a pair lives
/// in the upper byte (`B` in `BC`, `A` in `AF`).
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
    pub sp: u16,
    pub pc: u16,
}

/// Bits of F that always read as zero.
pub const F_UNUSED_MASK: u8 = 0x0F;

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & !F_UNUSED_MASK])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
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
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// 8-bit operand selected by a 3-bit register code.
///
/// Code 6 is not a register: it addresses memory through HL.
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
    /// Decode the standard register field (`0=B .. 5=L, 6=(HL), 7=A`).
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
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
            Reg8::HlIndirect => "(HL)",
            Reg8::A => "A",
        };
        f.write_str(name)
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
    /// `rp` field used by loads and 16-bit arithmetic (`BC, DE, HL, SP`).
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

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
            Reg16::AF => "AF",
        };
        f.write_str(name)
    }
}

/// Branch condition encoded in bits 4..3 of conditional opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Nz,
    Z,
    Nc,
    C,
}

impl Cond {
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => Cond::Nz,
            1 => Cond::Z,
            2 => Cond::Nc,
            _ => Cond::C,
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
        };
        f.write_str(name)
    }
}
