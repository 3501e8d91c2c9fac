use super::{Bus, Cond, Cpu, Flag, IndexMode, Reg16, Reg8};

impl Cpu {
    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.fetched.push(value);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// M1 fetch: like `fetch8`, and counts a refresh cycle in R.
    #[inline]
    pub(super) fn fetch_opcode<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let opcode = self.fetch8(bus);
        self.regs.bump_r();
        opcode
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read16<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read8(addr);
        let hi = bus.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn write16<B: Bus>(&mut self, bus: &mut B, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
    }

    /// HL, IX or IY depending on the active prefix.
    #[inline]
    pub(super) fn hl_like(&self) -> u16 {
        match self.mode {
            IndexMode::Hl => self.regs.hl(),
            IndexMode::Ix => self.regs.ix,
            IndexMode::Iy => self.regs.iy,
        }
    }

    #[inline]
    pub(super) fn set_hl_like(&mut self, value: u16) {
        match self.mode {
            IndexMode::Hl => self.regs.set_hl(value),
            IndexMode::Ix => self.regs.ix = value,
            IndexMode::Iy => self.regs.iy = value,
        }
    }

    /// Register pair with HL redirected by the active prefix.
    #[inline]
    pub(super) fn reg16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::HL => self.hl_like(),
            _ => self.regs.get16(reg),
        }
    }

    #[inline]
    pub(super) fn set_reg16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::HL => self.set_hl_like(value),
            _ => self.regs.set16(reg, value),
        }
    }

    /// Address of the memory operand: HL, or `IX+d`/`IY+d` with the
    /// displacement fetched on first use.
    pub(super) fn indirect_addr<B: Bus>(&mut self, bus: &mut B) -> u16 {
        if self.mode == IndexMode::Hl {
            return self.regs.hl();
        }
        if let Some(addr) = self.index_addr {
            return addr;
        }
        let d = self.fetch8(bus) as i8;
        let addr = self.hl_like().wrapping_add_signed(i16::from(d));
        self.index_addr = Some(addr);
        addr
    }

    /// Read an 8-bit operand. H and L are redirected by `map`; the memory
    /// operand always follows the active prefix.
    pub(super) fn read_reg8_as<B: Bus>(&mut self, bus: &mut B, reg: Reg8, map: IndexMode) -> u8 {
        match (reg, map) {
            (Reg8::B, _) => self.regs.b,
            (Reg8::C, _) => self.regs.c,
            (Reg8::D, _) => self.regs.d,
            (Reg8::E, _) => self.regs.e,
            (Reg8::H, IndexMode::Hl) => self.regs.h,
            (Reg8::H, IndexMode::Ix) => (self.regs.ix >> 8) as u8,
            (Reg8::H, IndexMode::Iy) => (self.regs.iy >> 8) as u8,
            (Reg8::L, IndexMode::Hl) => self.regs.l,
            (Reg8::L, IndexMode::Ix) => self.regs.ix as u8,
            (Reg8::L, IndexMode::Iy) => self.regs.iy as u8,
            (Reg8::HlIndirect, _) => {
                let addr = self.indirect_addr(bus);
                bus.read8(addr)
            }
            (Reg8::A, _) => self.regs.a,
        }
    }

    pub(super) fn write_reg8_as<B: Bus>(
        &mut self,
        bus: &mut B,
        reg: Reg8,
        map: IndexMode,
        value: u8,
    ) {
        match (reg, map) {
            (Reg8::B, _) => self.regs.b = value,
            (Reg8::C, _) => self.regs.c = value,
            (Reg8::D, _) => self.regs.d = value,
            (Reg8::E, _) => self.regs.e = value,
            (Reg8::H, IndexMode::Hl) => self.regs.h = value,
            (Reg8::H, IndexMode::Ix) => {
                self.regs.ix = (self.regs.ix & 0x00FF) | (u16::from(value) << 8)
            }
            (Reg8::H, IndexMode::Iy) => {
                self.regs.iy = (self.regs.iy & 0x00FF) | (u16::from(value) << 8)
            }
            (Reg8::L, IndexMode::Hl) => self.regs.l = value,
            (Reg8::L, IndexMode::Ix) => self.regs.ix = (self.regs.ix & 0xFF00) | u16::from(value),
            (Reg8::L, IndexMode::Iy) => self.regs.iy = (self.regs.iy & 0xFF00) | u16::from(value),
            (Reg8::HlIndirect, _) => {
                let addr = self.indirect_addr(bus);
                bus.write8(addr, value);
            }
            (Reg8::A, _) => self.regs.a = value,
        }
    }

    /// Read an operand under the active prefix (IXH/IXL for H/L).
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) -> u8 {
        self.read_reg8_as(bus, reg, self.mode)
    }

    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        self.write_reg8_as(bus, reg, self.mode, value)
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = self.read16(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        match cc {
            Cond::Nz => !self.get_flag(Flag::Z),
            Cond::Z => self.get_flag(Flag::Z),
            Cond::Nc => !self.get_flag(Flag::C),
            Cond::C => self.get_flag(Flag::C),
            Cond::Po => !self.get_flag(Flag::PV),
            Cond::Pe => self.get_flag(Flag::PV),
            Cond::P => !self.get_flag(Flag::S),
            Cond::M => self.get_flag(Flag::S),
        }
    }

    /// Relative jump helper used by JR, JR cc and DJNZ. Returns whether the
    /// jump was taken.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(i16::from(offset));
        }
        cond
    }

    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
        }
        cond
    }

    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
        cond
    }

    pub(super) fn ret<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        if cond {
            self.regs.pc = self.pop_u16(bus);
        }
        cond
    }
}
