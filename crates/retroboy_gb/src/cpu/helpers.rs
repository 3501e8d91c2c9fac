use super::{Bus, Cond, Cpu, Flag, Reg8};

impl Cpu {
    /// Read an 8-bit register or, for `Reg8::HlIndirect`, the byte at HL.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) -> u8 {
        match reg {
            Reg8::B => self.regs.b,
            Reg8::C => self.regs.c,
            Reg8::D => self.regs.d,
            Reg8::E => self.regs.e,
            Reg8::H => self.regs.h,
            Reg8::L => self.regs.l,
            Reg8::HlIndirect => bus.read8(self.regs.hl()),
            Reg8::A => self.regs.a,
        }
    }

    /// Write an 8-bit register or, for `Reg8::HlIndirect`, the byte at HL.
    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.regs.b = value,
            Reg8::C => self.regs.c = value,
            Reg8::D => self.regs.d = value,
            Reg8::E => self.regs.e = value,
            Reg8::H => self.regs.h = value,
            Reg8::L => self.regs.l = value,
            Reg8::HlIndirect => bus.write8(self.regs.hl(), value),
            Reg8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.fetched.push(value);
        if self.halt_bug {
            // HALT bug: the first opcode fetch after the bug does not
            // increment PC. We consume the bug here.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        // Stack grows downward. We want memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        match cc {
            Cond::Nz => !self.get_flag(Flag::Z),
            Cond::Z => self.get_flag(Flag::Z),
            Cond::Nc => !self.get_flag(Flag::C),
            Cond::C => self.get_flag(Flag::C),
        }
    }

    /// Relative jump helper used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand. Returns whether the jump was taken.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
        }
        cond
    }

    /// Absolute jump helper used by JP a16 and JP cc,a16.
    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
        }
        cond
    }

    /// Call helper used by CALL a16 and CALL cc,a16.
    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
        cond
    }

    /// Return helper used by RET and RET cc.
    pub(super) fn ret<B: Bus>(&mut self, bus: &mut B, cond: bool) -> bool {
        if cond {
            self.regs.pc = self.pop_u16(bus);
        }
        cond
    }
}
