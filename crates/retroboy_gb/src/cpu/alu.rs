use super::{Cpu, Flag};

/// F with the given Z/N/H/C bits. The low nibble always reads zero.
#[inline]
const fn znhc(z: bool, n: bool, h: bool, c: bool) -> u8 {
    let mut f = 0;
    if z {
        f |= Flag::Z.mask();
    }
    if n {
        f |= Flag::N.mask();
    }
    if h {
        f |= Flag::H.mask();
    }
    if c {
        f |= Flag::C.mask();
    }
    f
}

impl Cpu {
    #[inline]
    fn carry_bit(&self, use_carry: bool) -> u8 {
        u8::from(use_carry && self.get_flag(Flag::C))
    }

    /// ADD / ADC into A.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = self.carry_bit(use_carry);
        let (partial, c1) = a.overflowing_add(value);
        let (result, c2) = partial.overflowing_add(carry_in);

        self.regs.a = result;
        self.regs.f = znhc(
            result == 0,
            false,
            (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F,
            c1 || c2,
        );
    }

    /// SUB / SBC / CP against A. CP passes `compare_only` and keeps A.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool, compare_only: bool) {
        let a = self.regs.a;
        let carry_in = self.carry_bit(use_carry);
        let (partial, b1) = a.overflowing_sub(value);
        let (result, b2) = partial.overflowing_sub(carry_in);

        if !compare_only {
            self.regs.a = result;
        }
        // Borrow into bit 4 shows up in the XOR of operands and result.
        self.regs.f = znhc(result == 0, true, (a ^ value ^ result) & 0x10 != 0, b1 || b2);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.regs.f = znhc(self.regs.a == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.regs.f = znhc(self.regs.a == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.regs.f = znhc(self.regs.a == 0, false, false, false);
    }

    /// DAA. After an addition (N clear) the low digit is corrected when H is
    /// set or it exceeds 9, the high digit when C is set or A exceeds 0x99
    /// (tested before the low correction). After a subtraction only H and C
    /// select the correction. H ends clear, N is kept.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let subtract = self.get_flag(Flag::N);
        let half = self.get_flag(Flag::H);
        let mut carry = self.get_flag(Flag::C);

        let mut adjust = 0u8;
        if half || (!subtract && a & 0x0F > 0x09) {
            adjust |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            adjust |= 0x60;
            carry = true;
        }

        let result = if subtract {
            a.wrapping_sub(adjust)
        } else {
            a.wrapping_add(adjust)
        };
        self.regs.a = result;
        self.regs.f = znhc(result == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is kept.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.regs.f = znhc(result == 0, false, value & 0x0F == 0x0F, carry);
        result
    }

    /// DEC r / DEC (HL). C is kept.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.regs.f = znhc(result == 0, true, value & 0x0F == 0x00, carry);
        result
    }

    /// ADD HL,rr: Z is kept, H and C come from bits 11 and 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        let zero = self.get_flag(Flag::Z);
        self.regs.f = znhc(zero, false, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF, carry);
        self.regs.set_hl(result);
    }

    /// `base + e8` for ADD SP,e8 and LD HL,SP+e8. Z and N are cleared; H and
    /// C are the unsigned carries out of bits 3 and 7 of the low byte.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let low = base as u8;
        self.regs.f = znhc(
            false,
            false,
            (low & 0x0F) + (imm8 & 0x0F) > 0x0F,
            low.overflowing_add(imm8).1,
        );
        base.wrapping_add_signed(i16::from(imm8 as i8))
    }
}
