use super::{Cpu, Flag};

/// Even parity, as reported in P/V by logical operations.
#[inline]
pub(super) fn parity_even(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

impl Cpu {
    /// S, Z and P/V (parity) from `value`.
    #[inline]
    pub(super) fn set_szp(&mut self, value: u8) {
        self.set_flag(Flag::S, value & 0x80 != 0);
        self.set_flag(Flag::Z, value == 0);
        self.set_flag(Flag::PV, parity_even(value));
    }

    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);
        let result = full as u8;

        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::S, result & 0x80 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half > 0x0F);
        // Signed overflow: both operands share a sign the result lacks.
        self.set_flag(Flag::PV, (a ^ result) & (value ^ result) & 0x80 != 0);
        self.set_flag(Flag::C, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC/CP operation on A.
    ///
    /// With `compare_only` the result is discarded and only the flags
    /// change, which is how CP is implemented.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool, compare_only: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let full = i16::from(a) - i16::from(value) - i16::from(carry_in);
        let result = full as u8;

        if !compare_only {
            self.regs.a = result;
        }

        self.clear_flags();
        self.set_flag(Flag::S, result & 0x80 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, ((a ^ value ^ result) & 0x10) != 0);
        self.set_flag(Flag::PV, (a ^ value) & (a ^ result) & 0x80 != 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::C, full < 0);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.clear_flags();
        self.set_szp(result);
        self.set_flag(Flag::H, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.clear_flags();
        self.set_szp(result);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.clear_flags();
        self.set_szp(result);
    }

    /// Decimal adjust accumulator.
    ///
    /// The correction is +/-0x06 when H is set or the low nibble exceeds 9,
    /// plus +/-0x60 (setting C) when C is set or A exceeds 0x99; the sign
    /// follows N. H reports the carry/borrow out of the low nibble of the
    /// adjustment. N is unchanged.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let low = a & 0x0F;
        let subtract = self.get_flag(Flag::N);
        let half = self.get_flag(Flag::H);

        let mut adjust = 0u8;
        let mut carry = self.get_flag(Flag::C);
        if half || low > 0x09 {
            adjust |= 0x06;
        }
        if carry || a > 0x99 {
            adjust |= 0x60;
            carry = true;
        }

        let result = if subtract {
            self.set_flag(Flag::H, half && low < 0x06);
            a.wrapping_sub(adjust)
        } else {
            self.set_flag(Flag::H, low > 0x09);
            a.wrapping_add(adjust)
        };

        self.regs.a = result;
        self.set_szp(result);
        self.set_flag(Flag::C, carry);
    }

    /// NEG: A = 0 - A with subtraction flags.
    pub(super) fn alu_neg(&mut self) {
        let value = self.regs.a;
        self.regs.a = 0;
        self.alu_sub(value, false, false);
    }

    /// INC r / INC (HL): C is unaffected.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::S, result & 0x80 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        self.set_flag(Flag::PV, value == 0x7F);
        self.set_flag(Flag::N, false);
        result
    }

    /// DEC r / DEC (HL): C is unaffected.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::S, result & 0x80 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        self.set_flag(Flag::PV, value == 0x80);
        self.set_flag(Flag::N, true);
        result
    }

    /// `ADD HL/IX/IY,rr`: S, Z and P/V are unaffected; H is the carry out of
    /// bit 11 and C the carry out of bit 15.
    #[inline]
    pub(super) fn alu_add16(&mut self, base: u16, value: u16) -> u16 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (base & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, u32::from(base) + u32::from(value) > 0xFFFF);
        base.wrapping_add(value)
    }

    /// `ADC HL,rr`: every flag is computed over 16 bits.
    pub(super) fn alu_adc16(&mut self, value: u16) {
        let hl = self.regs.hl();
        let carry_in = u16::from(self.get_flag(Flag::C));
        let full = u32::from(hl) + u32::from(value) + u32::from(carry_in);
        let result = full as u16;

        self.clear_flags();
        self.set_flag(Flag::S, result & 0x8000 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) + carry_in > 0x0FFF);
        self.set_flag(Flag::PV, (hl ^ result) & (value ^ result) & 0x8000 != 0);
        self.set_flag(Flag::C, full > 0xFFFF);
        self.regs.set_hl(result);
    }

    /// `SBC HL,rr`: every flag is computed over 16 bits.
    pub(super) fn alu_sbc16(&mut self, value: u16) {
        let hl = self.regs.hl();
        let carry_in = u16::from(self.get_flag(Flag::C));
        let full = i32::from(hl) - i32::from(value) - i32::from(carry_in);
        let result = full as u16;

        self.clear_flags();
        self.set_flag(Flag::S, result & 0x8000 != 0);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, (hl ^ value ^ result) & 0x1000 != 0);
        self.set_flag(Flag::PV, (hl ^ value) & (hl ^ result) & 0x8000 != 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::C, full < 0);
        self.regs.set_hl(result);
    }
}
