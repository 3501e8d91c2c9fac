use crate::cpu::{Interrupts, IE_ADDR, IF_ADDR, P1_ADDR};

use super::GameBoyBus;

impl GameBoyBus {
    /// Apply a CPU write, including the register side effects, then run the
    /// registered IO hooks.
    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // Cartridge ROM. There is no mapper to receive the write.
            0x0000..=0x7FFF => {
                log::trace!("GB bus: ignored ROM write 0x{:02X} -> 0x{:04X}", value, addr);
            }
            // WRAM and its echo share storage.
            0xC000..=0xDDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize + 0x2000] = value;
            }
            0xE000..=0xFDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize - 0x2000] = value;
            }
            // Unusable area.
            0xFEA0..=0xFEFF => {}
            P1_ADDR => {
                // Only the select lines are writable; with no buttons held
                // the input lines always read high.
                self.memory[addr as usize] = 0xC0 | (value & 0x30) | 0x0F;
            }
            0xFF01 => {
                self.serial.write_sb(value);
                self.memory[addr as usize] = value;
            }
            0xFF02 => {
                if self.serial.write_sc(value) {
                    self.memory[IF_ADDR as usize] |= Interrupts::SERIAL.bits();
                }
                self.memory[addr as usize] = self.serial.read_sc();
            }
            0xFF04 => {
                self.timer.div_write();
                self.sync_timer_registers();
            }
            0xFF05 => {
                self.timer.tima_write(value);
                self.sync_timer_registers();
            }
            0xFF06 => {
                self.timer.tma_write(value);
                self.sync_timer_registers();
            }
            0xFF07 => {
                self.timer.tac_write(value);
                self.sync_timer_registers();
            }
            IF_ADDR => {
                self.memory[addr as usize] = value | 0xE0;
            }
            0xFF40 => {
                let was_on = (self.memory[0xFF40] & 0x80) != 0;
                self.memory[0xFF40] = value;
                if was_on && (value & 0x80) == 0 {
                    // Turning the LCD off resets LY and the dot counter.
                    self.lcd_dots = 0;
                    self.memory[0xFF44] = 0;
                    log::debug!("GB LCD: display disabled");
                }
                self.update_lcd_status();
            }
            0xFF41 => {
                // Bits 0-2 are read-only; bit 7 always reads as 1.
                let old = self.memory[0xFF41];
                self.memory[0xFF41] = (old & 0x07) | (value & 0x78) | 0x80;
                self.update_lcd_status();
            }
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.memory[0xFF45] = value;
                self.update_lcd_status();
            }
            0xFF46 => self.do_oam_dma(value),
            _ => {
                self.memory[addr as usize] = value;
            }
        }

        if matches!(addr, 0xFF00..=0xFF7F | IE_ADDR) && !self.io_hooks.is_empty() {
            for hook in self.io_hooks.iter_mut() {
                hook(addr, value);
            }
        }
    }
}
