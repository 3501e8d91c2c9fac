use crate::cpu::{Bus, Interrupts, IF_ADDR};

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    /// Advance timer and LCD timing by `cycles` T-cycles.
    fn tick(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.timer.tick_tcycle(&mut self.memory[IF_ADDR as usize]);
            self.cycle_lcd();
        }
        self.sync_timer_registers();
    }

    fn request_interrupt(&mut self, irq: Interrupts) {
        self.memory[IF_ADDR as usize] |= irq.bits();
    }
}
