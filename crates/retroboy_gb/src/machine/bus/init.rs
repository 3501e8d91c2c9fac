use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cpu::{IE_ADDR, IF_ADDR};
use crate::machine::config::RamInit;

use super::GameBoyBus;

impl GameBoyBus {
    /// Initialize I/O registers to match the DMG/MGB power-on state.
    ///
    /// This approximates the boot ROM's post-initialization state.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        // Joypad: nothing selected, no button pressed.
        self.memory[0xFF00] = 0xCF;

        // Serial.
        self.serial.sb = 0x00;
        self.serial.sc = 0x00;
        self.memory[0xFF01] = self.serial.sb;
        self.memory[0xFF02] = self.serial.read_sc();

        // Divider / timer.
        self.timer.init_dmg();
        self.sync_timer_registers();

        // Interrupt flags and enable.
        //
        // IF's upper 3 bits always read as 1 on DMG; the hardware happens
        // to have bit 0 set at PC=0x0100 as well (VBlank request).
        self.memory[IF_ADDR as usize] = 0xE1;
        self.memory[IE_ADDR as usize] = 0x00;

        // Sound registers (the APU is not emulated, but default values
        // are visible to software).
        const APU_DEFAULTS: [(usize, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in APU_DEFAULTS {
            self.memory[addr] = value;
        }

        // LCD registers.
        self.memory[0xFF40] = 0x91; // LCDC
        self.memory[0xFF41] = 0x85; // STAT (DMG)
        self.memory[0xFF42] = 0x00; // SCY
        self.memory[0xFF43] = 0x00; // SCX
        self.memory[0xFF44] = 0x00; // LY
        self.memory[0xFF45] = 0x00; // LYC
        self.memory[0xFF46] = 0xFF; // DMA
        self.memory[0xFF47] = 0xFC; // BGP
        self.memory[0xFF4A] = 0x00; // WY
        self.memory[0xFF4B] = 0x00; // WX
    }

    /// Fill internal WRAM and HRAM according to `ram_init`.
    ///
    /// Pandocs notes that these RAM areas contain "random" data at power-on.
    /// A seeded generator keeps emulator runs deterministic.
    pub(super) fn init_internal_ram(&mut self, ram_init: RamInit) {
        match ram_init {
            RamInit::Zeroed => {
                self.memory[0xC000..0xE000].fill(0);
                self.memory[0xFF80..0xFFFF].fill(0);
            }
            RamInit::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                rng.fill(&mut self.memory[0xC000..0xE000]);
                rng.fill(&mut self.memory[0xFF80..0xFFFF]);
            }
        }

        // Echo RAM 0xE000–0xFDFF mirrors 0xC000–0xDDFF.
        self.memory.copy_within(0xC000..0xDE00, 0xE000);
    }

    /// Mirror the timer registers into the backing array.
    pub(super) fn sync_timer_registers(&mut self) {
        self.memory[0xFF04] = self.timer.div();
        self.memory[0xFF05] = self.timer.tima;
        self.memory[0xFF06] = self.timer.tma;
        self.memory[0xFF07] = self.timer.tac_read();
    }
}
