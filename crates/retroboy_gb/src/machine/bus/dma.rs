use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        // OAM DMA: copy 160 bytes from source XX00..XX9F to FE00..FE9F.
        // We ignore the 160 M-cycle transfer time and CPU bus conflicts,
        // and perform the transfer immediately.
        let base = (value as usize) << 8;
        for i in 0..0xA0usize {
            // Sources above 0xDFFF read through the echo mirror.
            let src = (base + i) % 0x10000;
            self.memory[0xFE00 + i] = self.memory[src];
        }
        self.memory[0xFF46] = value;
        log::debug!("GB bus: OAM DMA from 0x{:04X}", base);
    }
}
