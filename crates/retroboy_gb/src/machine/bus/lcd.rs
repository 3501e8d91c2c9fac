use crate::cpu::{Interrupts, IF_ADDR};

use super::GameBoyBus;

/// Dots (T-cycles) per scanline.
pub(crate) const DOTS_PER_LINE: u32 = 456;
/// Scanlines per frame, including the ten VBlank lines.
pub(crate) const LINES_PER_FRAME: u32 = 154;
/// First VBlank line.
const VBLANK_LINE: u8 = 144;

impl GameBoyBus {
    /// Advance LCD timing by a single dot.
    ///
    /// Only the timing side of the pixel pipeline is modelled: LY, the STAT
    /// mode bits, LYC coincidence, and the VBlank/STAT interrupts.
    pub(super) fn cycle_lcd(&mut self) {
        let lcdc = self.memory[0xFF40];
        if (lcdc & 0x80) == 0 {
            // LCD display is disabled: LY stays at 0 and timing is reset.
            self.lcd_dots = 0;
            self.memory[0xFF44] = 0;
            self.stat_irq_line = false;
            return;
        }

        let old_ly = self.memory[0xFF44];
        self.lcd_dots = (self.lcd_dots + 1) % (DOTS_PER_LINE * LINES_PER_FRAME);
        let new_ly = (self.lcd_dots / DOTS_PER_LINE) as u8;
        self.memory[0xFF44] = new_ly;

        // Generate a VBlank interrupt when we cross from LY <= 143 into LY >= 144.
        //
        // On DMG, enabling the STAT mode-2 interrupt also causes a STAT
        // interrupt to be generated at this LY=144 vblank edge.
        if old_ly < VBLANK_LINE && new_ly >= VBLANK_LINE {
            let stat = self.memory[0xFF41];
            let mut irq = Interrupts::VBLANK;
            if (stat & 0x20) != 0 {
                irq |= Interrupts::LCD_STAT;
            }
            self.memory[IF_ADDR as usize] |= irq.bits();
            self.frames += 1;

            log::debug!(
                "GB LCD: VBlank edge (LY {}->{}), IF=0x{:02X}, STAT=0x{:02X}",
                old_ly,
                new_ly,
                self.memory[IF_ADDR as usize],
                stat,
            );
        }

        self.update_lcd_status();
    }

    /// Recompute STAT's mode and LYC=LY flag and update the STAT interrupt line.
    ///
    /// This helper is called after every dot and from writes to
    /// LCDC/STAT/LYC. It implements the basic Pandocs semantics for:
    /// - STAT bits 0-1 (PPU mode, read-only)
    /// - STAT bit 2   (LYC == LY flag, read-only)
    /// - STAT bits 3-6 (mode/LYC interrupt selects, read/write)
    /// - INT $48 (STAT interrupt) as a rising edge on the logically ORed line
    ///   of enabled sources.
    pub(super) fn update_lcd_status(&mut self) {
        let lcdc = self.memory[0xFF40];
        let ly = self.memory[0xFF44];
        let lyc = self.memory[0xFF45];

        let lcd_enabled = (lcdc & 0x80) != 0;

        let mode: u8 = if !lcd_enabled {
            0
        } else if ly >= VBLANK_LINE {
            // VBlank (mode 1) for LY >= 144.
            1
        } else {
            let line_dot = self.lcd_dots % DOTS_PER_LINE;
            if line_dot < 80 {
                2 // OAM search
            } else if line_dot < 80 + 172 {
                3 // LCD transfer
            } else {
                0 // HBlank
            }
        };

        let coincidence = ly == lyc;

        // Update STAT bits 0-2 while preserving the interrupt selects;
        // bit 7 always reads as 1.
        let mut stat = (self.memory[0xFF41] & 0x78) | 0x80 | mode;
        if coincidence {
            stat |= 0x04;
        }
        self.memory[0xFF41] = stat;

        if !lcd_enabled {
            self.stat_irq_line = false;
            return;
        }

        let line = ((stat & 0x40) != 0 && coincidence)
            || ((stat & 0x20) != 0 && mode == 2)
            || ((stat & 0x10) != 0 && mode == 1)
            || ((stat & 0x08) != 0 && mode == 0);

        let prev_line = self.stat_irq_line;
        self.stat_irq_line = line;
        if !prev_line && line {
            self.memory[IF_ADDR as usize] |= Interrupts::LCD_STAT.bits();
            log::debug!(
                "GB LCD: STAT IRQ rising edge (STAT=0x{:02X} LY={} mode={} IF=0x{:02X})",
                stat,
                ly,
                mode,
                self.memory[IF_ADDR as usize],
            );
        }
    }
}
