/// SC bit 7: transfer start / in progress.
const SC_TRANSFER: u8 = 0x80;
/// SC bit 0: this side drives the clock.
const SC_INTERNAL_CLOCK: u8 = 0x01;

/// Link port (SB/SC) with nothing plugged in.
///
/// A transfer on the internal clock completes as soon as it is started:
/// SB is appended to `output` (where test ROMs print their results), the
/// start bit drops and the caller raises the serial interrupt. Transfers on
/// an external clock never complete.
#[derive(Debug, Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Store SC. Returns true when the write completed a transfer.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        let start = SC_TRANSFER | SC_INTERNAL_CLOCK;
        if value & start != start {
            self.sc = value;
            return false;
        }
        self.output.push(self.sb);
        self.sc = value & !SC_TRANSFER;
        true
    }

    /// SC as software reads it; bits 1-6 read back as 1.
    #[inline]
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }
}
