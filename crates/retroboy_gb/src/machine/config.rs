use typed_builder::TypedBuilder;

use crate::cpu::BootState;

/// Seed used for WRAM/HRAM power-on noise unless configured otherwise.
pub const DEFAULT_RAM_SEED: u64 = 0xC0DE_1234;

/// Power-on contents of WRAM (`0xC000..=0xDFFF`) and HRAM (`0xFF80..=0xFFFE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RamInit {
    Zeroed,
    /// Seeded pseudo-random bytes, so software cannot rely on a pattern
    /// while runs stay reproducible.
    Random { seed: u64 },
}

impl Default for RamInit {
    fn default() -> Self {
        RamInit::Random {
            seed: DEFAULT_RAM_SEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default)]
    pub boot_state: BootState,
    #[builder(default)]
    pub ram_init: RamInit,
    /// Record every executed instruction into the machine's trace log.
    #[builder(default)]
    pub trace: bool,
    /// Stop recording after this many entries.
    #[builder(default, setter(strip_option))]
    pub trace_limit: Option<usize>,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
