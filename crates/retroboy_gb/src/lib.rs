pub mod cpu;
pub mod machine;

pub use cpu::{Bus, Cpu};
pub use machine::{GameBoy, GameBoyBus, GameBoyConfig, RamInit};
