pub mod cpm;
pub mod cpu;

pub use cpm::{CpmBus, CpmConfig, CpmMachine};
pub use cpu::{Bus, Cpu};
