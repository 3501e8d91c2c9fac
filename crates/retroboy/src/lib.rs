use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use retroboy_common::TraceEntry;
use retroboy_gb::{GameBoy, GameBoyConfig};
use retroboy_z80::{CpmConfig, CpmMachine};
use typed_builder::TypedBuilder;

/// Frames a Game Boy run lasts when no step budget is given.
pub const DEFAULT_FRAMES: u32 = 600;
/// Step budget of a Z80 run when none is given.
pub const DEFAULT_Z80_STEPS: u64 = 20_000_000_000;
/// Trace entries kept when tracing is on.
pub const TRACE_LIMIT: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum System {
    GameBoy,
    Z80,
}

impl FromStr for System {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gb" | "GB" | "gameboy" | "game-boy" => Ok(System::GameBoy),
            "z80" | "Z80" | "cpm" => Ok(System::Z80),
            other => bail!("unknown system '{other}'. Supported: gb, z80"),
        }
    }
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunConfig {
    pub system: System,
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    /// Stop after this many CPU steps.
    #[builder(default, setter(strip_option))]
    pub max_steps: Option<u64>,
    /// Record executed instructions.
    #[builder(default)]
    pub trace: bool,
    /// Game Boy frames to run when `max_steps` is not set.
    #[builder(default = DEFAULT_FRAMES)]
    pub frames: u32,
}

/// What a run produced.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    /// Serial (GB) or console (CP/M) output.
    pub output: Vec<u8>,
    pub steps: u64,
    pub cycles: u64,
    /// The CP/M program returned to the system. Always false for GB runs.
    pub finished: bool,
    pub trace: Vec<TraceEntry>,
}

pub const USAGE: &str = "usage: retroboy <gb|z80> <rom> [--steps N] [--frames N] [--trace]";

/// Parse command-line arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<RunConfig>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let system: System = args.next().ok_or_else(|| anyhow!(USAGE))?.parse()?;
    let rom_path = args.next().ok_or_else(|| anyhow!(USAGE))?;

    let mut max_steps = None;
    let mut frames = DEFAULT_FRAMES;
    let mut trace = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--steps" => {
                let value = args.next().context("--steps needs a value")?;
                let steps = value
                    .parse()
                    .with_context(|| format!("invalid step count '{value}'"))?;
                max_steps = Some(steps);
            }
            "--frames" => {
                let value = args.next().context("--frames needs a value")?;
                frames = value.parse().with_context(|| format!("invalid frame count '{value}'"))?;
            }
            "--trace" => trace = true,
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    Ok(RunConfig {
        system,
        rom_path: PathBuf::from(rom_path),
        max_steps,
        trace,
        frames,
    })
}

/// Load the configured ROM from disk and run it.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", config.rom_path.display()))?;
    log::info!("Running ROM path: '{}'", config.rom_path.display());
    run_rom(config, &rom)
}

/// Run an in-memory ROM image under `config`.
pub fn run_rom(config: &RunConfig, rom: &[u8]) -> Result<RunReport> {
    match config.system {
        System::GameBoy => run_gameboy(config, rom),
        System::Z80 => run_z80(config, rom),
    }
}

fn run_gameboy(config: &RunConfig, rom: &[u8]) -> Result<RunReport> {
    let gb_config = GameBoyConfig::builder()
        .trace(config.trace)
        .trace_limit(TRACE_LIMIT)
        .build();
    let mut gb = GameBoy::with_config(gb_config);
    gb.load_rom(rom).context("failed to load Game Boy ROM")?;

    let mut steps = 0u64;
    match config.max_steps {
        Some(max_steps) => {
            while steps < max_steps {
                gb.step();
                steps += 1;
            }
        }
        None => {
            for _ in 0..config.frames {
                gb.step_frame();
            }
        }
    }
    log::info!("GB: ran {} T-cycles", gb.total_cycles());

    Ok(RunReport {
        output: gb.serial_output().to_vec(),
        steps,
        cycles: gb.total_cycles(),
        finished: false,
        trace: gb.trace().entries().to_vec(),
    })
}

fn run_z80(config: &RunConfig, rom: &[u8]) -> Result<RunReport> {
    let cpm_config = CpmConfig::builder()
        .trace(config.trace)
        .trace_limit(TRACE_LIMIT)
        .build();
    let mut machine = CpmMachine::with_config(cpm_config);
    machine.load_com(rom).context("failed to load CP/M program")?;

    let max_steps = config.max_steps.unwrap_or(DEFAULT_Z80_STEPS);
    let mut steps = 0u64;
    while !machine.is_finished() && steps < max_steps {
        machine.step();
        steps += 1;
    }
    if !machine.is_finished() {
        log::warn!("Z80: stopped after {steps} steps without returning to CP/M");
    }

    Ok(RunReport {
        output: machine.console_output().to_vec(),
        steps,
        cycles: machine.total_cycles(),
        finished: machine.is_finished(),
        trace: machine.trace().entries().to_vec(),
    })
}
