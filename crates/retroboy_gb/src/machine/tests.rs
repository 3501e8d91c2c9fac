use std::cell::RefCell;
use std::rc::Rc;

use super::{timer::Timer, GameBoy, GameBoyBus, GameBoyConfig, RamInit, CYCLES_PER_FRAME};
use crate::cpu::{BootState, Bus, Interrupts, IE_ADDR, IF_ADDR};

/// Bus with zeroed RAM, 32 KiB of NOPs in the ROM window, and IF cleared.
fn quiet_bus() -> GameBoyBus {
    let mut bus = GameBoyBus::new(RamInit::Zeroed);
    bus.load_rom(&[0x00; 0x8000]).expect("32 KiB fits");
    bus.write8(IF_ADDR, 0x00);
    bus
}

fn tick_n(timer: &mut Timer, n: usize, if_reg: &mut u8) {
    for _ in 0..n {
        timer.tick_tcycle(if_reg);
    }
}

#[test]
fn timer_overflow_reloads_after_one_mcycle() {
    let mut t = Timer::new();
    t.tac_write(0x05); // enable, bit 3 (16 T-cycles per increment)
    t.tima = 0xFF;
    t.tma = 0x42;

    let mut if_reg = 0u8;
    tick_n(&mut t, 16, &mut if_reg);
    assert_eq!(t.tima, 0x00);
    assert!(t.overflow_pending());
    assert_eq!(if_reg, 0);

    tick_n(&mut t, 3, &mut if_reg);
    assert_eq!(t.tima, 0x00);
    assert_eq!(if_reg, 0);

    tick_n(&mut t, 1, &mut if_reg);
    assert_eq!(t.tima, 0x42);
    assert!(!t.overflow_pending());
    assert_eq!(if_reg, Interrupts::TIMER.bits());
}

#[test]
fn timer_tima_write_cancels_pending_reload() {
    let mut t = Timer::new();
    t.tac_write(0x05);
    t.tima = 0xFF;
    t.tma = 0x42;

    let mut if_reg = 0u8;
    tick_n(&mut t, 16, &mut if_reg);
    assert!(t.overflow_pending());

    t.tima_write(0x10);
    tick_n(&mut t, 8, &mut if_reg);
    assert_eq!(t.tima, 0x10);
    assert_eq!(if_reg, 0);
}

#[test]
fn timer_tma_write_during_reload_window_is_used() {
    let mut t = Timer::new();
    t.tac_write(0x05);
    t.tima = 0xFF;
    t.tma = 0x42;

    let mut if_reg = 0u8;
    tick_n(&mut t, 17, &mut if_reg);
    t.tma_write(0x99);
    tick_n(&mut t, 3, &mut if_reg);
    assert_eq!(t.tima, 0x99);
}

#[test]
fn timer_tac_disable_with_high_input_bit_increments_tima() {
    let mut t = Timer::new();
    t.tac_write(0x05);
    t.internal_counter = 0x0008; // bit 3 high
    t.tac_write(0x00);
    assert_eq!(t.tima, 0x01);

    // Same write with the bit low: no glitch.
    let mut t = Timer::new();
    t.tac_write(0x05);
    t.internal_counter = 0x0000;
    t.tac_write(0x00);
    assert_eq!(t.tima, 0x00);
}

#[test]
fn timer_div_write_with_high_input_bit_increments_tima() {
    let mut t = Timer::new();
    t.tac_write(0x05);
    t.internal_counter = 0x1238; // bit 3 high
    t.div_write();
    assert_eq!(t.internal_counter, 0);
    assert_eq!(t.tima, 0x01);
}

#[test]
fn div_reads_post_boot_value_and_resets_on_write() {
    let mut bus = quiet_bus();
    assert_eq!(bus.read8(0xFF04), 0xAB);

    bus.tick(256 * 3);
    assert_eq!(bus.read8(0xFF04), 0xAE);

    bus.write8(0xFF04, 0x55);
    assert_eq!(bus.read8(0xFF04), 0x00);
    bus.tick(255);
    assert_eq!(bus.read8(0xFF04), 0x00);
    bus.tick(1);
    assert_eq!(bus.read8(0xFF04), 0x01);
}

#[test]
fn timer_registers_are_visible_through_index() {
    let mut bus = quiet_bus();
    bus.write8(0xFF04, 0x00);
    bus.write8(0xFF06, 0x20);
    bus.write8(0xFF07, 0x05);

    bus.tick(16 * 3);
    assert_eq!(bus[0xFF05], 3);
    assert_eq!(bus[0xFF06], 0x20);
    assert_eq!(bus[0xFF07], 0xFD);
}

#[test]
fn bus_timer_overflow_sets_if() {
    let mut bus = quiet_bus();
    bus.write8(0xFF04, 0x00);
    bus.write8(0xFF05, 0xFE);
    bus.write8(0xFF07, 0x05);

    bus.tick(32);
    assert_eq!(bus[0xFF05], 0x00);
    assert_eq!(bus[IF_ADDR] & Interrupts::TIMER.bits(), 0);

    bus.tick(4);
    assert_ne!(bus[IF_ADDR] & Interrupts::TIMER.bits(), 0);
}

#[test]
fn serial_transfer_captures_byte_and_requests_interrupt() {
    let mut bus = quiet_bus();
    bus.write8(0xFF01, b'O');
    bus.write8(0xFF02, 0x81);
    bus.write8(0xFF01, b'K');
    bus.write8(0xFF02, 0x81);

    assert_eq!(bus.serial_output(), b"OK");
    assert_ne!(bus[IF_ADDR] & Interrupts::SERIAL.bits(), 0);
    // Transfer finished: start bit cleared, unused bits read as 1.
    assert_eq!(bus.read8(0xFF02), 0x7F);
}

#[test]
fn serial_external_clock_does_not_transfer() {
    let mut bus = quiet_bus();
    bus.write8(0xFF01, b'X');
    bus.write8(0xFF02, 0x80);
    assert!(bus.serial_output().is_empty());
    assert_eq!(bus[IF_ADDR] & Interrupts::SERIAL.bits(), 0);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut bus = quiet_bus();
    for i in 0..0xA0u16 {
        bus.write8(0xC100 + i, i as u8 ^ 0x5A);
    }
    bus.write8(0xFF46, 0xC1);

    for i in 0..0xA0u16 {
        assert_eq!(bus[0xFE00 + i], i as u8 ^ 0x5A, "OAM byte {i}");
    }
    assert_eq!(bus[0xFF46], 0xC1);
}

#[test]
fn echo_ram_mirrors_wram_both_ways() {
    let mut bus = quiet_bus();
    bus.write8(0xC123, 0x5A);
    assert_eq!(bus.read8(0xE123), 0x5A);

    bus.write8(0xFDFF, 0x11);
    assert_eq!(bus.read8(0xDDFF), 0x11);

    // 0xDE00.. has no echo.
    bus.write8(0xDE00, 0x22);
    assert_eq!(bus.read8(0xFE00), 0x00);
}

#[test]
fn rom_area_is_write_protected() {
    let mut bus = GameBoyBus::new(RamInit::Zeroed);
    bus.load_rom(&[0x12; 0x100]).expect("small ROM fits");
    bus.write8(0x0050, 0x99);
    bus.write8(0x2000, 0x01);
    assert_eq!(bus[0x0050], 0x12);
    // Unused ROM space reads as open bus.
    assert_eq!(bus[0x2000], 0xFF);
}

#[test]
fn load_rom_rejects_images_larger_than_rom_window() {
    let mut bus = GameBoyBus::new(RamInit::Zeroed);
    let err = bus.load_rom(&[0x00; 0x10000]).unwrap_err();
    assert!(err.to_string().contains("65536"));

    let mut gb = GameBoy::new();
    assert!(gb.load_rom(&[0x00; 0x8001]).is_err());
    assert!(gb.load_rom(&[0x00; 0x8000]).is_ok());
}

#[test]
fn joypad_reads_all_buttons_released() {
    let mut bus = quiet_bus();
    assert_eq!(bus.read8(0xFF00), 0xCF);
    bus.write8(0xFF00, 0x20);
    assert_eq!(bus.read8(0xFF00), 0xEF);
    bus.write8(0xFF00, 0x10);
    assert_eq!(bus.read8(0xFF00), 0xDF);
}

#[test]
fn if_upper_bits_read_as_one() {
    let mut bus = quiet_bus();
    assert_eq!(bus.read8(IF_ADDR), 0xE0);
    bus.write8(IF_ADDR, 0x01);
    assert_eq!(bus.read8(IF_ADDR), 0xE1);

    bus.request_interrupt(Interrupts::JOYPAD);
    assert_eq!(bus.read8(IF_ADDR), 0xF1);
}

#[test]
fn io_write_hooks_see_io_page_and_ie_writes() {
    let mut bus = quiet_bus();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.on_io_write(move |addr, value| sink.borrow_mut().push((addr, value)));

    bus.write8(0xFF42, 0x01);
    bus.write8(0xC000, 0x02);
    bus.write8(0xFF80, 0x03);
    bus.write8(IE_ADDR, 0x04);
    bus.write8(0xFF04, 0x05);

    assert_eq!(
        *seen.borrow(),
        vec![(0xFF42, 0x01), (IE_ADDR, 0x04), (0xFF04, 0x05)]
    );
    // The DIV reset already happened when the hook ran.
    assert_eq!(bus[0xFF04], 0x00);
}

#[test]
fn ly_advances_per_scanline_and_vblank_fires_at_144() {
    let mut bus = quiet_bus();
    assert_eq!(bus[0xFF44], 0);

    bus.tick(456);
    assert_eq!(bus[0xFF44], 1);

    bus.tick(456 * 142);
    assert_eq!(bus[0xFF44], 143);
    assert_eq!(bus[IF_ADDR] & Interrupts::VBLANK.bits(), 0);
    assert_eq!(bus.frame_count(), 0);

    bus.tick(456);
    assert_eq!(bus[0xFF44], 144);
    assert_ne!(bus[IF_ADDR] & Interrupts::VBLANK.bits(), 0);
    assert_eq!(bus[0xFF41] & 0x03, 1);
    assert_eq!(bus.frame_count(), 1);

    bus.tick(456 * 10);
    assert_eq!(bus[0xFF44], 0);
}

#[test]
fn stat_mode_follows_line_position() {
    let mut bus = quiet_bus();
    bus.tick(1);
    assert_eq!(bus[0xFF41] & 0x03, 2);
    bus.tick(80);
    assert_eq!(bus[0xFF41] & 0x03, 3);
    bus.tick(172);
    assert_eq!(bus[0xFF41] & 0x03, 0);
    bus.tick(456 - 253);
    assert_eq!(bus[0xFF41] & 0x03, 2);
    assert_eq!(bus[0xFF41] & 0x80, 0x80);
}

#[test]
fn lyc_match_raises_stat_interrupt_once() {
    let mut bus = quiet_bus();
    bus.write8(0xFF45, 2);
    bus.write8(0xFF41, 0x40);
    assert_eq!(bus[IF_ADDR] & Interrupts::LCD_STAT.bits(), 0);

    bus.tick(456 * 2);
    assert_eq!(bus[0xFF44], 2);
    assert_ne!(bus[0xFF41] & 0x04, 0);
    assert_ne!(bus[IF_ADDR] & Interrupts::LCD_STAT.bits(), 0);

    // The line stays high for the rest of LY=2: no second edge.
    bus.write8(IF_ADDR, 0x00);
    bus.tick(100);
    assert_eq!(bus[IF_ADDR] & Interrupts::LCD_STAT.bits(), 0);
}

#[test]
fn stat_writes_keep_read_only_bits() {
    let mut bus = quiet_bus();
    bus.tick(100); // mode 3
    bus.write8(0xFF41, 0xFF);
    assert_eq!(bus[0xFF41] & 0x78, 0x78);
    assert_eq!(bus[0xFF41] & 0x03, 3);

    // LY cannot be written.
    bus.write8(0xFF44, 0x55);
    assert_eq!(bus[0xFF44], 0);
}

#[test]
fn lcd_off_resets_ly_and_freezes_timing() {
    let mut bus = quiet_bus();
    bus.tick(456 * 5);
    assert_eq!(bus[0xFF44], 5);

    bus.write8(0xFF40, 0x11);
    assert_eq!(bus[0xFF44], 0);
    assert_eq!(bus[0xFF41] & 0x03, 0);

    bus.tick(456 * 3);
    assert_eq!(bus[0xFF44], 0);

    bus.write8(0xFF40, 0x91);
    bus.tick(456);
    assert_eq!(bus[0xFF44], 1);
}

#[test]
fn seeded_ram_is_reproducible_and_mirrored() {
    let a = GameBoyBus::new(RamInit::Random { seed: 7 });
    let b = GameBoyBus::new(RamInit::Random { seed: 7 });
    let c = GameBoyBus::new(RamInit::Random { seed: 8 });

    assert_eq!(a.memory[0xC000..0xE000], b.memory[0xC000..0xE000]);
    assert_eq!(a.memory[0xFF80..0xFFFF], b.memory[0xFF80..0xFFFF]);
    assert_ne!(a.memory[0xC000..0xE000], c.memory[0xC000..0xE000]);
    assert_eq!(a.memory[0xE000..0xFE00], a.memory[0xC000..0xDE00]);

    let zeroed = GameBoyBus::new(RamInit::Zeroed);
    assert!(zeroed.memory[0xC000..0xE000].iter().all(|&b| b == 0));
}

#[test]
fn post_boot_io_defaults() {
    let bus = GameBoyBus::new(RamInit::Zeroed);
    assert_eq!(bus[IF_ADDR], 0xE1);
    assert_eq!(bus[IE_ADDR], 0x00);
    assert_eq!(bus[0xFF40], 0x91);
    assert_eq!(bus[0xFF47], 0xFC);
    assert_eq!(bus[0xFF26], 0xF1);
    assert_eq!(bus[0xFF07], 0xF8);
}

#[test]
fn config_builder_selects_boot_state_and_trace() {
    let config = GameBoyConfig::builder()
        .boot_state(BootState::Zeroed)
        .ram_init(RamInit::Zeroed)
        .trace(true)
        .trace_limit(4)
        .build();
    let mut gb = GameBoy::with_config(config);
    gb.load_rom(&[0x00; 0x10]).expect("small ROM fits");
    assert_eq!(gb.cpu.regs.pc, 0x0000);

    for _ in 0..6 {
        gb.step();
    }
    assert_eq!(gb.trace().len(), 4);
    assert_eq!(gb.trace().dropped(), 2);
    assert_eq!(gb.trace().entries()[0].address, 0x0000);
    assert_eq!(gb.trace().entries()[0].mnemonic, "NOP");

    let default = GameBoy::new();
    assert_eq!(default.cpu.regs.pc, 0x0100);
    assert!(default.trace().is_empty());
}

#[test]
fn halted_cpu_is_woken_by_timer_interrupt() {
    let mut rom = vec![0x00; 0x200];
    let program = [
        0x3E, 0x05, // LD A,$05
        0xE0, 0x07, // LDH ($07),A   ; TAC: enable, 16 T-cycles
        0x3E, 0x04, // LD A,$04
        0xE0, 0xFF, // LDH ($FF),A   ; IE = timer
        0xAF, // XOR A
        0xE0, 0x0F, // LDH ($0F),A   ; clear IF
        0xFB, // EI
        0x76, // HALT
        0x00, // NOP
    ];
    rom[0x100..0x100 + program.len()].copy_from_slice(&program);

    let mut gb = GameBoy::with_config(GameBoyConfig::builder().ram_init(RamInit::Zeroed).build());
    gb.load_rom(&rom).expect("small ROM fits");

    let mut serviced = false;
    for _ in 0..20_000 {
        gb.step();
        if gb.cpu.regs.pc == 0x0050 {
            serviced = true;
            break;
        }
    }
    assert!(serviced, "timer interrupt never dispatched");
    assert!(!gb.cpu.halted);
    assert!(!gb.cpu.ime);
    assert_eq!(gb.bus[IF_ADDR] & Interrupts::TIMER.bits(), 0);
    // Return address is the instruction after HALT.
    assert_eq!(gb.bus[gb.cpu.regs.sp], 0x0D);
    assert_eq!(gb.bus[gb.cpu.regs.sp.wrapping_add(1)], 0x01);
}

#[test]
fn step_frame_runs_one_frame_of_cycles() {
    let mut gb = GameBoy::with_config(GameBoyConfig::builder().ram_init(RamInit::Zeroed).build());
    gb.load_rom(&[0x00; 0x8000]).expect("32 KiB fits");

    let first = gb.step_frame();
    assert!(first >= u64::from(CYCLES_PER_FRAME));
    assert!(first < u64::from(CYCLES_PER_FRAME) + 24);
    assert_eq!(gb.bus.frame_count(), 1);

    let second = gb.step_frame();
    assert_eq!(gb.total_cycles(), first + second);
    // Overshoot is paid back, so two frames stay close to two frame lengths.
    assert!(gb.total_cycles() < 2 * u64::from(CYCLES_PER_FRAME) + 24);
    assert_eq!(gb.bus.frame_count(), 2);
}

#[test]
fn stop_freezes_divider() {
    let mut rom = vec![0x00; 0x200];
    rom[0x100] = 0x10; // STOP
    rom[0x101] = 0x00;
    let mut gb = GameBoy::with_config(GameBoyConfig::builder().ram_init(RamInit::Zeroed).build());
    gb.load_rom(&rom).expect("small ROM fits");

    gb.step();
    assert!(gb.cpu.is_stopped());
    let div = gb.bus[0xFF04];
    for _ in 0..1000 {
        gb.step();
    }
    assert!(gb.cpu.is_stopped());
    assert_eq!(gb.bus[0xFF04], div);
}

#[test]
fn reset_keeps_rom_and_restores_boot_state() {
    let mut rom = vec![0x00; 0x200];
    rom[0x100] = 0x3C; // INC A
    let mut gb = GameBoy::new();
    gb.load_rom(&rom).expect("small ROM fits");
    gb.step();
    assert_eq!(gb.cpu.regs.a, 0x02);

    gb.reset();
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.total_cycles(), 0);
    gb.step();
    assert_eq!(gb.cpu.regs.a, 0x02);
}
