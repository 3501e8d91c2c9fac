use retroboy_common::TraceLog;

use super::*;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

impl TestBus {
    fn with_program(program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.memory[..program.len()].copy_from_slice(program);
        bus
    }
}

/// CPU with every register cleared and PC at 0.
fn zeroed_cpu() -> Cpu {
    Cpu::with_boot_state(BootState::Zeroed)
}

// blargg's individual cpu_instrs ROMs (ROM-only, 32 KiB each).
const CPU_INSTRS_ROMS: &[&str] = &[
    "01-special.gb",
    "02-interrupts.gb",
    "03-op sp,hl.gb",
    "04-op r,imm.gb",
    "05-op rp.gb",
    "06-ld r,r.gb",
    "07-jr,jp,call,ret,rst.gb",
    "08-misc instrs.gb",
    "09-op r,r.gb",
    "10-bit ops.gb",
    "11-op a,(hl).gb",
];

fn load_cpu_instrs_rom(name: &str) -> Vec<u8> {
    use std::path::PathBuf;

    // Support both workspace-root and crate-relative layouts so that the
    // test continues to work when run from different working directories.
    let candidates = [
        PathBuf::from("assets/roms/gb_tests/blargg/cpu_instrs/individual").join(name),
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/roms/gb_tests/blargg/cpu_instrs/individual")
            .join(name),
    ];

    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            return data;
        }
    }

    panic!("{name} not found. Tried: {:?}", candidates)
}

#[test]
fn dmg_boot_state_matches_post_boot_registers() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
}

#[test]
fn reset_restores_boot_state() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.memory[0x0100] = 0xD3; // invalid
    cpu.step(&mut bus);
    cpu.regs.a = 0x77;
    cpu.halted = true;

    cpu.reset();
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(!cpu.halted);
    assert_eq!(cpu.invalid_opcode_count(), 0);
}

#[test]
fn nop_advances_pc() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    // 0x00: NOP
    bus.memory[0x0000] = 0x00;

    cpu.regs.pc = 0x0000;
    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cycles, 4);
}

#[test]
fn ld_bc_d16_loads_little_endian_immediate() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LD BC, 0x1234
    let mut bus = TestBus::with_program(&[0x01, 0x34, 0x12]);

    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.b, 0x12);
    assert_eq!(cpu.regs.c, 0x34);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn register_pairs_compose_big_endian() {
    let mut regs = Registers::default();
    regs.set_de(0xBEEF);
    assert_eq!((regs.d, regs.e), (0xBE, 0xEF));

    regs.h = 0x12;
    regs.l = 0x34;
    assert_eq!(regs.hl(), 0x1234);

    // The low nibble of F never survives a pair write.
    regs.set_af(0x12FF);
    assert_eq!(regs.f, 0xF0);
    assert_eq!(regs.get16(Reg16::AF), 0x12F0);
}

#[test]
fn ld_r_r_and_hl_inc_dec_forms_work() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LD B, A
    // 0x0001: LD (HL+), A
    // 0x0002: LD (HL-), A
    // 0x0003: LD A, (HL)
    let mut bus = TestBus::with_program(&[0x47, 0x22, 0x32, 0x7E]);
    cpu.regs.a = 0x5A;
    cpu.regs.set_hl(0xC000);

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.b, 0x5A);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(bus.memory[0xC000], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(bus.memory[0xC001], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC000);

    bus.memory[0xC000] = 0x99;
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x99);
}

#[test]
fn ldh_and_absolute_loads() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LDH (0x80), A
    // 0x0002: LD (0xC123), A
    // 0x0005: LD (C), A
    // 0x0006: LD A, (0xC123)
    let mut bus = TestBus::with_program(&[0xE0, 0x80, 0xEA, 0x23, 0xC1, 0xE2, 0xFA, 0x23, 0xC1]);
    cpu.regs.a = 0x3C;
    cpu.regs.c = 0x81;

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x3C);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC123], 0x3C);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(bus.memory[0xFF81], 0x3C);

    cpu.regs.a = 0;
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.a, 0x3C);
}

#[test]
fn ld_a16_sp_stores_low_byte_first() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LD (0xC000), SP
    let mut bus = TestBus::with_program(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xABCD;

    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xCD);
    assert_eq!(bus.memory[0xC001], 0xAB);
}

#[test]
fn inc_b_sets_half_carry_and_keeps_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: INC B
    let mut bus = TestBus::with_program(&[0x04]);
    cpu.regs.b = 0x0F;
    cpu.regs.f = 0;

    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.b, 0x10);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::Z), false);
    assert_eq!(cpu.get_flag(Flag::N), false);
    assert_eq!(cpu.get_flag(Flag::C), false);
}

#[test]
fn inc_then_dec_round_trips_and_never_touches_carry() {
    for value in 0..=0xFFu8 {
        for carry in [false, true] {
            let mut cpu = zeroed_cpu();
            // 0x0000: INC A
            // 0x0001: DEC A
            let mut bus = TestBus::with_program(&[0x3C, 0x3D]);
            cpu.regs.a = value;
            cpu.set_flag(Flag::C, carry);

            cpu.step(&mut bus);
            assert_eq!(cpu.regs.a, value.wrapping_add(1));
            assert_eq!(cpu.get_flag(Flag::C), carry);
            assert_eq!(cpu.get_flag(Flag::Z), value == 0xFF);

            cpu.step(&mut bus);
            assert_eq!(cpu.regs.a, value);
            assert_eq!(cpu.get_flag(Flag::C), carry);
            assert_eq!(cpu.get_flag(Flag::N), true);
        }
    }
}

#[test]
fn inc_dec_on_hl_memory() {
    let mut cpu = zeroed_cpu();
    // 0x0000: INC (HL)
    // 0x0001: DEC (HL)
    // 0x0002: DEC (HL)
    let mut bus = TestBus::with_program(&[0x34, 0x35, 0x35]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x00;

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x01);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), true);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0xFF);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::Z), false);
}

#[test]
fn inc_dec_16bit_leave_flags_alone() {
    let mut cpu = zeroed_cpu();
    // 0x0000: INC BC
    // 0x0001: DEC DE
    // 0x0002: INC SP
    let mut bus = TestBus::with_program(&[0x03, 0x1B, 0x33]);
    cpu.regs.set_bc(0xFFFF);
    cpu.regs.set_de(0x0000);
    cpu.regs.sp = 0x1000;
    cpu.regs.f = 0xF0;

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.sp, 0x1001);
    assert_eq!(cpu.regs.f, 0xF0);
}

#[test]
fn add_hl_rr_keeps_zero_and_sets_bit11_half_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: ADD HL, BC
    // 0x0001: ADD HL, HL
    let mut bus = TestBus::with_program(&[0x09, 0x29]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), false);
    assert_eq!(cpu.get_flag(Flag::Z), true);

    cpu.regs.set_hl(0x8000);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::H), false);
    assert_eq!(cpu.get_flag(Flag::Z), true);
}

#[test]
fn add_sp_r8_signed_and_flags() {
    let mut cpu = zeroed_cpu();
    // 0x0000: ADD SP, -1
    let mut bus = TestBus::with_program(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0001;
    cpu.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    // Low-byte carries: 0x01 + 0xFF.
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::Z), false);
    assert_eq!(cpu.get_flag(Flag::N), false);
}

#[test]
fn ld_hl_sp_plus_r8_and_ld_sp_hl() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LD HL, SP+2
    // 0x0002: LD SP, HL
    let mut bus = TestBus::with_program(&[0xF8, 0x02, 0xF9]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xFFFA);
    assert_eq!(cpu.get_flag(Flag::H), false);
    assert_eq!(cpu.get_flag(Flag::C), false);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.sp, 0xFFFA);
}

#[test]
fn add_then_sub_restores_accumulator() {
    // 0x0000: ADD A, B
    // 0x0001: SUB B
    let mut bus = TestBus::with_program(&[0x80, 0x90]);
    for a in 0..=0xFFu8 {
        for b in 0..=0xFFu8 {
            let mut cpu = zeroed_cpu();
            cpu.regs.a = a;
            cpu.regs.b = b;

            cpu.step(&mut bus);
            assert_eq!(cpu.get_flag(Flag::C), (a as u16 + b as u16) > 0xFF);
            cpu.step(&mut bus);
            assert_eq!(cpu.regs.a, a, "ADD/SUB {a:#04x},{b:#04x}");
            assert_eq!(cpu.get_flag(Flag::N), true);
        }
    }
}

#[test]
fn logic_ops_with_self_are_identity_or_zero() {
    // 0x0000: AND A
    // 0x0001: OR A
    // 0x0002: XOR A
    let mut bus = TestBus::with_program(&[0xA7, 0xB7, 0xAF]);
    for value in 0..=0xFFu8 {
        let mut cpu = zeroed_cpu();
        cpu.regs.a = value;

        cpu.step(&mut bus);
        assert_eq!(cpu.regs.a, value);
        assert_eq!(cpu.get_flag(Flag::Z), value == 0);
        assert_eq!(cpu.get_flag(Flag::H), true);
        cpu.step(&mut bus);
        assert_eq!(cpu.regs.a, value);
        assert_eq!(cpu.get_flag(Flag::H), false);
        cpu.step(&mut bus);
        assert_eq!(cpu.regs.a, 0);
        assert_eq!(cpu.regs.f, Flag::Z.mask());
    }
}

#[test]
fn add_register_sets_half_carry_and_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: ADD A, B
    // 0x0001: ADC A, B
    let mut bus = TestBus::with_program(&[0x80, 0x88]);
    cpu.regs.a = 0xF8;
    cpu.regs.b = 0x08;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), true);

    // 0x00 + 0x08 + carry
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a, 0x09);
    assert_eq!(cpu.get_flag(Flag::C), false);
    assert_eq!(cpu.get_flag(Flag::H), false);
}

#[test]
fn sub_and_sbc_use_bit4_borrow_for_half_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: SUB 0x01
    // 0x0002: SBC A, 0x00
    let mut bus = TestBus::with_program(&[0xD6, 0x01, 0xDE, 0x00]);
    cpu.regs.a = 0x10;

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), false);
    assert_eq!(cpu.get_flag(Flag::N), true);

    cpu.regs.a = 0x00;
    cpu.set_flag(Flag::C, true);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::Z), false);
}

#[test]
fn cp_only_updates_flags() {
    let mut cpu = zeroed_cpu();
    // 0x0000: CP 0x42
    // 0x0002: CP 0x50
    // 0x0004: CP 0x43
    let mut bus = TestBus::with_program(&[0xFE, 0x42, 0xFE, 0x50, 0xFE, 0x43]);
    cpu.regs.a = 0x42;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::N), true);
    assert_eq!(cpu.get_flag(Flag::C), false);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.get_flag(Flag::Z), false);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::H), false);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::H), true);
}

#[test]
fn logical_ops_with_self() {
    let mut cpu = zeroed_cpu();
    // 0x0000: AND A
    // 0x0001: OR A
    // 0x0002: XOR A
    let mut bus = TestBus::with_program(&[0xA7, 0xB7, 0xAF]);
    cpu.regs.a = 0x5A;
    cpu.set_flag(Flag::C, true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::C), false);
    assert_eq!(cpu.get_flag(Flag::Z), false);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.get_flag(Flag::H), false);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.regs.f, Flag::Z.mask());
}

#[test]
fn rlca_moves_bit7_into_carry_and_bit0() {
    let mut cpu = zeroed_cpu();
    // 0x0000: RLCA
    let mut bus = TestBus::with_program(&[0x07]);
    cpu.regs.a = 0b1000_1000;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a, 0b0001_0001);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::Z), false);
}

#[test]
fn rra_rotates_through_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: RRA
    let mut bus = TestBus::with_program(&[0x1F]);
    cpu.regs.set_af(0xCF10);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.af(), 0xE710);
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let mut cpu = zeroed_cpu();
    // 0x0000: RLA
    // 0x0001: RRCA
    let mut bus = TestBus::with_program(&[0x17, 0x0F]);
    cpu.regs.a = 0x80;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), false);
    assert_eq!(cpu.get_flag(Flag::C), true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.get_flag(Flag::C), false);
}

#[test]
fn rlc_eight_times_restores_register() {
    let mut cpu = zeroed_cpu();
    // 8x RLC B
    let program: Vec<u8> = std::iter::repeat([0xCB, 0x00]).take(8).flatten().collect();
    let mut bus = TestBus::with_program(&program);
    let original = 0b1010_0101;
    cpu.regs.b = original;

    let mut value = original;
    for _ in 0..8 {
        assert_eq!(cpu.step(&mut bus), 8);
        assert_eq!(cpu.get_flag(Flag::C), value & 0x80 != 0);
        value = value.rotate_left(1);
        assert_eq!(cpu.regs.b, value);
    }

    assert_eq!(cpu.regs.b, original);
    assert_eq!(cpu.get_flag(Flag::C), original & 0x01 != 0);
}

#[test]
fn cb_shifts_and_swap() {
    let mut cpu = zeroed_cpu();
    // 0x0000: SWAP A
    // 0x0002: SRA B
    // 0x0004: SRL C
    // 0x0006: SLA D
    let mut bus = TestBus::with_program(&[0xCB, 0x37, 0xCB, 0x28, 0xCB, 0x39, 0xCB, 0x22]);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x81;
    cpu.regs.c = 0x01;
    cpu.regs.d = 0x80;
    cpu.set_flag(Flag::C, true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.regs.f, 0x00);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0xC0);
    assert_eq!(cpu.get_flag(Flag::C), true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::C), true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.d, 0x00);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::C), true);
}

#[test]
fn cb_bit_res_set_on_hl() {
    let mut cpu = zeroed_cpu();
    // 0x0000: RLC (HL)
    // 0x0002: BIT 0, (HL)
    // 0x0004: RES 0, (HL)
    // 0x0006: SET 7, (HL)
    let mut bus = TestBus::with_program(&[0xCB, 0x06, 0xCB, 0x46, 0xCB, 0x86, 0xCB, 0xFE]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.get_flag(Flag::Z), false);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x00);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x80);
}

#[test]
fn bit_preserves_carry() {
    let mut cpu = zeroed_cpu();
    // 0x0000: BIT 7, A
    // 0x0002: BIT 0, A
    let mut bus = TestBus::with_program(&[0xCB, 0x7F, 0xCB, 0x47]);
    cpu.regs.a = 0x80;
    cpu.set_flag(Flag::C, true);
    cpu.set_flag(Flag::N, true);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.get_flag(Flag::Z), false);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::N), false);
    assert_eq!(cpu.get_flag(Flag::C), true);

    cpu.step(&mut bus);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::C), true);
}

#[test]
fn daa_after_addition_and_subtraction() {
    let mut cpu = zeroed_cpu();
    // 0x0000: ADD A, 0x27
    // 0x0002: DAA
    let mut bus = TestBus::with_program(&[0xC6, 0x27, 0x27]);
    cpu.regs.a = 0x15;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x3C);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.get_flag(Flag::C), false);

    // 99 + 01 = 100: wraps to 00 with carry.
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xC6, 0x01, 0x27]);
    cpu.regs.a = 0x99;
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::Z), true);
    assert_eq!(cpu.get_flag(Flag::H), false);

    // 10 - 01 = 09.
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xD6, 0x01, 0x27]);
    cpu.regs.a = 0x10;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x0F);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x09);
    assert_eq!(cpu.get_flag(Flag::N), true);
    assert_eq!(cpu.get_flag(Flag::C), false);
}

#[test]
fn cpl_scf_ccf_behaviour() {
    let mut cpu = zeroed_cpu();
    // 0x0000: CPL
    // 0x0001: SCF
    // 0x0002: CCF
    let mut bus = TestBus::with_program(&[0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x42;
    cpu.set_flag(Flag::Z, true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, !0x42);
    assert_eq!(cpu.get_flag(Flag::H), true);
    assert_eq!(cpu.get_flag(Flag::N), true);
    assert_eq!(cpu.get_flag(Flag::Z), true);

    cpu.step(&mut bus);
    assert_eq!(cpu.get_flag(Flag::C), true);
    assert_eq!(cpu.get_flag(Flag::H), false);
    assert_eq!(cpu.get_flag(Flag::N), false);

    cpu.step(&mut bus);
    assert_eq!(cpu.get_flag(Flag::C), false);
    assert_eq!(cpu.get_flag(Flag::H), false);
    assert_eq!(cpu.get_flag(Flag::Z), true);
}

#[test]
fn jp_absolute_and_jp_hl() {
    let mut cpu = zeroed_cpu();
    // 0x0000: JP 0x1234
    let mut bus = TestBus::with_program(&[0xC3, 0x34, 0x12]);
    // 0x1234: JP (HL)
    bus.memory[0x1234] = 0xE9;
    cpu.regs.set_hl(0x4000);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x4000);
}

#[test]
fn jr_relative_forward_and_backward() {
    let mut cpu = zeroed_cpu();
    // 0x0000: JR +5
    let mut bus = TestBus::with_program(&[0x18, 0x05]);
    // 0x0007: JR -2 (jumps to itself)
    bus.memory[0x0007] = 0x18;
    bus.memory[0x0008] = 0xFE;

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0007);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0007);
}

#[test]
fn conditional_jumps_charge_delta_only_when_taken() {
    // JR NZ, +4
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0x20, 0x04]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0002);

    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0x20, 0x04]);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0006);

    // JP Z, 0x2000
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xCA, 0x00, 0x20]);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0003);

    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xCA, 0x00, 0x20]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x2000);
}

#[test]
fn conditional_call_and_ret_charge_delta_only_when_taken() {
    // CALL NC, 0x3000
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xD4, 0x00, 0x30]);
    cpu.regs.sp = 0xD000;
    cpu.set_flag(Flag::C, true);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xD000);

    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::with_program(&[0xD4, 0x00, 0x30]);
    // 0x3000: RET C (untaken), RET NC (taken)
    bus.memory[0x3000] = 0xD8;
    bus.memory[0x3001] = 0xD0;
    cpu.regs.sp = 0xD000;
    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x3000);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFF], 0x00);
    assert_eq!(bus.memory[0xCFFE], 0x03);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x3001);

    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn call_and_ret_roundtrip() {
    let mut cpu = zeroed_cpu();
    // 0x0000: CALL 0x0010
    let mut bus = TestBus::with_program(&[0xCD, 0x10, 0x00]);
    // 0x0010: RET
    bus.memory[0x0010] = 0xC9;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0010);
    // High byte at SP-1, low byte at SP-2.
    assert_eq!(bus.memory[0xFFFD], 0x00);
    assert_eq!(bus.memory[0xFFFC], 0x03);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn push_pop_round_trips_every_pair() {
    let pairs = [
        (Reg16::BC, 0xC5, 0xC1, 0x1234),
        (Reg16::DE, 0xD5, 0xD1, 0xABCD),
        (Reg16::HL, 0xE5, 0xE1, 0x0F0F),
        (Reg16::AF, 0xF5, 0xF1, 0x12F0),
    ];

    for &(reg, push, pop, value) in &pairs {
        let mut cpu = zeroed_cpu();
        let mut bus = TestBus::with_program(&[push, pop]);
        cpu.regs.sp = 0xD000;
        cpu.regs.set16(reg, value);

        assert_eq!(cpu.step(&mut bus), 16);
        assert_eq!(cpu.regs.sp, 0xCFFE);
        assert_eq!(bus.memory[0xCFFF], (value >> 8) as u8);
        assert_eq!(bus.memory[0xCFFE], value as u8);

        cpu.regs.set16(reg, 0);
        assert_eq!(cpu.step(&mut bus), 12);
        assert_eq!(cpu.regs.get16(reg), value, "{reg}");
        assert_eq!(cpu.regs.sp, 0xD000);
    }
}

#[test]
fn pop_af_masks_low_flag_bits() {
    let mut cpu = zeroed_cpu();
    // 0x0000: POP AF
    let mut bus = TestBus::with_program(&[0xF1]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xD000] = 0xFF;
    bus.memory[0xD001] = 0x12;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
}

#[test]
fn rst_pushes_pc_and_vectors() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    // 0x0200: RST 38H
    bus.memory[0x0200] = 0xFF;
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0xD000;

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0038);
    assert_eq!(bus.memory[0xCFFF], 0x02);
    assert_eq!(bus.memory[0xCFFE], 0x01);
}

#[test]
fn halted_cpu_idles_without_fetching() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.regs.pc = 0x0200;
    cpu.halted = true;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert!(cpu.halted);
}

#[test]
fn halt_enters_halted_state() {
    let mut cpu = zeroed_cpu();
    // 0x0000: HALT
    let mut bus = TestBus::with_program(&[0x76]);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.halted);
    assert!(!cpu.halt_bug_latched());
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn halt_bug_repeats_next_opcode_fetch() {
    let mut cpu = zeroed_cpu();
    // 0x0000: HALT
    // 0x0001: INC A
    let mut bus = TestBus::with_program(&[0x76, 0x3C]);
    bus.memory[IE_ADDR as usize] = Interrupts::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = Interrupts::VBLANK.bits();

    cpu.step(&mut bus);
    assert!(!cpu.halted);
    assert!(cpu.halt_bug_latched());
    assert_eq!(cpu.regs.pc, 0x0001);

    // The byte after HALT is read twice.
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert!(!cpu.halt_bug_latched());

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn latched_halt_bug_suppresses_exactly_one_fetch() {
    let mut cpu = zeroed_cpu();
    // 0x0000: NOP
    // 0x0001: NOP
    let mut bus = TestBus::with_program(&[0x00, 0x00]);

    cpu.latch_halt_bug();
    assert!(cpu.halt_bug_latched());
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0000);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn interrupt_dispatch_pushes_pc_and_clears_if_bit() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xD000;
    bus.memory[IE_ADDR as usize] = (Interrupts::VBLANK | Interrupts::TIMER).bits();
    bus.memory[IF_ADDR as usize] = (Interrupts::VBLANK | Interrupts::TIMER).bits();

    assert_eq!(cpu.handle_interrupts(&mut bus), Some(INTERRUPT_ENTRY_CYCLES));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFF], 0x12);
    assert_eq!(bus.memory[0xCFFE], 0x34);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupts::TIMER.bits());

    // IME is now clear, so the timer request waits.
    assert_eq!(cpu.handle_interrupts(&mut bus), None);
}

#[test]
fn lowest_pending_bit_wins() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0xD000;
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = (Interrupts::TIMER | Interrupts::JOYPAD).bits();

    cpu.handle_interrupts(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupts::JOYPAD.bits());
}

#[test]
fn interrupt_vectors_follow_bit_order() {
    assert_eq!(Interrupts::VBLANK.vector(), Some(0x40));
    assert_eq!(Interrupts::LCD_STAT.vector(), Some(0x48));
    assert_eq!(Interrupts::TIMER.vector(), Some(0x50));
    assert_eq!(Interrupts::SERIAL.vector(), Some(0x58));
    assert_eq!(Interrupts::JOYPAD.vector(), Some(0x60));
    assert_eq!(Interrupts::empty().vector(), None);
}

#[test]
fn disabled_interrupts_are_never_vectored() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = Interrupts::SERIAL.bits();
    bus.memory[IF_ADDR as usize] = Interrupts::VBLANK.bits();

    assert_eq!(cpu.handle_interrupts(&mut bus), None);
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn halted_cpu_wakes_without_service_when_ime_clear() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.halted = true;
    cpu.regs.pc = 0x0200;
    bus.memory[IE_ADDR as usize] = Interrupts::TIMER.bits();
    bus.memory[IF_ADDR as usize] = Interrupts::TIMER.bits();

    assert_eq!(cpu.handle_interrupts(&mut bus), None);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupts::TIMER.bits());
}

#[test]
fn halted_cpu_with_ime_is_serviced_and_resumed() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.halted = true;
    cpu.ime = true;
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0xD000;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.handle_interrupts(&mut bus), None);
    assert!(cpu.halted);

    bus.request_interrupt(Interrupts::SERIAL);
    bus.memory[IE_ADDR as usize] = Interrupts::SERIAL.bits();
    assert_eq!(cpu.handle_interrupts(&mut bus), Some(20));
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0058);
}

#[test]
fn ei_sets_ime_after_next_instruction() {
    let mut cpu = zeroed_cpu();
    // 0x0000: EI
    // 0x0001: NOP
    let mut bus = TestBus::with_program(&[0xFB, 0x00]);
    cpu.regs.sp = 0xD000;
    bus.memory[IE_ADDR as usize] = Interrupts::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = Interrupts::VBLANK.bits();

    cpu.step(&mut bus);
    assert!(!cpu.ime);
    assert!(cpu.ime_enable_scheduled());
    assert_eq!(cpu.handle_interrupts(&mut bus), None);

    cpu.step(&mut bus);
    assert!(cpu.ime);
    assert_eq!(cpu.handle_interrupts(&mut bus), Some(20));
    // The return address is the instruction after the NOP.
    assert_eq!(bus.memory[0xCFFE], 0x02);
}

#[test]
fn back_to_back_ei_enables_after_the_second() {
    let mut cpu = zeroed_cpu();
    // 0x0000: EI
    // 0x0001: EI
    // 0x0002: NOP
    let mut bus = TestBus::with_program(&[0xFB, 0xFB, 0x00]);

    cpu.step(&mut bus);
    assert!(!cpu.ime);
    cpu.step(&mut bus);
    assert!(cpu.ime);
    assert!(!cpu.ime_enable_scheduled());
    cpu.step(&mut bus);
    assert!(cpu.ime);
}

#[test]
fn di_cancels_pending_ei() {
    let mut cpu = zeroed_cpu();
    // 0x0000: EI
    // 0x0001: DI
    // 0x0002: NOP
    let mut bus = TestBus::with_program(&[0xFB, 0xF3, 0x00]);

    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert!(!cpu.ime);
    assert!(!cpu.ime_enable_scheduled());
    cpu.step(&mut bus);
    assert!(!cpu.ime);
}

#[test]
fn reti_enables_ime_immediately() {
    let mut cpu = zeroed_cpu();
    // 0x0000: RETI
    let mut bus = TestBus::with_program(&[0xD9]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xD000] = 0x00;
    bus.memory[0xD001] = 0x02;

    assert_eq!(cpu.step(&mut bus), 16);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xD002);
}

#[test]
fn high_byte_push_into_ie_can_cancel_dispatch() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0x0000;
    cpu.regs.pc = 0x1234;
    bus.memory[IE_ADDR as usize] = Interrupts::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = Interrupts::VBLANK.bits();

    // PC high byte (0x12) lands in IE and masks VBlank out.
    assert_eq!(cpu.handle_interrupts(&mut bus), Some(20));
    assert_eq!(cpu.regs.pc, 0x0000);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupts::VBLANK.bits());
    assert!(!cpu.ime);
}

#[test]
fn high_byte_push_into_ie_can_retarget_dispatch() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0x0000;
    cpu.regs.pc = 0x0434;
    bus.memory[IE_ADDR as usize] = Interrupts::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = (Interrupts::VBLANK | Interrupts::TIMER).bits();

    // IE becomes 0x04 after the high-byte push: timer is serviced instead.
    cpu.handle_interrupts(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupts::VBLANK.bits());
}

#[test]
fn stop_waits_for_joypad_line() {
    let mut cpu = zeroed_cpu();
    // 0x0000: STOP 0
    // 0x0002: NOP
    let mut bus = TestBus::with_program(&[0x10, 0x00, 0x00]);
    bus.memory[P1_ADDR as usize] = 0xFF;

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);

    // A pressed button pulls a P1 line low.
    bus.memory[P1_ADDR as usize] = 0xFE;
    cpu.step(&mut bus);
    assert!(!cpu.is_stopped());
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn invalid_opcode_is_a_counted_no_op() {
    let mut cpu = zeroed_cpu();
    // 0x0000: (hole)
    // 0x0001: INC A
    let mut bus = TestBus::with_program(&[0xD3, 0x3C]);
    cpu.regs.f = 0x50;
    let before = cpu.regs;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(Registers { pc: before.pc, ..cpu.regs }, before);
    assert_eq!(cpu.invalid_opcode_count(), 1);

    // Execution carries on.
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn every_opcode_hole_decodes_to_invalid() {
    let table = OpcodeTable::new();
    let holes = [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD];
    for opcode in 0..=0xFFu8 {
        let entry = table.primary(opcode);
        assert_eq!(
            matches!(entry.op, Op::Invalid(_)),
            holes.contains(&opcode),
            "opcode {opcode:#04x}"
        );
        assert!(entry.cycles >= 4);
    }
}

#[test]
fn cb_table_covers_all_register_targets() {
    let table = OpcodeTable::new();
    assert_eq!(
        table.cb(0x1E).op,
        Op::Shift { op: ShiftOp::Rr, target: Reg8::HlIndirect }
    );
    assert_eq!(table.cb(0x7F).op, Op::Bit { bit: 7, target: Reg8::A });
    assert_eq!(table.cb(0x80).op, Op::Res { bit: 0, target: Reg8::B });
    assert_eq!(table.cb(0xFD).op, Op::Set { bit: 7, target: Reg8::L });
}

#[test]
fn trace_log_receives_bytes_and_mnemonics() {
    let mut cpu = zeroed_cpu();
    // 0x0000: LD BC, 0x1234
    // 0x0003: RL C
    // 0x0005: (hole)
    let mut bus = TestBus::with_program(&[0x01, 0x34, 0x12, 0xCB, 0x11, 0xFC]);
    let mut trace = TraceLog::new();

    cpu.step_traced(&mut bus, &mut trace);
    cpu.step_traced(&mut bus, &mut trace);
    cpu.step_traced(&mut bus, &mut trace);

    let entries = trace.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].address, 0x0000);
    assert_eq!(entries[0].bytes.as_slice(), &[0x01, 0x34, 0x12]);
    assert_eq!(entries[0].mnemonic, "LD BC,d16");
    assert_eq!(entries[0].to_string(), "0000  01 34 12     LD BC,d16");
    assert_eq!(entries[1].address, 0x0003);
    assert_eq!(entries[1].bytes.as_slice(), &[0xCB, 0x11]);
    assert_eq!(entries[1].mnemonic, "RL C");
    assert_eq!(entries[2].mnemonic, "INVALID $FC");
}

#[test]
fn trace_log_limit_stops_recording() {
    let mut cpu = zeroed_cpu();
    let mut bus = TestBus::default();
    let mut trace = TraceLog::with_limit(2);

    for _ in 0..5 {
        cpu.step_traced(&mut bus, &mut trace);
    }

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.dropped(), 3);
    assert_eq!(trace.last().map(|e| e.address), Some(0x0001));
}

/// Runs each of blargg's `cpu_instrs` ROMs and checks the serial output
/// reports success.
///
/// Ignored by default: it needs the ROMs under `assets/` and takes a while.
#[test]
#[ignore]
fn run_blargg_cpu_instrs() {
    // Large safety budget to keep the test bounded even if the emulator
    // misbehaves.
    const MAX_CYCLES: u64 = 500_000_000;

    for name in CPU_INSTRS_ROMS {
        let rom = load_cpu_instrs_rom(name);
        let mut gb = crate::machine::GameBoy::new();
        gb.load_rom(&rom).expect("individual cpu_instrs ROMs fit the ROM window");

        let mut cycles: u64 = 0;
        loop {
            let output = gb.serial_output();
            if output.ends_with(b"Passed\n") || output.windows(6).any(|w| w == b"Failed") {
                break;
            }
            if cycles >= MAX_CYCLES {
                break;
            }
            cycles += gb.step() as u64;
        }

        let output = String::from_utf8_lossy(gb.serial_output()).into_owned();
        assert!(
            output.contains("Passed"),
            "{name} did not pass.\nCaptured output:\n{output}\n(total cycles {cycles})\n"
        );
    }
}
