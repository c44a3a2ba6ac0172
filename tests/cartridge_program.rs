use nes6502::{
    bus::Memory,
    cartridge::{cartridge::Cartridge, mapper::Mirroring},
    cpu::cpu::{CPU, CpuError},
};

const PRG_BANK: usize = 16 * 1024;

/// One-bank NROM image: `program` at $C000 (mirrored at $8000), reset vector at $C000.
fn nrom_image(program: &[u8]) -> Vec<u8> {
    let mut image = vec![0u8; 16 + PRG_BANK];
    image[..4].copy_from_slice(b"NES\x1A");
    image[4] = 1; // PRG banks
    image[5] = 0; // CHR banks
    image[6] = 0x01; // vertical mirroring, mapper 0
    image[16..16 + program.len()].copy_from_slice(program);
    let vector = 16 + 0x3FFC;
    image[vector] = 0x00;
    image[vector + 1] = 0xC0;
    image
}

#[test]
fn runs_program_until_brk() {
    // LDA #$05; STA $10; LDX $10; INX; BRK
    let program = [0xA9, 0x05, 0x85, 0x10, 0xA6, 0x10, 0xE8, 0x00];
    let cart = Cartridge::from_bytes(&nrom_image(&program)).unwrap();
    assert_eq!(cart.mirroring(), Mirroring::Vertical);

    let mut memory = Memory::new(&cart);
    let mut cpu = CPU::new(&mut memory);
    cpu.reset();
    assert_eq!(cpu.pc.get(), 0xC000);

    let cycles: u32 = (0..4).map(|_| cpu.step().unwrap() as u32).sum();
    assert_eq!(cycles, 2 + 3 + 3 + 2);
    assert_eq!(cpu.cycles, 7 + 10);

    assert_eq!(cpu.a.get(), 0x05);
    assert_eq!(cpu.x.get(), 0x06);
    assert!(!cpu.status.zero());
    assert!(!cpu.status.negative());

    assert_eq!(
        cpu.step(),
        Err(CpuError::UnimplementedOpcode {
            opcode: 0x00,
            mnemonic: "BRK",
            pc: 0xC007,
        })
    );
    assert_eq!(cpu.pc.get(), 0xC007);

    drop(cpu);
    assert_eq!(memory.read_byte(0x0010), 0x05);
    assert_eq!(memory.read_byte(0x0810), 0x05);
}

#[test]
fn prg_is_mirrored_into_both_halves() {
    let cart = Cartridge::from_bytes(&nrom_image(&[0xEA])).unwrap();
    let memory = Memory::new(&cart);
    assert_eq!(memory.read_byte(0x8000), 0xEA);
    assert_eq!(memory.read_byte(0xC000), 0xEA);
    assert_eq!(memory.read_byte(0xFFFD), 0xC0);
}

#[test]
fn rejects_unsupported_mapper() {
    let mut image = nrom_image(&[0xEA]);
    image[6] = 0x10; // mapper 1
    let err = Cartridge::from_bytes(&image).unwrap_err();
    assert!(format!("{:#}", err).contains("MMC1"), "{:#}", err);
}
