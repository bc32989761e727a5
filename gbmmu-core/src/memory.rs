pub mod address;
mod cartridge;
pub mod ioregisters;
pub mod region;
pub mod vram;

use crate::config::MemoryConfig;
use crate::input::{self, JoypadState};
use crate::memory::ioregisters::{IoInitialState, IoRegisters, WriteEffect};
use crate::memory::region::{AccessPolicy, StoreId};
use std::ops::Range;
use thiserror::Error;

pub use cartridge::{Cartridge, CartridgeLoadError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    #[error("boot ROM is {size} bytes, larger than the {capacity} byte boot ROM store")]
    BootRomTooLarge { size: usize, capacity: usize },
}

/// The full 16-bit address space: every backing store plus the boot ROM overlay state.
///
/// All CPU-visible accesses go through [`AddressSpace::read_address_u8`] and
/// [`AddressSpace::write_address_u8`] (or their u16 counterparts), none of which can fail. Invalid
/// reads return the open bus value and invalid writes are dropped.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    boot_rom: [u8; address::BOOT_ROM_SIZE],
    cartridge_rom: [u8; address::CARTRIDGE_ROM_SIZE],
    vram: [u8; address::VRAM_SIZE],
    external_ram: [u8; address::EXTERNAL_RAM_SIZE],
    working_ram: [u8; address::WORKING_RAM_SIZE],
    oam: [u8; address::OAM_SIZE],
    io_registers: IoRegisters,
    hram: [u8; address::HRAM_SIZE],
    boot_rom_mapped: bool,
    open_bus_value: u8,
}

impl AddressSpace {
    /// Create an address space with every store zeroed and the boot ROM mapped.
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            boot_rom: [0; address::BOOT_ROM_SIZE],
            cartridge_rom: [0; address::CARTRIDGE_ROM_SIZE],
            vram: [0; address::VRAM_SIZE],
            external_ram: [0; address::EXTERNAL_RAM_SIZE],
            working_ram: [0; address::WORKING_RAM_SIZE],
            oam: [0; address::OAM_SIZE],
            io_registers: IoRegisters::new(IoInitialState::Zeroed),
            hram: [0; address::HRAM_SIZE],
            boot_rom_mapped: true,
            open_bus_value: config.open_bus_value,
        }
    }

    /// Zero every store and map the boot ROM again. Loaded images are discarded.
    pub fn initialize(&mut self) {
        self.boot_rom.fill(0);
        self.cartridge_rom.fill(0);
        self.vram.fill(0);
        self.external_ram.fill(0);
        self.working_ram.fill(0);
        self.oam.fill(0);
        self.io_registers = IoRegisters::new(IoInitialState::Zeroed);
        self.hram.fill(0);
        self.boot_rom_mapped = true;
    }

    fn store(&self, store: StoreId) -> &[u8] {
        match store {
            StoreId::BootRom => &self.boot_rom,
            StoreId::CartridgeRom => &self.cartridge_rom,
            StoreId::VideoRam => &self.vram,
            StoreId::ExternalRam => &self.external_ram,
            StoreId::WorkingRam => &self.working_ram,
            StoreId::Oam => &self.oam,
            StoreId::IoRegisters => self.io_registers.as_slice(),
            StoreId::HighRam => &self.hram,
            StoreId::OpenBus => &[],
        }
    }

    fn store_mut(&mut self, store: StoreId) -> &mut [u8] {
        match store {
            StoreId::BootRom => &mut self.boot_rom,
            StoreId::CartridgeRom => &mut self.cartridge_rom,
            StoreId::VideoRam => &mut self.vram,
            StoreId::ExternalRam => &mut self.external_ram,
            StoreId::WorkingRam => &mut self.working_ram,
            StoreId::Oam => &mut self.oam,
            StoreId::IoRegisters => self.io_registers.as_mut_slice(),
            StoreId::HighRam => &mut self.hram,
            StoreId::OpenBus => &mut [],
        }
    }

    #[inline]
    pub fn read_address_u8(&self, address: u16) -> u8 {
        let decoded = region::decode(address, self.boot_rom_mapped);
        match decoded.store {
            StoreId::OpenBus => self.open_bus_value,
            StoreId::IoRegisters => self.io_registers.read_address(address),
            store => self.store(store)[decoded.offset],
        }
    }

    /// Read a little-endian word. The two bytes are decoded independently, so a word may straddle
    /// two regions, and the high byte of a read at 0xFFFF comes from 0x0000.
    pub fn read_address_u16(&self, address: u16) -> u16 {
        let lsb = self.read_address_u8(address);
        let msb = self.read_address_u8(address.wrapping_add(1));
        u16::from_le_bytes([lsb, msb])
    }

    #[inline]
    pub fn write_address_u8(&mut self, address: u16, value: u8) {
        let decoded = region::decode(address, self.boot_rom_mapped);
        match decoded.policy {
            AccessPolicy::ReadWrite => {
                self.store_mut(decoded.store)[decoded.offset] = value;
            }
            AccessPolicy::ReadWriteWithSideEffect => {
                let effect = self.io_registers.write_address(address, value);
                self.apply_write_effect(effect);
            }
            AccessPolicy::ReadOnly | AccessPolicy::OpenBus => {
                log::trace!(
                    "Dropping write of {value:02X} to {address:04X} ({})",
                    decoded.store
                );
            }
        }
    }

    /// Write a little-endian word as two independent byte writes, low byte first.
    pub fn write_address_u16(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write_address_u8(address, lsb);
        self.write_address_u8(address.wrapping_add(1), msb);
    }

    fn apply_write_effect(&mut self, effect: WriteEffect) {
        match effect {
            WriteEffect::None => {}
            WriteEffect::OamDma { source_page } => self.oam_dma(source_page),
            WriteEffect::UnmapBootRom => self.disable_boot_rom(),
        }
    }

    /// Copy 0xA0 bytes from the given page into OAM. The transfer is instantaneous; the source
    /// bytes are read through the decoder so the boot ROM overlay applies.
    fn oam_dma(&mut self, source_page: u8) {
        let source_address = u16::from(source_page) << 8;
        log::debug!("OAM DMA from {source_address:04X}");

        let mut buffer = [0; address::OAM_SIZE];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read_address_u8(source_address.wrapping_add(i as u16));
        }

        self.region_slice_mut(address::OAM_START).copy_from_slice(&buffer);
    }

    pub fn is_boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }

    /// Unmap the boot ROM so that 0x0000-0x00FF reads from the cartridge. This cannot be undone
    /// except by [`AddressSpace::initialize`].
    pub fn disable_boot_rom(&mut self) {
        if self.boot_rom_mapped {
            log::debug!("Unmapping boot ROM");
            self.boot_rom_mapped = false;
        }
    }

    /// Unmap the boot ROM and set the I/O registers to the values the boot ROM would have left
    /// behind, for running a cartridge without a boot ROM image.
    pub fn skip_boot_rom(&mut self) {
        self.disable_boot_rom();
        self.io_registers = IoRegisters::new(IoInitialState::PostBoot);
    }

    /// Copy a boot ROM image into the boot ROM store. Images shorter than the store fill it from
    /// the start and the remainder is zeroed; larger images are rejected without modifying the
    /// store.
    pub fn load_boot_rom(&mut self, boot_rom: &[u8]) -> Result<(), LoadError> {
        if boot_rom.len() > address::BOOT_ROM_SIZE {
            return Err(LoadError::BootRomTooLarge {
                size: boot_rom.len(),
                capacity: address::BOOT_ROM_SIZE,
            });
        }

        self.boot_rom[..boot_rom.len()].copy_from_slice(boot_rom);
        self.boot_rom[boot_rom.len()..].fill(0);

        log::info!("Loaded {} byte boot ROM", boot_rom.len());

        Ok(())
    }

    /// Copy up to `size` bytes of a cartridge image into the cartridge ROM store and return how
    /// many bytes were actually written. The count is smaller than `size` if the image is shorter
    /// than `size` or if `size` exceeds the store capacity. The rest of the store is zeroed.
    pub fn load_cartridge(&mut self, rom: &[u8], size: usize) -> usize {
        let bytes_written = size.min(rom.len()).min(address::CARTRIDGE_ROM_SIZE);
        if bytes_written < size {
            log::warn!(
                "Cartridge load truncated: requested {size} bytes, wrote {bytes_written} (image is {} bytes, store capacity is {})",
                rom.len(),
                address::CARTRIDGE_ROM_SIZE
            );
        }

        self.cartridge_rom[..bytes_written].copy_from_slice(&rom[..bytes_written]);
        self.cartridge_rom[bytes_written..].fill(0);

        log::info!("Loaded {bytes_written} bytes of cartridge ROM");

        bytes_written
    }

    /// Load the full image of a parsed cartridge, returning the number of bytes written.
    pub fn load_cartridge_image(&mut self, cartridge: &Cartridge) -> usize {
        if !cartridge.is_rom_only() {
            log::warn!(
                "Cartridge declares mapper {:02X}, bank switching is not supported; only the first {} bytes are mapped",
                cartridge.mapper_byte(),
                address::CARTRIDGE_ROM_SIZE
            );
        }

        self.load_cartridge(cartridge.rom(), cartridge.rom().len())
    }

    /// Locate the store range that backs `address` up to the end of its region. Open bus
    /// addresses produce an empty range.
    fn region_bounds(&self, address: u16) -> (StoreId, Range<usize>) {
        let decoded = region::decode(address, self.boot_rom_mapped);
        let region = region::region_for(address);

        let remaining = usize::from(region.end_inclusive - address) + 1;
        let end = (decoded.offset + remaining).min(decoded.store.capacity());
        let start = decoded.offset.min(end);

        (decoded.store, start..end)
    }

    /// Return the cartridge ROM contents starting at the given address, regardless of whether the
    /// boot ROM is mapped. Returns an empty slice for addresses outside of cartridge ROM.
    pub fn cartridge_rom_from(&self, address: u16) -> &[u8] {
        if address > address::ROM_END {
            return &[];
        }

        &self.cartridge_rom[usize::from(address - address::ROM_START)..]
    }

    /// Return the contents of whichever store currently backs `address`, from that address to the
    /// end of its region. Respects the boot ROM overlay. I/O registers are returned as raw stored
    /// values without CPU read masks.
    pub fn region_slice(&self, address: u16) -> &[u8] {
        let (store, range) = self.region_bounds(address);
        &self.store(store)[range]
    }

    /// Mutable counterpart of [`AddressSpace::region_slice`]. This bypasses access policy entirely,
    /// including for read-only stores, and is only for trusted callers inside the crate.
    pub(crate) fn region_slice_mut(&mut self, address: u16) -> &mut [u8] {
        let (store, range) = self.region_bounds(address);
        &mut self.store_mut(store)[range]
    }

    pub fn vram(&self) -> &[u8; address::VRAM_SIZE] {
        &self.vram
    }

    pub fn oam(&self) -> &[u8; address::OAM_SIZE] {
        &self.oam
    }

    pub fn io_registers(&self) -> &IoRegisters {
        &self.io_registers
    }

    /// Privileged access to the I/O registers for hardware collaborators (PPU, timer). Writes made
    /// through this reference do not trigger write side effects such as OAM DMA.
    pub fn io_registers_mut(&mut self) -> &mut IoRegisters {
        &mut self.io_registers
    }

    pub fn ie_register(&self) -> u8 {
        self.hram[address::HRAM_SIZE - 1]
    }

    /// Apply a joypad snapshot to the JOYP register.
    pub fn update_joypad(&mut self, joypad_state: &JoypadState) {
        input::update_joyp_register(joypad_state, &mut self.io_registers);
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use crate::memory::ioregisters::{InterruptType, IoRegister};
    use crate::memory::region::REGION_TABLE;
    use rand::Rng;

    const BOOT_ROM_FILL: u8 = 0x31;

    fn address_space_with_images() -> AddressSpace {
        let mut address_space = AddressSpace::default();
        address_space
            .load_boot_rom(&[BOOT_ROM_FILL; address::BOOT_ROM_SIZE])
            .unwrap();

        let rom: Vec<u8> = (0..address::CARTRIDGE_ROM_SIZE)
            .map(|i| (i % 251) as u8)
            .collect();
        address_space.load_cartridge(&rom, rom.len());

        address_space
    }

    fn writable_addresses() -> impl Iterator<Item = u16> {
        REGION_TABLE
            .iter()
            .filter(|region| region.policy == AccessPolicy::ReadWrite)
            .flat_map(|region| region.start..=region.end_inclusive)
    }

    #[test]
    fn initial_state() {
        let address_space = AddressSpace::default();
        assert!(address_space.is_boot_rom_mapped());

        for address in 0..=u16::MAX {
            let expected = match address {
                address::UNUSABLE_START..=address::UNUSABLE_END => 0xFF,
                address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {
                    address_space.io_registers().read_address(address)
                }
                _ => 0x00,
            };
            assert_eq!(
                expected,
                address_space.read_address_u8(address),
                "address {address:04X}"
            );
        }
    }

    #[test]
    fn writable_round_trip() {
        let mut address_space = AddressSpace::default();
        let mut rng = rand::thread_rng();

        for address in writable_addresses() {
            let value: u8 = rng.gen();
            address_space.write_address_u8(address, value);
            assert_eq!(
                value,
                address_space.read_address_u8(address),
                "address {address:04X}"
            );
        }

        // Every value at one address per region
        for region in REGION_TABLE
            .iter()
            .filter(|region| region.policy == AccessPolicy::ReadWrite)
        {
            for value in 0..=u8::MAX {
                address_space.write_address_u8(region.end_inclusive, value);
                assert_eq!(value, address_space.read_address_u8(region.end_inclusive));
            }
        }
    }

    #[test]
    fn read_only_invariant() {
        let mut address_space = address_space_with_images();
        let mut rng = rand::thread_rng();

        for boot_rom_mapped in [true, false] {
            if !boot_rom_mapped {
                address_space.disable_boot_rom();
            }

            for address in address::ROM_START..=address::ROM_END {
                let before = address_space.read_address_u8(address);
                address_space.write_address_u8(address, rng.gen());
                assert_eq!(
                    before,
                    address_space.read_address_u8(address),
                    "address {address:04X}"
                );
            }
        }

        assert_eq!([BOOT_ROM_FILL; address::BOOT_ROM_SIZE], address_space.boot_rom);
    }

    #[test]
    fn open_bus() {
        let mut address_space = AddressSpace::new(MemoryConfig {
            open_bus_value: 0x00,
            ..MemoryConfig::default()
        });

        for address in address::UNUSABLE_START..=address::UNUSABLE_END {
            address_space.write_address_u8(address, 0x77);
            assert_eq!(0x00, address_space.read_address_u8(address));
        }

        assert!(address_space.region_slice(address::UNUSABLE_START).is_empty());
    }

    #[test]
    fn word_composition() {
        let mut address_space = AddressSpace::default();

        address_space.write_address_u16(0xC000, 0x1234);
        assert_eq!(0x34, address_space.read_address_u8(0xC000));
        assert_eq!(0x12, address_space.read_address_u8(0xC001));
        assert_eq!(0x1234, address_space.read_address_u16(0xC000));

        address_space.write_address_u8(0xFF80, 0xCD);
        address_space.write_address_u8(0xFF81, 0xAB);
        assert_eq!(0xABCD, address_space.read_address_u16(0xFF80));
    }

    #[test]
    fn word_straddling_regions() {
        let mut address_space = address_space_with_images();

        // Last byte of VRAM and first byte of external RAM
        address_space.write_address_u16(0x9FFF, 0xBEEF);
        assert_eq!(0xEF, address_space.vram()[0x1FFF]);
        assert_eq!(0xBE, address_space.read_address_u8(0xA000));

        // Last byte of ROM is read-only, first byte of VRAM is writable
        let rom_byte = address_space.read_address_u8(0x7FFF);
        address_space.write_address_u16(0x7FFF, 0x5AA5);
        assert_eq!(rom_byte, address_space.read_address_u8(0x7FFF));
        assert_eq!(0x5A, address_space.read_address_u8(0x8000));

        // HRAM into the IE register
        address_space.write_address_u16(0xFFFE, 0x1F42);
        assert_eq!(0x42, address_space.read_address_u8(0xFFFE));
        assert_eq!(0x1F, address_space.ie_register());
    }

    #[test]
    fn word_wraps_at_end_of_address_space() {
        let mut address_space = address_space_with_images();

        address_space.write_address_u8(0xFFFF, 0x80);
        assert_eq!(
            u16::from_le_bytes([0x80, BOOT_ROM_FILL]),
            address_space.read_address_u16(0xFFFF)
        );

        address_space.disable_boot_rom();
        assert_eq!(0x0080, address_space.read_address_u16(0xFFFF));
    }

    #[test]
    fn echo_ram() {
        let mut address_space = AddressSpace::default();

        address_space.write_address_u8(0xC123, 0x42);
        assert_eq!(0x42, address_space.read_address_u8(0xE123));

        address_space.write_address_u8(0xFDFF, 0x99);
        assert_eq!(0x99, address_space.read_address_u8(0xDDFF));

        // Echo RAM stops short of the end of working RAM
        assert_eq!(0x1E00, address_space.region_slice(address::ECHO_RAM_START).len());
    }

    #[test]
    fn boot_rom_overlay_transition() {
        let mut address_space = address_space_with_images();

        assert_eq!(BOOT_ROM_FILL, address_space.read_address_u8(0x0000));
        assert_eq!(BOOT_ROM_FILL, address_space.read_address_u8(0x00FF));
        assert_eq!(0x00, address_space.cartridge_rom_from(0x0000)[0]);
        assert_eq!(0x100 % 251, usize::from(address_space.read_address_u8(0x0100)));

        // Writing zero does not unmap
        address_space.write_address_u8(0xFF50, 0x00);
        assert!(address_space.is_boot_rom_mapped());
        assert_eq!(BOOT_ROM_FILL, address_space.read_address_u8(0x0000));

        address_space.write_address_u8(0xFF50, 0x01);
        assert!(!address_space.is_boot_rom_mapped());
        assert_eq!(0x00, address_space.read_address_u8(0x0000));
        assert_eq!(0xFF % 251, usize::from(address_space.read_address_u8(0x00FF)));

        // Second disabling write is a no-op
        address_space.write_address_u8(0xFF50, 0x01);
        address_space.write_address_u8(0xFF50, 0x00);
        assert!(!address_space.is_boot_rom_mapped());
        assert_eq!(0x00, address_space.read_address_u8(0x0000));
    }

    #[test]
    fn boot_rom_capacity() {
        let mut address_space = address_space_with_images();

        let result = address_space.load_boot_rom(&[0xAA; address::BOOT_ROM_SIZE + 1]);
        assert_eq!(
            Err(LoadError::BootRomTooLarge {
                size: 0x101,
                capacity: 0x100
            }),
            result
        );
        assert_eq!([BOOT_ROM_FILL; address::BOOT_ROM_SIZE], address_space.boot_rom);

        // Short images zero the rest of the store
        address_space.load_boot_rom(&[0x11, 0x22]).unwrap();
        assert_eq!(0x22, address_space.read_address_u8(0x0001));
        assert_eq!(0x00, address_space.read_address_u8(0x0002));
    }

    #[test]
    fn cartridge_truncation() {
        let mut address_space = AddressSpace::default();

        let rom = vec![0xFF; 0x10000];
        assert_eq!(0x8000, address_space.load_cartridge(&rom, rom.len()));

        let rom = vec![0x11; 0x100];
        assert_eq!(0x80, address_space.load_cartridge(&rom, 0x80));
        assert_eq!(0x11, address_space.cartridge_rom_from(0x7F)[0]);
        assert_eq!(0x00, address_space.cartridge_rom_from(0x80)[0]);
        assert_eq!(0x00, address_space.cartridge_rom_from(0x7FFF)[0]);

        // Size larger than the buffer
        assert_eq!(0x100, address_space.load_cartridge(&rom, 0x4000));
    }

    #[test]
    fn short_cartridge_load_clears_previous_image() {
        let mut address_space = AddressSpace::default();
        address_space.disable_boot_rom();

        assert_eq!(0x8000, address_space.load_cartridge(&[0xAA; 0x8000], 0x8000));
        assert_eq!(0x10, address_space.load_cartridge(&[0x11; 0x10], 0x10));

        assert_eq!(0x11, address_space.read_address_u8(0x000F));
        for address in 0x0010..=address::ROM_END {
            assert_eq!(0x00, address_space.read_address_u8(address));
        }
    }

    #[test]
    fn all_ff_cartridge_scenario() {
        let mut address_space = AddressSpace::default();
        address_space
            .load_boot_rom(&[BOOT_ROM_FILL; address::BOOT_ROM_SIZE])
            .unwrap();

        let rom = vec![0xFF; 32 * 1024];
        assert_eq!(32 * 1024, address_space.load_cartridge(&rom, rom.len()));

        assert_eq!(0xFF, address_space.read_address_u8(0x0150));
        assert_eq!(BOOT_ROM_FILL, address_space.read_address_u8(0x0000));

        address_space.disable_boot_rom();
        assert_eq!(0xFF, address_space.read_address_u8(0x0000));
    }

    #[test]
    fn initialize_resets_everything() {
        let mut address_space = address_space_with_images();
        address_space.write_address_u8(0xC000, 0x12);
        address_space.write_address_u8(0xFF50, 0x01);

        address_space.initialize();

        assert!(address_space.is_boot_rom_mapped());
        assert_eq!(0x00, address_space.read_address_u8(0x0000));
        assert_eq!(0x00, address_space.read_address_u8(0x0150));
        assert_eq!(0x00, address_space.read_address_u8(0xC000));
    }

    #[test]
    fn region_slices() {
        let mut address_space = address_space_with_images();

        let boot_rom_slice = address_space.region_slice(0x0010);
        assert_eq!(0xF0, boot_rom_slice.len());
        assert!(boot_rom_slice.iter().all(|&b| b == BOOT_ROM_FILL));

        address_space.disable_boot_rom();
        let rom_slice = address_space.region_slice(0x0010);
        assert_eq!(0x7FF0, rom_slice.len());
        assert_eq!(0x10, rom_slice[0]);

        address_space.write_address_u8(0x8010, 0x66);
        assert_eq!(0x66, address_space.region_slice(0x8000)[0x10]);
        assert_eq!(address::VRAM_SIZE, address_space.region_slice(0x8000).len());

        assert_eq!(0x7F, address_space.region_slice(address::HRAM_START).len());
        assert_eq!(1, address_space.region_slice(address::IE_REGISTER).len());

        assert!(address_space.cartridge_rom_from(0x8000).is_empty());
        assert_eq!(1, address_space.cartridge_rom_from(0x7FFF).len());
    }

    #[test]
    fn region_slice_mut_bypasses_policy() {
        let mut address_space = address_space_with_images();
        address_space.disable_boot_rom();

        address_space.region_slice_mut(0x0150)[0] = 0xAB;
        assert_eq!(0xAB, address_space.read_address_u8(0x0150));
    }

    #[test]
    fn oam_dma() {
        let mut address_space = AddressSpace::default();
        for i in 0..0xA0 {
            address_space.write_address_u8(0xC100 + i, i as u8 ^ 0x5A);
        }

        address_space.write_address_u8(0xFF46, 0xC1);

        for i in 0..0xA0 {
            assert_eq!(i as u8 ^ 0x5A, address_space.oam()[usize::from(i)]);
            assert_eq!(i as u8 ^ 0x5A, address_space.read_address_u8(0xFE00 + i));
        }
        assert_eq!(0xC1, address_space.read_address_u8(0xFF46));
    }

    #[test]
    fn oam_dma_from_boot_rom() {
        let mut address_space = address_space_with_images();

        address_space.write_address_u8(0xFF46, 0x00);
        assert!(address_space.oam().iter().all(|&b| b == BOOT_ROM_FILL));
    }

    #[test]
    fn io_register_side_effects() {
        let mut address_space = AddressSpace::default();

        address_space.io_registers_mut().privileged_set_div(0x42);
        address_space.write_address_u8(0xFF04, 0x99);
        assert_eq!(0x00, address_space.read_address_u8(0xFF04));

        address_space.io_registers_mut().privileged_set_ly(0x90);
        address_space.write_address_u8(0xFF44, 0x00);
        assert_eq!(0x90, address_space.read_address_u8(0xFF44));
    }

    #[test]
    fn joypad_update() {
        let mut address_space = AddressSpace::default();

        // Select directions
        address_space.write_address_u8(0xFF00, 0x20);

        let mut joypad_state = JoypadState::new();
        address_space.update_joypad(&joypad_state);
        assert_eq!(0xEF, address_space.read_address_u8(0xFF00));

        joypad_state.press(Button::Right);
        address_space.update_joypad(&joypad_state);

        assert_eq!(0xEE, address_space.read_address_u8(0xFF00));
        assert!(address_space
            .io_registers_mut()
            .interrupt_flags()
            .get(InterruptType::Joypad));
    }

    #[test]
    fn skip_boot_rom() {
        let mut address_space = address_space_with_images();
        address_space.skip_boot_rom();

        assert!(!address_space.is_boot_rom_mapped());
        assert_eq!(0x00, address_space.read_address_u8(0x0000));
        assert_eq!(0x91, address_space.io_registers().read_register(IoRegister::LCDC));
    }
}
