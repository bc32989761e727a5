use crate::memory::address;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartridgeLoadError {
    #[error("error reading cartridge file: {source}")]
    FileRead {
        #[from]
        source: io::Error,
    },
    #[error("cartridge image is {size} bytes, shorter than the {} byte header", address::HEADER_END + 1)]
    TooShort { size: usize },
}

/// A cartridge ROM image along with accessors for the fields of its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    rom: Vec<u8>,
}

impl Cartridge {
    /// Wrap a ROM image. Fails if the image is too short to contain a header.
    pub fn new(rom: Vec<u8>) -> Result<Self, CartridgeLoadError> {
        if rom.len() <= usize::from(address::HEADER_END) {
            return Err(CartridgeLoadError::TooShort { size: rom.len() });
        }

        Ok(Self { rom })
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> Result<Self, CartridgeLoadError> {
        let rom = fs::read(file_path.as_ref())?;
        Self::new(rom)
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    fn header_byte(&self, address: u16) -> u8 {
        self.rom[usize::from(address)]
    }

    /// Return the game title from the header, stopping at the first NUL byte.
    pub fn title(&self) -> String {
        let title_bytes =
            &self.rom[usize::from(address::TITLE_START)..=usize::from(address::TITLE_END)];
        title_bytes
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| char::from(b))
            .collect::<String>()
            .trim_end()
            .into()
    }

    pub fn mapper_byte(&self) -> u8 {
        self.header_byte(address::MAPPER)
    }

    pub fn rom_size_byte(&self) -> u8 {
        self.header_byte(address::ROM_SIZE)
    }

    pub fn ram_size_byte(&self) -> u8 {
        self.header_byte(address::RAM_SIZE)
    }

    /// Whether the header declares a cartridge with no mapper chip, the only kind that fits in the
    /// fixed 32KB cartridge ROM store.
    pub fn is_rom_only(&self) -> bool {
        self.mapper_byte() == 0x00
    }

    /// Compute the header checksum over 0x0134-0x014C the same way the boot ROM does.
    pub fn header_checksum(&self) -> u8 {
        self.rom[usize::from(address::TITLE_START)..usize::from(address::HEADER_CHECKSUM)]
            .iter()
            .fold(0_u8, |checksum, &b| checksum.wrapping_sub(b).wrapping_sub(1))
    }

    pub fn header_checksum_valid(&self) -> bool {
        self.header_checksum() == self.header_byte(address::HEADER_CHECKSUM)
    }
}

impl std::fmt::Display for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "title: {}", self.title())?;
        writeln!(f, "size: {} bytes", self.rom.len())?;
        writeln!(f, "mapper: {:02X}", self.mapper_byte())?;
        writeln!(f, "rom_size: {:02X}", self.rom_size_byte())?;
        writeln!(f, "ram_size: {:02X}", self.ram_size_byte())?;
        writeln!(
            f,
            "header_checksum: {:02X} ({})",
            self.header_byte(address::HEADER_CHECKSUM),
            if self.header_checksum_valid() {
                "valid"
            } else {
                "invalid"
            }
        )?;

        Ok(())
    }
}
