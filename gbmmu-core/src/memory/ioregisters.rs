mod lcdc;

use crate::memory::address;
pub use lcdc::{AddressRange, Lcdc, TileDataRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    VBlank,
    LcdStatus,
    Timer,
    Serial,
    Joypad,
}

impl InterruptType {
    pub fn bit(self) -> u8 {
        match self {
            Self::VBlank => 0x01,
            Self::LcdStatus => 0x02,
            Self::Timer => 0x04,
            Self::Serial => 0x08,
            Self::Joypad => 0x10,
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoRegister {
    JOYP,
    SB,
    SC,
    DIV,
    TIMA,
    TMA,
    TAC,
    IF,
    LCDC,
    STAT,
    SCY,
    SCX,
    LY,
    LYC,
    DMA,
    BGP,
    OBP0,
    OBP1,
    WY,
    WX,
    BOOT,
}

impl IoRegister {
    /// Return the hardware register corresponding to the given address, or None if the address
    /// is not a declared register (audio registers, wave RAM, and unused addresses).
    pub fn from_address(address: u16) -> Option<Self> {
        let register = match address {
            0xFF00 => Self::JOYP,
            0xFF01 => Self::SB,
            0xFF02 => Self::SC,
            0xFF04 => Self::DIV,
            0xFF05 => Self::TIMA,
            0xFF06 => Self::TMA,
            0xFF07 => Self::TAC,
            0xFF0F => Self::IF,
            0xFF40 => Self::LCDC,
            0xFF41 => Self::STAT,
            0xFF42 => Self::SCY,
            0xFF43 => Self::SCX,
            0xFF44 => Self::LY,
            0xFF45 => Self::LYC,
            0xFF46 => Self::DMA,
            0xFF47 => Self::BGP,
            0xFF48 => Self::OBP0,
            0xFF49 => Self::OBP1,
            0xFF4A => Self::WY,
            0xFF4B => Self::WX,
            0xFF50 => Self::BOOT,
            _ => return None,
        };

        Some(register)
    }

    /// Return the address for this hardware register.
    pub fn to_address(self) -> u16 {
        match self {
            Self::JOYP => 0xFF00,
            Self::SB => 0xFF01,
            Self::SC => 0xFF02,
            Self::DIV => 0xFF04,
            Self::TIMA => 0xFF05,
            Self::TMA => 0xFF06,
            Self::TAC => 0xFF07,
            Self::IF => 0xFF0F,
            Self::LCDC => 0xFF40,
            Self::STAT => 0xFF41,
            Self::SCY => 0xFF42,
            Self::SCX => 0xFF43,
            Self::LY => 0xFF44,
            Self::LYC => 0xFF45,
            Self::DMA => 0xFF46,
            Self::BGP => 0xFF47,
            Self::OBP0 => 0xFF48,
            Self::OBP1 => 0xFF49,
            Self::WY => 0xFF4A,
            Self::WX => 0xFF4B,
            Self::BOOT => 0xFF50,
        }
    }

    fn relative_address(self) -> usize {
        (self.to_address() - address::IO_REGISTERS_START) as usize
    }

    /// Return whether or not the CPU is allowed to write to this hardware register.
    pub fn is_cpu_writable(self) -> bool {
        !matches!(self, Self::LY)
    }

    /// Bits that always read as 1 regardless of the stored value.
    fn read_mask(self) -> u8 {
        match self {
            Self::JOYP => 0xC0,
            Self::SC => 0x7E,
            Self::TAC => 0xF8,
            Self::IF => 0xE0,
            Self::STAT => 0x80,
            Self::BOOT => 0xFE,
            _ => 0x00,
        }
    }
}

/// Side effect requested by a CPU write to the I/O register block. The register block cannot reach
/// the rest of the address space, so effects that touch other stores are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEffect {
    None,
    // Copy 0xA0 bytes from source_page * 0x100 into OAM
    OamDma { source_page: u8 },
    UnmapBootRom,
}

/// Initial values for the I/O register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoInitialState {
    /// Every register zeroed, as seen by a boot ROM at power on.
    #[default]
    Zeroed,
    /// The values the DMG boot ROM leaves behind when it hands control to the cartridge.
    PostBoot,
}

/// A convenience view around the IF register.
pub struct InterruptFlags<'a>(&'a mut u8);

impl InterruptFlags<'_> {
    pub fn get(&self, interrupt_type: InterruptType) -> bool {
        *self.0 & interrupt_type.bit() != 0
    }

    /// Sets the bit for the given interrupt type.
    pub fn set(&mut self, interrupt_type: InterruptType) {
        *self.0 |= interrupt_type.bit();
    }

    /// Clears the bit for the given interrupt type.
    pub fn clear(&mut self, interrupt_type: InterruptType) {
        *self.0 &= !interrupt_type.bit();
    }
}

/// The packed block of memory-mapped hardware registers at 0xFF00-0xFF7F.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoRegisters {
    contents: [u8; address::IO_REGISTERS_SIZE],
}

impl IoRegisters {
    const JOYP_RELATIVE_ADDR: usize = 0x00;
    const DIV_RELATIVE_ADDR: usize = 0x04;
    const IF_RELATIVE_ADDR: usize = 0x0F;
    const LCDC_RELATIVE_ADDR: usize = 0x40;
    const STAT_RELATIVE_ADDR: usize = 0x41;
    const LY_RELATIVE_ADDR: usize = 0x44;

    pub fn new(initial_state: IoInitialState) -> Self {
        let mut contents = [0; address::IO_REGISTERS_SIZE];

        if initial_state == IoInitialState::PostBoot {
            // JOYP
            contents[0x00] = 0xCF;

            // DIV
            contents[0x04] = 0xAB;

            // TAC
            contents[0x07] = 0xF8;

            // IF
            contents[0x0F] = 0xE1;

            // LCDC
            contents[0x40] = 0x91;

            // STAT
            contents[0x41] = 0x85;

            // DMA
            contents[0x46] = 0xFF;

            // BGP
            contents[0x47] = 0xFC;

            // BOOT
            contents[0x50] = 0x01;
        }

        Self { contents }
    }

    fn relative_address_of(address: u16) -> Option<usize> {
        (address::IO_REGISTERS_START..=address::IO_REGISTERS_END)
            .contains(&address)
            .then(|| usize::from(address - address::IO_REGISTERS_START))
    }

    /// Read the value at the given address as the CPU sees it. Unused bits of declared registers
    /// read as 1. Undeclared addresses read back whatever was last written. Addresses outside of
    /// the register block read as 0xFF.
    pub fn read_address(&self, address: u16) -> u8 {
        let Some(relative_addr) = Self::relative_address_of(address) else {
            return 0xFF;
        };
        let byte = self.contents[relative_addr];

        match IoRegister::from_address(address) {
            Some(register) => byte | register.read_mask(),
            None => byte,
        }
    }

    /// Assign a value to the hardware register at the given address as a CPU write, returning any
    /// side effect that the caller must apply outside of the register block. Writes to addresses
    /// outside of the register block are ignored.
    pub fn write_address(&mut self, address: u16, value: u8) -> WriteEffect {
        let Some(relative_addr) = Self::relative_address_of(address) else {
            log::trace!("Ignoring write of {value:02X} to non-I/O address {address:04X}");
            return WriteEffect::None;
        };

        let Some(register) = IoRegister::from_address(address) else {
            self.contents[relative_addr] = value;
            return WriteEffect::None;
        };

        if !register.is_cpu_writable() {
            log::trace!("Ignoring write of {value:02X} to read-only register {register:?}");
            return WriteEffect::None;
        }

        match register {
            IoRegister::DIV => {
                // All writes to DIV reset the value to 0
                self.contents[relative_addr] = 0x00;
            }
            IoRegister::JOYP => {
                // Only the select bits are writable, the button bits are driven by the joypad
                let existing_value = self.contents[relative_addr];
                self.contents[relative_addr] = (existing_value & 0x0F) | (value & 0x30);
            }
            IoRegister::STAT => {
                // Mode and coincidence bits are driven by the PPU
                let existing_value = self.contents[relative_addr];
                self.contents[relative_addr] = (existing_value & 0x07) | (value & 0x78);
            }
            IoRegister::DMA => {
                self.contents[relative_addr] = value;
                return WriteEffect::OamDma { source_page: value };
            }
            IoRegister::BOOT => {
                // Bit 0 sticks once set
                let existing_value = self.contents[relative_addr];
                self.contents[relative_addr] = existing_value | u8::from(value != 0);
                if value != 0 {
                    return WriteEffect::UnmapBootRom;
                }
            }
            _ => {
                self.contents[relative_addr] = value;
            }
        }

        WriteEffect::None
    }

    /// Read the value from the given hardware register as the CPU sees it.
    pub fn read_register(&self, register: IoRegister) -> u8 {
        self.read_address(register.to_address())
    }

    /// Assign a value to the given hardware register as a CPU write.
    pub fn write_register(&mut self, register: IoRegister, value: u8) -> WriteEffect {
        self.write_address(register.to_address(), value)
    }

    /// Read the raw stored value of a register, ignoring CPU read masks.
    pub fn privileged_read(&self, register: IoRegister) -> u8 {
        self.contents[register.relative_address()]
    }

    /// Read the value of the JOYP register, including bits that the CPU cannot read. Intended to
    /// be used in the code that updates the JOYP register based on current inputs.
    pub fn privileged_read_joyp(&self) -> u8 {
        self.contents[Self::JOYP_RELATIVE_ADDR] | 0xC0
    }

    /// Assign a value to the JOYP register, including bits that the CPU cannot write.
    pub fn privileged_set_joyp(&mut self, value: u8) {
        self.contents[Self::JOYP_RELATIVE_ADDR] = value & 0x3F;
    }

    /// Assign a value to the STAT register (LCD status), including bits that the CPU cannot write.
    /// Should only be used by the PPU.
    pub fn privileged_set_stat(&mut self, value: u8) {
        self.contents[Self::STAT_RELATIVE_ADDR] = value & 0x7F;
    }

    /// Assign a value to the LY register (current scanline), which the CPU cannot normally write
    /// to. Should only be used by the PPU.
    pub fn privileged_set_ly(&mut self, value: u8) {
        self.contents[Self::LY_RELATIVE_ADDR] = value;
    }

    /// Assign a value to the DIV register (timer divider), which is normally always reset to 0x00
    /// when the CPU writes to it. Should only be used by the timer code.
    pub fn privileged_set_div(&mut self, value: u8) {
        self.contents[Self::DIV_RELATIVE_ADDR] = value;
    }

    /// Obtain a read-only view around the LCDC register (LCD control).
    pub fn lcdc(&self) -> Lcdc<'_> {
        Lcdc(&self.contents[Self::LCDC_RELATIVE_ADDR])
    }

    /// Obtain a read/write view around the IF register (interrupt request flags).
    pub fn interrupt_flags(&mut self) -> InterruptFlags<'_> {
        InterruptFlags(&mut self.contents[Self::IF_RELATIVE_ADDR])
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.contents
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.contents
    }
}
