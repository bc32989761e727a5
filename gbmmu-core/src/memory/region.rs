use crate::memory::address;
use std::fmt::Formatter;

/// Identifies one of the fixed-size byte arrays owned by the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreId {
    BootRom,
    CartridgeRom,
    VideoRam,
    ExternalRam,
    WorkingRam,
    Oam,
    IoRegisters,
    HighRam,
    // Not backed by anything; reads return the open bus value and writes are discarded
    OpenBus,
}

impl StoreId {
    /// Size in bytes of the backing store.
    #[must_use]
    pub fn capacity(self) -> usize {
        match self {
            Self::BootRom => address::BOOT_ROM_SIZE,
            Self::CartridgeRom => address::CARTRIDGE_ROM_SIZE,
            Self::VideoRam => address::VRAM_SIZE,
            Self::ExternalRam => address::EXTERNAL_RAM_SIZE,
            Self::WorkingRam => address::WORKING_RAM_SIZE,
            Self::Oam => address::OAM_SIZE,
            Self::IoRegisters => address::IO_REGISTERS_SIZE,
            Self::HighRam => address::HRAM_SIZE,
            Self::OpenBus => 0,
        }
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BootRom => "Boot ROM",
            Self::CartridgeRom => "Cartridge ROM",
            Self::VideoRam => "VRAM",
            Self::ExternalRam => "External RAM",
            Self::WorkingRam => "Working RAM",
            Self::Oam => "OAM",
            Self::IoRegisters => "I/O Registers",
            Self::HighRam => "HRAM",
            Self::OpenBus => "Open Bus",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPolicy {
    ReadOnly,
    ReadWrite,
    ReadWriteWithSideEffect,
    OpenBus,
}

impl std::fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ReadOnly => "R",
            Self::ReadWrite => "RW",
            Self::ReadWriteWithSideEffect => "RW+",
            Self::OpenBus => "-",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub start: u16,
    pub end_inclusive: u16,
    pub store: StoreId,
    pub policy: AccessPolicy,
}

impl Region {
    #[must_use]
    pub fn contains(&self, address: u16) -> bool {
        (self.start..=self.end_inclusive).contains(&address)
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        usize::from(self.end_inclusive - self.start) + 1
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04X}-{:04X} {:<14} {:<14} {}",
            self.start, self.end_inclusive, self.name, self.store, self.policy
        )
    }
}

macro_rules! region {
    ($name:literal, $start:expr, $end:expr, $store:ident, $policy:ident) => {
        Region {
            name: $name,
            start: $start,
            end_inclusive: $end,
            store: StoreId::$store,
            policy: AccessPolicy::$policy,
        }
    };
}

/// Every region of the address space, sorted by start address. The boot ROM overlay is not listed
/// here because it only changes which store backs the start of the cartridge ROM region.
pub const REGION_TABLE: [Region; 10] = [
    region!("ROM", address::ROM_START, address::ROM_END, CartridgeRom, ReadOnly),
    region!("VRAM", address::VRAM_START, address::VRAM_END, VideoRam, ReadWrite),
    region!(
        "External RAM",
        address::EXTERNAL_RAM_START,
        address::EXTERNAL_RAM_END,
        ExternalRam,
        ReadWrite
    ),
    region!(
        "Working RAM",
        address::WORKING_RAM_START,
        address::WORKING_RAM_END,
        WorkingRam,
        ReadWrite
    ),
    region!(
        "Echo RAM",
        address::ECHO_RAM_START,
        address::ECHO_RAM_END,
        WorkingRam,
        ReadWrite
    ),
    region!("OAM", address::OAM_START, address::OAM_END, Oam, ReadWrite),
    region!(
        "Unusable",
        address::UNUSABLE_START,
        address::UNUSABLE_END,
        OpenBus,
        OpenBus
    ),
    region!(
        "I/O Registers",
        address::IO_REGISTERS_START,
        address::IO_REGISTERS_END,
        IoRegisters,
        ReadWriteWithSideEffect
    ),
    region!("HRAM", address::HRAM_START, address::HRAM_END, HighRam, ReadWrite),
    region!(
        "IE Register",
        address::IE_REGISTER,
        address::IE_REGISTER,
        HighRam,
        ReadWrite
    ),
];

/// Return the static region entry that contains the given address.
#[must_use]
pub fn region_for(address: u16) -> &'static Region {
    let idx = REGION_TABLE.partition_point(|region| region.end_inclusive < address);
    &REGION_TABLE[idx]
}

/// The result of decoding an address: which store backs it, where in the store, and what access
/// rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub store: StoreId,
    pub offset: usize,
    pub policy: AccessPolicy,
}

impl Decoded {
    #[inline(always)]
    fn new(store: StoreId, offset: u16, policy: AccessPolicy) -> Self {
        Self {
            store,
            offset: offset.into(),
            policy,
        }
    }
}

/// Resolve an address to its backing store. While the boot ROM is mapped, the first 256 bytes of
/// the address space resolve to the boot ROM instead of the cartridge.
#[inline]
#[must_use]
pub fn decode(address: u16, boot_rom_mapped: bool) -> Decoded {
    use AccessPolicy::{OpenBus, ReadOnly, ReadWrite, ReadWriteWithSideEffect};

    match address {
        address::BOOT_ROM_START..=address::BOOT_ROM_END if boot_rom_mapped => {
            Decoded::new(StoreId::BootRom, address - address::BOOT_ROM_START, ReadOnly)
        }
        address::ROM_START..=address::ROM_END => {
            Decoded::new(StoreId::CartridgeRom, address - address::ROM_START, ReadOnly)
        }
        address::VRAM_START..=address::VRAM_END => {
            Decoded::new(StoreId::VideoRam, address - address::VRAM_START, ReadWrite)
        }
        address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => Decoded::new(
            StoreId::ExternalRam,
            address - address::EXTERNAL_RAM_START,
            ReadWrite,
        ),
        address::WORKING_RAM_START..=address::WORKING_RAM_END => Decoded::new(
            StoreId::WorkingRam,
            address - address::WORKING_RAM_START,
            ReadWrite,
        ),
        address::ECHO_RAM_START..=address::ECHO_RAM_END => Decoded::new(
            StoreId::WorkingRam,
            address - address::ECHO_RAM_START,
            ReadWrite,
        ),
        address::OAM_START..=address::OAM_END => {
            Decoded::new(StoreId::Oam, address - address::OAM_START, ReadWrite)
        }
        address::UNUSABLE_START..=address::UNUSABLE_END => {
            Decoded::new(StoreId::OpenBus, 0, OpenBus)
        }
        address::IO_REGISTERS_START..=address::IO_REGISTERS_END => Decoded::new(
            StoreId::IoRegisters,
            address - address::IO_REGISTERS_START,
            ReadWriteWithSideEffect,
        ),
        address::HRAM_START..=address::IE_REGISTER => {
            Decoded::new(StoreId::HighRam, address - address::HRAM_START, ReadWrite)
        }
    }
}
