use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

/// Settings that change how the address space behaves, independent of which images are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Value returned for reads from addresses not backed by any store.
    #[serde(default = "default_open_bus_value")]
    pub open_bus_value: u8,

    /// If false, a cartridge image larger than the cartridge ROM store is a startup error instead
    /// of being truncated.
    #[serde(default = "default_allow_cartridge_truncation")]
    pub allow_cartridge_truncation: bool,
}

fn default_open_bus_value() -> u8 {
    0xFF
}

fn default_allow_cartridge_truncation() -> bool {
    true
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            open_bus_value: default_open_bus_value(),
            allow_cartridge_truncation: default_allow_cartridge_truncation(),
        }
    }
}

impl std::fmt::Display for MemoryConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "open_bus_value: {:02X}", self.open_bus_value)?;
        writeln!(
            f,
            "allow_cartridge_truncation: {}",
            self.allow_cartridge_truncation
        )?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub gb_file_path: String,
    pub boot_rom_path: Option<String>,
}

impl std::fmt::Display for RunConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "gb_file_path: {}", self.gb_file_path)?;
        writeln!(
            f,
            "boot_rom_path: {}",
            self.boot_rom_path.as_deref().unwrap_or("<None>")
        )?;

        Ok(())
    }
}
