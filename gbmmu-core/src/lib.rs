mod config;
mod input;
pub mod memory;
mod startup;

pub use config::{MemoryConfig, RunConfig};
pub use input::{Button, JoypadState};
pub use memory::{AddressSpace, Cartridge, CartridgeLoadError, LoadError};
pub use startup::{init_emulation_state, StartupError};

/// Everything produced at startup that a processor core needs: the populated address space, plus
/// the parsed cartridge for header information.
pub struct EmulationState {
    pub address_space: AddressSpace,
    pub cartridge: Cartridge,
}
