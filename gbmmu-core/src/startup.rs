use crate::config::{MemoryConfig, RunConfig};
use crate::memory::{address, AddressSpace, Cartridge, CartridgeLoadError, LoadError};
use crate::EmulationState;
use std::{fs, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("error loading cartridge from {file_path}: {source}")]
    CartridgeRead {
        file_path: String,
        #[source]
        source: CartridgeLoadError,
    },
    #[error("error reading boot ROM from {file_path}: {source}")]
    BootRomRead {
        file_path: String,
        #[source]
        source: io::Error,
    },
    #[error("error loading boot ROM from {file_path}: {source}")]
    BootRomLoad {
        file_path: String,
        #[source]
        source: LoadError,
    },
    #[error("cartridge {file_path} is {size} bytes, larger than the {capacity} byte cartridge ROM, and truncation is disabled")]
    CartridgeTooLarge {
        file_path: String,
        size: usize,
        capacity: usize,
    },
}

/// Build an address space from the configured boot ROM and cartridge files. Without a boot ROM the
/// overlay is unmapped up front and the I/O registers start in their post-boot state.
pub fn init_emulation_state(
    run_config: &RunConfig,
    memory_config: &MemoryConfig,
) -> Result<EmulationState, StartupError> {
    let cartridge = match Cartridge::from_file(&run_config.gb_file_path) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            return Err(StartupError::CartridgeRead {
                file_path: run_config.gb_file_path.clone(),
                source: err,
            })
        }
    };

    if !memory_config.allow_cartridge_truncation
        && cartridge.rom().len() > address::CARTRIDGE_ROM_SIZE
    {
        return Err(StartupError::CartridgeTooLarge {
            file_path: run_config.gb_file_path.clone(),
            size: cartridge.rom().len(),
            capacity: address::CARTRIDGE_ROM_SIZE,
        });
    }

    if !cartridge.header_checksum_valid() {
        log::warn!(
            "Header checksum mismatch in {}, a real boot ROM would lock up",
            run_config.gb_file_path
        );
    }

    let mut address_space = AddressSpace::new(*memory_config);
    address_space.load_cartridge_image(&cartridge);

    match &run_config.boot_rom_path {
        Some(boot_rom_path) => {
            let boot_rom = fs::read(boot_rom_path).map_err(|err| StartupError::BootRomRead {
                file_path: boot_rom_path.clone(),
                source: err,
            })?;
            address_space
                .load_boot_rom(&boot_rom)
                .map_err(|err| StartupError::BootRomLoad {
                    file_path: boot_rom_path.clone(),
                    source: err,
                })?;
        }
        None => {
            log::info!("No boot ROM provided, starting with boot ROM unmapped");
            address_space.skip_boot_rom();
        }
    }

    Ok(EmulationState {
        address_space,
        cartridge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn write_temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = env::temp_dir().join(format!("gbmmu-startup-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn run_config(gb_file_path: &PathBuf, boot_rom_path: Option<&PathBuf>) -> RunConfig {
        RunConfig {
            gb_file_path: gb_file_path.to_string_lossy().into_owned(),
            boot_rom_path: boot_rom_path.map(|path| path.to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn with_boot_rom() {
        let rom_path = write_temp_file("with-boot.gb", &[0xFF; 0x8000]);
        let boot_path = write_temp_file("with-boot.bin", &[0x31; 0x100]);

        let state = init_emulation_state(
            &run_config(&rom_path, Some(&boot_path)),
            &MemoryConfig::default(),
        )
        .unwrap();

        assert!(state.address_space.is_boot_rom_mapped());
        assert_eq!(0x31, state.address_space.read_address_u8(0x0000));
        assert_eq!(0xFF, state.address_space.read_address_u8(0x0150));
    }

    #[test]
    fn without_boot_rom() {
        let rom_path = write_temp_file("no-boot.gb", &[0xAB; 0x8000]);

        let state =
            init_emulation_state(&run_config(&rom_path, None), &MemoryConfig::default()).unwrap();

        assert!(!state.address_space.is_boot_rom_mapped());
        assert_eq!(0xAB, state.address_space.read_address_u8(0x0000));
    }

    #[test]
    fn oversized_boot_rom() {
        let rom_path = write_temp_file("big-boot.gb", &[0x00; 0x8000]);
        let boot_path = write_temp_file("big-boot.bin", &[0x00; 0x200]);

        let result = init_emulation_state(
            &run_config(&rom_path, Some(&boot_path)),
            &MemoryConfig::default(),
        );
        assert!(matches!(result, Err(StartupError::BootRomLoad { .. })));
    }

    #[test]
    fn truncation_disabled() {
        let rom_path = write_temp_file("big.gb", &[0x00; 0x10000]);
        let memory_config = MemoryConfig {
            allow_cartridge_truncation: false,
            ..MemoryConfig::default()
        };

        let result = init_emulation_state(&run_config(&rom_path, None), &memory_config);
        assert!(matches!(
            result,
            Err(StartupError::CartridgeTooLarge {
                size: 0x10000,
                capacity: 0x8000,
                ..
            })
        ));

        let state =
            init_emulation_state(&run_config(&rom_path, None), &MemoryConfig::default()).unwrap();
        assert_eq!(0x10000, state.cartridge.rom().len());
    }

    #[test]
    fn missing_cartridge() {
        let result = init_emulation_state(
            &run_config(&PathBuf::from("/nonexistent/gbmmu/cartridge.gb"), None),
            &MemoryConfig::default(),
        );
        assert!(matches!(result, Err(StartupError::CartridgeRead { .. })));
    }
}
