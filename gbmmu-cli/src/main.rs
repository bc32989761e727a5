use anyhow::{anyhow, Context};
use clap::Parser;
use gbmmu_core::memory::region::{self, REGION_TABLE};
use gbmmu_core::memory::vram;
use gbmmu_core::{AddressSpace, MemoryConfig, RunConfig};
use std::fs;
use std::path::Path;

#[derive(Parser)]
struct Cli {
    #[arg(short = 'f', long = "gb_file_path")]
    gb_file_path: String,
    #[arg(short = 'b', long = "boot_rom_path")]
    boot_rom_path: Option<String>,
    /// TOML file with memory settings
    #[arg(short = 'c', long = "config")]
    config_path: Option<String>,
    /// Unmap the boot ROM by writing to the BOOT register before dumping
    #[arg(long = "unmap_boot_rom", default_value_t = false)]
    unmap_boot_rom: bool,
    /// Address range to hex dump, as START:LEN or START-END in hex (repeatable)
    #[arg(short = 'd', long = "dump")]
    dumps: Vec<String>,
    /// Print the region table with the store currently backing each region
    #[arg(long = "regions", default_value_t = false)]
    print_regions: bool,
    /// Print the parsed cartridge header
    #[arg(long = "header", default_value_t = false)]
    print_header: bool,
    /// Write the VRAM tile sheet as a binary PGM image
    #[arg(long = "tile_sheet")]
    tile_sheet_path: Option<String>,
}

fn load_memory_config(config_path: Option<&str>) -> anyhow::Result<MemoryConfig> {
    let Some(config_path) = config_path else {
        return Ok(MemoryConfig::default());
    };

    let config_str = fs::read_to_string(config_path)
        .with_context(|| format!("error reading TOML config file from '{config_path}'"))?;
    let config: MemoryConfig = toml::from_str(&config_str)
        .with_context(|| format!("error parsing memory config from TOML file at '{config_path}'"))?;

    Ok(config)
}

fn parse_hex_u16(s: &str) -> anyhow::Result<u16> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).with_context(|| format!("invalid hex address: '{s}'"))
}

/// Parse START:LEN or START-END (inclusive) into a start address and a byte count.
fn parse_dump_range(s: &str) -> anyhow::Result<(u16, usize)> {
    if let Some((start, len)) = s.split_once(':') {
        let start = parse_hex_u16(start)?;
        let len = usize::from(parse_hex_u16(len)?);
        return Ok((start, len));
    }

    if let Some((start, end)) = s.split_once('-') {
        let start = parse_hex_u16(start)?;
        let end = parse_hex_u16(end)?;
        if end < start {
            return Err(anyhow!("dump range end {end:04X} is before start {start:04X}"));
        }
        return Ok((start, usize::from(end - start) + 1));
    }

    Err(anyhow!(
        "invalid dump range '{s}', expected START:LEN or START-END"
    ))
}

fn hex_dump(address_space: &AddressSpace, start: u16, len: usize) {
    for line_start in (0..len).step_by(16) {
        let line_address = start.wrapping_add(line_start as u16);
        let bytes: Vec<_> = (line_start..len.min(line_start + 16))
            .map(|i| format!("{:02X}", address_space.read_address_u8(start.wrapping_add(i as u16))))
            .collect();
        println!("{line_address:04X}: {}", bytes.join(" "));
    }
}

fn print_regions(address_space: &AddressSpace) {
    for region in &REGION_TABLE {
        let backing_store = region::decode(region.start, address_space.is_boot_rom_mapped()).store;
        if backing_store == region.store {
            println!("{region}");
        } else {
            println!("{region} (start currently mapped to {backing_store})");
        }
    }
}

fn write_tile_sheet(address_space: &AddressSpace, path: &str) -> anyhow::Result<()> {
    let sheet = vram::render_tile_sheet(address_space.vram());

    let mut pgm = format!(
        "P5\n{} {}\n255\n",
        vram::TILE_SHEET_WIDTH,
        vram::TILE_SHEET_HEIGHT
    )
    .into_bytes();
    // Colour index 0 is white, 3 is black
    pgm.extend(sheet.iter().map(|&color_index| 255 - 85 * color_index));

    fs::write(Path::new(path), pgm)
        .with_context(|| format!("error writing tile sheet to '{path}'"))?;

    log::info!("Wrote tile sheet to {path}");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();

    let memory_config = load_memory_config(args.config_path.as_deref())?;
    let run_config = RunConfig {
        gb_file_path: args.gb_file_path,
        boot_rom_path: args.boot_rom_path,
    };

    log::info!("Running with config:\n{run_config}{memory_config}");

    let mut emulation_state = gbmmu_core::init_emulation_state(&run_config, &memory_config)?;

    if args.unmap_boot_rom {
        emulation_state.address_space.write_address_u8(0xFF50, 0x01);
    }

    if args.print_header {
        print!("{}", emulation_state.cartridge);
    }

    if args.print_regions {
        print_regions(&emulation_state.address_space);
    }

    for dump in &args.dumps {
        let (start, len) = parse_dump_range(dump)?;
        hex_dump(&emulation_state.address_space, start, len);
    }

    if let Some(tile_sheet_path) = &args.tile_sheet_path {
        write_tile_sheet(&emulation_state.address_space, tile_sheet_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_ranges() {
        assert_eq!((0xC000, 0x40), parse_dump_range("C000:40").unwrap());
        assert_eq!((0xFF00, 0x80), parse_dump_range("0xFF00-FF7F").unwrap());
        assert_eq!((0xFFFF, 1), parse_dump_range("FFFF-FFFF").unwrap());

        assert!(parse_dump_range("C000").is_err());
        assert!(parse_dump_range("C100-C000").is_err());
        assert!(parse_dump_range("G000:10").is_err());
    }

    #[test]
    fn memory_config_from_toml() {
        let config: MemoryConfig = toml::from_str("open_bus_value = 0").unwrap();
        assert_eq!(0x00, config.open_bus_value);
        assert!(config.allow_cartridge_truncation);

        let config: MemoryConfig = toml::from_str("").unwrap();
        assert_eq!(MemoryConfig::default(), config);
    }
}
