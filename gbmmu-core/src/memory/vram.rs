//! Helpers for scanning tile data out of VRAM, for renderers and debug views that read VRAM in bulk
//! through the address space's reference accessors.

use crate::memory::ioregisters::IoRegister;
use crate::memory::{address, AddressSpace};

pub const TILE_SIZE_BYTES: usize = 16;
pub const TILE_COUNT: usize = 384;

const TILES_PER_ROW: usize = 16;

pub const TILE_SHEET_WIDTH: usize = TILES_PER_ROW * 8;
pub const TILE_SHEET_HEIGHT: usize = (TILE_COUNT / TILES_PER_ROW) * 8;

pub type TilePixels = [[u8; 8]; 8];

/// Decode a 2bpp tile into colour indices 0-3. Each row is two bytes, the first holding the low bit
/// of every pixel and the second the high bit, leftmost pixel in bit 7.
pub fn decode_tile(tile: &[u8; TILE_SIZE_BYTES]) -> TilePixels {
    let mut pixels = [[0; 8]; 8];
    for (row, row_pixels) in pixels.iter_mut().enumerate() {
        let lsb = tile[2 * row];
        let msb = tile[2 * row + 1];
        for (col, pixel) in row_pixels.iter_mut().enumerate() {
            let bit = 7 - col;
            *pixel = (((msb >> bit) & 0x01) << 1) | ((lsb >> bit) & 0x01);
        }
    }
    pixels
}

/// Render all 384 tiles in VRAM into a 128x192 buffer of colour indices, 16 tiles per row.
pub fn render_tile_sheet(vram: &[u8; address::VRAM_SIZE]) -> Vec<u8> {
    let mut buffer = vec![0; TILE_SHEET_WIDTH * TILE_SHEET_HEIGHT];

    for (tile_index, tile) in vram[..TILE_COUNT * TILE_SIZE_BYTES]
        .chunks_exact(TILE_SIZE_BYTES)
        .enumerate()
    {
        let mut tile_bytes = [0; TILE_SIZE_BYTES];
        tile_bytes.copy_from_slice(tile);
        let pixels = decode_tile(&tile_bytes);

        let base_x = (tile_index % TILES_PER_ROW) * 8;
        let base_y = (tile_index / TILES_PER_ROW) * 8;
        for (row, row_pixels) in pixels.iter().enumerate() {
            let start = (base_y + row) * TILE_SHEET_WIDTH + base_x;
            buffer[start..start + 8].copy_from_slice(row_pixels);
        }
    }

    buffer
}

/// Decode the background tile at the given position of the background tile map, using the tile
/// map and tile data areas currently selected by LCDC.
pub fn background_tile(address_space: &AddressSpace, map_x: u8, map_y: u8) -> TilePixels {
    let lcdc = address_space.io_registers().lcdc();

    let tile_map = address_space.region_slice(lcdc.bg_tile_map_area().start);
    let map_index = 32 * usize::from(map_y % 32) + usize::from(map_x % 32);
    let tile_index = tile_map[map_index];

    let tile_address = lcdc.bg_tile_data_area().tile_address(tile_index);
    let mut tile = [0; TILE_SIZE_BYTES];
    tile.copy_from_slice(&address_space.region_slice(tile_address)[..TILE_SIZE_BYTES]);

    decode_tile(&tile)
}

/// Map a colour index to a shade (0 = white, 3 = black) through the BGP palette register.
pub fn bg_shade(address_space: &AddressSpace, color_index: u8) -> u8 {
    let bgp = address_space.io_registers().read_register(IoRegister::BGP);
    (bgp >> (2 * (color_index & 0x03))) & 0x03
}
