#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: u16,
    pub end_inclusive: u16,
}

const TILE_MAP_AREA_0: AddressRange = AddressRange {
    start: 0x9800,
    end_inclusive: 0x9BFF,
};

const TILE_MAP_AREA_1: AddressRange = AddressRange {
    start: 0x9C00,
    end_inclusive: 0x9FFF,
};

/// How background/window tile indices are translated into tile data addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileDataRange {
    /// Tiles 0-255 at 0x8000-0x8FFF, unsigned index.
    Block0,
    /// Tiles -128-127 relative to 0x9000, signed index.
    Block2,
}

impl TileDataRange {
    /// Return the address of the first byte of the given tile.
    pub fn tile_address(self, tile_index: u8) -> u16 {
        match self {
            Self::Block0 => 0x8000 + 16 * u16::from(tile_index),
            Self::Block2 => {
                let offset = 16 * i32::from(tile_index as i8);
                (0x9000 + offset) as u16
            }
        }
    }
}

/// A read-only view around the LCDC register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcdc<'a>(pub(super) &'a u8);

impl Lcdc<'_> {
    pub fn lcd_enabled(self) -> bool {
        *self.0 & 0x80 != 0
    }

    pub fn window_tile_map_area(self) -> AddressRange {
        if *self.0 & 0x40 != 0 {
            TILE_MAP_AREA_1
        } else {
            TILE_MAP_AREA_0
        }
    }

    pub fn window_enabled(self) -> bool {
        *self.0 & 0x20 != 0
    }

    pub fn bg_tile_data_area(self) -> TileDataRange {
        if *self.0 & 0x10 != 0 {
            TileDataRange::Block0
        } else {
            TileDataRange::Block2
        }
    }

    pub fn bg_tile_map_area(self) -> AddressRange {
        if *self.0 & 0x08 != 0 {
            TILE_MAP_AREA_1
        } else {
            TILE_MAP_AREA_0
        }
    }

    pub fn bg_enabled(self) -> bool {
        *self.0 & 0x01 != 0
    }
}
