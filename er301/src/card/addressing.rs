// er301-rs/er301/src/card/addressing.rs

//! Block/sector arithmetic for Mifare Classic memory.
//!
//! The first 32 sectors hold 4 blocks each (blocks 0..128); every sector
//! after that holds 16 blocks. The last block of a sector is its trailer.

use crate::types::CardType;

/// Blocks below this index live in 4-block sectors
const SMALL_SECTOR_LIMIT: usize = 128;
const SMALL_SECTOR_BLOCKS: usize = 4;
const LARGE_SECTOR_BLOCKS: usize = 16;
const SMALL_SECTOR_COUNT: usize = SMALL_SECTOR_LIMIT / SMALL_SECTOR_BLOCKS;

/// Sector owning `block`.
pub fn sector_of(block: usize) -> usize {
    if block < SMALL_SECTOR_LIMIT {
        block / SMALL_SECTOR_BLOCKS
    } else {
        SMALL_SECTOR_COUNT + (block - SMALL_SECTOR_LIMIT) / LARGE_SECTOR_BLOCKS
    }
}

/// True for the last block of a sector.
pub fn is_trailer(block: usize) -> bool {
    sector_of(block + 1) != sector_of(block)
}

/// Number of blocks read from a card of this type. Only the 4K layout is
/// special-cased; every other type reads as 64 blocks.
pub fn block_count(card_type: CardType) -> usize {
    match card_type {
        CardType::Classic4K => 256,
        _ => 64,
    }
}

/// Blocks in `sector`: 4 in the first 32 sectors, 16 after that
pub fn blocks_in_sector(sector: usize) -> usize {
    if sector < SMALL_SECTOR_COUNT {
        SMALL_SECTOR_BLOCKS
    } else {
        LARGE_SECTOR_BLOCKS
    }
}

/// Index of the first block of `sector`
pub fn first_block_of(sector: usize) -> usize {
    if sector < SMALL_SECTOR_COUNT {
        sector * SMALL_SECTOR_BLOCKS
    } else {
        SMALL_SECTOR_LIMIT + (sector - SMALL_SECTOR_COUNT) * LARGE_SECTOR_BLOCKS
    }
}

/// Index of the trailer block of `sector`
pub fn trailer_of(sector: usize) -> usize {
    first_block_of(sector) + blocks_in_sector(sector) - 1
}

/// Number of sectors spanned by `blocks` blocks.
pub fn sector_count(blocks: usize) -> usize {
    if blocks == 0 { 0 } else { sector_of(blocks - 1) + 1 }
}
