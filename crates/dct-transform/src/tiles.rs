//! Tiling of an image into N×N blocks
//!
//! Tiles step by N in both axes with no overlap. When a side is not a
//! multiple of N the last tile on that side only partially covers the image;
//! its uncovered cells read as zero and are never written back.

use dct_core::consts::PIXEL_SCALE;
use dct_core::{Dimensions, GreyImage};

use crate::Block;

/// Corner the tile grid is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileOrigin {
    /// First tile starts at the top-left pixel; partial tiles fall on the
    /// right and bottom edges
    #[default]
    TopLeft,
    /// First tile starts at the bottom-left pixel; partial tiles fall on the
    /// right and top edges
    BottomLeft,
}

/// One N×N tile, positioned by its top-left cell in image coordinates
///
/// `y` may be negative for the top row of a bottom-anchored grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
    pub size: usize,
}

impl Tile {
    /// Image coordinates of block cell `(row, col)`, if inside the image
    #[inline]
    pub fn pixel(&self, row: usize, col: usize, dims: Dimensions) -> Option<(u32, u32)> {
        let x = self.x + col as i64;
        let y = self.y + row as i64;
        if x >= 0 && y >= 0 && x < dims.width as i64 && y < dims.height as i64 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }
}

/// Number of tiles needed to cover `size` pixels
pub fn num_tiles(size: usize, tile_size: usize) -> usize {
    size.div_ceil(tile_size)
}

/// All tiles covering `dims`, in row-major order from the top
pub fn tile_grid(dims: Dimensions, tile_size: usize, origin: TileOrigin) -> Vec<Tile> {
    let tiles_x = num_tiles(dims.width as usize, tile_size);
    let tiles_y = num_tiles(dims.height as usize, tile_size);
    let n = tile_size as i64;
    let height = dims.height as i64;

    let mut tiles = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y as i64 {
        let y = match origin {
            TileOrigin::TopLeft => ty * n,
            // Count tile rows up from the bottom edge, emit them top first
            TileOrigin::BottomLeft => height - (tiles_y as i64 - ty) * n,
        };
        for tx in 0..tiles_x as i64 {
            tiles.push(Tile {
                x: tx * n,
                y,
                size: tile_size,
            });
        }
    }

    tiles
}

/// Copy a tile's pixels into a block, scaled to the transform's working range
pub fn extract_tile(image: &GreyImage, tile: &Tile) -> Block {
    let dims = image.dimensions();
    let data = image.data();
    let width = dims.width as usize;

    let mut block = Block::zeros(tile.size);
    for row in 0..tile.size {
        for col in 0..tile.size {
            if let Some((x, y)) = tile.pixel(row, col, dims) {
                block.set(row, col, PIXEL_SCALE * data[y as usize * width + x as usize]);
            }
        }
    }
    block
}

/// Write a block's in-bounds cells back into an image, undoing the scaling
pub fn insert_tile(block: &Block, image: &mut GreyImage, tile: &Tile) {
    let dims = image.dimensions();
    let width = dims.width as usize;
    let data = image.data_mut();

    for row in 0..tile.size {
        for col in 0..tile.size {
            if let Some((x, y)) = tile.pixel(row, col, dims) {
                data[y as usize * width + x as usize] = block.get(row, col) / PIXEL_SCALE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_tiles() {
        assert_eq!(num_tiles(8, 4), 2);
        assert_eq!(num_tiles(9, 4), 3);
        assert_eq!(num_tiles(3, 4), 1);
        assert_eq!(num_tiles(5, 1), 5);
    }

    #[test]
    fn test_top_left_grid() {
        let tiles = tile_grid(Dimensions::new(10, 6), 4, TileOrigin::TopLeft);
        assert_eq!(tiles.len(), 6);
        assert_eq!((tiles[0].x, tiles[0].y), (0, 0));
        assert_eq!((tiles[2].x, tiles[2].y), (8, 0));
        assert_eq!((tiles[3].x, tiles[3].y), (0, 4));
    }

    #[test]
    fn test_bottom_left_grid() {
        let tiles = tile_grid(Dimensions::new(4, 6), 4, TileOrigin::BottomLeft);
        assert_eq!(tiles.len(), 2);
        // Top row is the partial one
        assert_eq!(tiles[0].y, -2);
        assert_eq!(tiles[1].y, 2);
    }

    #[test]
    fn test_origins_agree_on_aligned_images() {
        let dims = Dimensions::new(12, 8);
        assert_eq!(
            tile_grid(dims, 4, TileOrigin::TopLeft),
            tile_grid(dims, 4, TileOrigin::BottomLeft)
        );
    }

    #[test]
    fn test_extract_pads_with_zero_and_scales() {
        let image = GreyImage::filled(Dimensions::new(3, 3), 0.5).unwrap();
        let tile = tile_grid(image.dimensions(), 4, TileOrigin::TopLeft)[0];
        let block = extract_tile(&image, &tile);

        assert_eq!(block.get(0, 0), 128.0);
        assert_eq!(block.get(2, 2), 128.0);
        assert_eq!(block.get(3, 0), 0.0);
        assert_eq!(block.get(0, 3), 0.0);
    }

    #[test]
    fn test_extract_insert_roundtrip() {
        let dims = Dimensions::new(7, 5);
        let image = GreyImage::from_fn(dims, |x, y| (x + 3 * y) as f64 / 32.0).unwrap();
        let mut copy = GreyImage::new(dims).unwrap();

        for origin in [TileOrigin::TopLeft, TileOrigin::BottomLeft] {
            for tile in tile_grid(dims, 3, origin) {
                insert_tile(&extract_tile(&image, &tile), &mut copy, &tile);
            }
            assert_eq!(copy, image);
        }
    }
}
