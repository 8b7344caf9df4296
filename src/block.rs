// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Tiling of planes and the fixed-size block types that flow through the
//! transform stages.

use crate::error::{Error, Result};
use crate::image::{Plane, Rect};
use crate::BLOCK_DIM;

/// Row-major grid of equally sized square tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    tile_dim: usize,
    // tiles across, tiles down
    size_in_tiles: (usize, usize),
    tiles: Vec<Plane>,
}

impl TileGrid {
    /// Builds a grid from row-major tiles, all of which must be
    /// `tile_dim`x`tile_dim`.
    pub fn new(
        size_in_tiles: (usize, usize),
        tile_dim: usize,
        tiles: Vec<Plane>,
    ) -> Result<TileGrid> {
        let expected = size_in_tiles
            .0
            .checked_mul(size_in_tiles.1)
            .ok_or(Error::ArithmeticOverflow)?;
        if tiles.len() != expected {
            return Err(Error::PixelCountMismatch(tiles.len(), expected));
        }
        if let Some(tile) = tiles.iter().find(|t| t.size() != (tile_dim, tile_dim)) {
            return Err(Error::MatrixShape {
                expected: tile_dim,
                rows: tile.size().1,
                cols: tile.size().0,
            });
        }
        Ok(TileGrid {
            tile_dim,
            size_in_tiles,
            tiles,
        })
    }

    pub fn tile_dim(&self) -> usize {
        self.tile_dim
    }

    /// (tiles across, tiles down)
    pub fn size_in_tiles(&self) -> (usize, usize) {
        self.size_in_tiles
    }

    /// Tile at block row `row`, block column `col`.
    pub fn tile(&self, row: usize, col: usize) -> &Plane {
        &self.tiles[row * self.size_in_tiles.0 + col]
    }

    pub fn tiles(&self) -> &[Plane] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Plane> {
        self.tiles
    }
}

/// Splits `plane` into `tile_dim`x`tile_dim` tiles. Both plane dimensions
/// must be multiples of `tile_dim`.
pub fn split(plane: &Plane, tile_dim: usize) -> Result<TileGrid> {
    let (xsize, ysize) = plane.size();
    if tile_dim == 0 || xsize % tile_dim != 0 || ysize % tile_dim != 0 {
        return Err(Error::UnalignedSize(xsize, ysize, tile_dim));
    }
    let size_in_tiles = (xsize / tile_dim, ysize / tile_dim);
    let mut tiles = Vec::with_capacity(size_in_tiles.0 * size_in_tiles.1);
    for row in 0..size_in_tiles.1 {
        for col in 0..size_in_tiles.0 {
            tiles.push(plane.crop(Rect {
                origin: (col * tile_dim, row * tile_dim),
                size: (tile_dim, tile_dim),
            })?);
        }
    }
    Ok(TileGrid {
        tile_dim,
        size_in_tiles,
        tiles,
    })
}

/// Reassembles a grid produced by [`split`] (or built tile by tile) into a
/// plane.
pub fn merge(grid: &TileGrid) -> Result<Plane> {
    let size = (
        grid.size_in_tiles
            .0
            .checked_mul(grid.tile_dim)
            .ok_or(Error::ArithmeticOverflow)?,
        grid.size_in_tiles
            .1
            .checked_mul(grid.tile_dim)
            .ok_or(Error::ArithmeticOverflow)?,
    );
    let mut plane = Plane::new(size)?;
    for row in 0..grid.size_in_tiles.1 {
        for col in 0..grid.size_in_tiles.0 {
            plane.paste(
                (col * grid.tile_dim, row * grid.tile_dim),
                grid.tile(row, col),
            )?;
        }
    }
    Ok(plane)
}

/// 8x8 block of spatial samples, indexed `[row][col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelTile(pub [[i32; BLOCK_DIM]; BLOCK_DIM]);

/// 8x8 block of quantized frequency coefficients, indexed `[u][v]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoefficientBlock(pub [[i32; BLOCK_DIM]; BLOCK_DIM]);

/// 8x8 block of unquantized forward DCT output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DctBlock(pub [[f64; BLOCK_DIM]; BLOCK_DIM]);

impl TryFrom<&Plane> for PixelTile {
    type Error = Error;

    fn try_from(plane: &Plane) -> Result<PixelTile> {
        if plane.size() != (BLOCK_DIM, BLOCK_DIM) {
            return Err(Error::MatrixShape {
                expected: BLOCK_DIM,
                rows: plane.size().1,
                cols: plane.size().0,
            });
        }
        Ok(PixelTile(array_init::array_init(|row| {
            array_init::array_init(|col| plane.get(col, row))
        })))
    }
}

impl PixelTile {
    pub fn to_plane(&self) -> Result<Plane> {
        Plane::from_vec((BLOCK_DIM, BLOCK_DIM), self.0.concat())
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn numbered_plane(size: (usize, usize)) -> Plane {
        Plane::from_vec(size, (0..(size.0 * size.1) as i32).collect()).unwrap()
    }

    #[test]
    fn split_is_row_major() -> Result<()> {
        let plane = numbered_plane((16, 8));
        let grid = split(&plane, 8)?;
        assert_eq!(grid.size_in_tiles(), (2, 1));
        assert_eq!(grid.tile(0, 1).get(0, 0), 8);
        assert_eq!(grid.tile(0, 1).get(7, 7), 7 * 16 + 15);
        let grid = split(&plane, 4)?;
        assert_eq!(grid.size_in_tiles(), (4, 2));
        assert_eq!(grid.tile(1, 2).get(0, 0), 4 * 16 + 8);
        Ok(())
    }

    #[test]
    fn merge_inverts_split() -> Result<()> {
        let plane = numbered_plane((24, 16));
        assert_eq!(merge(&split(&plane, 8)?)?, plane);
        assert_eq!(merge(&split(&plane, 4)?)?, plane);
        Ok(())
    }

    #[test]
    fn unaligned_plane_rejected() -> Result<()> {
        let plane = Plane::new((12, 16))?;
        assert!(matches!(
            split(&plane, 8),
            Err(Error::UnalignedSize(12, 16, 8))
        ));
        assert!(split(&plane, 0).is_err());
        Ok(())
    }

    #[test]
    fn grid_checks_tile_shape() -> Result<()> {
        let tiles = vec![Plane::new((8, 8))?, Plane::new((4, 4))?];
        assert!(matches!(
            TileGrid::new((2, 1), 8, tiles),
            Err(Error::MatrixShape { .. })
        ));
        assert!(TileGrid::new((2, 2), 8, vec![Plane::new((8, 8))?]).is_err());
        Ok(())
    }

    #[test]
    fn pixel_tile_conversion() -> Result<()> {
        let plane = numbered_plane((8, 8));
        let tile = PixelTile::try_from(&plane)?;
        assert_eq!(tile.0[2][5], 2 * 8 + 5);
        assert_eq!(tile.to_plane()?, plane);
        assert!(matches!(
            PixelTile::try_from(&Plane::new((4, 4))?),
            Err(Error::MatrixShape { expected: 8, .. })
        ));
        Ok(())
    }
}
