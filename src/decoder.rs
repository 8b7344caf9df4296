// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use jpegsim_transforms::inverse_dct;

use crate::api::{ChromaSubsampling, DecoderOptions};
use crate::block::{merge, CoefficientBlock, PixelTile, TileGrid};
use crate::coefficients::{CoefficientPlanes, EncodedImage};
use crate::color::planes_to_image;
use crate::error::{Error, Result};
use crate::image::{Plane, RgbImage};
use crate::quant::dequantize;
use crate::sample::{downsample, upsample};
use crate::util::tracing_wrappers::*;
use crate::BLOCK_DIM;

/// Dequantization and inverse DCT of one block. Samples are not clamped.
pub fn inverse_transform_block(block: &CoefficientBlock) -> PixelTile {
    PixelTile(inverse_dct(&dequantize(block).0))
}

fn inverse_transform_blocks(blocks: &[CoefficientBlock]) -> Result<Vec<Plane>> {
    let inverse = |block: &CoefficientBlock| inverse_transform_block(block).to_plane();
    #[cfg(feature = "parallel")]
    let tiles = blocks.par_iter().map(inverse).collect();
    #[cfg(not(feature = "parallel"))]
    let tiles = blocks.iter().map(inverse).collect();
    tiles
}

fn chroma_plane(
    tiles: Vec<Plane>,
    blocks: (usize, usize),
    subsampling: ChromaSubsampling,
) -> Result<Plane> {
    match subsampling {
        ChromaSubsampling::Yuv444 => merge(&TileGrid::new(blocks, BLOCK_DIM, tiles)?),
        ChromaSubsampling::Yuv420 => {
            let small = tiles.iter().map(downsample).collect::<Result<Vec<_>>>()?;
            let grid = TileGrid::new(blocks, subsampling.chroma_tile_dim(), small)?;
            upsample(&merge(&grid)?)
        }
    }
}

/// Reconstructs RGB images from coefficient streams.
#[derive(Debug, Default)]
pub struct Decoder {
    options: DecoderOptions,
}

impl Decoder {
    pub fn new(options: DecoderOptions) -> Decoder {
        Decoder { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    fn check_blocks(&self, blocks: (usize, usize)) -> Result<()> {
        let size = (
            blocks.0.checked_mul(BLOCK_DIM).ok_or(Error::ArithmeticOverflow)?,
            blocks.1.checked_mul(BLOCK_DIM).ok_or(Error::ArithmeticOverflow)?,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(Error::InvalidImageSize(size.0, size.1));
        }
        self.options.limits.check(size)
    }

    /// Reconstructs an image from per-plane block grids.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn decode_planes(&self, planes: &CoefficientPlanes) -> Result<RgbImage> {
        self.check_blocks(planes.blocks)?;
        planes.validate()?;
        debug!(blocks = ?planes.blocks, subsampling = ?planes.subsampling, "decoding planes");
        let [y, u, v] = &planes.planes;
        let luma = merge(&TileGrid::new(
            planes.blocks,
            BLOCK_DIM,
            inverse_transform_blocks(y)?,
        )?)?;
        let u = chroma_plane(inverse_transform_blocks(u)?, planes.blocks, planes.subsampling)?;
        let v = chroma_plane(inverse_transform_blocks(v)?, planes.blocks, planes.subsampling)?;
        planes_to_image(&[luma, u, v])
    }

    /// Decodes the entropy-coded stream. The block grid dimensions carried by
    /// `encoded` determine how many records are read.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn decode(&self, encoded: &EncodedImage) -> Result<RgbImage> {
        self.check_blocks(encoded.blocks)?;
        debug!(fields = encoded.fields.len(), "decoding stream");
        self.decode_planes(&encoded.to_coefficient_planes()?)
    }
}
