// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use jpegsim_transforms::forward_dct;

use crate::api::{ChromaSubsampling, EncoderOptions};
use crate::block::{split, CoefficientBlock, DctBlock, PixelTile};
use crate::coefficients::{CoefficientPlanes, EncodedImage};
use crate::color::image_to_planes;
use crate::error::{Error, Result};
use crate::image::{Plane, RgbImage};
use crate::quant::quantize;
use crate::sample::{downsample, upsample};
use crate::util::tracing_wrappers::*;
use crate::BLOCK_DIM;

/// Forward DCT and quantization of one 8x8 tile.
pub fn transform_tile(tile: &PixelTile) -> CoefficientBlock {
    quantize(&DctBlock(forward_dct(&tile.0)))
}

fn transform_tiles(tiles: &[Plane]) -> Result<Vec<CoefficientBlock>> {
    let transform = |tile: &Plane| -> Result<CoefficientBlock> {
        Ok(transform_tile(&PixelTile::try_from(tile)?))
    };
    #[cfg(feature = "parallel")]
    let blocks = tiles.par_iter().map(transform).collect();
    #[cfg(not(feature = "parallel"))]
    let blocks = tiles.iter().map(transform).collect();
    blocks
}

/// Tiles a chroma plane, going through the subsampled representation when
/// requested. Every returned tile is 8x8.
fn chroma_tiles(plane: &Plane, subsampling: ChromaSubsampling) -> Result<Vec<Plane>> {
    match subsampling {
        ChromaSubsampling::Yuv444 => Ok(split(plane, BLOCK_DIM)?.into_tiles()),
        ChromaSubsampling::Yuv420 => {
            let small = downsample(plane)?;
            split(&small, subsampling.chroma_tile_dim())?
                .tiles()
                .iter()
                .map(upsample)
                .collect()
        }
    }
}

/// Turns RGB images into coefficient streams.
#[derive(Debug, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Encoder {
        Encoder { options }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Rejects images the pipeline cannot tile, before any work is done.
    pub fn check_size(&self, size: (usize, usize)) -> Result<()> {
        if size.0 == 0 || size.1 == 0 {
            return Err(Error::InvalidImageSize(size.0, size.1));
        }
        if size.0 % BLOCK_DIM != 0 || size.1 % BLOCK_DIM != 0 {
            return Err(Error::UnalignedSize(size.0, size.1, BLOCK_DIM));
        }
        self.options.limits.check(size)
    }

    /// Runs every stage up to quantization and returns the per-plane block
    /// grids.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn encode_planes(&self, image: &RgbImage) -> Result<CoefficientPlanes> {
        let size = image.size();
        self.check_size(size)?;
        let subsampling = self.options.subsampling;
        debug!(?size, ?subsampling, "encoding image");

        let [y, u, v] = image_to_planes(image)?;
        let luma = split(&y, BLOCK_DIM)?;
        let blocks = luma.size_in_tiles();
        let planes = [
            transform_tiles(luma.tiles())?,
            transform_tiles(&chroma_tiles(&u, subsampling)?)?,
            transform_tiles(&chroma_tiles(&v, subsampling)?)?,
        ];
        debug!(?blocks, "transformed blocks");
        let planes = CoefficientPlanes {
            subsampling,
            blocks,
            planes,
        };
        planes.validate()?;
        Ok(planes)
    }

    /// Encodes `image` into the interleaved entropy-coded stream.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn encode(&self, image: &RgbImage) -> Result<EncodedImage> {
        let encoded = self.encode_planes(image)?.to_encoded_image()?;
        debug!(fields = encoded.fields.len(), "encoded image");
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::api::CodecLimits;
    use crate::image::Rgb;

    #[test]
    fn black_image_blocks() -> Result<()> {
        let image = RgbImage::new_with_value((16, 16), Rgb::BLACK)?;
        let planes = Encoder::default().encode_planes(&image)?;
        assert_eq!(planes.blocks, (2, 2));
        for (plane, dc) in planes.planes.iter().zip([-170, 0, 0]) {
            assert_eq!(plane.len(), 4);
            for block in plane {
                let mut expected = CoefficientBlock::default();
                expected.0[0][0] = dc;
                assert_eq!(*block, expected);
            }
        }
        Ok(())
    }

    #[test]
    fn checkerboard_high_frequency() {
        let mut tile = PixelTile([[0; BLOCK_DIM]; BLOCK_DIM]);
        for (x, row) in tile.0.iter_mut().enumerate() {
            for (y, sample) in row.iter_mut().enumerate() {
                *sample = if (x + y) % 2 == 0 { 255 } else { 0 };
            }
        }
        let block = transform_tile(&tile);
        assert_eq!(block.0[7][7], 20);
        assert_eq!(block.0[0][0], 0);
    }

    #[test]
    fn rejects_before_work() {
        let encoder = Encoder::default();
        let image = RgbImage::new_with_value((12, 16), Rgb::WHITE).unwrap();
        let err = encoder.encode(&image).unwrap_err();
        assert!(matches!(err, Error::UnalignedSize(12, 16, 8)));
        assert_eq!(err.kind(), crate::error::ErrorKind::Dimension);
        let image = RgbImage::new_with_value((0, 8), Rgb::WHITE).unwrap();
        assert!(matches!(
            encoder.encode(&image),
            Err(Error::InvalidImageSize(0, 8))
        ));
        let limited = Encoder::new(EncoderOptions::default().with_limits(CodecLimits {
            max_pixels: Some(64),
        }));
        let image = RgbImage::new_with_value((16, 8), Rgb::WHITE).unwrap();
        assert!(matches!(
            limited.encode(&image),
            Err(Error::ImageSizeTooLarge(16, 8))
        ));
    }

    #[test]
    fn chroma_tiles_are_upsampled() -> Result<()> {
        let plane = Plane::from_vec((16, 8), (0..128).collect())?;
        let tiles = chroma_tiles(&plane, ChromaSubsampling::Yuv420)?;
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.size() == (8, 8)));
        // Top-left 2x2 group of the source averages to (0 + 1 + 16 + 17) / 4.
        assert_eq!(tiles[0].get(0, 0), 8);
        assert_eq!(tiles[0].get(1, 1), 8);
        let tiles = chroma_tiles(&plane, ChromaSubsampling::Yuv444)?;
        assert_eq!(tiles[1].get(0, 0), 8);
        Ok(())
    }
}
