// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The two forms an encoded image can take: per-plane block grids, and the
//! flat entropy-coded field stream.

use crate::api::ChromaSubsampling;
use crate::block::CoefficientBlock;
use crate::entropy_coding::{decode_records, encode_records};
use crate::error::{Error, Result};
use crate::quant::MAX_COEFFICIENT;
use crate::util::tracing_wrappers::*;
use crate::zigzag::{flatten, unflatten, CoefficientSequence};
use crate::BLOCK_DIM;

/// Number of planes in an image (Y, U, V).
pub const NUM_PLANES: usize = 3;

/// Quantized coefficient blocks for each plane, before entropy coding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoefficientPlanes {
    pub subsampling: ChromaSubsampling,
    /// (blocks wide, blocks high)
    pub blocks: (usize, usize),
    /// Row-major blocks of the Y, U and V planes.
    pub planes: [Vec<CoefficientBlock>; NUM_PLANES],
}

impl CoefficientPlanes {
    pub fn num_blocks(&self) -> usize {
        self.blocks.0 * self.blocks.1
    }

    /// Size in pixels of the image these blocks describe.
    pub fn image_size(&self) -> (usize, usize) {
        (self.blocks.0 * BLOCK_DIM, self.blocks.1 * BLOCK_DIM)
    }

    /// Checks that every plane holds one block per grid position and that
    /// every coefficient is within [`MAX_COEFFICIENT`].
    pub fn validate(&self) -> Result<()> {
        let expected = self
            .blocks
            .0
            .checked_mul(self.blocks.1)
            .ok_or(Error::ArithmeticOverflow)?;
        for plane in &self.planes {
            if plane.len() != expected {
                return Err(Error::BlockCountMismatch(expected, plane.len()));
            }
            let out_of_range = plane
                .iter()
                .flat_map(|block| block.0.iter().flatten())
                .find(|c| c.unsigned_abs() > MAX_COEFFICIENT as u32);
            if let Some(&c) = out_of_range {
                return Err(Error::CoefficientOutOfRange(c, MAX_COEFFICIENT));
            }
        }
        Ok(())
    }

    /// Entropy codes the blocks, interleaving Y, U and V at each position.
    pub fn to_encoded_image(&self) -> Result<EncodedImage> {
        self.validate()?;
        let sequences: Vec<CoefficientSequence> = (0..self.num_blocks())
            .flat_map(|i| self.planes.iter().map(move |plane| flatten(&plane[i])))
            .collect();
        Ok(EncodedImage {
            subsampling: self.subsampling,
            blocks: self.blocks,
            fields: encode_records(&sequences),
        })
    }
}

/// Field counts describing an entropy-coded stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub fields: usize,
    pub blocks: usize,
    pub nonzero_coefficients: usize,
    pub end_of_block_markers: usize,
}

/// The entropy-coded form of an image.
///
/// The block grid dimensions are not recoverable from `fields`; they travel
/// alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub subsampling: ChromaSubsampling,
    /// (blocks wide, blocks high)
    pub blocks: (usize, usize),
    pub fields: Vec<i32>,
}

impl EncodedImage {
    pub fn image_size(&self) -> (usize, usize) {
        (self.blocks.0 * BLOCK_DIM, self.blocks.1 * BLOCK_DIM)
    }

    fn decode_sequences(&self) -> Result<Vec<CoefficientSequence>> {
        let count = self
            .blocks
            .0
            .checked_mul(self.blocks.1)
            .and_then(|n| n.checked_mul(NUM_PLANES))
            .ok_or(Error::ArithmeticOverflow)?;
        decode_records(&self.fields, count)
    }

    /// Entropy decodes the stream back into per-plane block grids.
    pub fn to_coefficient_planes(&self) -> Result<CoefficientPlanes> {
        let sequences = self.decode_sequences()?;
        let num_blocks = sequences.len() / NUM_PLANES;
        let mut planes: [Vec<CoefficientBlock>; NUM_PLANES] =
            array_init::array_init(|_| Vec::with_capacity(num_blocks));
        for position in sequences.chunks_exact(NUM_PLANES) {
            for (plane, sequence) in planes.iter_mut().zip(position) {
                plane.push(unflatten(sequence));
            }
        }
        Ok(CoefficientPlanes {
            subsampling: self.subsampling,
            blocks: self.blocks,
            planes,
        })
    }

    pub fn stats(&self) -> Result<StreamStats> {
        let sequences = self.decode_sequences()?;
        let stats = StreamStats {
            fields: self.fields.len(),
            blocks: sequences.len(),
            nonzero_coefficients: sequences
                .iter()
                .map(|s| s.0.iter().filter(|&&c| c != 0).count())
                .sum(),
            // The marker is written exactly when a block ends in zeros.
            end_of_block_markers: sequences.iter().filter(|s| s.0[63] == 0).count(),
        };
        debug!(?stats, "stream statistics");
        Ok(stats)
    }
}
