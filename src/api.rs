// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Encoder and decoder configuration.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};
use crate::BLOCK_DIM;

/// How the U and V planes are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ChromaSubsampling {
    /// Chroma is averaged over 2x2 pixel groups, tiled at 4x4, and
    /// replicated back to 8x8 before the transform.
    #[default]
    Yuv420 = 0,
    /// Chroma is transformed at full resolution.
    Yuv444 = 1,
}

impl ChromaSubsampling {
    /// Side length of a chroma tile before it reaches the transform.
    pub fn chroma_tile_dim(self) -> usize {
        match self {
            ChromaSubsampling::Yuv420 => BLOCK_DIM / 2,
            ChromaSubsampling::Yuv444 => BLOCK_DIM,
        }
    }
}

/// Resource limits applied before any work is done.
///
/// # Example
///
/// ```
/// use jpegsim::api::CodecLimits;
///
/// // No restrictions (default)
/// let limits = CodecLimits::default();
/// assert!(limits.check((1 << 20, 1 << 20)).is_ok());
///
/// // Reject anything above ~1 billion pixels
/// let limits = CodecLimits::default_safe();
/// assert!(limits.check((1 << 20, 1 << 20)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CodecLimits {
    /// Maximum total pixels allowed (width * height).
    /// Default: `None` (unlimited).
    /// Recommended safe: `1 << 30`.
    pub max_pixels: Option<usize>,
}

impl CodecLimits {
    /// Returns limits with recommended safe defaults.
    pub fn default_safe() -> Self {
        Self {
            max_pixels: Some(1 << 30),
        }
    }

    pub fn check(&self, size: (usize, usize)) -> Result<()> {
        let pixels = size.0.checked_mul(size.1);
        match (pixels, self.max_pixels) {
            (None, _) => Err(Error::ImageSizeTooLarge(size.0, size.1)),
            (Some(pixels), Some(max)) if pixels > max => {
                Err(Error::ImageSizeTooLarge(size.0, size.1))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct EncoderOptions {
    pub subsampling: ChromaSubsampling,
    pub limits: CodecLimits,
}

impl EncoderOptions {
    pub fn with_subsampling(mut self, subsampling: ChromaSubsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    pub fn with_limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct DecoderOptions {
    pub limits: CodecLimits,
}

impl DecoderOptions {
    pub fn with_limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }
}
