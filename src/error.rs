// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Image or plane dimensions are not aligned to the tile size.
    Dimension,
    /// The coefficient stream cannot be turned back into 64-coefficient blocks.
    MalformedStream,
    /// A zig-zag or tile input has the wrong shape.
    Shape,
    /// A configured limit was exceeded.
    Limit,
    /// The serialized container is invalid.
    Container,
}

#[derive(Error, Debug)]
pub enum Error {
    // Dimension errors
    #[error("Image size {0}x{1} is not a multiple of the {2}x{2} tile size")]
    UnalignedSize(usize, usize, usize),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Pixel buffer holds {0} pixels, expected {1}")]
    PixelCountMismatch(usize, usize),
    #[error("Plane size mismatch: {0}x{1} vs {2}x{3}")]
    PlaneSizeMismatch(usize, usize, usize, usize),
    #[error("Rect out of bounds: {0}x{1}+{2}+{3} rect in {4}x{5} plane")]
    RectOutOfBounds(usize, usize, usize, usize, usize, usize),
    // Malformed stream errors
    #[error("Stream truncated at field {0}")]
    TruncatedStream(usize),
    #[error("Zero run of {run} at coefficient {position} overflows the block")]
    RunOverflow { run: i32, position: usize },
    #[error("Invalid run length {0}")]
    InvalidRunLength(i32),
    #[error("Size field {size} does not match amplitude {amplitude}")]
    SizeMismatch { size: i32, amplitude: i32 },
    #[error("Literal with zero amplitude at coefficient {0}")]
    ZeroAmplitude(usize),
    #[error("Coefficient {0} is outside [-{1}, {1}]")]
    CoefficientOutOfRange(i32, i32),
    #[error("Expected {0} blocks, stream holds {1}")]
    BlockCountMismatch(usize, usize),
    #[error("{0} trailing fields after the last block")]
    TrailingFields(usize),
    // Shape errors
    #[error("Expected {expected} coefficients, found {found}")]
    SequenceLength { expected: usize, found: usize },
    #[error("Expected a {expected}x{expected} matrix, found {rows}x{cols}")]
    MatrixShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    // Limits
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    // Container errors
    #[error("Invalid signature {0:02x}{1:02x}{2:02x}{3:02x}, expected 4a53494d")]
    InvalidSignature(u8, u8, u8, u8),
    #[error("Unsupported container version {0}")]
    UnsupportedVersion(u8),
    #[error("Invalid enum value {0} for {1}")]
    InvalidEnum(u32, String),
    #[error("Field {0} does not fit in 16 bits")]
    FieldOutOfRange(i32),
    #[error("File truncated")]
    FileTruncated,
    #[error("{0} unexpected bytes after the last field")]
    TrailingData(usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            UnalignedSize(..)
            | InvalidImageSize(..)
            | PixelCountMismatch(..)
            | PlaneSizeMismatch(..)
            | RectOutOfBounds(..) => ErrorKind::Dimension,
            TruncatedStream(_)
            | RunOverflow { .. }
            | InvalidRunLength(_)
            | SizeMismatch { .. }
            | ZeroAmplitude(_)
            | CoefficientOutOfRange(..)
            | BlockCountMismatch(..)
            | TrailingFields(_) => ErrorKind::MalformedStream,
            SequenceLength { .. } | MatrixShape { .. } => ErrorKind::Shape,
            ImageSizeTooLarge(..) | ArithmeticOverflow => ErrorKind::Limit,
            InvalidSignature(..)
            | UnsupportedVersion(_)
            | InvalidEnum(..)
            | FieldOutOfRange(_)
            | FileTruncated
            | TrailingData(_) => ErrorKind::Container,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
