// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod api;
pub mod block;
pub mod coefficients;
pub mod color;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod entropy_coding;
pub mod error;
pub mod field_reader;
pub mod image;
pub mod quant;
pub mod sample;
pub mod util;
pub mod zigzag;

pub use api::{ChromaSubsampling, CodecLimits, DecoderOptions, EncoderOptions};
pub use coefficients::{CoefficientPlanes, EncodedImage, StreamStats};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, ErrorKind, Result};
pub use image::{Rgb, RgbImage};
pub use jpegsim_transforms::{BLOCK_DIM, BLOCK_SIZE};
