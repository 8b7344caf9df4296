// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod dct;

pub use dct::*;

/// Side length of a transform block.
pub const BLOCK_DIM: usize = 8;
/// Number of samples in a transform block.
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;
