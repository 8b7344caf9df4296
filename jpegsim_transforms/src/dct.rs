// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Direct 8x8 forward and inverse DCT.
//!
//! Both directions evaluate the textbook double sum over a precomputed cosine
//! table. Samples are level-shifted by [`LEVEL_SHIFT`] on the way in and on
//! the way out; the inverse transform does not clamp.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::OnceLock;

use crate::BLOCK_DIM;

/// Offset subtracted from samples before the forward transform and added back
/// after the inverse transform.
pub const LEVEL_SHIFT: i32 = 128;

/// `COSINES[x][u] = cos((2x + 1) * u * PI / 16)`
static COSINES: OnceLock<[[f64; BLOCK_DIM]; BLOCK_DIM]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; BLOCK_DIM]; BLOCK_DIM] {
    COSINES.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK_DIM]; BLOCK_DIM];
        for (x, row) in table.iter_mut().enumerate() {
            for (u, entry) in row.iter_mut().enumerate() {
                *entry = ((2 * x + 1) as f64 * u as f64 * PI / 16.0).cos();
            }
        }
        table
    })
}

#[inline(always)]
fn alpha(u: usize) -> f64 {
    if u == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Forward DCT of one 8x8 block of spatial samples.
///
/// `samples[x][y]` is indexed by row then column; the returned block is
/// indexed by vertical frequency `u` then horizontal frequency `v`.
pub fn forward_dct(samples: &[[i32; BLOCK_DIM]; BLOCK_DIM]) -> [[f64; BLOCK_DIM]; BLOCK_DIM] {
    let cos = cosine_table();
    let mut out = [[0.0f64; BLOCK_DIM]; BLOCK_DIM];
    for u in 0..BLOCK_DIM {
        for v in 0..BLOCK_DIM {
            let mut sum = 0.0;
            for x in 0..BLOCK_DIM {
                for y in 0..BLOCK_DIM {
                    let shifted = (samples[x][y] - LEVEL_SHIFT) as f64;
                    sum += shifted * cos[x][u] * cos[y][v];
                }
            }
            out[u][v] = 0.25 * alpha(u) * alpha(v) * sum;
        }
    }
    out
}

/// Inverse DCT without the final integer conversion. The level shift is not
/// applied.
pub fn inverse_dct_f64(
    coefficients: &[[i32; BLOCK_DIM]; BLOCK_DIM],
) -> [[f64; BLOCK_DIM]; BLOCK_DIM] {
    let cos = cosine_table();
    let mut out = [[0.0f64; BLOCK_DIM]; BLOCK_DIM];
    for x in 0..BLOCK_DIM {
        for y in 0..BLOCK_DIM {
            let mut sum = 0.0;
            for u in 0..BLOCK_DIM {
                for v in 0..BLOCK_DIM {
                    sum += alpha(u)
                        * alpha(v)
                        * coefficients[u][v] as f64
                        * cos[x][u]
                        * cos[y][v];
                }
            }
            out[x][y] = 0.25 * sum;
        }
    }
    out
}

/// Inverse DCT of one 8x8 block of (dequantized) coefficients.
///
/// Each output sample is the integer part of the reconstructed value after
/// the level shift, i.e. `floor(f) + 128`. Values outside `[0, 255]` are
/// passed through unchanged.
pub fn inverse_dct(coefficients: &[[i32; BLOCK_DIM]; BLOCK_DIM]) -> [[i32; BLOCK_DIM]; BLOCK_DIM] {
    let real = inverse_dct_f64(coefficients);
    let mut out = [[0i32; BLOCK_DIM]; BLOCK_DIM];
    for (out_row, real_row) in out.iter_mut().zip(real.iter()) {
        for (sample, value) in out_row.iter_mut().zip(real_row.iter()) {
            *sample = (value.floor() as i32).saturating_add(LEVEL_SHIFT);
        }
    }
    out
}
