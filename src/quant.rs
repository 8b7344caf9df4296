// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::block::{CoefficientBlock, DctBlock};
use crate::BLOCK_DIM;

/// Divisors applied to every plane, indexed `[u][v]`.
pub static QUANT_MATRIX: [[i32; BLOCK_DIM]; BLOCK_DIM] = [
    [6, 4, 4, 6, 10, 16, 20, 24],
    [5, 5, 6, 8, 10, 23, 24, 22],
    [6, 5, 6, 10, 16, 23, 28, 22],
    [6, 7, 9, 12, 20, 35, 32, 25],
    [7, 9, 15, 22, 27, 44, 41, 31],
    [10, 14, 22, 26, 32, 42, 45, 37],
    [20, 26, 31, 35, 41, 48, 48, 40],
    [29, 37, 38, 39, 45, 40, 41, 40],
];

/// Largest coefficient magnitude a decoder accepts. Quantized blocks of 8-bit
/// samples stay well inside it.
pub const MAX_COEFFICIENT: i32 = 2047;

/// Divides each coefficient by its matrix entry, truncating toward zero.
///
/// Float residue such as `-3e-13` in the AC terms of a flat block quantizes
/// to zero.
pub fn quantize(block: &DctBlock) -> CoefficientBlock {
    CoefficientBlock(array_init::array_init(|u| {
        array_init::array_init(|v| (block.0[u][v] / QUANT_MATRIX[u][v] as f64).trunc() as i32)
    }))
}

/// Multiplies each coefficient by its matrix entry.
pub fn dequantize(block: &CoefficientBlock) -> CoefficientBlock {
    CoefficientBlock(array_init::array_init(|u| {
        array_init::array_init(|v| block.0[u][v].saturating_mul(QUANT_MATRIX[u][v]))
    }))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;
    use test_log::test;

    use super::*;
    use crate::util::test::assert_almost_eq;

    #[test]
    fn matrix_range() {
        let entries = QUANT_MATRIX.iter().flatten();
        assert_eq!(entries.clone().min(), Some(&4));
        assert_eq!(entries.max(), Some(&48));
    }

    #[test]
    fn truncates_toward_zero() {
        let mut dct = DctBlock([[0.0; BLOCK_DIM]; BLOCK_DIM]);
        dct.0[0][0] = -1020.0;
        dct.0[0][1] = 7.9;
        dct.0[0][2] = -7.9;
        dct.0[3][3] = -3e-13;
        dct.0[7][7] = 837.4882880146856;
        let q = quantize(&dct);
        assert_eq!(q.0[0][0], -170);
        assert_eq!(q.0[0][1], 1);
        assert_eq!(q.0[0][2], -1);
        assert_eq!(q.0[3][3], 0);
        assert_eq!(q.0[7][7], 20);
    }

    #[test]
    fn dequantize_multiplies() {
        let mut block = CoefficientBlock::default();
        block.0[0][0] = -170;
        block.0[6][5] = 2;
        let d = dequantize(&block);
        assert_eq!(d.0[0][0], -1020);
        assert_eq!(d.0[6][5], 96);
        assert_eq!(d.0[1][1], 0);
    }

    #[test]
    fn dequantize_saturates() {
        let mut block = CoefficientBlock::default();
        block.0[0][0] = i32::MAX;
        block.0[7][7] = i32::MIN;
        let d = dequantize(&block);
        assert_eq!(d.0[0][0], i32::MAX);
        assert_eq!(d.0[7][7], i32::MIN);
    }

    #[test]
    fn reconstruction_error_below_divisor() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        let dct = DctBlock(array_init::array_init(|_| {
            array_init::array_init(|_| rng.random_range(-2000.0..2000.0))
        }));
        let restored = dequantize(&quantize(&dct));
        for i in 0..BLOCK_DIM {
            for j in 0..BLOCK_DIM {
                let q = QUANT_MATRIX[i][j] as f64;
                assert_almost_eq!(restored.0[i][j] as f64, dct.0[i][j], q);
            }
        }
    }

    #[test]
    fn scaling_law() {
        arbtest::arbtest(|u| {
            let mut dct = DctBlock([[0.0; BLOCK_DIM]; BLOCK_DIM]);
            for row in dct.0.iter_mut() {
                for c in row.iter_mut() {
                    *c = u.int_in_range(-400_000i32..=400_000)? as f64 / 100.0;
                }
            }
            let restored = dequantize(&quantize(&dct));
            for i in 0..BLOCK_DIM {
                for j in 0..BLOCK_DIM {
                    let q = QUANT_MATRIX[i][j];
                    let expected = (dct.0[i][j] / q as f64).trunc() as i32 * q;
                    assert_eq!(restored.0[i][j], expected);
                    if dct.0[i][j] >= 0.0 {
                        assert_eq!(expected, (dct.0[i][j] / q as f64).floor() as i32 * q);
                    }
                }
            }
            Ok(())
        });
    }
}
