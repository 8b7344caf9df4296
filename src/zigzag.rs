// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Diagonal scan between 8x8 coefficient matrices and 64-entry sequences.

use std::sync::OnceLock;

use crate::block::CoefficientBlock;
use crate::error::{Error, Result};
use crate::{BLOCK_DIM, BLOCK_SIZE};

/// A zig-zag ordered block: index 0 is DC, 1..64 are AC terms from low to
/// high frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoefficientSequence(pub [i32; BLOCK_SIZE]);

impl Default for CoefficientSequence {
    fn default() -> Self {
        CoefficientSequence([0; BLOCK_SIZE])
    }
}

impl CoefficientSequence {
    pub fn dc(&self) -> i32 {
        self.0[0]
    }

    pub fn ac(&self) -> &[i32] {
        &self.0[1..]
    }
}

impl TryFrom<&[i32]> for CoefficientSequence {
    type Error = Error;

    fn try_from(values: &[i32]) -> Result<CoefficientSequence> {
        let values: [i32; BLOCK_SIZE] =
            values.try_into().map_err(|_| Error::SequenceLength {
                expected: BLOCK_SIZE,
                found: values.len(),
            })?;
        Ok(CoefficientSequence(values))
    }
}

/// `(row, col)` visited at each scan position.
///
/// Diagonal `d = row + col` runs from 0 to 14. Even diagonals are walked from
/// the highest row to the lowest, odd ones from the lowest row to the highest.
pub fn scan_order() -> &'static [(usize, usize); BLOCK_SIZE] {
    static ORDER: OnceLock<[(usize, usize); BLOCK_SIZE]> = OnceLock::new();
    ORDER.get_or_init(|| {
        let mut order = [(0, 0); BLOCK_SIZE];
        let mut pos = 0;
        for d in 0..2 * BLOCK_DIM - 1 {
            let low = d.saturating_sub(BLOCK_DIM - 1);
            let high = d.min(BLOCK_DIM - 1);
            for k in 0..=high - low {
                let row = if d % 2 == 0 { high - k } else { low + k };
                order[pos] = (row, d - row);
                pos += 1;
            }
        }
        order
    })
}

pub fn flatten(block: &CoefficientBlock) -> CoefficientSequence {
    let order = scan_order();
    CoefficientSequence(array_init::array_init(|i| {
        let (row, col) = order[i];
        block.0[row][col]
    }))
}

pub fn unflatten(sequence: &CoefficientSequence) -> CoefficientBlock {
    let mut block = CoefficientBlock::default();
    for (&(row, col), &value) in scan_order().iter().zip(sequence.0.iter()) {
        block.0[row][col] = value;
    }
    block
}

/// Flattens a matrix given as rows of arbitrary length; it must be 8x8.
pub fn flatten_rows(rows: &[Vec<i32>]) -> Result<CoefficientSequence> {
    let shape_error = || Error::MatrixShape {
        expected: BLOCK_DIM,
        rows: rows.len(),
        cols: rows.first().map_or(0, Vec::len),
    };
    if rows.len() != BLOCK_DIM {
        return Err(shape_error());
    }
    let mut block = CoefficientBlock::default();
    for (dst, src) in block.0.iter_mut().zip(rows) {
        if src.len() != BLOCK_DIM {
            return Err(Error::MatrixShape {
                expected: BLOCK_DIM,
                rows: rows.len(),
                cols: src.len(),
            });
        }
        dst.copy_from_slice(src);
    }
    Ok(flatten(&block))
}

/// Unflattens a slice that must hold exactly 64 values.
pub fn unflatten_slice(values: &[i32]) -> Result<CoefficientBlock> {
    Ok(unflatten(&CoefficientSequence::try_from(values)?))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn numbered_block() -> CoefficientBlock {
        CoefficientBlock(array_init::array_init(|row| {
            array_init::array_init(|col| (row * BLOCK_DIM + col) as i32)
        }))
    }

    #[test]
    fn known_positions() {
        let seq = flatten(&numbered_block());
        // Natural indices of the standard JPEG scan.
        assert_eq!(&seq.0[..10], &[0, 1, 8, 16, 9, 2, 3, 10, 17, 24]);
        assert_eq!(&seq.0[60..], &[47, 55, 62, 63]);
        assert_eq!(seq.0[63], 63);
        assert_eq!(seq.dc(), 0);
        assert_eq!(seq.ac().len(), 63);
    }

    #[test]
    fn full_order_matches_jpeg() {
        const JPEG_ORDER: [usize; 64] = [
            0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41,
            34, 27, 20, 13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30,
            37, 44, 51, 58, 59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
        ];
        for (i, &(row, col)) in scan_order().iter().enumerate() {
            assert_eq!(row * BLOCK_DIM + col, JPEG_ORDER[i], "scan position {i}");
            assert_eq!(flatten(&numbered_block()).0[i] as usize, JPEG_ORDER[i]);
        }
    }

    #[test]
    fn bijection() {
        arbtest::arbtest(|u| {
            let mut block = CoefficientBlock::default();
            for row in block.0.iter_mut() {
                for c in row.iter_mut() {
                    *c = u.arbitrary()?;
                }
            }
            assert_eq!(unflatten(&flatten(&block)), block);
            let mut seq = CoefficientSequence::default();
            for c in seq.0.iter_mut() {
                *c = u.arbitrary()?;
            }
            assert_eq!(flatten(&unflatten(&seq)), seq);
            Ok(())
        });
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(matches!(
            unflatten_slice(&[0; 63]),
            Err(Error::SequenceLength {
                expected: 64,
                found: 63
            })
        ));
        assert!(unflatten_slice(&[0; 65]).is_err());
        assert!(unflatten_slice(&[1; 64]).is_ok());
    }

    #[test]
    fn wrong_shape_rejected() {
        let rows = vec![vec![0; 8]; 7];
        assert!(matches!(
            flatten_rows(&rows),
            Err(Error::MatrixShape { rows: 7, .. })
        ));
        let mut rows = vec![vec![0; 8]; 8];
        rows[3].push(1);
        assert!(matches!(
            flatten_rows(&rows),
            Err(Error::MatrixShape { cols: 9, .. })
        ));
        rows[3].pop();
        rows[0][1] = 5;
        assert_eq!(flatten_rows(&rows).unwrap().0[1], 5);
    }
}
