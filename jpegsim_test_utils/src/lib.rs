// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[macro_export]
macro_rules! assert_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let diff = if *left_val > *right_val {
                    *left_val - *right_val
                } else {
                    *right_val - *left_val
                };
                if !(diff <= $max_error) {
                    panic!(
                        "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                        left_val, right_val, $max_error
                    );
                }
            }
        }
    };
}

/// Element-wise [`assert_almost_eq!`] over two 8x8 matrices (or any pair of
/// equally shaped nested arrays).
#[macro_export]
macro_rules! assert_blocks_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert_eq!(left_val.len(), right_val.len(), "row count mismatch");
                for (row, (l, r)) in left_val.iter().zip(right_val.iter()).enumerate() {
                    assert_eq!(l.len(), r.len(), "column count mismatch in row {}", row);
                    for (col, (a, b)) in l.iter().zip(r.iter()).enumerate() {
                        let diff = if *a > *b { *a - *b } else { *b - *a };
                        if !(diff <= $max_error) {
                            panic!(
                                "assertion failed at [{}][{}]: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                                row, col, a, b, $max_error
                            );
                        }
                    }
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_floats() {
        assert_almost_eq!(1.0000001f64, 1.0000002, 0.000001);
        assert_almost_eq!(1.0, 1.1, 0.2);
    }

    #[test]
    fn test_with_integers() {
        assert_almost_eq!(100, 101, 2);
        assert_almost_eq!(777u32, 770, 7);
        assert_almost_eq!(500i64, 498, 3);
    }

    #[test]
    fn test_blocks() {
        let a = [[1.0f64, 2.0], [3.0, 4.0]];
        let b = [[1.05f64, 2.0], [3.0, 3.95]];
        assert_blocks_almost_eq!(a, b, 0.1);
        assert_blocks_almost_eq!([[128i32; 8]; 8], [[129i32; 8]; 8], 1);
    }

    #[test]
    fn test_panic() {
        use std::panic;
        let result = panic::catch_unwind(|| {
            assert_almost_eq!(1.0, 1.2, 0.1);
        });
        assert!(
            result.is_err(),
            "Expected assert_almost_eq! to panic, but it didn't"
        );

        let result = panic::catch_unwind(|| {
            assert_blocks_almost_eq!([[100i32; 2]; 2], [[105i32; 2]; 2], 2);
        });
        assert!(
            result.is_err(),
            "Expected assert_blocks_almost_eq! to panic, but it didn't"
        );
    }
}
