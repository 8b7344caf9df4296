// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod tracing_wrappers;

/// Number of bits needed for the magnitude of `value`: `floor(log2(|v|)) + 1`
/// for non-zero values, 0 for zero.
pub fn bit_length(value: i32) -> i32 {
    (u32::BITS - value.unsigned_abs().leading_zeros()) as i32
}
