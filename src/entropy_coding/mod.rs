// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Run-length coding of zig-zag ordered blocks.
//!
//! Each block becomes one record of integer fields: `(size, DC)` followed by
//! `(run, size, amplitude)` triples for the non-zero AC coefficients, where
//! `size` is the bit length of the amplitude. Trailing zeros are replaced by a
//! single `(0, 0)` end-of-block marker. Records carry no length prefix; a
//! decoder finds the end of each one by replaying the encoder's termination
//! rule.

pub mod decode;
pub mod encode;

pub use decode::{decode_record, decode_records, DecoderState, RecordDecoder};
pub use encode::{encode_record, encode_records, EncoderState, RecordEncoder};
