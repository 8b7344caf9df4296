// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::util::bit_length;
use crate::util::tracing_wrappers::*;
use crate::zigzag::CoefficientSequence;

/// Where the encoder is within the AC scan of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// Zeros seen since the last literal (or since DC).
    CountingRun(i32),
    /// The last coefficient was non-zero and has been written.
    EmittingLiteral,
    /// The record is complete.
    EndOfBlock,
}

/// Run-length encoder for the AC part of one record.
#[derive(Debug)]
pub struct RecordEncoder {
    state: EncoderState,
}

impl Default for RecordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordEncoder {
    pub fn new() -> RecordEncoder {
        RecordEncoder {
            state: EncoderState::CountingRun(0),
        }
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Feeds the next AC coefficient in scan order.
    pub fn push(&mut self, coefficient: i32, out: &mut Vec<i32>) {
        self.state = match (self.state, coefficient) {
            (EncoderState::EndOfBlock, _) => EncoderState::EndOfBlock,
            (EncoderState::CountingRun(run), 0) => EncoderState::CountingRun(run + 1),
            (EncoderState::EmittingLiteral, 0) => EncoderState::CountingRun(1),
            (EncoderState::CountingRun(run), value) => {
                out.extend_from_slice(&[run, bit_length(value), value]);
                EncoderState::EmittingLiteral
            }
            (EncoderState::EmittingLiteral, value) => {
                out.extend_from_slice(&[0, bit_length(value), value]);
                EncoderState::EmittingLiteral
            }
        };
    }

    /// Closes the record, writing the `(0, 0)` marker if trailing zeros were
    /// dropped.
    pub fn finish(&mut self, out: &mut Vec<i32>) {
        if let EncoderState::CountingRun(run) = self.state {
            if run > 0 {
                out.extend_from_slice(&[0, 0]);
            }
        }
        self.state = EncoderState::EndOfBlock;
    }
}

/// Appends the record for one zig-zag ordered block to `out`.
pub fn encode_record(sequence: &CoefficientSequence, out: &mut Vec<i32>) {
    let dc = sequence.dc();
    out.extend_from_slice(&[bit_length(dc), dc]);
    let mut encoder = RecordEncoder::new();
    for &coefficient in sequence.ac() {
        encoder.push(coefficient, out);
    }
    encoder.finish(out);
}

/// Concatenates the records of `sequences`.
pub fn encode_records(sequences: &[CoefficientSequence]) -> Vec<i32> {
    let mut out = Vec::new();
    for sequence in sequences {
        encode_record(sequence, &mut out);
    }
    debug!(
        blocks = sequences.len(),
        fields = out.len(),
        "entropy coded records"
    );
    out
}
