// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};
use crate::field_reader::FieldReader;
use crate::quant::MAX_COEFFICIENT;
use crate::util::bit_length;
use crate::util::tracing_wrappers::*;
use crate::zigzag::CoefficientSequence;
use crate::BLOCK_SIZE;

/// Fewest fields a record can occupy: the DC pair and the end-of-block marker.
pub const MIN_RECORD_FIELDS: usize = 4;

fn check_range(coefficient: i32) -> Result<()> {
    if coefficient.unsigned_abs() > MAX_COEFFICIENT as u32 {
        return Err(Error::CoefficientOutOfRange(coefficient, MAX_COEFFICIENT));
    }
    Ok(())
}

/// Which field the decoder expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    ExpectDcSize,
    ExpectDc { size: i32 },
    ExpectRun,
    ExpectSize { run: i32 },
    ExpectAmplitude { run: i32, size: i32 },
    EndOfBlock,
}

/// Field-at-a-time decoder for one record.
///
/// A record ends at the `(0, 0)` marker or as soon as the last AC
/// coefficient has been produced, which mirrors when [`RecordEncoder`]
/// stops writing.
///
/// [`RecordEncoder`]: super::encode::RecordEncoder
#[derive(Debug)]
pub struct RecordDecoder {
    state: DecoderState,
    coefficients: [i32; BLOCK_SIZE],
    // Index of the next coefficient to be written.
    position: usize,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDecoder {
    pub fn new() -> RecordDecoder {
        RecordDecoder {
            state: DecoderState::ExpectDcSize,
            coefficients: [0; BLOCK_SIZE],
            position: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == DecoderState::EndOfBlock
    }

    /// Consumes one field. Feeding a finished decoder is a no-op.
    pub fn feed(&mut self, field: i32) -> Result<()> {
        self.state = match self.state {
            DecoderState::ExpectDcSize => DecoderState::ExpectDc { size: field },
            DecoderState::ExpectDc { size } => {
                check_range(field)?;
                if bit_length(field) != size {
                    return Err(Error::SizeMismatch {
                        size,
                        amplitude: field,
                    });
                }
                self.coefficients[0] = field;
                self.position = 1;
                DecoderState::ExpectRun
            }
            DecoderState::ExpectRun => {
                if field < 0 {
                    return Err(Error::InvalidRunLength(field));
                }
                // The literal following the run must still fit.
                if self.position + field as usize >= BLOCK_SIZE {
                    return Err(Error::RunOverflow {
                        run: field,
                        position: self.position,
                    });
                }
                DecoderState::ExpectSize { run: field }
            }
            DecoderState::ExpectSize { run: 0 } if field == 0 => {
                trace!(position = self.position, "end of block");
                DecoderState::EndOfBlock
            }
            DecoderState::ExpectSize { run } => DecoderState::ExpectAmplitude { run, size: field },
            DecoderState::ExpectAmplitude { run, size } => {
                let position = self.position + run as usize;
                if field == 0 {
                    return Err(Error::ZeroAmplitude(position));
                }
                check_range(field)?;
                if bit_length(field) != size {
                    return Err(Error::SizeMismatch {
                        size,
                        amplitude: field,
                    });
                }
                self.coefficients[position] = field;
                self.position = position + 1;
                if self.position == BLOCK_SIZE {
                    DecoderState::EndOfBlock
                } else {
                    DecoderState::ExpectRun
                }
            }
            DecoderState::EndOfBlock => DecoderState::EndOfBlock,
        };
        Ok(())
    }

    /// Returns the decoded block, or `None` if the record is incomplete.
    pub fn finish(&self) -> Option<CoefficientSequence> {
        self.is_done().then_some(CoefficientSequence(self.coefficients))
    }
}

/// Decodes the next record from `reader`.
pub fn decode_record(reader: &mut FieldReader) -> Result<CoefficientSequence> {
    let mut decoder = RecordDecoder::new();
    loop {
        if let Some(sequence) = decoder.finish() {
            return Ok(sequence);
        }
        decoder.feed(reader.read()?)?;
    }
}

/// Decodes exactly `count` records; the stream must hold nothing else.
pub fn decode_records(fields: &[i32], count: usize) -> Result<Vec<CoefficientSequence>> {
    if count > fields.len() / MIN_RECORD_FIELDS {
        return Err(Error::TruncatedStream(fields.len()));
    }
    let mut reader = FieldReader::new(fields);
    let mut sequences = Vec::with_capacity(count);
    for _ in 0..count {
        sequences.push(decode_record(&mut reader)?);
    }
    if !reader.is_empty() {
        return Err(Error::TrailingFields(reader.remaining()));
    }
    debug!(blocks = count, fields = fields.len(), "entropy decoded records");
    Ok(sequences)
}
