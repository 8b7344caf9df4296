// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// Reads integer fields from a coefficient stream.
pub struct FieldReader<'a> {
    data: &'a [i32],
    total_fields_read: usize,
}

impl<'a> FieldReader<'a> {
    /// Constructs a FieldReader for a given range of data.
    pub fn new(data: &'a [i32]) -> FieldReader<'a> {
        FieldReader {
            data,
            total_fields_read: 0,
        }
    }

    /// Returns the next field without consuming it.
    pub fn peek(&self) -> Option<i32> {
        self.data.first().copied()
    }

    /// Reads one field.
    /// ```
    /// # use jpegsim::field_reader::FieldReader;
    /// let mut fr = FieldReader::new(&[8, -170]);
    /// assert_eq!(fr.read()?, 8);
    /// assert_eq!(fr.read()?, -170);
    /// assert_eq!(fr.total_fields_read(), 2);
    /// assert!(fr.read().is_err());
    /// # Ok::<(), jpegsim::error::Error>(())
    /// ```
    pub fn read(&mut self) -> Result<i32> {
        let (&first, rest) = self
            .data
            .split_first()
            .ok_or(Error::TruncatedStream(self.total_fields_read))?;
        self.data = rest;
        self.total_fields_read += 1;
        Ok(first)
    }

    /// Returns the total number of fields that have been read.
    pub fn total_fields_read(&self) -> usize {
        self.total_fields_read
    }

    /// Number of fields not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
