// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Byte serialization of [`EncodedImage`].
//!
//! Layout, all little-endian:
//!
//! | bytes | contents                         |
//! |-------|----------------------------------|
//! | 4     | signature `JSIM`                 |
//! | 1     | version (1)                      |
//! | 1     | chroma subsampling               |
//! | 2     | blocks wide                      |
//! | 2     | blocks high                      |
//! | 4     | field count `n`                  |
//! | 2n    | fields, as signed 16-bit values  |

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::api::ChromaSubsampling;
use crate::coefficients::EncodedImage;
use crate::error::{Error, Result};
use crate::util::tracing_wrappers::*;

pub const SIGNATURE: [u8; 4] = *b"JSIM";
pub const VERSION: u8 = 1;
const HEADER_SIZE: usize = 14;

impl EncodedImage {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (wide, high) = self.blocks;
        let blocks_wide = u16::try_from(wide).map_err(|_| {
            Error::ImageSizeTooLarge(self.image_size().0, self.image_size().1)
        })?;
        let blocks_high = u16::try_from(high).map_err(|_| {
            Error::ImageSizeTooLarge(self.image_size().0, self.image_size().1)
        })?;
        let count = u32::try_from(self.fields.len()).map_err(|_| Error::ArithmeticOverflow)?;
        let subsampling = self.subsampling.to_u8().ok_or(Error::ArithmeticOverflow)?;

        let mut out = vec![0u8; HEADER_SIZE + 2 * self.fields.len()];
        out[0..4].copy_from_slice(&SIGNATURE);
        out[4] = VERSION;
        out[5] = subsampling;
        LittleEndian::write_u16(&mut out[6..8], blocks_wide);
        LittleEndian::write_u16(&mut out[8..10], blocks_high);
        LittleEndian::write_u32(&mut out[10..14], count);
        for (&field, dst) in self
            .fields
            .iter()
            .zip(out[HEADER_SIZE..].chunks_exact_mut(2))
        {
            let field = i16::try_from(field).map_err(|_| Error::FieldOutOfRange(field))?;
            LittleEndian::write_i16(dst, field);
        }
        debug!(bytes = out.len(), "serialized encoded image");
        Ok(out)
    }

    pub fn from_bytes(mut data: &[u8]) -> Result<EncodedImage> {
        let truncated = |_: std::io::Error| Error::FileTruncated;
        let mut signature = [0u8; 4];
        for byte in signature.iter_mut() {
            *byte = data.read_u8().map_err(truncated)?;
        }
        if signature != SIGNATURE {
            let [a, b, c, d] = signature;
            return Err(Error::InvalidSignature(a, b, c, d));
        }
        let version = data.read_u8().map_err(truncated)?;
        if version != VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let raw_subsampling = data.read_u8().map_err(truncated)?;
        let subsampling = ChromaSubsampling::from_u8(raw_subsampling).ok_or_else(|| {
            Error::InvalidEnum(raw_subsampling as u32, "ChromaSubsampling".to_string())
        })?;
        let blocks_wide = data.read_u16::<LittleEndian>().map_err(truncated)?;
        let blocks_high = data.read_u16::<LittleEndian>().map_err(truncated)?;
        let count = data.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        if data.len() / 2 < count {
            return Err(Error::FileTruncated);
        }
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            fields.push(data.read_i16::<LittleEndian>().map_err(truncated)? as i32);
        }
        if !data.is_empty() {
            return Err(Error::TrailingData(data.len()));
        }
        Ok(EncodedImage {
            subsampling,
            blocks: (blocks_wide as usize, blocks_high as usize),
            fields,
        })
    }
}
