// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! 2x2 chroma subsampling.

use crate::error::{Error, Result};
use crate::image::Plane;

/// Averages every 2x2 group into one sample (sum divided by 4, truncated).
/// Both dimensions must be even.
pub fn downsample(plane: &Plane) -> Result<Plane> {
    let (xsize, ysize) = plane.size();
    if xsize % 2 != 0 || ysize % 2 != 0 {
        return Err(Error::UnalignedSize(xsize, ysize, 2));
    }
    let mut out = Plane::new((xsize / 2, ysize / 2))?;
    for y in 0..ysize / 2 {
        let top = plane.row(2 * y);
        let bottom = plane.row(2 * y + 1);
        for (x, sample) in out.row_mut(y).iter_mut().enumerate() {
            let sum: i64 = [top[2 * x], top[2 * x + 1], bottom[2 * x], bottom[2 * x + 1]]
                .iter()
                .map(|&s| s as i64)
                .sum();
            *sample = (sum / 4) as i32;
        }
    }
    Ok(out)
}

/// Replicates every sample into a 2x2 group.
pub fn upsample(plane: &Plane) -> Result<Plane> {
    let (xsize, ysize) = plane.size();
    let out_size = (
        xsize.checked_mul(2).ok_or(Error::ArithmeticOverflow)?,
        ysize.checked_mul(2).ok_or(Error::ArithmeticOverflow)?,
    );
    let mut out = Plane::new(out_size)?;
    for y in 0..out_size.1 {
        let src = plane.row(y / 2);
        for (x, sample) in out.row_mut(y).iter_mut().enumerate() {
            *sample = src[x / 2];
        }
    }
    Ok(out)
}
