// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! RGB <-> YUV conversion.
//!
//! The forward direction uses full-range BT.601 weights with chroma centered
//! on 128. The inverse direction applies the 1.164 luma gain and clamps each
//! channel to `[0, 255]`.

use crate::error::Result;
use crate::image::{Plane, Rgb, RgbImage};

/// How a real-valued sample is turned into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Drop the fractional part (toward zero).
    Truncate,
    /// Round half away from zero.
    Nearest,
}

impl Rounding {
    #[inline]
    pub fn apply(self, value: f64) -> i32 {
        match self {
            Rounding::Truncate => value.trunc() as i32,
            Rounding::Nearest => value.round() as i32,
        }
    }
}

/// Policy for the stored Y, U and V samples.
pub const YUV_ROUNDING: Rounding = Rounding::Truncate;
/// Policy for reconstructed R, G and B channels (before clamping).
pub const RGB_ROUNDING: Rounding = Rounding::Nearest;

/// Luma and chroma of one pixel. Samples produced by the decoder may lie
/// outside `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yuv {
    pub y: i32,
    pub u: i32,
    pub v: i32,
}

pub fn rgb_to_yuv(pixel: Rgb) -> Yuv {
    let (r, g, b) = (pixel.r as f64, pixel.g as f64, pixel.b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = 128.0 - 0.1687 * r - 0.3312 * g + 0.5 * b;
    let v = 128.0 + 0.5 * r - 0.4186 * g - 0.0813 * b;
    Yuv {
        y: YUV_ROUNDING.apply(y),
        u: YUV_ROUNDING.apply(u),
        v: YUV_ROUNDING.apply(v),
    }
}

#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

pub fn yuv_to_rgb(yuv: Yuv) -> Rgb {
    let y = 1.164 * yuv.y as f64;
    let u = yuv.u as f64 - 128.0;
    let v = yuv.v as f64 - 128.0;
    let r = y + 1.596 * v;
    let g = y - 0.813 * v - 0.391 * u;
    let b = y + 2.018 * u;
    Rgb {
        r: clamp_channel(RGB_ROUNDING.apply(r)),
        g: clamp_channel(RGB_ROUNDING.apply(g)),
        b: clamp_channel(RGB_ROUNDING.apply(b)),
    }
}

/// Splits an image into full-resolution Y, U and V planes.
pub fn image_to_planes(image: &RgbImage) -> Result<[Plane; 3]> {
    let size = image.size();
    let mut planes = [Plane::new(size)?, Plane::new(size)?, Plane::new(size)?];
    for y in 0..size.1 {
        for (x, pixel) in image.row(y).iter().enumerate() {
            let yuv = rgb_to_yuv(*pixel);
            planes[0].set(x, y, yuv.y);
            planes[1].set(x, y, yuv.u);
            planes[2].set(x, y, yuv.v);
        }
    }
    Ok(planes)
}

/// Recombines three equally sized planes into an RGB image.
pub fn planes_to_image(planes: &[Plane; 3]) -> Result<RgbImage> {
    let size = planes[0].size();
    for plane in &planes[1..] {
        if plane.size() != size {
            return Err(crate::error::Error::PlaneSizeMismatch(
                size.0,
                size.1,
                plane.size().0,
                plane.size().1,
            ));
        }
    }
    RgbImage::from_fn(size, |x, y| {
        yuv_to_rgb(Yuv {
            y: planes[0].get(x, y),
            u: planes[1].get(x, y),
            v: planes[2].get(x, y),
        })
    })
}
