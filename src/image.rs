// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::error::{Error, Result};

/// One 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

/// A row-major RGB raster, the codec's input and output.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbImage {
    size: (usize, usize),
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wraps `pixels`, which must hold exactly `size.0 * size.1` entries in
    /// row-major order.
    pub fn new(size: (usize, usize), pixels: Vec<Rgb>) -> Result<RgbImage> {
        let expected = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        if pixels.len() != expected {
            return Err(Error::PixelCountMismatch(pixels.len(), expected));
        }
        Ok(RgbImage { size, pixels })
    }

    pub fn new_with_value(size: (usize, usize), value: Rgb) -> Result<RgbImage> {
        let count = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        Self::new(size, vec![value; count])
    }

    pub fn from_fn(
        size: (usize, usize),
        mut f: impl FnMut(usize, usize) -> Rgb,
    ) -> Result<RgbImage> {
        let pixels = (0..size.1)
            .flat_map(|y| (0..size.0).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(size, pixels)
    }

    /// (width, height)
    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.0
    }

    pub fn height(&self) -> usize {
        self.size.1
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.size.0 + x]
    }

    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Largest per-channel difference to an image of the same size.
    pub fn max_channel_error(&self, other: &RgbImage) -> Result<u8> {
        if self.size != other.size {
            return Err(Error::PlaneSizeMismatch(
                self.size.0,
                self.size.1,
                other.size.0,
                other.size.1,
            ));
        }
        Ok(self
            .pixels
            .iter()
            .zip(&other.pixels)
            .map(|(p, q)| p.r.abs_diff(q.r).max(p.g.abs_diff(q.g)).max(p.b.abs_diff(q.b)))
            .max()
            .unwrap_or(0))
    }
}

impl Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RgbImage {}x{}", self.size.0, self.size.1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub origin: (usize, usize),
    // width, height
    pub size: (usize, usize),
}

impl Rect {
    pub fn is_within(&self, size: (usize, usize)) -> Result<()> {
        if self
            .origin
            .0
            .checked_add(self.size.0)
            .ok_or(Error::ArithmeticOverflow)?
            > size.0
            || self
                .origin
                .1
                .checked_add(self.size.1)
                .ok_or(Error::ArithmeticOverflow)?
                > size.1
        {
            Err(Error::RectOutOfBounds(
                self.size.0,
                self.size.1,
                self.origin.0,
                self.origin.1,
                size.0,
                size.1,
            ))
        } else {
            Ok(())
        }
    }
}

/// A single channel of integer samples (Y, U or V), stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Plane {
    size: (usize, usize),
    data: Vec<i32>,
}

impl Plane {
    pub fn new(size: (usize, usize)) -> Result<Plane> {
        Self::new_with_value(size, 0)
    }

    pub fn new_with_value(size: (usize, usize), value: i32) -> Result<Plane> {
        let count = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        Ok(Plane {
            size,
            data: vec![value; count],
        })
    }

    /// Builds a plane from row-major samples; `data.len()` must equal the area.
    pub fn from_vec(size: (usize, usize), data: Vec<i32>) -> Result<Plane> {
        let expected = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        if data.len() != expected {
            return Err(Error::PixelCountMismatch(data.len(), expected));
        }
        Ok(Plane { size, data })
    }

    /// (width, height)
    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.data[y * self.size.0 + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: i32) {
        self.data[y * self.size.0 + x] = value;
    }

    pub fn row(&self, y: usize) -> &[i32] {
        &self.data[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [i32] {
        &mut self.data[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn fill(&mut self, value: i32) {
        self.data.fill(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().copied()
    }

    /// Copies the samples covered by `rect` into a new plane.
    pub fn crop(&self, rect: Rect) -> Result<Plane> {
        rect.is_within(self.size)?;
        let mut data = Vec::with_capacity(rect.size.0 * rect.size.1);
        for y in rect.origin.1..rect.origin.1 + rect.size.1 {
            data.extend_from_slice(&self.row(y)[rect.origin.0..rect.origin.0 + rect.size.0]);
        }
        Plane::from_vec(rect.size, data)
    }

    /// Writes `src` into this plane with its top-left corner at `origin`.
    pub fn paste(&mut self, origin: (usize, usize), src: &Plane) -> Result<()> {
        Rect {
            origin,
            size: src.size,
        }
        .is_within(self.size)?;
        for y in 0..src.size.1 {
            self.row_mut(origin.1 + y)[origin.0..origin.0 + src.size.0]
                .copy_from_slice(src.row(y));
        }
        Ok(())
    }
}

impl Debug for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plane {}x{}", self.size.0, self.size.1)
    }
}

#[cfg(test)]
mod test {
    use crate::error::Result;

    use super::*;

    #[test]
    fn max_channel_error() -> Result<()> {
        let a = RgbImage::new((2, 1), vec![Rgb::new(10, 20, 30), Rgb::WHITE])?;
        let b = RgbImage::new((2, 1), vec![Rgb::new(13, 20, 23), Rgb::new(255, 250, 255)])?;
        assert_eq!(a.max_channel_error(&b)?, 7);
        assert_eq!(b.max_channel_error(&a)?, 7);
        let c = RgbImage::new_with_value((1, 2), Rgb::BLACK)?;
        assert!(matches!(
            a.max_channel_error(&c),
            Err(Error::PlaneSizeMismatch(2, 1, 1, 2))
        ));
        Ok(())
    }

    #[test]
    fn huge_plane() {
        assert!(Plane::new((usize::MAX, 2)).is_err());
    }

    #[test]
    fn pixel_count_checked() {
        assert!(matches!(
            RgbImage::new((2, 2), vec![Rgb::BLACK; 3]),
            Err(Error::PixelCountMismatch(3, 4))
        ));
    }

    #[test]
    fn image_is_row_major() -> Result<()> {
        let image = RgbImage::from_fn((3, 2), |x, y| Rgb::new(x as u8, y as u8, 0))?;
        assert_eq!(image.pixel(2, 1), Rgb::new(2, 1, 0));
        assert_eq!(image.row(1)[0], Rgb::new(0, 1, 0));
        assert_eq!(image.pixels()[4], Rgb::new(1, 1, 0));
        Ok(())
    }

    #[test]
    fn crop_and_paste() -> Result<()> {
        let mut plane = Plane::new((32, 42))?;
        assert_eq!(
            plane
                .crop(Rect {
                    origin: (31, 40),
                    size: (1, 1)
                })?
                .size(),
            (1, 1)
        );
        assert!(plane
            .crop(Rect {
                origin: (30, 30),
                size: (3, 3)
            })
            .is_err());
        let patch = Plane::new_with_value((2, 2), 7)?;
        plane.paste((30, 40), &patch)?;
        assert_eq!(plane.get(31, 41), 7);
        assert_eq!(plane.get(29, 41), 0);
        assert!(plane.paste((31, 40), &patch).is_err());
        Ok(())
    }
}
