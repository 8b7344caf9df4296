// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Plain (P3) and raw (P6) PPM reading, plain PPM writing.

use color_eyre::eyre::{Result, WrapErr, eyre};
use jpegsim::{Rgb, RgbImage};

struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while self.data.get(self.pos).is_some_and(|&c| c != b'\n') {
                    self.pos += 1;
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Result<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|&c| !c.is_ascii_whitespace() && c != b'#')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(eyre!("Unexpected end of PPM data at byte {}", start));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self) -> Result<usize> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| eyre!("Invalid number {:?}", String::from_utf8_lossy(token)))
    }
}

fn rescale(sample: usize, maxval: usize) -> Result<u8> {
    if sample > maxval {
        return Err(eyre!("Sample {} exceeds maxval {}", sample, maxval));
    }
    Ok(((sample * 255 + maxval / 2) / maxval) as u8)
}

/// Parses a P3 or P6 image, rescaling samples to 8 bits.
pub fn parse_ppm(data: &[u8]) -> Result<RgbImage> {
    let mut reader = HeaderReader { data, pos: 0 };
    let magic = reader.token()?;
    let binary = match magic {
        b"P3" => false,
        b"P6" => true,
        _ => {
            return Err(eyre!(
                "Unsupported PPM magic {:?}",
                String::from_utf8_lossy(magic)
            ));
        }
    };
    let width = reader.number()?;
    let height = reader.number()?;
    let maxval = reader.number()?;
    if maxval == 0 || maxval > 0xffff {
        return Err(eyre!("Invalid maxval {}", maxval));
    }
    let num_samples = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| eyre!("Image too large: {}x{}", width, height))?;

    let samples: Vec<u8> = if binary {
        // Exactly one whitespace byte separates the header from the raster.
        let raster = data.get(reader.pos + 1..).unwrap_or_default();
        let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
        let needed = num_samples
            .checked_mul(bytes_per_sample)
            .ok_or_else(|| eyre!("Image too large: {}x{}", width, height))?;
        if raster.len() < needed {
            return Err(eyre!(
                "PPM raster truncated: {} bytes, expected {}",
                raster.len(),
                needed
            ));
        }
        raster[..needed]
            .chunks_exact(bytes_per_sample)
            .map(|c| {
                let sample = c.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
                rescale(sample, maxval)
            })
            .collect::<Result<_>>()?
    } else {
        (0..num_samples)
            .map(|i| {
                let sample = reader.number().wrap_err_with(|| format!("Reading sample {i}"))?;
                rescale(sample, maxval)
            })
            .collect::<Result<_>>()?
    };

    let pixels = samples
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    Ok(RgbImage::new((width, height), pixels)?)
}

/// Serializes `image` as a plain-text P3 image with maxval 255.
pub fn to_ppm_p3(image: &RgbImage) -> Vec<u8> {
    let mut out = format!("P3\n{} {}\n255\n", image.width(), image.height());
    for y in 0..image.height() {
        let row: Vec<String> = image
            .row(y)
            .iter()
            .map(|p| format!("{} {} {}", p.r, p.g, p.b))
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.into_bytes()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_with_comments() -> Result<()> {
        let data = b"P3\n# made by hand\n2 1 # size\n255\n255 0 0\n  0 128 255\n";
        let image = parse_ppm(data)?;
        assert_eq!(image.size(), (2, 1));
        assert_eq!(image.pixel(0, 0), Rgb::new(255, 0, 0));
        assert_eq!(image.pixel(1, 0), Rgb::new(0, 128, 255));
        Ok(())
    }

    #[test]
    fn raw_and_rescaled() -> Result<()> {
        let mut data = b"P6 1 2 15\n".to_vec();
        data.extend_from_slice(&[15, 0, 7, 1, 2, 3]);
        let image = parse_ppm(&data)?;
        assert_eq!(image.pixel(0, 0), Rgb::new(255, 0, 119));
        assert_eq!(image.pixel(0, 1), Rgb::new(17, 34, 51));

        let mut data = b"P6 1 1 65535\n".to_vec();
        data.extend_from_slice(&[0xff, 0xff, 0x80, 0x00, 0x00, 0x00]);
        assert_eq!(parse_ppm(&data)?.pixel(0, 0), Rgb::new(255, 128, 0));
        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_ppm(b"P5\n1 1\n255\n\0").is_err());
        assert!(parse_ppm(b"P3\n2 2\n255\n1 2 3").is_err());
        assert!(parse_ppm(b"P3\n1 1\n10\n11 0 0").is_err());
        assert!(parse_ppm(b"P6\n2 2\n255\n\0\0\0").is_err());
        assert!(parse_ppm(b"P3\n1 1\n0\n0 0 0").is_err());
        let huge = format!("P6\n{} 1\n65535\n", usize::MAX / 4);
        assert!(parse_ppm(huge.as_bytes()).is_err());
    }

    #[test]
    fn write_then_parse() -> Result<()> {
        let image =
            RgbImage::from_fn((3, 2), |x, y| Rgb::new(x as u8 * 80, y as u8 * 200, 9))?;
        let bytes = to_ppm_p3(&image);
        assert!(bytes.starts_with(b"P3\n3 2\n255\n0 0 9 80 0 9 160 0 9\n"));
        assert_eq!(parse_ppm(&bytes)?, image);
        Ok(())
    }
}
