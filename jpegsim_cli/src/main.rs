// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use jpegsim::{
    ChromaSubsampling, Decoder, DecoderOptions, EncodedImage, Encoder, EncoderOptions, RgbImage,
};
use jpegsim_cli::ppm::{parse_ppm, to_ppm_p3};

#[derive(Parser)]
#[command(name = "jpegsim")]
#[command(about = "Block-based lossy image codec", long_about = None)]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a PPM image into a .jsim file
    Encode {
        /// Input PPM (P3 or P6); width and height must be multiples of 8
        input: PathBuf,
        /// Output .jsim file
        output: PathBuf,
        /// Keep chroma at full resolution
        #[arg(long)]
        no_subsampling: bool,
    },
    /// Decode a .jsim file into a plain PPM image
    Decode {
        /// Input .jsim file
        input: PathBuf,
        /// Output PPM file
        output: PathBuf,
    },
    /// Encode and decode a PPM image in memory and report the loss
    Roundtrip {
        /// Input PPM (P3 or P6)
        input: PathBuf,
        /// Output PPM file
        output: PathBuf,
        /// Keep chroma at full resolution
        #[arg(long)]
        no_subsampling: bool,
    },
}

fn encoder(no_subsampling: bool) -> Encoder {
    let subsampling = if no_subsampling {
        ChromaSubsampling::Yuv444
    } else {
        ChromaSubsampling::Yuv420
    };
    Encoder::new(EncoderOptions::default().with_subsampling(subsampling))
}

fn read_ppm(path: &Path) -> Result<RgbImage> {
    let data = fs::read(path).wrap_err_with(|| format!("Cannot read {}", path.display()))?;
    parse_ppm(&data).wrap_err_with(|| format!("Cannot parse {}", path.display()))
}

fn write_ppm(path: &Path, image: &RgbImage) -> Result<()> {
    fs::write(path, to_ppm_p3(image)).wrap_err_with(|| format!("Cannot write {}", path.display()))
}

fn print_stats(image: &RgbImage, encoded: &EncodedImage) -> Result<()> {
    let stats = encoded.stats()?;
    let raw_bytes = image.width() * image.height() * 3;
    println!(
        "Image size: {} x {} ({} blocks)",
        image.width(),
        image.height(),
        stats.blocks
    );
    println!(
        "{} fields, {} non-zero coefficients, {} end-of-block markers",
        stats.fields, stats.nonzero_coefficients, stats.end_of_block_markers
    );
    println!(
        "{} fields for {} raw bytes ({:.2}x)",
        stats.fields,
        raw_bytes,
        raw_bytes as f64 / stats.fields.max(1) as f64
    );
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    match Opt::parse().command {
        Command::Encode {
            input,
            output,
            no_subsampling,
        } => {
            let image = read_ppm(&input)?;
            let encoded = encoder(no_subsampling).encode(&image)?;
            print_stats(&image, &encoded)?;
            let bytes = encoded.to_bytes()?;
            fs::write(&output, &bytes)
                .wrap_err_with(|| format!("Cannot write {}", output.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
        Command::Decode { input, output } => {
            let bytes =
                fs::read(&input).wrap_err_with(|| format!("Cannot read {}", input.display()))?;
            let encoded = EncodedImage::from_bytes(&bytes)?;
            let image = Decoder::new(DecoderOptions::default()).decode(&encoded)?;
            println!("Image size: {} x {}", image.width(), image.height());
            write_ppm(&output, &image)?;
        }
        Command::Roundtrip {
            input,
            output,
            no_subsampling,
        } => {
            let image = read_ppm(&input)?;
            let encoded = encoder(no_subsampling).encode(&image)?;
            print_stats(&image, &encoded)?;
            let decoded = Decoder::default().decode(&encoded)?;
            println!("Max channel error: {}", image.max_channel_error(&decoded)?);
            write_ppm(&output, &decoded)?;
        }
    }
    Ok(())
}
