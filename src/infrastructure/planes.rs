// SPDX-License-Identifier: MPL-2.0
//! Multi-plane decoding.
//!
//! TIFF files are read page by page with the `tiff` crate so stacks keep
//! their page axis. Other formats go through the `image` crate.
//!
//! # Shape convention
//!
//! | Pages | Samples per pixel | Shape            |
//! |-------|-------------------|------------------|
//! | 1     | 1                 | `(h, w)`         |
//! | 1     | s                 | `(h, w, s)`      |
//! | n     | 1                 | `(n, h, w)`      |
//! | n     | s                 | `(n, h, w, s)`   |
//!
//! Only the first series is read: decoding stops at the first page whose
//! size or sample layout differs from page one.
//!
//! TIFF reads run without the `tiff` crate's memory limits, since stacks
//! routinely exceed them. [`PlaneDecoder::decode_shape`] walks the page
//! directories only and never touches sample data.

use crate::application::port::{PlaneArray, PlaneDecoder, RasterDecoder};
use crate::error::DecodeFailure;
use crate::infrastructure::raster::ImageRsDecoder;
use image_rs::{DynamicImage, GenericImageView, ImageDecoder, ImageReader};
use ndarray::IxDyn;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

const TIFF_MAGIC_LE: &[u8; 4] = b"II*\0";
const TIFF_MAGIC_BE: &[u8; 4] = b"MM\0*";
const BIGTIFF_MAGIC_LE: &[u8; 4] = b"II+\0";
const BIGTIFF_MAGIC_BE: &[u8; 4] = b"MM\0+";

/// [`PlaneDecoder`] for TIFF stacks, falling back to [`ImageRsDecoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffPlaneDecoder {
    raster: ImageRsDecoder,
}

impl TiffPlaneDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaneDecoder for TiffPlaneDecoder {
    fn decode_array(&self, path: &Path) -> Result<PlaneArray, DecodeFailure> {
        if is_tiff(path)? {
            decode_tiff(path)
        } else {
            let image = self.raster.decode(path)?;
            raster_to_array(&image)
        }
    }

    fn decode_shape(&self, path: &Path) -> Result<Vec<usize>, DecodeFailure> {
        if is_tiff(path)? {
            tiff_shape(path)
        } else {
            raster_shape(path)
        }
    }
}

fn is_tiff(path: &Path) -> Result<bool, DecodeFailure> {
    let mut file = File::open(path).map_err(|e| DecodeFailure::Io(e.to_string()))?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok([TIFF_MAGIC_LE, TIFF_MAGIC_BE, BIGTIFF_MAGIC_LE, BIGTIFF_MAGIC_BE]
            .contains(&&magic)),
        // Shorter than any image header; let the raster path report it.
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(DecodeFailure::Io(e.to_string())),
    }
}

type TiffReader = Decoder<BufReader<File>>;

fn open_tiff(path: &Path) -> Result<TiffReader, DecodeFailure> {
    let file = File::open(path).map_err(|e| DecodeFailure::Io(e.to_string()))?;
    Ok(Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited()))
}

/// Width, height and samples per pixel of the current page.
fn page_layout(decoder: &mut TiffReader) -> Result<(u32, u32, usize), DecodeFailure> {
    let (width, height) = decoder.dimensions()?;
    let samples = samples_per_pixel(decoder.colortype()?)?;
    Ok((width, height, samples))
}

fn first_page_layout(decoder: &mut TiffReader) -> Result<(u32, u32, usize), DecodeFailure> {
    let layout = page_layout(decoder)?;
    let (width, height, _) = layout;
    if width == 0 || height == 0 {
        return Err(DecodeFailure::Empty { width, height });
    }
    Ok(layout)
}

/// Moves to the next page if it continues the series.
fn next_in_series(
    decoder: &mut TiffReader,
    layout: (u32, u32, usize),
) -> Result<bool, DecodeFailure> {
    if !decoder.more_images() {
        return Ok(false);
    }
    decoder.next_image()?;
    // A page with an unreadable layout ends the series too.
    Ok(page_layout(decoder).is_ok_and(|next| next == layout))
}

fn series_shape(pages: usize, (width, height, samples): (u32, u32, usize)) -> Vec<usize> {
    let (h, w) = (height as usize, width as usize);
    match (pages, samples) {
        (1, 1) => vec![h, w],
        (1, s) => vec![h, w, s],
        (n, 1) => vec![n, h, w],
        (n, s) => vec![n, h, w, s],
    }
}

fn tiff_shape(path: &Path) -> Result<Vec<usize>, DecodeFailure> {
    let mut decoder = open_tiff(path)?;
    let layout = first_page_layout(&mut decoder)?;

    let mut pages = 1usize;
    while next_in_series(&mut decoder, layout)? {
        pages += 1;
    }

    Ok(series_shape(pages, layout))
}

fn decode_tiff(path: &Path) -> Result<PlaneArray, DecodeFailure> {
    let mut decoder = open_tiff(path)?;
    let layout = first_page_layout(&mut decoder)?;
    let (width, height, samples) = layout;
    let page_len = (width as usize) * (height as usize) * samples;

    let mut data: Vec<f64> = Vec::with_capacity(page_len);
    let mut pages = 0usize;
    loop {
        let page = samples_to_f64(decoder.read_image()?)?;
        if page.len() != page_len {
            return Err(DecodeFailure::Unsupported(format!(
                "page {} holds {} samples, expected {}",
                pages,
                page.len(),
                page_len
            )));
        }
        data.extend(page);
        pages += 1;

        if !next_in_series(&mut decoder, layout)? {
            break;
        }
    }

    PlaneArray::from_shape_vec(IxDyn(&series_shape(pages, layout)), data)
        .map_err(|e| DecodeFailure::Corrupted(e.to_string()))
}

#[allow(unreachable_patterns)]
fn samples_per_pixel(color: ColorType) -> Result<usize, DecodeFailure> {
    match color {
        ColorType::Gray(_) | ColorType::Palette(_) => Ok(1),
        ColorType::GrayA(_) => Ok(2),
        ColorType::RGB(_) | ColorType::YCbCr(_) => Ok(3),
        ColorType::RGBA(_) | ColorType::CMYK(_) => Ok(4),
        other => Err(DecodeFailure::Unsupported(format!("color type {other:?}"))),
    }
}

#[allow(unreachable_patterns)]
fn samples_to_f64(result: DecodingResult) -> Result<Vec<f64>, DecodeFailure> {
    let values = match result {
        DecodingResult::U8(v) => widen(v),
        DecodingResult::U16(v) => widen(v),
        DecodingResult::U32(v) => widen(v),
        #[allow(clippy::cast_precision_loss)]
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => widen(v),
        DecodingResult::I16(v) => widen(v),
        DecodingResult::I32(v) => widen(v),
        #[allow(clippy::cast_precision_loss)]
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => widen(v),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(DecodeFailure::Unsupported(
                "sample format has no lossless f64 conversion".to_string(),
            ))
        }
    };
    Ok(values)
}

fn widen<T: Into<f64>>(raw: Vec<T>) -> Vec<f64> {
    raw.into_iter().map(Into::into).collect()
}

/// Header-only shape of a non-TIFF raster.
fn raster_shape(path: &Path) -> Result<Vec<usize>, DecodeFailure> {
    let io = |e: std::io::Error| DecodeFailure::Io(e.to_string());
    let decoder = ImageReader::open(path)
        .map_err(io)?
        .with_guessed_format()
        .map_err(io)?
        .into_decoder()?;

    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeFailure::Empty { width, height });
    }
    let channels = usize::from(decoder.color_type().channel_count()).min(4);
    Ok(raster_layout_shape(height, width, channels))
}

fn raster_layout_shape(height: u32, width: u32, channels: usize) -> Vec<usize> {
    let (h, w) = (height as usize, width as usize);
    if channels == 1 {
        vec![h, w]
    } else {
        vec![h, w, channels]
    }
}

/// Raster images are a single page: `(h, w)` for gray, `(h, w, c)` otherwise.
fn raster_to_array(image: &DynamicImage) -> Result<PlaneArray, DecodeFailure> {
    let (width, height) = image.dimensions();
    let color = image.color();
    let eight_bit = color.bits_per_pixel() == u16::from(color.channel_count()) * 8;
    let channels = usize::from(color.channel_count()).min(4);

    let values = match (channels, eight_bit) {
        (1, true) => widen(image.to_luma8().into_raw()),
        (1, false) => widen(image.to_luma16().into_raw()),
        (2, true) => widen(image.to_luma_alpha8().into_raw()),
        (2, false) => widen(image.to_luma_alpha16().into_raw()),
        (3, true) => widen(image.to_rgb8().into_raw()),
        (3, false) => widen(image.to_rgb16().into_raw()),
        (_, true) => widen(image.to_rgba8().into_raw()),
        (_, false) => widen(image.to_rgba16().into_raw()),
    };

    let shape = raster_layout_shape(height, width, channels);
    PlaneArray::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| DecodeFailure::Corrupted(e.to_string()))
}
