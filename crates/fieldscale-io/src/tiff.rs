//! TIFF image format support
//!
//! Radiometric cameras commonly export single-page grayscale TIFFs. This
//! module reads and writes gray images at 8, 16 and 32 bits per sample.
//! Only the first page of a multipage file is read.

use crate::{IoError, IoResult};
use fieldscale_core::{ImageFormat, Pix, PixMut, PixelDepth};
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, Gray16, Gray32};
use tiff::encoder::{Compression, TiffEncoder};

/// TIFF compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression
    #[default]
    None,
    /// PackBits compression
    PackBits,
    /// LZW compression
    Lzw,
}

impl TiffCompression {
    fn to_tiff_compression(self) -> Compression {
        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::PackBits => Compression::Packbits,
            TiffCompression::Lzw => Compression::Lzw,
        }
    }
}

/// Read a grayscale TIFF image
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;

    let pix_depth = match color_type {
        ColorType::Gray(8) => PixelDepth::Bit8,
        ColorType::Gray(16) => PixelDepth::Bit16,
        ColorType::Gray(32) => PixelDepth::Bit32,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "expected single-channel gray TIFF, got {:?}",
                color_type
            )));
        }
    };

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();

    if let Ok(x_res) = decoder.get_tag_f32(tiff::tags::Tag::XResolution) {
        pix_mut.set_xres(x_res as i32);
    }
    if let Ok(y_res) = decoder.get_tag_f32(tiff::tags::Tag::YResolution) {
        pix_mut.set_yres(y_res as i32);
    }

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    match image_data {
        DecodingResult::U8(data) => fill_samples(&mut pix_mut, &data)?,
        DecodingResult::U16(data) => fill_samples(&mut pix_mut, &data)?,
        DecodingResult::U32(data) => fill_samples(&mut pix_mut, &data)?,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "TIFF sample type is not an unsigned integer".to_string(),
            ));
        }
    }

    pix_mut.set_informat(ImageFormat::Tiff);
    Ok(pix_mut.into())
}

fn fill_samples<T: Copy + Into<u32>>(pix_mut: &mut PixMut, data: &[T]) -> IoResult<()> {
    let width = pix_mut.width();
    let height = pix_mut.height();
    let expected = (width as usize) * (height as usize);
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "TIFF data too short: {} samples for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    for y in 0..height {
        let row_start = (y as usize) * (width as usize);
        for x in 0..width {
            pix_mut.set_pixel_unchecked(x, y, data[row_start + x as usize].into());
        }
    }
    Ok(())
}

/// Write a grayscale TIFF image
pub fn write_tiff<W: Write + Seek>(
    pix: &Pix,
    writer: W,
    compression: TiffCompression,
) -> IoResult<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?
        .with_compression(compression.to_tiff_compression());

    let width = pix.width();
    let height = pix.height();
    let size = (width as usize) * (height as usize);

    let result = match pix.depth() {
        PixelDepth::Bit8 => {
            let mut data = Vec::with_capacity(size);
            for y in 0..height {
                for x in 0..width {
                    data.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
            encoder.write_image::<Gray8>(width, height, &data)
        }
        PixelDepth::Bit16 => {
            let mut data = Vec::with_capacity(size);
            for y in 0..height {
                for x in 0..width {
                    data.push(pix.get_pixel_unchecked(x, y) as u16);
                }
            }
            encoder.write_image::<Gray16>(width, height, &data)
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity(size);
            for y in 0..height {
                for x in 0..width {
                    data.push(pix.get_pixel_unchecked(x, y));
                }
            }
            encoder.write_image::<Gray32>(width, height, &data)
        }
    };

    result.map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))
}
