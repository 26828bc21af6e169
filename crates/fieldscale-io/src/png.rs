//! PNG image format support
//!
//! Only single-channel grayscale at 8 or 16 bits per sample is handled;
//! radiometric frames are stored as 16-bit gray and the rescaled output
//! as 8-bit gray.

use crate::{IoError, IoResult};
use fieldscale_core::{ImageFormat, Pix, PixelDepth};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a grayscale PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let pix_depth = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => PixelDepth::Bit8,
        (ColorType::Grayscale, BitDepth::Sixteen) => PixelDepth::Bit16,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "expected 8 or 16-bit single-channel PNG, got {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    match pix_depth {
        PixelDepth::Bit8 => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let val = data[row_start + x as usize];
                    pix_mut.set_pixel_unchecked(x, y, u32::from(val));
                }
            }
        }
        _ => {
            // PNG stores 16-bit samples big-endian
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * 2);
                    let val = (u32::from(data[idx]) << 8) | u32::from(data[idx + 1]);
                    pix_mut.set_pixel_unchecked(x, y, val);
                }
            }
        }
    }

    pix_mut.set_informat(ImageFormat::Png);
    Ok(pix_mut.into())
}

/// Write a grayscale PNG image
///
/// 32-bit images are rejected; PNG has no 32-bit gray encoding.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (bit_depth, bytes_per_sample) = match pix.depth() {
        PixelDepth::Bit8 => (BitDepth::Eight, 1usize),
        PixelDepth::Bit16 => (BitDepth::Sixteen, 2usize),
        PixelDepth::Bit32 => {
            return Err(IoError::UnsupportedFormat(
                "PNG cannot store 32-bit grayscale".to_string(),
            ));
        }
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * bytes_per_sample;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            if bytes_per_sample == 1 {
                data[row_start + x as usize] = val as u8;
            } else {
                let idx = row_start + (x as usize * 2);
                data[idx] = (val >> 8) as u8;
                data[idx + 1] = val as u8;
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
