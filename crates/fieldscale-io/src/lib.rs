//! Fieldscale IO - image reading and writing
//!
//! Radiometric frames come in as 16-bit grayscale PNG or TIFF and the
//! rescaled result goes out as 8-bit grayscale. Formats are gated behind
//! the `png-format` and `tiff-format` features, both on by default.
//!
//! # Examples
//!
//! ```no_run
//! use fieldscale_io::{read_image, write_image, ImageFormat};
//!
//! let pix = read_image("frame_0001.tiff").unwrap();
//! write_image(&pix, "copy.png", ImageFormat::Png).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use fieldscale_core::ImageFormat;
pub use format::{detect_format, detect_format_from_bytes};

use fieldscale_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;
use tracing::debug;

/// Read an image from a file path
///
/// The format is detected from the file header, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let pix = read_image_format(reader, format)?;
    debug!(
        path = %path.display(),
        ?format,
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "read image"
    );
    Ok(pix)
}

/// Read an image from memory
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Pix>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(reader),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not enabled",
            format
        ))),
    }
}

/// Write an image to a file path in the given format
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer)?,
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::write_tiff(pix, writer, tiff::TiffCompression::default())?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "writing {:?} is not supported",
                format
            )));
        }
    }

    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}
