//! PIX - single-channel image container
//!
//! `Pix` holds one sample per pixel at 8, 16 or 32 bits. Thermal sensors
//! typically deliver 16-bit counts; the rescaled output is always 8-bit.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Samples are packed MSB to LSB within each word
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per sample)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale (raw radiometric counts)
    Bit16 = 16,
    /// 32-bit grayscale
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per sample.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Image file format the pixels were decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format (constructed in memory)
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// TIFF format
    Tiff,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Tiff => "tif",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
    informat: ImageFormat,
    /// Packed sample words
    data: Vec<u32>,
}

/// PIX - immutable, shared image
///
/// # Examples
///
/// ```
/// use fieldscale_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 512, PixelDepth::Bit16).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.get_pixel(10, 10), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                xres: 0,
                yres: 0,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Create a PIX from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample count doesn't match the dimensions
    /// or a sample exceeds the maximum value for `depth`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldscale_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::from_samples(2, 2, PixelDepth::Bit16, &[1, 2, 3, 60000]).unwrap();
    /// assert_eq!(pix.get_pixel(1, 1), Some(60000));
    /// ```
    pub fn from_samples(width: u32, height: u32, depth: PixelDepth, samples: &[u32]) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if samples.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "sample count {} doesn't match {}x{} = {}",
                samples.len(),
                width,
                height,
                expected
            )));
        }
        let max_val = depth.max_value();
        if let Some(&bad) = samples.iter().find(|&&v| v > max_val) {
            return Err(Error::InvalidParameter(format!(
                "sample {bad} exceeds {} bpp range",
                depth.bits()
            )));
        }

        let mut pm = Pix::new(width, height, depth)?.to_mut();
        for (y, row) in samples.chunks_exact(width as usize).enumerate() {
            for (x, &val) in row.iter().enumerate() {
                pm.set_pixel_unchecked(x as u32, y as u32, val);
            }
        }
        Ok(pm.into())
    }

    /// Compute words per line for given width and depth.
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        let wpl = bits_per_line.div_ceil(32);
        u32::try_from(wpl).map_err(|_| Error::InvalidParameter(format!(
            "image row too large: width={width} depth={depth:?}"
        )))
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the number of 32-bit words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> i32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> i32 {
        self.inner.yres
    }

    /// Get the format this image was decoded from.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the packed words.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        let start = (y as usize) * wpl;
        &self.inner.data[start..start + wpl]
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Minimum and maximum sample values.
    pub fn min_max(&self) -> (u32, u32) {
        let mut min_val = u32::MAX;
        let mut max_val = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = self.get_pixel_unchecked(x, y);
                min_val = min_val.min(v);
                max_val = max_val.max(v);
            }
        }
        (min_val, max_val)
    }

    /// Try to take unique ownership for mutation.
    ///
    /// Fails (returning `self`) if the pixel buffer is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixMut { inner }),
            Err(inner) => Err(Pix { inner }),
        }
    }

    /// Get a mutable copy, cloning the buffer only when shared.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable image, converted back to [`Pix`] with `into()`
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Set the X resolution (ppi).
    pub fn set_xres(&mut self, xres: i32) {
        self.inner.xres = xres;
    }

    /// Set the Y resolution (ppi).
    pub fn set_yres(&mut self, yres: i32) {
        self.inner.yres = yres;
    }

    /// Copy the resolution of another image.
    pub fn copy_resolution_from(&mut self, src: &Pix) {
        self.inner.xres = src.xres();
        self.inner.yres = src.yres();
    }

    /// Record the format the pixels were decoded from.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get the packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        let start = (y as usize) * wpl;
        &self.inner.data[start..start + wpl]
    }

    /// Get the mutable packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.inner.wpl as usize;
        let start = (y as usize) * wpl;
        &mut self.inner.data[start..start + wpl]
    }
}

impl From<PixMut> for Pix {
    fn from(pm: PixMut) -> Self {
        Pix {
            inner: Arc::new(pm.inner),
        }
    }
}
