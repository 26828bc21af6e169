//! Contrast-limited adaptive histogram equalization (CLAHE)
//!
//! Local contrast equalization applied as the last pipeline stage. The
//! image is divided into `tiles_x x tiles_y` tiles; each tile gets its own
//! equalization LUT built from a clipped histogram, and every pixel is
//! mapped through a bilinear blend of the four nearest tile LUTs.
//!
//! The behavior follows the common OpenCV formulation:
//!
//! - images whose size is not a multiple of the tile grid are padded by
//!   reflection (`dcb|abcd|cba`) for LUT computation only
//! - the per-bin clip limit is `max(floor(clip_limit * tile_area / 256), 1)`
//! - clipped excess is spread evenly over all bins, the remainder one
//!   count at a time with a fixed stride
//! - LUT values are `round(cdf * 255 / tile_area)`
//!
//! Other equalizers can be plugged into the estimator through the
//! [`LocalContrast`] trait.

use crate::{FilterError, FilterResult};
use fieldscale_core::{Pix, PixelDepth};

/// Default number of tiles horizontally
pub const DEFAULT_CLAHE_TILES_X: u32 = 8;

/// Default number of tiles vertically
pub const DEFAULT_CLAHE_TILES_Y: u32 = 8;

/// Default histogram clip limit
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 2.0;

const HIST_SIZE: usize = 256;

/// Local contrast equalization of an 8 bpp image
pub trait LocalContrast: Send + Sync {
    /// Equalize `pix`, returning a new 8 bpp image of the same size
    fn equalize(&self, pix: &Pix) -> FilterResult<Pix>;
}

/// Options for [`clahe`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheOptions {
    /// Number of tiles horizontally
    pub tiles_x: u32,
    /// Number of tiles vertically
    pub tiles_y: u32,
    /// Histogram clip limit relative to a flat histogram; 0 disables
    /// clipping
    pub clip_limit: f32,
}

impl Default for ClaheOptions {
    fn default() -> Self {
        Self {
            tiles_x: DEFAULT_CLAHE_TILES_X,
            tiles_y: DEFAULT_CLAHE_TILES_Y,
            clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
        }
    }
}

impl ClaheOptions {
    /// Check the tile counts and clip limit
    pub fn validate(&self) -> FilterResult<()> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "CLAHE tile grid must be non-zero, got {}x{}",
                self.tiles_x, self.tiles_y
            )));
        }
        if !self.clip_limit.is_finite() || self.clip_limit < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "CLAHE clip limit must be finite and >= 0, got {}",
                self.clip_limit
            )));
        }
        Ok(())
    }
}

/// CLAHE equalizer with fixed options
#[derive(Debug, Clone, Default)]
pub struct Clahe {
    options: ClaheOptions,
}

impl Clahe {
    /// Create an equalizer, validating the options
    pub fn new(options: ClaheOptions) -> FilterResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Options in use
    pub fn options(&self) -> &ClaheOptions {
        &self.options
    }
}

impl LocalContrast for Clahe {
    fn equalize(&self, pix: &Pix) -> FilterResult<Pix> {
        clahe(pix, &self.options)
    }
}

/// Apply CLAHE to an 8 bpp grayscale image
pub fn clahe(pix: &Pix, options: &ClaheOptions) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    options.validate()?;

    let (w, h) = pix.dimensions();
    let (grid_x, grid_y) = (options.tiles_x as usize, options.tiles_y as usize);

    let src = samples(pix);

    // Tile size comes from the padded image
    let ext_w = (w as usize).next_multiple_of(grid_x);
    let ext_h = (h as usize).next_multiple_of(grid_y);
    let tile_w = ext_w / grid_x;
    let tile_h = ext_h / grid_y;

    let luts = tile_luts(&src, w as usize, h as usize, options, tile_w, tile_h);

    let mut out_mut = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
    out_mut.copy_resolution_from(pix);

    let inv_tile_w = 1.0f32 / tile_w as f32;
    let inv_tile_h = 1.0f32 / tile_h as f32;

    for y in 0..h as usize {
        let (ty1, ty2, ya) = tile_coords(y, inv_tile_h, grid_y);
        for x in 0..w as usize {
            let (tx1, tx2, xa) = tile_coords(x, inv_tile_w, grid_x);
            let val = src[y * w as usize + x] as usize;

            let lut_at = |ty: usize, tx: usize| f32::from(luts[ty * grid_x + tx][val]);
            let top = (1.0 - xa) * lut_at(ty1, tx1) + xa * lut_at(ty1, tx2);
            let bottom = (1.0 - xa) * lut_at(ty2, tx1) + xa * lut_at(ty2, tx2);
            let mapped = (1.0 - ya) * top + ya * bottom;

            out_mut.set_pixel_unchecked(x as u32, y as u32, mapped.round().clamp(0.0, 255.0) as u32);
        }
    }

    Ok(out_mut.into())
}

fn samples(pix: &Pix) -> Vec<u8> {
    let (w, h) = pix.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for y in 0..h {
        for x in 0..w {
            out.push(pix.get_pixel_unchecked(x, y) as u8);
        }
    }
    out
}

/// Reflect index `i` into `0..len` without repeating the edge sample.
fn reflect101(i: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * len - 2;
    let r = i % period;
    if r >= len { period - r } else { r }
}

/// Neighboring tile indices and the weight of the second one.
fn tile_coords(pos: usize, inv_tile: f32, tiles: usize) -> (usize, usize, f32) {
    let tf = pos as f32 * inv_tile - 0.5;
    let t1 = tf.floor();
    let frac = tf - t1;
    let t2 = t1 as isize + 1;
    let t1 = t1.max(0.0) as usize;
    let t2 = (t2.max(0) as usize).min(tiles - 1);
    (t1, t2, frac)
}

fn tile_luts(
    src: &[u8],
    width: usize,
    height: usize,
    options: &ClaheOptions,
    tile_w: usize,
    tile_h: usize,
) -> Vec<[u8; HIST_SIZE]> {
    let (grid_x, grid_y) = (options.tiles_x as usize, options.tiles_y as usize);
    let tile_area = tile_w * tile_h;

    let clip = if options.clip_limit > 0.0 {
        let limit = (options.clip_limit * tile_area as f32 / HIST_SIZE as f32).max(1.0);
        Some(limit as usize)
    } else {
        None
    };
    let lut_scale = 255.0f32 / tile_area as f32;

    let mut luts = Vec::with_capacity(grid_x * grid_y);
    for ty in 0..grid_y {
        for tx in 0..grid_x {
            let mut hist = [0usize; HIST_SIZE];
            for y in (ty * tile_h)..((ty + 1) * tile_h) {
                let sy = reflect101(y, height);
                for x in (tx * tile_w)..((tx + 1) * tile_w) {
                    let sx = reflect101(x, width);
                    hist[src[sy * width + sx] as usize] += 1;
                }
            }

            if let Some(limit) = clip {
                clip_histogram(&mut hist, limit);
            }

            let mut lut = [0u8; HIST_SIZE];
            let mut cdf = 0usize;
            for (entry, &count) in lut.iter_mut().zip(&hist) {
                cdf += count;
                *entry = (cdf as f32 * lut_scale).round().min(255.0) as u8;
            }
            luts.push(lut);
        }
    }
    luts
}

fn clip_histogram(hist: &mut [usize; HIST_SIZE], limit: usize) {
    let mut clipped = 0;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += *bin - limit;
            *bin = limit;
        }
    }

    let batch = clipped / HIST_SIZE;
    let mut residual = clipped % HIST_SIZE;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (HIST_SIZE / residual).max(1);
        let mut i = 0;
        while i < HIST_SIZE && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}
