//! Grid reduction regression test
//!
//! Checks per-patch min/max against a brute-force scan on random 16-bit
//! images, including sizes that do not divide evenly by the grid.
//!
//! Run with:
//! ```
//! cargo test -p fieldscale-filter --test grid_reg
//! ```

use fieldscale_core::{Pix, PixelDepth};
use fieldscale_filter::{FilterError, GridShape, gridwise_max, gridwise_min, gridwise_min_max};
use fieldscale_test::{RegParams, synth};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pix(rng: &mut StdRng, width: u32, height: u32) -> Pix {
    let samples: Vec<u32> = (0..width * height).map(|_| rng.gen_range(0..=65535)).collect();
    Pix::from_samples(width, height, PixelDepth::Bit16, &samples).unwrap()
}

fn brute_force(pix: &Pix, shape: GridShape, row: u32, col: u32) -> (u32, u32) {
    let pw = pix.width() / shape.cols;
    let ph = pix.height() / shape.rows;
    let mut lo = u32::MAX;
    let mut hi = 0;
    for y in row * ph..(row + 1) * ph {
        for x in col * pw..(col + 1) * pw {
            let v = pix.get_pixel(x, y).unwrap();
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo, hi)
}

#[test]
fn grid_reg_random_images() {
    let mut rp = RegParams::new("grid_random");
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for &(w, h, rows, cols) in &[(64, 48, 8, 8), (67, 53, 8, 8), (30, 20, 3, 5), (9, 9, 1, 1)] {
        let pix = random_pix(&mut rng, w, h);
        let shape = GridShape::new(rows, cols);
        let (gmin, gmax) = gridwise_min_max(&pix, shape).unwrap();
        rp.check(gmin.dimensions() == (cols, rows), "min grid is cols x rows");

        let mut all_match = true;
        for r in 0..rows {
            for c in 0..cols {
                let (lo, hi) = brute_force(&pix, shape, r, c);
                all_match &= gmin.get_pixel_unchecked(c, r) == f64::from(lo);
                all_match &= gmax.get_pixel_unchecked(c, r) == f64::from(hi);
            }
        }
        rp.check(all_match, &format!("patch extrema for {}x{} / {}x{}", w, h, rows, cols));

        // The separate entry points agree with the combined pass
        rp.compare_fields(&gmin, &gridwise_min(&pix, shape).unwrap(), 0.0);
        rp.compare_fields(&gmax, &gridwise_max(&pix, shape).unwrap(), 0.0);
    }

    assert!(rp.cleanup(), "grid random regression test failed");
}

#[test]
fn grid_reg_hot_square() {
    let mut rp = RegParams::new("grid_hot_square");

    let pix = synth::hot_square(16, 16, 1000, 60000, (0, 0), 2).unwrap();
    let (gmin, gmax) = gridwise_min_max(&pix, GridShape::default()).unwrap();

    // 2x2 patches: the square fills exactly cell (0, 0)
    rp.compare_values(60000.0, gmax.get_pixel(0, 0).unwrap(), 0.0);
    rp.compare_values(60000.0, gmin.get_pixel(0, 0).unwrap(), 0.0);
    rp.compare_values(1000.0, gmax.get_pixel(1, 0).unwrap(), 0.0);
    rp.compare_values(1000.0, gmin.min_value().unwrap(), 0.0);

    assert!(rp.cleanup(), "grid hot square regression test failed");
}

#[test]
fn grid_reg_errors() {
    let mut rp = RegParams::new("grid_errors");

    let pix = synth::uniform(16, 16, 1).unwrap();
    rp.check(
        matches!(gridwise_min(&pix, GridShape::new(0, 8)), Err(FilterError::InvalidParameters(_))),
        "zero grid dimension",
    );
    rp.check(
        matches!(gridwise_max(&pix, GridShape::new(32, 8)), Err(FilterError::ImageTooSmall { .. })),
        "grid taller than the image",
    );

    assert!(rp.cleanup(), "grid error regression test failed");
}
