//! End-to-end regression test for the Fieldscale estimator
//!
//! Run with:
//! ```
//! cargo test -p fieldscale --test fieldscale_reg
//! ```
//!
//! Set `REGTEST_MODE=display` to write the rescaled frames to
//! `tests/regout`.

use fieldscale::{
    Field, Fieldscale, FieldscaleError, FieldscaleOptions, ImageFormat, Pix, PixelDepth, ScanOrder,
};
use fieldscale_test::{RegParams, regout_dir, synth};
use std::fs;
use std::path::PathBuf;

fn plain_options() -> FieldscaleOptions {
    FieldscaleOptions {
        gamma: 0.0,
        clahe: false,
        ..Default::default()
    }
}

#[test]
fn fieldscale_reg_hot_square() {
    let mut rp = RegParams::new("fieldscale_hot_square");

    let pix = synth::hot_square(16, 16, 1000, 60000, (0, 0), 2).unwrap();
    let mut fs = Fieldscale::new(plain_options()).unwrap();

    // The 60000 patch is capped at its neighborhood mean plus max_diff
    let (min_grid, max_grid) = fs.estimate_grids(&pix).unwrap();
    rp.compare_values(1400.0, max_grid.get_pixel(0, 0).unwrap(), 1e-9);
    rp.check(max_grid.max_value() == Some(1400.0), "no max cell above the cap");
    rp.check(min_grid.min_value() == Some(1000.0), "min grid keeps the background");
    rp.check(
        min_grid.get_pixel(0, 0).unwrap() < 1010.0,
        "diffusion pulls the square's min cell down to the background",
    );

    let out = fs.process(&pix).unwrap();
    rp.compare_values(8.0, f64::from(out.depth().bits()), 0.0);
    rp.check(out.dimensions() == (16, 16), "output keeps the frame size");

    let mut square_ok = true;
    let mut background_ok = true;
    for y in 0..16 {
        for x in 0..16 {
            let v = out.get_pixel(x, y).unwrap();
            if x < 2 && y < 2 {
                square_ok &= v == 255;
            } else {
                background_ok &= v == 0;
            }
        }
    }
    rp.check(square_ok, "hot square maps to 255");
    rp.check(background_ok, "background maps to 0");
    rp.write_pix(&out, ImageFormat::Png).unwrap();

    assert!(rp.cleanup(), "fieldscale hot square regression test failed");
}

#[test]
fn fieldscale_reg_determinism() {
    let mut rp = RegParams::new("fieldscale_determinism");

    let scene = synth::thermal_scene(80, 64, 4).unwrap();
    for options in [FieldscaleOptions::default(), plain_options()] {
        let mut a = Fieldscale::new(options.clone()).unwrap();
        let mut b = Fieldscale::new(options).unwrap();
        let out_a1 = a.process(&scene).unwrap();
        let out_a2 = a.process(&scene).unwrap();
        let out_b = b.process(&scene).unwrap();
        rp.compare_pix(&out_a1, &out_a2);
        rp.compare_pix(&out_a1, &out_b);
        rp.write_pix(&out_a1, ImageFormat::Png).unwrap();
    }

    // Both scan orders produce a valid frame
    let mut snap = Fieldscale::new(FieldscaleOptions {
        scan_order: ScanOrder::Snapshot,
        ..plain_options()
    })
    .unwrap();
    let out = snap.process(&scene).unwrap();
    rp.check(out.dimensions() == scene.dimensions(), "snapshot scan output size");

    assert!(rp.cleanup(), "fieldscale determinism regression test failed");
}

#[test]
fn fieldscale_reg_rescale_properties() {
    let mut rp = RegParams::new("fieldscale_properties");

    let scene = synth::thermal_scene(96, 72, 9).unwrap();
    let fs = Fieldscale::new(plain_options()).unwrap();
    let fields = fs.estimate_fields(&scene).unwrap();
    rp.check(fields.min.dimensions() == scene.dimensions(), "min field matches frame");
    rp.check(fields.max.dimensions() == scene.dimensions(), "max field matches frame");

    // The one-sided diffusion keeps the bounds inside the sample range
    let (smin, smax) = scene.min_max();
    rp.check(
        fields.min.min_value().unwrap() >= f64::from(smin) - 1e-9,
        "min field not below the darkest sample",
    );
    rp.check(
        fields.max.max_value().unwrap() <= f64::from(smax) + 1e-9,
        "max field not above the brightest sample",
    );

    let mut fs = fs;
    let out = fs.process(&scene).unwrap();
    let mut ok = true;
    for y in 0..scene.height() {
        for x in 0..scene.width() {
            let v = f64::from(scene.get_pixel(x, y).unwrap());
            let lo = fields.min.get_pixel_unchecked(x, y);
            let hi = fields.max.get_pixel_unchecked(x, y);
            let o = out.get_pixel(x, y).unwrap();
            if lo < hi && v <= lo {
                ok &= o == 0;
            }
            if lo < hi && v >= hi {
                ok &= o == 255;
            }
        }
    }
    rp.check(ok, "samples outside the band clip to 0 and 255");

    assert!(rp.cleanup(), "fieldscale properties regression test failed");
}

#[test]
fn fieldscale_reg_video() {
    let mut rp = RegParams::new("fieldscale_video");

    let frame1 = synth::thermal_scene(64, 48, 1).unwrap();
    let frame2 = synth::hot_square(64, 48, 22000, 40000, (40, 8), 12).unwrap();

    let mut video = Fieldscale::new(FieldscaleOptions {
        video: true,
        ..plain_options()
    })
    .unwrap();
    let f1 = video.estimate_fields(&frame1).unwrap();
    let f2 = video.estimate_fields(&frame2).unwrap();

    // First frame is used as is
    let out1 = video.process(&frame1).unwrap();
    let stored = video.previous_fields().cloned().unwrap();
    rp.compare_fields(&f1.min, &stored.min, 0.0);
    rp.compare_fields(&f1.max, &stored.max, 0.0);

    let mut still = Fieldscale::new(plain_options()).unwrap();
    rp.compare_pix(&still.process(&frame1).unwrap(), &out1);

    // Second frame uses 0.1 * current + 0.9 * previous
    video.process(&frame2).unwrap();
    let stored = video.previous_fields().cloned().unwrap();
    let expected_min = Field::linear_combination_two(0.1, &f2.min, 0.9, &f1.min).unwrap();
    let expected_max = Field::linear_combination_two(0.1, &f2.max, 0.9, &f1.max).unwrap();
    rp.compare_fields(&expected_min, &stored.min, 1e-9);
    rp.compare_fields(&expected_max, &stored.max, 1e-9);

    // A new sequence starts unblended
    video.reset();
    let restarted = video.process(&frame2).unwrap();
    rp.compare_pix(&still.process(&frame2).unwrap(), &restarted);

    assert!(rp.cleanup(), "fieldscale video regression test failed");
}

#[test]
fn fieldscale_reg_path_input() {
    let mut rp = RegParams::new("fieldscale_path");

    let dir = PathBuf::from(regout_dir());
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fieldscale_path_input.tiff");

    let scene = synth::thermal_scene(64, 64, 2).unwrap();
    fieldscale::io::write_image(&scene, &path, ImageFormat::Tiff).unwrap();

    let mut estimator = Fieldscale::new(FieldscaleOptions::default()).unwrap();
    let from_path = estimator.process_path(&path).unwrap();
    let from_memory = estimator.process(&scene).unwrap();
    rp.compare_pix(&from_memory, &from_path);
    fs::remove_file(&path).ok();

    let missing = estimator.process_path(dir.join("does_not_exist.png"));
    rp.check(matches!(missing, Err(FieldscaleError::Io(_))), "missing file");

    let tiny = Pix::from_samples(4, 4, PixelDepth::Bit16, &[100; 16]).unwrap();
    rp.check(
        matches!(estimator.process(&tiny), Err(FieldscaleError::Input(_))),
        "frame smaller than the grid",
    );

    assert!(rp.cleanup(), "fieldscale path regression test failed");
}

#[test]
fn fieldscale_reg_configuration() {
    let mut rp = RegParams::new("fieldscale_configuration");

    let bad = [
        FieldscaleOptions { max_diff: -1.0, ..Default::default() },
        FieldscaleOptions { min_diff: -1.0, ..Default::default() },
        FieldscaleOptions { iteration: 0, ..Default::default() },
        FieldscaleOptions { gamma: -1.5, ..Default::default() },
        FieldscaleOptions { grid: fieldscale::GridShape::new(0, 8), ..Default::default() },
    ];
    for options in bad {
        rp.check(
            matches!(Fieldscale::new(options), Err(FieldscaleError::Configuration(_))),
            "invalid options rejected at construction",
        );
    }

    // The core error module stays reachable through the facade
    let core_err: fieldscale::error::Result<Pix> = Pix::new(0, 4, PixelDepth::Bit16);
    rp.check(
        matches!(core_err, Err(fieldscale::error::Error::InvalidDimension { .. })),
        "core error module re-exported",
    );

    assert!(rp.cleanup(), "fieldscale configuration regression test failed");
}

#[test]
fn fieldscale_reg_radius_past_grid() {
    let mut rp = RegParams::new("fieldscale_radius_past_grid");

    // An 8x8 grid is fully covered by radius 7; anything larger is the same
    let pix = synth::hot_square(16, 16, 1000, 60000, (0, 0), 2).unwrap();
    let covering = FieldscaleOptions {
        suppression_radius: 7,
        diffusion_radius: 7,
        ..plain_options()
    };
    let mut reference = Fieldscale::new(covering.clone()).unwrap();
    let (ref_min, ref_max) = reference.estimate_grids(&pix).unwrap();
    let ref_out = reference.process(&pix).unwrap();

    for radius in [8, 100_000, u32::MAX] {
        let mut wide = Fieldscale::new(FieldscaleOptions {
            suppression_radius: radius,
            diffusion_radius: radius,
            ..covering.clone()
        })
        .unwrap();
        let (min_grid, max_grid) = wide.estimate_grids(&pix).unwrap();
        rp.compare_fields(&ref_min, &min_grid, 0.0);
        rp.compare_fields(&ref_max, &max_grid, 0.0);
        rp.compare_pix(&ref_out, &wide.process(&pix).unwrap());
    }

    assert!(rp.cleanup(), "fieldscale radius regression test failed");
}
