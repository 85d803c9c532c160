use pixscan_image::{ImageSize, RasterBuffer};
use pixscan_imgproc::{
    benchmark::BenchmarkHarness,
    equivalence::{check_equivalence, first_mismatch},
    LookupTable, ScanError, ScanStrategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize, channels: usize) -> RasterBuffer {
    let data: Vec<u8> = (0..width * height * channels).map(|_| rng.random()).collect();
    RasterBuffer::new(ImageSize { width, height }, channels, data).unwrap()
}

#[test]
fn strategies_agree_on_random_buffers() -> Result<(), ScanError> {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let width = rng.random_range(1..40);
        let height = rng.random_range(1..40);
        let channels = if rng.random_bool(0.5) { 1 } else { 3 };
        let divisor = rng.random_range(1..=300);
        let padding = rng.random_range(0..9);

        let packed = random_image(&mut rng, width, height, channels);
        let padded = packed.to_row_pitch(width * channels + padding)?;
        let table = LookupTable::quantize(divisor)?;

        check_equivalence(&packed, &table, &ScanStrategy::ALL)?;
        check_equivalence(&padded, &table, &ScanStrategy::ALL)?;

        // packed and padded layouts holding the same pixels give the same result
        for strategy in ScanStrategy::ALL {
            let mut a = packed.clone();
            let mut b = padded.clone();
            strategy.apply(&mut a, &table)?;
            strategy.apply(&mut b, &table)?;
            assert_eq!(first_mismatch(&a, &b)?, None, "{strategy}");

            let expected = packed
                .to_vec()
                .iter()
                .map(|&v| (divisor * (v as i64 / divisor)) as u8)
                .collect::<Vec<_>>();
            assert_eq!(a.to_vec(), expected, "{strategy}");
        }
    }

    Ok(())
}

#[test]
fn divisor_one_leaves_buffer_unchanged() -> Result<(), ScanError> {
    let mut rng = StdRng::seed_from_u64(7);
    let table = LookupTable::quantize(1)?;

    for channels in [1, 3] {
        let image = random_image(&mut rng, 31, 17, channels).to_row_pitch(31 * channels + 5)?;
        for strategy in ScanStrategy::ALL {
            let mut out = image.clone();
            strategy.apply(&mut out, &table)?;
            assert_eq!(out.as_bytes(), image.as_bytes(), "{strategy}");
        }
    }

    Ok(())
}

#[test]
fn benchmark_over_random_color_image() -> Result<(), ScanError> {
    let mut rng = StdRng::seed_from_u64(3);
    let image = random_image(&mut rng, 128, 96, 3);
    let before = image.clone();
    let table = LookupTable::quantize(10)?;

    let results = BenchmarkHarness::new().run_checked(&image, &table, &ScanStrategy::ALL, 4)?;

    let names = results.iter().map(|r| r.name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["direct-index", "iterator", "random-access", "lut"]);
    assert!(results
        .iter()
        .all(|r| r.mean_ms.is_finite() && r.mean_ms >= 0.0));
    assert_eq!(image.as_bytes(), before.as_bytes());

    Ok(())
}
